#![allow(dead_code)]

use approx::assert_relative_eq;
use ndarray::{prelude::*, Data};
use pradconv::{
    geometry::In3D,
    grid::cartesian::CartesianGrid3,
    particles::{ParticleBeam, ParticleSpecies},
    units::{fun, ElectricFieldUnit, EnergyUnit, LengthUnit, Quantity},
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[macro_export]
macro_rules! def_test {
    (
        OUT[$($out_ident:ident = $out_str:expr),*]
        fn $name:ident $test_body:expr
    ) => {
        #[test]
        fn $name() {
            let test = common::Test::new(stringify!($name));

            $( let $out_ident = test.output_path($out_str); )*

            let test_body = |$( $out_ident: &std::path::Path, )*| $test_body;

            test_body($( $out_ident.as_path(), )*);
        }
    };
}

/// Scratch output directory for a single test, removed when dropped.
#[derive(Debug)]
pub struct Test {
    output_dir: TempDir,
}

impl Test {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        let output_dir = tempfile::Builder::new()
            .prefix(name.as_ref())
            .tempdir()
            .expect("Could not create output directory for test");
        Self { output_dir }
    }

    pub fn output_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.output_dir().join(file_name.as_ref())
    }

    fn output_dir(&self) -> &Path {
        self.output_dir.path()
    }
}

/// The 3x2x1 grid with unit spacing and a uniform 5 V/m E_x field.
pub fn scenario_grid() -> CartesianGrid3 {
    let grid = CartesianGrid3::from_axes(In3D::new(
        Quantity::from_vec(vec![0.0, 1.0, 2.0], LengthUnit::Meter),
        Quantity::from_vec(vec![0.0, 1.0], LengthUnit::Meter),
        Quantity::from_vec(vec![0.0], LengthUnit::Meter),
    ))
    .expect("Scenario axes are valid");
    let e_x = Quantity::new(grid.ones() * 5.0, ElectricFieldUnit::VoltPerMeter);
    grid.with_quantity("E_x", e_x)
        .expect("Scenario field matches grid")
}

/// A beam of the given number of 14.7 MeV protons moving along x.
pub fn proton_beam(number_of_particles: usize) -> ParticleBeam {
    let positions = Array2::from_shape_fn((number_of_particles, 3), |(i, j)| {
        if j == 1 {
            1e-3 * i as fun
        } else {
            0.0
        }
    });
    let directions = Array2::from_shape_fn((number_of_particles, 3), |(_, j)| {
        if j == 0 {
            1.0
        } else {
            0.0
        }
    });
    ParticleBeam::monoenergetic(
        ParticleSpecies::Proton,
        14.7,
        EnergyUnit::MegaelectronVolt,
        Quantity::new(positions, LengthUnit::Meter),
        directions,
    )
    .expect("Proton beam parameters are valid")
}

pub fn assert_arrays_close<S1, S2, D>(actual: &ArrayBase<S1, D>, expected: &ArrayBase<S2, D>)
where
    S1: Data<Elem = fun>,
    S2: Data<Elem = fun>,
    D: Dimension,
{
    assert_eq!(actual.shape(), expected.shape());
    for (&a, &e) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(a, e, max_relative = 1e-12);
    }
}
