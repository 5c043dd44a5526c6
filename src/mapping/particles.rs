//! Conversion of particle ensembles into particles list records.

use super::Annotation;
use crate::{
    geometry::In3D,
    io::{record as record_io, Verbose},
    particles::ParticleEnsemble,
    record::{
        particles::{verify_number_of_particles, ParticlesList},
        PradObject, Values,
    },
};
use std::{io, path::Path};

/// Creates a particles list record from the given particle ensemble.
///
/// Charges, masses and energies are copied as they are, positions are split
/// into components and the momentum components are computed as mass times
/// velocity. Fails with `InvalidInput` if the ensemble has fewer than two
/// particles, and with `InvalidData` if any of its arrays does not have one
/// entry (or row) per particle.
pub fn ensemble_to_particles_list<E: ParticleEnsemble>(
    ensemble: &E,
    annotation: &Annotation,
) -> io::Result<ParticlesList> {
    let number_of_particles = ensemble.number_of_particles();
    verify_number_of_particles(number_of_particles)?;

    let charges = ensemble.charges();
    let masses = ensemble.masses();
    let positions = ensemble.positions();
    let velocities = ensemble.velocities();
    let energies = ensemble.energies();

    if positions.dim() != (number_of_particles, 3) || velocities.dim() != (number_of_particles, 3)
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Particle positions {:?} and velocities {:?} must both have shape [{}, 3]",
                positions.shape(),
                velocities.shape(),
                number_of_particles
            ),
        ));
    }
    if let Some((name, length)) = [
        ("charges", charges.len()),
        ("masses", masses.len()),
        ("energies", energies.len()),
    ]
    .into_iter()
    .find(|&(_, length)| length != number_of_particles)
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Ensemble has {} {}, but {} particles",
                length, name, number_of_particles
            ),
        ));
    }

    let position_components =
        In3D::with_each_component(|dim| positions.column(dim.num()).to_owned());
    let momentum_components =
        In3D::with_each_component(|dim| &masses * &velocities.column(dim.num()));

    let mut particles = ParticlesList::new(
        charges.to_owned(),
        masses.to_owned(),
        position_components,
        momentum_components,
        Values::from(energies.to_owned()),
    )?;
    annotation.apply_to(&mut particles);
    Ok(particles)
}

/// Converts the given particle ensemble into a particles list record and
/// saves it at the given path.
pub fn save_ensemble<P, E>(
    ensemble: &E,
    output_file_path: P,
    annotation: &Annotation,
    verbose: Verbose,
) -> io::Result<()>
where
    P: AsRef<Path>,
    E: ParticleEnsemble,
{
    let particles = ensemble_to_particles_list(ensemble, annotation)?;
    record_io::save_record(&PradObject::from(particles), output_file_path, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::Dim3::{X, Y, Z},
        record::{fdt, Annotated},
    };
    use ndarray::prelude::*;

    /// Ensemble with arbitrary hand-set values.
    struct FixedEnsemble {
        charges: Array1<fdt>,
        masses: Array1<fdt>,
        positions: Array2<fdt>,
        velocities: Array2<fdt>,
        energies: Array1<fdt>,
    }

    impl FixedEnsemble {
        fn with_particles(n: usize) -> Self {
            Self {
                charges: Array1::from_elem(n, 1.6e-19),
                masses: Array1::linspace(1.0, n as fdt, n),
                positions: Array2::from_shape_fn((n, 3), |(i, j)| (10 * i + j) as fdt),
                velocities: Array2::from_shape_fn((n, 3), |(i, j)| (i as fdt + 1.0) * (j as fdt - 1.0)),
                energies: Array1::from_elem(n, 42.0),
            }
        }
    }

    impl ParticleEnsemble for FixedEnsemble {
        fn number_of_particles(&self) -> usize {
            self.charges.len()
        }
        fn charges(&self) -> ArrayView1<fdt> {
            self.charges.view()
        }
        fn masses(&self) -> ArrayView1<fdt> {
            self.masses.view()
        }
        fn positions(&self) -> ArrayView2<fdt> {
            self.positions.view()
        }
        fn velocities(&self) -> ArrayView2<fdt> {
            self.velocities.view()
        }
        fn energies(&self) -> ArrayView1<fdt> {
            self.energies.view()
        }
    }

    #[test]
    fn momentum_is_mass_times_velocity() {
        let ensemble = FixedEnsemble::with_particles(4);
        let particles = ensemble_to_particles_list(&ensemble, &Annotation::new()).unwrap();

        for (idx, dim) in [X, Y, Z].into_iter().enumerate() {
            let expected = &ensemble.masses * &ensemble.velocities.column(idx);
            assert_eq!(particles.momentum(dim), &expected);
            assert_eq!(particles.position(dim), &ensemble.positions.column(idx).to_owned());
        }
        assert_eq!(particles.charge(), &ensemble.charges);
        assert_eq!(particles.mass(), &ensemble.masses);
        assert_eq!(particles.energy().array(), Some(&ensemble.energies.clone().into_dyn()));
    }

    #[test]
    fn at_least_two_particles_are_required() {
        for n in [0, 1] {
            let err = ensemble_to_particles_list(&FixedEnsemble::with_particles(n), &Annotation::new())
                .unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        }
        let particles =
            ensemble_to_particles_list(&FixedEnsemble::with_particles(2), &Annotation::new()).unwrap();
        assert_eq!(particles.number_of_particles(), 2);
    }

    #[test]
    fn malformed_ensembles_are_rejected() {
        let mut ensemble = FixedEnsemble::with_particles(3);
        ensemble.velocities = Array2::zeros((3, 2));
        let err = ensemble_to_particles_list(&ensemble, &Annotation::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    /// Reports three particles through its positions and velocities.
    struct ShortColumnEnsemble {
        inner: FixedEnsemble,
    }

    impl ParticleEnsemble for ShortColumnEnsemble {
        fn number_of_particles(&self) -> usize {
            self.inner.positions.nrows()
        }
        fn charges(&self) -> ArrayView1<fdt> {
            self.inner.charges.view()
        }
        fn masses(&self) -> ArrayView1<fdt> {
            self.inner.masses.view()
        }
        fn positions(&self) -> ArrayView2<fdt> {
            self.inner.positions.view()
        }
        fn velocities(&self) -> ArrayView2<fdt> {
            self.inner.velocities.view()
        }
        fn energies(&self) -> ArrayView1<fdt> {
            self.inner.energies.view()
        }
    }

    #[test]
    fn short_charge_and_energy_columns_are_shape_errors() {
        let mut inner = FixedEnsemble::with_particles(3);
        inner.charges = array![1.6e-19];
        let err = ensemble_to_particles_list(&ShortColumnEnsemble { inner }, &Annotation::new())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("charges"));

        let mut inner = FixedEnsemble::with_particles(3);
        inner.energies = array![1.0, 2.0];
        let err = ensemble_to_particles_list(&ShortColumnEnsemble { inner }, &Annotation::new())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("energies"));
    }

    #[test]
    fn annotation_is_applied_verbatim() {
        let ensemble = FixedEnsemble::with_particles(2);
        let particles = ensemble_to_particles_list(
            &ensemble,
            &Annotation::new().with_label("  Protons ").with_description("14.7 MeV"),
        )
        .unwrap();
        assert_eq!(particles.label(), Some("  Protons "));
        assert_eq!(particles.description(), Some("14.7 MeV"));

        let particles = ensemble_to_particles_list(&ensemble, &Annotation::new()).unwrap();
        assert_eq!(particles.label(), None);
        assert_eq!(particles.description(), None);
    }
}
