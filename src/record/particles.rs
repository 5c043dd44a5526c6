//! Records of individual particles.

use super::{fdt, Annotated, Values};
use crate::geometry::{
    Dim3::{self, X, Y, Z},
    In3D,
};
use ndarray::prelude::*;
use std::io;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Smallest number of particles a particles list can hold.
pub const MIN_NUMBER_OF_PARTICLES: usize = 2;

/// Charge [C], mass [kg], position [m], momentum [kg m/s] and
/// kinetic energy of a list of particles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ParticlesList {
    charge: Array1<fdt>,
    mass: Array1<fdt>,
    x: Array1<fdt>,
    y: Array1<fdt>,
    z: Array1<fdt>,
    px: Array1<fdt>,
    py: Array1<fdt>,
    pz: Array1<fdt>,
    energy: Values,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    label: Option<String>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    description: Option<String>,
}

impl ParticlesList {
    /// Creates a new record from per-particle arrays.
    ///
    /// Fails with `InvalidInput` if there are fewer than two particles, and with
    /// `InvalidData` if the arrays do not all have one entry per particle.
    pub fn new(
        charge: Array1<fdt>,
        mass: Array1<fdt>,
        positions: In3D<Array1<fdt>>,
        momenta: In3D<Array1<fdt>>,
        energy: Values,
    ) -> io::Result<Self> {
        let [x, y, z] = positions.into_components();
        let [px, py, pz] = momenta.into_components();
        let particles = Self {
            charge,
            mass,
            x,
            y,
            z,
            px,
            py,
            pz,
            energy,
            label: None,
            description: None,
        };
        particles.verify()?;
        Ok(particles)
    }

    /// Checks that the record holds enough particles and that every
    /// per-particle array has one entry per particle.
    ///
    /// Records read from files are not validated during deserialization,
    /// so this must be called on them before use.
    pub fn verify(&self) -> io::Result<()> {
        let number_of_particles = self.number_of_particles();
        verify_number_of_particles(number_of_particles)?;

        let mut lengths = vec![("mass", self.mass.len())];
        for dim in Dim3::slice() {
            lengths.push((["x", "y", "z"][dim.num()], self.position(dim).len()));
            lengths.push((["px", "py", "pz"][dim.num()], self.momentum(dim).len()));
        }
        if let Some(array) = self.energy.array() {
            if array.ndim() != 1 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Particle energies must be 1D, but are {}D", array.ndim()),
                ));
            }
            lengths.push(("energy", array.len()));
        }
        match lengths
            .iter()
            .find(|&&(_, length)| length != number_of_particles)
        {
            Some(&(name, length)) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Particle {} has {} entries, but there are {} particles",
                    name, length, number_of_particles
                ),
            )),
            None => Ok(()),
        }
    }

    /// Returns the number of particles in the record.
    pub fn number_of_particles(&self) -> usize {
        self.charge.len()
    }

    /// Returns a reference to the particle charges.
    pub fn charge(&self) -> &Array1<fdt> {
        &self.charge
    }

    /// Returns a reference to the particle masses.
    pub fn mass(&self) -> &Array1<fdt> {
        &self.mass
    }

    /// Returns a reference to the particle coordinates along the given dimension.
    pub fn position(&self, dim: Dim3) -> &Array1<fdt> {
        match dim {
            X => &self.x,
            Y => &self.y,
            Z => &self.z,
        }
    }

    /// Returns a reference to the particle momentum components along the given dimension.
    pub fn momentum(&self, dim: Dim3) -> &Array1<fdt> {
        match dim {
            X => &self.px,
            Y => &self.py,
            Z => &self.pz,
        }
    }

    /// Returns a reference to the particle energies.
    pub fn energy(&self) -> &Values {
        &self.energy
    }

    /// Returns the name of the first attribute holding a NaN or infinite
    /// value, or `None` if all values are finite.
    pub fn first_nonfinite_attribute(&self) -> Option<&'static str> {
        let is_finite = |array: &Array1<fdt>| array.iter().all(|value| value.is_finite());
        let mut arrays = vec![("charge", &self.charge), ("mass", &self.mass)];
        for dim in Dim3::slice() {
            arrays.push((["x", "y", "z"][dim.num()], self.position(dim)));
            arrays.push((["px", "py", "pz"][dim.num()], self.momentum(dim)));
        }
        arrays
            .into_iter()
            .find(|(_, array)| !is_finite(*array))
            .map(|(name, _)| name)
            .or_else(|| (!self.energy.is_finite()).then_some("energy"))
    }
}

impl Annotated for ParticlesList {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn set_label(&mut self, label: String) {
        self.label = Some(label);
    }

    fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }
}

/// Checks that the given number of particles is large enough for a particles list.
pub fn verify_number_of_particles(number_of_particles: usize) -> io::Result<()> {
    if number_of_particles < MIN_NUMBER_OF_PARTICLES {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "A particles list needs at least {} particles, but got {}",
                MIN_NUMBER_OF_PARTICLES, number_of_particles
            ),
        ))
    } else {
        Ok(())
    }
}
