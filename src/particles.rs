//! Ensembles of charged particles.

use crate::{
    constants::{CLIGHT, M_ELECTRON, M_PROTON, Q_ELEMENTARY},
    units::{
        contract, fun, ChargeUnit, EnergyUnit, LengthUnit, MassUnit, Quantity, VelocityUnit,
    },
};
use ndarray::prelude::*;
use std::io;

/// Defines the properties of an ensemble of particles.
///
/// All values are expressed in SI units.
pub trait ParticleEnsemble {
    /// Returns the number of particles in the ensemble.
    fn number_of_particles(&self) -> usize;

    /// Returns the charge of each particle [C].
    fn charges(&self) -> ArrayView1<fun>;

    /// Returns the mass of each particle [kg].
    fn masses(&self) -> ArrayView1<fun>;

    /// Returns an N×3 array with the position of each particle [m].
    fn positions(&self) -> ArrayView2<fun>;

    /// Returns an N×3 array with the velocity of each particle [m/s].
    fn velocities(&self) -> ArrayView2<fun>;

    /// Returns the kinetic energy of each particle [J].
    fn energies(&self) -> ArrayView1<fun>;
}

/// Particle species with known charge and mass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleSpecies {
    Proton,
    Electron,
}

impl ParticleSpecies {
    /// Returns the charge of a particle of this species [C].
    pub fn charge(self) -> fun {
        match self {
            Self::Proton => Q_ELEMENTARY,
            Self::Electron => -Q_ELEMENTARY,
        }
    }

    /// Returns the mass of a particle of this species [kg].
    pub fn mass(self) -> fun {
        match self {
            Self::Proton => M_PROTON,
            Self::Electron => M_ELECTRON,
        }
    }
}

/// A beam of particles with given positions and velocities.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBeam {
    charges: Array1<fun>,
    masses: Array1<fun>,
    positions: Array2<fun>,
    velocities: Array2<fun>,
    energies: Array1<fun>,
}

impl ParticleBeam {
    /// Creates a new beam from per-particle charges, masses, positions and velocities.
    ///
    /// Positions and velocities must be N×3 arrays. The relativistic kinetic
    /// energy of each particle is computed from its mass and speed.
    pub fn new(
        charges: Quantity<ChargeUnit>,
        masses: Quantity<MassUnit>,
        positions: Quantity<LengthUnit>,
        velocities: Quantity<VelocityUnit>,
    ) -> io::Result<Self> {
        let charges = into_1d(charges.convert_to(contract::CHARGE), "charges")?;
        let masses = into_1d(masses.convert_to(contract::MASS), "masses")?;
        let positions = into_2d(positions.convert_to(contract::LENGTH), "positions")?;
        let velocities = into_2d(velocities.convert_to(contract::VELOCITY), "velocities")?;

        let number_of_particles = charges.len();
        if masses.len() != number_of_particles
            || positions.dim() != (number_of_particles, 3)
            || velocities.dim() != (number_of_particles, 3)
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Inconsistent particle array shapes: {} charges, {} masses, \
                     positions {:?} and velocities {:?} (expected {} and N×3)",
                    number_of_particles,
                    masses.len(),
                    positions.shape(),
                    velocities.shape(),
                    number_of_particles
                ),
            ));
        }

        let energies = compute_kinetic_energies(&masses, &velocities)?;

        Ok(Self {
            charges,
            masses,
            positions,
            velocities,
            energies,
        })
    }

    /// Creates a new beam of particles of the given species that all have
    /// the same kinetic energy and move along the given directions.
    ///
    /// Directions need not be normalized, but must be nonzero.
    pub fn monoenergetic(
        species: ParticleSpecies,
        kinetic_energy: fun,
        energy_unit: EnergyUnit,
        positions: Quantity<LengthUnit>,
        directions: Array2<fun>,
    ) -> io::Result<Self> {
        let kinetic_energy = Quantity::scalar(kinetic_energy, energy_unit)
            .convert_to(contract::ENERGY)
            .sum();
        if !(kinetic_energy >= 0.0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid kinetic energy {} J", kinetic_energy),
            ));
        }
        let rest_energy = species.mass() * CLIGHT * CLIGHT;
        let lorentz_factor = 1.0 + kinetic_energy / rest_energy;
        let speed = CLIGHT * (1.0 - 1.0 / (lorentz_factor * lorentz_factor)).sqrt();

        let mut velocities = directions;
        for (idx, mut direction) in velocities.rows_mut().into_iter().enumerate() {
            let length = direction.dot(&direction).sqrt();
            if length == 0.0 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Direction of particle {} is zero", idx),
                ));
            }
            direction *= speed / length;
        }
        let number_of_particles = velocities.nrows();

        Self::new(
            Quantity::new(
                Array1::from_elem(number_of_particles, species.charge()),
                ChargeUnit::Coulomb,
            ),
            Quantity::new(
                Array1::from_elem(number_of_particles, species.mass()),
                MassUnit::Kilogram,
            ),
            positions,
            Quantity::new(velocities, VelocityUnit::MeterPerSecond),
        )
    }
}

impl ParticleEnsemble for ParticleBeam {
    fn number_of_particles(&self) -> usize {
        self.charges.len()
    }

    fn charges(&self) -> ArrayView1<fun> {
        self.charges.view()
    }

    fn masses(&self) -> ArrayView1<fun> {
        self.masses.view()
    }

    fn positions(&self) -> ArrayView2<fun> {
        self.positions.view()
    }

    fn velocities(&self) -> ArrayView2<fun> {
        self.velocities.view()
    }

    fn energies(&self) -> ArrayView1<fun> {
        self.energies.view()
    }
}

/// Computes the relativistic kinetic energy (γ - 1)mc² of each particle.
fn compute_kinetic_energies(masses: &Array1<fun>, velocities: &Array2<fun>) -> io::Result<Array1<fun>> {
    let mut energies = Array1::zeros(masses.len());
    for (idx, (energy, (&mass, velocity))) in energies
        .iter_mut()
        .zip(masses.iter().zip(velocities.rows()))
        .enumerate()
    {
        let beta_squared = velocity.dot(&velocity) / (CLIGHT * CLIGHT);
        if !(beta_squared < 1.0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Speed of particle {} is not below the speed of light", idx),
            ));
        }
        let lorentz_factor = 1.0 / (1.0 - beta_squared).sqrt();
        // (γ - 1) = γ²β²/(γ + 1) avoids cancellation at low speeds
        *energy = mass * CLIGHT * CLIGHT * lorentz_factor * lorentz_factor * beta_squared
            / (lorentz_factor + 1.0);
    }
    Ok(energies)
}

fn into_1d(values: ArrayD<fun>, name: &str) -> io::Result<Array1<fun>> {
    let ndim = values.ndim();
    values.into_dimensionality::<Ix1>().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Particle {} must be 1D, but are {}D", name, ndim),
        )
    })
}

fn into_2d(values: ArrayD<fun>, name: &str) -> io::Result<Array2<fun>> {
    let ndim = values.ndim();
    values.into_dimensionality::<Ix2>().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Particle {} must be 2D, but are {}D", name, ndim),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MEV_TO_J;
    use approx::assert_relative_eq;

    #[test]
    fn beam_converts_to_si_units() {
        let beam = ParticleBeam::new(
            Quantity::from_vec(vec![1.0, -1.0], ChargeUnit::ElementaryCharge),
            Quantity::from_vec(vec![1.0, 2.0], MassUnit::Gram),
            Quantity::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], LengthUnit::Centimeter),
            Quantity::new(array![[1e2, 0.0, 0.0], [0.0, 0.0, -1e2]], VelocityUnit::CentimeterPerSecond),
        )
        .unwrap();

        assert_eq!(beam.number_of_particles(), 2);
        assert_relative_eq!(beam.charges()[1], -Q_ELEMENTARY);
        assert_relative_eq!(beam.masses()[1], 2e-3);
        assert_relative_eq!(beam.positions()[[1, 2]], 0.06);
        assert_relative_eq!(beam.velocities()[[1, 2]], -1.0);
    }

    #[test]
    fn slow_particles_have_classical_kinetic_energy() {
        let beam = ParticleBeam::new(
            Quantity::from_vec(vec![0.0, 0.0], ChargeUnit::Coulomb),
            Quantity::from_vec(vec![2.0, 1.0], MassUnit::Kilogram),
            Quantity::new(Array2::zeros((2, 3)), LengthUnit::Meter),
            Quantity::new(array![[3.0, 0.0, 4.0], [0.0, 0.0, 0.0]], VelocityUnit::MeterPerSecond),
        )
        .unwrap();

        assert_relative_eq!(beam.energies()[0], 0.5 * 2.0 * 25.0, max_relative = 1e-12);
        assert_eq!(beam.energies()[1], 0.0);
    }

    #[test]
    fn monoenergetic_beam_reproduces_its_energy() {
        let beam = ParticleBeam::monoenergetic(
            ParticleSpecies::Proton,
            14.7,
            EnergyUnit::MegaelectronVolt,
            Quantity::new(Array2::zeros((3, 3)), LengthUnit::Meter),
            array![[0.0, 0.0, 1.0], [0.0, 2.0, 2.0], [-1.0, 0.0, 0.0]],
        )
        .unwrap();

        for &energy in beam.energies() {
            assert_relative_eq!(energy, 14.7 * MEV_TO_J, max_relative = 1e-9);
        }
        let speeds: Vec<_> = beam
            .velocities()
            .rows()
            .into_iter()
            .map(|velocity| velocity.dot(&velocity).sqrt())
            .collect();
        assert_relative_eq!(speeds[0], speeds[1], max_relative = 1e-12);
        assert!(beam.velocities()[[1, 1]] > 0.0);
        assert_eq!(beam.velocities()[[2, 1]], 0.0);
    }

    #[test]
    fn invalid_beams_are_rejected() {
        let err = ParticleBeam::new(
            Quantity::from_vec(vec![1.0, 1.0], ChargeUnit::Coulomb),
            Quantity::from_vec(vec![1.0], MassUnit::Kilogram),
            Quantity::new(Array2::zeros((2, 3)), LengthUnit::Meter),
            Quantity::new(Array2::zeros((2, 3)), VelocityUnit::MeterPerSecond),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = ParticleBeam::new(
            Quantity::from_vec(vec![1.0], ChargeUnit::Coulomb),
            Quantity::from_vec(vec![1.0], MassUnit::Kilogram),
            Quantity::new(Array2::zeros((1, 3)), LengthUnit::Meter),
            Quantity::new(array![[CLIGHT, 0.0, 0.0]], VelocityUnit::MeterPerSecond),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = ParticleBeam::monoenergetic(
            ParticleSpecies::Electron,
            1.0,
            EnergyUnit::ElectronVolt,
            Quantity::new(Array2::zeros((1, 3)), LengthUnit::Meter),
            Array2::zeros((1, 3)),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
