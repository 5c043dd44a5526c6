//! Portable prad records of fields and particles.

pub mod fields;
pub mod particles;

use fields::SimpleFields;
use ndarray::prelude::*;
use particles::ParticlesList;
use std::{fmt, io};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for record data.
#[allow(non_camel_case_types)]
pub type fdt = f64;

/// Record values that are either a single uniform value or an array.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(Serialize, Deserialize),
    serde(untagged)
)]
pub enum Values {
    Uniform(fdt),
    Array(ArrayD<fdt>),
}

impl Values {
    /// Creates uniform values of zero.
    pub fn zero() -> Self {
        Self::Uniform(0.0)
    }

    /// Whether the values are a single uniform value.
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform(_))
    }

    /// Returns the uniform value, or `None` if the values are an array.
    pub fn uniform_value(&self) -> Option<fdt> {
        match self {
            Self::Uniform(value) => Some(*value),
            Self::Array(_) => None,
        }
    }

    /// Returns a reference to the value array, or `None` if the values are uniform.
    pub fn array(&self) -> Option<&ArrayD<fdt>> {
        match self {
            Self::Uniform(_) => None,
            Self::Array(array) => Some(array),
        }
    }

    /// Whether every value is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Uniform(value) => value.is_finite(),
            Self::Array(array) => array.iter().all(|value| value.is_finite()),
        }
    }
}

impl Default for Values {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<fdt> for Values {
    fn from(value: fdt) -> Self {
        Self::Uniform(value)
    }
}

impl<D: Dimension> From<Array<fdt, D>> for Values {
    fn from(array: Array<fdt, D>) -> Self {
        Self::Array(array.into_dyn())
    }
}

/// Defines a record carrying an optional label and description.
pub trait Annotated {
    /// Returns the label of the record, if set.
    fn label(&self) -> Option<&str>;

    /// Returns the description of the record, if set.
    fn description(&self) -> Option<&str>;

    /// Sets the label of the record.
    fn set_label(&mut self, label: String);

    /// Sets the description of the record.
    fn set_description(&mut self, description: String);
}

/// The type of data held by a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PradType {
    Fields,
    Particles,
}

impl PradType {
    /// Returns the name of the type as stored in record files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Particles => "particles",
        }
    }

    /// Returns the type with the given stored name, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fields" => Some(Self::Fields),
            "particles" => Some(Self::Particles),
            _ => None,
        }
    }
}

impl fmt::Display for PradType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Any record that can be stored in a prad file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(Serialize, Deserialize),
    serde(tag = "prad_type", rename_all = "snake_case")
)]
pub enum PradObject {
    Fields(SimpleFields),
    Particles(ParticlesList),
}

impl PradObject {
    /// Returns the type of the record.
    pub fn prad_type(&self) -> PradType {
        match self {
            Self::Fields(_) => PradType::Fields,
            Self::Particles(_) => PradType::Particles,
        }
    }

    /// Returns a human-readable name for the kind of record.
    pub fn description_of_kind(&self) -> &'static str {
        match self {
            Self::Fields(_) => "simple fields",
            Self::Particles(_) => "particles list",
        }
    }

    /// Checks the internal consistency of the held record.
    ///
    /// Simple fields are only checked against a grid when imported.
    pub fn verify(&self) -> io::Result<()> {
        match self {
            Self::Fields(_) => Ok(()),
            Self::Particles(particles) => particles.verify(),
        }
    }

    /// Returns the name of the first attribute holding a NaN or infinite
    /// value, or `None` if all values are finite.
    pub fn first_nonfinite_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Fields(fields) => fields.first_nonfinite_attribute(),
            Self::Particles(particles) => particles.first_nonfinite_attribute(),
        }
    }

    /// Consumes the object and returns the simple fields record it holds.
    ///
    /// Fails with `InvalidData` if the object holds another kind of record.
    pub fn into_simple_fields(self) -> io::Result<SimpleFields> {
        match self {
            Self::Fields(fields) => Ok(fields),
            other => Err(wrong_kind_error("simple fields", &other)),
        }
    }

    /// Consumes the object and returns the particles list record it holds.
    ///
    /// Fails with `InvalidData` if the object holds another kind of record.
    pub fn into_particles_list(self) -> io::Result<ParticlesList> {
        match self {
            Self::Particles(particles) => Ok(particles),
            other => Err(wrong_kind_error("particles list", &other)),
        }
    }
}

impl Annotated for PradObject {
    fn label(&self) -> Option<&str> {
        match self {
            Self::Fields(fields) => fields.label(),
            Self::Particles(particles) => particles.label(),
        }
    }

    fn description(&self) -> Option<&str> {
        match self {
            Self::Fields(fields) => fields.description(),
            Self::Particles(particles) => particles.description(),
        }
    }

    fn set_label(&mut self, label: String) {
        match self {
            Self::Fields(fields) => fields.set_label(label),
            Self::Particles(particles) => particles.set_label(label),
        }
    }

    fn set_description(&mut self, description: String) {
        match self {
            Self::Fields(fields) => fields.set_description(description),
            Self::Particles(particles) => particles.set_description(description),
        }
    }
}

impl From<SimpleFields> for PradObject {
    fn from(fields: SimpleFields) -> Self {
        Self::Fields(fields)
    }
}

impl From<ParticlesList> for PradObject {
    fn from(particles: ParticlesList) -> Self {
        Self::Particles(particles)
    }
}

fn wrong_kind_error(expected: &str, object: &PradObject) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
            "Expected a {} record, but got a {} record",
            expected,
            object.description_of_kind()
        ),
    )
}
