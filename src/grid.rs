//! Grids carrying coordinates and electromagnetic field quantities.

pub mod cartesian;

use crate::{
    field::FieldKind,
    geometry::In3D,
    units::{contract, fun, ElectricFieldUnit, LengthUnit, MagneticFieldUnit, Quantity},
};
use ndarray::prelude::*;

/// A field quantity stored on a grid.
#[derive(Clone, Debug, PartialEq)]
pub enum GridQuantity {
    ElectricField(Quantity<ElectricFieldUnit>),
    MagneticField(Quantity<MagneticFieldUnit>),
}

impl GridQuantity {
    /// Returns the kind of field the quantity represents.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::ElectricField(_) => FieldKind::Electric,
            Self::MagneticField(_) => FieldKind::Magnetic,
        }
    }

    /// Returns the shape of the quantity's value array.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::ElectricField(quantity) => quantity.shape(),
            Self::MagneticField(quantity) => quantity.shape(),
        }
    }

    /// Returns the bare values expressed in the record unit for the field kind
    /// (V/m for electric and T for magnetic fields).
    pub fn convert_to_record_unit(&self) -> ArrayD<fun> {
        match self {
            Self::ElectricField(quantity) => quantity.convert_to(contract::ELECTRIC_FIELD),
            Self::MagneticField(quantity) => quantity.convert_to(contract::MAGNETIC_FIELD),
        }
    }

    /// Returns a string with the unit of the quantity.
    pub fn unit_symbol(&self) -> String {
        match self {
            Self::ElectricField(quantity) => quantity.unit().to_string(),
            Self::MagneticField(quantity) => quantity.unit().to_string(),
        }
    }
}

impl From<Quantity<ElectricFieldUnit>> for GridQuantity {
    fn from(quantity: Quantity<ElectricFieldUnit>) -> Self {
        Self::ElectricField(quantity)
    }
}

impl From<Quantity<MagneticFieldUnit>> for GridQuantity {
    fn from(quantity: Quantity<MagneticFieldUnit>) -> Self {
        Self::MagneticField(quantity)
    }
}

/// Defines the properties of a 3D grid holding named field quantities.
pub trait FieldGrid3 {
    /// Returns the 3D shape of the grid.
    fn shape(&self) -> &In3D<usize>;

    /// Returns the coordinate arrays of the grid points, each with the shape of the grid.
    fn coords(&self) -> &In3D<Quantity<LengthUnit>>;

    /// Returns the quantity with the given key, or `None` if it is not set.
    fn quantity(&self, key: &str) -> Option<&GridQuantity>;

    /// Returns the keys of all quantities set on the grid.
    fn quantity_keys(&self) -> Vec<&str>;

    /// Whether a quantity with the given key is set on the grid.
    fn has_quantity(&self, key: &str) -> bool {
        self.quantity(key).is_some()
    }

    /// Returns the shape of the grid as a dynamic-dimensional array shape.
    fn array_shape(&self) -> IxDyn {
        let (nx, ny, nz) = self.shape().to_tuple();
        IxDyn(&[nx, ny, nz])
    }
}
