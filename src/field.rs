//! Canonical electromagnetic field components.

use crate::geometry::Dim3::{self, X, Y, Z};
use std::fmt;

/// Whether a field component belongs to the electric or the magnetic field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Electric,
    Magnetic,
}

/// One of the six field components exchanged between grids and records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldComponent {
    Ex,
    Ey,
    Ez,
    Bx,
    By,
    Bz,
}

impl FieldComponent {
    /// Creates an array for iterating over all six components.
    pub fn slice() -> [Self; 6] {
        [Self::Ex, Self::Ey, Self::Ez, Self::Bx, Self::By, Self::Bz]
    }

    /// Returns the component of the given field kind along the given dimension.
    pub fn new(kind: FieldKind, dim: Dim3) -> Self {
        match (kind, dim) {
            (FieldKind::Electric, X) => Self::Ex,
            (FieldKind::Electric, Y) => Self::Ey,
            (FieldKind::Electric, Z) => Self::Ez,
            (FieldKind::Magnetic, X) => Self::Bx,
            (FieldKind::Magnetic, Y) => Self::By,
            (FieldKind::Magnetic, Z) => Self::Bz,
        }
    }

    /// Whether the component belongs to the electric or the magnetic field.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Ex | Self::Ey | Self::Ez => FieldKind::Electric,
            Self::Bx | Self::By | Self::Bz => FieldKind::Magnetic,
        }
    }

    /// Returns the dimension the component points along.
    pub fn dim(self) -> Dim3 {
        match self {
            Self::Ex | Self::Bx => X,
            Self::Ey | Self::By => Y,
            Self::Ez | Self::Bz => Z,
        }
    }

    /// Returns the attribute name of the component in a simple fields record.
    pub fn record_name(self) -> &'static str {
        match self {
            Self::Ex => "Ex",
            Self::Ey => "Ey",
            Self::Ez => "Ez",
            Self::Bx => "Bx",
            Self::By => "By",
            Self::Bz => "Bz",
        }
    }

    /// Returns the key of the component's quantity on a grid.
    pub fn grid_key(self) -> &'static str {
        match self {
            Self::Ex => "E_x",
            Self::Ey => "E_y",
            Self::Ez => "E_z",
            Self::Bx => "B_x",
            Self::By => "B_y",
            Self::Bz => "B_z",
        }
    }

    /// Returns the component with the given grid quantity key, if any.
    pub fn from_grid_key(key: &str) -> Option<Self> {
        Self::slice()
            .into_iter()
            .find(|component| component.grid_key() == key)
    }
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.record_name())
    }
}
