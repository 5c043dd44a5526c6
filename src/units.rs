//! Physical units and quantities carrying them.

pub mod contract;

use crate::constants::{
    AMU, CM_TO_M, ERG_TO_J, EV_TO_J, GAUSS_TO_T, G_TO_KG, MEV_TO_J, Q_ELEMENTARY,
    STATV_PER_CM_TO_V_PER_M,
};
use ndarray::prelude::*;
use std::fmt;

/// Floating-point precision to use for units.
#[allow(non_camel_case_types)]
pub type fun = f64;

/// The physical dimension measured by a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhysicalDimension {
    Length,
    Velocity,
    ElectricField,
    MagneticFluxDensity,
    Charge,
    Mass,
    Momentum,
    Energy,
}

impl fmt::Display for PhysicalDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Length => "length",
                Self::Velocity => "velocity",
                Self::ElectricField => "electric field",
                Self::MagneticFluxDensity => "magnetic flux density",
                Self::Charge => "charge",
                Self::Mass => "mass",
                Self::Momentum => "momentum",
                Self::Energy => "energy",
            }
        )
    }
}

/// Defines the properties of a unit for a single physical dimension.
pub trait Unit: Copy + PartialEq + fmt::Debug + fmt::Display {
    /// The physical dimension measured by the unit.
    const DIMENSION: PhysicalDimension;

    /// The SI unit for the dimension.
    const SI: Self;

    /// Returns the factor converting values in this unit into the SI unit.
    fn si_factor(self) -> fun;

    /// Returns the factor converting values in this unit into the given unit.
    fn conversion_factor_to(self, unit: Self) -> fun {
        if self == unit {
            1.0
        } else {
            self.si_factor() / unit.si_factor()
        }
    }
}

macro_rules! define_unit {
    (
        $(#[$attr:meta])*
        $name:ident: $dimension:ident, SI = $si:ident {
            $($(#[$variant_attr:meta])* $variant:ident => ($factor:expr, $symbol:expr)),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($(#[$variant_attr])* $variant),+
        }

        impl Unit for $name {
            const DIMENSION: PhysicalDimension = PhysicalDimension::$dimension;
            const SI: Self = Self::$si;

            fn si_factor(self) -> fun {
                match self {
                    $(Self::$variant => $factor),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}",
                    match self {
                        $(Self::$variant => $symbol),+
                    }
                )
            }
        }
    };
}

define_unit!(
    /// Units of length.
    LengthUnit: Length, SI = Meter {
        Meter => (1.0, "m"),
        Millimeter => (1e-3, "mm"),
        Centimeter => (CM_TO_M, "cm"),
        Kilometer => (1e3, "km"),
        Megameter => (1e6, "Mm"),
    }
);

define_unit!(
    /// Units of velocity.
    VelocityUnit: Velocity, SI = MeterPerSecond {
        MeterPerSecond => (1.0, "m / s"),
        CentimeterPerSecond => (CM_TO_M, "cm / s"),
        KilometerPerSecond => (1e3, "km / s"),
    }
);

define_unit!(
    /// Units of electric field strength.
    ElectricFieldUnit: ElectricField, SI = VoltPerMeter {
        VoltPerMeter => (1.0, "V / m"),
        MegavoltPerMeter => (1e6, "MV / m"),
        /// Gaussian unit of electric field strength.
        StatvoltPerCentimeter => (STATV_PER_CM_TO_V_PER_M, "statV / cm"),
    }
);

define_unit!(
    /// Units of magnetic flux density.
    MagneticFieldUnit: MagneticFluxDensity, SI = Tesla {
        Tesla => (1.0, "T"),
        Gauss => (GAUSS_TO_T, "G"),
    }
);

define_unit!(
    /// Units of electric charge.
    ChargeUnit: Charge, SI = Coulomb {
        Coulomb => (1.0, "C"),
        ElementaryCharge => (Q_ELEMENTARY, "e"),
    }
);

define_unit!(
    /// Units of mass.
    MassUnit: Mass, SI = Kilogram {
        Kilogram => (1.0, "kg"),
        Gram => (G_TO_KG, "g"),
        AtomicMassUnit => (AMU, "u"),
    }
);

define_unit!(
    /// Units of momentum.
    MomentumUnit: Momentum, SI = KilogramMeterPerSecond {
        KilogramMeterPerSecond => (1.0, "kg m / s"),
        GramCentimeterPerSecond => (G_TO_KG * CM_TO_M, "g cm / s"),
    }
);

define_unit!(
    /// Units of energy.
    EnergyUnit: Energy, SI = Joule {
        Joule => (1.0, "J"),
        ElectronVolt => (EV_TO_J, "eV"),
        MegaelectronVolt => (MEV_TO_J, "MeV"),
        Erg => (ERG_TO_J, "erg"),
    }
);

/// Scalar or array values tagged with a unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Quantity<U: Unit> {
    values: ArrayD<fun>,
    unit: U,
}

impl<U: Unit> Quantity<U> {
    /// Creates a new quantity from the given values in the given unit.
    pub fn new<D: Dimension>(values: Array<fun, D>, unit: U) -> Self {
        Self {
            values: values.into_dyn(),
            unit,
        }
    }

    /// Creates a new zero-dimensional quantity holding a single value.
    pub fn scalar(value: fun, unit: U) -> Self {
        Self::new(arr0(value), unit)
    }

    /// Creates a new one-dimensional quantity from the given values.
    pub fn from_vec(values: Vec<fun>, unit: U) -> Self {
        Self::new(Array1::from(values), unit)
    }

    /// Returns a reference to the values, expressed in the quantity's own unit.
    pub fn values(&self) -> &ArrayD<fun> {
        &self.values
    }

    /// Returns the unit of the values.
    pub fn unit(&self) -> U {
        self.unit
    }

    /// Returns the shape of the value array.
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Returns the number of dimensions of the value array.
    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// Whether the quantity holds a single zero-dimensional value.
    pub fn is_scalar(&self) -> bool {
        self.values.ndim() == 0
    }

    /// Returns the bare values converted into the given unit.
    pub fn convert_to(&self, unit: U) -> ArrayD<fun> {
        let factor = self.unit.conversion_factor_to(unit);
        if factor == 1.0 {
            self.values.clone()
        } else {
            self.values.mapv(|value| value * factor)
        }
    }

    /// Returns a copy of the quantity expressed in the given unit.
    pub fn to(&self, unit: U) -> Self {
        Self {
            values: self.convert_to(unit),
            unit,
        }
    }

    /// Returns the bare values converted into the SI unit.
    pub fn convert_to_si(&self) -> ArrayD<fun> {
        self.convert_to(U::SI)
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(&value) = self.values.first().filter(|_| self.is_scalar()) {
            write!(f, "{} {}", value, self.unit)
        } else {
            write!(f, "{:?} array [{}]", self.values.shape(), self.unit)
        }
    }
}
