//! Units that values in prad records are expressed in.
//!
//! Records store bare values, so every attribute has a fixed unit that
//! producers convert into and consumers assume.

use super::{
    ChargeUnit, ElectricFieldUnit, EnergyUnit, LengthUnit, MagneticFieldUnit, MassUnit,
    MomentumUnit, PhysicalDimension, Unit, VelocityUnit,
};
use lazy_static::lazy_static;
use std::{collections::HashMap, fmt};

/// Unit for coordinates and particle positions [m].
pub const LENGTH: LengthUnit = LengthUnit::Meter;
/// Unit for particle velocities [m/s].
pub const VELOCITY: VelocityUnit = VelocityUnit::MeterPerSecond;
/// Unit for electric field components [V/m].
pub const ELECTRIC_FIELD: ElectricFieldUnit = ElectricFieldUnit::VoltPerMeter;
/// Unit for magnetic field components [T].
pub const MAGNETIC_FIELD: MagneticFieldUnit = MagneticFieldUnit::Tesla;
/// Unit for particle charges [C].
pub const CHARGE: ChargeUnit = ChargeUnit::Coulomb;
/// Unit for particle masses [kg].
pub const MASS: MassUnit = MassUnit::Kilogram;
/// Unit for particle momenta [kg m/s].
pub const MOMENTUM: MomentumUnit = MomentumUnit::KilogramMeterPerSecond;
/// Unit declared for particle energies [J].
///
/// Energies are passed through from the producing simulation and never
/// checked against this unit.
pub const ENERGY: EnergyUnit = EnergyUnit::Joule;

/// The unit of a single record attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeUnit {
    Length(LengthUnit),
    ElectricField(ElectricFieldUnit),
    MagneticField(MagneticFieldUnit),
    Charge(ChargeUnit),
    Mass(MassUnit),
    Momentum(MomentumUnit),
    Energy(EnergyUnit),
}

impl AttributeUnit {
    /// Returns the physical dimension measured by the attribute.
    pub fn dimension(&self) -> PhysicalDimension {
        match self {
            Self::Length(_) => LengthUnit::DIMENSION,
            Self::ElectricField(_) => ElectricFieldUnit::DIMENSION,
            Self::MagneticField(_) => MagneticFieldUnit::DIMENSION,
            Self::Charge(_) => ChargeUnit::DIMENSION,
            Self::Mass(_) => MassUnit::DIMENSION,
            Self::Momentum(_) => MomentumUnit::DIMENSION,
            Self::Energy(_) => EnergyUnit::DIMENSION,
        }
    }
}

impl fmt::Display for AttributeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(unit) => fmt::Display::fmt(unit, f),
            Self::ElectricField(unit) => fmt::Display::fmt(unit, f),
            Self::MagneticField(unit) => fmt::Display::fmt(unit, f),
            Self::Charge(unit) => fmt::Display::fmt(unit, f),
            Self::Mass(unit) => fmt::Display::fmt(unit, f),
            Self::Momentum(unit) => fmt::Display::fmt(unit, f),
            Self::Energy(unit) => fmt::Display::fmt(unit, f),
        }
    }
}

lazy_static! {
    static ref ATTRIBUTE_UNITS: HashMap<&'static str, AttributeUnit> = {
        use AttributeUnit::*;
        [
            ("X", Length(LENGTH)),
            ("Y", Length(LENGTH)),
            ("Z", Length(LENGTH)),
            ("Ex", ElectricField(ELECTRIC_FIELD)),
            ("Ey", ElectricField(ELECTRIC_FIELD)),
            ("Ez", ElectricField(ELECTRIC_FIELD)),
            ("Bx", MagneticField(MAGNETIC_FIELD)),
            ("By", MagneticField(MAGNETIC_FIELD)),
            ("Bz", MagneticField(MAGNETIC_FIELD)),
            ("charge", Charge(CHARGE)),
            ("mass", Mass(MASS)),
            ("x", Length(LENGTH)),
            ("y", Length(LENGTH)),
            ("z", Length(LENGTH)),
            ("px", Momentum(MOMENTUM)),
            ("py", Momentum(MOMENTUM)),
            ("pz", Momentum(MOMENTUM)),
            ("energy", Energy(ENERGY)),
        ]
        .into_iter()
        .collect()
    };
}

/// Returns the unit of the record attribute with the given name,
/// or `None` if the attribute is not part of any record.
pub fn attribute_unit(attribute_name: &str) -> Option<AttributeUnit> {
    ATTRIBUTE_UNITS.get(attribute_name).copied()
}
