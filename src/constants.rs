//! Physical constants and unit conversion factors in SI units.

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Physical constants

/// Speed of light in vacuum [m/s].
pub const CLIGHT: fcn = 2.997_924_58e8;
/// Elementary charge [C].
pub const Q_ELEMENTARY: fcn = 1.602_176_634e-19;
/// Proton mass [kg].
pub const M_PROTON: fcn = 1.672_621_923_69e-27;
/// Electron mass [kg].
pub const M_ELECTRON: fcn = 9.109_383_701_5e-31;
/// Atomic mass unit [kg].
pub const AMU: fcn = 1.660_539_066_60e-27;

// Unit conversion factors

/// Conversion factor from electron volts to Joules.
pub const EV_TO_J: fcn = Q_ELEMENTARY;
/// Conversion factor from mega electron volts to Joules.
pub const MEV_TO_J: fcn = EV_TO_J * 1e6;
/// Conversion factor from ergs to Joules.
pub const ERG_TO_J: fcn = 1e-7;
/// Conversion factor from centimeters to meters.
pub const CM_TO_M: fcn = 1e-2;
/// Conversion factor from grams to kilograms.
pub const G_TO_KG: fcn = 1e-3;
/// Conversion factor from gauss to tesla.
pub const GAUSS_TO_T: fcn = 1e-4;
/// Conversion factor from statvolts per centimeter to volts per meter.
pub const STATV_PER_CM_TO_V_PER_M: fcn = CLIGHT * 1e-4;
