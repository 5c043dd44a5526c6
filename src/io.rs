//! File input/output.

pub mod record;
pub mod utils;

#[cfg(feature = "hdf5")]
pub mod hdf5;

/// Whether or not to print non-critical status messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbose {
    Yes,
    No,
}

impl Verbose {
    pub fn is_yes(&self) -> bool {
        match self {
            Verbose::Yes => true,
            Verbose::No => false,
        }
    }
}
