//! The `pradconv` crate converts between Cartesian field grids, particle
//! ensembles and the portable prad record format used for proton radiography.
pub mod constants;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod mapping;
pub mod particles;
pub mod record;
pub mod units;

/// Converts the error of the given `Result` into an `io::Error` of kind
/// `ErrorKind::Other`, keeping only the error message.
#[macro_export]
macro_rules! io_result {
    ($result:expr) => {
        $result.map_err(|err| ::std::io::Error::new(::std::io::ErrorKind::Other, err.to_string()))
    };
}
