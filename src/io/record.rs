//! Saving and loading of prad records.

use super::{utils, Verbose};
use crate::record::PradObject;
use std::{fmt, io, path::Path};

/// File formats that records can be stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordFormat {
    #[cfg(feature = "json")]
    Json,
    #[cfg(feature = "pickle")]
    Pickle,
    #[cfg(feature = "hdf5")]
    Hdf5,
}

impl RecordFormat {
    /// Determines the record format from the extension of the given path.
    pub fn from_path<P: AsRef<Path>>(file_path: P) -> io::Result<Self> {
        let file_path = file_path.as_ref();
        let extension = file_path.extension().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Missing extension for record file {}\n\
                     Valid extensions are: {}",
                    file_path.display(),
                    Self::valid_extensions_string()
                ),
            )
        })?;
        Self::from_extension(extension.to_string_lossy().as_ref())
    }

    /// Determines the record format from the given file extension.
    pub fn from_extension(extension: &str) -> io::Result<Self> {
        match extension {
            "json" => {
                #[cfg(feature = "json")]
                {
                    Ok(Self::Json)
                }
                #[cfg(not(feature = "json"))]
                Err(missing_feature_error("json", extension))
            }
            "pickle" => {
                #[cfg(feature = "pickle")]
                {
                    Ok(Self::Pickle)
                }
                #[cfg(not(feature = "pickle"))]
                Err(missing_feature_error("pickle", extension))
            }
            "h5" | "hdf5" => {
                #[cfg(feature = "hdf5")]
                {
                    Ok(Self::Hdf5)
                }
                #[cfg(not(feature = "hdf5"))]
                Err(missing_feature_error("hdf5", extension))
            }
            invalid => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Invalid extension {} for record file\n\
                     Valid extensions are: {}",
                    invalid,
                    Self::valid_extensions_string()
                ),
            )),
        }
    }

    /// Returns a comma-separated list of the extensions supported with the
    /// compiled features.
    pub fn valid_extensions_string() -> String {
        let mut extensions = Vec::new();
        if cfg!(feature = "json") {
            extensions.push("json");
        }
        if cfg!(feature = "pickle") {
            extensions.push("pickle");
        }
        if cfg!(feature = "hdf5") {
            extensions.push("h5");
            extensions.push("hdf5");
        }
        if extensions.is_empty() {
            "none".to_string()
        } else {
            extensions.join(", ")
        }
    }

    /// Whether NaN and infinite values can be stored in the format.
    #[allow(unreachable_code)]
    pub fn stores_nonfinite_values(self) -> bool {
        match self {
            #[cfg(feature = "json")]
            Self::Json => false,
            #[cfg(feature = "pickle")]
            Self::Pickle => true,
            #[cfg(feature = "hdf5")]
            Self::Hdf5 => true,
        }
    }
}

impl fmt::Display for RecordFormat {
    #[allow(unreachable_code, unused_variables)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                #[cfg(feature = "json")]
                Self::Json => "JSON",
                #[cfg(feature = "pickle")]
                Self::Pickle => "pickle",
                #[cfg(feature = "hdf5")]
                Self::Hdf5 => "HDF5",
            }
        )
    }
}

/// Saves the given record at the given path, in the format implied by the
/// path's extension.
///
/// The record is first written to a temporary file in the same directory,
/// which then replaces any existing file at the path.
///
/// JSON has no representation for NaN or infinite numbers, so saving such
/// values as JSON fails with `InvalidInput` and leaves the path untouched.
#[allow(unreachable_code, unused_variables)]
pub fn save_record<P: AsRef<Path>>(
    object: &PradObject,
    output_file_path: P,
    verbose: Verbose,
) -> io::Result<()> {
    let output_file_path = output_file_path.as_ref();
    let format = RecordFormat::from_path(output_file_path)?;

    if !format.stores_nonfinite_values() {
        verify_finite(object, format)?;
    }

    if verbose.is_yes() {
        println!(
            "Writing {} to {}",
            object.description_of_kind(),
            output_file_path.display()
        );
    }
    utils::write_atomically(output_file_path, |temporary_file_path| match format {
        #[cfg(feature = "json")]
        RecordFormat::Json => utils::save_data_as_json(temporary_file_path, object),
        #[cfg(feature = "pickle")]
        RecordFormat::Pickle => utils::save_data_as_pickle(temporary_file_path, object),
        #[cfg(feature = "hdf5")]
        RecordFormat::Hdf5 => super::hdf5::write_record(temporary_file_path, object),
    })
}

/// Loads the record stored at the given path, in the format implied by the
/// path's extension.
///
/// Fails with `NotFound` if the file does not exist and with `InvalidData`
/// if its content is not a valid record.
#[allow(unreachable_code, unused_variables)]
pub fn load_record<P: AsRef<Path>>(input_file_path: P, verbose: Verbose) -> io::Result<PradObject> {
    let input_file_path = input_file_path.as_ref();
    let format = RecordFormat::from_path(input_file_path)?;

    if verbose.is_yes() {
        println!("Reading {} file {}", format, input_file_path.display());
    }
    let object: PradObject = match format {
        #[cfg(feature = "json")]
        RecordFormat::Json => utils::read_data_from_json(input_file_path)?,
        #[cfg(feature = "pickle")]
        RecordFormat::Pickle => utils::read_data_from_pickle(input_file_path)?,
        #[cfg(feature = "hdf5")]
        RecordFormat::Hdf5 => super::hdf5::read_record(input_file_path)?,
    };
    object.verify()?;

    if verbose.is_yes() {
        println!("Read {}", object.description_of_kind());
    }
    Ok(object)
}

fn verify_finite(object: &PradObject, format: RecordFormat) -> io::Result<()> {
    match object.first_nonfinite_attribute() {
        Some(name) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Attribute {} of {} record has non-finite values, which cannot be stored as {}",
                name,
                object.description_of_kind(),
                format
            ),
        )),
        None => Ok(()),
    }
}

#[allow(dead_code)]
fn missing_feature_error(feature: &str, extension: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!(
            "Compile with {} feature in order to use {} files\n\
             Tip: Use cargo flag --features={}",
            feature, extension, feature
        ),
    )
}
