//! Utilities for input/output.

use std::{
    fs,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};
use tempfile::Builder;

#[cfg(feature = "serialization")]
use serde::{de::DeserializeOwned, Serialize};

/// Writes a file at the given path by letting the given writer produce a
/// temporary file next to it, which then replaces any existing file.
///
/// The target is left untouched if writing fails.
pub fn write_atomically<P, W>(output_file_path: P, write: W) -> io::Result<()>
where
    P: AsRef<Path>,
    W: FnOnce(&Path) -> io::Result<()>,
{
    let output_file_path = output_file_path.as_ref();
    let output_dir = match output_file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let extension = output_file_path
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();
    let temporary_file = Builder::new()
        .prefix(".pradconv_")
        .suffix(&extension)
        .tempfile_in(output_dir)?;

    write(temporary_file.path())?;

    temporary_file
        .persist(output_file_path)
        .map_err(|err| err.error)?;
    Ok(())
}

/// Serializes the given data into JSON format and saves at the given path.
#[cfg(feature = "json")]
pub fn save_data_as_json<T: Serialize>(file_path: &Path, data: &T) -> io::Result<()> {
    let file = fs::File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, data)?;
    writer.flush()
}

/// Reads and deserializes JSON data from the file at the given path.
#[cfg(feature = "json")]
pub fn read_data_from_json<T: DeserializeOwned>(file_path: &Path) -> io::Result<T> {
    let file = fs::File::open(file_path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Serializes the given data into protocol 3 pickle format and saves at the given path.
#[cfg(feature = "pickle")]
pub fn save_data_as_pickle<T: Serialize>(file_path: &Path, data: &T) -> io::Result<()> {
    let file = fs::File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    pickle_result(serde_pickle::to_writer(
        &mut writer,
        data,
        serde_pickle::SerOptions::new(),
    ))?;
    writer.flush()
}

/// Reads and deserializes pickled data from the file at the given path.
#[cfg(feature = "pickle")]
pub fn read_data_from_pickle<T: DeserializeOwned>(file_path: &Path) -> io::Result<T> {
    let file = fs::File::open(file_path)?;
    pickle_result(serde_pickle::from_reader(
        BufReader::new(file),
        serde_pickle::DeOptions::new(),
    ))
}

#[cfg(feature = "pickle")]
fn pickle_result<T>(result: serde_pickle::Result<T>) -> io::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(serde_pickle::Error::Io(err)) => Err(err),
        Err(err) => Err(io::Error::new(io::ErrorKind::InvalidData, err.to_string())),
    }
}
