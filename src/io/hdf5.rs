//! Reading and writing prad records as HDF5 files.
//!
//! Every record attribute is stored as a dataset at the file root, tagged
//! with a `unit` attribute. Uniform values are stored as scalar datasets.
//! The root group carries the record type and the optional label and
//! description as string attributes.
//!
//! The file itself is opened through the standard library first, so failures
//! to reach it keep their OS error kind (`NotFound`, `PermissionDenied`, ...).
//! Errors raised by the HDF5 library afterwards carry no kind and are reported
//! as `ErrorKind::Other`, while malformed content is `InvalidData`.

use crate::{
    field::FieldComponent,
    geometry::{Dim3, In3D},
    io_result,
    record::{
        fdt, fields::SimpleFields, particles::ParticlesList, Annotated, PradObject, PradType,
        Values,
    },
    units::contract,
};
use hdf5_rs::{types::VarLenUnicode, File, Location};
use ndarray::prelude::*;
use std::{fs, io, path::Path, str::FromStr};

const PRAD_TYPE_ATTRIBUTE: &str = "prad_type";
const FIELDS_TYPE_ATTRIBUTE: &str = "fields_type";
const PARTICLES_TYPE_ATTRIBUTE: &str = "particles_type";
const LABEL_ATTRIBUTE: &str = "label";
const DESCRIPTION_ATTRIBUTE: &str = "description";
const UNIT_ATTRIBUTE: &str = "unit";

const SIMPLE_FIELDS_TYPE: &str = "simple";
const PARTICLES_LIST_TYPE: &str = "list";

const POSITION_NAMES: [&str; 3] = ["x", "y", "z"];
const MOMENTUM_NAMES: [&str; 3] = ["px", "py", "pz"];

/// Writes the given record to a new HDF5 file at the given path.
pub fn write_record(file_path: &Path, object: &PradObject) -> io::Result<()> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)?;

    let file = io_result!(File::create(file_path))?;
    write_string_attribute(&file, PRAD_TYPE_ATTRIBUTE, object.prad_type().name())?;
    match object {
        PradObject::Fields(fields) => write_simple_fields(&file, fields)?,
        PradObject::Particles(particles) => write_particles_list(&file, particles)?,
    }
    if let Some(label) = object.label() {
        write_string_attribute(&file, LABEL_ATTRIBUTE, label)?;
    }
    if let Some(description) = object.description() {
        write_string_attribute(&file, DESCRIPTION_ATTRIBUTE, description)?;
    }
    io_result!(file.close())
}

/// Reads the record stored in the HDF5 file at the given path.
pub fn read_record(file_path: &Path) -> io::Result<PradObject> {
    fs::File::open(file_path)?;

    let file = io_result!(File::open(file_path))?;
    let prad_type_name = read_string_attribute(&file, PRAD_TYPE_ATTRIBUTE)?
        .ok_or_else(|| missing_error("record type attribute", PRAD_TYPE_ATTRIBUTE))?;

    let mut object = match PradType::from_name(&prad_type_name) {
        Some(PradType::Fields) => {
            verify_subtype(&file, FIELDS_TYPE_ATTRIBUTE, SIMPLE_FIELDS_TYPE)?;
            PradObject::from(read_simple_fields(&file)?)
        }
        Some(PradType::Particles) => {
            verify_subtype(&file, PARTICLES_TYPE_ATTRIBUTE, PARTICLES_LIST_TYPE)?;
            PradObject::from(read_particles_list(&file)?)
        }
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported record type {}", prad_type_name),
            ))
        }
    };
    if let Some(label) = read_string_attribute(&file, LABEL_ATTRIBUTE)? {
        object.set_label(label);
    }
    if let Some(description) = read_string_attribute(&file, DESCRIPTION_ATTRIBUTE)? {
        object.set_description(description);
    }
    Ok(object)
}

fn write_simple_fields(file: &File, fields: &SimpleFields) -> io::Result<()> {
    write_string_attribute(file, FIELDS_TYPE_ATTRIBUTE, SIMPLE_FIELDS_TYPE)?;
    for dim in Dim3::slice() {
        write_array(file, coord_name(dim), fields.coords(dim).view())?;
    }
    for component in FieldComponent::slice() {
        write_values(file, component.record_name(), fields.component(component))?;
    }
    Ok(())
}

fn write_particles_list(file: &File, particles: &ParticlesList) -> io::Result<()> {
    write_string_attribute(file, PARTICLES_TYPE_ATTRIBUTE, PARTICLES_LIST_TYPE)?;
    write_array(file, "charge", particles.charge().view().into_dyn())?;
    write_array(file, "mass", particles.mass().view().into_dyn())?;
    for dim in Dim3::slice() {
        write_array(
            file,
            POSITION_NAMES[dim.num()],
            particles.position(dim).view().into_dyn(),
        )?;
        write_array(
            file,
            MOMENTUM_NAMES[dim.num()],
            particles.momentum(dim).view().into_dyn(),
        )?;
    }
    write_values(file, "energy", particles.energy())
}

fn read_simple_fields(file: &File) -> io::Result<SimpleFields> {
    let mut fields = SimpleFields::new(
        read_array(file, coord_name(Dim3::X))?,
        read_array(file, coord_name(Dim3::Y))?,
        read_array(file, coord_name(Dim3::Z))?,
    );
    for component in FieldComponent::slice() {
        fields.set_component(component, read_values(file, component.record_name())?);
    }
    Ok(fields)
}

fn read_particles_list(file: &File) -> io::Result<ParticlesList> {
    let positions = In3D::new(
        read_array_1d(file, POSITION_NAMES[0])?,
        read_array_1d(file, POSITION_NAMES[1])?,
        read_array_1d(file, POSITION_NAMES[2])?,
    );
    let momenta = In3D::new(
        read_array_1d(file, MOMENTUM_NAMES[0])?,
        read_array_1d(file, MOMENTUM_NAMES[1])?,
        read_array_1d(file, MOMENTUM_NAMES[2])?,
    );
    ParticlesList::new(
        read_array_1d(file, "charge")?,
        read_array_1d(file, "mass")?,
        positions,
        momenta,
        read_values(file, "energy")?,
    )
}

fn coord_name(dim: Dim3) -> &'static str {
    ["X", "Y", "Z"][dim.num()]
}

fn write_values(file: &File, name: &str, values: &Values) -> io::Result<()> {
    match values {
        Values::Uniform(value) => write_array(file, name, arr0(*value).into_dyn().view()),
        Values::Array(array) => write_array(file, name, array.view()),
    }
}

fn write_array(file: &File, name: &str, array: ArrayViewD<fdt>) -> io::Result<()> {
    let dataset = io_result!(file.new_dataset_builder().with_data(array).create(name))?;
    if let Some(unit) = contract::attribute_unit(name) {
        write_string_attribute(&dataset, UNIT_ATTRIBUTE, &unit.to_string())?;
    }
    Ok(())
}

fn read_values(file: &File, name: &str) -> io::Result<Values> {
    let array = read_array(file, name)?;
    Ok(if array.ndim() == 0 {
        Values::Uniform(array.first().copied().unwrap_or_default())
    } else {
        Values::Array(array)
    })
}

fn read_array(file: &File, name: &str) -> io::Result<ArrayD<fdt>> {
    let dataset = file
        .dataset(name)
        .map_err(|_| missing_error("dataset", name))?;
    io_result!(dataset.read_dyn::<fdt>())
}

fn read_array_1d(file: &File, name: &str) -> io::Result<Array1<fdt>> {
    read_array(file, name)?
        .into_dimensionality::<Ix1>()
        .map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Dataset {} is not 1D: {}", name, err),
            )
        })
}

fn write_string_attribute(location: &Location, name: &str, value: &str) -> io::Result<()> {
    let value = VarLenUnicode::from_str(value).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid string for attribute {}: {}", name, err),
        )
    })?;
    let attribute = io_result!(location.new_attr::<VarLenUnicode>().shape(()).create(name))?;
    io_result!(attribute.write_scalar(&value))
}

fn read_string_attribute(location: &Location, name: &str) -> io::Result<Option<String>> {
    if !io_result!(location.attr_names())?
        .iter()
        .any(|attribute_name| attribute_name == name)
    {
        return Ok(None);
    }
    let attribute = io_result!(location.attr(name))?;
    let value = io_result!(attribute.read_scalar::<VarLenUnicode>())?;
    Ok(Some(value.as_str().to_string()))
}

fn verify_subtype(file: &File, attribute: &str, expected: &str) -> io::Result<()> {
    match read_string_attribute(file, attribute)? {
        Some(subtype) if subtype == expected => Ok(()),
        Some(subtype) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Unsupported {} {}, expected {}", attribute, subtype, expected),
        )),
        None => Err(missing_error("attribute", attribute)),
    }
}

fn missing_error(what: &str, name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Missing {} {} in HDF5 record", what, name),
    )
}
