//! Conversion between field grids and simple fields records.

use super::Annotation;
use crate::{
    field::{FieldComponent, FieldKind},
    geometry::{
        Dim3::{X, Y, Z},
        In3D,
    },
    grid::{cartesian::CartesianGrid3, FieldGrid3, GridQuantity},
    io::{record as record_io, Verbose},
    record::{fields::SimpleFields, PradObject, Values},
    units::{contract, fun, Quantity},
};
use ndarray::prelude::*;
use std::{io, path::Path};

/// Creates a simple fields record from the coordinates and field quantities
/// of the given grid.
///
/// Field components that are not set on the grid get the uniform value zero
/// rather than an array of zeros.
pub fn grid_to_simple_fields<G: FieldGrid3>(grid: &G, annotation: &Annotation) -> SimpleFields {
    let coords = grid.coords();
    let mut fields = SimpleFields::new(
        coords[X].convert_to(contract::LENGTH),
        coords[Y].convert_to(contract::LENGTH),
        coords[Z].convert_to(contract::LENGTH),
    );
    for component in FieldComponent::slice() {
        let values = match grid.quantity(component.grid_key()) {
            Some(quantity) => Values::Array(quantity.convert_to_record_unit()),
            None => Values::zero(),
        };
        fields.set_component(component, values);
    }
    annotation.apply_to(&mut fields);
    fields
}

/// Creates a Cartesian grid from the coordinates and field components of
/// the given record.
///
/// All six field components are set on the grid. Each is multiplied into an
/// array of ones with the grid shape, so uniform values are repeated across
/// the grid and arrays are broadcast to the grid shape.
pub fn simple_fields_to_grid(fields: &SimpleFields) -> io::Result<CartesianGrid3> {
    let coords = In3D::with_each_component(|dim| {
        Quantity::new(fields.coords(dim).clone(), contract::LENGTH)
    });
    let mut grid = CartesianGrid3::from_coordinate_arrays(coords)?;

    let ones = grid.ones();
    let promoted = FieldComponent::slice()
        .into_iter()
        .map(|component| {
            promote_to_grid_shape(&ones, fields.component(component), component)
                .map(|values| (component, values))
        })
        .collect::<io::Result<Vec<_>>>()?;

    for (component, values) in promoted {
        let quantity = match component.kind() {
            FieldKind::Electric => {
                GridQuantity::from(Quantity::new(values, contract::ELECTRIC_FIELD))
            }
            FieldKind::Magnetic => {
                GridQuantity::from(Quantity::new(values, contract::MAGNETIC_FIELD))
            }
        };
        grid.add_quantity(component.grid_key(), quantity)?;
    }
    Ok(grid)
}

/// Converts the given grid into a simple fields record and saves it at the given path.
pub fn save_grid<P, G>(
    grid: &G,
    output_file_path: P,
    annotation: &Annotation,
    verbose: Verbose,
) -> io::Result<()>
where
    P: AsRef<Path>,
    G: FieldGrid3,
{
    let fields = grid_to_simple_fields(grid, annotation);
    record_io::save_record(&PradObject::from(fields), output_file_path, verbose)
}

/// Loads the simple fields record at the given path and converts it into a grid.
///
/// Fails with `InvalidData` if the file holds another kind of record.
pub fn load_grid<P: AsRef<Path>>(input_file_path: P, verbose: Verbose) -> io::Result<CartesianGrid3> {
    let fields = record_io::load_record(input_file_path, verbose)?.into_simple_fields()?;
    simple_fields_to_grid(&fields)
}

fn promote_to_grid_shape(
    ones: &ArrayD<fun>,
    values: &Values,
    component: FieldComponent,
) -> io::Result<ArrayD<fun>> {
    match values {
        Values::Uniform(value) => Ok(ones * *value),
        Values::Array(array) => {
            let broadcast = array.broadcast(ones.shape()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Field component {} has shape {:?}, which does not fit the grid shape {:?}",
                        component,
                        array.shape(),
                        ones.shape()
                    ),
                )
            })?;
            Ok(ones * &broadcast)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        record::Annotated,
        units::{ElectricFieldUnit, LengthUnit, MagneticFieldUnit},
    };
    use approx::assert_relative_eq;

    fn scenario_grid() -> CartesianGrid3 {
        let grid = CartesianGrid3::from_axes(In3D::new(
            Quantity::from_vec(vec![0.0, 1.0, 2.0], LengthUnit::Meter),
            Quantity::from_vec(vec![0.0, 1.0], LengthUnit::Meter),
            Quantity::from_vec(vec![0.0], LengthUnit::Meter),
        ))
        .unwrap();
        let e_x = Quantity::new(grid.ones() * 5.0, ElectricFieldUnit::VoltPerMeter);
        grid.with_quantity("E_x", e_x).unwrap()
    }

    #[test]
    fn unset_components_export_as_uniform_zero() {
        let fields = grid_to_simple_fields(&scenario_grid(), &Annotation::new());

        let e_x = fields.component(FieldComponent::Ex).array().unwrap();
        assert_eq!(e_x.shape(), &[3, 2, 1]);
        assert!(e_x.iter().all(|&value| value == 5.0));
        for component in &FieldComponent::slice()[1..] {
            assert_eq!(fields.component(*component), &Values::Uniform(0.0));
        }
        assert_eq!(fields.coords(X).shape(), &[3, 2, 1]);
        assert_eq!(fields.label(), None);
        assert_eq!(fields.description(), None);
    }

    #[test]
    fn imported_grid_has_all_components_with_grid_shape() {
        let fields = grid_to_simple_fields(&scenario_grid(), &Annotation::new());
        let grid = simple_fields_to_grid(&fields).unwrap();

        assert_eq!(grid.shape(), &In3D::new(3, 2, 1));
        for component in FieldComponent::slice() {
            let quantity = grid.quantity(component.grid_key()).unwrap();
            assert_eq!(quantity.shape(), &[3, 2, 1]);
            let expected = if component == FieldComponent::Ex { 5.0 } else { 0.0 };
            assert!(quantity
                .convert_to_record_unit()
                .iter()
                .all(|&value| value == expected));
        }
        assert_eq!(grid.coords(), scenario_grid().coords());
    }

    #[test]
    fn fully_populated_grid_survives_export_and_import() {
        let mut grid = CartesianGrid3::from_axes(In3D::new(
            Quantity::from_vec(vec![-1.0, 0.0, 1.5, 3.0], LengthUnit::Meter),
            Quantity::from_vec(vec![0.0, 0.25], LengthUnit::Meter),
            Quantity::from_vec(vec![2.0, 4.0, 8.0], LengthUnit::Meter),
        ))
        .unwrap();
        let values = Array3::from_shape_fn((4, 2, 3), |(i, j, k)| (i * 6 + j * 3 + k) as fun)
            .into_dyn();
        for (idx, component) in FieldComponent::slice().into_iter().enumerate() {
            let component_values = &values * (idx as fun + 1.0);
            let quantity = match component.kind() {
                FieldKind::Electric => GridQuantity::from(Quantity::new(
                    component_values,
                    ElectricFieldUnit::VoltPerMeter,
                )),
                FieldKind::Magnetic => {
                    GridQuantity::from(Quantity::new(component_values, MagneticFieldUnit::Tesla))
                }
            };
            grid.add_quantity(component.grid_key(), quantity).unwrap();
        }

        let imported =
            simple_fields_to_grid(&grid_to_simple_fields(&grid, &Annotation::new())).unwrap();
        assert_eq!(imported.coords(), grid.coords());
        for component in FieldComponent::slice() {
            let exported = grid.quantity(component.grid_key()).unwrap();
            let result = imported.quantity(component.grid_key()).unwrap();
            assert_eq!(result.shape(), exported.shape());
            for (&a, &b) in result
                .convert_to_record_unit()
                .iter()
                .zip(exported.convert_to_record_unit().iter())
            {
                assert_relative_eq!(a, b, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn export_expresses_values_in_record_units() {
        let grid = CartesianGrid3::from_axes(In3D::new(
            Quantity::from_vec(vec![0.0, 100.0], LengthUnit::Centimeter),
            Quantity::from_vec(vec![0.0], LengthUnit::Centimeter),
            Quantity::from_vec(vec![-50.0], LengthUnit::Centimeter),
        ))
        .unwrap();
        let b_z = Quantity::new(grid.ones() * 1e4, MagneticFieldUnit::Gauss);
        let grid = grid.with_quantity("B_z", b_z).unwrap();

        let fields = grid_to_simple_fields(&grid, &Annotation::new());
        assert_relative_eq!(fields.coords(X)[[1, 0, 0]], 1.0);
        assert_relative_eq!(fields.coords(Z)[[0, 0, 0]], -0.5);
        for &value in fields.component(FieldComponent::Bz).array().unwrap() {
            assert_relative_eq!(value, 1.0);
        }
    }

    #[test]
    fn annotation_is_applied_on_export() {
        let annotation = Annotation::new()
            .with_label("Uniform E")
            .with_description("Test grid");
        let fields = grid_to_simple_fields(&scenario_grid(), &annotation);
        assert_eq!(fields.label(), Some("Uniform E"));
        assert_eq!(fields.description(), Some("Test grid"));
    }

    #[test]
    fn one_dimensional_record_coordinates_are_treated_as_axes() {
        let fields = SimpleFields::new(array![0.0, 0.5], array![0.0, 1.0, 2.0], array![3.0])
            .with_component(FieldComponent::By, 2.0)
            .with_component(FieldComponent::Ex, Array3::from_elem((2, 3, 1), -1.0));
        let grid = simple_fields_to_grid(&fields).unwrap();

        assert_eq!(grid.shape(), &In3D::new(2, 3, 1));
        assert_eq!(grid.coords()[Y].values()[[1, 2, 0]], 2.0);
        let b_y = grid.quantity("B_y").unwrap();
        assert!(b_y.convert_to_record_unit().iter().all(|&value| value == 2.0));
        let e_x = grid.quantity("E_x").unwrap();
        assert!(e_x.convert_to_record_unit().iter().all(|&value| value == -1.0));
    }

    #[test]
    fn arrays_broadcast_along_missing_dimensions() {
        let fields = SimpleFields::new(array![0.0, 1.0], array![0.0, 1.0], array![0.0, 1.0, 2.0])
            .with_component(FieldComponent::Ez, array![1.0, 2.0, 3.0]);
        let grid = simple_fields_to_grid(&fields).unwrap();
        let e_z = grid.quantity("E_z").unwrap().convert_to_record_unit();
        assert_eq!(e_z.shape(), &[2, 2, 3]);
        assert_eq!(e_z[[1, 0, 2]], 3.0);
    }

    #[test]
    fn incompatible_field_shapes_are_rejected() {
        let fields = SimpleFields::new(array![0.0, 1.0], array![0.0], array![0.0])
            .with_component(FieldComponent::Bx, array![1.0, 2.0, 3.0]);
        let err = simple_fields_to_grid(&fields).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
