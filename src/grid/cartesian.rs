//! Cartesian grids given by the coordinates of every grid point.

use super::{FieldGrid3, GridQuantity};
use crate::{
    field::{FieldComponent, FieldKind},
    geometry::{
        Dim3::{self, X, Y, Z},
        In3D,
    },
    units::{fun, LengthUnit, Quantity},
};
use ndarray::prelude::*;
use std::{collections::BTreeMap, io};

/// A 3D Cartesian grid with named field quantities.
#[derive(Clone, Debug, PartialEq)]
pub struct CartesianGrid3 {
    coords: In3D<Quantity<LengthUnit>>,
    shape: In3D<usize>,
    quantities: BTreeMap<String, GridQuantity>,
}

impl CartesianGrid3 {
    /// Creates a new grid from three 1D coordinate axes.
    ///
    /// The point coordinates are the outer product of the axes, so that
    /// the x-coordinate of point `[i, j, k]` is `x[i]` and so on.
    pub fn from_axes(axes: In3D<Quantity<LengthUnit>>) -> io::Result<Self> {
        let x = axis_values(&axes[X], X)?;
        let y = axis_values(&axes[Y], Y)?;
        let z = axis_values(&axes[Z], Z)?;

        let shape = In3D::new(x.len(), y.len(), z.len());
        verify_nonempty_shape(&shape)?;
        let dims = shape.to_tuple();

        let coords = In3D::new(
            Quantity::new(Array3::from_shape_fn(dims, |(i, _, _)| x[i]), axes[X].unit()),
            Quantity::new(Array3::from_shape_fn(dims, |(_, j, _)| y[j]), axes[Y].unit()),
            Quantity::new(Array3::from_shape_fn(dims, |(_, _, k)| z[k]), axes[Z].unit()),
        );
        Ok(Self::new_unchecked(coords, shape))
    }

    /// Creates a new grid from three 3D arrays holding the x-, y- and
    /// z-coordinates of every grid point.
    pub fn from_point_arrays(points: In3D<Quantity<LengthUnit>>) -> io::Result<Self> {
        for dim in Dim3::slice() {
            if points[dim].ndim() != 3 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Array of {}-coordinates is {}D, but point coordinates must be 3D",
                        dim,
                        points[dim].ndim()
                    ),
                ));
            }
        }
        if points[Y].shape() != points[X].shape() || points[Z].shape() != points[X].shape() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Coordinate arrays have different shapes {:?}, {:?} and {:?}",
                    points[X].shape(),
                    points[Y].shape(),
                    points[Z].shape()
                ),
            ));
        }
        let point_shape = points[X].shape();
        let shape = In3D::new(point_shape[0], point_shape[1], point_shape[2]);
        verify_nonempty_shape(&shape)?;
        Ok(Self::new_unchecked(points, shape))
    }

    /// Creates a new grid from either three 1D coordinate axes or three
    /// 3D arrays of point coordinates.
    pub fn from_coordinate_arrays(coords: In3D<Quantity<LengthUnit>>) -> io::Result<Self> {
        match (coords[X].ndim(), coords[Y].ndim(), coords[Z].ndim()) {
            (1, 1, 1) => Self::from_axes(coords),
            (3, 3, 3) => Self::from_point_arrays(coords),
            (nx, ny, nz) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Coordinate arrays must be three 1D axes or three 3D point arrays, \
                     but have dimensions {}, {} and {}",
                    nx, ny, nz
                ),
            )),
        }
    }

    fn new_unchecked(coords: In3D<Quantity<LengthUnit>>, shape: In3D<usize>) -> Self {
        Self {
            coords,
            shape,
            quantities: BTreeMap::new(),
        }
    }

    /// Sets the quantity with the given key, replacing any existing quantity.
    ///
    /// The key must be one of the six field component keys (`E_x`, ..., `B_z`),
    /// the quantity must hold the kind of field the key denotes, and its values
    /// must have the shape of the grid.
    pub fn add_quantity<Q: Into<GridQuantity>>(&mut self, key: &str, quantity: Q) -> io::Result<()> {
        let quantity = quantity.into();
        let component = FieldComponent::from_grid_key(key).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Unrecognized grid quantity {}\n\
                     Valid quantities are: {}",
                    key,
                    FieldComponent::slice()
                        .iter()
                        .map(|component| component.grid_key())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )
        })?;
        if quantity.kind() != component.kind() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Quantity {} must be {} field, but has unit {}",
                    key,
                    match component.kind() {
                        FieldKind::Electric => "an electric",
                        FieldKind::Magnetic => "a magnetic",
                    },
                    quantity.unit_symbol()
                ),
            ));
        }
        if quantity.shape() != self.array_shape().slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Quantity {} has shape {:?}, but the grid has shape {}",
                    key,
                    quantity.shape(),
                    self.shape
                ),
            ));
        }
        self.quantities.insert(key.to_string(), quantity);
        Ok(())
    }

    /// Returns the grid with the given quantity set.
    pub fn with_quantity<Q: Into<GridQuantity>>(mut self, key: &str, quantity: Q) -> io::Result<Self> {
        self.add_quantity(key, quantity)?;
        Ok(self)
    }

    /// Removes the quantity with the given key and returns it, if it was set.
    pub fn remove_quantity(&mut self, key: &str) -> Option<GridQuantity> {
        self.quantities.remove(key)
    }

    /// Returns an array of ones with the shape of the grid.
    pub fn ones(&self) -> ArrayD<fun> {
        ArrayD::ones(self.array_shape())
    }
}

impl FieldGrid3 for CartesianGrid3 {
    fn shape(&self) -> &In3D<usize> {
        &self.shape
    }

    fn coords(&self) -> &In3D<Quantity<LengthUnit>> {
        &self.coords
    }

    fn quantity(&self, key: &str) -> Option<&GridQuantity> {
        self.quantities.get(key)
    }

    fn quantity_keys(&self) -> Vec<&str> {
        self.quantities.keys().map(|key| key.as_str()).collect()
    }
}

fn axis_values(axis: &Quantity<LengthUnit>, dim: Dim3) -> io::Result<ArrayView1<fun>> {
    axis.values()
        .view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Coordinate axis {} is {}D, but axes must be 1D",
                    dim,
                    axis.ndim()
                ),
            )
        })
}

fn verify_nonempty_shape(shape: &In3D<usize>) -> io::Result<()> {
    if shape.into_iter().any(|&size| size == 0) {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Cannot create grid with shape {}", shape),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ElectricFieldUnit, MagneticFieldUnit};

    fn axes() -> In3D<Quantity<LengthUnit>> {
        In3D::new(
            Quantity::from_vec(vec![0.0, 1.0, 2.0], LengthUnit::Meter),
            Quantity::from_vec(vec![0.0, 1.0], LengthUnit::Meter),
            Quantity::from_vec(vec![0.0], LengthUnit::Meter),
        )
    }

    #[test]
    fn grid_from_axes_holds_outer_product_coordinates() {
        let grid = CartesianGrid3::from_axes(axes()).unwrap();
        assert_eq!(grid.shape(), &In3D::new(3, 2, 1));

        let coords = grid.coords();
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(coords[X].values()[[i, j, 0]], i as fun);
                assert_eq!(coords[Y].values()[[i, j, 0]], j as fun);
                assert_eq!(coords[Z].values()[[i, j, 0]], 0.0);
            }
        }
    }

    #[test]
    fn grid_from_point_arrays_keeps_points() {
        let from_axes = CartesianGrid3::from_axes(axes()).unwrap();
        let points = from_axes.coords().clone();
        let from_points = CartesianGrid3::from_coordinate_arrays(points).unwrap();
        assert_eq!(from_points, from_axes);
    }

    #[test]
    fn mismatched_coordinate_arrays_are_rejected() {
        let mixed = In3D::new(
            Quantity::from_vec(vec![0.0, 1.0], LengthUnit::Meter),
            Quantity::new(Array3::<fun>::zeros((2, 2, 2)), LengthUnit::Meter),
            Quantity::from_vec(vec![0.0], LengthUnit::Meter),
        );
        let err = CartesianGrid3::from_coordinate_arrays(mixed).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let unequal = In3D::new(
            Quantity::new(Array3::<fun>::zeros((2, 2, 2)), LengthUnit::Meter),
            Quantity::new(Array3::<fun>::zeros((2, 3, 2)), LengthUnit::Meter),
            Quantity::new(Array3::<fun>::zeros((2, 2, 2)), LengthUnit::Meter),
        );
        let err = CartesianGrid3::from_point_arrays(unequal).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let empty = In3D::new(
            Quantity::from_vec(vec![], LengthUnit::Meter),
            Quantity::from_vec(vec![0.0], LengthUnit::Meter),
            Quantity::from_vec(vec![0.0], LengthUnit::Meter),
        );
        assert!(CartesianGrid3::from_axes(empty).is_err());
    }

    #[test]
    fn quantities_are_validated_when_added() {
        let mut grid = CartesianGrid3::from_axes(axes()).unwrap();
        let e_field = Quantity::new(grid.ones() * 5.0, ElectricFieldUnit::VoltPerMeter);

        let err = grid.add_quantity("rho", e_field.clone()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err = grid.add_quantity("B_x", e_field.clone()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let scalar = Quantity::scalar(1.0, MagneticFieldUnit::Tesla);
        let err = grid.add_quantity("B_x", scalar).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        grid.add_quantity("E_x", e_field).unwrap();
        assert!(grid.has_quantity("E_x"));
        assert!(!grid.has_quantity("E_y"));
        assert_eq!(grid.quantity_keys(), vec!["E_x"]);

        assert!(grid.remove_quantity("E_x").is_some());
        assert!(grid.quantity_keys().is_empty());
    }
}
