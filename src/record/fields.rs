//! Records of coordinates and electromagnetic field components.

use super::{fdt, Annotated, Values};
use crate::{
    field::FieldComponent,
    geometry::Dim3::{self, X, Y, Z},
};
use ndarray::prelude::*;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Grid coordinates [m] with electric [V/m] and magnetic [T] field components.
///
/// Every field component is always present, either as an array or as a
/// single value applying to every grid point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SimpleFields {
    #[cfg_attr(feature = "serialization", serde(rename = "X"))]
    x: ArrayD<fdt>,
    #[cfg_attr(feature = "serialization", serde(rename = "Y"))]
    y: ArrayD<fdt>,
    #[cfg_attr(feature = "serialization", serde(rename = "Z"))]
    z: ArrayD<fdt>,
    #[cfg_attr(feature = "serialization", serde(rename = "Ex"))]
    ex: Values,
    #[cfg_attr(feature = "serialization", serde(rename = "Ey"))]
    ey: Values,
    #[cfg_attr(feature = "serialization", serde(rename = "Ez"))]
    ez: Values,
    #[cfg_attr(feature = "serialization", serde(rename = "Bx"))]
    bx: Values,
    #[cfg_attr(feature = "serialization", serde(rename = "By"))]
    by: Values,
    #[cfg_attr(feature = "serialization", serde(rename = "Bz"))]
    bz: Values,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    label: Option<String>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    description: Option<String>,
}

impl SimpleFields {
    /// Creates a new record with the given coordinate arrays and all
    /// field components set to zero.
    pub fn new<D: Dimension>(x: Array<fdt, D>, y: Array<fdt, D>, z: Array<fdt, D>) -> Self {
        Self {
            x: x.into_dyn(),
            y: y.into_dyn(),
            z: z.into_dyn(),
            ex: Values::zero(),
            ey: Values::zero(),
            ez: Values::zero(),
            bx: Values::zero(),
            by: Values::zero(),
            bz: Values::zero(),
            label: None,
            description: None,
        }
    }

    /// Returns a reference to the array of coordinates along the given dimension.
    pub fn coords(&self, dim: Dim3) -> &ArrayD<fdt> {
        match dim {
            X => &self.x,
            Y => &self.y,
            Z => &self.z,
        }
    }

    /// Returns a reference to the values of the given field component.
    pub fn component(&self, component: FieldComponent) -> &Values {
        match component {
            FieldComponent::Ex => &self.ex,
            FieldComponent::Ey => &self.ey,
            FieldComponent::Ez => &self.ez,
            FieldComponent::Bx => &self.bx,
            FieldComponent::By => &self.by,
            FieldComponent::Bz => &self.bz,
        }
    }

    /// Returns a mutable reference to the values of the given field component.
    pub fn component_mut(&mut self, component: FieldComponent) -> &mut Values {
        match component {
            FieldComponent::Ex => &mut self.ex,
            FieldComponent::Ey => &mut self.ey,
            FieldComponent::Ez => &mut self.ez,
            FieldComponent::Bx => &mut self.bx,
            FieldComponent::By => &mut self.by,
            FieldComponent::Bz => &mut self.bz,
        }
    }

    /// Sets the values of the given field component.
    pub fn set_component<V: Into<Values>>(&mut self, component: FieldComponent, values: V) {
        *self.component_mut(component) = values.into();
    }

    /// Returns the record with the given field component set.
    pub fn with_component<V: Into<Values>>(mut self, component: FieldComponent, values: V) -> Self {
        self.set_component(component, values);
        self
    }

    /// Returns the name of the first attribute holding a NaN or infinite
    /// value, or `None` if all values are finite.
    pub fn first_nonfinite_attribute(&self) -> Option<&'static str> {
        Dim3::slice()
            .into_iter()
            .find(|&dim| !self.coords(dim).iter().all(|value| value.is_finite()))
            .map(|dim| ["X", "Y", "Z"][dim.num()])
            .or_else(|| {
                FieldComponent::slice()
                    .into_iter()
                    .find(|&component| !self.component(component).is_finite())
                    .map(FieldComponent::record_name)
            })
    }
}

impl Default for SimpleFields {
    /// Creates an empty record without coordinates.
    fn default() -> Self {
        Self::new(Array1::zeros(0), Array1::zeros(0), Array1::zeros(0))
    }
}

impl Annotated for SimpleFields {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn set_label(&mut self, label: String) {
        self.label = Some(label);
    }

    fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }
}
