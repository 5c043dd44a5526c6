//! Conversion of grids and particle ensembles into prad records and back.

pub mod fields;
pub mod particles;

use crate::record::Annotated;

/// Optional label and description to attach to a produced record.
///
/// Only the parts that are set are applied, so a record keeps its
/// existing label or description when the corresponding part is absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotation {
    label: Option<String>,
    description: Option<String>,
}

impl Annotation {
    /// Creates an annotation with neither label nor description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the annotation with the given label.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the annotation with the given description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets the label and description that are present on the given record.
    pub fn apply_to<R: Annotated>(&self, record: &mut R) {
        if let Some(label) = &self.label {
            record.set_label(label.clone());
        }
        if let Some(description) = &self.description {
            record.set_description(description.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fields::SimpleFields;

    #[test]
    fn absent_parts_leave_record_unchanged() {
        let mut fields = SimpleFields::default();
        Annotation::new()
            .with_label("shot 42")
            .with_description("first")
            .apply_to(&mut fields);

        Annotation::new().apply_to(&mut fields);
        assert_eq!(fields.label(), Some("shot 42"));
        assert_eq!(fields.description(), Some("first"));

        Annotation::new().with_description("second").apply_to(&mut fields);
        assert_eq!(fields.label(), Some("shot 42"));
        assert_eq!(fields.description(), Some("second"));
    }

    #[test]
    fn empty_strings_are_applied_verbatim() {
        let mut fields = SimpleFields::default();
        Annotation::new().with_label("").apply_to(&mut fields);
        assert_eq!(fields.label(), Some(""));
        assert_eq!(fields.description(), None);
    }
}
