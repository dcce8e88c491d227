//! Typed data frames handed to the panel by the host.

use serde::{Deserialize, Serialize};

/// Kind of values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Epoch milliseconds
    Time,
    /// Numeric measurements
    Number,
    /// Labels
    String,
}

/// Field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValues {
    /// Time or number values
    Numbers(Vec<f64>),
    /// String values
    Strings(Vec<String>),
}

impl FieldValues {
    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(v) => v.len(),
            Self::Strings(v) => v.len(),
        }
    }

    /// Whether there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column of a data frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Values
    pub values: FieldValues,
}

impl Field {
    /// Time field of epoch milliseconds.
    #[must_use]
    pub fn time(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Time,
            values: FieldValues::Numbers(values),
        }
    }

    /// Numeric field.
    #[must_use]
    pub fn number(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Number,
            values: FieldValues::Numbers(values),
        }
    }

    /// String field.
    #[must_use]
    pub fn string(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::String,
            values: FieldValues::Strings(values),
        }
    }

    /// Numeric values, if this field holds numbers.
    #[must_use]
    pub fn numbers(&self) -> Option<&[f64]> {
        match &self.values {
            FieldValues::Numbers(v) => Some(v),
            FieldValues::Strings(_) => None,
        }
    }
}

/// One query result: a set of equally long fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFrame {
    /// Query identifier
    #[serde(default)]
    pub ref_id: String,
    /// Columns
    pub fields: Vec<Field>,
}

impl DataFrame {
    /// Create an empty frame.
    #[must_use]
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// First field of `field_type`.
    #[must_use]
    pub fn first_of(&self, field_type: FieldType) -> Option<&Field> {
        self.fields.iter().find(|f| f.field_type == field_type)
    }

    /// The plotted pair: first time field as x, first number field as y.
    ///
    /// Fields of different lengths are truncated to the shorter one.
    #[must_use]
    pub fn xy(&self) -> Option<(&[f64], &[f64])> {
        let xs = self.first_of(FieldType::Time)?.numbers()?;
        let ys = self.first_of(FieldType::Number)?.numbers()?;
        let n = xs.len().min(ys.len());
        Some((&xs[..n], &ys[..n]))
    }

    /// Stable key of the plotted series: ref id plus value field name.
    #[must_use]
    pub fn series_key(&self) -> Option<String> {
        let field = self.first_of(FieldType::Number)?;
        Some(format!("{}{}", self.ref_id, field.name))
    }
}

/// Everything the host passes to one paint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelData {
    /// Frames, one per series
    pub series: Vec<DataFrame>,
}

impl PanelData {
    /// Wrap frames.
    #[must_use]
    pub fn new(series: Vec<DataFrame>) -> Self {
        Self { series }
    }
}
