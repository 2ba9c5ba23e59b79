//! Field plans
//!
//! A field plan is the ordered list of primitive fields a window kind writes and
//! reads. Derived kinds extend the base plan, so base fields always come first.

use boardpane_state::{
    read_bounds, write_bounds, DecodeError, EncodeError, FieldReader, FieldWriter, Rect,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Bounds,
    Visible,
    FilterText,
    SelectedIndices,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Bounds => "bounds",
            Field::Visible => "visible",
            Field::FilterText => "filter_text",
            Field::SelectedIndices => "selected_indices",
        }
    }

    /// Value a freshly built window holds for this field.
    pub fn default_value(self) -> FieldValue {
        match self {
            Field::Bounds => FieldValue::Bounds(Rect::default()),
            Field::Visible => FieldValue::Visible(false),
            Field::FilterText => FieldValue::FilterText(String::new()),
            Field::SelectedIndices => FieldValue::SelectedIndices(Vec::new()),
        }
    }

    pub fn decode(self, input: &mut FieldReader<'_>) -> Result<FieldValue, DecodeError> {
        Ok(match self {
            Field::Bounds => FieldValue::Bounds(read_bounds(input)?),
            Field::Visible => FieldValue::Visible(input.take_bool(self.as_str())?),
            Field::FilterText => FieldValue::FilterText(input.take_str(self.as_str())?),
            Field::SelectedIndices => {
                FieldValue::SelectedIndices(input.take_indices(self.as_str())?)
            }
        })
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bounds(Rect),
    Visible(bool),
    FilterText(String),
    SelectedIndices(Vec<u32>),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Bounds(_) => Field::Bounds,
            FieldValue::Visible(_) => Field::Visible,
            FieldValue::FilterText(_) => Field::FilterText,
            FieldValue::SelectedIndices(_) => Field::SelectedIndices,
        }
    }

    pub fn encode(&self, out: &mut FieldWriter) -> Result<(), EncodeError> {
        match self {
            FieldValue::Bounds(bounds) => write_bounds(out, bounds),
            FieldValue::Visible(visible) => out.put_bool(*visible),
            FieldValue::FilterText(text) => out.put_str(text)?,
            FieldValue::SelectedIndices(indices) => out.put_indices(indices)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    fields: Vec<Field>,
}

impl FieldPlan {
    /// Fields every persistable window carries.
    pub fn base() -> Self {
        Self {
            fields: vec![Field::Bounds, Field::Visible],
        }
    }

    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends fields after the ones already planned.
    pub fn extend(mut self, extra: &[Field]) -> Self {
        self.fields.extend_from_slice(extra);
        self
    }

    /// Appends another plan, used for windows that persist nested windows.
    pub fn then(mut self, other: FieldPlan) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decodes every field of the plan. Nothing is returned unless all of them decode.
    pub fn decode(&self, input: &mut FieldReader<'_>) -> Result<Vec<FieldValue>, DecodeError> {
        self.fields.iter().map(|field| field.decode(input)).collect()
    }

    /// Encodes the values, which must match the plan field for field.
    pub fn encode(&self, values: &[FieldValue], out: &mut FieldWriter) -> Result<(), EncodeError> {
        for (index, field) in self.fields.iter().enumerate() {
            match values.get(index) {
                Some(value) if value.field() == *field => value.encode(out)?,
                _ => return Err(EncodeError::MissingField(field.as_str())),
            }
        }
        Ok(())
    }

    /// Encodes the default value of every field, keeping the plan's shape.
    pub fn encode_defaults(&self, out: &mut FieldWriter) -> Result<(), EncodeError> {
        for field in &self.fields {
            field.default_value().encode(out)?;
        }
        Ok(())
    }
}

impl Default for FieldPlan {
    fn default() -> Self {
        Self::base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardpane_state::{FilteredListState, WindowState};

    #[test]
    fn test_base_fields_come_first() {
        let plan = FieldPlan::base().extend(&[Field::FilterText, Field::SelectedIndices]);
        assert_eq!(
            plan.fields(),
            &[
                Field::Bounds,
                Field::Visible,
                Field::FilterText,
                Field::SelectedIndices
            ]
        );
    }

    #[test]
    fn test_plan_matches_state_codec() {
        let state = FilteredListState::new(
            WindowState::new(Rect::new(1, 2, 3, 4), true),
            "net",
            vec![4],
        );
        let plan = FieldPlan::base().extend(&[Field::FilterText, Field::SelectedIndices]);
        let values = vec![
            FieldValue::Bounds(state.window.bounds),
            FieldValue::Visible(true),
            FieldValue::FilterText("net".to_string()),
            FieldValue::SelectedIndices(vec![4]),
        ];

        let mut out = FieldWriter::new();
        plan.encode(&values, &mut out).unwrap();
        assert_eq!(out.as_bytes(), state.encode().unwrap().as_slice());

        let decoded = plan.decode(&mut FieldReader::new(out.as_bytes())).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_encode_rejects_mismatched_values() {
        let plan = FieldPlan::base();
        let values = vec![FieldValue::Visible(true), FieldValue::Bounds(Rect::default())];
        let err = plan.encode(&values, &mut FieldWriter::new()).unwrap_err();
        assert_eq!(err, EncodeError::MissingField("bounds"));
    }

    #[test]
    fn test_defaults_keep_plan_shape() {
        let plan = FieldPlan::base().extend(&[Field::FilterText, Field::SelectedIndices]);
        let mut out = FieldWriter::new();
        plan.encode_defaults(&mut out).unwrap();
        assert_eq!(out.as_bytes(), FilteredListState::default().encode().unwrap().as_slice());

        let decoded = plan.decode(&mut FieldReader::new(out.as_bytes())).unwrap();
        assert_eq!(decoded[0], FieldValue::Bounds(Rect::default()));
        assert_eq!(decoded[3], FieldValue::SelectedIndices(Vec::new()));
    }

    #[test]
    fn test_decode_is_all_or_nothing() {
        let bytes = WindowState::default().encode();
        let plan = FieldPlan::base().extend(&[Field::FilterText]);
        assert!(plan.decode(&mut FieldReader::new(&bytes)).is_err());
    }
}
