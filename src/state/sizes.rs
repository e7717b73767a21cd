/// Dynamic size-variant rows for the product form
///
/// A product carries a list of width/height/price variants. The rows are
/// edited as raw text and shipped to the API verbatim; the server owns all
/// numeric validation, so nothing here parses or clamps the values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// One width/height/price variant of a product.
///
/// All three fields hold the user's text exactly as typed (a trailing
/// decimal point survives an edit in progress). The serialized shape is
/// the literal `{"width":..,"height":..,"price":..}` object the API expects.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeRow {
    pub width: String,
    pub height: String,
    pub price: String,
}

/// The three editable fields of a [`SizeRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeField {
    Width,
    Height,
    Price,
}

/// Contract violations from [`SizeList`] operations.
///
/// These indicate a programming error in the calling screen, not bad user
/// input; they are surfaced, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeListError {
    #[error("size row index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("unknown size field: {0}")]
    InvalidField(String),
}

impl FromStr for SizeField {
    type Err = SizeListError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "width" => Ok(SizeField::Width),
            "height" => Ok(SizeField::Height),
            "price" => Ok(SizeField::Price),
            other => Err(SizeListError::InvalidField(other.to_string())),
        }
    }
}

/// An ordered, positional list of size rows.
///
/// Insertion order is display order. Rows carry no identity of their own;
/// removal shifts every later row one position left and touches nothing
/// else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeList {
    rows: Vec<SizeRow>,
}

impl SizeList {
    /// An empty list (edit forms may legitimately start with no rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding a single all-empty row (the create form's start state).
    pub fn with_one_empty_row() -> Self {
        Self {
            rows: vec![SizeRow::default()],
        }
    }

    /// Take ownership of rows fetched from the API.
    pub fn from_rows(rows: Vec<SizeRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SizeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one all-empty row at the end. Infallible.
    pub fn append(&mut self) {
        self.rows.push(SizeRow::default());
    }

    /// Remove the row at `index`, shifting later rows left by one.
    pub fn remove_at(&mut self, index: usize) -> Result<(), SizeListError> {
        if index >= self.rows.len() {
            return Err(SizeListError::OutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        self.rows.remove(index);
        Ok(())
    }

    /// Replace one field of one row with `value`, stored verbatim.
    pub fn update(
        &mut self,
        index: usize,
        field: SizeField,
        value: &str,
    ) -> Result<(), SizeListError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(SizeListError::OutOfRange { index, len })?;

        match field {
            SizeField::Width => row.width = value.to_string(),
            SizeField::Height => row.height = value.to_string(),
            SizeField::Price => row.price = value.to_string(),
        }
        Ok(())
    }

    /// Encode the rows as the JSON array the API's `sizes` form field expects.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_list() -> SizeList {
        SizeList::from_rows(vec![
            SizeRow {
                width: "40".into(),
                height: "90".into(),
                price: "15000".into(),
            },
            SizeRow {
                width: "50".into(),
                height: "100".into(),
                price: "20000".into(),
            },
            SizeRow {
                width: "60".into(),
                height: "120".into(),
                price: "25000".into(),
            },
        ])
    }

    #[test]
    fn test_append_adds_empty_row_at_end() {
        let mut list = SizeList::with_one_empty_row();
        list.append();

        assert_eq!(list.len(), 2);
        assert_eq!(list.rows()[1], SizeRow::default());
    }

    #[test]
    fn test_update_touches_only_one_field() {
        let mut list = filled_list();
        let before = list.clone();

        list.update(1, SizeField::Price, "99").unwrap();

        assert_eq!(list.rows()[1].price, "99");
        // Everything except row 1's price is untouched
        assert_eq!(list.rows()[0], before.rows()[0]);
        assert_eq!(list.rows()[2], before.rows()[2]);
        assert_eq!(list.rows()[1].width, before.rows()[1].width);
        assert_eq!(list.rows()[1].height, before.rows()[1].height);
    }

    #[test]
    fn test_update_stores_value_verbatim() {
        let mut list = SizeList::with_one_empty_row();

        // In-progress edits like a trailing decimal point are kept as-is
        list.update(0, SizeField::Width, "40.").unwrap();

        assert_eq!(list.rows()[0].width, "40.");
    }

    #[test]
    fn test_remove_shifts_later_rows_left() {
        let mut list = filled_list();
        let second = list.rows()[1].clone();
        let third = list.rows()[2].clone();

        list.remove_at(1).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.rows()[1], third);
        assert_ne!(list.rows()[1], second);
    }

    #[test]
    fn test_remove_first_and_last() {
        let mut list = filled_list();
        list.remove_at(0).unwrap();
        assert_eq!(list.rows()[0].width, "50");

        list.remove_at(list.len() - 1).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.rows()[0].width, "50");
    }

    #[test]
    fn test_remove_out_of_range_leaves_list_unmodified() {
        let mut list = filled_list();
        let before = list.clone();

        let err = list.remove_at(3).unwrap_err();

        assert_eq!(err, SizeListError::OutOfRange { index: 3, len: 3 });
        assert_eq!(list, before);
    }

    #[test]
    fn test_update_out_of_range() {
        let mut list = SizeList::new();
        let err = list.update(0, SizeField::Width, "10").unwrap_err();
        assert_eq!(err, SizeListError::OutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("width".parse::<SizeField>().unwrap(), SizeField::Width);
        assert_eq!("height".parse::<SizeField>().unwrap(), SizeField::Height);
        assert_eq!("price".parse::<SizeField>().unwrap(), SizeField::Price);

        let err = "depth".parse::<SizeField>().unwrap_err();
        assert_eq!(err, SizeListError::InvalidField("depth".to_string()));
    }

    #[test]
    fn test_json_shape_matches_api_contract() {
        let mut list = SizeList::with_one_empty_row();
        list.update(0, SizeField::Width, "40").unwrap();
        list.update(0, SizeField::Height, "90").unwrap();
        list.update(0, SizeField::Price, "15000").unwrap();

        assert_eq!(
            list.to_json().unwrap(),
            r#"[{"width":"40","height":"90","price":"15000"}]"#
        );
    }
}
