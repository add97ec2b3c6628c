//! Key-based left join over rendered key values.
//!
//! Keys are compared as canonical text (see [`pft_common::any_to_key`]), so
//! an `Int64` key on one side and a `String` key on the other still match
//! when they render the same way. A row whose key has any null component
//! never matches.

use std::collections::HashMap;

use polars::prelude::*;

use pft_common::any_to_key;

use crate::error::Result;

/// Suffix for right-side columns whose name already exists on the left.
pub const JOIN_SUFFIX: &str = "_right";

/// Renders the composite key of every row.
///
/// A row gets `None` when any of its key cells is null.
pub fn row_keys(df: &DataFrame, key_columns: &[&str]) -> Result<Vec<Option<Vec<String>>>> {
    let columns = key_columns
        .iter()
        .map(|name| df.column(name))
        .collect::<PolarsResult<Vec<_>>>()?;
    let keys = (0..df.height())
        .map(|row| {
            columns
                .iter()
                .map(|column| column.get(row).ok().and_then(any_to_key))
                .collect::<Option<Vec<String>>>()
        })
        .collect();
    Ok(keys)
}

/// Left-joins `right` onto `left`.
///
/// Every left row appears exactly once and in its original order. When the
/// right side holds several rows with the same key the first one is used.
/// Right columns (key columns included) are appended after the left columns;
/// a right column whose name already exists on the left is renamed with
/// `suffix` appended. Unmatched rows get nulls in every right column.
pub fn left_join(
    left: &DataFrame,
    right: &DataFrame,
    left_on: &[&str],
    right_on: &[&str],
    suffix: &str,
) -> Result<DataFrame> {
    let mut lookup: HashMap<Vec<String>, IdxSize> = HashMap::new();
    for (idx, key) in row_keys(right, right_on)?.into_iter().enumerate() {
        if let Some(key) = key {
            lookup.entry(key).or_insert(idx as IdxSize);
        }
    }

    let indices: Vec<Option<IdxSize>> = row_keys(left, left_on)?
        .into_iter()
        .map(|key| key.and_then(|key| lookup.get(&key).copied()))
        .collect();
    let matched = indices.iter().any(Option::is_some);

    let left_names: Vec<PlSmallStr> = left.get_column_names().into_iter().cloned().collect();
    let height = left.height();
    let mut appended = Vec::with_capacity(right.width());
    if matched {
        let taken = right.take(&IdxCa::new(PlSmallStr::from_static("idx"), indices))?;
        for column in taken.get_columns() {
            let name = joined_name(column.name(), &left_names, suffix);
            appended.push(column.clone().with_name(name));
        }
    } else {
        for column in right.get_columns() {
            let name = joined_name(column.name(), &left_names, suffix);
            appended.push(Column::full_null(name, height, column.dtype()));
        }
    }

    Ok(left.hstack(&appended)?)
}

fn joined_name(name: &PlSmallStr, left_names: &[PlSmallStr], suffix: &str) -> PlSmallStr {
    if left_names.contains(name) {
        format!("{name}{suffix}").into()
    } else {
        name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        let column = df.column(name).unwrap();
        (0..column.len())
            .map(|idx| any_to_key(column.get(idx).unwrap()))
            .collect()
    }

    #[test]
    fn preserves_left_rows_and_order() {
        let left = frame(vec![
            Series::new("k".into(), &["b", "a", "c"]).into_column(),
        ]);
        let right = frame(vec![
            Series::new("key".into(), &["a", "b"]).into_column(),
            Series::new("v".into(), &[1i64, 2]).into_column(),
        ]);

        let joined = left_join(&left, &right, &["k"], &["key"], "_right").unwrap();

        assert_eq!(joined.height(), 3);
        assert_eq!(
            strings(&joined, "v"),
            vec![Some("2".to_string()), Some("1".to_string()), None]
        );
        assert_eq!(strings(&joined, "key")[2], None);
    }

    #[test]
    fn first_duplicate_on_the_right_wins() {
        let left = frame(vec![Series::new("k".into(), &["a"]).into_column()]);
        let right = frame(vec![
            Series::new("k2".into(), &["a", "a"]).into_column(),
            Series::new("v".into(), &["first", "second"]).into_column(),
        ]);

        let joined = left_join(&left, &right, &["k"], &["k2"], "_right").unwrap();

        assert_eq!(joined.height(), 1);
        assert_eq!(strings(&joined, "v"), vec![Some("first".to_string())]);
    }

    #[test]
    fn null_keys_never_match() {
        let left = frame(vec![
            Series::new("k".into(), &[None::<&str>, Some("a")]).into_column(),
        ]);
        let right = frame(vec![
            Series::new("k2".into(), &[None::<&str>, Some("a")]).into_column(),
            Series::new("v".into(), &["null-row", "a-row"]).into_column(),
        ]);

        let joined = left_join(&left, &right, &["k"], &["k2"], "_right").unwrap();

        assert_eq!(
            strings(&joined, "v"),
            vec![None, Some("a-row".to_string())]
        );
    }

    #[test]
    fn colliding_names_get_suffix() {
        let left = frame(vec![
            Series::new("k".into(), &["a"]).into_column(),
            Series::new("Country".into(), &["US"]).into_column(),
        ]);
        let right = frame(vec![
            Series::new("k2".into(), &["a"]).into_column(),
            Series::new("Country".into(), &["CA"]).into_column(),
        ]);

        let joined = left_join(&left, &right, &["k"], &["k2"], "_right").unwrap();

        let names: Vec<&str> = joined.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["k", "Country", "k2", "Country_right"]);
    }

    #[test]
    fn unmatched_join_appends_typed_null_columns() {
        let left = frame(vec![Series::new("k".into(), &["a", "b"]).into_column()]);
        let right = frame(vec![
            Series::new("k2".into(), Vec::<&str>::new()).into_column(),
            Series::new("v".into(), Vec::<f64>::new()).into_column(),
        ]);

        let joined = left_join(&left, &right, &["k"], &["k2"], "_right").unwrap();

        assert_eq!(joined.height(), 2);
        assert_eq!(joined.column("v").unwrap().dtype(), &DataType::Float64);
        assert_eq!(joined.column("v").unwrap().null_count(), 2);
    }

    #[test]
    fn numeric_and_text_keys_match() {
        let left = frame(vec![Series::new("k".into(), &[100i64]).into_column()]);
        let right = frame(vec![
            Series::new("k2".into(), &["100"]).into_column(),
            Series::new("v".into(), &["hit"]).into_column(),
        ]);

        let joined = left_join(&left, &right, &["k"], &["k2"], "_right").unwrap();

        assert_eq!(strings(&joined, "v"), vec![Some("hit".to_string())]);
    }
}
