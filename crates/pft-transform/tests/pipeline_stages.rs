//! End-to-end checks of normalize, reconcile and calendar binding on
//! in-memory tables.

use polars::prelude::*;
use proptest::prelude::*;

use pft_model::schema::{calendar::PRUNED, forecast::DROPPED};
use pft_model::{SourceKind, SourceTable};
use pft_transform::{bind_calendar, normalize_main, normalize_reference, reconcile};

fn text(name: &str, values: &[&str]) -> Column {
    Series::new(name.into(), values).into_column()
}

fn week<'a>(header: &'a str, values: &'a [&'a str]) -> (&'a str, &'a [&'a str]) {
    (header, values)
}

fn main_table(items: &[&str], weeks: &[(&str, &[&str])]) -> SourceTable {
    let rows = items.len();
    let mut columns = vec![
        text("Item", items),
        text(" Plant Desc\u{a0}", &vec!["Plant A"; rows]),
    ];
    for name in DROPPED {
        columns.push(text(name, &vec!["x"; rows]));
    }
    columns.push(Series::new("IM/LF".into(), vec![10.0; rows]).into_column());
    columns.push(Series::new("LF/LB".into(), vec![2.0; rows]).into_column());
    columns.push(Series::new("Safety Stock".into(), vec![3i64; rows]).into_column());
    for (header, values) in weeks {
        columns.push(text(header, values));
    }
    SourceTable::new(SourceKind::Main, DataFrame::new(columns).unwrap())
}

fn reference_table() -> SourceTable {
    let data = DataFrame::new(vec![
        text("Pepsi Item# (RMID#)", &[" 100 "]),
        text("Pepsi Plant Desc", &["Plant A "]),
        text("Supplier Desc", &["Acme Films"]),
        text("Pepsi Item Desc", &["Shrink film"]),
    ])
    .unwrap();
    SourceTable::new(SourceKind::Reference, data)
}

fn calendar_table() -> SourceTable {
    let data = DataFrame::new(vec![
        Series::new("DateSid".into(), &[20250106i64]).into_column(),
        text("CalendarDate", &["2025-01-06"]),
        Series::new("FiscalYear".into(), &[2025i64]).into_column(),
        text("FiscalPeriod", &["P01"]),
        Series::new("FiscalWeek".into(), &[1i64]).into_column(),
    ])
    .unwrap();
    SourceTable::new(SourceKind::Calendar, data)
}

fn run(main: SourceTable) -> DataFrame {
    let main = normalize_main(main).unwrap();
    let reference = normalize_reference(reference_table()).unwrap();
    let reconciled = reconcile(&main, &reference).unwrap();
    bind_calendar(&reconciled.data, &calendar_table()).unwrap().data
}

fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

#[test]
fn minimal_scenario_yields_two_rows() {
    let main = main_table(&["100"], &[week("01/06/25", &["1,200"]), week("01/13/25", &["600"])]);
    let out = run(main);

    assert_eq!(out.height(), 2);
    assert_eq!(floats(&out, "LF"), vec![Some(0.12), Some(0.06)]);
    assert_eq!(floats(&out, "LB"), vec![Some(0.24), Some(0.12)]);

    let periods: Vec<Option<&str>> = out
        .column("FiscalPeriod")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(periods, vec![Some("P01"), None]);
}

#[test]
fn whitespace_in_keys_does_not_prevent_a_match() {
    let out = run(main_table(&["100"], &[week("01/06/25", &["5"])]));
    let codes: Vec<Option<&str>> = out
        .column("Pepsi Item# (RMID#)")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(codes, vec![Some("100")]);
}

#[test]
fn zero_divisor_degrades_the_row_only() {
    let mut main = main_table(&["100", "200"], &[week("01/06/25", &["1,200", "800"])]);
    main.data
        .with_column(Series::new("IM/LF".into(), &[0.0, 8.0]))
        .unwrap();

    let main = normalize_main(main).unwrap();
    let reference = normalize_reference(reference_table()).unwrap();
    let reconciled = reconcile(&main, &reference).unwrap();

    assert_eq!(floats(&reconciled.data, "LF"), vec![None, Some(0.1)]);
    assert_eq!(floats(&reconciled.data, "LB"), vec![None, Some(0.2)]);
    assert_eq!(reconciled.conversions.total(), 1);
}

#[test]
fn no_pruned_or_dropped_column_survives() {
    let out = run(main_table(&["100"], &[week("01/06/25", &["5"])]));
    for name in out.get_column_names() {
        assert!(!PRUNED.contains(&name.as_str()), "{name} should be pruned");
        assert!(!DROPPED.contains(&name.as_str()), "{name} should be dropped");
        assert!(name.as_str() != "Supplier Desc" && name.as_str() != "Pepsi Item Desc");
    }
}

#[test]
fn final_column_order() {
    let out = run(main_table(&["100"], &[week("01/06/25", &["5"])]));
    let names: Vec<String> = out
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    insta::assert_snapshot!(names.join("\n"), @r"
    Item
    Plant Desc
    Safety Stock
    IM/LF
    LF/LB
    Pepsi Item# (RMID#)
    Week
    IM
    LF
    LB
    FiscalYear
    FiscalPeriod
    ");
}

proptest! {
    #[test]
    fn output_rows_equal_main_rows_times_weeks(rows in 1usize..12, weeks in 0usize..8) {
        let items: Vec<String> = (0..rows).map(|n| n.to_string()).collect();
        let item_refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let headers: Vec<String> = (0..weeks)
            .map(|w| format!("01/{:02}/25", w + 1))
            .collect();
        let values = vec!["7"; rows];
        let week_columns: Vec<(&str, &[&str])> = headers
            .iter()
            .map(|header| week(header, &values))
            .collect();

        let out = run(main_table(&item_refs, &week_columns));
        prop_assert_eq!(out.height(), rows * weeks);
    }
}
