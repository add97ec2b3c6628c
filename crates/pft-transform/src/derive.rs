//! Unit conversion of the raw measure into linear feet and pounds.

use polars::prelude::*;

use pft_common::{any_to_f64, any_to_string};
use pft_model::schema::divisors::{IM_PER_LF, LF_PER_LB};
use pft_model::schema::long::{IM, LB, LF};
use pft_model::{ConversionError, ConversionReason, ConversionReport};

use crate::error::Result;

/// `LF = IM / IM/LF / 1000`.
///
/// Missing when `IM` or the divisor is missing, or the divisor is zero.
pub fn linear_feet(im: Option<f64>, im_per_lf: Option<f64>) -> Option<f64> {
    match (im, im_per_lf) {
        (Some(im), Some(divisor)) if divisor != 0.0 => Some(im / divisor / 1000.0),
        _ => None,
    }
}

/// `LB = LF * LF/LB`, missing when either operand is missing.
pub fn pounds(lf: Option<f64>, lf_per_lb: Option<f64>) -> Option<f64> {
    Some(lf? * lf_per_lb?)
}

/// Appends `LF` and `LB` computed row by row from `IM` and the row's own
/// divisor columns.
///
/// A missing result caused by a missing or zero divisor is recorded once
/// per affected cell. Rows whose `IM` is already missing are not recorded
/// again.
pub fn derive_measures(df: &mut DataFrame) -> Result<ConversionReport> {
    let mut conversions = ConversionReport::new();
    let im = df.column(IM)?.cast(&DataType::Float64)?;
    let im = im.f64()?;
    let im_per_lf = df.column(IM_PER_LF)?;
    let lf_per_lb = df.column(LF_PER_LB)?;

    let mut lf_values = Vec::with_capacity(df.height());
    let mut lb_values = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let measure = im.get(row);
        let im_divisor = im_per_lf.get(row)?;
        let lb_factor = lf_per_lb.get(row)?;

        let lf = linear_feet(measure, any_to_f64(im_divisor.clone()));
        if measure.is_some() && lf.is_none() {
            conversions.record(ConversionError {
                column: LF.to_string(),
                row,
                value: any_to_string(im_divisor),
                reason: ConversionReason::MissingDivisor,
            });
        }
        let lb = pounds(lf, any_to_f64(lb_factor.clone()));
        if lf.is_some() && lb.is_none() {
            conversions.record(ConversionError {
                column: LB.to_string(),
                row,
                value: any_to_string(lb_factor),
                reason: ConversionReason::MissingDivisor,
            });
        }
        lf_values.push(lf);
        lb_values.push(lb);
    }

    df.with_column(Series::new(LF.into(), lf_values))?;
    df.with_column(Series::new(LB.into(), lb_values))?;
    Ok(conversions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(im: &[Option<f64>], im_per_lf: &[Option<&str>], lf_per_lb: &[Option<f64>]) -> DataFrame {
        DataFrame::new(vec![
            Series::new(IM.into(), im).into_column(),
            Series::new(IM_PER_LF.into(), im_per_lf).into_column(),
            Series::new(LF_PER_LB.into(), lf_per_lb).into_column(),
        ])
        .unwrap()
    }

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn formulas_match_reference_values() {
        assert_eq!(linear_feet(Some(1200.0), Some(10.0)), Some(0.12));
        assert_eq!(pounds(Some(0.12), Some(2.0)), Some(0.24));
    }

    #[test]
    fn zero_or_missing_divisor_gives_missing_lf() {
        assert_eq!(linear_feet(Some(1200.0), Some(0.0)), None);
        assert_eq!(linear_feet(Some(1200.0), None), None);
        assert_eq!(linear_feet(None, Some(10.0)), None);
        assert_eq!(pounds(None, Some(2.0)), None);
        assert_eq!(pounds(Some(0.12), None), None);
        assert_eq!(pounds(Some(0.12), Some(0.0)), Some(0.0));
    }

    #[test]
    fn derives_per_row_with_text_divisors() {
        let mut df = long(
            &[Some(1200.0), Some(500.0), None],
            &[Some("10"), Some("0"), Some("10")],
            &[Some(2.0), Some(2.0), Some(2.0)],
        );
        let report = derive_measures(&mut df).unwrap();

        assert_eq!(floats(&df, LF), vec![Some(0.12), None, None]);
        assert_eq!(floats(&df, LB), vec![Some(0.24), None, None]);
        assert_eq!(report.count(LF, ConversionReason::MissingDivisor), 1);
        assert_eq!(report.count(LB, ConversionReason::MissingDivisor), 0);
    }

    #[test]
    fn missing_lb_factor_is_recorded() {
        let mut df = long(&[Some(1000.0)], &[Some("1")], &[None]);
        let report = derive_measures(&mut df).unwrap();

        assert_eq!(floats(&df, LF), vec![Some(1.0)]);
        assert_eq!(floats(&df, LB), vec![None]);
        assert_eq!(report.count(LB, ConversionReason::MissingDivisor), 1);
    }
}
