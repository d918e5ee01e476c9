//! Pivots regional long records (one row per period and region) into one row per period with
//! `measure_regionId` columns.

use crate::assembly::assembler::{full_join_on_period, PERIOD_KEY};
use crate::error::CarbonIntensityError;
use log::debug;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Columns of the long frame that are not pivoted into per-region measures.
const NON_MEASURE_COLUMNS: [&str; 4] = ["from", "to", "regionid", "shortname"];

/// Measures of a regional long frame: everything except the key and the region name.
pub(crate) fn measure_columns(long: &DataFrame) -> Vec<String> {
    long.get_column_names()
        .into_iter()
        .filter(|name| !NON_MEASURE_COLUMNS.contains(&name.as_str()))
        .map(|name| name.to_string())
        .collect()
}

/// Widens the regional long frame.
///
/// Output columns are `from, to`, then for each measure (`forecast`, `index` and every fuel, in
/// long-frame order) one column per region, regions in ascending id order:
/// `forecast_1, forecast_2, ..., index_1, ...`. There is one row per distinct `(from, to)`,
/// sorted. A region missing from a period leaves nulls in that period's row.
///
/// # Errors
///
/// [`CarbonIntensityError::ColumnNotFound`] if the frame has no `regionid` column.
pub fn widen(long: &DataFrame) -> Result<DataFrame, CarbonIntensityError> {
    let region_column = long
        .column("regionid")
        .map_err(|e| CarbonIntensityError::ColumnNotFound("regionid".to_string(), e))?;
    let regions: BTreeSet<i64> = region_column.i64()?.into_iter().flatten().collect();
    let measures = measure_columns(long);

    let key: Vec<Expr> = PERIOD_KEY.into_iter().map(col).collect();
    let slices = regions.iter().map(|region| {
        let mut columns = key.clone();
        columns.extend(
            measures
                .iter()
                .map(|measure| col(measure.as_str()).alias(format!("{}_{}", measure, region))),
        );
        long.clone()
            .lazy()
            .filter(col("regionid").eq(lit(*region)))
            .select(columns)
    });

    let Some(joined) = slices.reduce(full_join_on_period) else {
        // No regions at all: keep the key columns so the result still joins.
        return Ok(long.select(PERIOD_KEY)?.head(Some(0)));
    };

    let mut ordered = key.clone();
    for measure in &measures {
        ordered.extend(
            regions
                .iter()
                .map(|region| col(format!("{}_{}", measure, region).as_str())),
        );
    }

    let wide = joined
        .select(ordered)
        .sort_by_exprs(key, SortMultipleOptions::default())
        .collect()?;
    debug!(
        "Widened {} regional rows over {} regions into {:?} frame",
        long.height(),
        regions.len(),
        wide.shape()
    );
    Ok(wide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::test_support::{
        column_names, regional_document, regional_document_with, regional_forecast,
        regional_index, regional_share, FUELS, TWO_PERIODS,
    };
    use crate::types::endpoint::Endpoint;
    use serde_json::json;

    #[test]
    fn test_widen_shape_matches_periods_and_regions() -> Result<(), CarbonIntensityError> {
        let regions = [(1, "North Scotland"), (2, "South Scotland"), (18, "GB")];
        let long = normalize(
            Endpoint::Regional,
            &regional_document(&TWO_PERIODS, &regions),
        )?;
        let wide = widen(&long)?;

        let measures = 2 + FUELS.len();
        assert_eq!(wide.height(), 2);
        assert_eq!(wide.width(), 2 + measures * regions.len());

        let names = column_names(&wide);
        assert_eq!(
            &names[..8],
            ["from", "to", "forecast_1", "forecast_2", "forecast_18", "index_1", "index_2", "index_18"]
        );
        assert_eq!(names.last().map(String::as_str), Some("wind_18"));
        Ok(())
    }

    #[test]
    fn test_widen_values_follow_input() -> Result<(), CarbonIntensityError> {
        let long = normalize(
            Endpoint::Regional,
            &regional_document(&TWO_PERIODS, &[(5, "Yorkshire"), (9, "East Midlands")]),
        )?;
        let wide = widen(&long)?;

        for (period, region) in [(0usize, 5i64), (1, 5), (0, 9), (1, 9)] {
            let forecast = wide.column(&format!("forecast_{}", region))?.f64()?.get(period);
            assert_eq!(forecast, Some(regional_forecast(period, region)));
            let index = wide.column(&format!("index_{}", region))?.str()?.get(period);
            assert_eq!(index, Some(regional_index(region)));
            let gas = wide.column(&format!("gas_{}", region))?.f64()?.get(period);
            assert_eq!(gas, Some(regional_share(period, region, 3)));
        }
        Ok(())
    }

    #[test]
    fn test_widen_tolerates_region_missing_from_a_period() -> Result<(), CarbonIntensityError> {
        let mut document = regional_document_with(
            &TWO_PERIODS,
            &[(1, "North Scotland"), (2, "South Scotland")],
            &["gas", "wind"],
        );
        // Drop region 2 from the second period.
        if let Some(regions) = document["data"][1]["regions"].as_array_mut() {
            regions.truncate(1);
        }
        let long = normalize(Endpoint::Regional, &document)?;
        let wide = widen(&long)?;

        assert_eq!(wide.shape(), (2, 2 + 4 * 2));
        let forecast: Vec<Option<f64>> = wide.column("forecast_2")?.f64()?.into_iter().collect();
        assert_eq!(forecast, [Some(regional_forecast(0, 2)), None]);
        Ok(())
    }

    #[test]
    fn test_widen_empty_frame_keeps_key() -> Result<(), CarbonIntensityError> {
        let long = normalize(Endpoint::Regional, &json!({"data": []}))?;
        let wide = widen(&long)?;
        assert_eq!(column_names(&wide), ["from", "to"]);
        assert_eq!(wide.height(), 0);
        Ok(())
    }

    #[test]
    fn test_widen_requires_region_column() {
        let frame = DataFrame::new(vec![Column::new("from".into(), ["a"])]).unwrap();
        assert!(matches!(
            widen(&frame),
            Err(CarbonIntensityError::ColumnNotFound(name, _)) if name == "regionid"
        ));
    }
}
