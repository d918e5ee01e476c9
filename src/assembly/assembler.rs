//! Full outer joins of the selected national and regional-wide frames on the half-hour period.

use crate::assembly::plan::WideSource;
use crate::error::CarbonIntensityError;
use log::debug;
use polars::prelude::*;
use std::collections::HashSet;

/// The frames that may take part in the wide join. `None` means not selected.
#[derive(Debug, Clone, Default)]
pub struct WideInputs {
    pub intensity: Option<DataFrame>,
    pub generation: Option<DataFrame>,
    pub regional_wide: Option<DataFrame>,
}

impl WideInputs {
    /// Selected frames in precedence order: intensity, generation, regional wide.
    fn into_ordered(self) -> Vec<(WideSource, DataFrame)> {
        [
            (WideSource::Intensity, self.intensity),
            (WideSource::Generation, self.generation),
            (WideSource::RegionalWide, self.regional_wide),
        ]
        .into_iter()
        .filter_map(|(source, frame)| frame.map(|frame| (source, frame)))
        .collect()
    }
}

/// Columns identifying a half-hour period in every frame.
pub(crate) const PERIOD_KEY: [&str; 2] = ["from", "to"];

fn period_key() -> [Expr; 2] {
    PERIOD_KEY.map(col)
}

/// Full outer join on `(from, to)` with the key columns coalesced, so a period present on only
/// one side keeps its key and gets nulls in the other side's columns.
pub(crate) fn full_join_on_period(left: LazyFrame, right: LazyFrame) -> LazyFrame {
    left.join(
        right,
        period_key(),
        period_key(),
        JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
    )
}

/// Joins two period-keyed frames, rows sorted by `(from, to)`.
///
/// # Errors
///
/// [`CarbonIntensityError::ColumnCollision`] if both frames carry the same non-key column.
pub fn join_on_period(left: &DataFrame, right: &DataFrame) -> Result<DataFrame, CarbonIntensityError> {
    check_collisions([left, right])?;
    Ok(full_join_on_period(left.clone().lazy(), right.clone().lazy())
        .sort_by_exprs(period_key(), SortMultipleOptions::default())
        .collect()?)
}

fn check_collisions<'a>(
    frames: impl IntoIterator<Item = &'a DataFrame>,
) -> Result<(), CarbonIntensityError> {
    let mut owned = HashSet::new();
    for frame in frames {
        for name in frame.get_column_names() {
            if PERIOD_KEY.contains(&name.as_str()) {
                continue;
            }
            if !owned.insert(name.to_string()) {
                return Err(CarbonIntensityError::ColumnCollision {
                    column: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Chains full outer joins across the selected frames, left to right in precedence order.
///
/// The result holds the union of all input periods, sorted by `(from, to)`. Its columns are
/// `from, to` followed by each input's own columns in precedence order. Returns `None` when
/// nothing is selected.
///
/// # Errors
///
/// [`CarbonIntensityError::ColumnCollision`] if two inputs share a non-key column, or a
/// polars error if an input lacks the `from`/`to` columns.
pub fn assemble(inputs: WideInputs) -> Result<Option<DataFrame>, CarbonIntensityError> {
    let ordered = inputs.into_ordered();
    check_collisions(ordered.iter().map(|(_, frame)| frame))?;

    let sources: Vec<WideSource> = ordered.iter().map(|(source, _)| *source).collect();
    let joined = ordered
        .into_iter()
        .map(|(_, frame)| frame.lazy())
        .reduce(full_join_on_period);

    let Some(joined) = joined else {
        return Ok(None);
    };
    let frame = joined
        .sort_by_exprs(period_key(), SortMultipleOptions::default())
        .collect()?;
    debug!("Assembled {:?} into {:?} frame", sources, frame.shape());
    Ok(Some(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::widen::widen;
    use crate::normalize::normalize;
    use crate::types::endpoint::Endpoint;
    use crate::test_support::{
        column_names, generation_document, intensity_document, regional_document, TWO_PERIODS,
    };

    fn intensity_frame() -> DataFrame {
        normalize(
            Endpoint::Intensity,
            &intensity_document(&[
                ("2024-01-01T00:00Z", "2024-01-01T00:30Z", 200.0, Some(199.0), "high"),
                ("2024-01-01T00:30Z", "2024-01-01T01:00Z", 150.0, None, "moderate"),
            ]),
        )
        .unwrap()
    }

    fn generation_frame(periods: &[(&str, &str)]) -> DataFrame {
        normalize(Endpoint::Generation, &generation_document(periods)).unwrap()
    }

    fn regional_wide_frame() -> DataFrame {
        let long = normalize(
            Endpoint::Regional,
            &regional_document(&TWO_PERIODS, &[(3, "North West England"), (7, "South Wales")]),
        )
        .unwrap();
        widen(&long).unwrap()
    }

    #[test]
    fn test_assemble_nothing_selected() -> Result<(), CarbonIntensityError> {
        assert!(assemble(WideInputs::default())?.is_none());
        Ok(())
    }

    #[test]
    fn test_single_input_passes_through() -> Result<(), CarbonIntensityError> {
        let frame = assemble(WideInputs {
            intensity: Some(intensity_frame()),
            ..Default::default()
        })?
        .unwrap();
        assert!(frame.equals_missing(&intensity_frame()));
        Ok(())
    }

    #[test]
    fn test_outer_join_keeps_unmatched_periods() -> Result<(), CarbonIntensityError> {
        // Generation covers the second period and a third one intensity does not have.
        let generation = generation_frame(&[
            ("2024-01-01T00:30Z", "2024-01-01T01:00Z"),
            ("2024-01-01T01:00Z", "2024-01-01T01:30Z"),
        ]);
        let frame = assemble(WideInputs {
            intensity: Some(intensity_frame()),
            generation: Some(generation),
            ..Default::default()
        })?
        .unwrap();

        assert_eq!(frame.height(), 3);
        let names = column_names(&frame);
        assert_eq!(&names[..5], ["from", "to", "forecast", "actual", "index"]);
        assert_eq!(names[5], "biomass");

        let from: Vec<Option<&str>> = frame.column("from")?.str()?.into_iter().collect();
        assert_eq!(
            from,
            [
                Some("2024-01-01T00:00Z"),
                Some("2024-01-01T00:30Z"),
                Some("2024-01-01T01:00Z")
            ]
        );
        let forecast: Vec<Option<f64>> = frame.column("forecast")?.f64()?.into_iter().collect();
        assert_eq!(forecast, [Some(200.0), Some(150.0), None]);
        let gas: Vec<Option<f64>> = frame.column("gas")?.f64()?.into_iter().collect();
        assert_eq!(gas, [None, Some(30.0), Some(30.0)]);
        Ok(())
    }

    #[test]
    fn test_join_grouping_does_not_change_rows() -> Result<(), CarbonIntensityError> {
        let generation = generation_frame(&TWO_PERIODS);

        let all_at_once = assemble(WideInputs {
            intensity: Some(intensity_frame()),
            generation: Some(generation.clone()),
            regional_wide: Some(regional_wide_frame()),
        })?
        .unwrap();

        let national = assemble(WideInputs {
            intensity: Some(intensity_frame()),
            generation: Some(generation),
            ..Default::default()
        })?
        .unwrap();
        let stepwise = join_on_period(&national, &regional_wide_frame())?;

        assert_eq!(all_at_once.shape(), stepwise.shape());
        let stepwise = stepwise.select(column_names(&all_at_once))?;
        assert!(all_at_once.equals_missing(&stepwise));
        Ok(())
    }

    #[test]
    fn test_column_collision_is_rejected() {
        let err = join_on_period(&intensity_frame(), &intensity_frame()).unwrap_err();
        assert!(matches!(
            err,
            CarbonIntensityError::ColumnCollision { column } if column == "forecast"
        ));
    }
}
