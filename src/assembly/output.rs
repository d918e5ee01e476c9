//! Output packager: bundles the wide dataset, the long dataset, or both.

use crate::assembly::plan::OutputShape;
use crate::error::CarbonIntensityError;
use crate::types::dataset_frames::long_frame::LongFrame;
use crate::types::dataset_frames::wide_frame::WideFrame;
use polars::prelude::*;

/// The result of a run. Which variant comes back is fixed by the request mode: `Long` only
/// when no wide source was selected, `Wide` only when the long dataset was not asked for.
#[derive(Debug, Clone)]
pub enum Output {
    Wide(WideFrame),
    Long(LongFrame),
    Both { wide: WideFrame, long: LongFrame },
}

impl Output {
    pub fn shape(&self) -> OutputShape {
        match self {
            Output::Wide(_) => OutputShape::Wide,
            Output::Long(_) => OutputShape::Long,
            Output::Both { .. } => OutputShape::Both,
        }
    }

    pub fn wide(&self) -> Option<&WideFrame> {
        match self {
            Output::Wide(wide) | Output::Both { wide, .. } => Some(wide),
            Output::Long(_) => None,
        }
    }

    pub fn long(&self) -> Option<&LongFrame> {
        match self {
            Output::Long(long) | Output::Both { long, .. } => Some(long),
            Output::Wide(_) => None,
        }
    }

    /// Splits the bundle back into its datasets.
    pub fn into_parts(self) -> (Option<WideFrame>, Option<LongFrame>) {
        match self {
            Output::Wide(wide) => (Some(wide), None),
            Output::Long(long) => (None, Some(long)),
            Output::Both { wide, long } => (Some(wide), Some(long)),
        }
    }

    /// Stacks same-shaped outputs row-wise: wide with wide, long with long.
    ///
    /// Columns are aligned by name; a column missing from one part (e.g. a fuel one month does
    /// not report) is filled with nulls.
    ///
    /// # Errors
    ///
    /// [`CarbonIntensityError::DegenerateMode`] for an empty list; a polars error if the parts
    /// cannot be aligned.
    pub fn concat(outputs: Vec<Output>) -> Result<Output, CarbonIntensityError> {
        let mut wides = Vec::new();
        let mut longs = Vec::new();
        for output in outputs {
            let (wide, long) = output.into_parts();
            wides.extend(wide.map(|w| w.frame.lazy()));
            longs.extend(long.map(|l| l.frame.lazy()));
        }
        let stack = |frames: Vec<LazyFrame>| -> Result<Option<DataFrame>, CarbonIntensityError> {
            if frames.is_empty() {
                return Ok(None);
            }
            Ok(Some(concat_lf_diagonal(frames, UnionArgs::default())?.collect()?))
        };
        package(stack(wides)?, stack(longs)?)
    }
}

/// Bundles whichever datasets a run produced.
///
/// # Errors
///
/// [`CarbonIntensityError::DegenerateMode`] when neither dataset is present.
pub fn package(
    wide: Option<DataFrame>,
    long: Option<DataFrame>,
) -> Result<Output, CarbonIntensityError> {
    match (wide, long) {
        (Some(wide), Some(long)) => Ok(Output::Both {
            wide: WideFrame::new(wide),
            long: LongFrame::new(long),
        }),
        (Some(wide), None) => Ok(Output::Wide(WideFrame::new(wide))),
        (None, Some(long)) => Ok(Output::Long(LongFrame::new(long))),
        (None, None) => Err(CarbonIntensityError::DegenerateMode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::column_names;

    fn frame(from: &[&str], measure: &str) -> DataFrame {
        DataFrame::new(vec![
            Column::new("from".into(), from),
            Column::new(measure.into(), vec![1.0; from.len()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_package_shapes() -> Result<(), CarbonIntensityError> {
        let both = package(Some(frame(&["a"], "x")), Some(frame(&["a"], "y")))?;
        assert_eq!(both.shape(), OutputShape::Both);
        assert!(both.wide().is_some() && both.long().is_some());

        let wide = package(Some(frame(&["a"], "x")), None)?;
        assert_eq!(wide.shape(), OutputShape::Wide);
        assert!(wide.long().is_none());

        let long = package(None, Some(frame(&["a"], "y")))?;
        assert_eq!(long.shape(), OutputShape::Long);
        assert!(long.wide().is_none());

        assert!(matches!(
            package(None, None),
            Err(CarbonIntensityError::DegenerateMode)
        ));
        Ok(())
    }

    #[test]
    fn test_into_parts_returns_what_was_packaged() -> Result<(), CarbonIntensityError> {
        let wide = frame(&["a", "b"], "x");
        let long = frame(&["a", "a", "b"], "y");
        let (unpacked_wide, unpacked_long) =
            package(Some(wide.clone()), Some(long.clone()))?.into_parts();

        assert!(unpacked_wide.unwrap().frame.equals(&wide));
        assert!(unpacked_long.unwrap().frame.equals(&long));
        Ok(())
    }

    #[test]
    fn test_concat_aligns_columns_by_name() -> Result<(), CarbonIntensityError> {
        let january = package(Some(frame(&["2024-01-01T00:00Z"], "gas")), None)?;
        let february = package(Some(frame(&["2024-02-01T00:00Z"], "wind")), None)?;
        let stacked = Output::concat(vec![january, february])?;

        let wide = stacked.wide().unwrap();
        assert_eq!(column_names(&wide.frame), ["from", "gas", "wind"]);
        let gas: Vec<Option<f64>> = wide.frame.column("gas")?.f64()?.into_iter().collect();
        assert_eq!(gas, [Some(1.0), None]);
        Ok(())
    }
}
