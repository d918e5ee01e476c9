use crate::assembly::features::index_rank_column;
use crate::types::intensity_index::IntensityIndex;
use crate::types::season::Season;
use crate::types::time_window::TimeWindow;
use polars::prelude::{col, lit, LazyFrame, SortMultipleOptions};

pub trait CarbonFrameFilterExt {
    /// Keeps periods whose `from` lies inside the window (`from` inclusive, `to` exclusive).
    /// Assumes the 'from' column holds `YYYY-MM-DDTHH:MMZ` strings, which sort chronologically.
    fn filter_period(self, window: &TimeWindow) -> LazyFrame;

    /// Keeps rows whose intensity index is at least as severe as `level`, e.g. `High` keeps
    /// `very high` and `high` rows.
    /// Assumes the 'index_rank' column added by [`crate::derive_features`].
    fn filter_index_at_least(self, level: IntensityIndex) -> LazyFrame;

    /// Keeps rows of one season.
    /// Assumes the 'season_rank' column added by [`crate::derive_features`].
    fn filter_season(self, season: Season) -> LazyFrame;

    /// Sorts rows by an intensity index column in severity order, `very high` first and
    /// missing labels last, e.g. `sort_by_index("index")` or `sort_by_index("index_13")`.
    /// Assumes the matching rank column added by [`crate::derive_features`].
    fn sort_by_index(self, index_column: &str) -> LazyFrame;
}

impl CarbonFrameFilterExt for LazyFrame {
    fn filter_period(self, window: &TimeWindow) -> LazyFrame {
        self.filter(
            col("from")
                .gt_eq(lit(window.from_param()))
                .and(col("from").lt(lit(window.to_param()))),
        )
    }

    fn filter_index_at_least(self, level: IntensityIndex) -> LazyFrame {
        // Lower rank means more severe.
        self.filter(col("index_rank").lt_eq(lit(level.rank())))
    }

    fn filter_season(self, season: Season) -> LazyFrame {
        self.filter(col("season_rank").eq(lit(season.rank())))
    }

    fn sort_by_index(self, index_column: &str) -> LazyFrame {
        let rank = index_rank_column(index_column)
            .unwrap_or_else(|| format!("{}_rank", index_column));
        self.sort_by_exprs(
            [col(rank.as_str())],
            SortMultipleOptions::default()
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::features::derive_features;
    use crate::error::CarbonIntensityError;
    use polars::prelude::*;

    fn sample() -> Result<LazyFrame, CarbonIntensityError> {
        let frame = df!(
            "from" => [
                "2023-03-31T23:30Z",
                "2023-04-01T00:00Z",
                "2023-04-01T00:30Z",
                "2023-07-01T00:00Z",
            ],
            "index" => ["low", "very high", "moderate", "high"],
        )?;
        Ok(derive_features(frame)?.lazy())
    }

    #[test]
    fn test_filter_period() -> Result<(), CarbonIntensityError> {
        let window = TimeWindow::parse("2023-04-01T00:00Z", "2023-04-01T00:30Z")?;
        let frame = sample()?.filter_period(&window).collect()?;
        let from: Vec<Option<&str>> = frame.column("from")?.str()?.into_iter().collect();
        assert_eq!(from, [Some("2023-04-01T00:00Z")]);
        Ok(())
    }

    #[test]
    fn test_filter_index_at_least() -> Result<(), CarbonIntensityError> {
        let frame = sample()?
            .filter_index_at_least(IntensityIndex::High)
            .collect()?;
        let index: Vec<Option<&str>> = frame.column("index")?.str()?.into_iter().collect();
        assert_eq!(index, [Some("very high"), Some("high")]);

        let everything = sample()?
            .filter_index_at_least(IntensityIndex::VeryLow)
            .collect()?;
        assert_eq!(everything.height(), 4);
        Ok(())
    }

    #[test]
    fn test_filter_season() -> Result<(), CarbonIntensityError> {
        let spring = sample()?.filter_season(Season::Spring).collect()?;
        assert_eq!(spring.height(), 2);
        let winter = sample()?.filter_season(Season::Winter).collect()?;
        assert_eq!(winter.height(), 1);
        Ok(())
    }

    #[test]
    fn test_sort_by_season_rank_follows_declared_order() -> Result<(), CarbonIntensityError> {
        let sorted = sample()?
            .sort_by_exprs([col("season_rank")], SortMultipleOptions::default())
            .collect()?;
        let season: Vec<Option<&str>> = sorted.column("season")?.str()?.into_iter().collect();
        assert_eq!(
            season,
            [Some("spring"), Some("spring"), Some("summer"), Some("winter")]
        );
        Ok(())
    }

    #[test]
    fn test_sort_by_index_follows_severity_not_spelling() -> Result<(), CarbonIntensityError> {
        let sorted = sample()?.sort_by_index("index").collect()?;
        let index: Vec<Option<&str>> = sorted.column("index")?.str()?.into_iter().collect();
        assert_eq!(
            index,
            [Some("very high"), Some("high"), Some("moderate"), Some("low")]
        );
        Ok(())
    }
}
