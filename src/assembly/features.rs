//! Derived calendar and season fields, and ordinal encodings of the ordered categories.

use crate::error::CarbonIntensityError;
use crate::types::intensity_index::IntensityIndex;
use crate::types::season::Season;
use chrono::NaiveDate;
use polars::prelude::*;

/// Calendar fields read from one `from` timestamp (`YYYY-MM-DDTHH:MMZ`).
///
/// Fields the timestamp is too short for, and a month outside `01`..`12` for the season, are
/// left as `None` rather than failing the row.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CalendarFields {
    year: Option<String>,
    month: Option<String>,
    year_month: Option<String>,
    date: Option<NaiveDate>,
    season: Option<Season>,
}

impl CalendarFields {
    pub(crate) fn from_timestamp(from: Option<&str>) -> Self {
        let Some(from) = from else {
            return Self::default();
        };
        let year = from.get(0..4).map(str::to_string);
        let month = from.get(5..7).map(str::to_string);
        let year_month = year
            .as_ref()
            .zip(month.as_ref())
            .map(|(y, m)| format!("{}{}", y, m));
        let date = from
            .get(0..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok());
        let season = month.as_deref().and_then(Season::from_month);
        Self {
            year,
            month,
            year_month,
            date,
            season,
        }
    }
}

/// Rank column paired with an intensity index column: `index` gives `index_rank`, a widened
/// `index_<regionId>` gives `index_rank_<regionId>`. `None` for every other column.
pub(crate) fn index_rank_column(name: &str) -> Option<String> {
    if name == "index" {
        return Some("index_rank".to_string());
    }
    let region = name.strip_prefix("index_")?;
    region
        .parse::<i64>()
        .ok()
        .map(|_| format!("index_rank_{}", region))
}

/// Appends `year`, `month`, `yearMonth`, `date`, `season` and `season_rank` computed from the
/// `from` column, plus a rank column for every intensity index column: `index_rank` for
/// `index`, and `index_rank_13` for the widened `index_13`.
///
/// Ranks are the zero-based position of the label in [`Season::LEVELS`] /
/// [`IntensityIndex::LEVELS`], so ordering by rank follows the declared level order. Labels the
/// level list does not know get a null rank.
///
/// # Errors
///
/// [`CarbonIntensityError::ColumnNotFound`] when there is no `from` column; a polars error if a
/// derived column name is already taken.
///
/// # Examples
///
/// ```
/// use carbon_intensity::derive_features;
/// use polars::prelude::*;
///
/// let frame = df!(
///     "from" => ["2023-07-14T10:00Z"],
///     "index" => ["low"],
/// ).unwrap();
/// let derived = derive_features(frame).unwrap();
///
/// assert_eq!(derived.column("yearMonth").unwrap().str().unwrap().get(0), Some("202307"));
/// assert_eq!(derived.column("season").unwrap().str().unwrap().get(0), Some("summer"));
/// assert_eq!(derived.column("index_rank").unwrap().u32().unwrap().get(0), Some(3));
/// ```
pub fn derive_features(frame: DataFrame) -> Result<DataFrame, CarbonIntensityError> {
    let fields: Vec<CalendarFields> = frame
        .column("from")
        .map_err(|e| CarbonIntensityError::ColumnNotFound("from".to_string(), e))?
        .str()?
        .into_iter()
        .map(CalendarFields::from_timestamp)
        .collect();

    let mut derived = vec![
        Column::new(
            "year".into(),
            fields.iter().map(|f| f.year.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "month".into(),
            fields.iter().map(|f| f.month.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "yearMonth".into(),
            fields.iter().map(|f| f.year_month.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "date".into(),
            fields.iter().map(|f| f.date).collect::<Vec<_>>(),
        ),
        Column::new(
            "season".into(),
            fields
                .iter()
                .map(|f| f.season.map(|s| s.as_str()))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "season_rank".into(),
            fields
                .iter()
                .map(|f| f.season.map(|s| s.rank()))
                .collect::<Vec<_>>(),
        ),
    ];

    for column in frame.get_columns() {
        let Some(rank_name) = index_rank_column(column.name().as_str()) else {
            continue;
        };
        let ranks: Vec<Option<u32>> = column
            .str()?
            .into_iter()
            .map(|label| label.and_then(IntensityIndex::from_label).map(|i| i.rank()))
            .collect();
        derived.push(Column::new(rank_name.into(), ranks));
    }

    Ok(frame.hstack(&derived)?)
}
