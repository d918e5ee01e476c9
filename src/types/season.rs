//! Defines the `Season` enum and the fixed month to season mapping.

use crate::error::UnknownLevelError;
use std::fmt;
use std::str::FromStr;

/// Meteorological season of a reading, derived from the month of its `from` timestamp.
///
/// The derived ordering follows declaration order: `Spring < Summer < Fall < Winter`.
///
/// # Examples
///
/// ```rust
/// use carbon_intensity::Season;
///
/// assert_eq!(Season::from_month("05"), Some(Season::Spring));
/// assert_eq!(Season::from_month("12"), Some(Season::Fall));
/// assert_eq!(Season::from_month("13"), None);
/// assert!(Season::Spring < Season::Summer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const LEVELS: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }

    /// Zero-based position in [`Season::LEVELS`].
    pub fn rank(&self) -> u32 {
        *self as u32
    }

    /// Maps a month number (`1..=12`) to its season; `None` for anything else.
    pub fn from_month_number(month: u32) -> Option<Self> {
        match month {
            4..=6 => Some(Season::Spring),
            7..=9 => Some(Season::Summer),
            10..=12 => Some(Season::Fall),
            1..=3 => Some(Season::Winter),
            _ => None,
        }
    }

    /// Maps a two-digit month literal (`"01"`..`"12"`) to its season.
    pub fn from_month(month: &str) -> Option<Self> {
        if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        month.parse().ok().and_then(Self::from_month_number)
    }
}

impl FromStr for Season {
    type Err = UnknownLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::LEVELS
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| UnknownLevelError {
                kind: "season",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_total_over_month_literals() {
        let expected = [
            ("01", Season::Winter),
            ("02", Season::Winter),
            ("03", Season::Winter),
            ("04", Season::Spring),
            ("05", Season::Spring),
            ("06", Season::Spring),
            ("07", Season::Summer),
            ("08", Season::Summer),
            ("09", Season::Summer),
            ("10", Season::Fall),
            ("11", Season::Fall),
            ("12", Season::Fall),
        ];
        for (month, season) in expected {
            assert_eq!(Season::from_month(month), Some(season), "month {}", month);
        }
    }

    #[test]
    fn test_out_of_range_months_are_undefined() {
        for month in ["00", "13", "1", "ab", "", "012"] {
            assert_eq!(Season::from_month(month), None, "month {:?}", month);
        }
    }

    #[test]
    fn test_ordering_and_ranks() {
        assert!(Season::Spring < Season::Summer);
        assert!(Season::Summer < Season::Fall);
        assert!(Season::Fall < Season::Winter);
        assert_eq!(Season::Winter.rank(), 3);
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Fall);
        assert!("autumn".parse::<Season>().is_err());
    }
}
