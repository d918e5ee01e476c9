//! Defines the `IntensityIndex` enum, the ordered severity label reported next to every
//! carbon intensity forecast.

use crate::error::UnknownLevelError;
use std::fmt;
use std::str::FromStr;

/// Severity band of a carbon intensity reading, as reported in the `index` field of the API.
///
/// Variants are declared from most to least severe and the derived ordering follows that
/// declaration, so `VeryHigh < High < Moderate < Low < VeryLow`. The same order is used for the
/// `index_rank` column added by the feature deriver.
///
/// # Examples
///
/// ```rust
/// use carbon_intensity::IntensityIndex;
///
/// let index: IntensityIndex = "very high".parse().unwrap();
/// assert_eq!(index, IntensityIndex::VeryHigh);
/// assert!(IntensityIndex::VeryHigh < IntensityIndex::High);
/// assert_eq!(IntensityIndex::Moderate.rank(), 2);
/// assert!("extreme".parse::<IntensityIndex>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntensityIndex {
    VeryHigh,
    High,
    Moderate,
    Low,
    VeryLow,
}

impl IntensityIndex {
    /// All levels in declared (severity descending) order.
    pub const LEVELS: [IntensityIndex; 5] = [
        IntensityIndex::VeryHigh,
        IntensityIndex::High,
        IntensityIndex::Moderate,
        IntensityIndex::Low,
        IntensityIndex::VeryLow,
    ];

    /// The label used by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityIndex::VeryHigh => "very high",
            IntensityIndex::High => "high",
            IntensityIndex::Moderate => "moderate",
            IntensityIndex::Low => "low",
            IntensityIndex::VeryLow => "very low",
        }
    }

    /// Zero-based position in [`IntensityIndex::LEVELS`].
    pub fn rank(&self) -> u32 {
        *self as u32
    }

    /// Looks up a label, returning `None` for anything the API does not define.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::LEVELS.into_iter().find(|level| level.as_str() == label)
    }
}

impl FromStr for IntensityIndex {
    type Err = UnknownLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownLevelError {
            kind: "intensity index",
            label: s.to_string(),
        })
    }
}

impl fmt::Display for IntensityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
