//! Defines `RequestMode`, the four independent dataset selection flags of a request.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Selects which datasets a request produces.
///
/// The three wide flags (`intensity`, `generation`, `regional_wide`) decide which sources are
/// joined into the wide output; `regional_long` independently asks for the per-region long
/// output. Both regional flags are served from a single fetch of the regional endpoint.
///
/// All flags default to `false`; the all-false mode is degenerate and rejected by
/// [`crate::CarbonIntensity::run`].
///
/// # Examples
///
/// ```
/// use carbon_intensity::RequestMode;
///
/// let mode = RequestMode::builder().intensity(true).regional_long(true).build();
/// assert!(mode.intensity && mode.regional_long);
/// assert!(!mode.generation && !mode.regional_wide);
/// assert!(RequestMode::default().is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Builder)]
pub struct RequestMode {
    #[builder(default)]
    pub intensity: bool,
    #[builder(default)]
    pub generation: bool,
    #[builder(default)]
    pub regional_wide: bool,
    #[builder(default)]
    pub regional_long: bool,
}

impl RequestMode {
    /// True when no flag is set.
    pub fn is_degenerate(&self) -> bool {
        !(self.intensity || self.generation || self.regional_wide || self.regional_long)
    }

    /// Every one of the 16 flag combinations, degenerate one first.
    pub fn all() -> Vec<RequestMode> {
        (0u8..16)
            .map(|bits| RequestMode {
                intensity: bits & 0b0001 != 0,
                generation: bits & 0b0010 != 0,
                regional_wide: bits & 0b0100 != 0,
                regional_long: bits & 0b1000 != 0,
            })
            .collect()
    }
}
