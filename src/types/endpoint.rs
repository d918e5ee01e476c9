//! Defines the three related Carbon Intensity API endpoints the crate reads from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three endpoints of the Carbon Intensity API queried for a time window.
///
/// All three are keyed by the same half-hour `(from, to)` periods, which is what allows their
/// normalized frames to be joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// National carbon intensity: forecast, actual and severity index per half hour.
    Intensity,
    /// National generation mix: percentage share per fuel source per half hour.
    Generation,
    /// Regional intensity and generation mix for each of the 18 regions per half hour.
    Regional,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::Intensity, Endpoint::Generation, Endpoint::Regional];

    /// The URL path segment placed before the `{from}/{to}` part of the request.
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            Endpoint::Intensity => "intensity",
            Endpoint::Generation => "generation",
            Endpoint::Regional => "regional/intensity",
        }
    }
}

/// Formats an `Endpoint` by name.
///
/// # Examples
///
/// ```
/// use carbon_intensity::Endpoint;
///
/// assert_eq!(Endpoint::Regional.to_string(), "regional");
/// assert_eq!(format!("{}", Endpoint::Generation), "generation");
/// ```
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Intensity => "intensity",
            Endpoint::Generation => "generation",
            Endpoint::Regional => "regional",
        };
        write!(f, "{}", name)
    }
}
