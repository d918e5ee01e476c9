//! Mode resolution: turns the four request flags into an explicit [`Plan`].

use crate::types::endpoint::Endpoint;
use crate::types::request_mode::RequestMode;

/// A dataset that can take part in the wide join, declared in join precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WideSource {
    Intensity,
    Generation,
    RegionalWide,
}

impl WideSource {
    pub const ALL: [WideSource; 3] = [
        WideSource::Intensity,
        WideSource::Generation,
        WideSource::RegionalWide,
    ];

    /// The endpoint whose response feeds this source.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            WideSource::Intensity => Endpoint::Intensity,
            WideSource::Generation => Endpoint::Generation,
            WideSource::RegionalWide => Endpoint::Regional,
        }
    }
}

/// Which datasets a run hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputShape {
    Wide,
    Long,
    Both,
}

/// What a run fetches and how it combines the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Endpoints to fetch, each at most once, in [`Endpoint::ALL`] order.
    pub fetch: Vec<Endpoint>,
    /// Sources joined into the wide dataset, in precedence order. Empty means no wide output.
    pub wide_sources: Vec<WideSource>,
    /// Whether the regional long records are pivoted into per-region columns.
    pub widen_regional: bool,
    /// Whether the regional long records are returned as their own dataset.
    pub long: bool,
}

impl Plan {
    pub fn fetches(&self, endpoint: Endpoint) -> bool {
        self.fetch.contains(&endpoint)
    }

    pub fn joins(&self, source: WideSource) -> bool {
        self.wide_sources.contains(&source)
    }

    pub fn shape(&self) -> OutputShape {
        match (self.wide_sources.is_empty(), self.long) {
            (false, true) => OutputShape::Both,
            (false, false) => OutputShape::Wide,
            (true, _) => OutputShape::Long,
        }
    }
}

/// Resolves a request mode into a plan; `None` for the degenerate all-false mode.
///
/// The regional endpoint is fetched once whenever either regional flag is set, and feeds both
/// the per-region wide columns and the long dataset.
///
/// # Examples
///
/// ```
/// use carbon_intensity::{resolve, Endpoint, OutputShape, RequestMode, WideSource};
///
/// let mode = RequestMode::builder().generation(true).regional_long(true).build();
/// let plan = resolve(mode).unwrap();
/// assert_eq!(plan.fetch, [Endpoint::Generation, Endpoint::Regional]);
/// assert_eq!(plan.wide_sources, [WideSource::Generation]);
/// assert!(!plan.widen_regional);
/// assert_eq!(plan.shape(), OutputShape::Both);
///
/// assert!(resolve(RequestMode::default()).is_none());
/// ```
pub fn resolve(mode: RequestMode) -> Option<Plan> {
    if mode.is_degenerate() {
        return None;
    }

    let wide_sources: Vec<WideSource> = WideSource::ALL
        .into_iter()
        .filter(|source| match source {
            WideSource::Intensity => mode.intensity,
            WideSource::Generation => mode.generation,
            WideSource::RegionalWide => mode.regional_wide,
        })
        .collect();

    let fetch = Endpoint::ALL
        .into_iter()
        .filter(|endpoint| {
            wide_sources.iter().any(|source| source.endpoint() == *endpoint)
                || (*endpoint == Endpoint::Regional && mode.regional_long)
        })
        .collect();

    Some(Plan {
        fetch,
        wide_sources,
        widen_regional: mode.regional_wide,
        long: mode.regional_long,
    })
}
