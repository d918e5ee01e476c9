mod assembly;
mod carbon_intensity;
mod error;
mod filtering;
mod grid_data;
mod normalize;
mod types;

#[cfg(test)]
mod test_support;

pub use carbon_intensity::*;
pub use error::{CarbonIntensityError, UnknownLevelError};
pub use filtering::CarbonFrameFilterExt;

pub use grid_data::data_loader::{HttpFetcher, DEFAULT_BASE_URL};
pub use grid_data::error::FetchError;
pub use grid_data::fetcher::EndpointFetcher;

pub use normalize::error::MalformedResponseError;
pub use normalize::normalize;

pub use assembly::assembler::{assemble, join_on_period, WideInputs};
pub use assembly::features::derive_features;
pub use assembly::output::{package, Output};
pub use assembly::plan::{resolve, OutputShape, Plan, WideSource};
pub use assembly::widen::widen;

pub use types::calendar::{Month, Year};
pub use types::dataset_frames::long_frame::LongFrame;
pub use types::dataset_frames::wide_frame::WideFrame;
pub use types::endpoint::Endpoint;
pub use types::intensity_index::IntensityIndex;
pub use types::request_mode::RequestMode;
pub use types::season::Season;
pub use types::time_window::TimeWindow;
