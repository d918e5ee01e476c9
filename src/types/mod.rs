pub mod calendar;
pub mod dataset_frames;
pub mod endpoint;
pub mod intensity_index;
pub mod request_mode;
pub mod season;
pub mod time_window;
