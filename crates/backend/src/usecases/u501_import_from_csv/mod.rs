pub mod batch_controller;
pub mod csv_parser;
pub mod executor;
pub mod progress_tracker;
pub mod reporter;
pub mod row_mapper;
pub mod submitter;

pub use executor::ImportExecutor;
pub use progress_tracker::ProgressTracker;
