pub mod catalog;
pub mod config;
pub mod format;
pub mod graphql;
