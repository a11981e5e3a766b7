pub mod catalog_api_client;
pub mod queries;

pub use catalog_api_client::CatalogApiClient;
