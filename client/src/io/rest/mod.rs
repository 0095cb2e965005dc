pub mod api_client;
pub mod mappers;

pub use api_client::ApiClient;
