pub mod api_client;
pub mod responses;

pub use api_client::{APIClient, ClientError};
