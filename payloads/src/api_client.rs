use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::responses;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ClientError> {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            ));
        }
        Ok(response)
    }

    async fn get_body<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ClientError> {
        Ok(self.get(path).await?.json::<T>().await?)
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        self.get("health_check").await?;
        Ok(())
    }

    /// Get the application-wide statistics document.
    pub async fn get_app_stats(
        &self,
    ) -> Result<responses::AppStats, ClientError> {
        self.get_body("stats").await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}
