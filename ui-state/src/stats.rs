//! Wiring for the application statistics view.

use std::rc::Rc;

use payloads::{APIClient, responses};

use crate::view_state::AsyncViewState;

// Global API client - configurable via environment or local-dev fallback
pub fn get_api_client() -> APIClient {
    let address = std::env::var("BACKEND_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

/// State holder for the stats panel: one fetch per activation, settled from
/// the backend stats endpoint.
pub fn app_stats_view(
    client: Rc<APIClient>,
) -> AsyncViewState<responses::AppStats> {
    AsyncViewState::new(move || async move {
        Ok(client.get_app_stats().await?)
    })
}
