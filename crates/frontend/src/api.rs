//! Loading of the exported catalog JSON documents.

use contracts::envelope::ApiEnvelope;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// Fetches one `{ success, data }` document and unwraps its payload.
pub async fn fetch_list<T: DeserializeOwned>(url: &str) -> Result<Vec<T>, String> {
    let response = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let envelope: ApiEnvelope<T> = response.json().await.map_err(|e| e.to_string())?;
    envelope.into_data().map_err(|e| e.to_string())
}
