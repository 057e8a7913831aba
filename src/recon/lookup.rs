//! InternetDB lookup client

use serde::Deserialize;
use thiserror::Error;

const LOOKUP_BASE: &str = "https://internetdb.shodan.io";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("http error fetching {0}: {1}")]
    Http(String, #[source] reqwest::Error),
    #[error("malformed response for {0}: {1}")]
    Decode(String, #[source] serde_json::Error),
}

/// Known-open-port data InternetDB holds for one address. Absent keys decode
/// to their empty values, so a "no information available" body is an empty
/// result rather than an error.
#[derive(Deserialize, Debug, Clone)]
pub struct LookupResult {
    #[serde(default)]
    pub hostnames: Vec<String>,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub ports: Vec<u16>,
}

pub async fn lookup(client: &reqwest::Client, addr: &str) -> Result<LookupResult, LookupError> {
    let url = format!("{}/{}", LOOKUP_BASE, addr);
    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| LookupError::Http(addr.to_string(), e))?;
    let body = resp
        .text()
        .await
        .map_err(|e| LookupError::Http(addr.to_string(), e))?;
    decode_response(addr, &body)
}

pub fn decode_response(addr: &str, body: &str) -> Result<LookupResult, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::Decode(addr.to_string(), e))
}
