// Request body validation
//
// Bodies are parsed and checked before a handler runs, so a rejected request
// never reaches the extraction engine.

use std::fmt;

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use url::Url;

use super::error::ApiError;

/// Longest URL accepted in a request body
pub const MAX_URL_LENGTH: usize = 2083;

/// JSON body whose rejections come back as `{"detail": ...}`
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// An absolute http(s) URL with a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistUrl(Url);

impl PlaylistUrl {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.len() > MAX_URL_LENGTH {
            return Err(format!(
                "URL should have at most {} characters",
                MAX_URL_LENGTH
            ));
        }

        let url = Url::parse(raw).map_err(|e| format!("invalid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("URL scheme should be 'http' or 'https', got '{}'", url.scheme()));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err("URL is missing a host".to_string());
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PlaylistUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlaylistUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
