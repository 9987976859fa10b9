//! JSON calls to the game server.
//!
//! The three endpoints are consumed same-origin; the server owning them is a
//! separate deployment. Every call is an independent request with no retry
//! and no cancellation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::model::{GuessResponse, NewGameResponse, PinyinResponse, WordPayload};

/// Transport-level failures. Server-level failures travel inside the
/// response body (`success: false`) and are not errors at this layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("网络错误，请重试")]
    Transport(String),
    #[error("网络错误，请重试")]
    Decode(String),
}

impl ApiError {
    /// The underlying detail, for console diagnostics only.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Transport(d) | ApiError::Decode(d) => d,
        }
    }
}

pub async fn new_game() -> Result<NewGameResponse, ApiError> {
    post_json("/api/new_game", None::<&()>).await
}

pub async fn guess(word: &str) -> Result<GuessResponse, ApiError> {
    let payload = WordPayload {
        word: word.to_string(),
    };
    post_json("/api/guess", Some(&payload)).await
}

pub async fn get_pinyin(word: &str) -> Result<PinyinResponse, ApiError> {
    let payload = WordPayload {
        word: word.to_string(),
    };
    post_json("/api/get_pinyin", Some(&payload)).await
}

#[cfg(feature = "hydrate")]
async fn post_json<B, T>(url: &str, body: Option<&B>) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let transport = |e: JsValue| ApiError::Transport(format!("{e:?}"));

    let window = web_sys::window().ok_or_else(|| ApiError::Transport("no window".into()))?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    let headers = web_sys::Headers::new().map_err(transport)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(transport)?;
    init.set_headers(headers.as_ref());
    if let Some(body) = body {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        init.set_body(&JsValue::from_str(&json));
    }

    let request = web_sys::Request::new_with_str_and_init(url, &init).map_err(transport)?;
    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: web_sys::Response = resp.dyn_into().map_err(transport)?;
    let text = JsFuture::from(resp.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    let text = text.as_string().unwrap_or_default();
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

// Server-rendered builds never issue API calls; the handlers that reach this
// layer only run after hydration.
#[cfg(not(feature = "hydrate"))]
async fn post_json<B, T>(url: &str, _body: Option<&B>) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    Err(ApiError::Transport(format!(
        "fetch unavailable outside the browser: {url}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_message_is_the_generic_notice() {
        // Whatever the transport detail, the toast text stays generic.
        let e = ApiError::Transport("TypeError: Failed to fetch".into());
        assert_eq!(e.to_string(), "网络错误，请重试");
        assert_eq!(e.detail(), "TypeError: Failed to fetch");

        let e = ApiError::Decode("expected value at line 1".into());
        assert_eq!(e.to_string(), "网络错误，请重试");
    }
}
