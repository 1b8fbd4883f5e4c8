pub mod suggest;
pub mod words;

use std::{path::PathBuf, sync::Arc};

use axum::http::StatusCode;

use crate::manager::{self, Manager};

/// Application context passed to all handlers.
pub struct Ctx {
    pub mgr: Arc<Manager>,

    /// Static frontend directory (optional, from the --site flag).
    pub site_path: Option<PathBuf>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }
}

impl From<manager::Error> for ApiErr {
    fn from(err: manager::Error) -> Self {
        match err {
            manager::Error::Validation(msg) => Self::bad_request(msg),
            manager::Error::Store(e) => {
                log::error!("error persisting state: {}", e);
                Self::new(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
            }
            e @ manager::Error::Unsaved(_) => {
                Self::new(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

/// JSON body of the mutation endpoints.
#[derive(Debug, PartialEq, Eq)]
pub struct WordReq {
    pub word: String,
}

/// Validate a `{"word": "..."}` request body before anything is applied.
pub fn parse_word_req(body: &[u8]) -> Result<WordReq> {
    if body.is_empty() {
        return Err(ApiErr::bad_request("empty body"));
    }

    let v: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiErr::bad_request("invalid JSON"))?;

    match v.get("word") {
        Some(serde_json::Value::String(w)) => Ok(WordReq { word: w.clone() }),
        Some(_) => Err(ApiErr::bad_request("`word` must be a string")),
        None => Err(ApiErr::bad_request("missing word field")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_word_requests() {
        assert_eq!(
            parse_word_req(r#"{"word": "अनार"}"#.as_bytes()).unwrap(),
            WordReq {
                word: "अनार".to_string()
            }
        );

        let cases: [(&[u8], &str); 5] = [
            (b"", "empty body"),
            (b"{", "invalid JSON"),
            (b"[1, 2]", "missing word field"),
            (br#"{"text": "a"}"#, "missing word field"),
            (br#"{"word": 12}"#, "`word` must be a string"),
        ];
        for (body, msg) in cases {
            let err = parse_word_req(body).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, msg);
        }
    }
}
