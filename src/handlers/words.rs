use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;

use super::{parse_word_req, Ctx, Result};
use crate::engine::AddOutcome;

/// Response of POST /select.
#[derive(Debug, Serialize)]
pub struct SelectResp {
    pub ok: bool,
    pub message: String,
}

/// Response of POST /addword. `status` is one of "ok", "exists" or "error".
#[derive(Debug, Serialize)]
pub struct AddWordResp {
    pub status: &'static str,
    pub msg: String,
}

/// POST /select - Register a picked suggestion.
pub async fn select(State(ctx): State<Arc<Ctx>>, body: Bytes) -> (StatusCode, Json<SelectResp>) {
    match do_select(&ctx, &body).await {
        Ok(n) => (
            StatusCode::OK,
            Json(SelectResp {
                ok: true,
                message: format!("learning + recent saved (count {})", n),
            }),
        ),
        Err(e) => (
            e.status,
            Json(SelectResp {
                ok: false,
                message: e.message,
            }),
        ),
    }
}

async fn do_select(ctx: &Ctx, body: &[u8]) -> Result<u64> {
    let req = parse_word_req(body)?;
    Ok(ctx.mgr.select(&req.word).await?)
}

/// POST /addword - Add a new word to the dictionary.
pub async fn add_word(
    State(ctx): State<Arc<Ctx>>,
    body: Bytes,
) -> (StatusCode, Json<AddWordResp>) {
    let resp = |status, msg: &str| AddWordResp {
        status,
        msg: msg.to_string(),
    };

    match do_add_word(&ctx, &body).await {
        Ok(AddOutcome::Added) => (StatusCode::OK, Json(resp("ok", "word added successfully"))),
        Ok(AddOutcome::Exists) => (StatusCode::OK, Json(resp("exists", "word already present"))),
        Ok(AddOutcome::Invalid) => (
            StatusCode::BAD_REQUEST,
            Json(resp("error", "word can't be indexed")),
        ),
        Err(e) => (e.status, Json(resp("error", &e.message))),
    }
}

async fn do_add_word(ctx: &Ctx, body: &[u8]) -> Result<AddOutcome> {
    let req = parse_word_req(body)?;
    Ok(ctx.mgr.add_word(&req.word).await?)
}
