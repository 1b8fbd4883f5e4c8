use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::Ctx;
use crate::engine::WordStat;

/// Suggest query params.
#[derive(Debug, serde::Deserialize, Default)]
pub struct SuggestQuery {
    #[serde(default)]
    pub prefix: String,
}

/// GET /suggest?prefix= - Ranked completions for a prefix.
/// A missing, empty or undecodable prefix yields an empty list.
pub async fn suggest(
    State(ctx): State<Arc<Ctx>>,
    query: std::result::Result<Query<SuggestQuery>, QueryRejection>,
) -> Json<Vec<String>> {
    let q = match query {
        Ok(Query(q)) => q,
        Err(e) => {
            log::debug!("bad suggest query: {}", e);
            return Json(Vec::new());
        }
    };

    Json(ctx.mgr.suggest(&q.prefix).await)
}

/// GET /stats - Usage count of every known word.
pub async fn stats(State(ctx): State<Arc<Ctx>>) -> Json<Vec<WordStat>> {
    Json(ctx.mgr.stats().await)
}
