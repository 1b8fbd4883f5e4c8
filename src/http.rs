use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::handlers::{suggest, words, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    let mut router = Router::new()
        .route("/suggest", get(suggest::suggest))
        .route("/stats", get(suggest::stats))
        .route("/select", post(words::select))
        .route("/addword", post(words::add_word));

    // Serve the frontend if a site directory is set via the --site flag.
    if ctx.site_path.is_some() {
        router = router.fallback(serve_site_static);
        log::info!("site routes enabled");
    } else {
        log::info!("site routes disabled (no --site flag, API-only mode)");
    }

    router
        .layer(middleware::from_fn(cors_middleware))
        .with_state(ctx)
}

/// Allow any origin, header and method. Preflight requests are answered here.
async fn cors_middleware(request: Request<Body>, next: Next) -> Response {
    let mut resp = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let any = HeaderValue::from_static("*");
    let h = resp.headers_mut();
    h.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    h.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, any.clone());
    h.insert(header::ACCESS_CONTROL_ALLOW_METHODS, any);
    resp
}

/// Serve site static files from disk (--site directory).
async fn serve_site_static(State(ctx): State<Arc<Ctx>>, uri: axum::http::Uri) -> Response {
    let site_dir = match ctx.site_path {
        Some(ref d) => d,
        None => return (StatusCode::NOT_FOUND, "not found").into_response(),
    };

    let uri = match site_file(uri.path()) {
        Some(u) => u,
        None => return (StatusCode::NOT_FOUND, "not found").into_response(),
    };

    let file_path = site_dir.join(uri);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let mime = mime_guess::from_path(uri)
                .first_or_octet_stream()
                .to_string();
            (StatusCode::OK, [(header::CONTENT_TYPE, mime)], content).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Map a request path to a relative file path under the site directory.
/// `/` maps to index.html. Paths escaping the directory are rejected.
fn site_file(path: &str) -> Option<&str> {
    let p = path.trim_start_matches('/');
    if p.is_empty() {
        return Some("index.html");
    }
    if p.split('/').any(|seg| seg == ".." || seg.is_empty()) || p.contains('\\') {
        return None;
    }
    Some(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::SuggestionEngine, manager::Manager, store::Store};
    use tower::ServiceExt;

    fn router() -> Router {
        let mut eng = SuggestionEngine::default();
        eng.load_dictionary(["app", "apple", "अनार"]);

        let store = Store::new("words.txt", "freq.json", "recent.json");
        init_handlers(Arc::new(Ctx {
            mgr: Arc::new(Manager::new(eng, store)),
            site_path: None,
        }))
    }

    fn assert_cors(resp: &Response) {
        for name in [
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_METHODS,
        ] {
            assert_eq!(resp.headers().get(&name).unwrap(), "*", "{}", name);
        }
    }

    async fn body(resp: Response) -> String {
        let b = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(b.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn answers_preflight() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/select")
            .body(Body::empty())
            .unwrap();
        let resp = router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_cors(&resp);
    }

    #[tokio::test]
    async fn suggest_route() {
        let req = Request::builder()
            .uri("/suggest?prefix=app")
            .body(Body::empty())
            .unwrap();
        let resp = router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors(&resp);
        assert_eq!(body(resp).await, r#"["app","apple"]"#);

        // Truncated UTF-8 in the query still gets an empty list.
        let req = Request::builder()
            .uri("/suggest?prefix=%E0%A4")
            .body(Body::empty())
            .unwrap();
        let resp = router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors(&resp);
        assert_eq!(body(resp).await, "[]");
    }

    #[test]
    fn maps_site_paths() {
        assert_eq!(site_file("/"), Some("index.html"));
        assert_eq!(site_file("/dashboard.js"), Some("dashboard.js"));
        assert_eq!(site_file("/css/style.css"), Some("css/style.css"));
        assert_eq!(site_file("/../etc/passwd"), None);
        assert_eq!(site_file("/a//b"), None);
    }
}
