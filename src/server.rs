use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use rucsearch_client::SunatClient;
use rucsearch_core::LookupError;

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

pub async fn run(client: SunatClient, address: &str) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/search", get(search_handler))
        .route("/detail/:ruc", get(detail_handler))
        .with_state(Arc::new(client));

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(address = %address, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn search_handler(
    State(client): State<Arc<SunatClient>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let q = params.q.unwrap_or_default();
    respond(client.search(&q).await)
}

async fn detail_handler(
    State(client): State<Arc<SunatClient>>,
    Path(ruc): Path<String>,
) -> Response {
    respond(client.detail(&ruc).await)
}

fn respond<T: serde::Serialize>(result: Result<T, LookupError>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => {
            let code = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (code, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
