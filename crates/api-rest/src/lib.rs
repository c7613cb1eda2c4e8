//! # API REST
//!
//! REST API for the ErFlow whiteboard.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation served at `/api-docs/openapi.json`
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! All board logic lives in `erflow-core`; handlers only translate requests into
//! [`BoardStore`] calls and [`BoardError`]s into HTTP status codes.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};
use erflow_core::{
    BoardError, BoardResult, BoardStore, CardId, CardPatch, CardRecord, ColorCounts, Location,
    Moved, TriageColor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state shared by every handler.
///
/// The store is behind a mutex so that each load-modify-save cycle runs on its own.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<BoardStore>>,
}

impl AppState {
    pub fn new(store: BoardStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Only cards whose patient name contains this text, ignoring case
    pub search: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MoveReq {
    pub direction: Direction,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReorderReq {
    pub from: usize,
    pub to: usize,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_cards,
        add_card,
        clear_cards,
        update_card,
        remove_card,
        move_card,
        reorder_cards,
        collapse_all,
        expand_all,
        color_counts,
        import_dseo,
        import_json,
        export_board,
    ),
    components(schemas(
        HealthRes,
        MoveReq,
        Direction,
        ReorderReq,
        CardRecord,
        CardPatch,
        ColorCounts,
        TriageColor,
        Location,
        Moved,
    ))
)]
pub struct ApiDoc;

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// Builds the REST router with CORS and the OpenAPI document.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cards", get(list_cards).post(add_card).delete(clear_cards))
        .route("/cards/counts", get(color_counts))
        .route("/cards/collapse", post(collapse_all))
        .route("/cards/expand", post(expand_all))
        .route("/cards/reorder", post(reorder_cards))
        .route("/cards/:id", patch(update_card).delete(remove_card))
        .route("/cards/:id/move", post(move_card))
        .route("/import/dseo", post(import_dseo))
        .route("/import/json", post(import_json))
        .route("/export", get(export_board))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Maps a core error onto a status code and a message safe to show a client.
fn error_response(e: BoardError) -> (StatusCode, String) {
    match e {
        BoardError::CardNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        BoardError::IndexOutOfRange { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
        e if e.is_user_input() => (StatusCode::BAD_REQUEST, e.to_string()),
        e => {
            tracing::error!("board store error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}

fn parse_id(id: &str) -> ApiResult<CardId> {
    CardId::parse(id).map_err(|e| error_response(BoardError::from(e)))
}

/// Runs a store operation on the blocking pool while holding the store lock.
async fn with_store<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&BoardStore) -> BoardResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || op(&*store))
        .await
        .map_err(|e| {
            tracing::error!("board store task failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
        })?
        .map_err(error_response)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "ErFlow REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/cards",
    params(SearchParams),
    responses(
        (status = 200, description = "Cards in board order", body = [CardRecord]),
        (status = 500, description = "Internal server error")
    )
)]
/// List the board, optionally filtered by patient name.
#[axum::debug_handler]
async fn list_cards(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<CardRecord>>> {
    let board = with_store(&state, BoardStore::load).await?;
    let query = params.search.unwrap_or_default();
    let cards = board.search(&query).into_iter().cloned().collect();
    Ok(Json(cards))
}

#[utoipa::path(
    post,
    path = "/cards",
    responses(
        (status = 201, description = "Blank card added", body = CardRecord),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn add_card(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<CardRecord>)> {
    let card = with_store(&state, move |store| {
        store.modify(|board| {
            let id = board.add();
            board
                .get(&id)
                .cloned()
                .ok_or_else(|| BoardError::CardNotFound(id.to_string()))
        })
    })
    .await?;
    Ok((StatusCode::CREATED, Json(card)))
}

#[utoipa::path(
    delete,
    path = "/cards",
    responses(
        (status = 204, description = "Board cleared"),
        (status = 500, description = "Internal server error")
    )
)]
/// Delete every card. The board stays empty until a card is added or imported.
#[axum::debug_handler]
async fn clear_cards(State(state): State<AppState>) -> ApiResult<StatusCode> {
    with_store(&state, BoardStore::clear).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/cards/{id}",
    params(("id" = String, Path, description = "Card id")),
    request_body = CardPatch,
    responses(
        (status = 200, description = "Updated card", body = CardRecord),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Card not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Apply a partial update to one card.
#[axum::debug_handler]
async fn update_card(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(patch): Json<CardPatch>,
) -> ApiResult<Json<CardRecord>> {
    let id = parse_id(&id)?;
    let card = with_store(&state, move |store| {
        store.modify(|board| board.update(&id, patch).cloned())
    })
    .await?;
    Ok(Json(card))
}

#[utoipa::path(
    delete,
    path = "/cards/{id}",
    params(("id" = String, Path, description = "Card id")),
    responses(
        (status = 200, description = "Removed card", body = CardRecord),
        (status = 404, description = "Card not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn remove_card(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<CardRecord>> {
    let id = parse_id(&id)?;
    let card = with_store(&state, move |store| store.modify(|board| board.remove(&id))).await?;
    Ok(Json(card))
}

#[utoipa::path(
    post,
    path = "/cards/{id}/move",
    params(("id" = String, Path, description = "Card id")),
    request_body = MoveReq,
    responses(
        (status = 200, description = "Board after the move", body = [CardRecord]),
        (status = 404, description = "Card not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Swap a card with its neighbour. Moving past either end leaves the board unchanged.
#[axum::debug_handler]
async fn move_card(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<MoveReq>,
) -> ApiResult<Json<Vec<CardRecord>>> {
    let id = parse_id(&id)?;
    let cards = with_store(&state, move |store| {
        store.modify(|board| {
            match req.direction {
                Direction::Up => board.move_up(&id)?,
                Direction::Down => board.move_down(&id)?,
            }
            Ok(board.cards().to_vec())
        })
    })
    .await?;
    Ok(Json(cards))
}

#[utoipa::path(
    post,
    path = "/cards/reorder",
    request_body = ReorderReq,
    responses(
        (status = 200, description = "Board after the move", body = [CardRecord]),
        (status = 400, description = "Index out of range"),
        (status = 500, description = "Internal server error")
    )
)]
/// Move the card at `from` to position `to` (drag and drop).
#[axum::debug_handler]
async fn reorder_cards(
    State(state): State<AppState>,
    Json(req): Json<ReorderReq>,
) -> ApiResult<Json<Vec<CardRecord>>> {
    let cards = with_store(&state, move |store| {
        store.modify(|board| {
            board.reorder(req.from, req.to)?;
            Ok(board.cards().to_vec())
        })
    })
    .await?;
    Ok(Json(cards))
}

#[utoipa::path(
    post,
    path = "/cards/collapse",
    responses(
        (status = 200, description = "Board with every card collapsed", body = [CardRecord]),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn collapse_all(State(state): State<AppState>) -> ApiResult<Json<Vec<CardRecord>>> {
    let cards = with_store(&state, move |store| {
        store.modify(|board| {
            board.collapse_all();
            Ok(board.cards().to_vec())
        })
    })
    .await?;
    Ok(Json(cards))
}

#[utoipa::path(
    post,
    path = "/cards/expand",
    responses(
        (status = 200, description = "Board with every card expanded", body = [CardRecord]),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn expand_all(State(state): State<AppState>) -> ApiResult<Json<Vec<CardRecord>>> {
    let cards = with_store(&state, move |store| {
        store.modify(|board| {
            board.expand_all();
            Ok(board.cards().to_vec())
        })
    })
    .await?;
    Ok(Json(cards))
}

#[utoipa::path(
    get,
    path = "/cards/counts",
    responses(
        (status = 200, description = "Cards per triage colour", body = ColorCounts),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn color_counts(State(state): State<AppState>) -> ApiResult<Json<ColorCounts>> {
    let board = with_store(&state, BoardStore::load).await?;
    Ok(Json(board.color_counts()))
}

#[utoipa::path(
    post,
    path = "/import/dseo",
    request_body(content = String, content_type = "text/plain", description = "DSEO clipboard text"),
    responses(
        (status = 200, description = "Cards appended to the board", body = [CardRecord]),
        (status = 400, description = "Empty or unrecognized structure"),
        (status = 500, description = "Internal server error")
    )
)]
/// Import a DSEO clipboard export and append its cards to the board.
#[axum::debug_handler]
async fn import_dseo(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<Vec<CardRecord>>> {
    let cards = with_store(&state, move |store| store.import_dseo(&body)).await?;
    Ok(Json(cards))
}

#[utoipa::path(
    post,
    path = "/import/json",
    request_body(content = String, content_type = "text/plain", description = "JSON card export"),
    responses(
        (status = 200, description = "Cards now on the board", body = [CardRecord]),
        (status = 400, description = "Invalid JSON or not a list of patients"),
        (status = 500, description = "Internal server error")
    )
)]
/// Replace the board with the cards of a JSON export.
#[axum::debug_handler]
async fn import_json(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<Vec<CardRecord>>> {
    let cards = with_store(&state, move |store| store.import_json(&body)).await?;
    Ok(Json(cards))
}

#[utoipa::path(
    get,
    path = "/export",
    responses(
        (status = 200, description = "Dated JSON export as an attachment", body = [CardRecord]),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn export_board(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let export = with_store(&state, BoardStore::export).await?;
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];
    Ok((headers, export.json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use erflow_core::constants::BOARD_FILENAME;
    use erflow_core::CoreConfig;
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app(temp_dir: &TempDir) -> Router {
        let cfg = CoreConfig::new(temp_dir.path().join("data")).expect("valid config");
        router(AppState::new(BoardStore::new(Arc::new(cfg))))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<(&str, String)>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some((content_type, body)) => builder
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, headers, bytes.to_vec())
    }

    fn cards(body: &[u8]) -> Vec<CardRecord> {
        serde_json::from_slice(body).expect("card list")
    }

    const DSEO: &str = "ROSSO Mario Rossi\nSALA TRI\nDolore toracico\nGIALLO Anna Bianchi\nSALA OT1";

    #[tokio::test]
    async fn health_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        let res: HealthRes = serde_json::from_slice(&body).unwrap();
        assert!(res.ok);
    }

    #[tokio::test]
    async fn fresh_board_has_one_blank_card() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, body) = send(&app, Method::GET, "/cards", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cards(&body).len(), 1);
    }

    #[tokio::test]
    async fn dseo_import_appends_and_is_searchable() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/import/dseo",
            Some(("text/plain", DSEO.into())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let imported = cards(&body);
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].location, Location::Tri);

        let (_, _, body) = send(&app, Method::GET, "/cards?search=BIANCHI", None).await;
        let hits = cards(&body);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].patient_name, "Anna Bianchi");

        let (_, _, body) = send(&app, Method::GET, "/cards/counts", None).await;
        let counts: ColorCounts = serde_json::from_slice(&body).unwrap();
        assert_eq!((counts.rosso, counts.giallo, counts.total), (1, 1, 3));
    }

    #[tokio::test]
    async fn unrecognised_dseo_is_bad_request() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/import/dseo",
            Some(("text/plain", "solo testo".into())),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(&body).contains("unrecognized structure"));
    }

    #[tokio::test]
    async fn json_import_rejects_non_array() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/import/json",
            Some(("text/plain", r#"{"a":1}"#.into())),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_move_and_remove_card() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);
        send(
            &app,
            Method::POST,
            "/import/json",
            Some((
                "text/plain",
                r#"[{"id":"a","patientName":"A"},{"id":"b","patientName":"B"}]"#.into(),
            )),
        )
        .await;

        let (status, _, body) = send(
            &app,
            Method::PATCH,
            "/cards/b",
            Some(("application/json", r#"{"color":"verde","moved":"R"}"#.into())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let card: CardRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(card.color, TriageColor::Verde);
        assert_eq!(card.moved, Moved::R);

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/cards/b/move",
            Some(("application/json", r#"{"direction":"up"}"#.into())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let order: Vec<String> = cards(&body).iter().map(|c| c.id.to_string()).collect();
        assert_eq!(order, vec!["b", "a"]);

        let (status, _, _) = send(&app, Method::DELETE, "/cards/a", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(&app, Method::DELETE, "/cards/a", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reorder_out_of_range_is_bad_request() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/cards/reorder",
            Some(("application/json", r#"{"from":0,"to":9}"#.into())),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn add_collapse_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, _) = send(&app, Method::POST, "/cards", None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, _, body) = send(&app, Method::POST, "/cards/collapse", None).await;
        let collapsed = cards(&body);
        assert_eq!(collapsed.len(), 2);
        assert!(collapsed.iter().all(|c| c.collapsed));

        let (status, _, _) = send(&app, Method::DELETE, "/cards", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, _, body) = send(&app, Method::GET, "/cards", None).await;
        assert!(cards(&body).is_empty());

        let (status, _, _) = send(&app, Method::POST, "/cards", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, _, body) = send(&app, Method::GET, "/cards", None).await;
        assert_eq!(cards(&body).len(), 1);
    }

    #[tokio::test]
    async fn listed_ids_are_addressable() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(
            data_dir.join(BOARD_FILENAME),
            r#"[{"patientName":"A"},{"id":""},{"id":"x"},{"id":"x"}]"#,
        )
        .unwrap();
        let app = test_app(&temp_dir);

        let (_, _, body) = send(&app, Method::GET, "/cards", None).await;
        for card in cards(&body) {
            let uri = format!("/cards/{}", card.id);
            let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
            assert_eq!(status, StatusCode::OK, "card {}", card.id);
        }
    }

    #[tokio::test]
    async fn export_is_an_attachment() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, headers, body) = send(&app, Method::GET, "/export", None).await;

        assert_eq!(status, StatusCode::OK);
        let disposition = headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(disposition.starts_with("attachment; filename=\"erflow-cards-"));
        assert_eq!(cards(&body).len(), 1);
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir);

        let (status, _, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/import/dseo"].is_object());
        assert!(doc["paths"]["/cards/{id}"].is_object());
    }
}
