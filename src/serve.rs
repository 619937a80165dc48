//! HTTP/JSON surface over the roster runtime.

use std::future::IntoFuture;
use std::net::SocketAddr;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::time::Duration;
use tower_http::trace::TraceLayer;

use crate::{
    core::{
        query::{DEFAULT_PAGE_SIZE, PageRequest, PersonPage},
        store::StoreError,
    },
    export::SHEET_NAME,
    filter::{BIRTH_YEAR_PIVOT, PersonFilter},
    person::{Person, PersonView},
    runtime::handle::{RosterHandle, RuntimeError},
    types::{PersonId, YearCmp},
    validate::{FieldError, PersonForm, ValidationErrors},
};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Server settings resolved from CLI flags and environment.
#[derive(Clone, Debug)]
pub struct ServeConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Page size used when a request omits `pageSize`.
    pub default_page_size: usize,
    /// Upper bound on request body size.
    pub max_body_bytes: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Clone)]
struct AppState {
    roster: RosterHandle,
    default_page_size: usize,
}

/// Builds the application router; `serve` binds it, tests drive it directly.
pub fn router(roster: RosterHandle, config: &ServeConfig) -> Router {
    let state = AppState {
        roster,
        default_page_size: config.default_page_size.max(1),
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/rookies", get(list_all).post(create_person))
        .route("/rookies/male", get(list_male))
        .route("/rookies/oldest", get(oldest))
        .route("/rookies/full-names", get(full_names))
        .route("/rookies/export", get(export_xlsx))
        .route("/rookies/query", post(query_people))
        .route("/rookies/redirect-by-year", get(redirect_by_year))
        .route("/rookies/born-before-2000", get(born_before_2000))
        .route("/rookies/born-in-2000", get(born_in_2000))
        .route("/rookies/born-after-2000", get(born_after_2000))
        .route(
            "/rookies/:id",
            get(get_person).put(update_person).delete(delete_person),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config.bind` and serves until ctrl-c / SIGTERM.
pub async fn serve(config: ServeConfig, roster: RosterHandle) -> std::io::Result<()> {
    let app = router(roster, &config);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "roster listening");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = shutdown_signal() => {
            tracing::info!("shutdown requested");
            let _ = shutdown_tx.send(());
            match tokio::time::timeout(Duration::from_secs(10), &mut server).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "server shutdown timed out",
                    ));
                }
            }
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Rejected(StatusCode, String),
    Invalid(ValidationErrors),
    NotFound(String),
    Internal(String),
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl From<RuntimeError> for ApiError {
    fn from(value: RuntimeError) -> Self {
        match value {
            RuntimeError::Store(err @ StoreError::NotFound(_)) => Self::NotFound(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message, fields) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "Usage", message, None),
            ApiError::Rejected(status, message) => (status, "Usage", message, None),
            ApiError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation",
                errors.to_string(),
                Some(errors.fields),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "NotFound", message, None),
            ApiError::Internal(message) => {
                tracing::error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal", message, None)
            }
        };
        let body = ErrorEnvelope {
            error: ErrorBody {
                kind,
                message,
                fields,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    #[serde(alias = "page_size")]
    page_size: Option<i64>,
    #[serde(alias = "page_index")]
    page_index: Option<i64>,
}

impl PageQuery {
    fn resolve(&self, default_page_size: usize) -> Result<PageRequest, ApiError> {
        let page_size = positive("pageSize", self.page_size, default_page_size)?;
        let page_index = positive("pageIndex", self.page_index, 1)?;
        Ok(PageRequest::new(page_size, page_index))
    }
}

fn positive(name: &str, value: Option<i64>, default: usize) -> Result<usize, ApiError> {
    match value {
        None => Ok(default),
        Some(v) => usize::try_from(v)
            .ok()
            .filter(|v| *v >= 1)
            .ok_or_else(|| ApiError::BadRequest(format!("{name} must be at least 1"))),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageBody {
    people: Vec<PersonView>,
    page_size: usize,
    page_index: usize,
    total_pages: usize,
    total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'static str>,
}

fn page_body(page: PersonPage, action: Option<&'static str>) -> Json<PageBody> {
    Json(PageBody {
        people: page.people.into_iter().map(PersonView::from).collect(),
        page_size: page.page_size,
        page_index: page.page_index,
        total_pages: page.total_pages,
        total_items: page.total_items,
        action,
    })
}

async fn healthz() -> Response {
    Json(json!({ "ok": true })).into_response()
}

async fn list_all(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageBody>, ApiError> {
    let Query(query) = query?;
    let page = query.resolve(state.default_page_size)?;
    let result = state.roster.list_all(page).await?;
    Ok(page_body(result, None))
}

async fn list_filtered(
    state: &AppState,
    query: &PageQuery,
    filter: PersonFilter,
    action: &'static str,
) -> Result<Json<PageBody>, ApiError> {
    let page = query.resolve(state.default_page_size)?;
    let result = state.roster.list_by_filter(filter, page).await?;
    Ok(page_body(result, Some(action)))
}

async fn list_male(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageBody>, ApiError> {
    let Query(query) = query?;
    list_filtered(&state, &query, PersonFilter::male(), "male").await
}

async fn born_before_2000(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageBody>, ApiError> {
    let Query(query) = query?;
    let filter = PersonFilter::born_before(BIRTH_YEAR_PIVOT);
    list_filtered(&state, &query, filter, "born-before-2000").await
}

async fn born_in_2000(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageBody>, ApiError> {
    let Query(query) = query?;
    let filter = PersonFilter::born_in(BIRTH_YEAR_PIVOT);
    list_filtered(&state, &query, filter, "born-in-2000").await
}

async fn born_after_2000(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageBody>, ApiError> {
    let Query(query) = query?;
    let filter = PersonFilter::born_after(BIRTH_YEAR_PIVOT);
    list_filtered(&state, &query, filter, "born-after-2000").await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    filter: Option<PersonFilter>,
    #[serde(flatten)]
    page: PageQuery,
}

async fn query_people(
    State(state): State<AppState>,
    request: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<PageBody>, ApiError> {
    let Json(request) = request?;
    let page = request.page.resolve(state.default_page_size)?;
    let result = match request.filter {
        Some(filter) => state.roster.list_by_filter(filter, page).await?,
        None => state.roster.list_all(page).await?,
    };
    Ok(page_body(result, Some("query")))
}

async fn oldest(State(state): State<AppState>) -> Result<Json<PageBody>, ApiError> {
    let result = state.roster.oldest().await?;
    Ok(page_body(result, Some("oldest")))
}

async fn full_names(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.roster.all_full_names().await?))
}

async fn export_xlsx(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bytes = state.roster.export_all().await?;
    tracing::info!(bytes = bytes.len(), "roster exported");
    let disposition = format!("attachment; filename=\"{SHEET_NAME}.xlsx\"");
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
struct RedirectQuery {
    action: Option<String>,
}

async fn redirect_by_year(
    query: Result<Query<RedirectQuery>, QueryRejection>,
) -> Result<Redirect, ApiError> {
    let Query(query) = query?;
    let action = query.action.unwrap_or_default();
    if action.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Action parameter is required.".to_string(),
        ));
    }
    let target = match YearCmp::from_action(action.trim()) {
        Some(YearCmp::Less) => "/rookies/born-before-2000",
        Some(YearCmp::Equal) => "/rookies/born-in-2000",
        Some(YearCmp::Greater) => "/rookies/born-after-2000",
        None => {
            return Err(ApiError::BadRequest(
                "Invalid action parameter. Valid values are 'lessthan', 'equal', 'greaterthan'."
                    .to_string(),
            ));
        }
    };
    Ok(Redirect::to(target))
}

async fn get_person(
    State(state): State<AppState>,
    id: Result<Path<PersonId>, PathRejection>,
) -> Result<Json<PersonView>, ApiError> {
    let Path(id) = id?;
    let person = state.roster.get_by_id(id).await?;
    Ok(Json(person.into()))
}

async fn create_person(
    State(state): State<AppState>,
    form: Result<Json<PersonForm>, JsonRejection>,
) -> Result<(StatusCode, Json<PersonView>), ApiError> {
    let Json(form) = form?;
    let draft = form.validate().map_err(ApiError::Invalid)?;
    let person = state.roster.create(draft).await?;
    Ok((StatusCode::CREATED, Json(person.into())))
}

#[derive(Debug, Serialize)]
struct UpdatedBody {
    index: usize,
    person: PersonView,
}

async fn update_person(
    State(state): State<AppState>,
    id: Result<Path<PersonId>, PathRejection>,
    form: Result<Json<PersonForm>, JsonRejection>,
) -> Result<Json<UpdatedBody>, ApiError> {
    let Path(id) = id?;
    let Json(form) = form?;
    let draft = form.validate().map_err(ApiError::Invalid)?;
    let person = Person::from_draft(id, draft);
    let index = state.roster.update(person.clone()).await?;
    Ok(Json(UpdatedBody {
        index,
        person: person.into(),
    }))
}

async fn delete_person(
    State(state): State<AppState>,
    id: Result<Path<PersonId>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let person = state.roster.delete_by_id(id).await?;
    Ok(Json(json!({
        "deleted": { "id": person.id, "fullName": person.full_name() }
    }))
    .into_response())
}
