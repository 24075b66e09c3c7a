use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    pub authorization: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Items in insertion order so pages are stable.
pub type Db = Arc<RwLock<Vec<Item>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).delete(delete_item))
        .route("/blobs", post(create_blob))
        .route("/whoami", get(whoami))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(
    State(db): State<Db>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let items = db.read().await;
    let last = items.len().div_ceil(per_page).max(1);
    let page = query.page.unwrap_or(1).clamp(1, last);

    let data: Vec<Item> = items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let link = page_links(host, page, last, per_page);

    ([(header::LINK, link)], Json(data)).into_response()
}

/// `Link` header value for `page` of `last`.
pub fn page_links(host: &str, page: usize, last: usize, per_page: usize) -> String {
    let url = |p: usize| format!("<http://{host}/items?page={p}&per_page={per_page}>");
    let mut links = Vec::new();
    if page < last {
        links.push(format!("{}; rel=\"next\"", url(page + 1)));
    }
    if page > 1 {
        links.push(format!("{}; rel=\"prev\"", url(page - 1)));
    }
    links.push(format!("{}; rel=\"first\"", url(1)));
    links.push(format!("{}; rel=\"last\"", url(last)));
    links.join(", ")
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> (StatusCode, Json<Item>) {
    let item = Item {
        id: Uuid::new_v4(),
        name: input.name,
    };
    debug!(id = %item.id, "created item");
    db.write().await.push(item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Item>, StatusCode> {
    let items = db.read().await;
    items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut items = db.write().await;
    let index = items
        .iter()
        .position(|item| item.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    items.remove(index);
    debug!(%id, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}

async fn create_blob(headers: HeaderMap, body: Bytes) -> (StatusCode, Json<Blob>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    (
        StatusCode::CREATED,
        Json(Blob {
            content_type,
            size: body.len(),
        }),
    )
}

async fn whoami(headers: HeaderMap) -> Result<Json<WhoAmI>, StatusCode> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|authorization| {
            Json(WhoAmI {
                authorization: authorization.to_string(),
            })
        })
        .ok_or(StatusCode::UNAUTHORIZED)
}
