use crate::services::{Session, SessionError};
use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Query};
use actix_web::{HttpResponse, Responder, ResponseError};
use playback_queue::InvokerId;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

impl ResponseError for SessionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SessionError::MissingDirectory(_) => StatusCode::BAD_REQUEST,
            SessionError::UnknownLocalFile(_) => StatusCode::NOT_FOUND,
            SessionError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct RebuildBody {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    keyword: String,
}

#[derive(Deserialize)]
pub(crate) struct PlayLocalBody {
    path: String,
    #[serde(default)]
    invoker: Option<InvokerId>,
}

pub(crate) async fn rebuild_index(
    session: Data<Arc<Session>>,
    body: Json<RebuildBody>,
) -> Result<HttpResponse, SessionError> {
    let files = session
        .rebuild_local_index(body.into_inner().path)
        .await
        .map_err(|error| {
            error!(?error, "Unable to rebuild local music index");
            error
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "files": files })))
}

pub(crate) async fn search(
    session: Data<Arc<Session>>,
    query: Query<SearchQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(session.search_local(&query.keyword).await)
}

pub(crate) async fn play_local(
    session: Data<Arc<Session>>,
    body: Json<PlayLocalBody>,
) -> Result<HttpResponse, SessionError> {
    let PlayLocalBody { path, invoker } = body.into_inner();

    Ok(match session.play_local(&path, invoker).await? {
        Some(track) => HttpResponse::Ok().json(track),
        None => HttpResponse::NoContent().finish(),
    })
}
