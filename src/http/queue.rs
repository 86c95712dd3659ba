use crate::services::Session;
use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use playback_queue::{InvokerId, PlaybackMode, PlaylistMeta, TrackId};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub(crate) struct AddTrackBody {
    id: TrackId,
    #[serde(default)]
    front: bool,
}

#[derive(Deserialize)]
pub(crate) struct PlaylistBody {
    #[serde(default)]
    meta: Option<PlaylistMeta>,
    ids: Vec<TrackId>,
}

#[derive(Deserialize)]
pub(crate) struct RemoveTrackBody {
    id: TrackId,
}

#[derive(Deserialize)]
pub(crate) struct ModeBody {
    mode: PlaybackMode,
}

#[derive(Deserialize)]
pub(crate) struct PlayNextBody {
    #[serde(default)]
    invoker: Option<InvokerId>,
}

pub(crate) async fn get_queue(session: Data<Arc<Session>>) -> impl Responder {
    HttpResponse::Ok().json(session.snapshot().await)
}

pub(crate) async fn add_track(
    session: Data<Arc<Session>>,
    body: Json<AddTrackBody>,
) -> impl Responder {
    let AddTrackBody { id, front } = body.into_inner();

    HttpResponse::Ok().json(session.add_track(id, front).await)
}

pub(crate) async fn set_playlist(
    session: Data<Arc<Session>>,
    body: Json<PlaylistBody>,
) -> impl Responder {
    let PlaylistBody { meta, ids } = body.into_inner();
    let tracks = session.set_playlist(meta, ids).await;

    HttpResponse::Ok().json(serde_json::json!({ "tracks": tracks }))
}

pub(crate) async fn remove_track(
    session: Data<Arc<Session>>,
    body: Json<RemoveTrackBody>,
) -> impl Responder {
    match session.remove_track(&body.id).await {
        Some(track) => HttpResponse::Ok().json(track),
        None => HttpResponse::NotFound().finish(),
    }
}

pub(crate) async fn clear_queue(session: Data<Arc<Session>>) -> impl Responder {
    session.clear().await;

    HttpResponse::Ok().finish()
}

pub(crate) async fn set_mode(session: Data<Arc<Session>>, body: Json<ModeBody>) -> impl Responder {
    session.set_mode(body.mode).await;

    HttpResponse::Ok().finish()
}

pub(crate) async fn play_next(
    session: Data<Arc<Session>>,
    body: Json<PlayNextBody>,
) -> impl Responder {
    match session.play_next(body.into_inner().invoker).await {
        Some(track) => HttpResponse::Ok().json(track),
        None => HttpResponse::NoContent().finish(),
    }
}
