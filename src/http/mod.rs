mod health;
mod local;
mod queue;

use actix_web::web;

pub(crate) use health::readiness_check;

/// Queue and local library routes. Expects `Data<Arc<Session>>`.
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/queue")
            .route(web::get().to(queue::get_queue))
            .route(web::delete().to(queue::clear_queue)),
    )
    .service(
        web::resource("/queue/tracks")
            .route(web::post().to(queue::add_track))
            .route(web::delete().to(queue::remove_track)),
    )
    .service(web::resource("/queue/playlist").route(web::post().to(queue::set_playlist)))
    .service(web::resource("/queue/mode").route(web::put().to(queue::set_mode)))
    .service(web::resource("/queue/next").route(web::post().to(queue::play_next)))
    .service(web::resource("/local/rebuild").route(web::post().to(local::rebuild_index)))
    .service(web::resource("/local/search").route(web::get().to(local::search)))
    .service(web::resource("/local/play").route(web::post().to(local::play_local)));
}
