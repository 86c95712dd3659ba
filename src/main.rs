use crate::config::Config;
use crate::impls::MusicApi;
use crate::services::{HostClient, Session};
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use futures_lite::FutureExt;
use music_api::MusicApiClient;
use playback_queue::{
    ChannelClient, PlaybackOrchestrator, PlaybackSink, QueueEngine, Resolver, ResolverConfig,
};
use std::sync::Arc;
use tracing::{error, info, warn};

mod config;
mod http;
mod impls;
mod services;
mod types;

#[cfg(test)]
mod test_doubles;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Arc::from(Config::from_env());

    info!(version = VERSION, "Starting application...");

    let music_api_client =
        MusicApiClient::create(&config.music_api_endpoint, config.music_api_headers())
            .expect("Unable to initialize music API client");
    let host_client =
        Arc::new(HostClient::create(&config.host_endpoint).expect("Unable to initialize host client"));

    let session = {
        let resolver = Resolver::new(
            Arc::new(MusicApi(Arc::new(music_api_client))),
            ResolverConfig::default(),
        );
        let orchestrator = PlaybackOrchestrator::new(
            QueueEngine::new(config.playback_mode),
            resolver,
            Arc::clone(&host_client) as Arc<dyn PlaybackSink>,
            Arc::clone(&host_client) as Arc<dyn ChannelClient>,
        );

        Arc::new(Session::new(orchestrator, config.library_config()))
    };

    actix_rt::spawn({
        let session = Arc::clone(&session);

        async move {
            match session.rebuild_local_index(None).await {
                Ok(files) => info!(files, "Local music index ready"),
                Err(error) => warn!(?error, "Local music index was not built"),
            }
        }
    });

    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        move || {
            App::new()
                .app_data(Data::new(Arc::clone(&session)))
                .app_data(Data::new(Arc::clone(&host_client)))
                .service(web::resource("/health").route(web::get().to(http::readiness_check)))
                .configure(http::configure)
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!("Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    server_handle.stop(true).await;

    Ok(())
}
