use crate::services::HostClient;
use actix_web::web::Data;
use actix_web::{HttpResponse, Responder};
use std::sync::Arc;
use tracing::error;

pub(crate) async fn readiness_check(host_client: Data<Arc<HostClient>>) -> impl Responder {
    if let Err(error) = host_client.check_connection().await {
        error!(?error, "Readiness check failed");
    }

    HttpResponse::Ok().finish()
}
