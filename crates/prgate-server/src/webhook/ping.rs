//! Ping webhook handlers.

use actix_web::HttpResponse;
use prgate_webhook_types::{types::GhPingEvent, EventType};
use tracing::info;

use super::parse_event_type;
use crate::Result;

pub(crate) fn parse_ping_event(body: &[u8]) -> Result<GhPingEvent> {
    parse_event_type(EventType::Ping, body)
}

pub(crate) fn ping_event(event: GhPingEvent) -> HttpResponse {
    if let Some(repo) = event.repository {
        info!(
            message = "Ping event from repository",
            repository_path = %repo.full_name,
            hook_id = event.hook_id,
            zen = %event.zen
        );
    } else {
        info!(hook_id = event.hook_id, "Ping event without repository");
    }

    HttpResponse::Accepted().body("Ping.")
}
