//! Webhook handlers.

mod ping;
mod pulls;

use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use prgate_webhook_types::EventType;
use serde::Deserialize;
use tracing::{debug, warn};

use self::ping::parse_ping_event;
use crate::{
    constants::GITHUB_EVENT_HEADER, server::AppContext, utils::convert_payload_to_bytes, Result,
    ServerError,
};

/// Result of reading the event header.
#[derive(Debug, PartialEq, Eq)]
enum RequestedEvent {
    Supported(EventType),
    Unsupported(String),
}

fn parse_event_type<'de, T>(event_type: EventType, body: &'de [u8]) -> Result<T>
where
    T: Deserialize<'de>,
{
    serde_json::from_slice(body).map_err(|e| ServerError::EventParseError {
        event_type,
        source: e,
    })
}

/// A missing header is handled as a pull request event.
fn extract_event_from_request(req: &HttpRequest) -> RequestedEvent {
    let header = match req.headers().get(GITHUB_EVENT_HEADER) {
        Some(header) => header,
        None => return RequestedEvent::Supported(EventType::PullRequest),
    };

    match header.to_str() {
        Ok(name) => EventType::try_from(name)
            .map(RequestedEvent::Supported)
            .unwrap_or_else(|_| RequestedEvent::Unsupported(name.to_owned())),
        Err(_) => RequestedEvent::Unsupported(String::from_utf8_lossy(header.as_bytes()).into()),
    }
}

#[tracing::instrument(skip_all)]
pub(crate) async fn event_handler(
    req: HttpRequest,
    mut payload: web::Payload,
    ctx: web::Data<AppContext>,
) -> ActixResult<HttpResponse> {
    let body = match convert_payload_to_bytes(&mut payload).await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Could not read webhook payload");
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Bad payload."
            })));
        }
    };

    match extract_event_from_request(&req) {
        RequestedEvent::Supported(EventType::Ping) => {
            Ok(ping::ping_event(parse_ping_event(&body)?))
        }
        RequestedEvent::Supported(EventType::PullRequest) => {
            Ok(pulls::pull_request_event(ctx.into_inner(), body.to_vec()))
        }
        RequestedEvent::Unsupported(name) => {
            debug!(event_type = %name, "Ignoring unsupported event");
            Ok(HttpResponse::Accepted().json(serde_json::json!({
                "message": format!("Event '{}' ignored.", name)
            })))
        }
    }
}
