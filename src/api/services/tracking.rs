//! Tracking endpoints: pixel fetch, click redirect, engagement capture
//!
//! All three respond identically for valid and unknown tokens: the pixel
//! is always served, the redirect always follows, and the engagement
//! acknowledgment is always "success". A lookup miss is a silent no-op so
//! callers cannot probe which tokens exist.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use rust_embed::Embed;
use serde::Deserialize;
use tracing::{debug, error};

use crate::services::client_info::{self, ClientReport};
use crate::storage::SeaOrmStorage;
use crate::utils::ip::extract_client_ip;
use crate::utils::is_valid_token;

#[derive(Embed)]
#[folder = "assets/"]
struct TrackingAssets;

/// Compile-time fallback, should the embedded folder ever miss the file
const PIXEL_FALLBACK: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/pixel.png"));

#[derive(Debug, Deserialize)]
pub struct ClickParams {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EngagementPayload {
    #[serde(default)]
    pub engagement_time: i64,
}

pub struct TrackingService {}

impl TrackingService {
    /// Handle `GET /track/{token}` - the 1x1 tracking pixel
    pub async fn track_open(
        req: HttpRequest,
        path: web::Path<String>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        let token = path.into_inner();

        if is_valid_token(&token) {
            let report = Self::collect_client_report(&req);
            match storage.record_open(&token, &report).await {
                Ok(true) => {}
                Ok(false) => debug!("Open event for unknown token: {}", token),
                Err(e) => error!("Failed to record open event: {}", e),
            }
        } else {
            debug!("Malformed tracking token on open: {}", token);
        }

        // Always the pixel: the mail client's image fetch never surfaces
        // tracking-store state.
        Self::pixel_response()
    }

    /// Handle `GET /click/{token}?url=<dest>` - track, then redirect
    pub async fn track_click(
        req: HttpRequest,
        path: web::Path<String>,
        params: web::Query<ClickParams>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        let token = path.into_inner();

        // A request without ?url= still has to land somewhere
        let destination = params.into_inner().url.unwrap_or_else(|| {
            crate::config::get_config().campaign.destination_url.clone()
        });

        if is_valid_token(&token) {
            let report = Self::collect_client_report(&req);
            match storage.record_click(&token, &report).await {
                Ok(true) => {}
                Ok(false) => debug!("Click event for unknown token: {}", token),
                Err(e) => error!("Failed to record click event: {}", e),
            }
        } else {
            debug!("Malformed tracking token on click: {}", token);
        }

        // The user's navigation is never blocked by tracking-store state
        HttpResponse::build(StatusCode::FOUND)
            .insert_header(("Location", destination))
            .finish()
    }

    /// Handle `POST /engagement/{token}` - accumulate reported seconds
    pub async fn track_engagement(
        path: web::Path<String>,
        body: web::Bytes,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        let token = path.into_inner();

        // Absent or malformed bodies count as zero seconds, not an error
        let payload: EngagementPayload = serde_json::from_slice(&body).unwrap_or_default();

        if is_valid_token(&token) {
            match storage
                .add_engagement(&token, payload.engagement_time)
                .await
            {
                Ok(true) => {}
                Ok(false) => debug!("Engagement report for unknown token: {}", token),
                Err(e) => {
                    error!("Failed to record engagement: {}", e);
                    return HttpResponse::InternalServerError()
                        .json(serde_json::json!({"status": "error"}));
                }
            }
        }

        HttpResponse::Ok().json(serde_json::json!({"status": "success"}))
    }

    fn collect_client_report(req: &HttpRequest) -> ClientReport {
        let user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .map(String::from);
        let info = client_info::classify(user_agent.as_deref().unwrap_or(""));

        ClientReport {
            user_agent,
            ip_address: extract_client_ip(req),
            info,
        }
    }

    #[inline]
    fn pixel_response() -> HttpResponse {
        let body = TrackingAssets::get("pixel.png")
            .map(|asset| asset.data.into_owned())
            .unwrap_or_else(|| PIXEL_FALLBACK.to_vec());

        // no-store so every render of the email refetches the pixel
        HttpResponse::Ok()
            .insert_header(("Content-Type", "image/png"))
            .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
            .body(body)
    }
}

/// Tracking route configuration
pub fn tracking_routes() -> actix_web::Scope {
    web::scope("")
        .route("/track/{token}", web::get().to(TrackingService::track_open))
        .route("/click/{token}", web::get().to(TrackingService::track_click))
        .route(
            "/engagement/{token}",
            web::post().to(TrackingService::track_engagement),
        )
}
