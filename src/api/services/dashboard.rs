//! Dashboard page
//!
//! Aggregates all tracking records and renders the embedded template,
//! substituting the serialized chart payloads; the page draws the three
//! charts client-side with Plotly.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use rust_embed::Embed;
use tracing::error;

use crate::services::report::EngagementSummary;
use crate::storage::SeaOrmStorage;

#[derive(Embed)]
#[folder = "assets/"]
struct DashboardAssets;

/// Compile-time fallback, should the embedded folder ever miss the file
const TEMPLATE_FALLBACK: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/dashboard.html"));

pub struct DashboardService {}

impl DashboardService {
    /// Handle `GET /dashboard`
    pub async fn render(storage: web::Data<Arc<SeaOrmStorage>>) -> HttpResponse {
        let records = match storage.load_all().await {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to load tracking records for dashboard: {}", e);
                return HttpResponse::InternalServerError().finish();
            }
        };

        let summary = EngagementSummary::compute(&records);

        let open_rate_json = serde_json::to_string(&summary.open_rate_trace())
            .unwrap_or_else(|_| "{}".to_string());
        let click_rate_json = serde_json::to_string(&summary.click_rate_trace())
            .unwrap_or_else(|_| "{}".to_string());
        let device_type_json = serde_json::to_string(&summary.device_type_trace())
            .unwrap_or_else(|_| "{}".to_string());

        let template = DashboardAssets::get("dashboard.html")
            .map(|asset| String::from_utf8_lossy(&asset.data).into_owned())
            .unwrap_or_else(|| TEMPLATE_FALLBACK.to_string());

        let page = template
            .replace("%OPEN_RATE_JSON%", &open_rate_json)
            .replace("%CLICK_RATE_JSON%", &click_rate_json)
            .replace("%DEVICE_TYPE_JSON%", &device_type_json);

        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(page)
    }
}

/// Dashboard route configuration
pub fn dashboard_routes() -> actix_web::Scope {
    web::scope("/dashboard").route("", web::get().to(DashboardService::render))
}
