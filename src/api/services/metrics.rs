//! Metrics listing endpoint
//!
//! Serializes every tracking record; timestamps go out as RFC 3339 and
//! absent timestamps as explicit nulls rather than omitted keys.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::error;

use crate::storage::SeaOrmStorage;

use migration::entities::email_metric;

/// One tracking record as exposed on the listing
#[derive(Debug, Serialize)]
pub struct MetricEntry {
    pub id: i64,
    pub email: String,
    pub tracking_token: String,
    pub sent_at: String,
    pub opened: bool,
    pub opened_at: Option<String>,
    pub open_count: i64,
    pub button_clicked: bool,
    pub button_clicked_at: Option<String>,
    pub click_count: i64,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub engagement_time: i64,
}

impl From<email_metric::Model> for MetricEntry {
    fn from(model: email_metric::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            tracking_token: model.tracking_token,
            sent_at: to_rfc3339(&model.sent_at),
            opened: model.opened,
            opened_at: model.opened_at.as_ref().map(to_rfc3339),
            open_count: model.open_count,
            button_clicked: model.button_clicked,
            button_clicked_at: model.button_clicked_at.as_ref().map(to_rfc3339),
            click_count: model.click_count,
            user_agent: model.user_agent,
            ip_address: model.ip_address,
            device_type: model.device_type,
            os: model.os,
            browser: model.browser,
            country: model.country,
            city: model.city,
            engagement_time: model.engagement_time,
        }
    }
}

fn to_rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Serialize)]
struct MetricsResponse {
    metrics: Vec<MetricEntry>,
}

pub struct MetricsService {}

impl MetricsService {
    /// Handle `GET /metrics` - every tracking record, in insertion order
    pub async fn list(storage: web::Data<Arc<SeaOrmStorage>>) -> HttpResponse {
        match storage.load_all().await {
            Ok(records) => {
                let metrics: Vec<MetricEntry> =
                    records.into_iter().map(MetricEntry::from).collect();
                HttpResponse::Ok().json(MetricsResponse { metrics })
            }
            Err(e) => {
                error!("Failed to load tracking records for listing: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

/// Metrics route configuration
pub fn metrics_routes() -> actix_web::Scope {
    web::scope("/metrics").route("", web::get().to(MetricsService::list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_serializes_absent_timestamps_as_null() {
        let model = email_metric::Model {
            id: 1,
            email: "recipient@example.com".to_string(),
            tracking_token: "2b0c9a4e-7a13-4a5f-9b2e-0d8f3c6a1e57".to_string(),
            sent_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            opened: false,
            opened_at: None,
            open_count: 0,
            button_clicked: false,
            button_clicked_at: None,
            click_count: 0,
            user_agent: None,
            ip_address: None,
            device_type: None,
            os: None,
            browser: None,
            country: None,
            city: None,
            engagement_time: 0,
        };

        let value = serde_json::to_value(MetricEntry::from(model)).unwrap();
        assert_eq!(value["sent_at"], "2026-03-01T12:00:00Z");
        assert!(value["opened_at"].is_null());
        assert!(value["button_clicked_at"].is_null());
        assert_eq!(value["open_count"], 0);
    }

    #[test]
    fn test_entry_formats_set_timestamps() {
        let opened_at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 5).unwrap();
        let model = email_metric::Model {
            id: 2,
            email: "recipient@example.com".to_string(),
            tracking_token: "1c51a9be-9f0a-4d35-8c57-95b2a9d7c7aa".to_string(),
            sent_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            opened: true,
            opened_at: Some(opened_at),
            open_count: 3,
            button_clicked: false,
            button_clicked_at: None,
            click_count: 0,
            user_agent: Some("Mozilla/5.0".to_string()),
            ip_address: Some("203.0.113.9".to_string()),
            device_type: Some("pc".to_string()),
            os: Some("Windows 10".to_string()),
            browser: Some("Chrome".to_string()),
            country: Some("Unknown".to_string()),
            city: Some("Unknown".to_string()),
            engagement_time: 75,
        };

        let value = serde_json::to_value(MetricEntry::from(model)).unwrap();
        assert_eq!(value["opened_at"], "2026-03-02T08:30:05Z");
        assert_eq!(value["device_type"], "pc");
        assert_eq!(value["engagement_time"], 75);
    }
}
