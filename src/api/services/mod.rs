pub mod dashboard;
pub mod metrics;
pub mod tracking;

pub use dashboard::{DashboardService, dashboard_routes};
pub use metrics::{MetricsService, metrics_routes};
pub use tracking::{TrackingService, tracking_routes};
