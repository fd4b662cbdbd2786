//! Campaign report aggregation
//!
//! Summarizes the full set of tracking records into the dashboard series:
//! open rate, click rate, and a device-type histogram over opened records.
//! Recomputed on every request; there is no caching layer.

use std::collections::BTreeMap;

use serde::Serialize;

use migration::entities::email_metric;

/// Aggregate counters over all tracking records
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EngagementSummary {
    pub total_sent: usize,
    pub total_opened: usize,
    pub total_clicked: usize,
    /// Device category -> opened-record count, sorted by category name
    pub device_types: BTreeMap<String, i64>,
}

impl EngagementSummary {
    /// Aggregate over the full record set
    ///
    /// Only opened records contribute to the device histogram: a record
    /// that was never opened has no classification to count. Opened
    /// records whose User-Agent could not be classified are skipped too.
    pub fn compute(records: &[email_metric::Model]) -> Self {
        let mut summary = Self {
            total_sent: records.len(),
            ..Default::default()
        };

        for record in records {
            if record.opened {
                summary.total_opened += 1;
                if let Some(ref device) = record.device_type {
                    *summary.device_types.entry(device.clone()).or_insert(0) += 1;
                }
            }
            if record.button_clicked {
                summary.total_clicked += 1;
            }
        }

        summary
    }

    /// Opened vs not-opened pie trace
    pub fn open_rate_trace(&self) -> PieTrace {
        PieTrace {
            trace_type: "pie",
            labels: vec!["Opened".to_string(), "Not Opened".to_string()],
            values: vec![
                self.total_opened as i64,
                (self.total_sent - self.total_opened) as i64,
            ],
        }
    }

    /// Clicked vs not-clicked pie trace
    pub fn click_rate_trace(&self) -> PieTrace {
        PieTrace {
            trace_type: "pie",
            labels: vec!["Clicked".to_string(), "Not Clicked".to_string()],
            values: vec![
                self.total_clicked as i64,
                (self.total_sent - self.total_clicked) as i64,
            ],
        }
    }

    /// Device-type histogram bar trace
    pub fn device_type_trace(&self) -> BarTrace {
        BarTrace {
            trace_type: "bar",
            x: self.device_types.keys().cloned().collect(),
            y: self.device_types.values().copied().collect(),
        }
    }
}

/// Plotly pie trace payload, drawn client-side by the dashboard page
#[derive(Debug, Serialize)]
pub struct PieTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

/// Plotly bar trace payload
#[derive(Debug, Serialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub x: Vec<String>,
    pub y: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(opened: bool, clicked: bool, device: Option<&str>) -> email_metric::Model {
        email_metric::Model {
            id: 0,
            email: "recipient@example.com".to_string(),
            tracking_token: "token".to_string(),
            sent_at: Utc::now(),
            opened,
            opened_at: opened.then(Utc::now),
            open_count: i64::from(opened),
            button_clicked: clicked,
            button_clicked_at: clicked.then(Utc::now),
            click_count: i64::from(clicked),
            user_agent: None,
            ip_address: None,
            device_type: device.map(String::from),
            os: None,
            browser: None,
            country: None,
            city: None,
            engagement_time: 0,
        }
    }

    #[test]
    fn test_compute_counts() {
        let records = vec![
            record(true, true, Some("pc")),
            record(true, false, Some("smartphone")),
            record(false, false, None),
        ];

        let summary = EngagementSummary::compute(&records);
        assert_eq!(summary.total_sent, 3);
        assert_eq!(summary.total_opened, 2);
        assert_eq!(summary.total_clicked, 1);
    }

    #[test]
    fn test_histogram_excludes_unopened_records() {
        // An unopened record carries stale-looking classification only in
        // theory; either way it must not show up in the histogram.
        let records = vec![
            record(true, false, Some("pc")),
            record(false, false, Some("pc")),
        ];

        let summary = EngagementSummary::compute(&records);
        assert_eq!(summary.device_types.get("pc"), Some(&1));
    }

    #[test]
    fn test_histogram_groups_by_device() {
        let records = vec![
            record(true, false, Some("pc")),
            record(true, false, Some("pc")),
            record(true, false, Some("smartphone")),
            record(true, false, None),
        ];

        let summary = EngagementSummary::compute(&records);
        assert_eq!(summary.device_types.get("pc"), Some(&2));
        assert_eq!(summary.device_types.get("smartphone"), Some(&1));
        assert_eq!(summary.device_types.len(), 2);
    }

    #[test]
    fn test_trace_payload_shapes() {
        let records = vec![
            record(true, true, Some("pc")),
            record(false, false, None),
        ];
        let summary = EngagementSummary::compute(&records);

        let open_trace = serde_json::to_value(summary.open_rate_trace()).unwrap();
        assert_eq!(open_trace["type"], "pie");
        assert_eq!(open_trace["values"][0], 1);
        assert_eq!(open_trace["values"][1], 1);

        let bar = serde_json::to_value(summary.device_type_trace()).unwrap();
        assert_eq!(bar["type"], "bar");
        assert_eq!(bar["x"][0], "pc");
        assert_eq!(bar["y"][0], 1);
    }
}
