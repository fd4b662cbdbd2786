//! Mutation operations for SeaOrmStorage
//!
//! Record insertion plus the three token-keyed event updates. Each event is
//! a single conditional UPDATE statement, so concurrent opens/clicks for the
//! same token serialize at the database row: counters never lose increments
//! and first-event timestamps are assigned exactly once.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{CaseStatement, Expr, Query, UpdateStatement};
use sea_orm::{ConnectionTrait, EntityTrait, ExprTrait};
use tracing::debug;

use super::{SeaOrmStorage, retry};
use crate::errors::{MailBeaconError, Result};
use crate::services::client_info::ClientReport;

use migration::entities::email_metric;

/// Geolocation is not implemented; event updates write this placeholder
const GEO_PLACEHOLDER: &str = "Unknown";

impl SeaOrmStorage {
    /// Insert the initial tracking record for a successfully dispatched email
    ///
    /// All flags and counters start at their defaults; the token has been
    /// generated and embedded in the outgoing message before this call.
    pub async fn insert_metric(&self, email: &str, token: &str) -> Result<()> {
        let db = &self.db;

        let model = email_metric::ActiveModel {
            email: Set(email.to_string()),
            tracking_token: Set(token.to_string()),
            sent_at: Set(Utc::now()),
            opened: Set(false),
            open_count: Set(0),
            button_clicked: Set(false),
            click_count: Set(0),
            engagement_time: Set(0),
            ..Default::default()
        };

        retry::with_retry(
            &format!("insert_metric({})", email),
            self.retry_config,
            || async {
                email_metric::Entity::insert(model.clone())
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            MailBeaconError::database_operation(format!(
                "Failed to insert tracking record: {}",
                e
            ))
        })?;

        debug!("Tracking record created for {} (token {})", email, token);
        Ok(())
    }

    /// Record a pixel fetch
    ///
    /// The first open sets `opened` and `opened_at`; every fetch increments
    /// `open_count` and overwrites the last-seen client fields.
    ///
    /// Returns `false` when the token matches no record (silent miss).
    pub async fn record_open(&self, token: &str, report: &ClientReport) -> Result<bool> {
        let now = Utc::now();

        // opened_at is written once and never overwritten
        let opened_at = CaseStatement::new()
            .case(
                Expr::col(email_metric::Column::OpenedAt).is_null(),
                Expr::val(now),
            )
            .finally(Expr::col(email_metric::Column::OpenedAt));

        let mut stmt = Query::update();
        stmt.table(email_metric::Entity)
            .value(email_metric::Column::Opened, Expr::val(true))
            .value(email_metric::Column::OpenedAt, opened_at)
            .value(
                email_metric::Column::OpenCount,
                Expr::col(email_metric::Column::OpenCount).add(Expr::val(1i64)),
            )
            .and_where(Expr::col(email_metric::Column::TrackingToken).eq(Expr::val(token)));
        apply_client_fields(&mut stmt, report);

        let rows = self.execute_update("record_open", &stmt).await?;
        Ok(rows > 0)
    }

    /// Record a tracked-link click
    ///
    /// A click on a not-yet-opened record also counts as its first open
    /// (the pixel may never fire in clients that block images), so `opened`,
    /// `opened_at` and `open_count` are updated under the same conditions as
    /// in [`record_open`](Self::record_open). `button_clicked_at` is set only
    /// on the first click; `click_count` increments on every click.
    ///
    /// Returns `false` when the token matches no record.
    pub async fn record_click(&self, token: &str, report: &ClientReport) -> Result<bool> {
        let now = Utc::now();

        // CASE expressions evaluate against the pre-update row values
        let open_count = CaseStatement::new()
            .case(
                Expr::col(email_metric::Column::Opened).eq(Expr::val(false)),
                Expr::col(email_metric::Column::OpenCount).add(Expr::val(1i64)),
            )
            .finally(Expr::col(email_metric::Column::OpenCount));

        let opened_at = CaseStatement::new()
            .case(
                Expr::col(email_metric::Column::OpenedAt).is_null(),
                Expr::val(now),
            )
            .finally(Expr::col(email_metric::Column::OpenedAt));

        let clicked_at = CaseStatement::new()
            .case(
                Expr::col(email_metric::Column::ButtonClickedAt).is_null(),
                Expr::val(now),
            )
            .finally(Expr::col(email_metric::Column::ButtonClickedAt));

        let mut stmt = Query::update();
        stmt.table(email_metric::Entity)
            .value(email_metric::Column::Opened, Expr::val(true))
            .value(email_metric::Column::OpenedAt, opened_at)
            .value(email_metric::Column::OpenCount, open_count)
            .value(email_metric::Column::ButtonClicked, Expr::val(true))
            .value(email_metric::Column::ButtonClickedAt, clicked_at)
            .value(
                email_metric::Column::ClickCount,
                Expr::col(email_metric::Column::ClickCount).add(Expr::val(1i64)),
            )
            .and_where(Expr::col(email_metric::Column::TrackingToken).eq(Expr::val(token)));
        apply_client_fields(&mut stmt, report);

        let rows = self.execute_update("record_click", &stmt).await?;
        Ok(rows > 0)
    }

    /// Add client-reported engagement seconds to the accumulator
    ///
    /// Negative input is clamped to zero: engagement_time only ever grows.
    /// Returns `false` when the token matches no record.
    pub async fn add_engagement(&self, token: &str, seconds: i64) -> Result<bool> {
        let seconds = Ord::max(seconds, 0);

        let mut stmt = Query::update();
        stmt.table(email_metric::Entity)
            .value(
                email_metric::Column::EngagementTime,
                Expr::col(email_metric::Column::EngagementTime).add(Expr::val(seconds)),
            )
            .and_where(Expr::col(email_metric::Column::TrackingToken).eq(Expr::val(token)));

        let rows = self.execute_update("add_engagement", &stmt).await?;
        Ok(rows > 0)
    }

    async fn execute_update(&self, name: &str, stmt: &UpdateStatement) -> Result<u64> {
        let db = &self.db;

        let result = retry::with_retry(name, self.retry_config, || async {
            db.execute(stmt).await
        })
        .await
        .map_err(|e| {
            MailBeaconError::database_operation(format!(
                "{} failed (still failed after retries): {}",
                name, e
            ))
        })?;

        Ok(result.rows_affected())
    }
}

/// Last-seen client metadata, overwritten on every open/click event
fn apply_client_fields(stmt: &mut UpdateStatement, report: &ClientReport) {
    stmt.value(
        email_metric::Column::UserAgent,
        Expr::val(report.user_agent.clone()),
    )
    .value(
        email_metric::Column::IpAddress,
        Expr::val(report.ip_address.clone()),
    )
    .value(
        email_metric::Column::DeviceType,
        Expr::val(report.info.device_type.clone()),
    )
    .value(email_metric::Column::Os, Expr::val(report.info.os.clone()))
    .value(
        email_metric::Column::Browser,
        Expr::val(report.info.browser.clone()),
    )
    .value(email_metric::Column::Country, Expr::val(GEO_PLACEHOLDER))
    .value(email_metric::Column::City, Expr::val(GEO_PLACEHOLDER));
}
