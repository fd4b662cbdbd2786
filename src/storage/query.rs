//! Query operations for SeaOrmStorage
//!
//! Read-only access used by the tracking handlers, the metrics listing
//! and the dashboard aggregation.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;

use super::{SeaOrmStorage, retry};
use crate::errors::{MailBeaconError, Result};

use migration::entities::email_metric;

impl SeaOrmStorage {
    /// Look up a tracking record by its token
    pub async fn find_by_token(&self, token: &str) -> Option<email_metric::Model> {
        let db = &self.db;
        let token_owned = token.to_string();

        let result = retry::with_retry(
            &format!("find_by_token({})", token),
            self.retry_config,
            || async {
                email_metric::Entity::find()
                    .filter(email_metric::Column::TrackingToken.eq(&token_owned))
                    .one(db)
                    .await
            },
        )
        .await;

        match result {
            Ok(found) => found,
            Err(e) => {
                error!("Token lookup failed after retries: {}", e);
                None
            }
        }
    }

    /// Load all tracking records in insertion order
    pub async fn load_all(&self) -> Result<Vec<email_metric::Model>> {
        let db = &self.db;

        retry::with_retry("load_all", self.retry_config, || async {
            email_metric::Entity::find()
                .order_by_asc(email_metric::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| {
            MailBeaconError::database_operation(format!("Failed to load tracking records: {}", e))
        })
    }
}
