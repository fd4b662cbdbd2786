//! Per-recipient email tracking record

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "email_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    /// Opaque per-send identifier, the sole external lookup key
    #[sea_orm(unique)]
    pub tracking_token: String,
    pub sent_at: DateTimeUtc,
    pub opened: bool,
    pub opened_at: Option<DateTimeUtc>,
    pub open_count: i64,
    pub button_clicked: bool,
    pub button_clicked_at: Option<DateTimeUtc>,
    pub click_count: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    /// Client-reported seconds on the destination page, accumulated
    pub engagement_time: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
