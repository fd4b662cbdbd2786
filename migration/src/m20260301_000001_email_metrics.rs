//! Initial email_metrics table migration
//!
//! Creates the email_metrics table that holds one row per dispatched
//! tracking email: send metadata, open/click state and counters, last-seen
//! client information, and the engagement-time accumulator.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailMetrics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::Email)
                            .string_len(320)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::TrackingToken)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::SentAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::Opened)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::OpenedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::OpenCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::ButtonClicked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::ButtonClickedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(EmailMetrics::UserAgent).text().null())
                    .col(
                        ColumnDef::new(EmailMetrics::IpAddress)
                            .string_len(45)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EmailMetrics::DeviceType)
                            .string_len(50)
                            .null(),
                    )
                    .col(ColumnDef::new(EmailMetrics::Os).string_len(50).null())
                    .col(ColumnDef::new(EmailMetrics::Browser).string_len(50).null())
                    .col(ColumnDef::new(EmailMetrics::Country).string_len(50).null())
                    .col(ColumnDef::new(EmailMetrics::City).string_len(50).null())
                    .col(
                        ColumnDef::new(EmailMetrics::EngagementTime)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: the token is the sole external lookup key
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_email_metrics_tracking_token")
                    .table(EmailMetrics::Table)
                    .col(EmailMetrics::TrackingToken)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Send-time index for time-ordered reporting queries
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_email_metrics_sent_at")
                    .table(EmailMetrics::Table)
                    .col(EmailMetrics::SentAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_email_metrics_sent_at").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_email_metrics_tracking_token")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EmailMetrics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EmailMetrics {
    #[sea_orm(iden = "email_metrics")]
    Table,
    Id,
    Email,
    TrackingToken,
    SentAt,
    Opened,
    OpenedAt,
    OpenCount,
    ButtonClicked,
    ButtonClickedAt,
    ClickCount,
    UserAgent,
    IpAddress,
    DeviceType,
    Os,
    Browser,
    Country,
    City,
    EngagementTime,
}
