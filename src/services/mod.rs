pub mod client_info;
pub mod composer;
pub mod mailer;
pub mod report;

pub use client_info::{ClientInfo, ClientReport};
pub use mailer::MailDispatcher;
pub use report::EngagementSummary;
