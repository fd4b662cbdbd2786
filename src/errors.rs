use std::fmt;

#[derive(Debug, Clone)]
pub enum MailBeaconError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    MailConfig(String),
    MailCompose(String),
    MailDelivery(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
}

impl MailBeaconError {
    pub fn code(&self) -> &'static str {
        match self {
            MailBeaconError::DatabaseConfig(_) => "E001",
            MailBeaconError::DatabaseConnection(_) => "E002",
            MailBeaconError::DatabaseOperation(_) => "E003",
            MailBeaconError::MailConfig(_) => "E004",
            MailBeaconError::MailCompose(_) => "E005",
            MailBeaconError::MailDelivery(_) => "E006",
            MailBeaconError::FileOperation(_) => "E007",
            MailBeaconError::Validation(_) => "E008",
            MailBeaconError::NotFound(_) => "E009",
            MailBeaconError::Serialization(_) => "E010",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            MailBeaconError::DatabaseConfig(_) => "Database Configuration Error",
            MailBeaconError::DatabaseConnection(_) => "Database Connection Error",
            MailBeaconError::DatabaseOperation(_) => "Database Operation Error",
            MailBeaconError::MailConfig(_) => "Mail Configuration Error",
            MailBeaconError::MailCompose(_) => "Mail Composition Error",
            MailBeaconError::MailDelivery(_) => "Mail Delivery Error",
            MailBeaconError::FileOperation(_) => "File Operation Error",
            MailBeaconError::Validation(_) => "Validation Error",
            MailBeaconError::NotFound(_) => "Resource Not Found",
            MailBeaconError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MailBeaconError::DatabaseConfig(msg) => msg,
            MailBeaconError::DatabaseConnection(msg) => msg,
            MailBeaconError::DatabaseOperation(msg) => msg,
            MailBeaconError::MailConfig(msg) => msg,
            MailBeaconError::MailCompose(msg) => msg,
            MailBeaconError::MailDelivery(msg) => msg,
            MailBeaconError::FileOperation(msg) => msg,
            MailBeaconError::Validation(msg) => msg,
            MailBeaconError::NotFound(msg) => msg,
            MailBeaconError::Serialization(msg) => msg,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for MailBeaconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for MailBeaconError {}

// Convenience constructors
impl MailBeaconError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::DatabaseOperation(msg.into())
    }

    pub fn mail_config<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::MailConfig(msg.into())
    }

    pub fn mail_compose<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::MailCompose(msg.into())
    }

    pub fn mail_delivery<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::MailDelivery(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        MailBeaconError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for MailBeaconError {
    fn from(err: sea_orm::DbErr) -> Self {
        MailBeaconError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for MailBeaconError {
    fn from(err: std::io::Error) -> Self {
        MailBeaconError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for MailBeaconError {
    fn from(err: serde_json::Error) -> Self {
        MailBeaconError::Serialization(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailBeaconError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailBeaconError::MailDelivery(err.to_string())
    }
}

impl From<lettre::error::Error> for MailBeaconError {
    fn from(err: lettre::error::Error) -> Self {
        MailBeaconError::MailCompose(err.to_string())
    }
}

impl From<lettre::address::AddressError> for MailBeaconError {
    fn from(err: lettre::address::AddressError) -> Self {
        MailBeaconError::Validation(format!("invalid mail address: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, MailBeaconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(MailBeaconError::database_config("x").code(), "E001");
        assert_eq!(MailBeaconError::mail_config("x").code(), "E004");
        assert_eq!(MailBeaconError::not_found("x").code(), "E009");
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = MailBeaconError::mail_delivery("relay refused");
        assert_eq!(err.to_string(), "Mail Delivery Error: relay refused");
    }

    #[test]
    fn test_from_db_err() {
        let err: MailBeaconError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, MailBeaconError::DatabaseOperation(_)));
    }
}
