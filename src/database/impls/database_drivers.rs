use crate::database::enums::database_drivers::DatabaseDrivers;
use std::fmt;

impl fmt::Display for DatabaseDrivers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseDrivers::sqlite3 => write!(f, "sqlite3"),
            DatabaseDrivers::mysql => write!(f, "mysql"),
            DatabaseDrivers::pgsql => write!(f, "pgsql"),
        }
    }
}

impl DatabaseDrivers {
    /// Driver implied by a connection URL scheme.
    pub fn from_url(url: &str) -> Option<DatabaseDrivers> {
        let scheme = url.split(':').next()?;
        match scheme {
            "sqlite" => Some(DatabaseDrivers::sqlite3),
            "mysql" | "mariadb" => Some(DatabaseDrivers::mysql),
            "postgres" | "postgresql" => Some(DatabaseDrivers::pgsql),
            _ => None,
        }
    }
}
