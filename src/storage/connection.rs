use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;

use crate::config::{Settings, DEFAULT_CONNECTION};
use crate::error::{Error, Result};

/// Opens a fresh SQLite connection per operation.
#[derive(Debug, Clone)]
pub struct Connector {
    options: SqliteConnectOptions,
}

impl Connector {
    pub fn new(settings: &Settings) -> Result<Self> {
        let url = settings.connection_string(DEFAULT_CONNECTION)?;
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| Error::Configuration(format!("invalid connection string: {}", e)))?
            .create_if_missing(true);

        Ok(Self { options })
    }

    pub async fn open(&self) -> Result<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(Error::Connection)
    }

    /// Closes `conn` and hands back the operation result. An operation error
    /// wins over a failure to close.
    pub async fn release<T>(conn: SqliteConnection, result: Result<T>) -> Result<T> {
        let closed = conn.close().await;

        let value = result?;
        closed.map_err(Error::Connection)?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::error::Error;

    use super::Connector;

    #[test]
    fn new_without_connection_string() {
        let err = Connector::new(&Settings::default()).unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn open_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("trains.db").display());
        let connector = Connector::new(&Settings::with_connection(&url)).unwrap();

        let conn = connector.open().await.unwrap();
        let value = Connector::release(conn, Ok(42)).await.unwrap();

        assert_eq!(value, 42);
        assert!(dir.path().join("trains.db").exists());
    }

    #[tokio::test]
    async fn release_keeps_operation_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("trains.db").display());
        let connector = Connector::new(&Settings::with_connection(&url)).unwrap();

        let conn = connector.open().await.unwrap();
        let result: crate::error::Result<()> =
            Connector::release(conn, Err(Error::Configuration("boom".into()))).await;

        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn open_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("trains.db");
        let url = format!("sqlite://{}", path.display());
        let connector = Connector::new(&Settings::with_connection(&url)).unwrap();

        assert!(matches!(connector.open().await, Err(Error::Connection(_))));
    }
}
