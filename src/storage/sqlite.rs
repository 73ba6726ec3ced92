use futures::future::BoxFuture;
use futures::TryStreamExt;
use log::debug;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use super::{Connector, NewTrain, Storage, Train};
use crate::config::Settings;
use crate::error::{Error, Result};

const SCHEMA: &str = include_str!("../../sql/create_trains.sql");

#[derive(Debug, Clone)]
pub struct Sqlite {
    connector: Connector,
}

impl Sqlite {
    pub fn new(settings: &Settings) -> Result<Sqlite> {
        Ok(Self {
            connector: Connector::new(settings)?,
        })
    }

    /// Schema creation, the emptiness check and seeding all run under one
    /// write lock taken up front.
    async fn populate(conn: &mut SqliteConnection, seed: &[NewTrain]) -> Result<()> {
        sqlx::query("BEGIN IMMEDIATE")
            .execute(&mut *conn)
            .await
            .map_err(Error::Connection)?;

        match Self::seed_locked(conn, seed).await {
            Ok(()) => {
                sqlx::query("COMMIT")
                    .execute(&mut *conn)
                    .await
                    .map_err(Error::Connection)?;

                Ok(())
            }
            Err(err) => {
                if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                    debug!("rollback after failed populate: {}", rollback);
                }

                Err(err)
            }
        }
    }

    async fn seed_locked(conn: &mut SqliteConnection, seed: &[NewTrain]) -> Result<()> {
        sqlx::query(SCHEMA).execute(&mut *conn).await?;

        let rows = Self::count_rows(conn).await?;
        if rows > 0 {
            debug!("trains table has {} rows, seeding skipped", rows);
            return Ok(());
        }

        for train in seed {
            Self::insert(conn, train).await?;
        }

        debug!("trains table seeded with {} rows", seed.len());

        Ok(())
    }

    async fn insert(conn: &mut SqliteConnection, train: &NewTrain) -> Result<i64> {
        let row = sqlx::query(
            r#"INSERT INTO trains (
                train_number,
                departure_station,
                arrival_station,
                departure_time,
                arrival_time
            ) VALUES (
                ?1,
                ?2,
                ?3,
                ?4,
                ?5
            ) RETURNING id"#,
        )
        .bind(&train.train_number)
        .bind(&train.departure_station)
        .bind(&train.arrival_station)
        .bind(train.departure_time)
        .bind(train.arrival_time)
        .fetch_one(conn)
        .await?;

        Ok(row.try_get("id")?)
    }

    async fn create_one(conn: &mut SqliteConnection, train: &NewTrain) -> Result<()> {
        let mut tx = conn.begin().await.map_err(Error::Connection)?;
        let id = Self::insert(&mut tx, train).await?;
        tx.commit().await.map_err(Error::Connection)?;

        debug!("train {} created", id);

        Ok(())
    }

    async fn find(conn: &mut SqliteConnection, train_id: i64) -> Result<Option<Train>> {
        let row = sqlx::query(
            r#"SELECT
                id,
                train_number,
                departure_station,
                arrival_station,
                departure_time,
                arrival_time
            FROM trains
            WHERE id = ?1"#,
        )
        .bind(train_id)
        .fetch_optional(conn)
        .await?;

        row.as_ref().map(train_from_row).transpose()
    }

    async fn overwrite(conn: &mut SqliteConnection, train: &Train) -> Result<()> {
        let mut tx = conn.begin().await.map_err(Error::Connection)?;

        let affected = sqlx::query(
            r#"UPDATE trains SET
                train_number = ?1,
                departure_station = ?2,
                arrival_station = ?3,
                departure_time = ?4,
                arrival_time = ?5
            WHERE id = ?6"#,
        )
        .bind(&train.train_number)
        .bind(&train.departure_station)
        .bind(&train.arrival_station)
        .bind(train.departure_time)
        .bind(train.arrival_time)
        .bind(train.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await.map_err(Error::Connection)?;
        debug!("update train {}: {} rows affected", train.id, affected);

        Ok(())
    }

    async fn remove(conn: &mut SqliteConnection, train_id: i64) -> Result<()> {
        let mut tx = conn.begin().await.map_err(Error::Connection)?;

        let affected = sqlx::query("DELETE FROM trains WHERE id = ?1")
            .bind(train_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await.map_err(Error::Connection)?;
        debug!("delete train {}: {} rows affected", train_id, affected);

        Ok(())
    }

    async fn all(conn: &mut SqliteConnection) -> Result<Vec<Train>> {
        let mut rows = sqlx::query(
            r#"SELECT
                id,
                train_number,
                departure_station,
                arrival_station,
                departure_time,
                arrival_time
            FROM trains
            ORDER BY id"#,
        )
        .fetch(conn);

        let mut result = vec![];

        while let Some(row) = rows.try_next().await? {
            result.push(train_from_row(&row)?);
        }

        Ok(result)
    }

    async fn newest(conn: &mut SqliteConnection) -> Result<Option<Train>> {
        let row = sqlx::query(
            r#"SELECT
                id,
                train_number,
                departure_station,
                arrival_station,
                departure_time,
                arrival_time
            FROM trains
            ORDER BY id DESC
            LIMIT 1"#,
        )
        .fetch_optional(conn)
        .await?;

        row.as_ref().map(train_from_row).transpose()
    }

    async fn count_rows(conn: &mut SqliteConnection) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM trains")
            .fetch_one(conn)
            .await?;

        Ok(row.try_get("count")?)
    }
}

impl Storage for Sqlite {
    fn ensure_populated<'a>(&'a self, seed: &'a [NewTrain]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::populate(&mut conn, seed).await;

            Connector::release(conn, result).await
        })
    }

    fn create<'a>(&'a self, train: &'a NewTrain) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::create_one(&mut conn, train).await;

            Connector::release(conn, result).await
        })
    }

    fn get(&self, train_id: i64) -> BoxFuture<Result<Option<Train>>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::find(&mut conn, train_id).await;

            Connector::release(conn, result).await
        })
    }

    fn update<'a>(&'a self, train: &'a Train) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::overwrite(&mut conn, train).await;

            Connector::release(conn, result).await
        })
    }

    fn delete(&self, train_id: i64) -> BoxFuture<Result<()>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::remove(&mut conn, train_id).await;

            Connector::release(conn, result).await
        })
    }

    fn list(&self) -> BoxFuture<Result<Vec<Train>>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::all(&mut conn).await;

            Connector::release(conn, result).await
        })
    }

    fn latest(&self) -> BoxFuture<Result<Option<Train>>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::newest(&mut conn).await;

            Connector::release(conn, result).await
        })
    }

    fn count(&self) -> BoxFuture<Result<i64>> {
        Box::pin(async move {
            let mut conn = self.connector.open().await?;
            let result = Self::count_rows(&mut conn).await;

            Connector::release(conn, result).await
        })
    }
}

fn train_from_row(row: &SqliteRow) -> Result<Train> {
    Ok(Train {
        id: row.try_get("id")?,
        train_number: row.try_get("train_number")?,
        departure_station: row.try_get("departure_station")?,
        arrival_station: row.try_get("arrival_station")?,
        departure_time: row.try_get("departure_time")?,
        arrival_time: row.try_get("arrival_time")?,
    })
}
