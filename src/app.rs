use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use log::info;

use crate::models::{NewTrain, Train};
use crate::storage::Storage;

/// Walks the storage through populate, add, read, update and delete.
/// Any failure aborts the run.
pub struct App<S: Storage> {
    storage: S,
    seed: Vec<NewTrain>,
}

impl<S: Storage> App<S> {
    pub fn new(storage: S, seed: Vec<NewTrain>) -> Self {
        Self { storage, seed }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        self.storage
            .ensure_populated(&self.seed)
            .await
            .context("ensure populated")?;
        info!("store holds {} trains", self.storage.count().await?);

        let train = NewTrain {
            train_number: "123".to_string(),
            departure_station: "Station_A".to_string(),
            arrival_station: "Station_B".to_string(),
            departure_time: at("2024-01-30 08:00:00")?,
            arrival_time: at("2024-01-30 12:00:00")?,
        };
        self.storage.create(&train).await.context("add train")?;

        // The store does not report the new id, the newest row carries it.
        let id = match self.storage.latest().await? {
            Some(t) => t.id,
            None => bail!("added train is missing"),
        };
        info!("train {} added", id);
        self.show(id).await?;

        let updated = Train::with_id(
            id,
            NewTrain {
                train_number: "456".to_string(),
                departure_station: "Station_C".to_string(),
                arrival_station: "Station_D".to_string(),
                departure_time: at("2024-01-30 09:00:00")?,
                arrival_time: at("2024-01-30 13:00:00")?,
            },
        );
        self.storage.update(&updated).await.context("update train")?;
        info!("train {} updated", id);
        self.show(id).await?;

        self.storage.delete(id).await.context("delete train")?;
        info!("train {} deleted", id);

        match self.storage.get(id).await? {
            None => println!("Train ID: {} deleted", id),
            Some(_) => bail!("train {} still present after delete", id),
        }

        Ok(())
    }

    async fn show(&self, id: i64) -> anyhow::Result<Train> {
        let train = self
            .storage
            .get(id)
            .await
            .context("get train")?
            .with_context(|| format!("train {} not found", id))?;

        println!(
            "Train ID: {}, Number: {}, Departure: {}, Arrival: {}, Travel: {} min",
            train.id,
            train.train_number,
            train.departure_station,
            train.arrival_station,
            train.duration().num_minutes(),
        );

        Ok(train)
    }
}

fn at(s: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").with_context(|| format!("parse {}", s))
}
