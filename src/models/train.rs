use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Train that is not persisted yet, the store assigns its id on insert.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewTrain {
    pub train_number: String,
    pub departure_station: String,
    pub arrival_station: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

/// Persisted train row. `id` is the only lookup key.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub id: i64,
    pub train_number: String,
    pub departure_station: String,
    pub arrival_station: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
}

impl Train {
    pub fn with_id(id: i64, train: NewTrain) -> Self {
        Self {
            id,
            train_number: train.train_number,
            departure_station: train.departure_station,
            arrival_station: train.arrival_station,
            departure_time: train.departure_time,
            arrival_time: train.arrival_time,
        }
    }

    /// Travel time. Negative when arrival is before departure, which is not rejected.
    pub fn duration(&self) -> Duration {
        self.arrival_time - self.departure_time
    }
}

impl From<Train> for NewTrain {
    fn from(value: Train) -> Self {
        Self {
            train_number: value.train_number,
            departure_station: value.departure_station,
            arrival_station: value.arrival_station,
            departure_time: value.departure_time,
            arrival_time: value.arrival_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDateTime};

    use super::{NewTrain, Train};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn new_train() -> NewTrain {
        NewTrain {
            train_number: "123".to_string(),
            departure_station: "Station_A".to_string(),
            arrival_station: "Station_B".to_string(),
            departure_time: at("2024-01-30 08:00:00"),
            arrival_time: at("2024-01-30 12:00:00"),
        }
    }

    #[test]
    fn with_id_keeps_fields() {
        let train = Train::with_id(7, new_train());

        assert_eq!(train.id, 7);
        assert_eq!(NewTrain::from(train), new_train());
    }

    #[test]
    fn duration() {
        let train = Train::with_id(1, new_train());
        assert_eq!(train.duration(), Duration::hours(4));

        let mut reversed = train.clone();
        std::mem::swap(&mut reversed.departure_time, &mut reversed.arrival_time);
        assert_eq!(reversed.duration(), Duration::hours(-4));
    }
}
