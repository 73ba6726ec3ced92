use futures::future::BoxFuture;

pub use connection::Connector;
pub use sqlite::Sqlite;

use crate::error::Result;
use crate::models::{NewTrain, Train};

mod connection;
mod sqlite;

/// Every call opens its own handle, runs one unit of work and releases
/// the handle before returning. Nothing is shared between calls.
pub trait Storage: Send + Sync {
    /// Creates the schema if absent and inserts `seed` when the table is empty.
    fn ensure_populated<'a>(&'a self, seed: &'a [NewTrain]) -> BoxFuture<'a, Result<()>>;

    /// Store new `Train` to database. The id is assigned by the store.
    fn create<'a>(&'a self, train: &'a NewTrain) -> BoxFuture<'a, Result<()>>;

    /// Find `Train` by id, `None` if there is no such row.
    fn get(&self, train_id: i64) -> BoxFuture<Result<Option<Train>>>;

    /// Overwrite every field of the row with `train.id`. No effect if the row is absent.
    fn update<'a>(&'a self, train: &'a Train) -> BoxFuture<'a, Result<()>>;

    /// Remove `Train` from database by id. No effect if the row is absent.
    fn delete(&self, train_id: i64) -> BoxFuture<Result<()>>;

    /// All trains ordered by id.
    fn list(&self) -> BoxFuture<Result<Vec<Train>>>;

    /// Train with the highest id, `None` on an empty table.
    fn latest(&self) -> BoxFuture<Result<Option<Train>>>;

    fn count(&self) -> BoxFuture<Result<i64>>;
}
