pub use train::{NewTrain, Train};

pub mod seed;
mod train;
