use serde::{Deserialize, Serialize};

mod database;
mod file;

#[derive(Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq, Debug))]
pub enum Database {
    V1(DatabaseV1),
}

pub use database::{DatabaseV1, TransactionId};
pub use file::{load, save};
