//! Data access for the catalogue. The TUI only talks to the `MonkeyGateway`
//! trait; the SQLite store is the implementation shipped with the binary.

mod connection;
mod monkeys;

use anyhow::Result;

use crate::models::{Monkey, MonkeyFields, MonkeyId};

pub use connection::{ensure_schema, open_database};
pub use monkeys::SqliteGateway;

/// Operations the catalogue view needs from its backing store.
pub trait MonkeyGateway {
    /// Every stored record.
    fn list(&self) -> Result<Vec<Monkey>>;

    /// Persist a new record and return it with its assigned id.
    fn create(&self, fields: &MonkeyFields) -> Result<Monkey>;

    /// Replace all writable fields of an existing record.
    fn update(&self, id: MonkeyId, fields: &MonkeyFields) -> Result<Monkey>;

    /// Remove a record. Only called when deletes are configured as permanent.
    fn delete(&self, id: MonkeyId) -> Result<()>;
}
