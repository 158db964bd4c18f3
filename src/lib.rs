//! Core library surface for the Ape Kingdom catalogue TUI.
//!
//! The binary only wires these pieces together, so tests and other front-ends
//! can reuse the gateway, the filter, and the view state directly.
pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod ui;

pub use config::{AppConfig, DeletePolicy};
pub use error::{FormError, GatewayError};
pub use filter::filter_monkeys;
pub use gateway::{open_database, MonkeyGateway, SqliteGateway};
pub use models::{species_color, Monkey, MonkeyFields, MonkeyId, Species, SpeciesFilter, TagColor};

/// The interactive view and its event loop.
pub use ui::{run_app, App, ThemeKind};
