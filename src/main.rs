//! Binary entry point: read configuration, start logging, open the SQLite
//! store, load the catalogue, and drive the Ratatui loop until the user exits.
use ape_kingdom::{logging, open_database, run_app, App, AppConfig, SqliteGateway};
use tracing::info;

/// Start-up failures (bad configuration, unwritable data directory, terminal
/// setup) are returned to the shell; once the loop runs nothing is fatal.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_path)?;
    info!(
        database = %config.database_path.display(),
        theme = config.theme.label(),
        delete_policy = ?config.delete_policy,
        "starting ape kingdom"
    );

    let conn = open_database(&config.database_path)?;
    let gateway = SqliteGateway::new(conn);

    let mut app = App::new(Box::new(gateway), config.theme, config.delete_policy);
    app.load_all();
    run_app(&mut app)
}
