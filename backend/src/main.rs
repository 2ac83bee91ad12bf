//! Backend entry point: settings, telemetry, database, HTTP server.

use color_eyre::eyre::WrapErr;
use tracing::info;

use backend::config::Settings;
use backend::inbound::http::AppState;
use backend::outbound::persistence::{Database, PoolConfig};
use backend::server::create_server;
use backend::telemetry::Telemetry;

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let settings = Settings::load().wrap_err("failed to load settings")?;

    let mut telemetry = Telemetry::new();
    telemetry
        .init(&settings.log)
        .await
        .wrap_err("failed to initialise logging")?;

    // A configured driver makes the database mandatory; absence means the
    // HTTP surface runs against the in-memory fixture repository.
    let mut database = Database::new();
    let state = match settings.database.driver() {
        Some(_) => {
            let config = PoolConfig::from_settings(&settings.database)
                .wrap_err("invalid database settings")?;
            let pool = database
                .init(config)
                .await
                .wrap_err("database initialisation failed")?;
            info!(dialect = ?pool.dialect(), "database pool ready");
            AppState::with_pool(pool.clone())
        }
        None => {
            info!("no database driver configured; using the in-memory repository");
            AppState::in_memory()
        }
    };

    let server = create_server(&settings.server, state)?;
    info!(
        host = settings.server.host(),
        port = settings.server.port(),
        "listening"
    );
    let outcome = server.await;

    database.close();
    telemetry.close();
    outcome.wrap_err("server terminated abnormally")
}
