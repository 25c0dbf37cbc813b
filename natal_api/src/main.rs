use anyhow::Result;
use natal_tech_api::cfg::CONFIG;
use natal_tech_api::logging;
use natal_tech_api::server::Server;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let pool = PgPoolOptions::new()
        .max_connections(CONFIG.max_connections)
        .connect(&CONFIG.database_url)
        .await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    Server::new(pool).start(CONFIG.port, shutdown_rx).await
}
