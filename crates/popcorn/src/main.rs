use std::sync::Arc;

use popcorn_core::{config::Config, metadata::MetadataPort};
use popcorn_tmdb::TmdbClient;

#[tokio::main]
async fn main() -> Result<(), popcorn_core::Error> {
    popcorn_core::logging::init("popcorn")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            // Missing credentials: log and exit without starting the loop.
            tracing::error!(error = %e, "cannot start bot");
            return Ok(());
        }
    };

    let metadata: Arc<dyn MetadataPort> = Arc::new(TmdbClient::from_config(&cfg)?);
    if !metadata.is_configured() {
        tracing::warn!("TMDB_API_KEY not set; searches will only echo the query");
    }

    popcorn_telegram::router::run_polling(cfg, metadata)
        .await
        .map_err(|e| popcorn_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
