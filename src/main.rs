use std::sync::Arc;

use color_eyre::eyre::Result;
use tokio::sync::RwLock;

use resource_manager::{
    app_state::AppState,
    domain::SystemClock,
    get_postgres_pool, run_migrations,
    services::data_stores::{
        PostgresMemberStore, PostgresProjectStore, PostgresSkillStore,
        PostgresWorkHoursStore,
    },
    utils::{
        constants::{APP_ADDRESS, DATABASE_URL},
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let clock = Arc::new(SystemClock);

    let app_state = match DATABASE_URL.as_ref() {
        Some(url) => {
            let pool = get_postgres_pool(url).await?;
            run_migrations(&pool).await?;
            tracing::info!("using PostgreSQL resource stores");

            AppState::new(
                Arc::new(RwLock::new(PostgresMemberStore::new(pool.clone()))),
                Arc::new(RwLock::new(PostgresProjectStore::new(pool.clone()))),
                Arc::new(RwLock::new(PostgresSkillStore::new(pool.clone()))),
                Arc::new(RwLock::new(PostgresWorkHoursStore::new(pool))),
                clock,
            )
        }
        None => {
            tracing::warn!(
                "DATABASE_URL is not set, resources are kept in memory only"
            );
            AppState::in_memory(clock)
        }
    };

    let app = Application::build(app_state, APP_ADDRESS.as_str()).await?;
    app.run().await?;

    Ok(())
}
