use sparrow_driver::{
    AppConfig, DriverSession, SparrowResult,
    utils::seed::SeedData,
};

fn main() -> SparrowResult<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level()?)
        .init();

    let session = match &config.seed_path {
        Some(path) => DriverSession::from_seed(&config, SeedData::load(path)?)?,
        None => {
            tracing::warn!("No seed path configured, starting with an empty ledger");
            DriverSession::new(&config)
        }
    };

    let query = session.query();
    tracing::info!("Home summary: {}", serde_json::to_string(&query.home_summary())?);
    tracing::info!(
        "This week: {}",
        serde_json::to_string_pretty(&query.current_week_earnings()?)?
    );

    Ok(())
}
