use anyhow::Result;
use cinefilter::config::DashboardConfig;
use cinefilter::dashboard::Dashboard;
use cinefilter::loader::load_catalog;
use cinefilter::views::ActorGraphControls;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = dotenv();
    init_tracing();
    match loaded {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    let config = DashboardConfig::from_env()?;
    info!("Loading catalog from {:?}", config.data);
    let source = config.source();
    let catalog = load_catalog(source.as_ref()).await;

    let dashboard = Dashboard::with_controls(
        catalog,
        ActorGraphControls {
            min_edge_weight: config.min_edge_weight,
        },
    );
    let snapshot = dashboard.snapshot();
    info!(
        total_titles = snapshot.total_titles,
        genres = %snapshot.active_genres,
        genre_rows = snapshot.genre_year.len(),
        movies = snapshot.movies.len(),
        tv_shows = snapshot.tv_shows.len(),
        countries = snapshot.countries.len(),
        actors = snapshot.actor_graph.nodes.len(),
        links = snapshot.actor_graph.edges.len(),
        age_clock = snapshot.age_clock.len(),
        "Default view"
    );
    if dashboard.catalog.content_age.is_no_data() {
        info!("Age clock has no data");
    }
    Ok(())
}
