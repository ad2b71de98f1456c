use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::agent::{AgentClient, FallbackAgent, MockAgent, TripAgent};
use trip_server::cache::CachedAgent;
use trip_server::config::ServerConfig;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Mock data backs the agent whether or not a remote one is configured
    let mock = match &config.mock_data {
        Some(path) => {
            let mock = MockAgent::from_file(path)?;
            info!(
                path = %path.display(),
                candidates = mock.candidates().len(),
                "loaded mock candidates"
            );
            mock
        }
        None => MockAgent::new(),
    };

    // Only real agent responses are cached; mock answers stay outside the cache
    let primary: Option<Arc<dyn TripAgent>> = match &config.agent {
        Some(agent_config) => {
            info!(url = %agent_config.base_url, "using planning agent");
            let client = AgentClient::new(agent_config.clone())?;
            Some(Arc::new(CachedAgent::new(Arc::new(client), &config.cache)))
        }
        None => {
            warn!("TRIP_AGENT_URL not set, serving mock data only");
            None
        }
    };

    let agent = FallbackAgent::new(primary, mock);

    let state = AppState::new(Arc::new(agent), config.scoring.clone());
    let app = create_router(state, &config.static_dir.to_string_lossy());

    info!(
        addr = %config.bind_addr,
        distance = %config.scoring.distance,
        "trip planner listening on http://{}",
        config.bind_addr
    );
    info!("API endpoints:");
    info!("  GET  /health                - Health check");
    info!("  POST /api/plan              - Plan and rank a trip");
    info!("  POST /api/rank              - Re-rank candidates");
    info!("  POST /api/book              - Book a candidate");
    info!("  GET  /api/itinerary/:id     - Show a booking");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
