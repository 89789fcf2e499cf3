//! Highlight pipeline binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vodreel_pipeline::{
    presets, reset_derived_state, ArtifactStore, HighlightRunner, PipelineSettings,
};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::from_default_env().add_directive("vodreel=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vodreel-pipeline");

    let settings = PipelineSettings::from_env();
    info!("Pipeline settings: {:?}", settings);

    let config = match presets::resolve(&settings.presets_dir, &settings.preset).await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to resolve preset '{}': {}", settings.preset, e);
            std::process::exit(1);
        }
    };

    let store = ArtifactStore::new(&settings.data_dir);

    if !settings.resume {
        if let Err(e) = reset_derived_state(&store).await {
            error!("Failed to reset derived state: {}", e);
            std::process::exit(1);
        }
    }

    let runner = HighlightRunner::new(store, config, settings.resume);
    info!(run_id = %runner.run_id(), "Run created");

    match runner.run().await {
        Ok(timeline) => {
            info!(
                intervals = timeline.timeline.len(),
                "Pipeline run complete"
            );
        }
        Err(e) => {
            error!("Pipeline run failed: {}", e);
            std::process::exit(1);
        }
    }
}
