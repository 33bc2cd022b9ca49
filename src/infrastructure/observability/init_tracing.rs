use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

use super::TracingConfig;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},lecturelens=debug,tower_http=debug",
            config.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_current_span(true),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()?;
    }

    tracing::info!(
        environment = %config.environment,
        json_format = config.json_format,
        level = %config.level,
        "Tracing initialized"
    );

    Ok(())
}
