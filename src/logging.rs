use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over the default filter.
///
/// Calling this again is harmless: the first subscriber stays installed.
pub fn init() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rpg_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init();
    }
}
