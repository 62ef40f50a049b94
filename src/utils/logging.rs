// utils/logging.rs
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Configure le tracing pour le logging structuré
///
/// `format` vaut `json` (défaut en production) ou n'importe quelle autre valeur pour
/// une sortie compacte avec fichier et ligne. `RUST_LOG` reste prioritaire sur `log_level`.
pub fn init_tracing(log_level: &str, format: &str) {
    let level = log_level.parse().unwrap_or(tracing::Level::INFO);

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let layer = if format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_line_number(true)
            .with_file(true)
            .boxed()
    };

    // Une deuxième initialisation (tests, binaires multiples) est ignorée
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
