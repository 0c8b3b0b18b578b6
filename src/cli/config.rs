//! Shell configuration

use std::path::PathBuf;

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Storefront settings.
#[derive(Debug, Args)]
pub(crate) struct StorefrontConfig {
    /// File the cart is persisted to
    #[arg(
        long,
        env = "STOREFRONT_CART_FILE",
        default_value = ".storefront-cart.json",
        global = true
    )]
    pub cart_file: PathBuf,

    /// Catalog YAML file; the bundled catalog is used when omitted
    #[arg(long, env = "STOREFRONT_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Simulated payment widget latency in milliseconds
    #[arg(
        long,
        env = "STOREFRONT_PAYMENT_DELAY_MS",
        default_value_t = 1_500_u64,
        global = true
    )]
    pub payment_delay_ms: u64,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
