//! Tracing setup for tapenet binaries and tests.
//!
//! [`TapenetTracer`] assembles a subscriber from up to three layers: stdout, journald and a
//! rotating log file. Each layer has its own format and filter.
//!
//! ```no_run
//! use tapenet_tracing::{LayerInfo, LogFormat, TapenetTracer, Tracer};
//!
//! let stdout = LayerInfo::new(LogFormat::Terminal, "info".to_string(), String::new(), None);
//! let _guard = TapenetTracer::new().with_stdout(stdout).init();
//! ```
//!
//! Mostly taken from [reth](https://github.com/paradigmxyz/reth)

// re-export tracing crates.
pub use tracing;
pub use tracing_subscriber;

// re-export LogFormat
pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};
pub use test_tracer::TestTracer;

mod formatter;
mod layers;
mod test_tracer;

use crate::layers::Layers;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tracer for application logging.
///
/// Manages the configuration and initialization of logging layers, including standard output,
/// optional journald, and optional file logging.
#[derive(Debug, Clone)]
pub struct TapenetTracer {
    stdout: LayerInfo,
    journald: Option<String>,
    file: Option<(LayerInfo, FileInfo)>,
}

impl TapenetTracer {
    /// Constructs a new `TapenetTracer` with default settings.
    ///
    /// Initializes with default stdout layer configuration. Journald and file layers are not
    /// set by default.
    pub fn new() -> Self {
        Self { stdout: LayerInfo::default(), journald: None, file: None }
    }

    /// Sets a custom configuration for the stdout layer.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Sets the journald layer filter, e.g. "error".
    pub fn with_journald(mut self, filter: String) -> Self {
        self.journald = Some(filter);
        self
    }

    /// Sets the file layer configuration and the file it writes to.
    pub fn with_file(mut self, config: FileInfo, layer: LayerInfo) -> Self {
        self.file = Some((layer, config));
        self
    }
}

impl Default for TapenetTracer {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a logging layer.
///
/// This struct holds configuration parameters for a tracing layer, including
/// the format, filtering directives, optional coloring, and directive.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Constructs a new `LayerInfo`.
    ///
    /// # Arguments
    /// * `format` - Specifies the format for log messages.
    /// * `default_directive` - Directive applied to targets no filter mentions, e.g. "info".
    /// * `filters` - Comma separated additional filtering directives.
    /// * `color` - Optional color configuration for the log messages.
    pub const fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    /// Provides default values for `LayerInfo`.
    ///
    /// By default, it uses terminal format, INFO level filter,
    /// no additional filters, and no color configuration.
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Trait defining a general interface for logging configuration.
///
/// The `Tracer` trait provides a standardized way to initialize logging configurations
/// in an application. Implementations of this trait can specify different logging setups,
/// such as standard output logging, file logging, journald logging, or custom logging
/// configurations tailored for specific environments (like testing).
pub trait Tracer {
    /// Initialize the logging configuration.
    ///
    /// # Returns
    /// An `eyre::Result` which is `Ok` with an optional `WorkerGuard` if a file layer is used,
    /// or an `Err` in case of an error during initialization.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

impl Tracer for TapenetTracer {
    /// Initializes the logging system based on the configured layers.
    ///
    /// This method sets up the global tracing subscriber with the specified
    /// stdout, journald, and file layers.
    ///
    /// The default layer is stdout.
    ///
    /// # Returns
    /// An `eyre::Result` which is `Ok` with an optional `WorkerGuard` if a file layer is used,
    /// or an `Err` in case of an error during initialization.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        layers.stdout(
            self.stdout.format,
            self.stdout.default_directive.parse()?,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        if let Some(config) = self.journald {
            layers.journald(&config)?;
        }

        let file_guard = if let Some((config, file_info)) = self.file {
            Some(layers.file(config.format, &config.filters, file_info)?)
        } else {
            None
        };

        // a global subscriber may already be set, e.g. by an earlier test
        let _ = tracing_subscriber::registry().with(layers.into_inner()).try_init();
        Ok(file_guard)
    }
}

/// Initializes a tracing subscriber for tests.
///
/// The filter is configurable via `RUST_LOG`.
///
/// # Note
///
/// The subscriber will silently fail if it could not be installed.
pub fn init_test_tracing() {
    let _ = TestTracer::default().init();
}
