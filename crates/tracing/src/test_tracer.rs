use tracing_subscriber::EnvFilter;

use crate::{FileWorkerGuard, Tracer};

/// Initializes a tracing subscriber for tests.
///
/// The filter is configurable via `RUST_LOG`, and output goes to stderr so it is captured by the
/// test harness.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct TestTracer;

impl Tracer for TestTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
        Ok(None)
    }
}
