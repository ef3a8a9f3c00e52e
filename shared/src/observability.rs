use crate::configuration::{LogFormat, LoggingConfig};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Builds the subscriber every function logs through.
///
/// Lambda already stamps each line it receives, so timestamps are left out.
/// The writer is injected so callers decide where records go.
pub fn subscriber<W>(config: &LoggingConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.level.as_level_filter())
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false)
        .without_time();

    match config.format {
        LogFormat::Text => Box::new(builder.finish()),
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
    }
}

/// Installs the subscriber for the whole process. Call once from `main`,
/// before the runtime starts polling for events.
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), SetGlobalDefaultError> {
    tracing::subscriber::set_global_default(subscriber(config, std::io::stdout))
}

#[cfg(any(test, feature = "test-utils"))]
pub use captured::CapturedLogs;

#[cfg(any(test, feature = "test-utils"))]
mod captured {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory log sink for asserting on what a handler wrote.
    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            let buffer = self.0.lock().expect("log buffer poisoned");
            String::from_utf8_lossy(&buffer).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .expect("log buffer poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }
}
