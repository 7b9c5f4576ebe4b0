//! Standard process initialization for binaries of this crate.

use crate::config::Environment;
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "property_types_service=info";

/// Defines how the process is initialized
#[derive(Debug)]
pub struct Entrypoint {
    env: Environment,
}

/// Proof that [Entrypoint::init] was called
#[derive(Debug)]
pub struct InitializedEntrypoint(());

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

impl Entrypoint {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Install the tracing subscriber and route panics through it.
    ///
    /// Local runs get pretty output, everything else flattened json.
    pub fn init(self) -> InitializedEntrypoint {
        let fmt = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_file(true)
            .with_line_number(true);

        match self.env {
            Environment::Local => fmt.with_ansi(true).pretty().init(),
            Environment::Production | Environment::Develop => fmt
                .with_ansi(false)
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .init(),
        }

        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        InitializedEntrypoint(())
    }
}
