//! Logging integration for the formwork framework.
//!
//! Provides a helper for configuring [`tracing`]-based logging. Assembly
//! code emits `debug!`/`trace!` events at pipeline decision points; hosting
//! applications call [`setup_logging`] once at bootstrap.

/// Sets up the global tracing subscriber.
///
/// `log_level` is an env-filter directive string (e.g. "debug", "info",
/// "formwork_forms=trace"). In debug mode a pretty, human-readable format is
/// used; otherwise a structured JSON format is used. Calling this more than
/// once is harmless — later installs are ignored.
pub fn setup_logging(log_level: &str, debug: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one form assembly.
///
/// Attach this span around construction and decoration so that all log
/// entries emitted while a form is assembled carry its kind.
///
/// # Examples
///
/// ```
/// use formwork_core::logging::assembly_span;
///
/// let span = assembly_span("Signup_Form");
/// let _guard = span.enter();
/// tracing::debug!("assembling");
/// ```
pub fn assembly_span(form_kind: &str) -> tracing::Span {
    tracing::debug_span!("form_assembly", kind = form_kind)
}
