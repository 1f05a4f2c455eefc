//! Routing of intercepted trace messages onto the [`log`] facade.

use log::{debug, error, info, trace, warn};

use crate::{enable_log_interception, set_trace_sink, TraceLevel};

/// Wire the whole bridge: every trace message the library emits lands on
/// the `log` macro matching its severity. The host application still owns
/// the actual logger (`env_logger`, a custom `Log` impl, ...).
///
/// Safe to call repeatedly.
pub fn route_trace_to_log() {
    set_trace_sink(log_sink);
    enable_log_interception();
}

fn log_sink(level: TraceLevel, text: &str) {
    match level {
        TraceLevel::All | TraceLevel::Trace => trace!("{text}"),
        TraceLevel::Debug => debug!("{text}"),
        TraceLevel::Info => info!("{text}"),
        TraceLevel::Warning => warn!("{text}"),
        // The library considers fatal messages terminal, but whether to
        // abort belongs to the host, not the bridge.
        TraceLevel::Error | TraceLevel::Fatal => error!("{text}"),
        // LOG_NONE is the "disabled" end of the scale and carries nothing
        // worth forwarding.
        TraceLevel::Off => {}
    }
}
