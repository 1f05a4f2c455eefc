#![cfg_attr(not(test), no_std)]

//! Safe interception of a C graphics library's trace log.
//!
//! The library renders each of its internal diagnostics through a
//! replaceable callback; the boundary crate routes those through a bounded
//! render into a process-wide raw handler. This crate supplies the Rust
//! side of that handler: severity decoding, text recovery, a registrable
//! sink, and routing onto the [`log`] facade.
//!
//! ```ignore
//! gfx_tracelog::route_trace_to_log();
//! // initialize the graphics library; its trace output now lands on `log`
//! ```

use core::mem;
use core::ptr;
use core::slice;
use core::str;
use core::sync::atomic::{AtomicPtr, Ordering};

pub use gfx_tracelog_sys as raw;

mod forward;

pub use forward::route_trace_to_log;

/// Severity scale of the library's trace log.
///
/// `All` and `Off` are the ends of the library's filter range; messages are
/// normally emitted between `Trace` and `Fatal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum TraceLevel {
    All = raw::TraceLogLevel_LOG_ALL,
    Trace = raw::TraceLogLevel_LOG_TRACE,
    Debug = raw::TraceLogLevel_LOG_DEBUG,
    Info = raw::TraceLogLevel_LOG_INFO,
    Warning = raw::TraceLogLevel_LOG_WARNING,
    Error = raw::TraceLogLevel_LOG_ERROR,
    Fatal = raw::TraceLogLevel_LOG_FATAL,
    /// The library's "logging disabled" end of the scale.
    Off = raw::TraceLogLevel_LOG_NONE,
}

impl TraceLevel {
    /// Decode the level code from the callback ABI. Codes outside the
    /// library's scale yield `None` and are reported by the shim instead
    /// of being folded into a made-up severity.
    pub fn from_raw(level: raw::trace_level_t) -> Option<TraceLevel> {
        match level as i32 {
            raw::TraceLogLevel_LOG_ALL => Some(TraceLevel::All),
            raw::TraceLogLevel_LOG_TRACE => Some(TraceLevel::Trace),
            raw::TraceLogLevel_LOG_DEBUG => Some(TraceLevel::Debug),
            raw::TraceLogLevel_LOG_INFO => Some(TraceLevel::Info),
            raw::TraceLogLevel_LOG_WARNING => Some(TraceLevel::Warning),
            raw::TraceLogLevel_LOG_ERROR => Some(TraceLevel::Error),
            raw::TraceLogLevel_LOG_FATAL => Some(TraceLevel::Fatal),
            raw::TraceLogLevel_LOG_NONE => Some(TraceLevel::Off),
            _ => None,
        }
    }

    pub fn as_raw(self) -> raw::trace_level_t {
        self as i32 as raw::trace_level_t
    }
}

/// Sink receiving every intercepted trace message.
pub type TraceSinkFn = fn(TraceLevel, &str);

static TRACE_SINK: AtomicPtr<()> = AtomicPtr::new(ptr::null_mut());

/// Bind the process-wide sink. Re-binding replaces the previous sink.
///
/// Events can arrive on any thread the library logs from, so the sink must
/// tolerate concurrent calls; ordering between interleaved events is
/// whatever the library's own call order was per thread.
pub fn set_trace_sink(sink: TraceSinkFn) {
    TRACE_SINK.store(sink as *mut (), Ordering::Release);
}

fn current_sink() -> Option<TraceSinkFn> {
    let raw = TRACE_SINK.load(Ordering::Acquire);
    if raw.is_null() {
        None
    } else {
        Some(unsafe { mem::transmute::<*mut (), TraceSinkFn>(raw) })
    }
}

/// Route the library's trace log into the sink bound with
/// [`set_trace_sink`].
///
/// Installs this crate's shim as the raw handler and, when built with the
/// `native` feature, hands the render trampoline to the library itself.
/// Idempotent: calling it again re-installs the same shim.
pub fn enable_log_interception() {
    raw::set_trace_log_handler(Some(forward_trace_event));

    #[cfg(feature = "native")]
    raw::native::set_trace_log_callback();
}

/// Raw handler bound into the boundary crate's slot.
///
/// Rebuilds `&str` from the `(ptr, len)` pair without copying. The native
/// render path can produce bytes that are not UTF-8; those forward as the
/// longest valid prefix rather than being dropped.
unsafe extern "C" fn forward_trace_event(
    level: raw::trace_level_t,
    text: *const cty::c_char,
    len: cty::c_int,
) {
    if text.is_null() || len < 0 {
        return;
    }
    let bytes = slice::from_raw_parts(text as *const u8, len as usize);
    let text = match str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => str::from_utf8_unchecked(&bytes[..err.valid_up_to()]),
    };

    match TraceLevel::from_raw(level) {
        Some(level) => {
            if let Some(sink) = current_sink() {
                sink(level, text);
            }
        }
        None => {
            // Not a code the library defines; surface it instead of
            // guessing a severity.
            log::error!("unrecognized trace level {}: {}", level as i32, text);
        }
    }
}
