use core::fmt;
use core::mem;
use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use crate::{trace_level_t, MsgBuffer, RawTraceLogHandler};

// The slot the adapter forwards every rendered message into. The library may
// invoke its trace callback from any thread, so the slot is read with an
// atomic load rather than the plain handler registry a single-threaded port
// could get away with.
static TRACE_HANDLER: AtomicPtr<()> = AtomicPtr::new(ptr::null_mut());

/// Bind the process-wide handler that receives rendered trace messages.
///
/// Re-binding replaces the previous handler; `None` drops messages until a
/// handler is bound again. Messages already being dispatched on another
/// thread may still reach the handler that was bound when their dispatch
/// started.
pub fn set_trace_log_handler(handler: RawTraceLogHandler) {
    let raw = match handler {
        Some(f) => f as *mut (),
        None => ptr::null_mut(),
    };
    TRACE_HANDLER.store(raw, Ordering::Release);
}

fn current_handler() -> RawTraceLogHandler {
    let raw = TRACE_HANDLER.load(Ordering::Acquire);
    if raw.is_null() {
        None
    } else {
        Some(unsafe {
            mem::transmute::<
                *mut (),
                unsafe extern "C" fn(trace_level_t, *const cty::c_char, cty::c_int),
            >(raw)
        })
    }
}

/// Hand one already-rendered message to the bound handler.
///
/// # Safety
///
/// `text` must point at a NUL-terminated buffer holding at least `len`
/// bytes before the terminator.
pub(crate) unsafe fn forward(level: trace_level_t, text: *const cty::c_char, len: cty::c_int) {
    if let Some(handler) = current_handler() {
        handler(level, text, len);
    }
}

/// Portable adapter entry: render one trace event and forward it.
///
/// Takes a pre-built argument list (`format_args!`), renders it into a
/// stack-local [`MsgBuffer`] and hands `(level, text, len)` to the bound
/// handler. Output longer than the buffer is silently truncated. The level
/// code passes through untouched; its meaning belongs to the library. With
/// no handler bound this is a no-op.
pub fn trace_log_dispatch(level: trace_level_t, message: fmt::Arguments<'_>) {
    let mut buf = MsgBuffer::new();
    // The writer truncates instead of erroring, so this cannot fail.
    let _ = fmt::write(&mut buf, message);
    unsafe {
        forward(level, buf.as_ptr(), buf.len() as cty::c_int);
    }
}
