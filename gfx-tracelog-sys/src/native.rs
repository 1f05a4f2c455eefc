//! Real linkage against the graphics library.
//!
//! Only compiled with the `native` feature, since everything here resolves
//! at link time against the library and the C runtime. The library hands
//! its trace callback a `va_list`, which stable Rust cannot traverse, so
//! rendering is delegated to the C runtime's bounds-checked `vsnprintf`
//! into the same fixed-capacity buffer the portable path uses.

use core::cmp;

use crate::{handler, trace_level_t, MAX_TRACELOG_BUFFER_SIZE};

/// `va_list` in the decayed form it takes as a callback parameter on the
/// supported ABIs (SysV x86_64 and AArch64 pass it as a pointer to the
/// caller's register-save area).
pub type va_list = *mut cty::c_void;

/// Signature the library expects from a replacement trace callback.
pub type TraceLogCallback =
    Option<unsafe extern "C" fn(level: trace_level_t, text: *const cty::c_char, args: va_list)>;

extern "C" {
    /// Install hook exported by the graphics library. Replaces the
    /// library's built-in console printer.
    fn SetTraceLogCallback(callback: TraceLogCallback);

    fn vsnprintf(
        buf: *mut cty::c_char,
        size: usize,
        fmt: *const cty::c_char,
        args: va_list,
    ) -> cty::c_int;
}

/// The callback handed to the library.
///
/// Renders `(fmt, args)` into a stack-local zeroed buffer and forwards
/// `(level, text, len)` to the bound handler. `vsnprintf` reports the
/// length the full render would have had, so anything at or past the
/// capacity is clamped to `MAX_TRACELOG_BUFFER_SIZE - 1`; the buffer can
/// never overflow and the terminator byte is never overwritten.
///
/// # Safety
///
/// Must only be invoked by the library's trace-log machinery: `fmt` has to
/// be a NUL-terminated printf format matching `args`.
pub unsafe extern "C" fn trace_log_trampoline(
    level: trace_level_t,
    fmt: *const cty::c_char,
    args: va_list,
) {
    if fmt.is_null() {
        return;
    }

    let mut buf = [0u8; MAX_TRACELOG_BUFFER_SIZE];
    let written = vsnprintf(
        buf.as_mut_ptr() as *mut cty::c_char,
        MAX_TRACELOG_BUFFER_SIZE,
        fmt,
        args,
    );
    if written < 0 {
        // Encoding error in the C runtime; there is nothing to forward and
        // no caller to report to.
        return;
    }

    let len = cmp::min(written as usize, MAX_TRACELOG_BUFFER_SIZE - 1);
    handler::forward(level, buf.as_ptr() as *const cty::c_char, len as cty::c_int);
}

/// Route the library's trace log through [`trace_log_trampoline`].
///
/// Safe to call repeatedly; the library simply swaps the callback for the
/// same one. There is no way to observe a failure of the install hook and
/// none is reported.
pub fn set_trace_log_callback() {
    unsafe {
        SetTraceLogCallback(Some(trace_log_trampoline));
    }
}
