//! Minimal wiring for an application that links the graphics library
//! (build with `--features native`). The bridge replaces the library's
//! built-in console printer, so everything it would have printed shows up
//! on the host's `log` backend instead.

fn main() {
    // Whatever logger the host already uses; env_logger shown here.
    env_logger::init();

    // From here on the library's trace output lands on `log`.
    gfx_tracelog::route_trace_to_log();

    // ... initialize the graphics library and run the application ...
}
