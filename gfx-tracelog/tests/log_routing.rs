//! Checks the `log`-facade routing end to end with a capturing logger.
//! `log::set_logger` is once-per-process, so this scenario gets its own
//! integration binary.

use std::sync::Mutex;

use gfx_tracelog::{raw, route_trace_to_log};
use log::{Level, LevelFilter, Metadata, Record};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn dispatch(level: cty::c_int, text: &str) {
    raw::trace_log_dispatch(level as raw::trace_level_t, format_args!("{text}"));
}

#[test]
fn trace_events_land_on_the_matching_log_macro() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    route_trace_to_log();

    dispatch(raw::TraceLogLevel_LOG_TRACE, "t");
    dispatch(raw::TraceLogLevel_LOG_DEBUG, "d");
    dispatch(raw::TraceLogLevel_LOG_INFO, "i");
    dispatch(raw::TraceLogLevel_LOG_WARNING, "w");
    dispatch(raw::TraceLogLevel_LOG_ERROR, "e");
    // Whether a fatal message ends the process is the host's call; the
    // bridge reports it at error severity and nothing more.
    dispatch(raw::TraceLogLevel_LOG_FATAL, "f");

    let records = LOGGER.records.lock().unwrap();
    assert_eq!(
        *records,
        [
            (Level::Trace, "t".to_string()),
            (Level::Debug, "d".to_string()),
            (Level::Info, "i".to_string()),
            (Level::Warn, "w".to_string()),
            (Level::Error, "e".to_string()),
            (Level::Error, "f".to_string()),
        ]
    );
    drop(records);

    // Codes outside the scale are reported, message included.
    dispatch(99, "mystery");
    {
        let records = LOGGER.records.lock().unwrap();
        let (level, message) = records.last().unwrap();
        assert_eq!(*level, Level::Error);
        assert!(message.contains("unrecognized trace level 99"));
        assert!(message.contains("mystery"));
    }

    // LOG_NONE is a filter endpoint, not a severity; nothing is forwarded.
    let before = LOGGER.records.lock().unwrap().len();
    dispatch(raw::TraceLogLevel_LOG_NONE, "silent");
    assert_eq!(LOGGER.records.lock().unwrap().len(), before);
}
