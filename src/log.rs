// src/log.rs
// Crate-wide logging macros over the `log` facade.
// The binary picks the sink (env_logger, see `init`); library callers get whatever logger they install.

#[doc(hidden)]
pub use ::log as backend;

#[cfg(feature = "cli")]
use std::sync::OnceLock;
#[cfg(feature = "cli")]
use std::time::Instant;

#[cfg(feature = "cli")]
static START: OnceLock<Instant> = OnceLock::new();

#[cfg(feature = "cli")]
fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

/// `hh:mm:ss.mmm` since the first log line.
pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Install env_logger with an `info` default (overridable by `RUST_LOG`)
/// and `[elapsed][LEVEL] message` lines.
#[cfg(feature = "cli")]
pub fn init() {
    use std::io::Write;

    start();
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            let elapsed = fmt_elapsed(start().elapsed().as_millis());
            writeln!(buf, "[{elapsed}][{}] {}", record.level(), record.args())
        })
        .try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::backend::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::backend::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::backend::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::backend::error!($($arg)*)
    };
}
