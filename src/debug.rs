//! Debug logging for chatpad.
//!
//! `init_log_bridge` routes every `log::info!()`, `log::warn!()` etc. to
//! `chatpad_debug.log` in the temp directory (`/tmp` on Unix, `%TEMP%` on
//! Windows). When `RUST_LOG` is set, lines are mirrored to stderr as well.
//!
//! Level precedence: `--log-level`, then `RUST_LOG`, then the config's
//! `log_level`, which [`apply_config_level`] applies once the config is loaded.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Dependencies that are chatty below warn level
const QUIET_TARGETS: &[&str] = &[
    "wgpu", "naga", "eframe", "egui", "winit", "boa", "ureq", "rustls",
];

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the CLI or `RUST_LOG` chose the level
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("chatpad_debug.log")
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn is_quiet_target(target: &str) -> bool {
    QUIET_TARGETS.iter().any(|quiet| {
        target.strip_prefix(quiet).is_some_and(|rest| {
            rest.is_empty() || rest.starts_with("::") || rest.starts_with('_')
        })
    })
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        if metadata.level() > log::max_level() {
            return false;
        }
        metadata.level() <= log::Level::Warn || !is_quiet_target(metadata.target())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );

        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Level for our own targets from a `RUST_LOG` value.
///
/// A `chatpad*=level` directive wins over a bare `level`; directives for
/// other crates are ignored. Anything unparseable means debug.
fn parse_rust_log(value: &str) -> log::LevelFilter {
    let mut bare = None;
    for directive in value.split(',').map(str::trim) {
        match directive.split_once('=') {
            Some((target, level)) if target.trim().starts_with("chatpad") => {
                if let Ok(level) = level.trim().parse() {
                    return level;
                }
            }
            Some(_) => {}
            None => bare = bare.or_else(|| directive.parse().ok()),
        }
    }
    bare.unwrap_or(log::LevelFilter::Debug)
}

fn level_from_env() -> Option<log::LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    Some(parse_rust_log(&value))
}

/// Install the file-backed logger.
///
/// `cli_level` wins over `RUST_LOG`. With neither, logging stays off until
/// [`apply_config_level`] is called. Calling this twice is a no-op.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let env_level = level_from_env();
    let mirror_stderr = env_level.is_some();

    let bridge = BRIDGE.get_or_init(|| {
        // Silently skip the file if it cannot be opened
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        LogBridge {
            file: Mutex::new(file),
            mirror_stderr,
        }
    });

    if log::set_logger(bridge).is_err() {
        return;
    }

    let pinned = cli_level.or(env_level);
    LEVEL_PINNED.store(pinned.is_some(), Ordering::Relaxed);
    log::set_max_level(pinned.unwrap_or(log::LevelFilter::Off));

    log::info!(
        "chatpad {} debug session started (log file {})",
        crate::VERSION,
        log_path().display()
    );
}

/// Apply the config's log level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: log::LevelFilter) {
    if LEVEL_PINNED.load(Ordering::Relaxed) {
        return;
    }
    log::set_max_level(level);
}
