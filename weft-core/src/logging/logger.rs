//! The logger and its background drain thread.

use super::level::LogLevel;
use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

static GLOBAL_LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Queue-backed leveled logger.
///
/// Producers format their line up front (spreading the formatting cost over
/// the calling threads) and push it under a short-held lock; a dedicated
/// drain thread swaps the whole queue out and writes the batch to standard
/// output without holding the lock.
pub struct Logger {
    level: AtomicU8,
    shared: Arc<Shared>,
    drain: Mutex<Option<JoinHandle<()>>>,
    has_drain: bool,
}

struct Shared {
    state: Mutex<State>,
    incoming: Condvar,
    drained: Condvar,
}

#[derive(Default)]
struct State {
    queue: VecDeque<String>,
    printing: bool,
    stop: bool,
}

impl Logger {
    /// The process-wide logger instance.
    pub fn global() -> &'static Logger {
        &GLOBAL_LOGGER
    }

    fn new() -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State::default()),
            incoming: Condvar::new(),
            drained: Condvar::new(),
        });
        let drain_shared = Arc::clone(&shared);
        let drain = std::thread::Builder::new()
            .name("weft-log-drain".to_string())
            .spawn(move || drain_loop(&drain_shared))
            .ok();
        let has_drain = drain.is_some();

        Self {
            level: AtomicU8::new(LogLevel::Warn.as_u8()),
            shared,
            drain: Mutex::new(drain),
            has_drain,
        }
    }

    /// Current level threshold; lines below it are discarded.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Change the level threshold. Takes effect immediately on all threads.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Queue one formatted line. Prefer the `log_*` macros, which capture
    /// `file!()` / `line!()` and pre-check the threshold.
    pub fn log(&self, level: LogLevel, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if level < self.level() {
            return;
        }
        let rendered = format_line(level, file, line, args);
        if !self.has_drain {
            println!("{rendered}");
            return;
        }
        let mut state = self.shared.state.lock();
        if state.stop {
            return;
        }
        state.queue.push_back(rendered);
        drop(state);
        self.shared.incoming.notify_one();
    }

    /// Block until every queued line has been written out.
    pub fn flush(&self) {
        if !self.has_drain {
            return;
        }
        let mut state = self.shared.state.lock();
        while !state.queue.is_empty() || state.printing {
            self.shared.drained.wait(&mut state);
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.stop = true;
        }
        self.shared.incoming.notify_all();
        if let Some(handle) = self.drain.lock().take() {
            let _ = handle.join();
        }
    }
}

fn drain_loop(shared: &Shared) {
    loop {
        let batch = {
            let mut state = shared.state.lock();
            while state.queue.is_empty() && !state.stop {
                shared.incoming.wait(&mut state);
            }
            if state.stop && state.queue.is_empty() {
                return;
            }
            state.printing = true;
            std::mem::take(&mut state.queue)
        };

        for line in &batch {
            println!("{line}");
        }

        let mut state = shared.state.lock();
        state.printing = false;
        drop(state);
        shared.drained.notify_all();
    }
}

fn format_line(level: LogLevel, file: &str, line: u32, args: fmt::Arguments<'_>) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let short_file = file
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file);
    format!(
        "[{timestamp}] [{:^5}] [{short_file}:{line}] {args}",
        level.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_line_carries_all_fields() {
        let rendered = format_line(
            LogLevel::Info,
            "src/engine/scheduler.rs",
            42,
            format_args!("node '{}' dispatched", "alpha"),
        );
        assert!(rendered.contains("[INFO ]"));
        assert!(rendered.contains("[scheduler.rs:42]"));
        assert!(rendered.contains("node 'alpha' dispatched"));
        // Timestamp prefix: "[YYYY-MM-DD HH:MM:SS.mmm]"
        assert!(rendered.starts_with('['));
        assert_eq!(&rendered[11..12], " ");
    }

    #[test]
    fn threshold_filters_lower_levels() {
        let logger = Logger::new();
        logger.set_level(LogLevel::Error);
        logger.log(
            LogLevel::Debug,
            file!(),
            line!(),
            format_args!("discarded"),
        );
        logger.flush();
        assert!(logger.shared.state.lock().queue.is_empty());
    }

    #[test]
    fn flush_waits_for_the_drain() {
        let logger = Logger::new();
        logger.set_level(LogLevel::Debug);
        for i in 0..64 {
            logger.log(LogLevel::Info, file!(), line!(), format_args!("line {i}"));
        }
        logger.flush();
        let state = logger.shared.state.lock();
        assert!(state.queue.is_empty());
        assert!(!state.printing);
    }

    #[test]
    fn global_logger_is_shared() {
        let first = Logger::global() as *const Logger;
        let second = Logger::global() as *const Logger;
        assert_eq!(first, second);
    }
}
