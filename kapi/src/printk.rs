//! The printk sink modules write into.
//!
//! Modules stream bytes through `write_char`. Completed lines are forwarded
//! to the `log` facade and kept in a bounded dmesg ring.

use alloc::{
    collections::VecDeque,
    string::{String, ToString},
    vec::Vec,
};

use kmod::{
    capi_fn,
    printk::{KERN_SOH, Level},
};
use spin::Mutex;

/// Records kept in the dmesg ring before the oldest is dropped.
pub const DMESG_CAPACITY: usize = 256;

/// Level of a line that carries no `KERN_SOH` prefix
/// (`CONFIG_MESSAGE_LOGLEVEL_DEFAULT`).
const DEFAULT_LEVEL: Level = Level::Warning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmesgRecord {
    pub level: Level,
    pub text: String,
}

struct Printk {
    line: Vec<u8>,
    ring: VecDeque<DmesgRecord>,
}

static PRINTK: Mutex<Printk> = Mutex::new(Printk {
    line: Vec::new(),
    ring: VecDeque::new(),
});

impl Printk {
    fn push(&mut self, c: u8) {
        if c == b'\n' {
            self.flush_line();
        } else {
            self.line.push(c);
        }
    }

    fn flush_line(&mut self) {
        let (level, body) = split_level(&self.line);
        let text = String::from_utf8_lossy(body).to_string();
        log::log!(target: "printk", to_log_level(level), "{}", text);

        if self.ring.len() == DMESG_CAPACITY {
            self.ring.pop_front();
        }
        self.ring.push_back(DmesgRecord { level, text });
        self.line.clear();
    }
}

fn split_level(line: &[u8]) -> (Level, &[u8]) {
    match line {
        [KERN_SOH, digit, rest @ ..] => match Level::from_digit(*digit) {
            Some(level) => (level, rest),
            None => (DEFAULT_LEVEL, rest),
        },
        _ => (DEFAULT_LEVEL, line),
    }
}

fn to_log_level(level: Level) -> log::Level {
    match level {
        Level::Emerg | Level::Alert | Level::Crit | Level::Err => log::Level::Error,
        Level::Warning => log::Level::Warn,
        Level::Notice | Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
    }
}

#[capi_fn]
pub extern "C" fn write_char(c: u8) {
    PRINTK.lock().push(c);
}

/// Snapshot of the dmesg ring, oldest first.
pub fn dmesg() -> Vec<DmesgRecord> {
    PRINTK.lock().ring.iter().cloned().collect()
}

/// Empties the dmesg ring. A partially written line is kept.
pub fn dmesg_clear() {
    PRINTK.lock().ring.clear();
}
