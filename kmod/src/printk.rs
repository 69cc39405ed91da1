//! printk-style logging for modules.
//!
//! Messages are formatted with `core::fmt` and streamed byte by byte into
//! the host's `write_char` hook, prefixed with the `KERN_SOH` level marker
//! the host uses to pick a log level.
//!
//! See <https://elixir.bootlin.com/linux/v6.6/source/include/linux/kern_levels.h>

use core::fmt;

unsafe extern "C" {
    fn write_char(c: u8);
}

/// Start-of-header byte that introduces a level.
pub const KERN_SOH: u8 = 0x01;

/// printk levels, lower is more severe.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Err = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl Level {
    /// The two-byte prefix the host strips off, e.g. `"\x016"` for info.
    pub const fn prefix(self) -> [u8; 2] {
        [KERN_SOH, b'0' + self as u8]
    }

    /// Parses the digit that follows `KERN_SOH`.
    pub const fn from_digit(c: u8) -> Option<Self> {
        Some(match c {
            b'0' => Level::Emerg,
            b'1' => Level::Alert,
            b'2' => Level::Crit,
            b'3' => Level::Err,
            b'4' => Level::Warning,
            b'5' => Level::Notice,
            b'6' => Level::Info,
            b'7' => Level::Debug,
            _ => return None,
        })
    }
}

struct Writer;

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            unsafe { write_char(b) };
        }
        Ok(())
    }
}

#[doc(hidden)]
pub fn _printk(level: Level, args: fmt::Arguments) {
    for b in level.prefix() {
        unsafe { write_char(b) };
    }
    // Writer never fails; a formatting error from a Display impl truncates
    // the line.
    let _ = fmt::write(&mut Writer, args);
}

#[macro_export]
macro_rules! pr_err {
    ($($arg:tt)*) => {
        $crate::printk::_printk($crate::printk::Level::Err, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! pr_warn {
    ($($arg:tt)*) => {
        $crate::printk::_printk($crate::printk::Level::Warning, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! pr_info {
    ($($arg:tt)*) => {
        $crate::printk::_printk($crate::printk::Level::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! pr_debug {
    ($($arg:tt)*) => {
        $crate::printk::_printk($crate::printk::Level::Debug, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::PRINTK;

    #[test]
    fn test_level_prefix() {
        assert_eq!(Level::Info.prefix(), *b"\x016");
        assert_eq!(Level::from_digit(b'3'), Some(Level::Err));
        assert_eq!(Level::from_digit(b'9'), None);
        assert!(Level::Err < Level::Info);
    }

    #[test]
    fn test_pr_info_writes_prefixed_line() {
        PRINTK.lock().unwrap().clear();
        crate::pr_info!("buffer holds {} bytes\n", 1000);
        let expected: &[u8] = b"\x016buffer holds 1000 bytes\n";
        let out = PRINTK.lock().unwrap();
        assert!(out.windows(expected.len()).any(|w| w == expected));
    }
}
