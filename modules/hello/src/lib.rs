//! `/proc/hello`: a world read/write 1000-byte string buffer.
//!
//! Reading returns up to 1000 bytes from the start of the buffer, whatever
//! the file position. Writing zeroes the buffer and stores up to 1000 bytes
//! of input; the rest is dropped.
#![no_std]

mod buffer;

use kmod::{
    Result, exit_fn, init_fn, loff_t, module, pr_err, pr_info,
    procfs::{File, ProcMode, ProcOperations, Registration},
    to_errno,
    uaccess::{UserSliceReader, UserSliceWriter},
};
use spin::Mutex;

pub use buffer::{MAX_STR_LEN, SharedBuffer};

#[cfg(test)]
use kapi as _;

/// Entry name under `/proc`.
pub const PROC_NAME: &core::ffi::CStr = c"hello";

/// `0666`.
pub const PROC_MODE: ProcMode = ProcMode::S_IRUGO.union(ProcMode::S_IWUGO);

// Held for a whole callback, so readers never see a half-cleared buffer.
static BUFFER: Mutex<SharedBuffer<MAX_STR_LEN>> = Mutex::new(SharedBuffer::new());
static ENTRY: Mutex<Option<Registration<HelloProc>>> = Mutex::new(None);

struct HelloProc;

impl ProcOperations for HelloProc {
    fn read(_file: &File, writer: &mut UserSliceWriter, _pos: &mut loff_t) -> Result<usize> {
        let buffer = BUFFER.lock();
        let out = buffer.contents(writer.len());
        writer.write_slice(out)?;
        Ok(out.len())
    }

    fn write(_file: &File, reader: &mut UserSliceReader, _pos: &mut loff_t) -> Result<usize> {
        let mut buffer = BUFFER.lock();
        let dst = buffer.clear_for_write(reader.len());
        // A faulting copy leaves the buffer cleared.
        reader.read_slice(dst)?;
        Ok(dst.len())
    }
}

#[init_fn]
pub fn hello_init() -> i32 {
    pr_info!("Initializing module.\n");
    match Registration::<HelloProc>::register(PROC_NAME, PROC_MODE) {
        Ok(entry) => {
            *ENTRY.lock() = Some(entry);
            0
        }
        Err(err) => {
            pr_err!("Failed to create /proc/hello: {:?}\n", err);
            to_errno(err)
        }
    }
}

#[exit_fn]
pub fn hello_exit() {
    pr_info!("Cleaning up module.\n");
    let entry = ENTRY.lock().take();
    drop(entry);
}

module!(
    name: "hello",
    license: "GPL",
    author: "Lukas Graber",
    description: "Showcase Kernel Module Development.",
    version: "0.1.0",
);

#[cfg(test)]
mod tests {
    use core::ptr::NonNull;

    use kmod::{LinuxError, uaccess::UserSlice};

    use super::*;

    fn file() -> File {
        unsafe { File::from_raw(NonNull::dangling()) }
    }

    #[test]
    fn test_faulting_copies() {
        BUFFER.lock().overwrite(b"keep?");

        let mut reader = unsafe { UserSlice::new(0x10 as *mut u8, 4) }.reader();
        assert_eq!(
            HelloProc::write(&file(), &mut reader, &mut 0),
            Err(LinuxError::EFAULT)
        );
        assert!(BUFFER.lock().contents(MAX_STR_LEN).iter().all(|&b| b == 0));

        let mut writer = unsafe { UserSlice::new(core::ptr::null_mut(), 8) }.writer();
        assert_eq!(
            HelloProc::read(&file(), &mut writer, &mut 0),
            Err(LinuxError::EFAULT)
        );
    }

    #[test]
    fn test_proc_mode() {
        assert_eq!(PROC_MODE.bits(), 0o666);
    }
}
