//! procfs entries backed by Rust callbacks.
//!
//! See <https://elixir.bootlin.com/linux/v6.6/source/include/linux/proc_fs.h>

use core::{
    ffi::{CStr, c_char},
    fmt::Display,
    marker::PhantomData,
    ptr::NonNull,
};

use bitflags::bitflags;
use kbindings::{file, loff_t, proc_dir_entry, proc_ops, size_t, ssize_t, umode_t};

use crate::{
    LinuxError, Result, to_errno,
    uaccess::{UserSlice, UserSliceReader, UserSliceWriter},
};

unsafe extern "C" {
    fn proc_create(
        name: *const c_char,
        mode: umode_t,
        parent: *mut proc_dir_entry,
        proc_ops: *const proc_ops,
    ) -> *mut proc_dir_entry;
    fn remove_proc_entry(name: *const c_char, parent: *mut proc_dir_entry);
}

bitflags! {
    /// Permission bits of a proc entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ProcMode: umode_t {
        const S_IRUSR = 0o400;
        const S_IWUSR = 0o200;
        const S_IXUSR = 0o100;
        const S_IRGRP = 0o040;
        const S_IWGRP = 0o020;
        const S_IXGRP = 0o010;
        const S_IROTH = 0o004;
        const S_IWOTH = 0o002;
        const S_IXOTH = 0o001;

        const S_IRUGO = Self::S_IRUSR.bits() | Self::S_IRGRP.bits() | Self::S_IROTH.bits();
        const S_IWUGO = Self::S_IWUSR.bits() | Self::S_IWGRP.bits() | Self::S_IWOTH.bits();
    }
}

impl Display for ProcMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        const BITS: [(ProcMode, char); 9] = [
            (ProcMode::S_IRUSR, 'r'),
            (ProcMode::S_IWUSR, 'w'),
            (ProcMode::S_IXUSR, 'x'),
            (ProcMode::S_IRGRP, 'r'),
            (ProcMode::S_IWGRP, 'w'),
            (ProcMode::S_IXGRP, 'x'),
            (ProcMode::S_IROTH, 'r'),
            (ProcMode::S_IWOTH, 'w'),
            (ProcMode::S_IXOTH, 'x'),
        ];
        for (bit, c) in BITS {
            let c = if self.contains(bit) { c } else { '-' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// The open file a callback runs against.
pub struct File(NonNull<file>);

impl File {
    /// # Safety
    /// `ptr` must be the file the host passed for the current call.
    pub unsafe fn from_raw(ptr: NonNull<file>) -> Self {
        File(ptr)
    }

    pub fn as_ptr(&self) -> *mut file {
        self.0.as_ptr()
    }
}

/// Callbacks of a proc entry.
///
/// `pos` is the file position the host keeps for the open file; an
/// implementation may ignore it.
pub trait ProcOperations: 'static {
    fn read(_file: &File, _writer: &mut UserSliceWriter, _pos: &mut loff_t) -> Result<usize> {
        Err(LinuxError::EINVAL)
    }

    fn write(_file: &File, _reader: &mut UserSliceReader, _pos: &mut loff_t) -> Result<usize> {
        Err(LinuxError::EINVAL)
    }
}

struct ProcOpsVtable<T>(PhantomData<T>);

impl<T: ProcOperations> ProcOpsVtable<T> {
    const VTABLE: &'static proc_ops = &proc_ops {
        proc_flags: 0,
        proc_open: None,
        proc_read: Some(Self::read),
        proc_read_iter: None,
        proc_write: Some(Self::write),
        proc_lseek: None,
        proc_release: None,
        proc_poll: None,
        proc_ioctl: None,
        proc_compat_ioctl: None,
        proc_mmap: None,
        proc_get_unmapped_area: None,
    };

    unsafe extern "C" fn read(
        file: *mut file,
        buf: *mut c_char,
        count: size_t,
        ppos: *mut loff_t,
    ) -> ssize_t {
        let Some(file) = NonNull::new(file) else {
            return to_errno(LinuxError::EINVAL) as ssize_t;
        };
        let mut writer = unsafe { UserSlice::new(buf as *mut u8, count) }.writer();
        let ret = with_pos(ppos, |pos| T::read(&File(file), &mut writer, pos));
        into_ssize(ret)
    }

    unsafe extern "C" fn write(
        file: *mut file,
        buf: *const c_char,
        count: size_t,
        ppos: *mut loff_t,
    ) -> ssize_t {
        let Some(file) = NonNull::new(file) else {
            return to_errno(LinuxError::EINVAL) as ssize_t;
        };
        let mut reader = unsafe { UserSlice::new(buf as *mut u8, count) }.reader();
        let ret = with_pos(ppos, |pos| T::write(&File(file), &mut reader, pos));
        into_ssize(ret)
    }
}

fn with_pos<F>(ppos: *mut loff_t, f: F) -> Result<usize>
where
    F: FnOnce(&mut loff_t) -> Result<usize>,
{
    match unsafe { ppos.as_mut() } {
        Some(pos) => f(pos),
        None => f(&mut 0),
    }
}

fn into_ssize(ret: Result<usize>) -> ssize_t {
    match ret {
        Ok(n) => n.min(ssize_t::MAX as usize) as ssize_t,
        Err(err) => to_errno(err) as ssize_t,
    }
}

/// A registered proc entry under the procfs root. The entry is removed when
/// the registration is dropped.
pub struct Registration<T: ProcOperations> {
    name: &'static CStr,
    entry: NonNull<proc_dir_entry>,
    _ops: PhantomData<T>,
}

unsafe impl<T: ProcOperations> Send for Registration<T> {}
unsafe impl<T: ProcOperations> Sync for Registration<T> {}

impl<T: ProcOperations> Registration<T> {
    /// Creates `/proc/<name>` with the given permissions.
    pub fn register(name: &'static CStr, mode: ProcMode) -> Result<Self> {
        let ops: &'static proc_ops = ProcOpsVtable::<T>::VTABLE;
        let entry = unsafe { proc_create(name.as_ptr(), mode.bits(), core::ptr::null_mut(), ops) };
        let entry = NonNull::new(entry).ok_or(LinuxError::ENOMEM)?;
        Ok(Registration {
            name,
            entry,
            _ops: PhantomData,
        })
    }

    pub fn name(&self) -> &'static CStr {
        self.name
    }

    pub fn entry(&self) -> *mut proc_dir_entry {
        self.entry.as_ptr()
    }
}

impl<T: ProcOperations> Drop for Registration<T> {
    fn drop(&mut self) {
        unsafe { remove_proc_entry(self.name.as_ptr(), core::ptr::null_mut()) };
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::format;

    use super::*;

    struct Echo;

    impl ProcOperations for Echo {
        fn read(file: &File, writer: &mut UserSliceWriter, pos: &mut loff_t) -> Result<usize> {
            assert_eq!(file.as_ptr(), dummy_file());
            writer.write_slice(b"echo")?;
            *pos += 4;
            Ok(4)
        }
    }

    fn dummy_file() -> *mut file {
        NonNull::<file>::dangling().as_ptr()
    }

    #[test]
    fn test_mode_bits() {
        let mode = ProcMode::S_IRUGO | ProcMode::S_IWUGO;
        assert_eq!(mode.bits(), 0o666);
        assert_eq!(format!("{}", mode), "rw-rw-rw-");
        assert_eq!(format!("{}", ProcMode::S_IRUSR), "r--------");
    }

    #[test]
    fn test_vtable_read_updates_pos() {
        let ops = ProcOpsVtable::<Echo>::VTABLE;
        let mut out = [0u8; 8];
        let mut pos: loff_t = 0;
        let read = ops.proc_read.unwrap();
        let n = unsafe { read(dummy_file(), out.as_mut_ptr() as *mut c_char, out.len(), &mut pos) };
        assert_eq!(n, 4);
        assert_eq!(pos, 4);
        assert_eq!(&out[..4], b"echo");
    }

    #[test]
    fn test_vtable_errors_are_negative() {
        let ops = ProcOpsVtable::<Echo>::VTABLE;
        let write = ops.proc_write.unwrap();
        let n = unsafe { write(dummy_file(), c"x".as_ptr(), 1, core::ptr::null_mut()) };
        assert_eq!(n, to_errno(LinuxError::EINVAL) as ssize_t);

        let read = ops.proc_read.unwrap();
        let n = unsafe { read(dummy_file(), core::ptr::null_mut(), 8, core::ptr::null_mut()) };
        assert_eq!(n, to_errno(LinuxError::EFAULT) as ssize_t);
    }

    #[test]
    fn test_register_failure() {
        // The unit-test host refuses every entry.
        let reg = Registration::<Echo>::register(c"echo", ProcMode::S_IRUGO);
        assert_eq!(reg.err(), Some(LinuxError::ENOMEM));
    }
}
