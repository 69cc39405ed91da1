//! Bounded access to caller-space buffers.
//!
//! The host reports how many bytes it could NOT copy; anything but zero is
//! surfaced as `EFAULT`.

use core::ffi::{c_ulong, c_void};

use crate::{LinuxError, Result};

unsafe extern "C" {
    fn _copy_to_user(to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong;
    fn _copy_from_user(to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong;
}

/// A caller-space address range handed to a callback.
#[derive(Debug)]
pub struct UserSlice {
    ptr: *mut u8,
    len: usize,
}

impl UserSlice {
    /// # Safety
    /// `ptr` and `len` must be the caller buffer the host passed for the
    /// current call. The address is never dereferenced directly, only
    /// through the host copy routines.
    pub unsafe fn new(ptr: *mut u8, len: usize) -> Self {
        UserSlice { ptr, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn reader(self) -> UserSliceReader {
        UserSliceReader(self)
    }

    pub fn writer(self) -> UserSliceWriter {
        UserSliceWriter(self)
    }
}

/// Reads from a caller buffer, front to back.
#[derive(Debug)]
pub struct UserSliceReader(UserSlice);

impl UserSliceReader {
    /// Bytes left to read.
    pub fn len(&self) -> usize {
        self.0.len
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fills `out` completely from the caller buffer.
    pub fn read_slice(&mut self, out: &mut [u8]) -> Result<()> {
        if out.len() > self.0.len {
            return Err(LinuxError::EFAULT);
        }
        let left = unsafe {
            _copy_from_user(
                out.as_mut_ptr() as *mut c_void,
                self.0.ptr as *const c_void,
                out.len() as c_ulong,
            )
        };
        if left != 0 {
            return Err(LinuxError::EFAULT);
        }
        self.0.ptr = self.0.ptr.wrapping_add(out.len());
        self.0.len -= out.len();
        Ok(())
    }
}

/// Writes to a caller buffer, front to back.
#[derive(Debug)]
pub struct UserSliceWriter(UserSlice);

impl UserSliceWriter {
    /// Room left in the caller buffer.
    pub fn len(&self) -> usize {
        self.0.len
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn write_slice(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > self.0.len {
            return Err(LinuxError::EFAULT);
        }
        let left = unsafe {
            _copy_to_user(
                self.0.ptr as *mut c_void,
                data.as_ptr() as *const c_void,
                data.len() as c_ulong,
            )
        };
        if left != 0 {
            return Err(LinuxError::EFAULT);
        }
        self.0.ptr = self.0.ptr.wrapping_add(data.len());
        self.0.len -= data.len();
        Ok(())
    }
}
