//! Copies between kernel memory and caller space.
//!
//! Both routines return the number of bytes that could NOT be copied.
//!
//! References: <https://elixir.bootlin.com/linux/v6.6/source/lib/usercopy.c>

use core::ffi::{c_ulong, c_void};

use kmod::capi_fn;

/// The first page is never mapped.
const PAGE_SIZE: usize = 4096;

fn access_ok(addr: usize, size: usize) -> bool {
    addr >= PAGE_SIZE && addr.checked_add(size).is_some()
}

#[capi_fn]
pub unsafe extern "C" fn _copy_to_user(
    to: *mut c_void,
    from: *const c_void,
    n: c_ulong,
) -> c_ulong {
    let size = n as usize;
    if size == 0 {
        return 0;
    }
    if !access_ok(to as usize, size) {
        return n;
    }
    core::ptr::copy_nonoverlapping(from as *const u8, to as *mut u8, size);
    0
}

#[capi_fn]
pub unsafe extern "C" fn _copy_from_user(
    to: *mut c_void,
    from: *const c_void,
    n: c_ulong,
) -> c_ulong {
    let size = n as usize;
    if size == 0 {
        return 0;
    }
    if !access_ok(from as usize, size) {
        // Linux zeroes the destination tail on a failed copy.
        core::ptr::write_bytes(to as *mut u8, 0, size);
        return n;
    }
    core::ptr::copy_nonoverlapping(from as *const u8, to as *mut u8, size);
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_to_user() {
        let src = *b"hello";
        let mut dst = [0u8; 5];
        let left = unsafe {
            _copy_to_user(
                dst.as_mut_ptr() as *mut c_void,
                src.as_ptr() as *const c_void,
                5,
            )
        };
        assert_eq!(left, 0);
        assert_eq!(&dst, b"hello");
    }

    #[test]
    fn test_bad_address() {
        let mut dst = [0xffu8; 4];
        let left = unsafe {
            _copy_from_user(dst.as_mut_ptr() as *mut c_void, 0x10 as *const c_void, 4)
        };
        assert_eq!(left, 4);
        assert_eq!(dst, [0; 4]);

        let left = unsafe {
            _copy_to_user(core::ptr::null_mut(), dst.as_ptr() as *const c_void, 4)
        };
        assert_eq!(left, 4);
    }

    #[test]
    fn test_empty_copy_always_succeeds() {
        let left = unsafe { _copy_to_user(core::ptr::null_mut(), core::ptr::null(), 0) };
        assert_eq!(left, 0);
    }
}
