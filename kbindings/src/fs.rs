//! procfs and VFS types.
//!
//! See <https://elixir.bootlin.com/linux/v6.6/source/include/linux/proc_fs.h#L29>

use crate::{__poll_t, loff_t, size_t, ssize_t};

#[repr(C)]
pub struct file {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct inode {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct proc_dir_entry {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct kiocb {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct iov_iter {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct poll_table_struct {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct vm_area_struct {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct proc_ops {
    pub proc_flags: core::ffi::c_uint,
    pub proc_open:
        ::core::option::Option<unsafe extern "C" fn(*mut inode, *mut file) -> core::ffi::c_int>,
    pub proc_read: ::core::option::Option<
        unsafe extern "C" fn(*mut file, *mut core::ffi::c_char, size_t, *mut loff_t) -> ssize_t,
    >,
    pub proc_read_iter:
        ::core::option::Option<unsafe extern "C" fn(*mut kiocb, *mut iov_iter) -> ssize_t>,
    pub proc_write: ::core::option::Option<
        unsafe extern "C" fn(*mut file, *const core::ffi::c_char, size_t, *mut loff_t) -> ssize_t,
    >,
    pub proc_lseek: ::core::option::Option<
        unsafe extern "C" fn(*mut file, loff_t, core::ffi::c_int) -> loff_t,
    >,
    pub proc_release:
        ::core::option::Option<unsafe extern "C" fn(*mut inode, *mut file) -> core::ffi::c_int>,
    pub proc_poll: ::core::option::Option<
        unsafe extern "C" fn(*mut file, *mut poll_table_struct) -> __poll_t,
    >,
    pub proc_ioctl: ::core::option::Option<
        unsafe extern "C" fn(*mut file, core::ffi::c_uint, core::ffi::c_ulong) -> core::ffi::c_long,
    >,
    // CONFIG_COMPAT
    pub proc_compat_ioctl: ::core::option::Option<
        unsafe extern "C" fn(*mut file, core::ffi::c_uint, core::ffi::c_ulong) -> core::ffi::c_long,
    >,
    pub proc_mmap: ::core::option::Option<
        unsafe extern "C" fn(*mut file, *mut vm_area_struct) -> core::ffi::c_int,
    >,
    pub proc_get_unmapped_area: ::core::option::Option<
        unsafe extern "C" fn(
            *mut file,
            core::ffi::c_ulong,
            core::ffi::c_ulong,
            core::ffi::c_ulong,
            core::ffi::c_ulong,
        ) -> core::ffi::c_ulong,
    >,
}
