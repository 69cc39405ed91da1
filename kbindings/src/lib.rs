//! Raw `#[repr(C)]` kernel ABI types shared by modules and the host.
//!
//! Layouts follow Linux v6.6. Types the module never dereferences are kept
//! opaque.
#![no_std]
#![allow(warnings)]

/// Implements `Default` as an all-zero bit pattern, the way bindgen does
/// for structs holding raw pointers.
macro_rules! zeroed_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Default for $ty {
                fn default() -> Self {
                    let mut s = ::core::mem::MaybeUninit::<Self>::uninit();
                    unsafe {
                        ::core::ptr::write_bytes(s.as_mut_ptr(), 0, 1);
                        s.assume_init()
                    }
                }
            }
        )*
    };
}

mod aarch64;
mod fs;
mod riscv64;
mod this_module;
mod x86_64;

#[cfg(target_arch = "aarch64")]
pub use aarch64::mod_arch_specific;
#[cfg(target_arch = "riscv64")]
pub use riscv64::mod_arch_specific;
#[cfg(target_arch = "x86_64")]
pub use x86_64::mod_arch_specific;

pub use fs::*;
pub use this_module::*;

pub type __s8 = core::ffi::c_schar;
pub type __u8 = core::ffi::c_uchar;
pub type __s16 = core::ffi::c_short;
pub type __u16 = core::ffi::c_ushort;
pub type __s32 = core::ffi::c_int;
pub type __u32 = core::ffi::c_uint;
pub type __s64 = core::ffi::c_longlong;
pub type __u64 = core::ffi::c_ulonglong;
pub type s8 = __s8;
pub type u8_ = __u8;
pub type s16 = __s16;
pub type u16_ = __u16;
pub type s32 = __s32;
pub type u32_ = __u32;
pub type s64 = __s64;
pub type u64_ = __u64;
pub type bool_ = bool;

pub type size_t = usize;
pub type ssize_t = isize;
pub type loff_t = core::ffi::c_longlong;
pub type umode_t = core::ffi::c_ushort;
pub type __poll_t = core::ffi::c_uint;
