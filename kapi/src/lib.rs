//! Host side of the kernel API that procfs modules link against.
//!
//! Every `#[capi_fn]` here is exported unmangled and resolves a symbol a
//! module declares in an `unsafe extern "C"` block. The caller-facing half
//! of procfs (`proc_fs::open` and the `ProcFile` handle) is plain Rust.
#![no_std]
#![allow(unsafe_op_in_unsafe_fn)]
extern crate alloc;

use axerrno::{LinuxError, LinuxResult};

type Result<T> = LinuxResult<T>;
type KernelErr = LinuxError;

pub mod printk;
pub mod proc_fs;
pub mod uaccess;
