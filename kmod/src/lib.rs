//! Module-side support for writing procfs kernel modules in Rust.
//!
//! A module links against a small set of host symbols (`proc_create`,
//! `remove_proc_entry`, `_copy_to_user`, `_copy_from_user`, `write_char`)
//! and reaches them only through the safe wrappers here.
#![no_std]

mod error;
mod module;
pub mod printk;
pub mod procfs;
pub mod uaccess;

pub use axerrno::LinuxError;
pub use error::{from_errno, to_errno};
pub use kbindings::{loff_t, proc_dir_entry, proc_ops};
pub use kmacro::{capi_fn, exit_fn, init_fn, module};
pub use module::Module;

pub type Result<T> = axerrno::LinuxResult<T>;
