//! A flat procfs: registration from modules, open/read/write from callers.
//!
//! Only entries directly under the procfs root are supported.
//!
//! References: <https://elixir.bootlin.com/linux/v6.6/source/fs/proc/generic.c>

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use core::ffi::{CStr, c_char, c_int};

use kbindings::{file, loff_t, proc_dir_entry, proc_ops, umode_t};
use kmod::{capi_fn, from_errno, procfs::ProcMode};
use spin::{Mutex, RwLock};

use crate::{KernelErr, Result};

struct ProcEntry {
    name: String,
    mode: ProcMode,
    ops: *const proc_ops,
    /// Cleared on removal. Callbacks run under the read side, so taking the
    /// write side waits for in-flight calls to drain.
    live: RwLock<bool>,
}

// `ops` points at a vtable the module keeps in static memory; it is only
// dereferenced while `live` is held and true.
unsafe impl Send for ProcEntry {}
unsafe impl Sync for ProcEntry {}

static ENTRIES: Mutex<BTreeMap<String, Arc<ProcEntry>>> = Mutex::new(BTreeMap::new());

/// # Safety
/// `name` must be null or a valid C string and `ops` null or a vtable that
/// outlives the entry.
unsafe fn create_entry(
    name: *const c_char,
    mode: umode_t,
    parent: *mut proc_dir_entry,
    ops: *const proc_ops,
) -> Result<*mut proc_dir_entry> {
    if !parent.is_null() {
        log::warn!("proc_create: only entries under the procfs root are supported");
        return Err(KernelErr::EINVAL);
    }
    if name.is_null() || ops.is_null() {
        return Err(KernelErr::EINVAL);
    }
    let name = CStr::from_ptr(name)
        .to_str()
        .map_err(|_| KernelErr::EINVAL)?;
    if name.is_empty() || name.contains('/') {
        log::warn!("proc_create: invalid name '{}'", name);
        return Err(KernelErr::EINVAL);
    }

    let mut entries = ENTRIES.lock();
    if entries.contains_key(name) {
        log::warn!("proc_dir_entry '/proc/{}' already registered", name);
        return Err(KernelErr::EEXIST);
    }
    let entry = Arc::new(ProcEntry {
        name: name.to_string(),
        mode: ProcMode::from_bits_truncate(mode),
        ops,
        live: RwLock::new(true),
    });
    let ptr = Arc::as_ptr(&entry) as *mut proc_dir_entry;
    log::debug!("proc_create: /proc/{} mode {}", name, entry.mode);
    entries.insert(entry.name.clone(), entry);
    Ok(ptr)
}

/// Creates `/proc/<name>` backed by `proc_ops`. Returns null on failure.
#[capi_fn]
pub unsafe extern "C" fn proc_create(
    name: *const c_char,
    mode: umode_t,
    parent: *mut proc_dir_entry,
    proc_ops: *const proc_ops,
) -> *mut proc_dir_entry {
    create_entry(name, mode, parent, proc_ops).unwrap_or(core::ptr::null_mut())
}

/// Removes `/proc/<name>`, waiting for callbacks already running on it.
#[capi_fn]
pub unsafe extern "C" fn remove_proc_entry(name: *const c_char, parent: *mut proc_dir_entry) {
    if !parent.is_null() {
        log::warn!("remove_proc_entry: only entries under the procfs root are supported");
        return;
    }
    if name.is_null() {
        return;
    }
    let Ok(name) = CStr::from_ptr(name).to_str() else {
        return;
    };
    let removed = ENTRIES.lock().remove(name);
    match removed {
        Some(entry) => {
            *entry.live.write() = false;
            log::debug!("remove_proc_entry: /proc/{}", name);
        }
        None => log::warn!("remove_proc_entry: name '{}' not found", name),
    }
}

/// Names and modes of the registered entries, sorted by name.
pub fn entries() -> Vec<(String, ProcMode)> {
    ENTRIES
        .lock()
        .values()
        .map(|entry| (entry.name.clone(), entry.mode))
        .collect()
}

/// How a caller opens an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Access {
    fn readable(self) -> bool {
        matches!(self, Access::Read | Access::ReadWrite)
    }

    fn writable(self) -> bool {
        matches!(self, Access::Write | Access::ReadWrite)
    }
}

/// Host-side state behind the `struct file` pointer handed to callbacks.
struct OpenFile {
    _access: Access,
}

/// An open proc file.
pub struct ProcFile {
    entry: Arc<ProcEntry>,
    access: Access,
    pos: loff_t,
    file: Box<OpenFile>,
}

/// Opens `/proc/<name>`.
///
/// Fails with `ENOENT` if no such entry is registered and with `EACCES` if
/// its mode does not grant `access`.
pub fn open(name: &str, access: Access) -> Result<ProcFile> {
    let entry = ENTRIES
        .lock()
        .get(name)
        .cloned()
        .ok_or(KernelErr::ENOENT)?;
    if access.readable() && !entry.mode.intersects(ProcMode::S_IRUGO) {
        return Err(KernelErr::EACCES);
    }
    if access.writable() && !entry.mode.intersects(ProcMode::S_IWUGO) {
        return Err(KernelErr::EACCES);
    }
    Ok(ProcFile {
        entry,
        access,
        pos: 0,
        file: Box::new(OpenFile { _access: access }),
    })
}

impl ProcFile {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// The position the callbacks left behind.
    pub fn pos(&self) -> loff_t {
        self.pos
    }

    fn file_ptr(&mut self) -> *mut file {
        &mut *self.file as *mut OpenFile as *mut file
    }

    /// Reads into `buf`, returning how many bytes the entry produced.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.access.readable() {
            return Err(KernelErr::EBADF);
        }
        let file = self.file_ptr();
        let live = self.entry.live.read();
        if !*live {
            return Err(KernelErr::EIO);
        }
        let ops = unsafe { &*self.entry.ops };
        let read = ops.proc_read.ok_or(KernelErr::EIO)?;
        let ret = unsafe {
            read(
                file,
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
                &mut self.pos,
            )
        };
        into_result(ret)
    }

    /// Writes `data`, returning how many bytes the entry accepted.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        if !self.access.writable() {
            return Err(KernelErr::EBADF);
        }
        let file = self.file_ptr();
        let live = self.entry.live.read();
        if !*live {
            return Err(KernelErr::EIO);
        }
        let ops = unsafe { &*self.entry.ops };
        let write = ops.proc_write.ok_or(KernelErr::EIO)?;
        let ret = unsafe {
            write(
                file,
                data.as_ptr() as *const c_char,
                data.len(),
                &mut self.pos,
            )
        };
        into_result(ret)
    }
}

fn into_result(ret: isize) -> Result<usize> {
    if ret < 0 {
        Err(from_errno(c_int::try_from(ret).unwrap_or(c_int::MIN)))
    } else {
        Ok(ret as usize)
    }
}
