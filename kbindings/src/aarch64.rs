/// Linux localhost 6.12.57+deb13-arm64 #1 SMP Debian 6.12.57-1 (2025-11-05) aarch64 GNU/Linux

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct mod_arch_specific {
    pub core: mod_plt_sec,
    pub init: mod_plt_sec,
    // CONFIG_DYNAMIC_FTRACE
    pub ftrace_trampolines: *mut plt_entry,
    pub init_ftrace_trampolines: *mut plt_entry,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct mod_plt_sec {
    pub plt_shndx: core::ffi::c_int,
    pub plt_num_entries: core::ffi::c_int,
    pub plt_max_entries: core::ffi::c_int,
}

/// `adrp x16; add x16, x16, #lo12; br x16` veneer.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct plt_entry {
    pub adrp: u32,
    pub add: u32,
    pub br: u32,
}

zeroed_default!(mod_arch_specific);
