#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct mod_section {
    pub shndx: core::ffi::c_int,
    pub num_entries: core::ffi::c_int,
    pub max_entries: core::ffi::c_int,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct mod_arch_specific {
    pub got: mod_section,
    pub plt: mod_section,
    pub got_plt: mod_section,
}
