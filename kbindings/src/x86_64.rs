// CONFIG_UNWINDER_ORC

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct mod_arch_specific {
    pub num_orcs: core::ffi::c_uint,
    pub orc_unwind_ip: *mut core::ffi::c_int,
    pub orc_unwind: *mut orc_entry,
}

#[repr(C, packed)]
#[derive(Debug, Default, Copy, Clone)]
pub struct orc_entry {
    pub sp_offset: i16,
    pub bp_offset: i16,
    pub flags: u16,
}

zeroed_default!(mod_arch_specific);
