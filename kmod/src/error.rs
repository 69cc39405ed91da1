use core::ffi::c_int;

use axerrno::LinuxError;

/// Errors a procfs callback or module hook is expected to report. Codes
/// outside this set come back as `EIO`.
const KNOWN: [LinuxError; 9] = [
    LinuxError::EPERM,
    LinuxError::ENOENT,
    LinuxError::EIO,
    LinuxError::ENOMEM,
    LinuxError::EACCES,
    LinuxError::EFAULT,
    LinuxError::EBUSY,
    LinuxError::EEXIST,
    LinuxError::EINVAL,
];

/// Converts an error into the negative errno handed across the C boundary.
pub fn to_errno(err: LinuxError) -> c_int {
    -(err as c_int)
}

/// Converts a negative errno returned across the C boundary back into an
/// error.
pub fn from_errno(code: c_int) -> LinuxError {
    let code = code.checked_neg().unwrap_or(c_int::MAX);
    KNOWN
        .into_iter()
        .find(|err| *err as c_int == code)
        .unwrap_or(LinuxError::EIO)
}
