//! The only place in the crate that touches raw foreign memory. Every
//! wrapper performs one call and immediately copies the result into owned
//! values.

use std::ffi::CStr;
use std::io::{Error, Result};
use std::mem::MaybeUninit;

use crate::stat::{Statx, StatxMask};

mod ffi {
    use crate::stat::Statx;
    use libc::{c_char, c_int, c_uint};

    extern "C" {
        pub fn statx(
            dirfd: c_int,
            pathname: *const c_char,
            flags: c_int,
            mask: c_uint,
            statxbuf: *mut Statx,
        ) -> c_int;

        #[cfg(target_env = "gnu")]
        pub fn gnu_get_libc_version() -> *const c_char;
    }
}

/// Calls statx(2) on `path`, resolved relative to the current working
/// directory, following symlinks with default synchronization (flags = 0).
///
/// Any non-negative return code counts as success and yields the filled
/// buffer by value; a negative one yields the errno as an `io::Error`.
pub fn statx(path: &CStr, mask: StatxMask) -> Result<Statx> {
    let mut buf = MaybeUninit::<Statx>::zeroed();
    let rc = unsafe { ffi::statx(libc::AT_FDCWD, path.as_ptr(), 0, mask.bits(), buf.as_mut_ptr()) };
    if rc < 0 {
        Err(Error::last_os_error())
    } else {
        Ok(unsafe { buf.assume_init() })
    }
}

/// The kernel release string from uname(2), e.g. "5.15.0-101-generic".
pub fn kernel_release() -> Option<String> {
    let mut uts = MaybeUninit::<libc::utsname>::zeroed();
    if unsafe { libc::uname(uts.as_mut_ptr()) } != 0 {
        log::debug!("uname failed: {:?}", Error::last_os_error());
        return None;
    }
    let uts = unsafe { uts.assume_init() };
    let release = unsafe { CStr::from_ptr(uts.release.as_ptr()) };
    release.to_str().ok().map(str::to_owned)
}

/// The glibc version string, e.g. "2.31". Other libc implementations do not
/// export a version query, so everything non-gnu reports `None`.
#[cfg(target_env = "gnu")]
pub fn glibc_version() -> Option<String> {
    let ptr = unsafe { ffi::gnu_get_libc_version() };
    if ptr.is_null() {
        return None;
    }
    let version = unsafe { CStr::from_ptr(ptr) };
    version.to_str().ok().map(str::to_owned)
}

#[cfg(not(target_env = "gnu"))]
pub fn glibc_version() -> Option<String> {
    None
}
