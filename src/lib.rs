//! Answers one narrow question: can this machine report a file's true
//! creation time, and if so, what are its four standard timestamps?
//!
//! Linux only exposes creation (birth) time through statx(2), which has to
//! be probed for rather than assumed: the platform, the kernel version and
//! the glibc version are checked in order, and any denial short-circuits to
//! "unsupported". A successful probe returns the access, birth,
//! status-change and modification times as integer epoch seconds.
//!
//! ```no_run
//! if let Some(times) = xstat::get_creation_time(std::path::Path::new("Cargo.toml")) {
//!     println!("created at {}", times.btime);
//! }
//! ```

mod probe;
mod stat;
pub(crate) mod sys;
mod version;

pub use probe::{get_creation_time, FileTimes, HostApi, Probe, SysHost};
pub use stat::{Statx, StatxAttributes, StatxMask, StatxTimestamp};
pub use version::Version;
