use std::io::Result;
use std::path::Path;
use std::sync::LazyLock;

use crate::stat::{Statx, StatxMask};
use crate::version::Version;

/// Oldest kernel whose statx(2) reports creation time.
static MIN_KERNEL: LazyLock<Version> = LazyLock::new(|| Version::parse("4.11"));
/// Oldest glibc that ships the statx wrapper.
static MIN_LIBC: LazyLock<Version> = LazyLock::new(|| Version::parse("2.28"));

/// The host queries the probe gates on. Injectable so every gate is
/// testable in isolation; [`SysHost`] is the real thing.
pub trait HostApi {
    /// Platform name, e.g. "linux", "macos".
    fn os_name(&self) -> &'static str;
    /// Kernel release string as reported by the platform.
    fn kernel_release(&self) -> Option<String>;
    /// C runtime version string, when the runtime exposes one.
    fn libc_version(&self) -> Option<String>;
    /// statx(2) on `path` relative to the current working directory,
    /// requesting all basic stats plus birth time.
    fn statx(&self, path: &Path) -> Result<Statx>;
}

/// The live host. Stateless; capability is re-derived on every call so a
/// kernel or runtime upgrade under a running process is picked up.
pub struct SysHost;

impl HostApi for SysHost {
    fn os_name(&self) -> &'static str {
        std::env::consts::OS
    }

    #[cfg(target_os = "linux")]
    fn kernel_release(&self) -> Option<String> {
        crate::sys::linux::kernel_release()
    }
    #[cfg(not(target_os = "linux"))]
    fn kernel_release(&self) -> Option<String> {
        None
    }

    #[cfg(target_os = "linux")]
    fn libc_version(&self) -> Option<String> {
        crate::sys::linux::glibc_version()
    }
    #[cfg(not(target_os = "linux"))]
    fn libc_version(&self) -> Option<String> {
        None
    }

    #[cfg(target_os = "linux")]
    fn statx(&self, path: &Path) -> Result<Statx> {
        use std::os::unix::ffi::OsStrExt;
        let path = std::ffi::CString::new(path.as_os_str().as_bytes())
            .map_err(|_| std::io::Error::from(std::io::ErrorKind::InvalidInput))?;
        crate::sys::linux::statx(&path, StatxMask::BASIC_STATS | StatxMask::BTIME)
    }
    #[cfg(not(target_os = "linux"))]
    fn statx(&self, _path: &Path) -> Result<Statx> {
        Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
    }
}

/// The four standard timestamps of one file, in integer epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    /// Last access time
    pub atime: i64,
    /// Birth (creation) time
    pub btime: i64,
    /// Last status change time
    pub ctime: i64,
    /// Last modification time
    pub mtime: i64,
}

impl FileTimes {
    /// Access, birth, change, modified — in that fixed order.
    pub fn as_array(&self) -> [i64; 4] {
        [self.atime, self.btime, self.ctime, self.mtime]
    }
}

impl From<FileTimes> for [i64; 4] {
    fn from(times: FileTimes) -> Self {
        times.as_array()
    }
}

/// Capability-gated birth-time probe.
///
/// Gates run in order — platform, kernel version, C runtime version — and
/// any denial short-circuits to "unsupported" without touching the syscall.
pub struct Probe<H: HostApi = SysHost> {
    host: H,
}

impl Probe<SysHost> {
    pub fn new() -> Self {
        Self { host: SysHost }
    }
}

impl Default for Probe<SysHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostApi> Probe<H> {
    pub fn with_host(host: H) -> Self {
        Self { host }
    }

    /// Whether this host can report file creation time at all. Runs the
    /// platform, kernel and runtime gates without touching any file.
    pub fn supported(&self) -> bool {
        if self.host.os_name() != "linux" {
            log::debug!("statx probe: platform {:?} unsupported", self.host.os_name());
            return false;
        }
        let release = match self.host.kernel_release() {
            Some(release) => release,
            None => {
                log::debug!("statx probe: no kernel release available");
                return false;
            }
        };
        let kernel = match leading_version(&release) {
            Some(kernel) => kernel,
            None => {
                log::debug!("statx probe: unrecognized kernel release {:?}", release);
                return false;
            }
        };
        if Version::parse(kernel) < *MIN_KERNEL {
            log::debug!("statx probe: kernel {} older than {}", kernel, *MIN_KERNEL);
            return false;
        }
        let libc_version = match self.host.libc_version() {
            Some(version) => version,
            None => {
                log::debug!("statx probe: no C runtime version available");
                return false;
            }
        };
        if Version::parse(&libc_version) < *MIN_LIBC {
            log::debug!(
                "statx probe: C runtime {} older than {}",
                libc_version,
                *MIN_LIBC
            );
            return false;
        }
        true
    }

    /// The four timestamps of `path`, or `None` whenever the platform,
    /// kernel, runtime or the syscall itself cannot deliver them. Callers
    /// are expected to fall back to a coarser timestamp source on `None`.
    pub fn get_creation_time(&self, path: &Path) -> Option<FileTimes> {
        if !self.supported() {
            return None;
        }
        let stx = match self.host.statx(path) {
            Ok(stx) => stx,
            Err(e) => {
                log::debug!("statx({:?}) failed: {}", path, e);
                return None;
            }
        };
        let times = FileTimes {
            atime: stx.stx_atime.tv_sec,
            btime: stx.stx_btime.tv_sec,
            ctime: stx.stx_ctime.tv_sec,
            mtime: stx.stx_mtime.tv_sec,
        };
        log::debug!("{} Access", times.atime);
        log::debug!("{} Birth", times.btime);
        log::debug!("{} Change", times.ctime);
        log::debug!("{} Modified", times.mtime);
        Some(times)
    }
}

/// The leading digits-and-dots run of a kernel release string, with build
/// tags cut off ("5.15.0-101-generic" -> "5.15.0"). A release that does not
/// start with a digit has no version to compare and fails the gate.
fn leading_version(release: &str) -> Option<&str> {
    let end = release
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(release.len());
    let run = &release[..end];
    if run.starts_with(|c: char| c.is_ascii_digit()) {
        Some(run)
    } else {
        None
    }
}

/// Probes the live host for the four timestamps of `path`: access, birth,
/// status-change and modification, as integer epoch seconds.
pub fn get_creation_time(path: &Path) -> Option<FileTimes> {
    Probe::new().get_creation_time(path)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;
    use std::io::{Error, Result};

    struct FakeHost {
        os: &'static str,
        kernel: Option<&'static str>,
        libc: Option<&'static str>,
        /// access/birth/change/modified seconds, or `None` for a failing call
        times: Option<[i64; 4]>,
        statx_calls: Cell<u32>,
    }

    impl FakeHost {
        fn linux(kernel: &'static str, libc: &'static str) -> Self {
            Self {
                os: "linux",
                kernel: Some(kernel),
                libc: Some(libc),
                times: Some([100, 50, 150, 200]),
                statx_calls: Cell::new(0),
            }
        }
    }

    impl HostApi for FakeHost {
        fn os_name(&self) -> &'static str {
            self.os
        }
        fn kernel_release(&self) -> Option<String> {
            self.kernel.map(str::to_owned)
        }
        fn libc_version(&self) -> Option<String> {
            self.libc.map(str::to_owned)
        }
        fn statx(&self, _path: &Path) -> Result<Statx> {
            self.statx_calls.set(self.statx_calls.get() + 1);
            match self.times {
                Some([atime, btime, ctime, mtime]) => {
                    let mut stx = Statx::zeroed();
                    stx.stx_mask = (StatxMask::BASIC_STATS | StatxMask::BTIME).bits();
                    stx.stx_atime.tv_sec = atime;
                    stx.stx_btime.tv_sec = btime;
                    stx.stx_ctime.tv_sec = ctime;
                    stx.stx_mtime.tv_sec = mtime;
                    Ok(stx)
                }
                None => Err(Error::from_raw_os_error(libc::ENOENT)),
            }
        }
    }

    #[test]
    fn non_linux_platform_never_reaches_the_syscall() {
        let mut host = FakeHost::linux("5.15.0", "2.31");
        host.os = "macos";
        let probe = Probe::with_host(host);
        assert!(!probe.supported());
        assert_eq!(probe.get_creation_time(Path::new("/tmp/a")), None);
        assert_eq!(probe.host.statx_calls.get(), 0);
    }

    #[test]
    fn old_kernel_is_unsupported() {
        let probe = Probe::with_host(FakeHost::linux("4.9.0", "2.31"));
        assert!(!probe.supported());
        assert_eq!(probe.get_creation_time(Path::new("/tmp/a")), None);
        assert_eq!(probe.host.statx_calls.get(), 0);
    }

    #[test]
    fn old_libc_is_unsupported() {
        let probe = Probe::with_host(FakeHost::linux("5.15.0", "2.27"));
        assert!(!probe.supported());
        assert_eq!(probe.get_creation_time(Path::new("/tmp/a")), None);
    }

    #[test]
    fn missing_kernel_release_is_unsupported() {
        let mut host = FakeHost::linux("5.15.0", "2.31");
        host.kernel = None;
        assert!(!Probe::with_host(host).supported());
    }

    #[test]
    fn unparseable_kernel_release_is_unsupported() {
        let probe = Probe::with_host(FakeHost::linux("garbage", "2.31"));
        assert!(!probe.supported());
        assert_eq!(probe.get_creation_time(Path::new("/tmp/a")), None);
    }

    #[test]
    fn missing_libc_version_is_unsupported() {
        let mut host = FakeHost::linux("5.15.0", "2.31");
        host.libc = None;
        assert!(!Probe::with_host(host).supported());
    }

    #[test]
    fn build_suffix_on_kernel_release_is_tolerated() {
        let probe = Probe::with_host(FakeHost::linux("5.15.0-101-generic", "2.31"));
        assert!(probe.supported());
    }

    #[test]
    fn exact_minimum_versions_pass() {
        assert!(Probe::with_host(FakeHost::linux("4.11", "2.28")).supported());
        assert!(!Probe::with_host(FakeHost::linux("4.10.9", "2.28")).supported());
    }

    #[test]
    fn successful_probe_yields_times_in_fixed_order() {
        let probe = Probe::with_host(FakeHost::linux("5.15.0-101-generic", "2.31"));
        let times = probe.get_creation_time(Path::new("/tmp/a")).unwrap();
        assert_eq!(times.as_array(), [100, 50, 150, 200]);
        assert_eq!(times.btime, 50);
        assert_eq!(<[i64; 4]>::from(times), [100, 50, 150, 200]);
        assert_eq!(probe.host.statx_calls.get(), 1);
    }

    #[test]
    fn failed_syscall_folds_into_none() {
        let mut host = FakeHost::linux("5.15.0", "2.31");
        host.times = None;
        let probe = Probe::with_host(host);
        assert!(probe.supported());
        assert_eq!(probe.get_creation_time(Path::new("/nope")), None);
        assert_eq!(probe.host.statx_calls.get(), 1);
    }

    #[test]
    fn leading_version_extraction() {
        assert_eq!(leading_version("5.15.0-101-generic"), Some("5.15.0"));
        assert_eq!(leading_version("4.11"), Some("4.11"));
        assert_eq!(leading_version("6.1.0-rc1+"), Some("6.1.0"));
        assert_eq!(leading_version("garbage"), None);
        assert_eq!(leading_version(""), None);
        assert_eq!(leading_version(".5"), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn live_host_probe_does_not_panic() {
        // Outcome depends on the machine; only the contract matters here.
        let _ = get_creation_time(Path::new("."));
    }
}
