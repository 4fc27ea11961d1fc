use bitflags::bitflags;

bitflags! {
    /// Field bits for the statx request mask and the `stx_mask` result.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatxMask: u32 {
        /// Want/got stx_mode & S_IFMT
        const TYPE = 0x0000_0001;
        /// Want/got stx_mode & ~S_IFMT
        const MODE = 0x0000_0002;
        /// Want/got stx_nlink
        const NLINK = 0x0000_0004;
        /// Want/got stx_uid
        const UID = 0x0000_0008;
        /// Want/got stx_gid
        const GID = 0x0000_0010;
        /// Want/got stx_atime
        const ATIME = 0x0000_0020;
        /// Want/got stx_mtime
        const MTIME = 0x0000_0040;
        /// Want/got stx_ctime
        const CTIME = 0x0000_0080;
        /// Want/got stx_ino
        const INO = 0x0000_0100;
        /// Want/got stx_size
        const SIZE = 0x0000_0200;
        /// Want/got stx_blocks
        const BLOCKS = 0x0000_0400;
        /// Everything in the classic stat struct
        const BASIC_STATS = 0x0000_07ff;
        /// Want/got stx_btime
        const BTIME = 0x0000_0800;
        /// Got stx_mnt_id
        const MNT_ID = 0x0000_1000;
    }
}

bitflags! {
    /// File state bits reported in `stx_attributes` and masked by
    /// `stx_attributes_mask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatxAttributes: u64 {
        /// File is compressed by the fs
        const COMPRESSED = 0x0000_0004;
        /// File is marked immutable
        const IMMUTABLE = 0x0000_0010;
        /// File is append-only
        const APPEND = 0x0000_0020;
        /// File is not to be dumped
        const NODUMP = 0x0000_0040;
        /// File requires key to decrypt in fs
        const ENCRYPTED = 0x0000_0800;
        /// Dir: automount trigger
        const AUTOMOUNT = 0x0000_1000;
        /// Root of a mount
        const MOUNT_ROOT = 0x0000_2000;
        /// Verity protected file
        const VERITY = 0x0010_0000;
        /// File is currently in DAX state
        const DAX = 0x0020_0000;
    }
}

/// One timestamp as the kernel reports it. 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StatxTimestamp {
    /// Seconds since the epoch
    pub tv_sec: i64,
    /// Nanoseconds within the second
    pub tv_nsec: u32,
    __pad: i32,
}

/// The statx result buffer, laid out exactly as `struct statx` in the
/// kernel uapi (`linux/stat.h`). 256 bytes; the kernel writes every field,
/// so any divergence in order or padding corrupts everything that follows.
/// Reserved regions stay private — [`Statx::zeroed`] is the only way to
/// build one outside the syscall.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Statx {
    /// Bits indicating which fields were filled
    pub stx_mask: u32,
    /// Preferred I/O block size
    pub stx_blksize: u32,
    /// File attribute flags
    pub stx_attributes: u64,
    /// Number of hard links
    pub stx_nlink: u32,
    /// Owner user ID
    pub stx_uid: u32,
    /// Owner group ID
    pub stx_gid: u32,
    /// File type and mode
    pub stx_mode: u16,
    __pad1: u16,
    /// Inode number
    pub stx_ino: u64,
    /// Total size in bytes
    pub stx_size: u64,
    /// Number of 512-byte blocks allocated
    pub stx_blocks: u64,
    /// Attribute bits this filesystem supports
    pub stx_attributes_mask: u64,
    /// Last access time
    pub stx_atime: StatxTimestamp,
    /// Creation time
    pub stx_btime: StatxTimestamp,
    /// Last status change time
    pub stx_ctime: StatxTimestamp,
    /// Last modification time
    pub stx_mtime: StatxTimestamp,
    /// Device number when this file is a device, major half
    pub stx_rdev_major: u32,
    /// Device number when this file is a device, minor half
    pub stx_rdev_minor: u32,
    /// Device holding the containing filesystem, major half
    pub stx_dev_major: u32,
    /// Device holding the containing filesystem, minor half
    pub stx_dev_minor: u32,
    /// Mount identifier
    pub stx_mnt_id: u64,
    /// Direct I/O memory alignment
    pub stx_dio_mem_align: u32,
    /// Direct I/O file offset alignment
    pub stx_dio_offset_align: u32,
    __spare: [u64; 12],
}

impl Statx {
    /// An all-zero buffer for the kernel to fill.
    pub fn zeroed() -> Self {
        // Safety: Statx is plain old data, all-zero is a valid value.
        unsafe { std::mem::MaybeUninit::zeroed().assume_init() }
    }

    /// Fields the kernel actually filled.
    pub fn mask(&self) -> StatxMask {
        StatxMask::from_bits_truncate(self.stx_mask)
    }

    /// Attribute bits, restricted to those the filesystem supports.
    pub fn attributes(&self) -> StatxAttributes {
        StatxAttributes::from_bits_truncate(self.stx_attributes & self.stx_attributes_mask)
    }

    pub fn has_btime(&self) -> bool {
        self.mask().contains(StatxMask::BTIME)
    }
}
