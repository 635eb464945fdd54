//! Filesystem usage for an arbitrary path via `statvfs(3)`.

use std::ffi::CString;
use std::io;

use crate::core::system_monitor::DiskSample;
use crate::error::{Result, SysmonError};
use crate::logging::Logger;

/// `(total, used)` bytes of the filesystem containing `path`.
fn statvfs_usage(path: &str) -> Result<(u64, u64)> {
    let c_path = CString::new(path)
        .map_err(|_| SysmonError::collection(format!("invalid mount path: {:?}", path)))?;

    // SAFETY: `stat` is a plain C struct fully written by statvfs on success,
    // and `c_path` is a valid NUL-terminated string for the call's duration.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(io::Error::last_os_error().into());
    }

    let block_size = stat.f_frsize as u64;
    let blocks = stat.f_blocks as u64;
    let free = stat.f_bfree as u64;
    Ok((blocks * block_size, blocks.saturating_sub(free) * block_size))
}

/// One sample per requested path; paths that cannot be queried are
/// reported as unavailable.
pub(super) fn sample_paths(mount_points: &[String], logger: &Logger) -> Vec<DiskSample> {
    mount_points
        .iter()
        .map(|path| match statvfs_usage(path) {
            Ok((total, used)) => DiskSample::new(path, total, used),
            Err(e) => {
                logger.debug(format_args!("disk {} unavailable: {}", path, e));
                DiskSample::unavailable(path)
            }
        })
        .collect()
}
