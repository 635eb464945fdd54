//! Configuration sources and hot reload.
//!
//! The monitor loop reads configuration only through [`ConfigSource`]. The
//! file-backed implementation keeps the active snapshot in an [`ArcSwap`], so
//! a reload replaces the whole snapshot in one store and any holder of the
//! previous `Arc` keeps a consistent view until it drops it.

use arc_swap::ArcSwap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::{Result, SysmonError};
use crate::logging::Logger;

use super::config::ConfigSnapshot;

/// Supplier of immutable configuration snapshots.
pub trait ConfigSource: Send {
    /// The last successfully validated snapshot.
    fn current(&self) -> Arc<ConfigSnapshot>;

    /// Swap in a new snapshot if the backing resource changed and the new
    /// content validates. Returns false in every other case, including a
    /// changed-but-invalid resource, which leaves the previous snapshot active.
    fn check_and_reload(&mut self) -> bool;
}

/// Configuration backed by a YAML file, versioned by its modification time.
pub struct FileConfigSource {
    path: PathBuf,
    snapshot: ArcSwap<ConfigSnapshot>,
    last_modified: Option<SystemTime>,
    rejected_modified: Option<SystemTime>,
    logger: Logger,
}

impl FileConfigSource {
    /// Load and validate the file. Failure here is fatal for the caller.
    pub fn load<P: AsRef<Path>>(path: P, logger: Logger) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let last_modified = modified_time(&path).ok();
        let snapshot = read_snapshot(&path)?;

        logger.debug(format_args!(
            "loaded configuration from {} (version {})",
            path.display(),
            snapshot.version
        ));

        Ok(Self {
            path,
            snapshot: ArcSwap::from_pointee(snapshot),
            last_modified,
            rejected_modified: None,
            logger,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn current(&self) -> Arc<ConfigSnapshot> {
        self.snapshot.load_full()
    }

    fn check_and_reload(&mut self) -> bool {
        let modified = match modified_time(&self.path) {
            Ok(time) => time,
            Err(e) => {
                self.logger.debug(format_args!(
                    "cannot stat {}: {}",
                    self.path.display(),
                    e
                ));
                return false;
            }
        };

        if Some(modified) == self.last_modified || Some(modified) == self.rejected_modified {
            return false;
        }

        match read_snapshot(&self.path) {
            Ok(snapshot) => {
                self.snapshot.store(Arc::new(snapshot));
                self.last_modified = Some(modified);
                self.rejected_modified = None;
                self.logger.info(format_args!(
                    "configuration reloaded from {}",
                    self.path.display()
                ));
                true
            }
            Err(e) => {
                // Remember the rejected version so it is reported once, not every tick.
                self.rejected_modified = Some(modified);
                self.logger.warn(format_args!(
                    "ignoring changed configuration {}: {}; keeping previous settings",
                    self.path.display(),
                    e
                ));
                false
            }
        }
    }
}

/// A fixed snapshot that never reloads.
pub struct StaticConfigSource {
    snapshot: Arc<ConfigSnapshot>,
}

impl StaticConfigSource {
    pub fn new(snapshot: ConfigSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

impl ConfigSource for StaticConfigSource {
    fn current(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.snapshot)
    }

    fn check_and_reload(&mut self) -> bool {
        false
    }
}

fn modified_time(path: &Path) -> std::io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

fn read_snapshot(path: &Path) -> Result<ConfigSnapshot> {
    let text = fs::read_to_string(path).map_err(|e| {
        SysmonError::config(format!("failed to read {}: {}", path.display(), e))
    })?;
    ConfigSnapshot::from_yaml_str(&text)
}
