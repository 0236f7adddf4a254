//! Writing a [`FileSet`] to disk with best-effort rollback.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::application::ports::Filesystem;
use crate::domain::{FileSet, FsEntry};
use crate::error::{ShurikenError, ShurikenResult};

/// What a write actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    /// Files left alone because they existed and were not to be overwritten.
    pub skipped: Vec<PathBuf>,
}

/// Write every entry of `set`, resolving its root against `base`.
///
/// If the root did not exist beforehand and any write fails, the root is
/// removed again. A pre-existing root is never removed.
pub fn write_file_set(
    filesystem: &dyn Filesystem,
    base: &Path,
    set: &FileSet,
) -> ShurikenResult<WriteReport> {
    set.validate().map_err(ShurikenError::Domain)?;

    let root = base.join(set.root());
    let root_existed = filesystem.exists(&root);

    match write_all(filesystem, &root, set) {
        Ok(report) => {
            info!(
                root = %root.display(),
                written = report.written.len(),
                skipped = report.skipped.len(),
                "Files written"
            );
            Ok(report)
        }
        Err(e) => {
            if root_existed {
                warn!(root = %root.display(), "Write failed; existing root left in place");
            } else {
                warn!("Write failed, attempting rollback");
                rollback(filesystem, &root);
            }
            Err(e)
        }
    }
}

fn write_all(filesystem: &dyn Filesystem, root: &Path, set: &FileSet) -> ShurikenResult<WriteReport> {
    filesystem.create_dir_all(root)?;

    let mut report = WriteReport::default();
    for entry in set.entries() {
        match entry {
            FsEntry::Directory(dir) => {
                filesystem.create_dir_all(&root.join(&dir.path))?;
            }
            FsEntry::File(file) => {
                let path = root.join(&file.path);

                if !file.overwrite && filesystem.exists(&path) {
                    debug!(path = %path.display(), "Keeping existing file");
                    report.skipped.push(path);
                    continue;
                }

                if let Some(parent) = path.parent() {
                    filesystem.create_dir_all(parent)?;
                }
                filesystem.write_file(&path, &file.content)?;
                report.written.push(path);
            }
        }
    }
    Ok(report)
}

fn rollback(filesystem: &dyn Filesystem, root: &Path) {
    if let Err(e) = filesystem.remove_dir_all(root) {
        warn!(
            error = %e,
            path = %root.display(),
            "Rollback failed"
        );
    } else {
        info!("Rollback successful");
    }
}
