use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::ManifestError;
use crate::render::{RenderedManifest, SERVICE_FILE};
use crate::resource::Manifests;

/// Renders and writes every manifest into `output_dir`, creating it if needed.
///
/// Returns the paths written, in render order.
pub fn write_manifests(
    manifests: &Manifests,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ManifestError> {
    let rendered = manifests.render()?;

    if manifests.service.is_none() && output_dir.join(SERVICE_FILE).exists() {
        tracing::warn!(
            path = %output_dir.join(SERVICE_FILE).display(),
            "no ports exposed; leaving existing service.yaml untouched"
        );
    }

    write_all(output_dir, &rendered)
}

/// Writes all files or none.
///
/// Each file is staged as a temporary file inside `output_dir` and only
/// renamed into place once every file has been staged. A file being replaced
/// is first moved aside; a failed rename puts the previous files back and
/// removes the ones this call created.
pub fn write_all(
    output_dir: &Path,
    files: &[RenderedManifest],
) -> Result<Vec<PathBuf>, ManifestError> {
    std::fs::create_dir_all(output_dir).map_err(|e| ManifestError::CreateDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".kubefy-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }

    // Staged files are deleted on drop if we bail out early.
    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let target = output_dir.join(file.file_name);
        let mut tmp = builder
            .tempfile_in(output_dir)
            .map_err(|e| ManifestError::Stage {
                path: target.clone(),
                source: e,
            })?;
        tmp.write_all(file.content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| ManifestError::Stage {
                path: target.clone(),
                source: e,
            })?;
        staged.push((tmp, target));
    }

    let mut placed: Vec<Placed> = Vec::with_capacity(staged.len());
    for (tmp, target) in staged {
        let backup = match back_up(&builder, output_dir, &target) {
            Ok(backup) => backup,
            Err(e) => {
                roll_back(placed);
                return Err(ManifestError::Stage {
                    path: target,
                    source: e,
                });
            }
        };
        match tmp.persist(&target) {
            Ok(_) => {
                tracing::info!(path = %target.display(), "wrote manifest");
                placed.push(Placed { target, backup });
            }
            Err(e) => {
                if let Some(backup) = backup {
                    restore(&backup, &target);
                }
                roll_back(placed);
                return Err(ManifestError::Write {
                    path: target,
                    source: e.error,
                });
            }
        }
    }

    // Dropping the placed entries deletes their backups.
    Ok(placed.into_iter().map(|p| p.target).collect())
}

/// A target that now holds new content, with the file it replaced.
struct Placed {
    target: PathBuf,
    backup: Option<TempPath>,
}

/// Moves whatever non-directory entry sits at `target` aside.
fn back_up(
    builder: &tempfile::Builder<'_, '_>,
    output_dir: &Path,
    target: &Path,
) -> std::io::Result<Option<TempPath>> {
    match std::fs::symlink_metadata(target) {
        Ok(meta) if !meta.is_dir() => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    }
    let backup = builder.tempfile_in(output_dir)?.into_temp_path();
    std::fs::rename(target, &backup)?;
    tracing::debug!(
        path = %target.display(),
        backup = %backup.display(),
        "moved previous manifest aside"
    );
    Ok(Some(backup))
}

/// Undoes placements newest first: restores each backup over its target, or
/// removes targets that had none.
fn roll_back(placed: Vec<Placed>) {
    for Placed { target, backup } in placed.into_iter().rev() {
        match backup {
            Some(backup) => restore(&backup, &target),
            None => {
                if let Err(e) = std::fs::remove_file(&target) {
                    tracing::warn!(
                        path = %target.display(),
                        error = %e,
                        "failed to roll back manifest"
                    );
                }
            }
        }
    }
}

fn restore(backup: &TempPath, target: &Path) {
    if let Err(e) = std::fs::rename(backup, target) {
        tracing::warn!(
            path = %target.display(),
            backup = %backup.display(),
            error = %e,
            "failed to restore previous manifest"
        );
    }
}
