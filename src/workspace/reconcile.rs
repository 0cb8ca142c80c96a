use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::codegen::arch::Arch;
use crate::codegen::Staging;
use crate::workspace::error::{ErrorKind, SyncError, SyncResult};
use crate::workspace::vcs::Vcs;

/// The minimal set of operations that makes the destination tree's generated
/// files byte-identical to the staged set. Paths are relative to the
/// destination root, in staging order.
#[derive(Debug, Default, PartialEq)]
pub struct ChangeSet {
    pub adds: Vec<String>,
    pub edits: Vec<String>,
    pub deletes: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.edits.is_empty() && self.deletes.is_empty()
    }
}

/// Enumerates previously generated stub files under each family's syscalls
/// directory, as paths relative to `root`. Missing directories contribute
/// nothing. Results are sorted so runs are comparable.
pub fn enumerate_stubs(root: &Path, archs: &[Arch]) -> SyncResult<Vec<String>> {
    let mut stubs = vec![];

    for arch in archs {
        let dir = root.join(arch.syscalls_dir());
        if !dir.is_dir() {
            continue;
        }

        let entries = fs::read_dir(&dir).map_err(|err| {
            SyncError::new(
                ErrorKind::ScanFailed,
                format!("error reading {}: {}", dir.display(), err).as_str(),
            )
        })?;

        for result in entries {
            let entry = result.map_err(|err| {
                SyncError::new(
                    ErrorKind::ScanFailed,
                    format!("error reading {}: {}", dir.display(), err).as_str(),
                )
            })?;

            let name = entry.file_name();
            let name = name.to_string_lossy();
            let is_file = entry.file_type().is_ok_and(|ft| ft.is_file());
            if is_file && name.ends_with(".S") {
                stubs.push(format!("{}/{}", arch.syscalls_dir(), name));
            }
        }
    }

    stubs.sort();
    Ok(stubs)
}

/// Writes every staged artifact beneath `staging_root`, creating parent
/// directories as needed. If the table mapped two syscalls to the same stub
/// path, the later artifact wins, as it would in the destination tree.
pub fn write_staging(staging: &Staging, staging_root: &Path) -> SyncResult<()> {
    for artifact in staging.artifacts() {
        let dst = staging_root.join(&artifact.path);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|err| write_error(&artifact.path, &err))?;
        }

        fs::write(&dst, &artifact.content).map_err(|err| write_error(&artifact.path, &err))?;
    }

    Ok(())
}

/// Classifies every path into ADD, EDIT, DELETE, or no-op:
/// - a staged path missing from the destination is an ADD;
/// - a staged path whose destination bytes differ from the staged bytes is an
///   EDIT;
/// - an old path that was not staged this run is a DELETE;
/// - identical bytes mean no operation, which is what makes a re-run over a
///   synchronized tree produce an empty change set.
pub fn classify(
    old_paths: &[String],
    new_paths: &[String],
    staging_root: &Path,
    dest_root: &Path,
) -> SyncResult<ChangeSet> {
    let mut change_set = ChangeSet::default();

    let mut seen: HashSet<&String> = HashSet::new();
    for path in new_paths {
        if !seen.insert(path) {
            continue;
        }

        let dest = dest_root.join(path);
        if !dest.exists() {
            change_set.adds.push(path.clone());
            continue;
        }

        let staged_bytes = read_bytes(&staging_root.join(path), path)?;
        let dest_bytes = read_bytes(&dest, path)?;
        if staged_bytes != dest_bytes {
            change_set.edits.push(path.clone());
        }
    }

    let new_set: HashSet<&String> = new_paths.iter().collect();
    for path in old_paths {
        if !new_set.contains(path) {
            change_set.deletes.push(path.clone());
        }
    }

    Ok(change_set)
}

/// Applies the change set to the destination tree: copies ADD contents in and
/// registers them, retires and removes DELETE paths, then opens EDIT paths and
/// overwrites them with their staged bytes. VCS outcomes are not inspected;
/// only filesystem failures abort.
pub fn apply(
    change_set: &ChangeSet,
    vcs: &mut dyn Vcs,
    staging_root: &Path,
    dest_root: &Path,
) -> SyncResult<()> {
    if !change_set.adds.is_empty() {
        for path in &change_set.adds {
            copy_in(path, staging_root, dest_root)?;
        }

        vcs.stage(&change_set.adds);
    }

    if !change_set.deletes.is_empty() {
        vcs.retire(&change_set.deletes);

        for path in &change_set.deletes {
            // The VCS may already have removed the file.
            match fs::remove_file(dest_root.join(path)) {
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(SyncError::new(
                        ErrorKind::WriteFailed,
                        format!("error removing {}: {}", path, err).as_str(),
                    ))
                }
            }
        }
    }

    if !change_set.edits.is_empty() {
        vcs.promote(&change_set.edits);

        for path in &change_set.edits {
            copy_in(path, staging_root, dest_root)?;
        }
    }

    Ok(())
}

/// Copies one staged file into the destination tree.
fn copy_in(path: &str, staging_root: &Path, dest_root: &Path) -> SyncResult<()> {
    let dst = dest_root.join(path);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|err| write_error(path, &err))?;
    }

    fs::copy(staging_root.join(path), &dst).map_err(|err| write_error(path, &err))?;
    Ok(())
}

fn read_bytes(full_path: &Path, rel_path: &str) -> SyncResult<Vec<u8>> {
    fs::read(full_path).map_err(|err| {
        SyncError::new(
            ErrorKind::ReadFailed,
            format!("error reading {}: {}", rel_path, err).as_str(),
        )
    })
}

fn write_error(rel_path: &str, err: &io::Error) -> SyncError {
    SyncError::new(
        ErrorKind::WriteFailed,
        format!("error writing {}: {}", rel_path, err).as_str(),
    )
}
