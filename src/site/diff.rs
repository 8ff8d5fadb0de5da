//! Local inventory vs. remote manifest comparison

use super::{DiffResult, FileEntry, Manifest};
use std::collections::BTreeSet;

/// Partition local entries against a remote manifest
///
/// One pass over `local`: a path missing from `remote` is added, a path with a
/// different hash is modified, a matching hash is unchanged and reported nowhere.
/// Remote paths never visited are deleted. Pure; never touches the filesystem.
pub fn compare(local: &[FileEntry], remote: &Manifest) -> DiffResult {
    let mut added = Vec::new();
    let mut modified = Vec::new();
    let mut unvisited: BTreeSet<&str> = remote.keys().map(String::as_str).collect();

    for entry in local {
        match remote.get(&entry.path) {
            Some(remote_hash) => {
                if *remote_hash != entry.hash {
                    modified.push(entry.clone());
                }
                unvisited.remove(entry.path.as_str());
            }
            None => added.push(entry.clone()),
        }
    }

    DiffResult {
        added,
        modified,
        deleted: unvisited.into_iter().map(str::to_string).collect(),
    }
}
