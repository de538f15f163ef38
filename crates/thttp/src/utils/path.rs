use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Join a decoded request path onto `root`.
///
/// Only plain file names and `.` are accepted; `..`, absolute roots and
/// drive prefixes return `None` so the result can never climb out of `root`.
pub fn join_within(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));

    relative
        .components()
        .try_fold(root.to_path_buf(), |mut joined, component| {
            match component {
                Component::Normal(name) => joined.push(name),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
            Some(joined)
        })
}

/// Check that writing to `path` stays inside `canonical_root` once symlinks
/// are resolved.
///
/// Existing paths are canonicalized directly. For a path that does not exist
/// yet, its parent directory is canonicalized instead; a dangling symlink is
/// refused because opening it would create its target. A missing parent is
/// reported as the underlying I/O error.
pub async fn is_write_target_within(path: &Path, canonical_root: &Path) -> std::io::Result<bool> {
    match fs::canonicalize(path).await {
        Ok(real_path) => Ok(real_path.starts_with(canonical_root)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if fs::symlink_metadata(path).await.is_ok() {
                return Ok(false);
            }
            let parent = path.parent().unwrap_or(path);
            let real_parent = fs::canonicalize(parent).await?;
            Ok(real_parent.starts_with(canonical_root))
        }
        Err(e) => Err(e),
    }
}
