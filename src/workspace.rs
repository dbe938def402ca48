use std::path::{Path, PathBuf};

const VCS_MARKERS: &[&str] = &[".git", ".hg", ".svn"];

/// Stable identity for "where the user is": the nearest ancestor directory
/// carrying a version-control marker, or the normalized start directory when
/// the walk hits the filesystem root without finding one.
pub fn workspace_key(start: &Path) -> PathBuf {
    let start = normalize(start);
    let mut dir = start.as_path();
    loop {
        if VCS_MARKERS.iter().any(|marker| dir.join(marker).exists()) {
            return dir.to_path_buf();
        }
        match dir.parent() {
            // parent == current means we reached the root.
            Some(parent) if parent != dir => dir = parent,
            _ => return start.clone(),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "tests/workspace_tests.rs"]
mod tests;
