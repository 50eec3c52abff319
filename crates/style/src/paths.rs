//! Filesystem helpers for locating the style file.

use std::env;
use std::path::{Path, PathBuf};

/// Style file location under the home directory.
pub const DEFAULT_STYLE_FILE: &str = ".config/terminal-threes/style.json";

/// Environment variable that overrides the style file location.
pub const STYLE_ENV: &str = "THREES_STYLE";

pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// `rel` resolved against `base`, unless it is already absolute.
pub fn make_abs(base: &Path, rel: &Path) -> PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        base.join(rel)
    }
}

/// `$THREES_STYLE` if set, otherwise the file under the home directory.
pub fn default_style_path() -> Option<PathBuf> {
    style_path_from(env::var_os(STYLE_ENV).map(PathBuf::from), home_dir())
}

fn style_path_from(overridden: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    match overridden.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => match env::current_dir() {
            Ok(cwd) => Some(make_abs(&cwd, &path)),
            Err(_) => Some(path),
        },
        None => home.map(|h| make_abs(&h, Path::new(DEFAULT_STYLE_FILE))),
    }
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}
