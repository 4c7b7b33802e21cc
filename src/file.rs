// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Write the located table markup verbatim, for offline inspection.
/// Returns the path written to.
pub fn write_debug_markup(path: &Path, markup: &str) -> Result<PathBuf> {
    ensure_parent(path)?;
    fs::write(path, markup)?;
    logd!("Saved table markup ({} bytes) to {}", markup.len(), path.display());
    Ok(path.to_path_buf())
}

/// `-o` may name a file or a directory ("out/" or an existing dir); a directory gets `default_filename`.
pub fn resolve_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf> {
    if user_o.trim().is_empty() {
        return Ok(PathBuf::from(default_filename));
    }
    let p = PathBuf::from(normalize_separators(user_o.trim()));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Config(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_hint_gets_default_filename() {
        let tmp = tempfile::tempdir().unwrap();
        let hint = format!("{}/", tmp.path().join("reports").display());
        let out = resolve_out_path(&hint, "book.xlsx").unwrap();
        assert!(out.ends_with("book.xlsx"));
        assert!(tmp.path().join("reports").is_dir());
    }

    #[test]
    fn plain_file_path_is_kept() {
        let out = resolve_out_path("custom.xlsx", "book.xlsx").unwrap();
        assert_eq!(out, PathBuf::from("custom.xlsx"));
        assert_eq!(resolve_out_path("  ", "book.xlsx").unwrap(), PathBuf::from("book.xlsx"));
    }

    #[test]
    fn debug_markup_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("dump.html");
        write_debug_markup(&path, "<table class=\"tablesorter\"></table>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<table class=\"tablesorter\"></table>");
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        assert!(matches!(ensure_directory(&blocker), Err(Error::Config(_))));
    }
}
