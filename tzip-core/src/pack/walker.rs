use crate::error::{Result, TzipError};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

fn dir_unavailable(dir: &Path, source: io::Error) -> TzipError {
    TzipError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    }
}

/// Byte-wise suffix test on the raw OS name. Names shorter than the suffix never match.
pub fn has_suffix(name: &OsStr, suffix: &str) -> bool {
    name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// Direct children of `dir` that are regular files (or links to one) whose
/// name ends in `suffix`, sorted byte-wise like `strcmp`.
pub fn list_sources(dir: &Path, suffix: &str) -> Result<Vec<OsString>> {
    let md = fs::metadata(dir).map_err(|e| dir_unavailable(dir, e))?;
    if !md.is_dir() {
        return Err(dir_unavailable(dir, io::Error::other("not a directory")));
    }

    let mut names = Vec::new();
    for e in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let e = e.map_err(|e| dir_unavailable(dir, e.into()))?;
        if !has_suffix(e.file_name(), suffix) {
            continue;
        }
        let is_file = if e.path_is_symlink() {
            fs::metadata(e.path()).map(|m| m.is_file()).unwrap_or(false)
        } else {
            e.file_type().is_file()
        };
        if is_file {
            names.push(e.file_name().to_os_string());
        }
    }
    names.sort_unstable_by(|a, b| a.as_encoded_bytes().cmp(b.as_encoded_bytes()));
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn suffix_check_handles_short_names() {
        assert!(has_suffix(OsStr::new("a.txt"), ".txt"));
        assert!(has_suffix(OsStr::new(".txt"), ".txt"));
        assert!(!has_suffix(OsStr::new("txt"), ".txt"));
        assert!(!has_suffix(OsStr::new(""), ".txt"));
        assert!(!has_suffix(OsStr::new("a.txt.bak"), ".txt"));
    }

    #[test]
    fn lists_matching_files_in_byte_order() {
        let dir = tempdir().unwrap();
        for name in ["b.txt", "a.txt", "B.txt", "notes.md", "aa.txt", "x"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let names = list_sources(dir.path(), ".txt").unwrap();
        assert_eq!(names, vec!["B.txt", "a.txt", "aa.txt", "b.txt"]);
    }

    #[test]
    fn skips_directories_and_nested_entries() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub.txt")).unwrap();
        fs::write(dir.path().join("sub.txt").join("inner.txt"), "x").unwrap();
        fs::write(dir.path().join("top.txt"), "y").unwrap();
        let names = list_sources(dir.path(), ".txt").unwrap();
        assert_eq!(names, vec!["top.txt"]);
    }

    #[test]
    fn empty_directory_gives_empty_list() {
        let dir = tempdir().unwrap();
        assert!(list_sources(dir.path(), ".txt").unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = list_sources(&dir.path().join("nope"), ".txt").unwrap_err();
        assert!(matches!(err, TzipError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn regular_file_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("plain.txt");
        fs::write(&f, "z").unwrap();
        let err = list_sources(&f, ".txt").unwrap_err();
        assert!(matches!(err, TzipError::DirectoryUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn follows_links_to_files_and_skips_dangling_ones() {
        use std::os::unix::fs::symlink;
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("real.dat"), "r").unwrap();
        symlink(dir.path().join("real.dat"), dir.path().join("link.txt")).unwrap();
        symlink(dir.path().join("gone"), dir.path().join("dangling.txt")).unwrap();
        let names = list_sources(dir.path(), ".txt").unwrap();
        assert_eq!(names, vec!["link.txt"]);
    }
}
