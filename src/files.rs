use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{Result, ViewerError};

pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

// ---------------------------------------------------------------------------
// Image set
// ---------------------------------------------------------------------------

/// The images of one session, in display order. Never empty.
#[derive(Debug, Clone)]
pub struct ImageSet {
    paths: Vec<PathBuf>,
}

impl ImageSet {
    /// `dir` is only used to name the location in the error.
    pub fn new(paths: Vec<PathBuf>, dir: &Path) -> Result<Self> {
        if paths.is_empty() {
            return Err(ViewerError::NoImages {
                dir: dir.to_path_buf(),
            });
        }
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn get(&self, idx: usize) -> Option<&Path> {
        self.paths.get(idx).map(PathBuf::as_path)
    }
}

// ---------------------------------------------------------------------------
// Directory scan
// ---------------------------------------------------------------------------

fn is_image_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Normalise user-supplied extensions: strip a leading dot, lowercase.
pub fn normalize_extensions<S: AsRef<str>>(exts: &[S]) -> Vec<String> {
    exts.iter()
        .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Recursively collect images under `dir`. Each directory's own files come
/// first, sorted, followed by its subdirectories in sorted order.
pub fn scan_images(dir: &Path, extensions: &[String], follow_links: bool) -> Result<ImageSet> {
    let start_time = Instant::now();
    if !dir.is_dir() {
        return Err(ViewerError::NoImages {
            dir: dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    scan_dir(dir, extensions, follow_links, &mut files);
    log::info!(
        "Scan of {:?} complete in {:.2}s. Found {} images.",
        dir,
        start_time.elapsed().as_secs_f64(),
        files.len()
    );
    ImageSet::new(files, dir)
}

fn scan_dir(dir: &Path, extensions: &[String], follow_links: bool, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Skipping {:?}: {}", dir, e);
            return;
        }
    };
    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in entries.filter_map(|e| e.ok()) {
        let Ok(ft) = entry.file_type() else { continue };
        if ft.is_symlink() && !follow_links {
            continue;
        }

        let p = entry.path();
        if p.is_file() && is_image_file(&p, extensions) {
            files.push(p);
        } else if p.is_dir() {
            subdirs.push(p);
        }
    }

    files.sort();
    if !files.is_empty() {
        log::debug!("Scanning {:?}... ({} images)", dir, files.len());
    }
    out.extend(files);

    subdirs.sort();
    for sub in subdirs {
        scan_dir(&sub, extensions, follow_links, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"not really an image").expect("write test file");
        path
    }

    fn default_exts() -> Vec<String> {
        normalize_extensions(DEFAULT_EXTENSIONS)
    }

    #[test]
    fn scan_is_sorted_and_recursive() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("a_nested");
        fs::create_dir(&nested).expect("mkdir");
        let b = touch(dir.path(), "b.png");
        let a = touch(dir.path(), "a.JPG");
        let c = touch(&nested, "c.jpeg");
        touch(dir.path(), "notes.txt");

        let set = scan_images(dir.path(), &default_exts(), false).expect("scan");
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0), Some(a.as_path()));
        assert_eq!(set.get(1), Some(b.as_path()));
        assert_eq!(set.get(2), Some(c.as_path()));
        assert_eq!(set.get(3), None);
    }

    #[test]
    fn empty_directory_is_fatal() {
        let dir = tempdir().expect("tempdir");
        touch(dir.path(), "readme.md");
        let err = scan_images(dir.path(), &default_exts(), false).unwrap_err();
        assert!(matches!(err, ViewerError::NoImages { .. }));
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempdir().expect("tempdir");
        let err = scan_images(&dir.path().join("images"), &default_exts(), false).unwrap_err();
        assert!(matches!(err, ViewerError::NoImages { .. }));
    }

    #[test]
    fn custom_extensions() {
        let dir = tempdir().expect("tempdir");
        touch(dir.path(), "a.png");
        let gif = touch(dir.path(), "b.gif");
        let set = scan_images(dir.path(), &normalize_extensions(&[".GIF"]), false).expect("scan");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0), Some(gif.as_path()));
    }

    #[test]
    fn image_set_rejects_empty() {
        assert!(ImageSet::new(Vec::new(), Path::new("images")).is_err());
    }
}
