use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A source file known to the host project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFile {
    pub path: PathBuf,
    /// Path relative to the project root, with forward slashes.
    pub relative_path: String,
    pub language: Option<String>,
}

/// Maps report file paths onto the host project's files.
pub trait FileIndex {
    /// The main (non-generated, non-excluded) file for `path`, if indexed.
    fn main_file(&self, path: &str) -> Option<IndexedFile>;

    /// Whether any indexed file is written in `language`.
    fn has_files(&self, language: &str) -> bool;
}

/// Index that accepts every path as-is. Used when no project is scanned.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughIndex;

impl FileIndex for PassThroughIndex {
    fn main_file(&self, path: &str) -> Option<IndexedFile> {
        Some(IndexedFile {
            path: PathBuf::from(path),
            relative_path: path.replace('\\', "/"),
            language: language_for_path(Path::new(path)).map(String::from),
        })
    }

    fn has_files(&self, _language: &str) -> bool {
        true
    }
}

/// Files found under a project root.
#[derive(Debug, Clone, Default)]
pub struct ProjectFileIndex {
    root: PathBuf,
    files: Vec<IndexedFile>,
    by_path: HashMap<PathBuf, usize>,
}

impl ProjectFileIndex {
    /// Walks `root` recursively, skipping hidden directories and `bin`/`obj`
    /// build output.
    #[must_use]
    pub fn scan(root: &Path) -> Self {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let paths = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path);

        let index = Self::from_paths(&root, paths);
        tracing::debug!(
            "Indexed {} file(s) under {}",
            index.files.len(),
            index.root.display()
        );
        index
    }

    /// Builds an index from paths already known to live under `root`.
    pub fn from_paths(root: &Path, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut index = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        for path in paths {
            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            let language = language_for_path(&path).map(String::from);

            index.by_path.insert(path.clone(), index.files.len());
            index.files.push(IndexedFile {
                path,
                relative_path,
                language,
            });
        }

        index
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileIndex for ProjectFileIndex {
    fn main_file(&self, path: &str) -> Option<IndexedFile> {
        let path = Path::new(path);
        let candidate = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };

        self.by_path
            .get(&candidate)
            .or_else(|| {
                let canonical = candidate.canonicalize().ok()?;
                self.by_path.get(&canonical)
            })
            .map(|&i| self.files[i].clone())
    }

    fn has_files(&self, language: &str) -> bool {
        self.files
            .iter()
            .any(|f| f.language.as_deref() == Some(language))
    }
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "bin" || name == "obj"
}

/// Language key for a file extension NDepend understands.
#[must_use]
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "cs" => Some("cs"),
        "vb" => Some("vbnet"),
        _ => None,
    }
}
