//! Access to source folders and their files.
//!
//! The folder processor only talks to a [`SourceCatalog`], so it can run over
//! the real input directory or over in-memory fixtures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::discovery::{RULES_FILE_STEM, list_source_folders, list_tabular_files};
use crate::error::{IngestError, Result};
use crate::tabular::{TabularFormat, read_rows, read_rows_from_reader};

/// A tabular file inside a source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub format: TabularFormat,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, format: TabularFormat) -> Self {
        Self {
            name: name.into(),
            format,
        }
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }

    pub fn is_rules_file(&self) -> bool {
        self.stem().eq_ignore_ascii_case(RULES_FILE_STEM)
    }
}

/// Listing and reading capability over source folders.
pub trait SourceCatalog {
    /// Source folder names, sorted.
    fn folders(&self) -> Result<Vec<String>>;

    /// Tabular files of one folder, sorted by name.
    fn files(&self, folder: &str) -> Result<Vec<SourceFile>>;

    /// Raw rows of one file.
    fn read_rows(&self, folder: &str, file: &SourceFile) -> Result<Vec<Vec<String>>>;
}

/// Catalog over an input directory with one sub-directory per source.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    root: PathBuf,
}

impl FsCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn folder_path(&self, folder: &str) -> PathBuf {
        self.root.join(folder)
    }
}

impl SourceCatalog for FsCatalog {
    fn folders(&self) -> Result<Vec<String>> {
        list_source_folders(&self.root)
    }

    fn files(&self, folder: &str) -> Result<Vec<SourceFile>> {
        list_tabular_files(&self.folder_path(folder))
    }

    fn read_rows(&self, folder: &str, file: &SourceFile) -> Result<Vec<Vec<String>>> {
        read_rows(&self.folder_path(folder).join(&file.name), file.format)
    }
}

/// Catalog holding file contents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    folders: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file; folders are created on demand.
    pub fn insert(&mut self, folder: &str, file_name: &str, contents: impl Into<String>) {
        self.folders
            .entry(folder.to_string())
            .or_default()
            .insert(file_name.to_string(), contents.into());
    }

    #[must_use]
    pub fn with_file(mut self, folder: &str, file_name: &str, contents: impl Into<String>) -> Self {
        self.insert(folder, file_name, contents);
        self
    }

    fn origin(folder: &str, name: &str) -> PathBuf {
        Path::new(folder).join(name)
    }
}

impl SourceCatalog for MemoryCatalog {
    fn folders(&self) -> Result<Vec<String>> {
        Ok(self.folders.keys().cloned().collect())
    }

    fn files(&self, folder: &str) -> Result<Vec<SourceFile>> {
        let Some(files) = self.folders.get(folder) else {
            return Err(IngestError::DirectoryNotFound {
                path: PathBuf::from(folder),
            });
        };
        Ok(files
            .keys()
            .filter_map(|name| {
                let format = TabularFormat::from_path(Path::new(name))?;
                Some(SourceFile::new(name.clone(), format))
            })
            .collect())
    }

    fn read_rows(&self, folder: &str, file: &SourceFile) -> Result<Vec<Vec<String>>> {
        let origin = Self::origin(folder, &file.name);
        let contents = self
            .folders
            .get(folder)
            .and_then(|files| files.get(&file.name))
            .ok_or_else(|| IngestError::FileNotFound {
                path: origin.clone(),
            })?;
        read_rows_from_reader(contents.as_bytes(), file.format, &origin)
    }
}
