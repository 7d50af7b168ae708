//! File discovery for source folders.

use std::path::{Path, PathBuf};

use crate::catalog::SourceFile;
use crate::error::{IngestError, Result};
use crate::tabular::TabularFormat;

/// Base name of the rules file in every source folder.
pub const RULES_FILE_STEM: &str = "rules";

fn read_dir_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }
    Ok(paths)
}

/// Lists the source folders directly under `input_dir`, sorted by name.
///
/// Hidden directories are skipped.
pub fn list_source_folders(input_dir: &Path) -> Result<Vec<String>> {
    let mut folders: Vec<String> = read_dir_paths(input_dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect();
    folders.sort();
    Ok(folders)
}

/// Lists the CSV and TSV files in a folder, sorted by file name.
pub fn list_tabular_files(dir: &Path) -> Result<Vec<SourceFile>> {
    let mut files: Vec<SourceFile> = read_dir_paths(dir)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let format = TabularFormat::from_path(&path)?;
            let name = path.file_name()?.to_str()?.to_string();
            Some(SourceFile::new(name, format))
        })
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Picks the rules file, preferring CSV over TSV when both exist.
pub fn find_rules_file(files: &[SourceFile]) -> Option<&SourceFile> {
    files
        .iter()
        .filter(|file| file.is_rules_file())
        .min_by_key(|file| file.format)
}

/// Data files of a folder: everything except the rules file.
pub fn data_files(files: &[SourceFile]) -> Vec<&SourceFile> {
    files.iter().filter(|file| !file.is_rules_file()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let scale = dir.path().join("scale");
        std::fs::create_dir(&scale).unwrap();
        for name in &["rules.csv", "scale_2025.csv", "scale_2026.TSV", "notes.txt"] {
            std::fs::write(scale.join(name), "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("hrv")).unwrap();
        std::fs::create_dir(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join("stray.csv"), "x").unwrap();
        dir
    }

    #[test]
    fn test_list_source_folders() {
        let dir = create_test_dir();
        let folders = list_source_folders(dir.path()).unwrap();
        assert_eq!(folders, vec!["hrv", "scale"]);
    }

    #[test]
    fn test_list_tabular_files() {
        let dir = create_test_dir();
        let files = list_tabular_files(&dir.path().join("scale")).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["rules.csv", "scale_2025.csv", "scale_2026.TSV"]);
        assert_eq!(files[2].format, TabularFormat::Tsv);
    }

    #[test]
    fn test_list_source_folders_not_a_directory() {
        let dir = create_test_dir();
        let result = list_source_folders(&dir.path().join("stray.csv"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_find_rules_file_prefers_csv() {
        let files = vec![
            SourceFile::new("rules.tsv", TabularFormat::Tsv),
            SourceFile::new("rules.csv", TabularFormat::Csv),
            SourceFile::new("data.csv", TabularFormat::Csv),
        ];
        assert_eq!(find_rules_file(&files).unwrap().name, "rules.csv");
        let data = data_files(&files);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].name, "data.csv");
    }

    #[test]
    fn test_find_rules_file_missing() {
        let files = vec![SourceFile::new("data.csv", TabularFormat::Csv)];
        assert!(find_rules_file(&files).is_none());
    }
}
