use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds the Rust source files that may define models.
///
/// Walks the model directory recursively, skipping `target` and hidden
/// directories. Files are returned sorted by path so that model lookup,
/// which takes the first match, is stable across platforms.
///
/// # Example
///
/// ```no_run
/// use swaggerize::scanner::ModelScanner;
/// use std::path::PathBuf;
///
/// let result = ModelScanner::new(PathBuf::from("./src/models")).scan().unwrap();
/// println!("Found {} source files", result.source_files.len());
/// ```
pub struct ModelScanner {
    root_path: PathBuf,
}

/// Source files found under the model directory
#[derive(Debug)]
pub struct ScanResult {
    pub source_files: Vec<PathBuf>,
    /// Entries that could not be read; scanning continued past them
    pub warnings: Vec<String>,
}

impl ModelScanner {
    /// Creates a new `ModelScanner`.
    ///
    /// # Arguments
    ///
    /// * `root_path` - The model directory, or a single model file
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Collect every `.rs` file under the root.
    ///
    /// A single file as root is accepted and returned on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist.
    pub fn scan(&self) -> Result<ScanResult> {
        let metadata = std::fs::metadata(&self.root_path)
            .with_context(|| format!("Cannot access model path: {}", self.root_path.display()))?;

        if metadata.is_file() {
            debug!("Model path is a single file: {}", self.root_path.display());
            return Ok(ScanResult {
                source_files: vec![self.root_path.clone()],
                warnings: Vec::new(),
            });
        }

        let mut source_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| e.path() == self.root_path || !is_ignored(e.path()))
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("rs") {
                        source_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        source_files.sort();
        debug!(
            "Found {} source files under {}",
            source_files.len(),
            self.root_path.display()
        );

        Ok(ScanResult {
            source_files,
            warnings,
        })
    }
}

fn is_ignored(path: &Path) -> bool {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    file_name.starts_with('.') || file_name == "target"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn file_names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .source_files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_nested_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("models/user")).unwrap();
        fs::write(root.join("models/user/put.rs"), "struct PutUser {}").unwrap();
        fs::write(root.join("models/status.rs"), "struct GetStatus {}").unwrap();
        fs::write(root.join("a.rs"), "struct A;").unwrap();
        fs::write(root.join("routes.yaml"), "routes: []").unwrap();

        let result = ModelScanner::new(root.to_path_buf()).scan().unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(
            file_names(&result, root),
            vec!["a.rs", "models/status.rs", "models/user/put.rs"]
        );
    }

    #[test]
    fn test_scan_skips_target_and_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("target")).unwrap();
        fs::create_dir(root.join(".cache")).unwrap();
        fs::write(root.join("target/gen.rs"), "struct Gen {}").unwrap();
        fs::write(root.join(".cache/old.rs"), "struct Old {}").unwrap();
        fs::write(root.join("models.rs"), "struct Model {}").unwrap();

        let result = ModelScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(file_names(&result, root), vec!["models.rs"]);
    }

    #[test]
    fn test_scan_single_file_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("models.rs");
        fs::write(&file, "struct Model {}").unwrap();

        let result = ModelScanner::new(file.clone()).scan().unwrap();

        assert_eq!(result.source_files, vec![file]);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = ModelScanner::new(missing).scan().unwrap_err();
        assert!(err.to_string().contains("Cannot access model path"));
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = ModelScanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert!(result.source_files.is_empty());
        assert!(result.warnings.is_empty());
    }
}
