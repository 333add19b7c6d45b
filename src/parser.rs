use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Parses model source files into syntax trees with `syn`.
pub struct SourceParser;

/// A parsed model source file
#[derive(Debug)]
pub struct ParsedSource {
    pub path: PathBuf,
    pub syntax_tree: syn::File,
}

impl SourceParser {
    /// Read and parse one source file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid Rust.
    pub fn parse_file(path: &Path) -> Result<ParsedSource> {
        debug!("Parsing model source: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Self::parse_str(path, &content)
    }

    /// Parse source text that was obtained elsewhere; `path` is only used for reporting.
    pub fn parse_str(path: &Path, content: &str) -> Result<ParsedSource> {
        let syntax_tree = syn::parse_file(content)
            .with_context(|| format!("Failed to parse Rust syntax in file: {}", path.display()))?;

        Ok(ParsedSource {
            path: path.to_path_buf(),
            syntax_tree,
        })
    }

    /// Parse every file, keeping the ones that parse.
    ///
    /// Broken files are logged and skipped so that one syntax error elsewhere in
    /// the tree does not hide the models that are fine.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<ParsedSource> {
        let parsed: Vec<ParsedSource> = paths
            .iter()
            .filter_map(|path| match Self::parse_file(path) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    None
                }
            })
            .collect();

        debug!(
            "Parsing complete: {} of {} files usable",
            parsed.len(),
            paths.len()
        );
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    #[test]
    fn test_parse_model_file() {
        let temp_dir = TempDir::new().unwrap();
        let code = r#"
            pub struct GetUser {
                #[swagger("required:true;in:path;name:username")]
                pub username: String,
            }
        "#;
        let path = create_temp_file(&temp_dir, "user.rs", code);

        let parsed = SourceParser::parse_file(&path).unwrap();
        assert_eq!(parsed.path, path);
        assert_eq!(parsed.syntax_tree.items.len(), 1);
    }

    #[test]
    fn test_parse_invalid_file() {
        let err = SourceParser::parse_str(Path::new("bad.rs"), "pub struct Missing {").unwrap_err();
        assert!(err.to_string().contains("Failed to parse Rust syntax in file: bad.rs"));
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let err = SourceParser::parse_file(Path::new("/nonexistent/models.rs")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_parse_files_skips_broken() {
        let temp_dir = TempDir::new().unwrap();
        let good = create_temp_file(&temp_dir, "good.rs", "pub struct Ping {}");
        let bad = create_temp_file(&temp_dir, "bad.rs", "pub struct {");
        let missing = temp_dir.path().join("missing.rs");

        let parsed = SourceParser::parse_files(&[bad, good.clone(), missing]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].path, good);
    }
}
