//! Locating model files on disk
//!
//! Commands accept either a project file or a directory that contains one.

use crate::constants::extensions;
use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

/// Resolve a project argument to a single `.prj` file
///
/// A file path is returned unchanged. A directory must contain exactly one
/// project file.
pub fn find_project_file(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if !path.is_dir() {
        anyhow::bail!("Project path not found: {}", path.display());
    }

    let candidates = project_files_in(path)?;
    match candidates.as_slice() {
        [single] => Ok(single.clone()),
        [] => anyhow::bail!("No .{} file found in {}", extensions::PROJECT, path.display()),
        many => anyhow::bail!(
            "Found {} project files in {}; pass one explicitly:\n{}",
            many.len(),
            path.display(),
            many.iter()
                .map(|p| format!("  {}", p.display().to_string().bright_cyan()))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}

/// All `.prj` files directly inside `dir`, sorted by name
pub fn project_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(format!("*.{}", extensions::PROJECT));
    let pattern = pattern
        .to_str()
        .with_context(|| format!("Directory path is not valid UTF-8: {}", dir.display()))?;

    let mut files = glob::glob(pattern)
        .with_context(|| format!("Invalid search pattern {}", pattern))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to read directory entry")?;
    files.sort();
    Ok(files)
}

/// Project name to write under: explicit name, else the input file stem
pub fn output_name(project_file: &Path, requested: Option<&str>) -> Result<String> {
    if let Some(name) = requested {
        return Ok(name.to_string());
    }
    project_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .context("Project file has no name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.prj");
        std::fs::write(&file, "GSSHAPROJECT\n").unwrap();
        assert_eq!(find_project_file(&file).unwrap(), file);
    }

    #[test]
    fn test_directory_with_one_project() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("only.prj");
        std::fs::write(&file, "GSSHAPROJECT\n").unwrap();
        std::fs::write(dir.path().join("only.gag"), "").unwrap();
        assert_eq!(find_project_file(dir.path()).unwrap(), file);
    }

    #[test]
    fn test_directory_with_many_projects() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.prj"), "").unwrap();
        std::fs::write(dir.path().join("b.prj"), "").unwrap();
        assert!(find_project_file(dir.path()).is_err());
        assert_eq!(project_files_in(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(find_project_file(dir.path()).is_err());
        assert!(find_project_file(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_output_name() {
        let path = Path::new("/models/parkcity.prj");
        assert_eq!(output_name(path, None).unwrap(), "parkcity");
        assert_eq!(output_name(path, Some("copy")).unwrap(), "copy");
    }
}
