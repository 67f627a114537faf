use {
    anyhow::{Context, Result},
    std::path::{Path, PathBuf},
    walkdir::WalkDir,
};

/// Lists the immediate subdirectories of `packages_root` that hold a file
/// named `manifest`, sorted by directory name.
pub fn find_package_dirs(packages_root: &Path, manifest: &str) -> Result<Vec<PathBuf>> {
    let mut results = vec![];
    for entry in WalkDir::new(packages_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.context(format!("failed to read {}", packages_root.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.path().join(manifest).is_file() {
            results.push(entry.path().to_path_buf());
        }
    }
    Ok(results)
}
