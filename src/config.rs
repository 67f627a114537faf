//! Workspace configuration, read once at startup from `pkgtask.toml`.
//!
//! ```toml
//! packages_dir = "packages"
//! manifest = "package.json"
//! packages = ["force-ratio", "flexible-cards"]
//! build_command = ["bun", "run", "build"]
//! publish_command = ["npm", "publish", "--access", "public"]
//! remote = "origin"
//! tolerate_bookkeeping_failure = true
//! ```
//!
//! Every key is optional. Without `packages`, the registry is
//! [`DEFAULT_PACKAGES`] in that order.

use {
    crate::types::PackageRef,
    anyhow::{anyhow, Context, Result},
    log::debug,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    toml_edit::{DocumentMut, Item},
};

pub const CONFIG_FILE: &str = "pkgtask.toml";

/// Build order used when `pkgtask.toml` does not list `packages`.
pub const DEFAULT_PACKAGES: &[&str] = &["force-ratio", "flexible-cards"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
    pub packages_dir: PathBuf,
    pub manifest: String,
    /// Build order for `pkgtask build` without a package argument.
    pub packages: Vec<String>,
    pub build_command: Vec<String>,
    pub publish_command: Vec<String>,
    pub remote: String,
    pub tolerate_bookkeeping_failure: bool,
}

impl WorkspaceConfig {
    /// Defaults for `root`, with the [`DEFAULT_PACKAGES`] registry.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            packages_dir: PathBuf::from("packages"),
            manifest: "package.json".to_string(),
            packages: to_strings(DEFAULT_PACKAGES),
            build_command: to_strings(&["bun", "run", "build"]),
            publish_command: to_strings(&["npm", "publish", "--access", "public"]),
            remote: "origin".to_string(),
            tolerate_bookkeeping_failure: true,
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::new(root);
        let config_path = root.join(CONFIG_FILE);

        if config_path.is_file() {
            debug!("loading {}", config_path.display());
            let content = fs::read_to_string(&config_path)
                .context(format!("failed to read {}", config_path.display()))?;
            let doc = content
                .parse::<DocumentMut>()
                .context(format!("failed to parse {}", config_path.display()))?;
            config
                .apply(&doc)
                .context(format!("invalid {}", config_path.display()))?;
            if let Some(packages) = string_list(&doc, "packages")? {
                config.packages = packages;
            }
        }

        debug!("package registry: {:?}", config.packages);
        Ok(config)
    }

    fn apply(&mut self, doc: &DocumentMut) -> Result<()> {
        if let Some(packages_dir) = string(doc, "packages_dir")? {
            self.packages_dir = PathBuf::from(packages_dir);
        }
        if let Some(manifest) = string(doc, "manifest")? {
            self.manifest = manifest;
        }
        if let Some(remote) = string(doc, "remote")? {
            self.remote = remote;
        }
        if let Some(build_command) = string_list(doc, "build_command")? {
            self.build_command = non_empty(build_command, "build_command")?;
        }
        if let Some(publish_command) = string_list(doc, "publish_command")? {
            self.publish_command = non_empty(publish_command, "publish_command")?;
        }
        if let Some(item) = doc.get("tolerate_bookkeeping_failure") {
            self.tolerate_bookkeeping_failure = item
                .as_bool()
                .ok_or_else(|| anyhow!("`tolerate_bookkeeping_failure` must be a boolean"))?;
        }
        Ok(())
    }

    pub fn packages_root(&self) -> PathBuf {
        self.root.join(&self.packages_dir)
    }

    pub fn package_dir(&self, package: &PackageRef) -> PathBuf {
        self.packages_root().join(package.dir_name())
    }

    pub fn manifest_path(&self, package_dir: &Path) -> PathBuf {
        package_dir.join(&self.manifest)
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn string(doc: &DocumentMut, key: &str) -> Result<Option<String>> {
    let Some(item) = doc.get(key) else {
        return Ok(None);
    };
    item.as_str()
        .map(|s| Some(s.to_string()))
        .ok_or_else(|| anyhow!("`{key}` must be a string"))
}

fn string_list(doc: &DocumentMut, key: &str) -> Result<Option<Vec<String>>> {
    let Some(item) = doc.get(key) else {
        return Ok(None);
    };
    let array = match item {
        Item::Value(value) => value.as_array(),
        _ => None,
    }
    .ok_or_else(|| anyhow!("`{key}` must be an array of strings"))?;

    array
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("`{key}` must be an array of strings"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn non_empty(command: Vec<String>, key: &str) -> Result<Vec<String>> {
    if command.is_empty() {
        return Err(anyhow!("`{key}` must not be empty"));
    }
    Ok(command)
}
