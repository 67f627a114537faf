use {
    anyhow::{anyhow, Context, Result},
    semver::Version,
    serde_json::{Map, Value},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// A package manifest (`package.json`) held as an ordered JSON object so that
/// every field other than `version` is written back as it was read.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).context(format!("failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .context(format!("failed to parse {}", path.display()))?;
        let Value::Object(fields) = value else {
            return Err(anyhow!("{} is not a JSON object", path.display()));
        };
        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    pub fn version_str(&self) -> Result<&str> {
        self.fields
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("failed to get version from {}", self.path.display()))
    }

    pub fn version(&self) -> Result<Version> {
        let version = self.version_str()?;
        Version::parse(version).context(format!(
            "invalid version `{version}` in {}",
            self.path.display()
        ))
    }

    pub fn set_version(&mut self, version: &Version) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Writes the manifest back: two-space indentation and a trailing newline.
    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.fields)
            .context(format!("failed to serialize {}", self.path.display()))?;
        content.push('\n');
        fs::write(&self.path, content).context(format!("failed to write {}", self.path.display()))
    }
}
