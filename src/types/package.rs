use {
    anyhow::{anyhow, Result},
    std::{fmt, str::FromStr},
};

/// A package identifier as given on the command line, e.g. `force-ratio` or
/// `@myorg/core`. The directory is named after the last `/`-separated segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    name: String,
}

impl PackageRef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// `<name>@<version>`, used for both the release commit and the tag.
    pub fn release_id(&self, version: &str) -> String {
        format!("{}@{version}", self.name)
    }
}

impl FromStr for PackageRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(anyhow!("package name must not be empty"));
        }
        let dir_name = name.rsplit('/').next().unwrap_or(name);
        if dir_name.is_empty() || dir_name == "." || dir_name == ".." {
            return Err(anyhow!("invalid package name: {name}"));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
