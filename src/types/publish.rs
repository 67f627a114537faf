use {semver::Version, serde::Serialize, std::path::PathBuf};

/// What happened to the version-control bookkeeping after a publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum BookkeepingOutcome {
    Completed,
    /// The manifest had no pending changes.
    NoChanges,
    /// Disabled for this run.
    Skipped,
    /// Failed and tolerated; the package is published regardless.
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub name: String,
    pub path: PathBuf,
    pub previous_version: Version,
    pub version: String,
    pub bookkeeping: BookkeepingOutcome,
}

/// One registry entry as shown by `pkgtask list`.
#[derive(Debug, Clone, Serialize)]
pub struct PackageInfo {
    pub name: String,
    pub path: PathBuf,
    pub version: Option<String>,
}
