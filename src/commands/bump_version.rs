use {
    crate::{config::WorkspaceConfig, types::PackageRef, utils::manifest::Manifest},
    anyhow::{anyhow, Result},
    clap::Args,
    log::{info, warn},
    semver::{BuildMetadata, Prerelease, Version},
    std::{convert::Infallible, fmt, path::Path, str::FromStr},
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Package name, optionally scoped (e.g. `@myorg/core`)
    pub package: PackageRef,

    /// major, minor or patch; any other value leaves the version unchanged
    #[arg(default_value = "patch")]
    pub level: BumpLevel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BumpLevel {
    /// x.y.z -> x+1.0.0
    Major,
    /// x.y.z -> x.y+1.0
    Minor,
    /// x.y.z -> x.y.z+1
    Patch,
    /// Anything else. Kept as a no-op for compatibility with existing release scripts.
    Unrecognized(String),
}

impl FromStr for BumpLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "major" => Self::Major,
            "minor" => Self::Minor,
            "patch" => Self::Patch,
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => f.write_str("major"),
            Self::Minor => f.write_str("minor"),
            Self::Patch => f.write_str("patch"),
            Self::Unrecognized(other) => f.write_str(other),
        }
    }
}

pub fn run(args: CommandArgs, config: &WorkspaceConfig) -> Result<()> {
    let package_dir = config.package_dir(&args.package);
    let manifest_path = config.manifest_path(&package_dir);
    if !manifest_path.is_file() {
        return Err(anyhow!(
            "package directory not found: {}",
            package_dir.display()
        ));
    }
    bump_manifest(&manifest_path, &args.level)?;
    Ok(())
}

/// Bumps the `version` field of the manifest at `path` in place and returns
/// the previous and new versions.
pub fn bump_manifest(path: &Path, level: &BumpLevel) -> Result<(Version, Version)> {
    let mut manifest = Manifest::load(path)?;
    let current = manifest.version()?;
    let new_version = bump_version(level, &current);

    info!("bumping version ({level}): {current} -> {new_version}");
    manifest.set_version(&new_version);
    manifest.save()?;
    Ok((current, new_version))
}

pub fn bump_version(level: &BumpLevel, current: &Version) -> Version {
    let mut new_version = current.clone();
    match level {
        BumpLevel::Major => {
            new_version.major = new_version.major.saturating_add(1);
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpLevel::Minor => {
            new_version.minor = new_version.minor.saturating_add(1);
            new_version.patch = 0;
        }
        BumpLevel::Patch => {
            new_version.patch = new_version.patch.saturating_add(1);
        }
        BumpLevel::Unrecognized(other) => {
            warn!("unrecognized bump level `{other}`, keeping version {current}");
            return new_version;
        }
    }
    new_version.pre = Prerelease::EMPTY;
    new_version.build = BuildMetadata::EMPTY;
    new_version
}
