//! pkgtask - build and release automation for a JS package monorepo
//!
//! Builds the packages under `packages/` and publishes one of them to the
//! registry after bumping its version, recording the release with a git
//! commit and tag.
//!
//! # Examples
//!
//! ## Bumping version
//!
//! ```
//! use pkgtask::commands::bump_version::{bump_version, BumpLevel};
//! use semver::Version;
//!
//! let current = Version::parse("1.2.3").unwrap();
//! let new = bump_version(&BumpLevel::Minor, &current);
//! assert_eq!(new, Version::parse("1.3.0").unwrap());
//! ```
//!
//! ## Listing the package registry
//!
//! ```no_run
//! use pkgtask::{commands::list::list_packages, config::WorkspaceConfig};
//! use std::path::Path;
//!
//! let config = WorkspaceConfig::load(Path::new(".")).unwrap();
//! for package in list_packages(&config).unwrap() {
//!     println!("{} {:?}", package.name, package.version);
//! }
//! ```

pub mod commands;
pub mod config;
pub mod types;
pub mod utils;

pub use commands::{build, bump_version, list, publish};

pub use semver::Version;

pub type Result<T> = anyhow::Result<T>;
