use {
    crate::{
        config::WorkspaceConfig,
        types::PackageInfo,
        utils::{fs::find_package_dirs, manifest::Manifest},
    },
    anyhow::{Context, Result},
    clap::Args,
    log::{debug, warn},
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CommandArgs, config: &WorkspaceConfig) -> Result<()> {
    let packages = list_packages(config)?;
    for name in unregistered_packages(config)? {
        warn!("{name} has a manifest but is not in the package registry");
    }
    if args.json {
        let json = serde_json::to_string_pretty(&packages).context("failed to serialize packages")?;
        println!("{json}");
        return Ok(());
    }
    for package in packages {
        println!(
            "{}\t{}\t{}",
            package.name,
            package.version.as_deref().unwrap_or("-"),
            package.path.display()
        );
    }
    Ok(())
}

/// The package registry in build order, with each manifest's current version.
pub fn list_packages(config: &WorkspaceConfig) -> Result<Vec<PackageInfo>> {
    config
        .packages
        .iter()
        .map(|name| {
            let path = config.package_dir(&name.parse()?);
            let manifest_path = config.manifest_path(&path);
            let version = match Manifest::load(&manifest_path) {
                Ok(manifest) => manifest.version_str().ok().map(str::to_string),
                Err(err) => {
                    debug!("{err:#}");
                    None
                }
            };
            Ok(PackageInfo {
                name: name.clone(),
                path,
                version,
            })
        })
        .collect()
}

/// Package directories holding a manifest that the registry does not list.
pub fn unregistered_packages(config: &WorkspaceConfig) -> Result<Vec<String>> {
    let packages_root = config.packages_root();
    if !packages_root.is_dir() {
        return Ok(vec![]);
    }
    Ok(find_package_dirs(&packages_root, &config.manifest)?
        .iter()
        .filter_map(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !config.packages.contains(name))
        .collect())
}
