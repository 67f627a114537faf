use {
    crate::{
        config::WorkspaceConfig,
        types::PackageRef,
        utils::process::{CommandRunner, ExternalCommand},
    },
    anyhow::{anyhow, Context, Result},
    clap::Args,
    log::info,
    std::path::{Path, PathBuf},
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Package to build; builds every registered package when omitted
    pub package: Option<PackageRef>,
}

pub fn run(args: CommandArgs, config: &WorkspaceConfig, runner: &dyn CommandRunner) -> Result<()> {
    let package_dirs = match &args.package {
        Some(package) => vec![config.package_dir(package)],
        None => all_package_dirs(config)?,
    };

    // stops at the first failure, later packages are not attempted
    for package_dir in package_dirs {
        build_package(config, runner, &package_dir)?;
    }
    Ok(())
}

fn all_package_dirs(config: &WorkspaceConfig) -> Result<Vec<PathBuf>> {
    if config.packages.is_empty() {
        return Err(anyhow!("the package registry is empty"));
    }
    config
        .packages
        .iter()
        .map(|name| {
            let package: PackageRef = name.parse()?;
            Ok(config.package_dir(&package))
        })
        .collect()
}

pub fn build_package(
    config: &WorkspaceConfig,
    runner: &dyn CommandRunner,
    package_dir: &Path,
) -> Result<()> {
    info!("building {}", package_dir.display());
    let result = if package_dir.is_dir() {
        ExternalCommand::from_template(&config.build_command, package_dir)
            .and_then(|command| runner.run(&command))
    } else {
        Err(anyhow!("directory does not exist"))
    };

    result.context(format!("failed to build {}", package_dir.display()))?;
    info!("built {}", package_dir.display());
    Ok(())
}
