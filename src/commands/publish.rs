use {
    super::{
        build::build_package,
        bump_version::{bump_manifest, BumpLevel},
    },
    crate::{
        config::WorkspaceConfig,
        types::{BookkeepingOutcome, PackageRef, PublishReport},
        utils::{
            git::Git,
            manifest::Manifest,
            process::{CommandRunner, ExternalCommand},
        },
    },
    anyhow::{anyhow, Context, Result},
    clap::Args,
    log::{info, warn},
    std::path::Path,
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Package name, optionally scoped (e.g. `@myorg/core`)
    pub package: PackageRef,

    /// major, minor or patch; any other value leaves the version unchanged
    #[arg(default_value = "patch")]
    pub level: BumpLevel,

    /// Do not commit, tag or push the release
    #[arg(long, conflicts_with = "strict_git")]
    pub skip_git: bool,

    /// Fail the run when committing, tagging or pushing fails
    #[arg(long)]
    pub strict_git: bool,

    /// Print the release report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CommandArgs, config: &WorkspaceConfig, runner: &dyn CommandRunner) -> Result<()> {
    let report = publish(&args, config, runner)?;
    if let BookkeepingOutcome::Failed(_) = report.bookkeeping {
        info!("package was published, but the git operations failed");
    }
    info!("successfully published {}@{}", report.name, report.version);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    }
    Ok(())
}

pub fn publish(
    args: &CommandArgs,
    config: &WorkspaceConfig,
    runner: &dyn CommandRunner,
) -> Result<PublishReport> {
    let package = &args.package;
    let package_dir = config.package_dir(package);
    let manifest_path = config.manifest_path(&package_dir);

    if !manifest_path.is_file() {
        return Err(anyhow!(
            "package directory not found: {}",
            package_dir.display()
        ));
    }

    build_package(config, runner, &package_dir)?;

    let (previous_version, _) = bump_manifest(&manifest_path, &args.level)?;

    // the manifest on disk is authoritative from here on
    let version = Manifest::load(&manifest_path)?.version_str()?.to_string();
    info!("new version: {version}");

    info!("publishing {}", package.release_id(&version));
    let publish_command = ExternalCommand::from_template(&config.publish_command, &package_dir)?;
    runner
        .run(&publish_command)
        .context(format!("failed to publish {}", package.release_id(&version)))?;

    let bookkeeping = if args.skip_git {
        info!("skipping git operations");
        BookkeepingOutcome::Skipped
    } else {
        let tolerate = config.tolerate_bookkeeping_failure && !args.strict_git;
        match record_release(config, runner, package, &version, &manifest_path) {
            Ok(outcome) => outcome,
            Err(err) if tolerate => {
                warn!("git operations failed: {err:#}");
                BookkeepingOutcome::Failed(format!("{err:#}"))
            }
            Err(err) => return Err(err),
        }
    };

    Ok(PublishReport {
        name: package.name().to_string(),
        path: package_dir,
        previous_version,
        version,
        bookkeeping,
    })
}

/// Stages the manifest, commits, tags `<name>@<version>` and pushes both.
fn record_release(
    config: &WorkspaceConfig,
    runner: &dyn CommandRunner,
    package: &PackageRef,
    version: &str,
    manifest_path: &Path,
) -> Result<BookkeepingOutcome> {
    info!("creating git commit and tag");
    let git = Git::new(runner, &config.root);
    let manifest_path = manifest_path
        .strip_prefix(&config.root)
        .unwrap_or(manifest_path);

    if !git.has_changes(manifest_path)? {
        info!("no changes to commit");
        return Ok(BookkeepingOutcome::NoChanges);
    }

    let release_id = package.release_id(version);
    git.add(manifest_path)?;
    git.commit(&format!("chore: release {release_id}"))?;
    git.tag(&release_id)?;
    git.push(&config.remote, "HEAD")?;
    git.push(&config.remote, &release_id)?;

    info!("git operations completed");
    Ok(BookkeepingOutcome::Completed)
}
