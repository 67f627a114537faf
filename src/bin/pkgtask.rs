use {
    anyhow::{Context, Result},
    clap::{Args, Parser, Subcommand},
    log::{debug, error},
    pkgtask::{config::WorkspaceConfig, utils::SystemRunner},
    std::path::PathBuf,
};

#[derive(Parser)]
#[command(name = "pkgtask", about = "Build and release tasks", version)]
struct Pkgtask {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Build one package, or every package in order")]
    Build(pkgtask::commands::build::CommandArgs),
    #[command(about = "Bump, build and publish a package, then tag the release")]
    Publish(pkgtask::commands::publish::CommandArgs),
    #[command(about = "Bump a package's version without building or publishing")]
    BumpVersion(pkgtask::commands::bump_version::CommandArgs),
    #[command(about = "List the packages that `build` runs over")]
    List(pkgtask::commands::list::CommandArgs),
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root; defaults to the enclosing git repository
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = try_main().await {
        error!("Error: {err}");
        for (i, cause) in err.chain().skip(1).enumerate() {
            error!("  {}: {}", i.saturating_add(1), cause);
        }
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let pkgtask = Pkgtask::parse();

    if pkgtask.global.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let root = match pkgtask.global.root {
        Some(root) => root,
        None => workspace_root()?,
    };
    let config = WorkspaceConfig::load(&root)?;
    let runner = SystemRunner;

    match pkgtask.command {
        Commands::Build(args) => {
            pkgtask::commands::build::run(args, &config, &runner)?;
        }
        Commands::Publish(args) => {
            pkgtask::commands::publish::run(args, &config, &runner)?;
        }
        Commands::BumpVersion(args) => {
            pkgtask::commands::bump_version::run(args, &config)?;
        }
        Commands::List(args) => {
            pkgtask::commands::list::run(args, &config)?;
        }
    }

    Ok(())
}

fn workspace_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("failed to get current directory")?;
    match pkgtask::utils::get_git_root_path(&current_dir) {
        Ok(root) => Ok(root),
        Err(err) => {
            debug!("{err:#}, using {}", current_dir.display());
            Ok(current_dir)
        }
    }
}
