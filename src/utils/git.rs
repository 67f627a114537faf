use {
    super::process::{CommandRunner, ExternalCommand},
    anyhow::{anyhow, Result},
    std::{
        path::{Path, PathBuf},
        process::Command,
    },
};

/// Returns the toplevel of the git repository containing `dir`.
pub fn get_git_root_path(dir: &Path) -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .map_err(|e| anyhow!("failed to get git root path, error: {e}"))?;
    if !output.status.success() {
        return Err(anyhow!(
            "failed to get git root path: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(root))
}

/// Thin wrapper issuing git commands from the workspace root.
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    root: &'a Path,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner, root: &'a Path) -> Self {
        Self { runner, root }
    }

    fn command<I, S>(&self, args: I) -> ExternalCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExternalCommand::new("git", self.root).args(args)
    }

    /// True when `path` has staged, unstaged or untracked changes.
    pub fn has_changes(&self, path: &Path) -> Result<bool> {
        let status = self.runner.output(
            &self
                .command(["status", "--porcelain"])
                .arg(path.to_string_lossy()),
        )?;
        Ok(!status.trim().is_empty())
    }

    pub fn add(&self, path: &Path) -> Result<()> {
        self.runner
            .run(&self.command(["add"]).arg(path.to_string_lossy()))
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.runner.run(&self.command(["commit", "-m", message]))
    }

    pub fn tag(&self, tag: &str) -> Result<()> {
        self.runner.run(&self.command(["tag", tag]))
    }

    pub fn push(&self, remote: &str, refspec: &str) -> Result<()> {
        self.runner.run(&self.command(["push", remote, refspec]))
    }
}
