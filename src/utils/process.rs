use {
    anyhow::{anyhow, bail, Context, Result},
    log::debug,
    std::{
        fmt,
        path::{Path, PathBuf},
        process::Command,
    },
};

/// A single external invocation: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Builds a command from a `[program, args...]` template such as `["bun", "run", "build"]`.
    pub fn from_template(template: &[String], cwd: impl AsRef<Path>) -> Result<Self> {
        let Some((program, args)) = template.split_first() else {
            bail!("command template is empty");
        };
        Ok(Self::new(program, cwd).args(args))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Executes external commands. Every step that leaves the process goes through here.
pub trait CommandRunner {
    /// Runs the command with inherited stdio and fails on a non-zero exit.
    fn run(&self, command: &ExternalCommand) -> Result<()>;

    /// Runs the command capturing its output; returns stdout on success.
    fn output(&self, command: &ExternalCommand) -> Result<String>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> Result<()> {
        debug!("running `{command}` in {}", command.cwd.display());
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .status()
            .with_context(|| {
                format!(
                    "failed to run `{command}` in {}",
                    command.cwd.display()
                )
            })?;
        if !status.success() {
            return Err(anyhow!(
                "`{command}` in {} exited with {status}",
                command.cwd.display()
            ));
        }
        Ok(())
    }

    fn output(&self, command: &ExternalCommand) -> Result<String> {
        debug!("running `{command}` in {}", command.cwd.display());
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .output()
            .with_context(|| {
                format!(
                    "failed to run `{command}` in {}",
                    command.cwd.display()
                )
            })?;
        if !output.status.success() {
            return Err(anyhow!(
                "`{command}` in {} exited with {}: {}",
                command.cwd.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
