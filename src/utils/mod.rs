pub mod fs;
pub mod git;
pub mod manifest;
pub mod process;

pub use git::get_git_root_path;
pub use process::{CommandRunner, SystemRunner};
