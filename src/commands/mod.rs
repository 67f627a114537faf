pub mod build;
pub mod bump_version;
pub mod list;
pub mod publish;
