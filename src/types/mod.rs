pub mod package;
pub mod publish;

pub use package::PackageRef;
pub use publish::{BookkeepingOutcome, PackageInfo, PublishReport};
