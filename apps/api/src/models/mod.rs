pub mod job;
pub mod preferences;

pub use job::{Experience, Job, Location, Source, WorkMode};
pub use preferences::Preferences;
