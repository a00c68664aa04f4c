//! Process launcher implementations

mod system;

pub use system::SystemLauncher;
