pub mod logging;
pub mod paths;

pub use paths::sibling_directory_path;
