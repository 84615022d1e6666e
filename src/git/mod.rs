pub mod executor;
pub mod operations;
pub mod status;

// Re-export commonly used items
pub use executor::*;
pub use operations::*;
pub use status::*;
