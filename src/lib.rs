pub mod config;
pub mod executor;
pub mod model;
pub mod sheets;
pub mod traits;
pub mod witb;

// Re-export common types for convenience
pub use config::*;
pub use executor::*;
pub use model::*;
pub use sheets::*;
pub use traits::*;
