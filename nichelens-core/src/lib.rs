pub mod collaborators;
pub mod config;
pub mod error;
pub mod types;

pub use collaborators::*;
pub use config::*;
pub use error::*;
pub use types::*;
