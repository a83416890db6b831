pub mod export;
pub mod import;
pub mod types;

pub use export::*;
pub use import::*;
pub use types::*;
