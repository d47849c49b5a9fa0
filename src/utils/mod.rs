//! contains utils used in enumerating input directories and processing parameters

pub mod files;
pub mod parameters;

pub use files::*;
pub use parameters::*;
