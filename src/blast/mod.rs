//! batch blast: task enumeration, parallel dispatch of blast processes, collation of tabular outputs,
//! threshold filtering and csv reports.
//!
//! The entry point is [run::run_multiblast].

pub mod task;
pub mod dispatch;
pub mod hits;
pub mod collate;
pub mod filter;
pub mod report;
pub mod run;

pub use task::*;
pub use dispatch::*;
pub use hits::*;
pub use collate::*;
pub use filter::*;
pub use report::*;
pub use run::*;
