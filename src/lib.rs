// MULTIBLAST v0.1.0
// Licensed under the MIT license (http://opensource.org/licenses/MIT).
// This file may not be copied, modified, or distributed except according to those terms.

//! multiblast runs an external blast program (blastn or tblastn) on every pair (query file, database)
//! found in two directories, gathers the tabular outputs in one table and filters hits on
//! evalue, percent identity and query coverage.
//!
//! It also provides a small utility to split a multi record fasta file in one file per record.
//!
//! - [utils] : directory exploration and processing parameters
//! - [blast] : task enumeration, parallel dispatch, result collation, filtering and csv reports
//! - [split] : fasta splitter

pub mod errors;
pub mod utils;
pub mod blast;
pub mod split;

pub use errors::MultiBlastError;
