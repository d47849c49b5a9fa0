//! errors returned by the library.
//!
//! Some variants are not failures but early informational returns: missing input directories,
//! no result produced, unsupported file extension. The binary prints them and exits normally,
//! see [MultiBlastError::is_informational].

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum MultiBlastError {
    /// database directory does not exist
    #[error("No BLAST databases found at {0:?}")]
    NoDatabaseDir(PathBuf),
    /// query directory does not exist
    #[error("No query files found at {0:?}")]
    NoQueryDir(PathBuf),
    /// collation produced no row
    #[error("No BLAST results found. Please check input files and parameters.")]
    NoResults,
    /// input file to split has not a fasta extension
    #[error("Skipped {0:?} due to incorrect file extension.")]
    UnsupportedExtension(PathBuf),
    /// fasta parsing failed for a whole file
    #[error("Error parsing {path:?}: {msg}")]
    FastaParse { path: PathBuf, msg: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// rayon pool could not be built
    #[error("could not build worker pool : {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
} // end of MultiBlastError

impl MultiBlastError {
    /// returns true if the error only reports an early return without failure
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            MultiBlastError::NoDatabaseDir(_)
                | MultiBlastError::NoQueryDir(_)
                | MultiBlastError::NoResults
                | MultiBlastError::UnsupportedExtension(_)
                | MultiBlastError::FastaParse { .. }
        )
    }
} // end of impl MultiBlastError
