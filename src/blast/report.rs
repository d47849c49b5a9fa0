//! csv reports written in output directory

use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::errors::MultiBlastError;
use super::hits::*;

/// all collated rows
pub const ALL_RESULTS_FILE : &str = "all_results.csv";
/// best hit per (database, query file)
pub const BEST_HITS_FILE : &str = "filtered_results.csv";
/// all rows passing thresholds
pub const ALL_FILTERED_FILE : &str = "all_filtered_results.csv";

/// csv columns, in the order of [HitRecord] fields
pub const REPORT_COLUMNS : [&str; 16] = ["qseqid", "sseqid", "database", "query_file_name", "pident", "query_coverage",
                                         "evalue", "bitscore", "length", "mismatch", "gapopen", "qstart", "qend",
                                         "sstart", "send", "qlen"];


/// writes rows with a header line, header is written even if there is no row
pub fn write_csv(path : &Path, rows : &[HitRecord]) -> Result<(), MultiBlastError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::debug!("write_csv : {} rows in {:?}", rows.len(), path);
    Ok(())
} // end of write_csv


/// writes table in output_dir/name and returns the path
pub fn write_report(output_dir : &Path, name : &str, table : &ResultTable) -> Result<PathBuf, MultiBlastError> {
    let path = output_dir.join(name);
    write_csv(&path, table.get_rows())?;
    Ok(path)
}
