//! This file contains directory exploration, query fasta file selection and blast database detection

use std::io;
use std::fs;
use std::path::{Path, PathBuf};

/// extensions of query files we accept in the query directory
pub const QUERY_EXTENSIONS : [&str; 5] = [".fasta", ".fna", ".fa", ".fas", ".faa"];

/// a nucleotide blast database is detected by its header index file
pub const DB_INDEX_EXTENSION : &str = ".nhr";


/// A blast database found in database directory.
/// name is the stem of the index file, path is what is passed to blast -db option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlastDb {
    name : String,
    path : PathBuf,
}

impl BlastDb {
    pub fn new(name : &str, path : PathBuf) -> Self {
        BlastDb{name : name.to_string(), path}
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }
} // end of impl BlastDb



// returns true if file is a query fasta file, test is case sensitive as blast users
// name their files GCF_000091165.1_genomic.fna, prot.faa ...
pub fn is_query_file(path : &Path) -> bool {
    match path.file_name().and_then(|f| f.to_str()) {
        Some(filename) => QUERY_EXTENSIONS.iter().any(|ext| filename.ends_with(ext)),
        None => false,
    }
}  // end of is_query_file


/// returns file name without its last extension
pub fn file_stem_string(path : &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
} // end of file_stem_string


// sorted list of regular files in dir (not recursive)
fn sorted_files(dir : &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::<PathBuf>::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
} // end of sorted_files


/// returns query files of directory, sorted by name
pub fn list_query_files(dir : &Path) -> io::Result<Vec<PathBuf>> {
    let files : Vec<PathBuf> = sorted_files(dir)?.into_iter().filter(|p| is_query_file(p)).collect();
    log::debug!("list_query_files found {} query files in {:?}", files.len(), dir);
    Ok(files)
} // end of list_query_files


/// returns databases of directory, each database being detected by its .nhr file
pub fn list_databases(dir : &Path) -> io::Result<Vec<BlastDb>> {
    let mut dbs = Vec::<BlastDb>::new();
    for path in sorted_files(dir)? {
        let filename = match path.file_name().and_then(|f| f.to_str()) {
            Some(f) => f,
            None => continue,
        };
        if let Some(name) = filename.strip_suffix(DB_INDEX_EXTENSION) {
            if name.is_empty() {
                continue;
            }
            dbs.push(BlastDb::new(name, dir.join(name)));
        }
    }
    log::debug!("list_databases found {} databases in {:?}", dbs.len(), dir);
    Ok(dbs)
} // end of list_databases


/// creates directory (and parents) if it does not exist
pub fn ensure_dir(dir : &Path) -> io::Result<()> {
    if !dir.exists() {
        log::info!("creating directory {:?}", dir);
        fs::create_dir_all(dir)?;
    }
    Ok(())
} // end of ensure_dir
