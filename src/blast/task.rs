//! A task is one blast invocation: one query file against one database.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::MultiBlastError;
use crate::utils::files::*;
use crate::utils::parameters::*;

/// suffix of raw blast outputs in output directory
pub const RESULTS_SUFFIX : &str = "_results.txt";

/// tabular output format asked to blast. The order of fields is the one expected by [crate::blast::hits::HitRecord::from_fields]
pub const OUTFMT : &str = "6 qseqid sseqid pident length mismatch gapopen qstart qend sstart send evalue bitscore qlen";


/// returns the raw output path of task (db, query). Encodes both names so each task writes its own file.
pub fn task_output_path(output_dir : &Path, db_name : &str, query_name : &str) -> PathBuf {
    output_dir.join(format!("{}_{}{}", db_name, query_name, RESULTS_SUFFIX))
}


#[derive(Clone, Debug)]
pub struct Task {
    /// executable launched, possibly a full path
    executable : PathBuf,
    program : BlastProgram,
    db : BlastDb,
    /// query fasta file
    query_path : PathBuf,
    /// query file name without extension
    query_name : String,
    /// raw tabular output
    output : PathBuf,
    /// evalue passed to blast
    evalue : f64,
    short_seq : bool,
} // end of struct Task


impl Task {
    pub fn new(params : &AlignParams, db : &BlastDb, query_path : &Path) -> Self {
        let query_name = file_stem_string(query_path);
        let output = task_output_path(params.get_output_dir(), db.get_name(), &query_name);
        Task{ executable : params.get_executable(), program : params.get_program(), db : db.clone(),
              query_path : query_path.to_path_buf(), query_name, output,
              evalue : params.get_thresholds().evalue, short_seq : params.get_short_seq()}
    }

    pub fn get_db_name(&self) -> &str {
        self.db.get_name()
    }

    pub fn get_query_name(&self) -> &str {
        &self.query_name
    }

    pub fn get_query_path(&self) -> &Path {
        &self.query_path
    }

    pub fn get_output(&self) -> &Path {
        &self.output
    }

    pub fn get_executable(&self) -> &Path {
        &self.executable
    }

    /// arguments passed to blast
    pub fn args(&self) -> Vec<OsString> {
        let mut args : Vec<OsString> = vec![
            "-query".into(), self.query_path.clone().into_os_string(),
            "-db".into(), self.db.get_path().to_path_buf().into_os_string(),
            "-outfmt".into(), OUTFMT.into(),
            "-out".into(), self.output.clone().into_os_string(),
            "-evalue".into(), format!("{:e}", self.evalue).into(),
        ];
        if self.short_seq {
            let short_args = self.program.short_task_args();
            if short_args.is_empty() {
                log::warn!("{} has no short sequence task, running with default settings", self.program.name());
            }
            args.extend(short_args.iter().map(OsString::from));
        }
        args
    } // end of args

    /// the process to launch, no shell involved
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(self.args());
        cmd
    }
} // end of impl Task



/// builds the cartesian product (query file x database).
/// Returns an error if database or query directory does not exist.
pub fn enumerate_tasks(params : &AlignParams) -> Result<Vec<Task>, MultiBlastError> {
    let db_dir = params.get_db_dir();
    if !db_dir.exists() {
        return Err(MultiBlastError::NoDatabaseDir(db_dir.to_path_buf()));
    }
    let query_dir = params.get_query_dir();
    if !query_dir.exists() {
        return Err(MultiBlastError::NoQueryDir(query_dir.to_path_buf()));
    }
    //
    let queries = list_query_files(query_dir)?;
    let dbs = list_databases(db_dir)?;
    let mut tasks = Vec::<Task>::with_capacity(queries.len() * dbs.len());
    for query in &queries {
        for db in &dbs {
            tasks.push(Task::new(params, db, query));
        }
    }
    log::info!("enumerate_tasks : {} query files, {} databases, {} tasks", queries.len(), dbs.len(), tasks.len());
    Ok(tasks)
} // end of enumerate_tasks
