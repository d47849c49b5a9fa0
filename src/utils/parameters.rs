//! structures related to processing parameters


use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::io::{BufReader, BufWriter, Write};

use serde::{Deserialize, Serialize};
use serde_json::{to_writer_pretty};

use crate::errors::MultiBlastError;

/// name of parameters dump in output directory
pub const PARAMETERS_FILE : &str = "parameters.json";


/// the blast program run for each task.
/// blastn compares nucleotide queries, tblastn compares protein queries against translated nucleotide databases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlastProgram {
    Blastn,
    Tblastn,
}

impl BlastProgram {
    /// executable name
    pub fn name(&self) -> &'static str {
        match self {
            BlastProgram::Blastn => "blastn",
            BlastProgram::Tblastn => "tblastn",
        }
    }

    /// extra arguments for short sequences. tblastn has no short task so we return nothing for it.
    pub fn short_task_args(&self) -> &'static [&'static str] {
        match self {
            BlastProgram::Blastn => &["-task", "blastn-short", "-dust", "no"],
            BlastProgram::Tblastn => &[],
        }
    }
}  // end of impl BlastProgram

//===========================================================

/// thresholds used to filter hits. All comparisons are inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// max evalue
    pub evalue : f64,
    /// minimum percent identity
    pub perc_identity : f64,
    /// minimum query coverage in percent
    pub coverage : f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds{evalue : 1e-5, perc_identity : 90., coverage : 75.}
    }
}

impl Thresholds {
    pub fn new(evalue : f64, perc_identity : f64, coverage : f64) -> Self {
        Thresholds{evalue, perc_identity, coverage}
    }
} // end of impl Thresholds

//======================================================================================

/// Gathers all parameters of an align run.
/// To be dumped in output directory to keep track of how results were produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlignParams {
    program : BlastProgram,
    /// directory containing blast databases
    db_dir : PathBuf,
    /// directory containing query fasta files
    query_dir : PathBuf,
    /// where raw results and csv reports go
    output_dir : PathBuf,
    /// number of blast processes run simultaneously
    threads : usize,
    thresholds : Thresholds,
    /// run blast with its short sequences settings
    short_seq : bool,
    /// report only lowest evalue hit for each (database, query file)
    best_hit_only : bool,
    /// directory containing blast executables, if None they are searched in PATH
    blast_dir : Option<PathBuf>,
} // end of AlignParams


impl AlignParams {
    pub fn new(program : BlastProgram, db_dir : PathBuf, query_dir : PathBuf, output_dir : PathBuf) -> Self {
        AlignParams{program, db_dir, query_dir, output_dir, threads : 1, thresholds : Thresholds::default(),
                    short_seq : false, best_hit_only : false, blast_dir : None}
    }

    /// set number of workers. 0 is changed to 1
    pub fn with_threads(mut self, threads : usize) -> Self {
        self.threads = threads.max(1);
        if self.threads > num_cpus::get() {
            log::warn!("asked for {} workers, only {} cpus available", self.threads, num_cpus::get());
        }
        self
    }

    pub fn with_thresholds(mut self, thresholds : Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_short_seq(mut self, short_seq : bool) -> Self {
        self.short_seq = short_seq;
        self
    }

    pub fn with_best_hit_only(mut self, best_hit_only : bool) -> Self {
        self.best_hit_only = best_hit_only;
        self
    }

    pub fn with_blast_dir(mut self, blast_dir : Option<PathBuf>) -> Self {
        self.blast_dir = blast_dir;
        self
    }

    pub fn get_program(&self) -> BlastProgram {
        self.program
    }

    pub fn get_db_dir(&self) -> &Path {
        &self.db_dir
    }

    pub fn get_query_dir(&self) -> &Path {
        &self.query_dir
    }

    pub fn get_output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn get_threads(&self) -> usize {
        self.threads
    }

    pub fn get_thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn get_short_seq(&self) -> bool {
        self.short_seq
    }

    pub fn get_best_hit_only(&self) -> bool {
        self.best_hit_only
    }

    /// returns the executable to launch: blast_dir/program if blast_dir was given, else program name
    pub fn get_executable(&self) -> PathBuf {
        match &self.blast_dir {
            Some(dir) => dir.join(self.program.name()),
            None => PathBuf::from(self.program.name()),
        }
    }


    pub fn dump_json(&self, dirpath : &Path) -> Result<(), MultiBlastError> {
        //
        let filepath = dirpath.join(PARAMETERS_FILE);
        //
        log::info!("dumping AlignParams in json file : {:?}", filepath);
        //
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(&filepath).map_err(|e| {
            log::error!("AlignParams dump : dump could not open file {:?}", filepath.as_os_str());
            e
        })?;
        // 
        let mut writer = BufWriter::new(file);
        to_writer_pretty(&mut writer, &self)?;
        writer.flush()?;
        //
        Ok(())
    } // end of dump_json


    /// reload from a json dump
    pub fn reload_json(dirpath : &Path) -> Result<Self, MultiBlastError> {
        let filepath = dirpath.join(PARAMETERS_FILE);
        log::info!("reloading AlignParams from {:?}", filepath);
        let file = OpenOptions::new().read(true).open(&filepath).map_err(|e| {
            log::error!("AlignParams reload_json : reload could not open file {:?}", filepath.as_os_str());
            e
        })?;
        let params : Self = serde_json::from_reader(BufReader::new(file))?;
        Ok(params)
    } // end of reload_json

} // end of impl AlignParams
