// MULTIBLAST v0.1.0
// Licensed under the MIT license (http://opensource.org/licenses/MIT).
// This file may not be copied, modified, or distributed except according to those terms.


//! multiblast align --db [-d] dbdir --query [-q] querydir --output [-o] outdir [--nucl] [--threads n] [--evalue e] [--perc p] [--cov c] [--short] [--best]
//!
//! - dbdir is a directory containing blast nucleotide databases, each detected by its .nhr file
//! - querydir is a directory of query fasta files (.fasta .fna .fa .fas .faa)
//!
//! --nucl [-n] : run blastn (nucleotide queries). Default is tblastn (protein queries).
//!
//! --threads [-t] : number of blast processes running simultaneously, default 1
//!
//! --evalue [-e], --perc [-p], --cov [-c] : thresholds on evalue (max, default 1e-5), percent identity (min, default 90)
//!         and query coverage (min, default 75) used to filter hits.
//!
//! --short [-s] : blastn short sequences task
//!
//! --best [-b] : report only the lowest evalue hit of each (database, query file) in filtered_results.csv.
//!         Default is to report all hits passing thresholds in all_filtered_results.csv
//!
//! --blastdir : directory containing blast executables, default is to search them in PATH.
//!
//!
//! multiblast split --input [-i] file.fasta --outdir [-o] dir
//!
//! writes each record of file.fasta in dir/id.fasta

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use std::path::PathBuf;

// for logging (debug mostly, switched at compile time in cargo.toml)
use env_logger::Builder;

use multiblast::blast::run_multiblast;
use multiblast::split::split_fasta;
use multiblast::utils::*;
use multiblast::MultiBlastError;


// install a logger facility
pub fn init_log() -> u64 {
    Builder::from_default_env().init();
    println!("\n ************** initializing logger *****************\n");
    1
}


// informational errors are printed and we exit normally, others are propagated
fn report(res : Result<(), MultiBlastError>) -> anyhow::Result<()> {
    match res {
        Ok(()) => Ok(()),
        Err(e) if e.is_informational() => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
} // end of report


#[doc(hidden)]
fn parse_align(matches : &ArgMatches) -> AlignParams {
    log::debug!("in parse_align");
    //
    let program = if matches.get_flag("nucl") { BlastProgram::Blastn } else { BlastProgram::Tblastn };
    let db_dir = matches.get_one::<PathBuf>("db").cloned().unwrap_or_default();
    let query_dir = matches.get_one::<PathBuf>("query").cloned().unwrap_or_default();
    let output_dir = matches.get_one::<PathBuf>("output").cloned().unwrap_or_default();
    let threads = *matches.get_one::<usize>("threads").unwrap_or(&1);
    let defaults = Thresholds::default();
    let thresholds = Thresholds::new(
        *matches.get_one::<f64>("evalue").unwrap_or(&defaults.evalue),
        *matches.get_one::<f64>("perc").unwrap_or(&defaults.perc_identity),
        *matches.get_one::<f64>("cov").unwrap_or(&defaults.coverage),
    );
    log::info!("program : {}, thresholds : {:?}, threads : {}", program.name(), thresholds, threads);
    //
    AlignParams::new(program, db_dir, query_dir, output_dir)
        .with_threads(threads)
        .with_thresholds(thresholds)
        .with_short_seq(matches.get_flag("short"))
        .with_best_hit_only(matches.get_flag("best"))
        .with_blast_dir(matches.get_one::<PathBuf>("blastdir").cloned())
} // end of parse_align


fn do_align(matches : &ArgMatches) -> Result<(), MultiBlastError> {
    let params = parse_align(matches);
    let summary = run_multiblast(&params)?;
    log::info!("{} tasks ({} failed), {} rows collated, {} rows reported in {:?}", summary.nb_tasks, summary.nb_failed,
                summary.nb_rows, summary.nb_filtered, summary.filtered_results);
    Ok(())
}


fn do_split(matches : &ArgMatches) -> Result<(), MultiBlastError> {
    let input = matches.get_one::<PathBuf>("input").cloned().unwrap_or_default();
    let outdir = matches.get_one::<PathBuf>("outdir").cloned().unwrap_or_default();
    let summary = split_fasta(&input, &outdir)?;
    println!("{} records written in {:?}, {} failures", summary.nb_written, outdir, summary.nb_failed);
    Ok(())
}

//============================================================================================


fn main() -> anyhow::Result<()> {
    let _ = init_log();
    let start_t = chrono::Local::now();
    log::info!("\n multiblast begins at time:{:#?} \n ", start_t);

    let align_cmd = Command::new("align")
        .about("Run blastn/tblastn for each query file against each database, collate and filter hits")
        .arg(Arg::new("nucl")
            .short('n')
            .long("nucl")
            .help("query files are nucleotide sequences, run blastn instead of tblastn")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("db")
            .short('d')
            .long("db")
            .value_name("DBDIR")
            .help("directory containing blast databases")
            .required(true)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("query")
            .short('q')
            .long("query")
            .value_name("QUERYDIR")
            .help("directory containing query fasta files")
            .required(true)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("threads")
            .short('t')
            .long("threads")
            .value_name("THREADS")
            .help("number of blast processes run in parallel")
            .default_value("1")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("OUTDIR")
            .help("directory for raw blast outputs and csv reports")
            .required(true)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("evalue")
            .short('e')
            .long("evalue")
            .value_name("EVALUE")
            .help("max evalue")
            .default_value("1e-5")
            .value_parser(value_parser!(f64)))
        .arg(Arg::new("perc")
            .short('p')
            .long("perc")
            .value_name("PERC_IDENTITY")
            .help("min percent identity")
            .default_value("90")
            .value_parser(value_parser!(f64)))
        .arg(Arg::new("cov")
            .short('c')
            .long("cov")
            .value_name("COVERAGE")
            .help("min query coverage in percent")
            .default_value("75")
            .value_parser(value_parser!(f64)))
        .arg(Arg::new("short")
            .short('s')
            .long("short")
            .help("short query sequences, use blastn-short task")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("best")
            .short('b')
            .long("best")
            .help("report only the lowest evalue hit for each database and query file")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("blastdir")
            .long("blastdir")
            .value_name("BLASTDIR")
            .help("directory containing blast executables, default is PATH")
            .value_parser(value_parser!(PathBuf)));

    let split_cmd = Command::new("split")
        .about("Split a multi record fasta file in one file per record")
        .arg(Arg::new("input")
            .short('i')
            .long("input")
            .value_name("FILE")
            .help("fasta file to split")
            .required(true)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("outdir")
            .short('o')
            .long("outdir")
            .value_name("OUTDIR")
            .help("directory receiving one file per record")
            .required(true)
            .value_parser(value_parser!(PathBuf)));

    //
    // the global command
    //
    let matches = Command::new("multiblast")
        .version("0.1.0")
        .about("Batch blast of query files against databases with hit filtering, and fasta splitting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(align_cmd)
        .subcommand(split_cmd)
        .get_matches();

    let res = match matches.subcommand() {
        Some(("align", sub_m)) => report(do_align(sub_m)),
        Some(("split", sub_m)) => report(do_split(sub_m)),
        _ => Ok(()),
    };
    //
    let end_t = chrono::Local::now();
    log::info!("\n multiblast ends at time:{:#?} \n ", end_t);
    res
} // end of main
