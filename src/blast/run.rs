//! the whole align pipeline : enumeration, dispatch, collation, filtering, reports.

use std::path::PathBuf;
use std::time::SystemTime;

use cpu_time::ProcessTime;

use crate::errors::MultiBlastError;
use crate::utils::files::ensure_dir;
use crate::utils::parameters::AlignParams;

use super::collate::collate;
use super::dispatch::{dispatch, TaskStatus};
use super::filter::{best_hit_per_group, filter_hits};
use super::report::*;
use super::task::enumerate_tasks;


/// what a run produced
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// number of (query, database) pairs
    pub nb_tasks : usize,
    /// tasks whose blast process failed or could not be launched
    pub nb_failed : usize,
    /// rows in all_results.csv
    pub nb_rows : usize,
    /// rows in the filtered report
    pub nb_filtered : usize,
    pub all_results : PathBuf,
    pub filtered_results : PathBuf,
} // end of RunSummary



/// runs blast for each (query file, database) and produces csv reports in output directory.
///
/// Returns [MultiBlastError::NoDatabaseDir] or [MultiBlastError::NoQueryDir] if an input directory is missing
/// and [MultiBlastError::NoResults] if no blast row was collected; these are informational returns.
pub fn run_multiblast(params : &AlignParams) -> Result<RunSummary, MultiBlastError> {
    let start_t = SystemTime::now();
    let cpu_start = ProcessTime::now();
    //
    let tasks = enumerate_tasks(params)?;
    let output_dir = params.get_output_dir();
    ensure_dir(output_dir)?;
    params.dump_json(output_dir)?;
    //
    let outcomes = dispatch(&tasks, params.get_threads())?;
    let nb_failed = outcomes.iter().filter(|o| o.get_status() != TaskStatus::Success).count();
    //
    let table = collate(output_dir, &tasks)?;
    if table.is_empty() {
        return Err(MultiBlastError::NoResults);
    }
    let all_results = write_report(output_dir, ALL_RESULTS_FILE, &table)?;
    println!("All results saved in {:?}", all_results);
    //
    let filtered = filter_hits(&table, params.get_thresholds());
    let (filtered, filtered_results) = if params.get_best_hit_only() {
        let best = best_hit_per_group(&filtered);
        let path = write_report(output_dir, BEST_HITS_FILE, &best)?;
        println!("Strongest matches stored in {:?}", path);
        (best, path)
    }
    else {
        let path = write_report(output_dir, ALL_FILTERED_FILE, &filtered)?;
        println!("Filtered results stored in {:?}", path);
        (filtered, path)
    };
    //
    let cpu_time = cpu_start.elapsed();
    if let Ok(sys_t) = start_t.elapsed() {
        log::info!("run_multiblast sys time(s) {:?} cpu time(s) {:?}", sys_t.as_secs(), cpu_time.as_secs());
    }
    Ok(RunSummary{nb_tasks : tasks.len(), nb_failed, nb_rows : table.len(), nb_filtered : filtered.len(),
                  all_results, filtered_results})
} // end of run_multiblast
