//! gathers raw blast outputs of output directory in one table.
//!
//! Each file is read as tab separated rows; rows without exactly 13 fields are dropped.
//! Rows are labelled with database and query file names of the task that produced the file.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::errors::MultiBlastError;
use super::hits::*;
use super::task::{Task, RESULTS_SUFFIX};


/// returns raw result files of directory, sorted by name
pub fn list_result_files(output_dir : &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::<PathBuf>::new();
    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        let is_result = path.file_name().and_then(|f| f.to_str()).map(|f| f.ends_with(RESULTS_SUFFIX)).unwrap_or(false);
        if is_result && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
} // end of list_result_files



/// parses one raw blast output. Returns the well formed rows and the number of dropped rows.
pub fn read_result_file(path : &Path, database : Option<&str>, query_file_name : Option<&str>) -> Result<(Vec<HitRecord>, usize), MultiBlastError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)?;
    //
    let mut hits = Vec::<HitRecord>::new();
    let mut nb_dropped = 0;
    for record in reader.records() {
        match record {
            Ok(record) => {
                match HitRecord::from_fields(record.iter(), database, query_file_name) {
                    Some(hit) => hits.push(hit),
                    None => nb_dropped += 1,
                }
            }
            Err(e) => {
                log::debug!("unreadable row in {:?} : {}", path, e);
                nb_dropped += 1;
            }
        }
    }
    if nb_dropped > 0 {
        log::debug!("read_result_file {:?} : {} rows kept, {} rows dropped", path, hits.len(), nb_dropped);
    }
    Ok((hits, nb_dropped))
} // end of read_result_file



/// collates all raw outputs of output_dir. Files are labelled by matching their path with task outputs,
/// a file not produced by any task gives unlabelled rows.
pub fn collate(output_dir : &Path, tasks : &[Task]) -> Result<ResultTable, MultiBlastError> {
    let labels : HashMap<&Path, &Task> = tasks.iter().map(|t| (t.get_output(), t)).collect();
    //
    let mut table = ResultTable::default();
    let mut nb_dropped = 0;
    let files = list_result_files(output_dir)?;
    for path in &files {
        let task = labels.get(path.as_path());
        if task.is_none() {
            log::info!("result file {:?} does not come from a task of this run", path);
        }
        let database = task.map(|t| t.get_db_name());
        let query_file_name = task.map(|t| t.get_query_name());
        let (mut hits, dropped) = read_result_file(path, database, query_file_name)?;
        nb_dropped += dropped;
        table.append(&mut hits);
    }
    log::info!("collate : {} files, {} rows, {} malformed rows dropped", files.len(), table.len(), nb_dropped);
    Ok(table)
} // end of collate



#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::*;
    use crate::blast::task::enumerate_tasks;
    use std::fs::File;
    use std::io::Write;

    const ROW : &str = "q1\ts1\t99.0\t91\t1\t0\t10\t100\t1\t91\t1e-40\t170\t200";

    #[test]
    fn rows_counted_and_labelled() {
        let root = tempfile::tempdir().unwrap();
        let db_dir = root.path().join("db");
        let query_dir = root.path().join("q");
        let out = root.path().join("out");
        for d in [&db_dir, &query_dir, &out] {
            fs::create_dir(d).unwrap();
        }
        File::create(db_dir.join("ecoli.nhr")).unwrap();
        File::create(query_dir.join("geneA.fa")).unwrap();
        File::create(query_dir.join("geneB.fa")).unwrap();
        let params = AlignParams::new(BlastProgram::Blastn, db_dir, query_dir, out.clone());
        let tasks = enumerate_tasks(&params).unwrap();
        // geneA : 2 good rows and one malformed, geneB : empty file
        let mut f = File::create(tasks[0].get_output()).unwrap();
        writeln!(f, "{}", ROW).unwrap();
        writeln!(f, "broken\trow").unwrap();
        writeln!(f, "{}", ROW.replace("q1", "q2")).unwrap();
        File::create(tasks[1].get_output()).unwrap();
        // a stray file from an older run and a non result file
        let mut stray = File::create(out.join("old_run_results.txt")).unwrap();
        writeln!(stray, "{}", ROW).unwrap();
        File::create(out.join("all_results.csv")).unwrap();
        //
        let table = collate(&out, &tasks).unwrap();
        assert_eq!(table.len(), 3);
        let labelled : Vec<_> = table.get_rows().iter().filter_map(|h| h.group_key()).collect();
        assert_eq!(labelled, vec![("ecoli", "geneA"), ("ecoli", "geneA")]);
        assert_eq!(table.get_rows().iter().filter(|h| h.database.is_none()).count(), 1);
    }

    #[test]
    fn dropped_rows_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x_results.txt");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "{}", ROW).unwrap();
        writeln!(f, "{}\t12", ROW).unwrap();
        let (hits, dropped) = read_result_file(&path, Some("db"), Some("q")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(dropped, 1);
    }
}
