//! full align pipeline with a fake blastn script standing for the blast executable

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use multiblast::blast::*;
use multiblast::utils::*;
use multiblast::MultiBlastError;

// writes 3 hits and a malformed row for each task, fails with an empty output on queries named empty*
#[cfg(unix)]
const FAKE_BLASTN : &str = r#"#!/bin/sh
out=""; query=""; db=""
while [ $# -gt 0 ]; do
  case "$1" in
    -out) out="$2"; shift 2;;
    -query) query="$2"; shift 2;;
    -db) db="$2"; shift 2;;
    *) shift;;
  esac
done
name=$(basename "$db")
case "$(basename "$query")" in
  empty*) : > "$out"; exit 1;;
esac
printf 'q1\t%s_s1\t99.0\t91\t1\t0\t1\t191\t1\t91\t1e-40\t170\t200\n' "$name" > "$out"
printf 'q1\t%s_s2\t95.0\t91\t1\t0\t1\t200\t1\t91\t1e-60\t170\t200\n' "$name" >> "$out"
printf 'q1\t%s_s3\t80.0\t91\t1\t0\t1\t200\t1\t91\t1e-60\t170\t200\n' "$name" >> "$out"
printf 'malformed\trow\n' >> "$out"
exit 0
"#;


fn setup_inputs(root : &Path) -> (PathBuf, PathBuf) {
    let db_dir = root.join("db");
    let query_dir = root.join("queries");
    fs::create_dir(&db_dir).unwrap();
    fs::create_dir(&query_dir).unwrap();
    for f in ["ecoli.nhr", "ecoli.nin", "ecoli.nsq", "phage.nhr"] {
        File::create(db_dir.join(f)).unwrap();
    }
    for f in ["a.fasta", "b.fna", "empty.fa", "readme.md"] {
        fs::write(query_dir.join(f), ">q1\nACGT\n").unwrap();
    }
    (db_dir, query_dir)
}


#[cfg(unix)]
fn install_fake_blast(dir : &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::create_dir_all(dir).unwrap();
    let path = dir.join("blastn");
    fs::write(&path, FAKE_BLASTN).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}


fn csv_rows(path : &Path) -> Vec<csv::StringRecord> {
    csv::Reader::from_path(path).unwrap().records().map(|r| r.unwrap()).collect()
}


// both reporting modes in one test so that only one test of this file spawns processes
#[cfg(unix)]
#[test]
fn align_all_and_best_hits() {
    let root = tempfile::tempdir().unwrap();
    let (db_dir, query_dir) = setup_inputs(root.path());
    let bin_dir = root.path().join("bin");
    install_fake_blast(&bin_dir);
    //
    let out_all = root.path().join("out_all");
    let params = AlignParams::new(BlastProgram::Blastn, db_dir.clone(), query_dir.clone(), out_all.clone())
        .with_threads(3)
        .with_blast_dir(Some(bin_dir.clone()));
    let summary = run_multiblast(&params).unwrap();
    assert_eq!(summary.nb_tasks, 6);
    assert_eq!(summary.nb_failed, 2);
    // 4 successful tasks, 3 well formed rows each
    assert_eq!(summary.nb_rows, 12);
    assert_eq!(summary.nb_filtered, 8);
    assert_eq!(summary.filtered_results, out_all.join(ALL_FILTERED_FILE));
    assert_eq!(csv_rows(&out_all.join(ALL_RESULTS_FILE)).len(), 12);
    let filtered = csv_rows(&summary.filtered_results);
    assert_eq!(filtered.len(), 8);
    assert!(filtered.iter().all(|r| !r[1].ends_with("_s3")));
    assert!(out_all.join("ecoli_a_results.txt").exists());
    assert!(out_all.join(PARAMETERS_FILE).exists());
    //
    let out_best = root.path().join("out_best");
    let params = AlignParams::new(BlastProgram::Blastn, db_dir, query_dir, out_best.clone())
        .with_blast_dir(Some(bin_dir))
        .with_best_hit_only(true);
    let summary = run_multiblast(&params).unwrap();
    assert_eq!(summary.filtered_results, out_best.join(BEST_HITS_FILE));
    let best = csv_rows(&summary.filtered_results);
    assert_eq!(best.len(), 4);
    let groups : Vec<(String, String)> = best.iter().map(|r| (r[2].to_string(), r[3].to_string())).collect();
    assert_eq!(groups, vec![("ecoli".to_string(), "a".to_string()), ("ecoli".to_string(), "b".to_string()),
                            ("phage".to_string(), "a".to_string()), ("phage".to_string(), "b".to_string())]);
    assert!(best.iter().all(|r| r[1].ends_with("_s2")));
    assert!(!out_best.join(ALL_FILTERED_FILE).exists());
}


#[test]
fn missing_inputs_are_informational() {
    let root = tempfile::tempdir().unwrap();
    let (db_dir, _) = setup_inputs(root.path());
    let out = root.path().join("out");
    let params = AlignParams::new(BlastProgram::Tblastn, db_dir, root.path().join("absent"), out.clone());
    let err = run_multiblast(&params).unwrap_err();
    assert!(matches!(err, MultiBlastError::NoQueryDir(_)));
    assert!(err.is_informational());
    assert!(!out.exists());
}


#[test]
fn no_database_gives_no_results() {
    let root = tempfile::tempdir().unwrap();
    let (_, query_dir) = setup_inputs(root.path());
    let empty_db = root.path().join("empty_db");
    fs::create_dir(&empty_db).unwrap();
    let params = AlignParams::new(BlastProgram::Blastn, empty_db, query_dir, root.path().join("out"));
    let err = run_multiblast(&params).unwrap_err();
    assert!(matches!(err, MultiBlastError::NoResults));
    assert!(!root.path().join("out").join(ALL_RESULTS_FILE).exists());
}
