//! exit behaviour of the multiblast binary

use std::process::Command;

fn multiblast() -> Command {
    Command::new(env!("CARGO_BIN_EXE_multiblast"))
}


#[test]
fn missing_database_dir_exits_normally() {
    let root = tempfile::tempdir().unwrap();
    let output = multiblast()
        .args(["align", "--nucl", "-d"]).arg(root.path().join("nodb"))
        .arg("-q").arg(root.path())
        .arg("-o").arg(root.path().join("out"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No BLAST databases found"));
}


#[test]
fn split_rejects_extension_and_exits_normally() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("reads.fastq");
    std::fs::write(&input, "@r\nACGT\n+\nIIII\n").unwrap();
    let outdir = root.path().join("split");
    let output = multiblast().arg("split").arg("-i").arg(&input).arg("-o").arg(&outdir).output().unwrap();
    assert!(output.status.success());
    assert!(!outdir.exists());
}


#[test]
fn split_writes_records() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("contigs.fna");
    std::fs::write(&input, ">c1\nACGT\n>c2\nGGCC\n").unwrap();
    let outdir = root.path().join("split");
    let status = multiblast().arg("split").arg("--input").arg(&input).arg("--outdir").arg(&outdir).status().unwrap();
    assert!(status.success());
    assert!(outdir.join("c1.fasta").exists());
    assert!(outdir.join("c2.fasta").exists());
}


#[test]
fn missing_required_arguments_fail() {
    let output = multiblast().arg("align").output().unwrap();
    assert!(!output.status.success());
}
