//! splits a multi record fasta file in one fasta file per record.
//!
//! Output files are named `<id>.fasta` where id is the first word of the record header.
//! A record that cannot be written is logged and skipped, a file that cannot be parsed is skipped as a whole.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::errors::MultiBlastError;
use crate::utils::files::ensure_dir;

/// extensions accepted for splitting, compared in lower case
pub const SPLIT_EXTENSIONS : [&str; 6] = ["fasta", "fas", "fa", "fna", "ffn", "faa"];

/// sequence line width in written files
pub const FASTA_LINE_WIDTH : usize = 60;


/// returns true if file has a fasta extension (case insensitive)
pub fn has_fasta_extension(path : &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => SPLIT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
} // end of has_fasta_extension


/// record identifier : first whitespace separated word of header
pub fn record_id(header : &[u8]) -> String {
    let header = String::from_utf8_lossy(header);
    header.split_whitespace().next().unwrap_or("").to_string()
}


fn parse_error(path : &Path, e : impl std::fmt::Display) -> MultiBlastError {
    MultiBlastError::FastaParse{path : path.to_path_buf(), msg : e.to_string()}
}


/// what the beginning of a file to split looks like
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileContent {
    /// nothing but whitespace
    Empty,
    /// first non blank byte is '>'
    Fasta,
    /// anything else, fastq included
    Other,
}


/// looks at the first non blank byte of file
pub fn sniff_content(path : &Path) -> io::Result<FileContent> {
    let reader = BufReader::new(File::open(path)?);
    for byte in reader.bytes() {
        let byte = byte?;
        if byte.is_ascii_whitespace() {
            continue;
        }
        return Ok(if byte == b'>' { FileContent::Fasta } else { FileContent::Other });
    }
    Ok(FileContent::Empty)
} // end of sniff_content


/// counts records of a fasta file, fails if any record cannot be parsed
pub fn count_records(path : &Path) -> Result<usize, MultiBlastError> {
    let mut reader = needletail::parse_fastx_file(path).map_err(|e| parse_error(path, e))?;
    let mut nb_record = 0;
    while let Some(record) = reader.next() {
        record.map_err(|e| parse_error(path, e))?;
        nb_record += 1;
    }
    Ok(nb_record)
} // end of count_records


/// writes one record in fasta format, sequence wrapped at [FASTA_LINE_WIDTH]
pub fn write_fasta_record<W : Write>(out : &mut W, header : &[u8], seq : &[u8]) -> io::Result<()> {
    out.write_all(b">")?;
    out.write_all(header)?;
    out.write_all(b"\n")?;
    for line in seq.chunks(FASTA_LINE_WIDTH) {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    Ok(())
} // end of write_fasta_record


fn write_record_file(outdir : &Path, id : &str, header : &[u8], seq : &[u8]) -> io::Result<PathBuf> {
    if id.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "record without identifier"));
    }
    let path = outdir.join(format!("{}.fasta", id));
    let mut out = BufWriter::new(File::create(&path)?);
    write_fasta_record(&mut out, header, seq)?;
    out.flush()?;
    Ok(path)
}


/// result of a split
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// records found in counting pass
    pub nb_records : usize,
    /// files written
    pub nb_written : usize,
    /// records that could not be written
    pub nb_failed : usize,
}


/// splits input in outdir, one file per record.
/// Unsupported extension and unparsable file are returned as errors before anything is written.
/// An empty file gives an empty output directory.
pub fn split_fasta(input : &Path, outdir : &Path) -> Result<SplitSummary, MultiBlastError> {
    if !has_fasta_extension(input) {
        log::warn!("Skipped {:?} due to incorrect file extension.", input);
        return Err(MultiBlastError::UnsupportedExtension(input.to_path_buf()));
    }
    match sniff_content(input)? {
        FileContent::Empty => {
            log::info!("split_fasta : {:?} contains no record", input);
            ensure_dir(outdir)?;
            return Ok(SplitSummary::default());
        }
        FileContent::Other => {
            let e = parse_error(input, "not a fasta file, first character is not '>'");
            log::error!("{}", e);
            return Err(e);
        }
        FileContent::Fasta => (),
    }
    let nb_records = count_records(input).map_err(|e| {
        log::error!("{}", e);
        e
    })?;
    log::info!("split_fasta : {:?} contains {} records", input, nb_records);
    ensure_dir(outdir)?;
    //
    let bar = ProgressBar::new(nb_records as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} Processing") {
        bar.set_style(style);
    }
    //
    let mut summary = SplitSummary{nb_records, ..Default::default()};
    let mut reader = needletail::parse_fastx_file(input).map_err(|e| parse_error(input, e))?;
    while let Some(record) = reader.next() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                log::error!("Error reading record in {:?}: {}", input, e);
                summary.nb_failed += 1;
                break;
            }
        };
        let id = record_id(record.id());
        match write_record_file(outdir, &id, record.id(), &record.seq()) {
            Ok(path) => {
                summary.nb_written += 1;
                log::trace!("record {} written in {:?}", id, path);
            }
            Err(e) => {
                log::error!("Error processing record {} in {:?}: {}", id, input, e);
                summary.nb_failed += 1;
            }
        }
        bar.inc(1);
        if summary.nb_written > 0 && summary.nb_written % 10_000 == 0 {
            log::info!("nb records written : {}", summary.nb_written);
        }
    }
    bar.finish();
    log::info!("split_fasta : {} files written, {} failures", summary.nb_written, summary.nb_failed);
    Ok(summary)
} // end of split_fasta
