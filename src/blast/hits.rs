//! A hit record is one row of blast tabular output (13 fields, see [crate::blast::task::OUTFMT]),
//! labelled with database and query file, and completed with query coverage.

use serde::{Serialize, Serializer};

/// fields of blast output, in order
pub const BLAST_FIELDS : [&str; 13] = ["qseqid", "sseqid", "pident", "length", "mismatch", "gapopen", "qstart", "qend",
                                        "sstart", "send", "evalue", "bitscore", "qlen"];

/// number of fields expected in a raw blast row
pub const NB_BLAST_FIELDS : usize = BLAST_FIELDS.len();


/// The field order is the column order of csv reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HitRecord {
    pub qseqid : String,
    pub sseqid : String,
    /// database name, None if the output file could not be associated to a task
    pub database : Option<String>,
    /// query file name without extension
    pub query_file_name : Option<String>,
    pub pident : Option<f64>,
    pub query_coverage : Option<f64>,
    #[serde(serialize_with = "serialize_evalue")]
    pub evalue : Option<f64>,
    // fields not used in filtering are kept as blast wrote them
    pub bitscore : String,
    pub length : String,
    pub mismatch : String,
    pub gapopen : String,
    pub qstart : Option<u64>,
    pub qend : Option<u64>,
    pub sstart : String,
    pub send : String,
    pub qlen : Option<u64>,
} // end of HitRecord



// non parsable numeric fields are coerced to None
fn parse_num<T : std::str::FromStr>(field : &str) -> Option<T> {
    field.trim().parse::<T>().ok()
}


/// formats evalue as blast does : small values in scientific notation
pub fn format_evalue(evalue : f64) -> String {
    if evalue != 0. && evalue.abs() < 1e-4 {
        format!("{:e}", evalue)
    }
    else {
        format!("{}", evalue)
    }
}

fn serialize_evalue<S : Serializer>(evalue : &Option<f64>, serializer : S) -> Result<S::Ok, S::Error> {
    match evalue {
        Some(e) => serializer.serialize_str(&format_evalue(*e)),
        None => serializer.serialize_none(),
    }
}


/// query coverage in percent, rounded to 2 decimals.
/// None if a coordinate is missing or query length is null.
pub fn query_coverage(qstart : Option<u64>, qend : Option<u64>, qlen : Option<u64>) -> Option<f64> {
    match (qstart, qend, qlen) {
        (Some(start), Some(end), Some(len)) if len > 0 => {
            let cov = (end as f64 - start as f64) / len as f64 * 100.;
            Some((cov * 100.).round() / 100.)
        }
        _ => None,
    }
} // end of query_coverage



impl HitRecord {
    /// builds a record from a raw blast row. Returns None if the row has not exactly 13 fields.
    pub fn from_fields<'a, I>(fields : I, database : Option<&str>, query_file_name : Option<&str>) -> Option<Self>
        where I : IntoIterator<Item = &'a str> {
        let fields : Vec<&str> = fields.into_iter().collect();
        if fields.len() != NB_BLAST_FIELDS {
            return None;
        }
        let qstart = parse_num::<u64>(fields[6]);
        let qend = parse_num::<u64>(fields[7]);
        let qlen = parse_num::<u64>(fields[12]);
        Some(HitRecord {
            qseqid : fields[0].to_string(),
            sseqid : fields[1].to_string(),
            database : database.map(String::from),
            query_file_name : query_file_name.map(String::from),
            pident : parse_num(fields[2]),
            query_coverage : query_coverage(qstart, qend, qlen),
            evalue : parse_num(fields[10]),
            bitscore : fields[11].to_string(),
            length : fields[3].to_string(),
            mismatch : fields[4].to_string(),
            gapopen : fields[5].to_string(),
            qstart,
            qend,
            sstart : fields[8].to_string(),
            send : fields[9].to_string(),
            qlen,
        })
    } // end of from_fields

    /// the (database, query file) pair the hit comes from, None if unlabelled
    pub fn group_key(&self) -> Option<(&str, &str)> {
        match (&self.database, &self.query_file_name) {
            (Some(db), Some(q)) => Some((db.as_str(), q.as_str())),
            _ => None,
        }
    }
} // end of impl HitRecord


//=====================================================================================


/// ordered collection of hits, rows are not unique
#[derive(Clone, Debug, Default)]
pub struct ResultTable {
    rows : Vec<HitRecord>,
}

impl ResultTable {
    pub fn new(rows : Vec<HitRecord>) -> Self {
        ResultTable{rows}
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get_rows(&self) -> &[HitRecord] {
        &self.rows
    }

    pub fn append(&mut self, rows : &mut Vec<HitRecord>) {
        self.rows.append(rows)
    }
} // end of impl ResultTable



#[cfg(test)]
mod tests {
    use super::*;

    const ROW : &str = "q1\tsubj1\t98.50\t91\t1\t0\t10\t100\t1\t91\t2.5e-40\t170\t200";

    #[test]
    fn coverage_value() {
        assert_eq!(query_coverage(Some(10), Some(100), Some(200)), Some(45.0));
        assert_eq!(query_coverage(Some(1), Some(100), Some(300)), Some(33.0));
        assert_eq!(query_coverage(Some(1), Some(2), Some(3)), Some(33.33));
        assert_eq!(query_coverage(Some(1), Some(100), Some(0)), None);
        assert_eq!(query_coverage(None, Some(100), Some(200)), None);
    }

    #[test]
    fn parse_row() {
        let hit = HitRecord::from_fields(ROW.split('\t'), Some("ecoli"), Some("geneA")).unwrap();
        assert_eq!(hit.qseqid, "q1");
        assert_eq!(hit.sseqid, "subj1");
        assert_eq!(hit.pident, Some(98.5));
        assert_eq!(hit.evalue, Some(2.5e-40));
        assert_eq!(hit.query_coverage, Some(45.0));
        assert_eq!(hit.group_key(), Some(("ecoli", "geneA")));
    }

    #[test]
    fn wrong_column_count() {
        assert!(HitRecord::from_fields("a\tb\tc".split('\t'), None, None).is_none());
        let too_long = format!("{}\textra", ROW);
        assert!(HitRecord::from_fields(too_long.split('\t'), None, None).is_none());
    }

    #[test]
    fn non_numeric_coerced() {
        let row = "q1\tsubj1\tNA\t91\t1\t0\t10\tx\t1\t91\t1e-5\t170\t200";
        let hit = HitRecord::from_fields(row.split('\t'), None, None).unwrap();
        assert_eq!(hit.pident, None);
        assert_eq!(hit.qend, None);
        assert_eq!(hit.query_coverage, None);
        assert_eq!(hit.group_key(), None);
    }

    #[test]
    fn unfiltered_fields_kept_as_text() {
        let row = "q1\tsubj1\t99.0\tNA\t1\t0\t10\t100\t1\t91\t1e-5\t1.23e+05\t200";
        let hit = HitRecord::from_fields(row.split('\t'), None, None).unwrap();
        assert_eq!(hit.bitscore, "1.23e+05");
        assert_eq!(hit.length, "NA");
        assert_eq!(hit.sstart, "1");
        assert_eq!(hit.send, "91");
        assert_eq!(hit.qlen, Some(200));
    }

    #[test]
    fn evalue_format() {
        assert_eq!(format_evalue(2.5e-40), "2.5e-40");
        assert_eq!(format_evalue(0.), "0");
        assert_eq!(format_evalue(0.002), "0.002");
    }
}
