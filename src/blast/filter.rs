//! threshold filtering and best hit selection.

use std::collections::BTreeMap;

use crate::utils::parameters::Thresholds;
use super::hits::*;


/// returns true if hit passes all thresholds (inclusive). A missing value never passes.
pub fn passes(hit : &HitRecord, thresholds : &Thresholds) -> bool {
    let evalue_ok = hit.evalue.map(|e| e <= thresholds.evalue).unwrap_or(false);
    let ident_ok = hit.pident.map(|p| p >= thresholds.perc_identity).unwrap_or(false);
    let cov_ok = hit.query_coverage.map(|c| c >= thresholds.coverage).unwrap_or(false);
    evalue_ok && ident_ok && cov_ok
} // end of passes


/// keeps rows passing thresholds, in table order
pub fn filter_hits(table : &ResultTable, thresholds : &Thresholds) -> ResultTable {
    let rows : Vec<HitRecord> = table.get_rows().iter().filter(|h| passes(h, thresholds)).cloned().collect();
    log::info!("filter_hits : {} rows out of {} pass evalue <= {:e}, identity >= {}, coverage >= {}", rows.len(), table.len(),
                thresholds.evalue, thresholds.perc_identity, thresholds.coverage);
    ResultTable::new(rows)
} // end of filter_hits


/// keeps for each (database, query file) the row with lowest evalue, the first one in table order in case of tie.
/// Groups come out sorted by database then query file. Unlabelled rows and rows without evalue are ignored.
/// The selection does not depend on table order.
pub fn best_hit_per_group(table : &ResultTable) -> ResultTable {
    let mut best : BTreeMap<(&str, &str), (f64, &HitRecord)> = BTreeMap::new();
    for hit in table.get_rows() {
        let (key, evalue) = match (hit.group_key(), hit.evalue) {
            (Some(key), Some(evalue)) => (key, evalue),
            _ => continue,
        };
        best.entry(key)
            .and_modify(|current| if evalue < current.0 { *current = (evalue, hit) })
            .or_insert((evalue, hit));
    }
    let rows : Vec<HitRecord> = best.into_values().map(|(_, hit)| hit.clone()).collect();
    log::info!("best_hit_per_group : {} groups", rows.len());
    ResultTable::new(rows)
} // end of best_hit_per_group
