//! CSV edge-list loader.
//!
//! # CSV format
//!
//! One row per road segment, as exported from the road-centreline extracts:
//!
//! ```csv
//! u,v,length
//! 204449959,204449961,87.3
//! 204449961,204350837,412.0
//! ```
//!
//! `u` and `v` are arbitrary 64-bit node labels; `length` is the routing
//! weight and must be finite and non-negative.  Extra columns are ignored.
//! Segments are undirected.
//!
//! Rows naming the same pair of nodes (in either order) collapse into one
//! road with the smallest length, whatever the row order.  Graph libraries
//! that overwrite edge attributes row by row keep the *last* length
//! instead, so a file with conflicting duplicates can route differently
//! here.  Rows with `u == v` are dropped.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{NetworkError, NetworkResult, RoadNetwork, RoadNetworkBuilder};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    u:      u64,
    v:      u64,
    length: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RoadNetwork`] from a CSV edge list on disk.
pub fn load_network_csv(path: &Path) -> NetworkResult<RoadNetwork> {
    let file = std::fs::File::open(path)?;
    load_network_reader(file)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded networks.
pub fn load_network_reader<R: Read>(reader: R) -> NetworkResult<RoadNetwork> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = RoadNetworkBuilder::new();

    for (row_no, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let row = result?;
        if !row.length.is_finite() || row.length < 0.0 {
            return Err(NetworkError::Parse(format!(
                "row {}: length {} must be finite and non-negative",
                row_no + 1,
                row.length
            )));
        }
        builder.add_labelled_road(row.u, row.v, row.length);
    }

    Ok(builder.build())
}
