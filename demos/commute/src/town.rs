//! Built-in synthetic road network.
//!
//! Ten intersections between a hillside neighbourhood and downtown.  Two
//! corridors (via the mill and via the river road) are close in length, so
//! random wrong turns regularly push erratic drivers onto the slower one.

use std::io::Cursor;

use cq_network::{NetworkResult, RoadNetwork, load_network_reader};

/// Label of the hillside intersection where every commute starts.
pub const HILLSIDE: u64 = 204_449_959;

/// Label of the downtown intersection every commute ends at.
pub const DOWNTOWN: u64 = 204_350_837;

// u,v,length in metres.
const TOWN_CSV: &str = "\
u,v,length\n\
204449959,204400001,400\n\
204449959,204400002,650\n\
204400001,204400003,300\n\
204400001,204400004,500\n\
204400002,204400004,350\n\
204400002,204400005,900\n\
204400003,204400005,700\n\
204400003,204400006,450\n\
204400004,204400006,300\n\
204400004,204400007,600\n\
204400005,204400007,250\n\
204400006,204350837,500\n\
204400007,204350837,400\n\
";

pub fn build_town() -> NetworkResult<RoadNetwork> {
    load_network_reader(Cursor::new(TOWN_CSV))
}
