//! Dense integer identifiers.
//!
//! Drivers and network nodes are numbered from 0 without gaps, so every id
//! doubles as an index into the `Vec` that holds its data.

use std::fmt;

macro_rules! dense_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id at position `i`, or `None` past `u32::MAX`.
            #[inline]
            pub fn from_index(i: usize) -> Option<Self> {
                u32::try_from(i).ok().map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))?;
                write!(f, "({})", self.0)
            }
        }
    };
}

dense_id! {
    /// Identity of a driver, assigned in population order.
    DriverId
}

dense_id! {
    /// A road-network node.  External labels (OSM ids, CSV node names) are
    /// mapped onto these by the network builder.
    NodeId
}

dense_id! {
    /// One direction of an undirected road segment.
    EdgeId
}

impl EdgeId {
    /// Predecessor marker for nodes Dijkstra has not reached.
    pub const NONE: EdgeId = EdgeId(u32::MAX);
}
