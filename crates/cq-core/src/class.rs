//! Driver behavioural classes.

use std::fmt;

/// The two driver populations being compared.
///
/// `Disciplined` drivers always follow the precomputed origin→sink shortest
/// path.  `Erratic` drivers flip a coin every hop and may take a random turn.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DriverClass {
    Disciplined,
    Erratic,
}

impl DriverClass {
    /// Both classes, in reporting order.
    pub const ALL: [DriverClass; 2] = [DriverClass::Disciplined, DriverClass::Erratic];

    /// Dense index for per-class arrays (`[T; 2]`).
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            DriverClass::Disciplined => 0,
            DriverClass::Erratic     => 1,
        }
    }

    #[inline]
    pub fn is_erratic(self) -> bool {
        self == DriverClass::Erratic
    }
}

impl fmt::Display for DriverClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DriverClass::Disciplined => "disciplined",
            DriverClass::Erratic     => "erratic",
        })
    }
}
