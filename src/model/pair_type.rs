//! The closed, eleven-member pair-type alphabet.

use std::fmt;

/// A classification outcome for a read pair. Modeled as a closed tagged
/// variant rather than a `String` so the classifier's `match` in
/// `classify.rs` can be exhaustive with no fallback branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairType {
    /// Both mates unmapped.
    NN,
    /// One mate null, the other non-unique.
    NM,
    /// One mate null, the other chimeric.
    NC,
    /// One mate null, the other linear-unique.
    NL,
    /// Both mates non-unique.
    MM,
    /// One mate non-unique, the other chimeric.
    MC,
    /// One mate non-unique, the other linear-unique.
    ML,
    /// Both mates chimeric.
    CC,
    /// One chimeric mate rescued into a linear pair.
    CX,
    /// One chimeric mate, rescue failed.
    CL,
    /// Both mates linear and uniquely mapped.
    LL,
}

impl PairType {
    pub fn as_str(self) -> &'static str {
        match self {
            PairType::NN => "NN",
            PairType::NM => "NM",
            PairType::NC => "NC",
            PairType::NL => "NL",
            PairType::MM => "MM",
            PairType::MC => "MC",
            PairType::ML => "ML",
            PairType::CC => "CC",
            PairType::CX => "CX",
            PairType::CL => "CL",
            PairType::LL => "LL",
        }
    }
}

impl fmt::Display for PairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
