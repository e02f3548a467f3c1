pub mod cigar;
pub mod sam;

pub use sam::{parse_primary, parse_supplementary, SamColumns};
