//! The alignment descriptor produced per SAM record.

use std::fmt;

/// Sentinel chromosome name for an unmapped or non-unique alignment.
pub const NULL_CHROM: &str = "!";

/// CIGAR summary: run-length-accumulated spans, independent of the
/// reference/query coordinate system used to interpret them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CigarInfo {
    pub matched_bp: u64,
    pub algn_ref_span: u64,
    pub algn_read_span: u64,
    pub read_len: u64,
    pub clip5: u64,
    pub clip3: u64,
}

/// Strand of an alignment on the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Plus,
    Minus,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// One mate's (or one supplementary alignment's) position on the genome,
/// as interpreted by the classifier. `chrom = "!"`/`pos = 0`/`strand = -`
/// marks an unmapped-or-non-unique alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentDescriptor {
    pub chrom: String,
    pub pos: u64,
    pub strand: Strand,
    pub mapq: u8,
    pub is_mapped: bool,
    pub is_unique: bool,
    /// `None` for a descriptor built from a supplementary alignment: the
    /// field is only meaningful for the representative (primary) record.
    pub is_linear: Option<bool>,
    pub cigar: CigarInfo,
    pub dist_to_5: u64,
}

impl AlignmentDescriptor {
    /// Mask this descriptor's coordinates in place, turning it into the
    /// sentinel "no meaningful position" value used for null/chimeric mates.
    pub fn mask(&mut self) {
        self.chrom = NULL_CHROM.to_string();
        self.pos = 0;
        self.strand = Strand::Minus;
    }

    pub fn is_masked(&self) -> bool {
        self.chrom == NULL_CHROM && self.pos == 0 && self.strand == Strand::Minus
    }
}
