//! Chimera rescue: recover a usable pair from one chimeric + one linear
//! mate when the geometry is consistent with a single Hi-C molecule.

use crate::model::{AlignmentDescriptor, Strand};

/// Attempt to rescue a pair with exactly one chimeric mate.
///
/// Preconditions the caller guarantees: neither representative is null or
/// multi, and exactly one of `supp1`/`supp2` is non-empty.
///
/// Returns the `(algn1, algn2)` pair to use in place of the originals, in
/// the original mate order, or `None` if the geometry doesn't support a
/// rescue.
pub fn rescue_chimeric_alignment(
    repr1: &AlignmentDescriptor,
    repr2: &AlignmentDescriptor,
    supp1: &[AlignmentDescriptor],
    supp2: &[AlignmentDescriptor],
    max_molecule_size: u64,
) -> Option<(AlignmentDescriptor, AlignmentDescriptor)> {
    // Both non-chimeric: nothing to rescue, pair is already linear.
    if supp1.is_empty() && supp2.is_empty() {
        return Some((repr1.clone(), repr2.clone()));
    }
    // Both chimeric: not rescuable by this heuristic.
    if !supp1.is_empty() && !supp2.is_empty() {
        return None;
    }
    // Multiple supplementary alignments on the chimeric side: ambiguous, fail.
    if supp1.len() > 1 || supp2.len() > 1 {
        return None;
    }

    let first_read_is_chimeric = !supp1.is_empty();
    let sup_algn = if first_read_is_chimeric {
        &supp1[0]
    } else {
        &supp2[0]
    };

    // A non-unique supplementary needs no 3' rescue; treat the pair as linear.
    if !sup_algn.is_unique {
        return Some((repr1.clone(), repr2.clone()));
    }

    let repr_algn = if first_read_is_chimeric { repr1 } else { repr2 };
    let linear_algn = if first_read_is_chimeric { repr2 } else { repr1 };

    let (chim5, chim3) = if repr_algn.dist_to_5 < sup_algn.dist_to_5 {
        (repr_algn, sup_algn)
    } else {
        (sup_algn, repr_algn)
    };

    if chim3.chrom != linear_algn.chrom {
        return None;
    }
    if chim3.strand == linear_algn.strand {
        return None;
    }
    let order_ok = match linear_algn.strand {
        Strand::Plus => linear_algn.pos < chim3.pos,
        Strand::Minus => linear_algn.pos > chim3.pos,
    };
    if !order_ok {
        return None;
    }

    let molecule_size = match linear_algn.strand {
        Strand::Plus => chim3.pos - linear_algn.pos + chim3.dist_to_5 + linear_algn.dist_to_5,
        Strand::Minus => linear_algn.pos - chim3.pos + chim3.dist_to_5 + linear_algn.dist_to_5,
    };
    if molecule_size > max_molecule_size {
        return None;
    }

    if first_read_is_chimeric {
        Some((chim5.clone(), linear_algn.clone()))
    } else {
        Some((linear_algn.clone(), chim5.clone()))
    }
}
