//! Pair classifier: maps a pair of alignment descriptors plus their
//! supplementary lists to one of the eleven pair types, masking coordinates
//! and determining flip order.

use crate::model::{AlignmentDescriptor, PairType};
use crate::rescue::rescue_chimeric_alignment;

/// The outcome of classifying one read group.
pub struct Classification {
    pub pair_type: PairType,
    pub algn1: AlignmentDescriptor,
    pub algn2: AlignmentDescriptor,
    pub flip_pair: bool,
}

fn masked(mut a: AlignmentDescriptor) -> AlignmentDescriptor {
    a.mask();
    a
}

/// `-1` if `c1 < c2` lexicographically, `+1` if `c1 > c2`, else `-1` if
/// `p1 < p2`, else `+1`. A positive result means the pair is out of
/// canonical order and the caller should flip it.
fn get_pair_order(c1: &str, p1: u64, c2: &str, p2: u64) -> i8 {
    match c1.cmp(c2) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Equal => {
            if p1 < p2 {
                -1
            } else {
                1
            }
        }
    }
}

/// Classify one read group's pair of representative alignments, given the
/// supplementary alignments parsed for each mate's representative record.
pub fn classify(
    algn1: AlignmentDescriptor,
    algn2: AlignmentDescriptor,
    supp1: &[AlignmentDescriptor],
    supp2: &[AlignmentDescriptor],
    max_molecule_size: u64,
) -> Classification {
    let null1 = !algn1.is_mapped;
    let null2 = !algn2.is_mapped;
    let multi1 = !algn1.is_unique;
    let multi2 = !algn2.is_unique;
    let chim1 = algn1.is_linear == Some(false);
    let chim2 = algn2.is_linear == Some(false);

    if null1 || null2 {
        return classify_with_null(algn1, algn2, null1, null2, multi1, multi2, chim1, chim2);
    }
    if multi1 || multi2 {
        return classify_with_multi(algn1, algn2, multi1, multi2, chim1, chim2);
    }
    if chim1 || chim2 {
        return classify_with_chim(algn1, algn2, supp1, supp2, chim1, chim2, max_molecule_size);
    }

    // Both linear, unique, mapped.
    let flip_pair = get_pair_order(&algn1.chrom, algn1.pos, &algn2.chrom, algn2.pos) > 0;
    Classification {
        pair_type: PairType::LL,
        algn1,
        algn2,
        flip_pair,
    }
}

fn classify_with_null(
    algn1: AlignmentDescriptor,
    algn2: AlignmentDescriptor,
    null1: bool,
    null2: bool,
    multi1: bool,
    multi2: bool,
    chim1: bool,
    chim2: bool,
) -> Classification {
    if null1 && null2 {
        return Classification {
            pair_type: PairType::NN,
            algn1: masked(algn1),
            algn2: masked(algn2),
            flip_pair: false,
        };
    }

    let non_null_is_multi = (null1 && multi2) || (null2 && multi1);
    if non_null_is_multi {
        return Classification {
            pair_type: PairType::NM,
            algn1: masked(algn1),
            algn2: masked(algn2),
            flip_pair: null2,
        };
    }

    let non_null_is_chim = (null1 && chim2) || (null2 && chim1);
    if non_null_is_chim {
        return Classification {
            pair_type: PairType::NC,
            algn1: masked(algn1),
            algn2: masked(algn2),
            flip_pair: null2,
        };
    }

    Classification {
        pair_type: PairType::NL,
        algn1,
        algn2,
        flip_pair: null2,
    }
}

fn classify_with_multi(
    algn1: AlignmentDescriptor,
    algn2: AlignmentDescriptor,
    multi1: bool,
    multi2: bool,
    chim1: bool,
    chim2: bool,
) -> Classification {
    if multi1 && multi2 {
        return Classification {
            pair_type: PairType::MM,
            algn1,
            algn2,
            flip_pair: false,
        };
    }

    let other_is_chim = (multi1 && chim2) || (multi2 && chim1);
    if other_is_chim {
        return Classification {
            pair_type: PairType::MC,
            algn1: masked(algn1),
            algn2: masked(algn2),
            flip_pair: multi2,
        };
    }

    Classification {
        pair_type: PairType::ML,
        algn1,
        algn2,
        flip_pair: multi2,
    }
}

fn classify_with_chim(
    algn1: AlignmentDescriptor,
    algn2: AlignmentDescriptor,
    supp1: &[AlignmentDescriptor],
    supp2: &[AlignmentDescriptor],
    chim1: bool,
    chim2: bool,
    max_molecule_size: u64,
) -> Classification {
    if chim1 && chim2 {
        return Classification {
            pair_type: PairType::CC,
            algn1: masked(algn1),
            algn2: masked(algn2),
            flip_pair: false,
        };
    }

    match rescue_chimeric_alignment(&algn1, &algn2, supp1, supp2, max_molecule_size) {
        Some((rescued1, rescued2)) => {
            let flip_pair =
                get_pair_order(&rescued1.chrom, rescued1.pos, &rescued2.chrom, rescued2.pos) > 0;
            Classification {
                pair_type: PairType::CX,
                algn1: rescued1,
                algn2: rescued2,
                flip_pair,
            }
        }
        None => {
            let (algn1, algn2) = if chim1 {
                (masked(algn1), algn2)
            } else {
                (algn1, masked(algn2))
            };
            Classification {
                pair_type: PairType::CL,
                algn1,
                algn2,
                flip_pair: chim2,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CigarInfo, Strand};

    fn mapped(chrom: &str, pos: u64, strand: Strand, is_linear: bool) -> AlignmentDescriptor {
        AlignmentDescriptor {
            chrom: chrom.to_string(),
            pos,
            strand,
            mapq: 60,
            is_mapped: true,
            is_unique: true,
            is_linear: Some(is_linear),
            cigar: CigarInfo::default(),
            dist_to_5: 0,
        }
    }

    fn null() -> AlignmentDescriptor {
        let mut a = mapped("chr1", 1, Strand::Plus, true);
        a.is_mapped = false;
        a.mask();
        a
    }

    fn multi() -> AlignmentDescriptor {
        let mut a = mapped("chr1", 1, Strand::Plus, true);
        a.is_unique = false;
        a.mask();
        a
    }

    #[test]
    fn both_null_is_nn() {
        let c = classify(null(), null(), &[], &[], 2000);
        assert_eq!(c.pair_type, PairType::NN);
        assert!(c.algn1.is_masked());
        assert!(c.algn2.is_masked());
    }

    #[test]
    fn both_linear_unique_is_ll_no_flip() {
        let a1 = mapped("chr1", 100, Strand::Plus, true);
        let a2 = mapped("chr1", 200, Strand::Minus, true);
        let c = classify(a1, a2, &[], &[], 2000);
        assert_eq!(c.pair_type, PairType::LL);
        assert!(!c.flip_pair);
    }

    #[test]
    fn both_linear_unique_is_ll_flipped_when_out_of_order() {
        let a1 = mapped("chr2", 100, Strand::Plus, true);
        let a2 = mapped("chr1", 200, Strand::Minus, true);
        let c = classify(a1, a2, &[], &[], 2000);
        assert_eq!(c.pair_type, PairType::LL);
        assert!(c.flip_pair);
    }

    #[test]
    fn both_chimeric_is_cc_masked() {
        let a1 = mapped("chr1", 100, Strand::Plus, false);
        let a2 = mapped("chr2", 200, Strand::Minus, false);
        let s = mapped("chr3", 1, Strand::Plus, true);
        let c = classify(a1, a2, &[s.clone()], &[s], 2000);
        assert_eq!(c.pair_type, PairType::CC);
        assert!(c.algn1.is_masked());
        assert!(c.algn2.is_masked());
    }

    #[test]
    fn one_null_one_multi_is_nm() {
        let c = classify(null(), multi(), &[], &[], 2000);
        assert_eq!(c.pair_type, PairType::NM);
        assert!(c.algn1.is_masked());
        assert!(c.algn2.is_masked());
        assert!(!c.flip_pair);
    }

    #[test]
    fn both_multi_is_mm() {
        let c = classify(multi(), multi(), &[], &[], 2000);
        assert_eq!(c.pair_type, PairType::MM);
    }

    fn algn_with(null: bool, multi: bool, chim: bool, chrom: &str, pos: u64) -> AlignmentDescriptor {
        AlignmentDescriptor {
            chrom: chrom.to_string(),
            pos,
            strand: Strand::Plus,
            mapq: 60,
            is_mapped: !null,
            is_unique: !multi,
            is_linear: Some(!chim),
            cigar: CigarInfo::default(),
            dist_to_5: 0,
        }
    }

    fn supp_for(chim: bool, chrom: &str) -> Vec<AlignmentDescriptor> {
        if chim {
            vec![algn_with(false, false, false, chrom, 999)]
        } else {
            Vec::new()
        }
    }

    /// Every valid `(null, multi, chim)` state of a mate, respecting
    /// `null ⇒ ¬multi ∧ ¬chim`.
    const MATE_STATES: &[(bool, bool, bool)] = &[
        (true, false, false),
        (false, false, false),
        (false, true, false),
        (false, false, true),
        (false, true, true),
    ];

    #[test]
    fn classify_covers_the_full_input_space_without_panicking() {
        for &(n1, m1, c1) in MATE_STATES {
            for &(n2, m2, c2) in MATE_STATES {
                let a1 = algn_with(n1, m1, c1, "chr1", 100);
                let a2 = algn_with(n2, m2, c2, "chr2", 200);
                let supp1 = supp_for(c1, "chr3");
                let supp2 = supp_for(c2, "chr4");

                let result = classify(a1, a2, &supp1, &supp2, 2000);

                match result.pair_type {
                    PairType::NN
                    | PairType::NM
                    | PairType::NC
                    | PairType::MC
                    | PairType::CC => {
                        assert!(
                            result.algn1.is_masked() && result.algn2.is_masked(),
                            "{:?} over ({n1},{m1},{c1})x({n2},{m2},{c2}) must mask both mates",
                            result.pair_type
                        );
                    }
                    PairType::CL => {
                        assert_ne!(
                            result.algn1.is_masked(),
                            result.algn2.is_masked(),
                            "CL over ({n1},{m1},{c1})x({n2},{m2},{c2}) must mask exactly one mate"
                        );
                    }
                    PairType::NL
                    | PairType::MM
                    | PairType::ML
                    | PairType::LL
                    | PairType::CX => {
                        assert!(
                            !result.algn1.is_masked() && !result.algn2.is_masked(),
                            "{:?} over ({n1},{m1},{c1})x({n2},{m2},{c2}) must not mask either mate",
                            result.pair_type
                        );
                    }
                }
            }
        }
    }
}
