//! SAM field parsing: flags, mapq, and supplementary-alignment tags into
//! alignment descriptors.

use crate::errors::CoreError;
use crate::model::alignment::NULL_CHROM;
use crate::model::{AlignmentDescriptor, Strand};
use crate::parser::cigar::parse_cigar;

const FLAG_PAIRED: u64 = 0x01;
const FLAG_UNMAPPED: u64 = 0x04;
const FLAG_REVERSE: u64 = 0x10;
const FLAG_FIRST_IN_TEMPLATE: u64 = 0x40;
const FLAG_SUPPLEMENTARY: u64 = 0x800;

/// A SAM record split into its tab-separated columns, with the trailing
/// newline already stripped. Column 0 is QNAME, as in the SAM spec.
pub struct SamColumns<'a> {
    pub line: &'a str,
    pub cols: Vec<&'a str>,
}

impl<'a> SamColumns<'a> {
    pub fn parse(line: &'a str) -> Result<Self, CoreError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 11 {
            let query_name = cols.first().unwrap_or(&"").to_string();
            return Err(CoreError::MalformedRecord {
                query_name,
                column: cols.len(),
                reason: format!("expected at least 11 tab-separated columns, got {}", cols.len()),
            });
        }
        Ok(SamColumns { line, cols })
    }

    pub fn query_name(&self) -> &'a str {
        self.cols[0]
    }

    fn flag(&self) -> Result<u64, CoreError> {
        self.cols[1].parse::<u64>().map_err(|_| CoreError::MalformedRecord {
            query_name: self.query_name().to_string(),
            column: 1,
            reason: format!("FLAG `{}` is not an integer", self.cols[1]),
        })
    }

    fn mapq(&self) -> Result<u8, CoreError> {
        self.cols[4].parse::<u8>().map_err(|_| CoreError::MalformedRecord {
            query_name: self.query_name().to_string(),
            column: 4,
            reason: format!("MAPQ `{}` is not an integer", self.cols[4]),
        })
    }

    fn pos(&self) -> Result<u64, CoreError> {
        self.cols[3].parse::<u64>().map_err(|_| CoreError::MalformedRecord {
            query_name: self.query_name().to_string(),
            column: 3,
            reason: format!("POS `{}` is not an integer", self.cols[3]),
        })
    }

    fn cigar_str(&self) -> &'a str {
        self.cols[5]
    }

    fn optional_fields(&self) -> &[&'a str] {
        &self.cols[11..]
    }

    /// `flag & 0x40` (first-in-template): `sams1` if set, else `sams2`.
    pub fn is_first_in_template(&self) -> Result<bool, CoreError> {
        Ok(self.flag()? & FLAG_FIRST_IN_TEMPLATE != 0)
    }

    /// `flag & 0x800` (supplementary): representative iff clear.
    pub fn is_supplementary(&self) -> Result<bool, CoreError> {
        Ok(self.flag()? & FLAG_SUPPLEMENTARY != 0)
    }
}

/// Parse the primary (representative) alignment of a SAM record.
pub fn parse_primary(rec: &SamColumns<'_>, min_mapq: u8) -> Result<AlignmentDescriptor, CoreError> {
    let flag = rec.flag()?;
    let is_mapped = flag & FLAG_UNMAPPED == 0;
    let mapq = rec.mapq()?;
    let is_unique = mapq >= min_mapq;
    let is_linear = !rec
        .optional_fields()
        .iter()
        .any(|f| f.starts_with("SA:Z:"));

    let cigar = parse_cigar(rec.cigar_str()).map_err(|reason| CoreError::MalformedRecord {
        query_name: rec.query_name().to_string(),
        column: 5,
        reason,
    })?;

    if is_mapped && is_unique {
        let strand = if flag & FLAG_REVERSE == 0 {
            Strand::Plus
        } else {
            Strand::Minus
        };
        let col_pos = rec.pos()?;
        let pos = match strand {
            Strand::Plus => col_pos,
            Strand::Minus => col_pos + cigar.algn_ref_span,
        };
        let dist_to_5 = match strand {
            Strand::Plus => cigar.clip5,
            Strand::Minus => cigar.clip3,
        };
        Ok(AlignmentDescriptor {
            chrom: rec.cols[2].to_string(),
            pos,
            strand,
            mapq,
            is_mapped,
            is_unique,
            is_linear: Some(is_linear),
            cigar,
            dist_to_5,
        })
    } else {
        let dist_to_5 = cigar.clip5; // strand defaults to '-'; '-' reads clip3, but
                                      // an unmapped/non-unique read has no meaningful
                                      // 5' side, so this value is never consulted.
        Ok(AlignmentDescriptor {
            chrom: NULL_CHROM.to_string(),
            pos: 0,
            strand: Strand::Minus,
            mapq,
            is_mapped,
            is_unique,
            is_linear: Some(is_linear),
            cigar,
            dist_to_5,
        })
    }
}

/// Parse every `SA:Z:` optional field of a SAM record into supplementary
/// alignment descriptors, in file order.
pub fn parse_supplementary(
    rec: &SamColumns<'_>,
    min_mapq: u8,
) -> Result<Vec<AlignmentDescriptor>, CoreError> {
    let mut out = Vec::new();
    for field in rec.optional_fields() {
        let Some(rest) = field.strip_prefix("SA:Z:") else {
            continue;
        };
        let parts: Vec<&str> = rest.split(',').collect();
        if parts.len() != 6 {
            return Err(CoreError::MalformedSupplementary {
                query_name: rec.query_name().to_string(),
                reason: format!("expected 6 comma-separated fields, got {}", parts.len()),
            });
        }
        let [rname, pos_str, strand_str, cigar_str, mapq_str, _nm] = [
            parts[0], parts[1], parts[2], parts[3], parts[4], parts[5],
        ];
        let mapq = mapq_str.parse::<u8>().map_err(|_| CoreError::MalformedSupplementary {
            query_name: rec.query_name().to_string(),
            reason: format!("SA:Z: mapq `{}` is not an integer", mapq_str),
        })?;
        let is_unique = mapq >= min_mapq;
        let cigar = parse_cigar(cigar_str).map_err(|reason| CoreError::MalformedSupplementary {
            query_name: rec.query_name().to_string(),
            reason,
        })?;

        if is_unique {
            let strand = match strand_str {
                "+" => Strand::Plus,
                "-" => Strand::Minus,
                other => {
                    return Err(CoreError::MalformedSupplementary {
                        query_name: rec.query_name().to_string(),
                        reason: format!("SA:Z: strand `{}` is neither + nor -", other),
                    })
                }
            };
            let col_pos = pos_str.parse::<u64>().map_err(|_| CoreError::MalformedSupplementary {
                query_name: rec.query_name().to_string(),
                reason: format!("SA:Z: pos `{}` is not an integer", pos_str),
            })?;
            let pos = match strand {
                Strand::Plus => col_pos,
                Strand::Minus => col_pos + cigar.algn_ref_span,
            };
            let dist_to_5 = match strand {
                Strand::Plus => cigar.clip5,
                Strand::Minus => cigar.clip3,
            };
            out.push(AlignmentDescriptor {
                chrom: rname.to_string(),
                pos,
                strand,
                mapq,
                is_mapped: true,
                is_unique,
                is_linear: None,
                cigar,
                dist_to_5,
            });
        } else {
            out.push(AlignmentDescriptor {
                chrom: NULL_CHROM.to_string(),
                pos: 0,
                strand: Strand::Minus,
                mapq,
                is_mapped: true,
                is_unique,
                is_linear: None,
                cigar,
                dist_to_5: cigar.clip5,
            });
        }
    }
    Ok(out)
}

/// `flag & 0x01 == 0` means an unpaired read; the upstream aligner is
/// expected to always emit paired reads, but this is exposed so the
/// grouper can assert the invariant if it wants to.
pub fn is_paired(rec: &SamColumns<'_>) -> Result<bool, CoreError> {
    Ok(rec.flag()? & FLAG_PAIRED != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(flag: u64, chrom: &str, pos: u64, mapq: u8, cigar: &str, extra: &str) -> String {
        format!(
            "r1\t{}\t{}\t{}\t{}\t{}\t=\t0\t0\tACGT\tIIII{}",
            flag, chrom, pos, mapq, cigar, extra
        )
    }

    #[test]
    fn unmapped_is_masked() {
        let l = line(77, "*", 0, 0, "*", "");
        let cols = SamColumns::parse(&l).unwrap();
        let algn = parse_primary(&cols, 10).unwrap();
        assert!(!algn.is_mapped);
        assert_eq!(algn.chrom, "!");
        assert_eq!(algn.pos, 0);
        assert_eq!(algn.strand, Strand::Minus);
    }

    #[test]
    fn mapped_unique_forward() {
        let l = line(0, "chr1", 100, 60, "50M", "");
        let cols = SamColumns::parse(&l).unwrap();
        let algn = parse_primary(&cols, 10).unwrap();
        assert_eq!(algn.chrom, "chr1");
        assert_eq!(algn.pos, 100);
        assert_eq!(algn.strand, Strand::Plus);
    }

    #[test]
    fn mapped_unique_reverse_adds_ref_span() {
        let l = line(16, "chr1", 200, 60, "50M", "");
        let cols = SamColumns::parse(&l).unwrap();
        let algn = parse_primary(&cols, 10).unwrap();
        assert_eq!(algn.strand, Strand::Minus);
        assert_eq!(algn.pos, 250);
    }

    #[test]
    fn below_min_mapq_is_non_unique_and_masked() {
        let l = line(0, "chr1", 100, 5, "50M", "");
        let cols = SamColumns::parse(&l).unwrap();
        let algn = parse_primary(&cols, 10).unwrap();
        assert!(!algn.is_unique);
        assert_eq!(algn.chrom, "!");
    }

    #[test]
    fn sa_tag_marks_non_linear() {
        let l = line(0, "chr1", 100, 60, "30M20S", "\tSA:Z:chr2,500,-,20M30S,60,0");
        let cols = SamColumns::parse(&l).unwrap();
        let algn = parse_primary(&cols, 10).unwrap();
        assert_eq!(algn.is_linear, Some(false));
        let supp = parse_supplementary(&cols, 10).unwrap();
        assert_eq!(supp.len(), 1);
        assert_eq!(supp[0].chrom, "chr2");
        assert_eq!(supp[0].strand, Strand::Minus);
        // chr2:500/- + ref span (20M -> 20) = 520
        assert_eq!(supp[0].pos, 520);
    }

    #[test]
    fn too_few_columns_is_malformed() {
        let err = SamColumns::parse("r1\t0\tchr1");
        assert!(matches!(err, Err(CoreError::MalformedRecord { .. })));
    }

    #[test]
    fn bad_sa_arity_is_malformed() {
        let l = line(0, "chr1", 100, 60, "30M20S", "\tSA:Z:chr2,500,-,20M30S");
        let cols = SamColumns::parse(&l).unwrap();
        let err = parse_supplementary(&cols, 10);
        assert!(matches!(err, Err(CoreError::MalformedSupplementary { .. })));
    }
}
