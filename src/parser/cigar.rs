//! CIGAR parsing into reference-span and clip summaries.

use crate::model::CigarInfo;
use nom::character::is_digit;
use nom::error::Error;
use nom::multi::fold_many0;
use nom::IResult;
use nom::{bytes::complete::take_while, AsChar};

/// A single run-length CIGAR unit, e.g. `30M`.
struct CigarUnit {
    op: char,
    len: u64,
}

/// Parse a single CIGAR unit, failing on an empty input to break the
/// `fold_many0` loop at end of string.
fn parse_cigar_unit(input: &[u8]) -> IResult<&[u8], CigarUnit> {
    if input.is_empty() {
        return Err(nom::Err::Error(Error::new(
            input,
            nom::error::ErrorKind::Eof,
        )));
    }

    let (input, len) = take_while(is_digit)(input)?;
    let (input, op) = take_while(|b: u8| !is_digit(b))(input)?;

    let len_str = std::str::from_utf8(len)
        .map_err(|_| nom::Err::Failure(Error::new(input, nom::error::ErrorKind::Digit)))?;
    let len = len_str
        .parse::<u64>()
        .map_err(|_| nom::Err::Failure(Error::new(input, nom::error::ErrorKind::Digit)))?;
    let op = op
        .first()
        .map(|b| b.as_char())
        .ok_or_else(|| nom::Err::Failure(Error::new(input, nom::error::ErrorKind::Char)))?;

    Ok((input, CigarUnit { op, len }))
}

/// Parse a CIGAR string into the span/clip summary the classifier needs.
/// A CIGAR of `*` yields all zeros. Unrecognized operators are consumed
/// (length reset) without contributing to any span.
pub fn parse_cigar(cigar: &str) -> Result<CigarInfo, String> {
    if cigar == "*" {
        return Ok(CigarInfo::default());
    }

    let mut info = CigarInfo::default();
    let (rest, ()) = fold_many0(
        parse_cigar_unit,
        || (),
        |(), unit| apply_cigar_unit(&mut info, unit),
    )(cigar.as_bytes())
    .map_err(|e| format!("invalid CIGAR `{}`: {:?}", cigar, e))?;

    if !rest.is_empty() {
        return Err(format!("trailing garbage in CIGAR `{}`", cigar));
    }

    Ok(info)
}

fn apply_cigar_unit(info: &mut CigarInfo, unit: CigarUnit) {
    match unit.op {
        'M' => {
            info.matched_bp += unit.len;
            info.algn_ref_span += unit.len;
            info.algn_read_span += unit.len;
            info.read_len += unit.len;
        }
        'I' => {
            info.algn_read_span += unit.len;
            info.read_len += unit.len;
        }
        'D' => {
            info.algn_ref_span += unit.len;
        }
        'S' | 'H' => {
            info.read_len += unit.len;
            if info.matched_bp == 0 {
                info.clip5 = unit.len;
            } else {
                info.clip3 = unit.len;
            }
        }
        _ => {} // operator consumed, length reset; no span contribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_is_all_zeros() {
        let info = parse_cigar("*").unwrap();
        assert_eq!(info, CigarInfo::default());
    }

    #[test]
    fn plain_match() {
        let info = parse_cigar("50M").unwrap();
        assert_eq!(info.matched_bp, 50);
        assert_eq!(info.algn_ref_span, 50);
        assert_eq!(info.algn_read_span, 50);
        assert_eq!(info.read_len, 50);
        assert_eq!(info.clip5, 0);
        assert_eq!(info.clip3, 0);
    }

    #[test]
    fn clips_before_and_after_match_are_5p_and_3p() {
        let info = parse_cigar("20S30M10S").unwrap();
        assert_eq!(info.clip5, 20);
        assert_eq!(info.clip3, 10);
        assert_eq!(info.matched_bp, 30);
        assert_eq!(info.read_len, 60);
    }

    #[test]
    fn insertions_and_deletions_only_move_their_own_span() {
        let info = parse_cigar("10M5I10M5D10M").unwrap();
        assert_eq!(info.matched_bp, 30);
        assert_eq!(info.algn_read_span, 35);
        assert_eq!(info.algn_ref_span, 35);
        assert_eq!(info.read_len, 35);
    }

    #[test]
    fn rejects_malformed_cigar() {
        assert!(parse_cigar("30").is_err());
    }

    #[test]
    fn sequence_match_and_mismatch_operators_are_not_fatal() {
        let info = parse_cigar("20=5X25=").unwrap();
        assert_eq!(info.matched_bp, 0);
        assert_eq!(info.algn_ref_span, 0);
        assert_eq!(info.algn_read_span, 0);
        assert_eq!(info.read_len, 0);
    }

    #[test]
    fn n_and_p_are_also_ignored() {
        let info = parse_cigar("10M100N10M5P10M").unwrap();
        assert_eq!(info.matched_bp, 30);
        assert_eq!(info.algn_ref_span, 30);
    }
}
