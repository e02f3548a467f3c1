//! Pair serializer: emits the `\v`-delimited pairsam record.

use crate::classify::Classification;
use crate::config::Config;
use crate::model::AlignmentDescriptor;
use std::io::Write;

const FIELD_SEP: char = '\u{000B}'; // \v

fn sam_block(lines: &[String], pair_type: &str, sep: u8, drop_sam: bool) -> String {
    if drop_sam {
        return ".".to_string();
    }
    let sep = sep as char;
    lines
        .iter()
        .map(|l| {
            let trimmed = l.trim_end_matches(['\n', '\r']);
            format!("{}\tYT:Z:{}", trimmed, pair_type)
        })
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}

/// Write one classified group as a single pairsam record.
pub fn write_pairsam(
    writer: &mut dyn Write,
    read_id: &str,
    classification: &Classification,
    sams1: &[String],
    sams2: &[String],
    config: &Config,
) -> std::io::Result<()> {
    let pair_type = classification.pair_type.as_str();
    let (algn1, algn2): (&AlignmentDescriptor, &AlignmentDescriptor) = (&classification.algn1, &classification.algn2);

    let (chrom1, chrom2, pos1, pos2, strand1, strand2, block1, block2) = if classification.flip_pair {
        (
            &algn2.chrom,
            &algn1.chrom,
            algn2.pos,
            algn1.pos,
            algn2.strand,
            algn1.strand,
            sam_block(sams2, pair_type, config.sam_entry_sep, config.drop_sam),
            sam_block(sams1, pair_type, config.sam_entry_sep, config.drop_sam),
        )
    } else {
        (
            &algn1.chrom,
            &algn2.chrom,
            algn1.pos,
            algn2.pos,
            algn1.strand,
            algn2.strand,
            sam_block(sams1, pair_type, config.sam_entry_sep, config.drop_sam),
            sam_block(sams2, pair_type, config.sam_entry_sep, config.drop_sam),
        )
    };

    let read_id = if config.drop_readid { "." } else { read_id };

    write!(
        writer,
        "{rid}{s}{c1}{s}{c2}{s}{p1}{s}{p2}{s}{st1}{s}{st2}{s}{pt}{s}{b1}{s}{b2}{s}\n",
        rid = read_id,
        c1 = chrom1,
        c2 = chrom2,
        p1 = pos1,
        p2 = pos2,
        st1 = strand1,
        st2 = strand2,
        pt = pair_type,
        b1 = block1,
        b2 = block2,
        s = FIELD_SEP,
    )
}
