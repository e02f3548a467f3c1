//! Top-level orchestration: wires the header handler, grouper, parser,
//! classifier and serializer into a single streaming pass, single-threaded,
//! synchronous, and input-order preserving.

use crate::classify::classify;
use crate::config::Config;
use crate::errors::CoreError;
use crate::group::Grouper;
use crate::header::{inject_program, read_header};
use crate::parser::{parse_primary, parse_supplementary, SamColumns};
use log::{debug, info};
use std::io::{BufRead, Write};

/// Run the classifier end to end: read `reader`'s SAM header and body,
/// classify every read group, and write the pairsam header and body to
/// `writer`.
pub fn run<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    config: &Config,
    program_id: &str,
    program_name: &str,
    program_version: &str,
    command_line: &str,
) -> Result<(), CoreError> {
    info!("reading SAM header");
    let split = read_header(&mut reader, &config.comment_char)?;
    let header_lines = inject_program(
        &split,
        &config.comment_char,
        program_id,
        program_name,
        program_version,
        command_line,
    );
    for line in &header_lines {
        writeln!(writer, "{}", line)?;
    }

    info!("classifying read groups");
    let mut grouper = Grouper::new(reader, split.first_body_line);
    let mut n_groups = 0u64;
    while let Some(group) = grouper.next_group()? {
        if group.sams1.is_empty() || group.sams2.is_empty() {
            return Err(CoreError::EmptyGroup {
                query_name: group.query_name,
            });
        }

        let cols1 = SamColumns::parse(&group.sams1[0])?;
        let cols2 = SamColumns::parse(&group.sams2[0])?;
        let algn1 = parse_primary(&cols1, config.min_mapq)?;
        let algn2 = parse_primary(&cols2, config.min_mapq)?;
        let supp1 = parse_supplementary(&cols1, config.min_mapq)?;
        let supp2 = parse_supplementary(&cols2, config.min_mapq)?;

        let classification = classify(algn1, algn2, &supp1, &supp2, config.max_molecule_size);
        debug!(
            "{}: sams1={} sams2={} pair_type={}",
            group.query_name,
            group.sams1.len(),
            group.sams2.len(),
            classification.pair_type
        );

        crate::pairsam::write_pairsam(
            writer,
            &group.query_name,
            &classification,
            &group.sams1,
            &group.sams2,
            config,
        )?;
        n_groups += 1;
    }
    info!("classified {} read groups", n_groups);
    Ok(())
}
