//! Record grouper: batches consecutive body lines by query name and splits
//! each mate's lines into representative-first order.

use crate::errors::CoreError;
use crate::parser::SamColumns;
use std::io::BufRead;

/// Two ordered sequences of SAM lines for the two mates of one query name.
/// Within each, the representative (non-supplementary) record is always
/// at index 0.
#[derive(Debug, Default, Clone)]
pub struct ReadGroup {
    pub query_name: String,
    pub sams1: Vec<String>,
    pub sams2: Vec<String>,
}

/// Push one SAM line into the group it belongs to. `0x40` (first-in-template)
/// selects `sams1` vs `sams2`; within a mate, a non-supplementary record
/// (`0x800` clear) is inserted at the front, a supplementary one is
/// appended, guaranteeing the representative lands at index 0 regardless
/// of input order within the group.
pub fn push_sam(line: String, group: &mut ReadGroup) -> Result<(), CoreError> {
    let cols = SamColumns::parse(&line)?;
    let first_in_template = cols.is_first_in_template()?;
    let supplementary = cols.is_supplementary()?;

    let target = if first_in_template {
        &mut group.sams1
    } else {
        &mut group.sams2
    };
    if supplementary {
        target.push(line);
    } else {
        target.insert(0, line);
    }
    Ok(())
}

/// Iterates a name-sorted SAM body stream, yielding one `ReadGroup` per
/// distinct, consecutive query name. Assumes the input is already grouped
/// by query name; out-of-order input is not detected and will fragment
/// groups.
pub struct Grouper<R> {
    reader: R,
    pending_line: Option<String>,
    done: bool,
}

impl<R: BufRead> Grouper<R> {
    /// `first_line` is the line already consumed while splitting the
    /// header; it is the first line of the body and must be fed back in
    /// before reading any more from `reader`.
    pub fn new(reader: R, first_line: Option<String>) -> Self {
        Grouper {
            reader,
            pending_line: first_line,
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, CoreError> {
        let mut buf = String::new();
        let n = self.reader.read_line(&mut buf)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(buf))
        }
    }

    /// Pull the next group, or `None` once the stream is exhausted. Never
    /// returns an empty group.
    pub fn next_group(&mut self) -> Result<Option<ReadGroup>, CoreError> {
        if self.done {
            return Ok(None);
        }

        let mut group = ReadGroup::default();
        let mut query_name: Option<String> = None;

        loop {
            let line = match self.pending_line.take() {
                Some(l) => Some(l),
                None => self.read_line()?,
            };
            let Some(line) = line else {
                self.done = true;
                break;
            };

            let this_name = line.split('\t').next().unwrap_or("").to_string();
            match &query_name {
                None => {
                    query_name = Some(this_name);
                    push_sam(line, &mut group)?;
                }
                Some(qn) if *qn == this_name => {
                    push_sam(line, &mut group)?;
                }
                Some(_) => {
                    self.pending_line = Some(line);
                    break;
                }
            }
        }

        match query_name {
            None => Ok(None),
            Some(name) => {
                group.query_name = name;
                Ok(Some(group))
            }
        }
    }
}
