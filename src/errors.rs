//! The error kinds produced while classifying a stream of SAM records into pairsam records.

use thiserror::Error;

/// Errors surfaced by the core classifier.
///
/// Per-record parse errors are fatal: the design assumes aligner output is
/// well-formed, and a single malformed record indicates pipeline corruption
/// upstream rather than something worth trying to recover from.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Fewer than 11 tab-separated columns, a non-integer flag/mapq, or an
    /// unparsable CIGAR operator.
    #[error("malformed SAM record for read `{query_name}` at column {column}: {reason}")]
    MalformedRecord {
        query_name: String,
        column: usize,
        reason: String,
    },

    /// A `SA:Z:` optional field with the wrong comma-split arity or a
    /// non-integer mapq.
    #[error("malformed SA:Z: field for read `{query_name}`: {reason}")]
    MalformedSupplementary { query_name: String, reason: String },

    /// A dispatched group is missing one of the two mates. The grouper never
    /// dispatches an empty group, but it has no way to verify both mates are
    /// present; the caller surfaces it here.
    #[error("read `{query_name}` is missing one mate of the pair")]
    EmptyGroup { query_name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
