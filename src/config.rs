//! Tunables recognized by the classifier.

/// Runtime configuration for the classifier. Built once by the CLI and
/// threaded through as an explicit argument; the library never reads
/// environment variables or config files itself.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum MAPQ for an alignment to be considered unique.
    pub min_mapq: u8,
    /// Ceiling on the inferred Hi-C molecule size during chimera rescue.
    pub max_molecule_size: u64,
    /// Replace `read_id` with `.` in the emitted record.
    pub drop_readid: bool,
    /// Replace both SAM blocks with `.` in the emitted record.
    pub drop_sam: bool,
    /// Extra single-character prefix before `@` on header/comment lines.
    /// Empty string means "no extra prefix".
    pub comment_char: String,
    /// Byte used to join SAM lines within a single pairsam field. Must
    /// differ from both `\t` and `\v`; shared as a format contract with
    /// downstream consumers and not meant to vary per invocation in
    /// practice, but kept configurable for tests.
    pub sam_entry_sep: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_mapq: 10,
            max_molecule_size: 2000,
            drop_readid: false,
            drop_sam: false,
            comment_char: String::new(),
            sam_entry_sep: 0x1f,
        }
    }
}
