//! Stream plumbing shared by the CLI: stdin/file input, stdout/file output.

use log::{error, warn};
use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, BufWriter, Stdin, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 32 * 1024;

/// rational stdin reader: if stdin is not connected to a pipe/file, bail
/// rather than block forever waiting on a terminal.
pub fn stdin_reader() -> Stdin {
    if atty::is(atty::Stream::Stdin) {
        error!("no input content detected");
        std::process::exit(1);
    } else {
        stdin()
    }
}

/// Get a buffered reader from a file path, or from stdin when `input` is
/// `None` or `"-"`.
pub fn get_input_reader(input: &Option<String>) -> std::io::Result<Box<dyn BufRead + Send>> {
    let reader: Box<dyn BufRead + Send> = match input {
        Some(path) if path != "-" => {
            Box::new(BufReader::with_capacity(BUFFER_SIZE, File::open(path)?))
        }
        _ => Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin_reader())),
    };
    Ok(reader)
}

/// Get a buffered writer to a file path, or to stdout when `output` is `"-"`,
/// honoring an explicit rewrite flag: refuses (and warns) instead of
/// silently clobbering an existing file unless `rewrite` is set.
pub fn output_writer_checked(outputpath: &str, rewrite: bool) -> std::io::Result<Box<dyn Write>> {
    if outputpath == "-" {
        return Ok(Box::new(stdout()));
    }
    outfile_exist(outputpath, rewrite);
    Ok(Box::new(BufWriter::new(File::create(outputpath)?)))
}

/// check if output file exists and if rewrite is allowed
fn outfile_exist(output_file: &str, rewrite: bool) {
    if output_file != "-" {
        let path = Path::new(output_file);
        if path.exists() {
            if rewrite {
                warn!("file {} exist, will rewrite it", output_file);
            } else {
                error!("file {} exist, use -r to rewrite it", output_file);
                std::process::exit(1);
            }
        }
    }
}

/// Reconstruct the invoking command line, used for the injected `@PG` `CL` field.
pub fn command_line() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}
