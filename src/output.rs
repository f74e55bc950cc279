//! Rendering the permutation back into original lines, and writing them

use crate::error::{SortContext, SortError, SortResult};
use crate::line_store::LineStore;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Original lines in permutation order. Keys are never rendered.
pub fn render<'a>(store: &'a LineStore, permutation: &[usize]) -> Vec<&'a [u8]> {
    permutation.iter().map(|&i| &store[i]).collect()
}

/// Write each record followed by `terminator`
pub fn write_records<W: Write>(sink: &mut W, records: &[&[u8]], terminator: u8) -> io::Result<()> {
    for record in records {
        sink.write_all(record)?;
        sink.write_all(&[terminator])?;
    }
    sink.flush()
}

/// Write records to standard output
pub fn write_stdout(records: &[&[u8]], terminator: u8) -> SortResult<()> {
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    match write_records(&mut output, records, terminator) {
        // a closed pipe downstream is not our failure
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.with_context(|| "write failed: standard output".to_string()),
    }
}

/// Write records to `path` through a temporary file in the same directory,
/// renamed into place once complete. `path` may be one of the inputs.
pub fn write_file(path: &Path, records: &[&[u8]], terminator: u8) -> SortResult<()> {
    let name = path.display().to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| SortError::output_failed(&name, &e.to_string()))?;
    let mut output = BufWriter::new(temp);
    write_records(&mut output, records, terminator)
        .map_err(|e| SortError::output_failed(&name, &e.to_string()))?;

    let temp = output
        .into_inner()
        .map_err(|e| SortError::output_failed(&name, &e.error().to_string()))?;
    let file: File = temp
        .persist(path)
        .map_err(|e| SortError::output_failed(&name, &e.error.to_string()))?;
    drop(file);

    debug!(output = %name, records = records.len(), "wrote output file");
    Ok(())
}
