//! Input acquisition: turns named sources or stdin into a [`LineStore`]

use crate::error::{SortContext, SortError, SortResult};
use crate::line_store::LineStore;
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Where a batch of records comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Interpret a command-line operand; `-` names standard input
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Name used in diagnostics
    pub fn name(&self) -> String {
        match self {
            Source::Stdin => "-".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

/// Sources for a list of operands, stdin alone when the list is empty
pub fn sources_from_args(files: &[String]) -> Vec<Source> {
    if files.is_empty() {
        vec![Source::Stdin]
    } else {
        files.iter().map(|f| Source::from_arg(f)).collect()
    }
}

/// Split a buffer into records on `terminator`.
///
/// A final record without a terminator is kept; a trailing terminator does
/// not produce an extra empty record.
pub fn split_records(data: &[u8], terminator: u8) -> LineStore {
    let records = data.iter().filter(|&&b| b == terminator).count() + 1;
    let mut store = LineStore::with_capacity(records);
    let mut start = 0;

    for (i, &byte) in data.iter().enumerate() {
        if byte == terminator {
            store.append(data[start..i].to_vec());
            start = i + 1;
        }
    }

    if start < data.len() {
        store.append(data[start..].to_vec());
    }

    store
}

/// Read every record from `reader`
pub fn read_records<R: Read>(mut reader: R, terminator: u8) -> io::Result<LineStore> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(split_records(&buffer, terminator))
}

/// Read standard input, or anything standing in for it
pub fn read_stdin<R: Read>(stdin: R, terminator: u8) -> SortResult<LineStore> {
    let store = read_records(stdin, terminator).with_file_context("-")?;
    debug!(source = "-", lines = store.len(), bytes = store.byte_len(), "read source");
    Ok(store)
}

/// Read one source completely
pub fn read_source(source: &Source, terminator: u8) -> SortResult<LineStore> {
    let path = match source {
        Source::Stdin => return read_stdin(io::stdin().lock(), terminator),
        Source::File(path) => path,
    };

    let name = source.name();
    let metadata = fs::metadata(path).with_file_context(&name)?;
    if metadata.is_dir() {
        return Err(SortError::is_directory(&name));
    }

    let file = File::open(path).with_file_context(&name)?;
    let store = if metadata.is_file() && metadata.len() > 0 {
        // SAFETY: the map is read-only and dropped before this function
        // returns; every record is copied out of it first.
        let mmap = unsafe { Mmap::map(&file) }.with_file_context(&name)?;
        split_records(&mmap, terminator)
    } else {
        // empty files, FIFOs and character devices cannot be mapped
        read_records(file, terminator).with_file_context(&name)?
    };

    debug!(
        source = %name,
        lines = store.len(),
        bytes = store.byte_len(),
        "read source"
    );
    Ok(store)
}

/// Read all sources and concatenate them in source order.
///
/// Named files are read on a rayon pool of `threads` workers. Stdin is read
/// on the calling thread, once, at its first position. The first failing
/// source in argument order aborts the whole read and nothing is returned.
pub fn read_sources(sources: &[Source], terminator: u8, threads: usize) -> SortResult<LineStore> {
    read_sources_with_stdin(sources, terminator, threads, io::stdin().lock())
}

/// [`read_sources`] with `stdin` standing in for standard input
pub fn read_sources_with_stdin<R: Read>(
    sources: &[Source],
    terminator: u8,
    threads: usize,
    stdin: R,
) -> SortResult<LineStore> {
    if let [source] = sources {
        return match source {
            Source::Stdin => read_stdin(stdin, terminator),
            Source::File(_) => read_source(source, terminator),
        };
    }
    if sources.is_empty() {
        return Ok(LineStore::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| SortError::thread_pool_error(&e.to_string()))?;

    let files: Vec<Option<SortResult<LineStore>>> = pool.install(|| {
        sources
            .par_iter()
            .map(|source| match source {
                Source::Stdin => None,
                Source::File(_) => Some(read_source(source, terminator)),
            })
            .collect()
    });

    let mut stdin = Some(stdin);
    let mut store = LineStore::new();
    for (source, result) in sources.iter().zip(files) {
        let batch = match result {
            Some(result) => result?,
            None => match stdin.take() {
                Some(reader) => read_stdin(reader, terminator)?,
                // `-` named again: already drained
                None => LineStore::new(),
            },
        };
        trace!(source = %source.name(), lines = batch.len(), "committing source");
        store.extend(batch);
    }

    Ok(store)
}
