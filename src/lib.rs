//! Line-oriented text sorter
//!
//! Lines are read once into an append-only [`LineStore`], a comparison key
//! is derived for each one by the [`Normalizer`], and the [`SortEngine`]
//! orders indices over the `(key, line)` pairs. Output always renders the
//! original lines; keys never leave the sort.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

pub mod line_store;
pub mod input;
pub mod normalize;
pub mod numeric;
pub mod compare;
pub mod engine;
pub mod output;

// Re-export commonly used types
pub use compare::{Comparator, Entry};
pub use config::{NormalizationConfig, SortConfig, SortMode};
pub use engine::{Permutation, SortEngine};
pub use error::{SortError, SortResult};
pub use line_store::{Line, LineStore};
pub use normalize::{Key, Normalizer};

use std::path::Path;
use tracing::{debug, info};

/// Exit codes matching GNU sort
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Sort an in-memory store and return the original lines in output order
pub fn sort_lines<'a>(store: &'a LineStore, config: &SortConfig) -> Vec<&'a [u8]> {
    let permutation = engine::sort_store(store, config);
    output::render(store, &permutation)
}

/// Main sort function that processes input according to configuration.
///
/// Reads `config.input_files` (stdin when empty), then either checks the
/// order (`config.check`) or writes the sorted lines to stdout or
/// `config.output_file`.
pub fn sort(config: &SortConfig) -> SortResult<i32> {
    config.validate()?;
    if config.check && config.input_files.len() > 1 {
        return Err(SortError::conflicting_options(&format!(
            "extra operand '{}' not allowed with --check",
            config.input_files[1]
        )));
    }

    let sources = input::sources_from_args(&config.input_files);
    let terminator = config.record_terminator();
    debug!(
        sources = sources.len(),
        stdin = config.reading_from_stdin(),
        threads = config.effective_thread_count(),
        "reading input"
    );
    let store = input::read_sources(&sources, terminator, config.effective_thread_count())?;
    info!(lines = store.len(), bytes = store.byte_len(), "input loaded");

    if config.check {
        return match engine::check_store(&store, config) {
            None => Ok(EXIT_SUCCESS),
            Some(position) => Err(SortError::disorder(
                &sources[0].name(),
                position + 1,
                &store[position],
            )),
        };
    }

    let records = sort_lines(&store, config);

    if config.writing_to_stdout() {
        output::write_stdout(&records, terminator)?;
    } else if let Some(path) = &config.output_file {
        output::write_file(Path::new(path), &records, terminator)?;
    }

    debug!(records = records.len(), "output written");
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortConfigBuilder;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn run_to_file(input: &str, config: SortConfig) -> SortResult<String> {
        let temp_dir = TempDir::new()?;
        let input_file = temp_dir.path().join("input.txt");
        let output_file = temp_dir.path().join("output.txt");
        fs::write(&input_file, input)?;

        let config = config
            .with_input_files(vec![input_file.to_string_lossy().to_string()])
            .with_output_file(Some(output_file.to_string_lossy().to_string()));
        assert_eq!(sort(&config)?, EXIT_SUCCESS);

        Ok(fs::read_to_string(&output_file)?)
    }

    #[test]
    fn test_sort_basic() -> SortResult<()> {
        let output = run_to_file("zebra\napple\nbanana\ncherry\n", SortConfig::default())?;
        assert_eq!(output, "apple\nbanana\ncherry\nzebra\n");
        Ok(())
    }

    #[test]
    fn test_numeric_sort() -> SortResult<()> {
        let config = SortConfig::default().with_mode(SortMode::Numeric);
        let output = run_to_file("0\n0\n5\napple\n2.5", config)?;
        assert_eq!(output, "2.5\n5\napple\n0\n0\n");
        Ok(())
    }

    #[test]
    fn test_numeric_reverse_sort() -> SortResult<()> {
        let config = SortConfig::default()
            .with_mode(SortMode::Numeric)
            .with_reverse(true);
        let output = run_to_file("0\n0\n5\napple\n2.5\n", config)?;
        assert_eq!(output, "5\n2.5\napple\n0\n0\n");
        Ok(())
    }

    #[test]
    fn test_output_keeps_original_bytes() -> SortResult<()> {
        let config = SortConfigBuilder::new()
            .ignore_leading_blanks()
            .dictionary_order()
            .ignore_case()
            .build()?;
        let output = run_to_file("  c.d\nB!\n   a-z\n", config)?;
        assert_eq!(output, "   a-z\nB!\n  c.d\n");
        Ok(())
    }

    #[test]
    fn test_empty_input_produces_empty_output() -> SortResult<()> {
        let output = run_to_file("", SortConfig::default())?;
        assert_eq!(output, "");
        Ok(())
    }

    #[test]
    fn test_zero_terminated() -> SortResult<()> {
        let config = SortConfig::default().with_zero_terminated(true);
        let output = run_to_file("b\nx\0a\0", config)?;
        assert_eq!(output, "a\0b\nx\0");
        Ok(())
    }

    #[test]
    fn test_multiple_files_and_output_over_input() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let first = temp_dir.path().join("first.txt");
        let second = temp_dir.path().join("second.txt");
        fs::write(&first, "pear\nfig\n")?;
        fs::write(&second, "apple\n")?;

        let config = SortConfig::default()
            .with_input_files(vec![
                first.to_string_lossy().to_string(),
                second.to_string_lossy().to_string(),
            ])
            .with_output_file(Some(first.to_string_lossy().to_string()))
            .with_parallel_threads(Some(2));
        sort(&config)?;

        assert_eq!(fs::read_to_string(&first)?, "apple\nfig\npear\n");
        Ok(())
    }

    #[test]
    fn test_missing_file_aborts_without_output() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let present = temp_dir.path().join("present.txt");
        let output_file = temp_dir.path().join("output.txt");
        fs::write(&present, "a\n")?;

        let config = SortConfig::default()
            .with_input_files(vec![
                present.to_string_lossy().to_string(),
                temp_dir.path().join("absent.txt").to_string_lossy().to_string(),
            ])
            .with_output_file(Some(output_file.to_string_lossy().to_string()));
        let err = sort(&config).unwrap_err();

        assert!(err.is_source_error());
        assert_eq!(err.exit_code(), SORT_FAILURE);
        assert!(!output_file.exists());
        Ok(())
    }

    #[test]
    fn test_check_mode() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let sorted_file = temp_dir.path().join("sorted.txt");
        let unsorted_file = temp_dir.path().join("unsorted.txt");
        fs::write(&sorted_file, "a\nb\nc\n")?;
        fs::write(&unsorted_file, "a\nc\nb\n")?;

        let config = SortConfig::default()
            .with_check(true)
            .with_input_files(vec![sorted_file.to_string_lossy().to_string()]);
        assert_eq!(sort(&config)?, EXIT_SUCCESS);

        let name = unsorted_file.to_string_lossy().to_string();
        let config = SortConfig::default()
            .with_check(true)
            .with_input_files(vec![name.clone()]);
        let err = sort(&config).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert_eq!(err.to_string(), format!("{name}:3: disorder: b"));
        Ok(())
    }

    #[test]
    fn test_check_rejects_extra_operands() {
        let config = SortConfig::default()
            .with_check(true)
            .with_input_files(vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(
            sort(&config),
            Err(SortError::ConflictingOptions { .. })
        ));
    }

    fn config_strategy() -> impl Strategy<Value = SortConfig> {
        any::<[bool; 7]>().prop_map(|f| {
            SortConfig::default()
                .with_mode(if f[0] {
                    SortMode::Numeric
                } else {
                    SortMode::Lexicographic
                })
                .with_reverse(f[1])
                .with_normalization(NormalizationConfig {
                    strip_leading_blanks: f[2],
                    dictionary_order: f[3],
                    fold_case: f[4],
                    strip_nonprinting: f[5],
                })
                .with_stable(f[6])
        })
    }

    fn lines_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
        prop::collection::vec(
            prop_oneof![
                Just(b"0".to_vec()),
                "[ a-cA-C0-9.+-]{0,6}".prop_map(String::into_bytes),
                prop::collection::vec(any::<u8>(), 0..6),
            ],
            0..24,
        )
    }

    fn sorted_multiset(mut lines: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
        lines.sort();
        lines
    }

    proptest! {
        #[test]
        fn prop_output_is_permutation_of_input(lines in lines_strategy(), config in config_strategy()) {
            let store: LineStore = lines.iter().cloned().collect();
            let before = store.clone();
            let output: Vec<Vec<u8>> = sort_lines(&store, &config).into_iter().map(<[u8]>::to_vec).collect();

            prop_assert_eq!(&store, &before);
            prop_assert_eq!(sorted_multiset(output), sorted_multiset(lines));
        }

        #[test]
        fn prop_sorting_is_idempotent(lines in lines_strategy(), config in config_strategy()) {
            let store: LineStore = lines.into_iter().collect();
            let once: LineStore = sort_lines(&store, &config).into_iter().map(<[u8]>::to_vec).collect();
            let twice: Vec<&[u8]> = sort_lines(&once, &config);
            let once_refs: Vec<&[u8]> = once.all().iter().map(Vec::as_slice).collect();

            prop_assert_eq!(twice, once_refs);
        }

        #[test]
        fn prop_lexicographic_reverse_is_mirror(lines in lines_strategy(), config in config_strategy()) {
            let forward = config
                .with_mode(SortMode::Lexicographic)
                .with_reverse(false)
                .with_stable(false);
            let backward = forward.clone().with_reverse(true);
            let store: LineStore = lines.into_iter().collect();

            let mut mirrored = sort_lines(&store, &backward);
            mirrored.reverse();
            prop_assert_eq!(sort_lines(&store, &forward), mirrored);
        }
    }
}
