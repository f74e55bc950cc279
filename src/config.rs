//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use std::str::FromStr;

/// Main configuration structure for sort operations
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Primary sort mode
    pub mode: SortMode,
    /// Sort order (normal or reverse)
    pub reverse: bool,
    /// Output only the first line of each run of equal keys
    pub unique: bool,
    /// Disable the last-resort comparison on the original line
    pub stable: bool,
    /// Check if input is already sorted
    pub check: bool,
    /// Use zero bytes as line terminators instead of newlines
    pub zero_terminated: bool,
    /// Fold lower case to upper case
    pub ignore_case: bool,
    /// Consider only blanks and alphanumeric characters
    pub dictionary_order: bool,
    /// Ignore leading blanks
    pub ignore_leading_blanks: bool,
    /// Ignore non-printing characters
    pub ignore_nonprinting: bool,
    /// Output file path
    pub output_file: Option<String>,
    /// Number of threads used to read named inputs
    pub parallel_threads: Option<usize>,
    /// Files to read from (if not specified, use stdin)
    pub input_files: Vec<String>,
    /// Debug mode (raises log verbosity)
    pub debug: bool,
}

/// Sort mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Byte-wise ordinal comparison of keys
    Lexicographic,
    /// Leading-number comparison with the literal "0" quirk
    Numeric,
}

/// The text transforms applied to a line to derive its key.
///
/// Each option is independent; [`crate::normalize::Normalizer`] applies the
/// enabled ones in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationConfig {
    pub strip_leading_blanks: bool,
    pub dictionary_order: bool,
    pub fold_case: bool,
    pub strip_nonprinting: bool,
}

impl NormalizationConfig {
    /// True when no transform is enabled and keys equal their lines
    pub fn is_identity(&self) -> bool {
        !(self.strip_leading_blanks
            || self.dictionary_order
            || self.fold_case
            || self.strip_nonprinting)
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::Lexicographic,
            reverse: false,
            unique: false,
            stable: false,
            check: false,
            zero_terminated: false,
            ignore_case: false,
            dictionary_order: false,
            ignore_leading_blanks: false,
            ignore_nonprinting: false,
            output_file: None,
            parallel_threads: None,
            input_files: Vec::new(),
            debug: false,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sort mode
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable reverse sorting
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enable unique output
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Enable stable sorting
    pub fn with_stable(mut self, stable: bool) -> Self {
        self.stable = stable;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Enable zero-terminated lines
    pub fn with_zero_terminated(mut self, zero_terminated: bool) -> Self {
        self.zero_terminated = zero_terminated;
        self
    }

    /// Replace all four normalization switches at once
    pub fn with_normalization(mut self, normalization: NormalizationConfig) -> Self {
        self.ignore_leading_blanks = normalization.strip_leading_blanks;
        self.dictionary_order = normalization.dictionary_order;
        self.ignore_case = normalization.fold_case;
        self.ignore_nonprinting = normalization.strip_nonprinting;
        self
    }

    /// Set output file
    pub fn with_output_file(mut self, output_file: Option<String>) -> Self {
        self.output_file = output_file;
        self
    }

    /// Set parallel threads
    pub fn with_parallel_threads(mut self, threads: Option<usize>) -> Self {
        self.parallel_threads = threads;
        self
    }

    /// Set input files
    pub fn with_input_files(mut self, files: Vec<String>) -> Self {
        self.input_files = files;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.check && self.output_file.is_some() {
            return Err(SortError::conflicting_options(
                "--check is incompatible with --output",
            ));
        }

        if let Some(threads) = self.parallel_threads {
            if threads == 0 {
                return Err(SortError::thread_pool_error(
                    "thread count must be positive",
                ));
            }
            if threads > 1024 {
                return Err(SortError::thread_pool_error(
                    "too many threads (maximum 1024)",
                ));
            }
        }

        Ok(())
    }

    /// The normalization switches as one value
    pub fn normalization(&self) -> NormalizationConfig {
        NormalizationConfig {
            strip_leading_blanks: self.ignore_leading_blanks,
            dictionary_order: self.dictionary_order,
            fold_case: self.ignore_case,
            strip_nonprinting: self.ignore_nonprinting,
        }
    }

    /// Check if reading from stdin
    pub fn reading_from_stdin(&self) -> bool {
        self.input_files.is_empty() || (self.input_files.len() == 1 && self.input_files[0] == "-")
    }

    /// Check if writing to stdout
    pub fn writing_to_stdout(&self) -> bool {
        self.output_file.is_none()
    }

    /// Byte that ends each input and output record
    pub fn record_terminator(&self) -> u8 {
        if self.zero_terminated {
            b'\0'
        } else {
            b'\n'
        }
    }

    /// Get effective thread count
    pub fn effective_thread_count(&self) -> usize {
        self.parallel_threads.unwrap_or_else(num_cpus::get)
    }
}

impl FromStr for SortMode {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicographic" | "text" | "default" => Ok(SortMode::Lexicographic),
            "numeric" | "n" => Ok(SortMode::Numeric),
            _ => Err(SortError::parse_error(&format!("unknown sort mode: {s}"))),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortMode::Lexicographic => "lexicographic",
            SortMode::Numeric => "numeric",
        };
        write!(f, "{name}")
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    /// Set sort mode
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Enable reverse sorting
    pub fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    /// Enable unique output
    pub fn unique(mut self) -> Self {
        self.config.unique = true;
        self
    }

    /// Enable stable sorting
    pub fn stable(mut self) -> Self {
        self.config.stable = true;
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    /// Enable zero-terminated lines
    pub fn zero_terminated(mut self) -> Self {
        self.config.zero_terminated = true;
        self
    }

    pub fn ignore_leading_blanks(mut self) -> Self {
        self.config.ignore_leading_blanks = true;
        self
    }

    pub fn dictionary_order(mut self) -> Self {
        self.config.dictionary_order = true;
        self
    }

    pub fn ignore_case(mut self) -> Self {
        self.config.ignore_case = true;
        self
    }

    pub fn ignore_nonprinting(mut self) -> Self {
        self.config.ignore_nonprinting = true;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    /// Set the reader pool size
    pub fn parallel_threads(mut self, threads: usize) -> Self {
        self.config.parallel_threads = Some(threads);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
