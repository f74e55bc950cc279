//! Key derivation: the transformed view of a line that comparisons run on

use crate::config::NormalizationConfig;
use crate::line_store::LineStore;

/// Comparison key derived from a [`crate::line_store::Line`].
pub type Key = Vec<u8>;

/// Dictionary order keeps only these bytes
#[inline]
pub fn is_dictionary_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b' '
}

/// Printable ASCII, space through tilde
#[inline]
pub fn is_printable(b: u8) -> bool {
    (0x20..0x7f).contains(&b)
}

/// Derives keys from lines according to a fixed [`NormalizationConfig`].
///
/// Enabled steps run in this order:
/// 1. strip leading spaces (0x20 only, tabs survive)
/// 2. drop everything but ASCII alphanumerics and spaces
/// 3. fold ASCII lower case to upper case
/// 4. drop bytes outside 0x20..=0x7E
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizationConfig,
}

impl Normalizer {
    pub fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    /// Produce the key for one line. The line itself is only borrowed.
    pub fn derive_key(&self, line: &[u8]) -> Key {
        let config = &self.config;
        if config.is_identity() {
            return line.to_vec();
        }

        let start = if config.strip_leading_blanks {
            line.iter().position(|&b| b != b' ').unwrap_or(line.len())
        } else {
            0
        };

        line[start..]
            .iter()
            .copied()
            .filter(|&b| !config.dictionary_order || is_dictionary_byte(b))
            .map(|b| {
                if config.fold_case {
                    b.to_ascii_uppercase()
                } else {
                    b
                }
            })
            .filter(|&b| !config.strip_nonprinting || is_printable(b))
            .collect()
    }

    /// One key per stored line, index for index
    pub fn derive_keys(&self, store: &LineStore) -> Vec<Key> {
        store.all().iter().map(|line| self.derive_key(line)).collect()
    }
}

/// Free-function form of [`Normalizer::derive_key`]
pub fn derive_key(line: &[u8], config: &NormalizationConfig) -> Key {
    Normalizer::new(*config).derive_key(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(
        strip_leading_blanks: bool,
        dictionary_order: bool,
        fold_case: bool,
        strip_nonprinting: bool,
    ) -> NormalizationConfig {
        NormalizationConfig {
            strip_leading_blanks,
            dictionary_order,
            fold_case,
            strip_nonprinting,
        }
    }

    #[test]
    fn test_identity_when_nothing_enabled() {
        let config = NormalizationConfig::default();
        assert_eq!(derive_key(b"  Mixed\tCase.\x01", &config), b"  Mixed\tCase.\x01");
    }

    #[test]
    fn test_strip_leading_blanks_spaces_only() {
        let config = norm(true, false, false, false);
        assert_eq!(derive_key(b"   abc", &config), b"abc");
        assert_eq!(derive_key(b"\t abc", &config), b"\t abc");
        assert_eq!(derive_key(b"  a b ", &config), b"a b ");
        assert_eq!(derive_key(b"    ", &config), b"");
    }

    #[test]
    fn test_dictionary_order_removes_punctuation_without_gaps() {
        let config = norm(false, true, false, false);
        assert_eq!(derive_key(b"a.b c", &config), b"ab c");
        assert_eq!(derive_key(b"--x--", &config), b"x");
        assert_eq!(derive_key(b"tab\there", &config), b"tabhere");
        assert_eq!(derive_key("caf\u{e9}".as_bytes(), &config), b"caf");
    }

    #[test]
    fn test_fold_case_uppercases_ascii_only() {
        let config = norm(false, false, true, false);
        assert_eq!(derive_key(b"Banana", &config), derive_key(b"banana", &config));
        assert_eq!(derive_key(b"a1-z", &config), b"A1-Z");
        assert_eq!(derive_key("\u{e9}".as_bytes(), &config), "\u{e9}".as_bytes());
    }

    #[test]
    fn test_strip_nonprinting() {
        let config = norm(false, false, false, true);
        assert_eq!(derive_key(b"a\x07b\x7fc\td", &config), b"abcd");
        assert_eq!(derive_key(&[b'x', 0xc3, 0xa9, b'y'], &config), b"xy");
        assert_eq!(derive_key(b"~ !", &config), b"~ !");
    }

    #[test]
    fn test_steps_run_in_fixed_order() {
        // blanks are stripped before the dictionary filter would expose new ones
        let config = norm(true, true, false, false);
        assert_eq!(derive_key(b"  .  x", &config), b"  x");

        let config = norm(true, true, true, true);
        assert_eq!(derive_key(b"  He said: \"hi!\"\x01", &config), b"HE SAID HI");
    }

    #[test]
    fn test_derive_keys_is_index_aligned_and_pure() {
        let store: LineStore = vec![b" b".to_vec(), b"A".to_vec(), Vec::new()]
            .into_iter()
            .collect();
        let before = store.clone();
        let keys = Normalizer::new(norm(true, false, true, false)).derive_keys(&store);

        assert_eq!(keys, vec![b"B".to_vec(), b"A".to_vec(), Vec::new()]);
        assert_eq!(store, before);
    }
}
