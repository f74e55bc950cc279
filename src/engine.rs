//! Sort engine: turns a line store and its keys into an output permutation

use crate::compare::{Comparator, Entry};
use crate::config::{SortConfig, SortMode};
use crate::line_store::LineStore;
use crate::normalize::{Key, Normalizer};
use crate::numeric::NumericClass;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Output order as indices into the line store
pub type Permutation = Vec<usize>;

/// Orders line indices according to a [`SortConfig`]
pub struct SortEngine<'c> {
    config: &'c SortConfig,
    comparator: Comparator,
}

impl<'c> SortEngine<'c> {
    pub fn new(config: &'c SortConfig) -> Self {
        Self {
            config,
            comparator: Comparator::new(config.mode),
        }
    }

    /// Pair every line with its key. `keys` must be index-aligned with `store`.
    pub fn entries<'a>(&self, store: &'a LineStore, keys: &'a [Key]) -> Vec<Entry<'a>> {
        debug_assert_eq!(store.len(), keys.len(), "one key per line");

        let numeric = self.config.mode == SortMode::Numeric;
        store
            .all()
            .iter()
            .zip(keys)
            .enumerate()
            .map(|(index, (line, key))| {
                if numeric {
                    Entry::classified(index, key, line)
                } else {
                    Entry::new(index, key, line)
                }
            })
            .collect()
    }

    /// Ascending order used for the sort itself
    #[inline]
    fn ascending(&self, a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
        if self.config.stable {
            self.comparator.compare(a, b)
        } else {
            self.comparator.compare_with_fallback(a, b)
        }
    }

    /// The output order, reversal included. `Greater` means `a` may not
    /// precede `b`. Numeric mode keeps its blocks in place and only flips the
    /// verdict inside the number and text blocks.
    pub fn arrange(&self, a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
        let reverse = self.config.reverse;
        match self.config.mode {
            SortMode::Lexicographic => {
                let cmp = self.ascending(a, b);
                if reverse {
                    cmp.reverse()
                } else {
                    cmp
                }
            }
            SortMode::Numeric => {
                let (class_a, class_b) = (a.numeric_class(), b.numeric_class());
                match class_a.block().cmp(&class_b.block()) {
                    Ordering::Equal if class_a == NumericClass::Zero => Ordering::Equal,
                    Ordering::Equal => {
                        let cmp = self.ascending(a, b);
                        if reverse {
                            cmp.reverse()
                        } else {
                            cmp
                        }
                    }
                    other => other,
                }
            }
        }
    }

    /// Compute the output permutation for `store`.
    ///
    /// Uses a stable O(n log n) sort on indices under [`Self::arrange`];
    /// neither the lines nor the keys are moved. Reversal flips the verdict
    /// rather than the sorted sequence, so lines that still tie keep arrival
    /// order in both directions.
    pub fn sort(&self, store: &LineStore, keys: &[Key]) -> Permutation {
        let entries = self.entries(store, keys);
        let mut order = self.sort_entries(&entries);

        if self.config.unique {
            let before = order.len();
            order.dedup_by(|current, previous| {
                self.comparator
                    .compare(&entries[*previous], &entries[*current])
                    == Ordering::Equal
            });
            debug!(removed = before - order.len(), "dropped duplicate keys");
        }

        order
    }

    fn sort_entries(&self, entries: &[Entry<'_>]) -> Permutation {
        let mut order: Permutation = (0..entries.len()).collect();
        order.sort_by(|&a, &b| self.arrange(&entries[a], &entries[b]));

        if self.config.mode == SortMode::Numeric {
            let zeros = order
                .iter()
                .rev()
                .take_while(|&&i| entries[i].numeric_class() == NumericClass::Zero)
                .count();
            trace!(zeros, "numeric zero block");
        }

        order
    }

    /// Position (0-based) of the first line that is out of order with its
    /// predecessor, or `None` when the store is already in output order.
    pub fn first_disorder(&self, store: &LineStore, keys: &[Key]) -> Option<usize> {
        let entries = self.entries(store, keys);
        let unique = self.config.unique;

        entries
            .windows(2)
            .position(|pair| {
                // with --unique, equal neighbours are a disorder too
                self.arrange(&pair[0], &pair[1]) == Ordering::Greater
                    || (unique && self.comparator.compare(&pair[0], &pair[1]) == Ordering::Equal)
            })
            .map(|i| i + 1)
    }
}

/// Derive keys for `store` and sort it in one step
pub fn sort_store(store: &LineStore, config: &SortConfig) -> Permutation {
    let keys = Normalizer::new(config.normalization()).derive_keys(store);
    debug!(
        lines = store.len(),
        mode = %config.mode,
        reverse = config.reverse,
        "sorting"
    );
    SortEngine::new(config).sort(store, &keys)
}

/// Check whether `store` is already in output order
pub fn check_store(store: &LineStore, config: &SortConfig) -> Option<usize> {
    let keys = Normalizer::new(config.normalization()).derive_keys(store);
    SortEngine::new(config).first_disorder(store, &keys)
}
