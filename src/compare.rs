//! Ordering verdicts over `(key, line)` pairs

use crate::config::SortMode;
use crate::numeric::{self, NumericClass};
use std::cmp::Ordering;

/// A read-only view of one input record as the comparator sees it:
/// the derived key next to the untouched original line.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Arrival position in the line store
    pub index: usize,
    pub key: &'a [u8],
    pub line: &'a [u8],
    /// Cached numeric classification of `key`, filled in numeric mode
    pub class: Option<NumericClass>,
}

impl<'a> Entry<'a> {
    pub fn new(index: usize, key: &'a [u8], line: &'a [u8]) -> Self {
        Self {
            index,
            key,
            line,
            class: None,
        }
    }

    /// Entry with its numeric class computed up front
    pub fn classified(index: usize, key: &'a [u8], line: &'a [u8]) -> Self {
        Self {
            index,
            key,
            line,
            class: Some(numeric::classify(key)),
        }
    }

    pub fn numeric_class(&self) -> NumericClass {
        self.class.unwrap_or_else(|| numeric::classify(self.key))
    }
}

/// Compares entries by key under one [`SortMode`].
///
/// Verdicts are always ascending; reversal belongs to the sort engine
/// because numeric mode does not reverse every block.
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    mode: SortMode,
}

impl Comparator {
    pub fn new(mode: SortMode) -> Self {
        Self { mode }
    }

    /// Key-only verdict
    pub fn compare(&self, a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
        match self.mode {
            SortMode::Lexicographic => a.key.cmp(b.key),
            SortMode::Numeric => compare_numeric(a, b),
        }
    }

    /// Key verdict, then the original bytes when keys tie.
    ///
    /// Lines whose keys are both the literal `0` never fall through to the
    /// line bytes; that block keeps arrival order.
    pub fn compare_with_fallback(&self, a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
        match self.compare(a, b) {
            Ordering::Equal if self.keeps_arrival_order(a, b) => Ordering::Equal,
            Ordering::Equal => a.line.cmp(b.line),
            other => other,
        }
    }

    /// True when a tie between `a` and `b` must be left to arrival order
    pub fn keeps_arrival_order(&self, a: &Entry<'_>, b: &Entry<'_>) -> bool {
        self.mode == SortMode::Numeric
            && a.numeric_class() == NumericClass::Zero
            && b.numeric_class() == NumericClass::Zero
    }
}

fn compare_numeric(a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
    let (class_a, class_b) = (a.numeric_class(), b.numeric_class());
    match class_a.block().cmp(&class_b.block()) {
        Ordering::Equal => {}
        other => return other,
    }

    match (class_a, class_b) {
        (NumericClass::Number(x), NumericClass::Number(y)) => numeric::compare_values(x, y),
        (NumericClass::Text, NumericClass::Text) => a.key.cmp(b.key),
        _ => Ordering::Equal,
    }
}
