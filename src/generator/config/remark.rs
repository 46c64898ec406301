//! Remark processing utilities
//!
//! Turns possibly duplicated node labels into names that are unique across one
//! batch.

use std::collections::{HashMap, HashSet};

/// Suffix separator used when no other is configured: `Node`, `Node_1`, `Node_2`
pub const DEFAULT_NAME_SEPARATOR: &str = "_";

/// Label → occurrence count for one batch.
///
/// The n-th repeat of a label gets the suffix `n`, so names only depend on
/// input order. When a generated candidate is already taken (say the feed
/// itself contains `Node_1`), the counter keeps advancing until a free name
/// turns up.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    counters: HashMap<String, usize>,
    assigned: HashSet<String>,
    separator: String,
}

impl NameRegistry {
    pub fn new(separator: &str) -> Self {
        NameRegistry {
            counters: HashMap::new(),
            assigned: HashSet::new(),
            separator: separator.to_string(),
        }
    }

    /// Return a name not handed out before and record it.
    pub fn resolve(&mut self, label: &str) -> String {
        let count = self.counters.entry(label.to_string()).or_insert(0);
        *count += 1;

        let mut candidate = if *count == 1 {
            label.to_string()
        } else {
            format!("{}{}{}", label, self.separator, *count - 1)
        };
        while self.assigned.contains(&candidate) {
            *count += 1;
            candidate = format!("{}{}{}", label, self.separator, *count - 1);
        }

        self.assigned.insert(candidate.clone());
        candidate
    }

    /// Number of names handed out so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
