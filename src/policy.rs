use std::collections::HashSet;

use regex::Regex;

use crate::refmap::ReferenceMap;

/// Tags that must survive the run. A tag matching the pattern protects not
/// just itself but every tag bound to the same reference: an alias of kept
/// content is never deletable, even when its own name does not match.
/// Pure and total over any well-formed map.
pub fn keep_set(map: &ReferenceMap, pattern: &Regex) -> HashSet<String> {
    let mut keep = HashSet::new();

    for (tag, reference) in map.entries() {
        if pattern.is_match(tag) {
            for alias in map.tags_for(reference) {
                keep.insert(alias.clone());
            }
        }
    }

    keep
}

/// Resolved tags not in the keep set, preserving discovery order.
pub fn kill_list(map: &ReferenceMap, keep: &HashSet<String>) -> Vec<String> {
    map.tags()
        .iter()
        .filter(|tag| !keep.contains(*tag))
        .cloned()
        .collect()
}
