//! Column-name helpers.

use std::collections::HashSet;

/// Makes column names unique and non-empty.
///
/// Blank names become `Unnamed: <index>`; repeats get `.1`, `.2`, ...
///
/// # Examples
///
/// ```
/// use pft_common::unique_names;
///
/// let names = unique_names(vec!["Item".into(), "".into(), "Item".into()]);
/// assert_eq!(names, vec!["Item", "Unnamed: 1", "Item.1"]);
/// ```
pub fn unique_names(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut names = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        names.push(candidate);
    }
    names
}
