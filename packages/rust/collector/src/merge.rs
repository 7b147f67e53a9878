//! Merging independent sub-collections.

use std::collections::HashSet;
use std::hash::Hash;

/// Round-robin merge of `lists`, keeping the first occurrence of each key.
///
/// Used when several degrees are collected separately (say 1st, then 2nd) and
/// the caller wants a mixed result rather than one degree crowding out the rest.
/// Takes one item from each list in turn until `limit` items are out or every
/// list is drained.
pub fn interleave<T, K, F>(lists: Vec<Vec<T>>, key: F, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    let mut iters: Vec<_> = lists.into_iter().map(Vec::into_iter).collect();
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    while out.len() < limit {
        let mut progressed = false;
        for iter in &mut iters {
            if out.len() >= limit {
                break;
            }
            let Some(item) = iter.next() else {
                continue;
            };
            progressed = true;
            if seen.insert(key(&item)) {
                out.push(item);
            }
        }
        if !progressed {
            break;
        }
    }
    out
}
