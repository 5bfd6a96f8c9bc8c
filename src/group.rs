use std::hash::Hash;

use indexmap::IndexMap;

/// Groups `items` by `key_fn` in a single pass.
///
/// Keys keep first-seen order and each group keeps the order of its items.
pub fn group_by<T, K, I, F>(items: I, mut key_fn: F) -> IndexMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}
