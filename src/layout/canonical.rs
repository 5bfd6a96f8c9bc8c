use std::collections::HashSet;

use crate::ir::ResolvedSegment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CanonicalSegment {
    pub segment: ResolvedSegment,
    pub is_year: bool,
}

/// Sorts newest-first and tags the last segment of every calendar year.
///
/// Everything downstream consumes this order as-is and never re-sorts.
/// Equal timestamps keep their input order. Years are read in each
/// timestamp's own offset, so with mixed offsets a year's segments need not
/// be adjacent; the tag still goes to the year's last one.
pub(crate) fn canonicalize(mut resolved: Vec<ResolvedSegment>) -> Vec<CanonicalSegment> {
    resolved.sort_by(|a, b| b.at.cmp(&a.at));
    let mut seen = HashSet::new();
    let mut canonical: Vec<CanonicalSegment> = resolved
        .into_iter()
        .rev()
        .map(|segment| CanonicalSegment {
            is_year: seen.insert(segment.year()),
            segment,
        })
        .collect();
    canonical.reverse();
    canonical
}
