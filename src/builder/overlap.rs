//! Duplicate-key detection across merged handler maps.

use std::collections::BTreeSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Check that no key appears in more than one of `key_sets`.
///
/// Keys are accumulated by union while their sizes are summed; the sets
/// were pairwise disjoint exactly when the union is as large as the sum.
/// Every duplicate is reported, not only the first one found.
pub(crate) fn check_overlapping<K, I>(key_sets: I) -> Validation<(), NonEmptyVec<K>>
where
    K: Ord + Clone,
    I: IntoIterator<Item = BTreeSet<K>>,
{
    let mut sets = key_sets.into_iter();
    let Some(mut all) = sets.next() else {
        return Validation::success(());
    };
    let mut total = all.len();
    let mut checks: Vec<Validation<(), NonEmptyVec<K>>> = Vec::new();

    for current in sets {
        total += current.len();
        for key in current {
            if !all.insert(key.clone()) {
                checks.push(Validation::fail(key));
            }
        }
    }

    if all.len() == total {
        return Validation::success(());
    }
    Validation::all_vec(checks).map(|_| ())
}

/// Collapse accumulated duplicates into a sorted list of distinct names.
pub(crate) fn duplicate_names<K: ToString>(duplicates: NonEmptyVec<K>) -> Vec<String> {
    duplicates
        .iter()
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
