use std::collections::HashSet;
use std::hash::Hash;

/// Changes that turn a current set of identifiers into a desired one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDiff<T> {
    /// Desired but not current, in first-seen desired order, without duplicates.
    pub to_add: Vec<T>,
    /// Current but not desired, in current order, without duplicates.
    pub to_remove: Vec<T>,
}

impl<T> SetDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// `to_add = desired \ current`, `to_remove = current \ desired`.
/// Identifiers in both sets appear in neither list.
pub fn diff_ids<T, C, D>(current: C, desired: D) -> SetDiff<T>
where
    T: Eq + Hash + Copy,
    C: IntoIterator<Item = T>,
    D: IntoIterator<Item = T>,
{
    let current: Vec<T> = current.into_iter().collect();
    let desired: Vec<T> = desired.into_iter().collect();
    let current_set: HashSet<T> = current.iter().copied().collect();
    let desired_set: HashSet<T> = desired.iter().copied().collect();

    let mut seen = HashSet::new();
    let to_add = desired
        .into_iter()
        .filter(|id| !current_set.contains(id) && seen.insert(*id))
        .collect();

    let mut seen = HashSet::new();
    let to_remove = current
        .into_iter()
        .filter(|id| !desired_set.contains(id) && seen.insert(*id))
        .collect();

    SetDiff { to_add, to_remove }
}
