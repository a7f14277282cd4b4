use bitvec::slice::BitSlice;
use itertools::Itertools;

use crate::types::{ItemId, Itemset};

/// `itemset ∪ {item}`, kept sorted. `None` if the item is already present.
pub fn extend(itemset: &[ItemId], item: ItemId) -> Option<Itemset> {
    let position = itemset.binary_search(&item).err()?;
    let mut extended = Vec::with_capacity(itemset.len() + 1);
    extended.extend_from_slice(&itemset[..position]);
    extended.push(item);
    extended.extend_from_slice(&itemset[position..]);
    Some(extended)
}

/// Every subset obtained by dropping exactly one item. The empty itemset has
/// none.
pub fn immediate_subsets(itemset: &[ItemId]) -> Vec<Itemset> {
    if itemset.is_empty() {
        return vec![];
    }
    itemset
        .iter()
        .copied()
        .combinations(itemset.len() - 1)
        .collect()
}

pub fn is_subset(itemset: &[ItemId], transaction: &BitSlice) -> bool {
    itemset
        .iter()
        .all(|&item| transaction.get(item).map_or(false, |bit| *bit))
}
