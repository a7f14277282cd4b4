use std::collections::HashMap;

use bitvec::prelude::*;

pub type ItemId = usize;

/// Sorted, deduplicated item ids. Sorting makes equality and hashing
/// independent of the order items were seen in.
pub type Itemset = Vec<ItemId>;

/// Membership bit per `ItemId`.
pub type Transaction = BitVec<usize, Lsb0>;

pub type Inventory<T> = Vec<T>;
pub type ReverseLookup<T> = HashMap<T, ItemId>;

pub type SupportCount = u32;
pub type ItemsetCounts = HashMap<Itemset, SupportCount>;
