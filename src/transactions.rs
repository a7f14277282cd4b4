use std::collections::HashMap;
use std::hash::Hash;

use bitvec::prelude::*;

use crate::types::{Inventory, ItemId, Itemset, ReverseLookup, Transaction};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Normalized transactions together with the item alphabet they were built
/// from.
#[derive(Debug, Clone)]
pub struct TransactionStore<T> {
    transactions: Vec<Transaction>,
    universe: Vec<Itemset>,
    inventory: Inventory<T>,
    reverse_lookup: ReverseLookup<T>,
}

impl<T> TransactionStore<T>
where
    T: Eq + Hash + Clone,
{
    /// Interns every item in first-seen order and stores each record as a
    /// membership bit set. Repeated items within a record collapse.
    ///
    /// The universe holds one singleton per distinct item, plus the empty
    /// itemset if any record is empty.
    pub fn new<R, I>(records: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        let mut reverse_lookup: ReverseLookup<T> = HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS);
        let mut inventory: Inventory<T> = Vec::with_capacity(APPROX_NUM_UNIQUE_ITEMS);
        let mut has_empty_record = false;

        let interned: Vec<Vec<ItemId>> = records
            .into_iter()
            .map(|record| {
                let items: Vec<ItemId> = record
                    .into_iter()
                    .map(|item| match reverse_lookup.get(&item) {
                        Some(&item_id) => item_id,
                        None => {
                            let item_id = inventory.len();
                            reverse_lookup.insert(item.clone(), item_id);
                            inventory.push(item);
                            item_id
                        }
                    })
                    .collect();
                has_empty_record |= items.is_empty();
                items
            })
            .collect();

        let num_items = inventory.len();
        let transactions = interned
            .into_iter()
            .map(|items| {
                let mut transaction: Transaction = bitvec![usize, Lsb0; 0; num_items];
                for item_id in items {
                    transaction.set(item_id, true);
                }
                transaction
            })
            .collect();

        let mut universe: Vec<Itemset> = Vec::with_capacity(num_items + 1);
        if has_empty_record {
            universe.push(vec![]);
        }
        universe.extend((0..num_items).map(|item_id| vec![item_id]));

        TransactionStore {
            transactions,
            universe,
            inventory,
            reverse_lookup,
        }
    }

    pub fn item_id(&self, item: &T) -> Option<ItemId> {
        self.reverse_lookup.get(item).copied()
    }

    /// Canonical itemset for the given items, or `None` if any of them never
    /// occurs in the dataset.
    pub fn encode<I>(&self, items: I) -> Option<Itemset>
    where
        I: IntoIterator<Item = T>,
    {
        let mut itemset = items
            .into_iter()
            .map(|item| self.item_id(&item))
            .collect::<Option<Itemset>>()?;
        itemset.sort_unstable();
        itemset.dedup();
        Some(itemset)
    }
}

impl<T> TransactionStore<T> {
    /// Number of transactions, `l`.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Itemsets every counting run starts from.
    pub fn universe(&self) -> &[Itemset] {
        &self.universe
    }

    pub fn num_items(&self) -> usize {
        self.inventory.len()
    }

    pub fn item(&self, item_id: ItemId) -> Option<&T> {
        self.inventory.get(item_id)
    }

    pub fn decode(&self, itemset: &[ItemId]) -> Vec<&T> {
        itemset
            .iter()
            .filter_map(|&item_id| self.item(item_id))
            .collect()
    }

    pub fn cursor(&self) -> CyclicCursor<'_> {
        CyclicCursor::new(&self.transactions)
    }
}

/// Endless scan over the transactions: after the last one it restarts from
/// the first. Yields nothing at all over an empty slice.
#[derive(Debug, Clone)]
pub struct CyclicCursor<'t> {
    transactions: &'t [Transaction],
    position: usize,
}

impl<'t> CyclicCursor<'t> {
    pub fn new(transactions: &'t [Transaction]) -> Self {
        CyclicCursor {
            transactions,
            position: 0,
        }
    }

    /// Index of the transaction the next call to `next` returns.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'t> Iterator for CyclicCursor<'t> {
    type Item = &'t Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        let transaction = self.transactions.get(self.position)?;
        self.position = (self.position + 1) % self.transactions.len();
        Some(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(records: &[&str]) -> TransactionStore<char> {
        TransactionStore::new(records.iter().map(|record| record.chars()))
    }

    #[test]
    fn interns_items_in_first_seen_order() {
        let store = store(&["BA", "C"]);

        assert_eq!(store.num_items(), 3);
        assert_eq!(store.item_id(&'B'), Some(0));
        assert_eq!(store.item_id(&'A'), Some(1));
        assert_eq!(store.item_id(&'C'), Some(2));
        assert_eq!(store.item(2), Some(&'C'));
        assert_eq!(store.item_id(&'Z'), None);
    }

    #[test]
    fn universe_holds_singletons() {
        let store = store(&["AB", "BC"]);
        assert_eq!(store.universe(), &[vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn empty_record_adds_empty_itemset() {
        let store = store(&["AB", "A", "BC", ""]);
        assert_eq!(store.len(), 4);
        assert_eq!(store.universe(), &[vec![], vec![0], vec![1], vec![2]]);
        assert!(store.transactions()[3].not_any());
    }

    #[test]
    fn repeated_items_collapse() {
        let store = store(&["AAB"]);
        let transaction = &store.transactions()[0];

        assert_eq!(transaction.len(), 2);
        assert_eq!(transaction.count_ones(), 2);
    }

    #[test]
    fn encode_sorts_and_dedups() {
        let store = store(&["AB", "C"]);

        assert_eq!(store.encode("CAA".chars()), Some(vec![0, 2]));
        assert_eq!(store.encode("AZ".chars()), None);
        assert_eq!(store.decode(&[0, 2]), vec![&'A', &'C']);
    }

    #[test]
    fn cursor_wraps_around() {
        let store = store(&["A", "B", "AB"]);
        let positions: Vec<usize> = {
            let mut cursor = store.cursor();
            (0..7)
                .map(|_| {
                    let position = cursor.position();
                    cursor.next();
                    position
                })
                .collect()
        };

        assert_eq!(positions, vec![0, 1, 2, 0, 1, 2, 0]);
        let drawn: Vec<usize> = store.cursor().take(4).map(|t| t.count_ones()).collect();
        assert_eq!(drawn, vec![1, 1, 2, 1]);
    }

    #[test]
    fn cursor_over_nothing_yields_nothing() {
        let store = store(&[]);
        assert!(store.is_empty());
        assert_eq!(store.cursor().next(), None);
    }
}
