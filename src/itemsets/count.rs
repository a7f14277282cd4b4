use crate::{
    config::Config,
    error::{DicError, Result},
    itemsets::{
        candidates::add_supersets,
        state::{Class, Classification},
    },
    transactions::TransactionStore,
    types::{ItemId, Itemset, ItemsetCounts, SupportCount, Transaction},
};

/// Dynamic Itemset Counting over one transaction store.
///
/// Itemsets start out as dashed circles and are counted against an endless
/// cyclic scan of the transactions. A circle whose support reaches the
/// threshold becomes a square and seeds new candidates; any itemset that has
/// been counted across a full pass becomes solid and stops counting. The run
/// ends when nothing dashed is left.
#[derive(Debug)]
pub struct DynamicItemsetCounter<'s, T> {
    store: &'s TransactionStore<T>,
    num_transactions: SupportCount,
    min_support: SupportCount,
    batch_size: usize,
    max_transactions: Option<u64>,
    classification: Classification,
    transactions_processed: u64,
}

impl<'s, T> DynamicItemsetCounter<'s, T> {
    /// Validates `config` against the store and seeds the dashed circles with
    /// the store's universe.
    pub fn new(store: &'s TransactionStore<T>, config: &Config) -> Result<Self> {
        let min_support = config.validate(store.len())?;
        let num_transactions = SupportCount::try_from(store.len())
            .map_err(|_| DicError::TooManyTransactions(store.len()))?;

        let mut classification = Classification::new();
        for itemset in store.universe() {
            classification.insert_candidate(itemset.clone());
        }

        Ok(DynamicItemsetCounter {
            store,
            num_transactions,
            min_support,
            batch_size: config.batch_size,
            max_transactions: config.max_transactions,
            classification,
            transactions_processed: 0,
        })
    }

    pub fn min_support(&self) -> SupportCount {
        self.min_support
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn transactions_processed(&self) -> u64 {
        self.transactions_processed
    }

    /// Runs until every itemset is solid.
    pub fn run(mut self) -> Result<FrequentItemsets<'s, T>> {
        let store = self.store;
        let mut cursor = store.cursor();

        tracing::debug!(
            transactions = store.len(),
            items = store.num_items(),
            min_support = self.min_support,
            batch_size = self.batch_size,
            "counting itemsets"
        );

        while self.classification.has_dashed() {
            for transaction in cursor.by_ref().take(self.batch_size) {
                self.check_limit()?;
                self.process(transaction);
            }
        }

        tracing::debug!(
            transactions_processed = self.transactions_processed,
            itemsets = self.classification.len(),
            "counting finished"
        );

        Ok(FrequentItemsets {
            store,
            min_support: self.min_support,
            classification: self.classification,
            transactions_processed: self.transactions_processed,
        })
    }

    fn check_limit(&self) -> Result<()> {
        match self.max_transactions {
            Some(limit)
                if self.transactions_processed >= limit && self.classification.has_dashed() =>
            {
                Err(DicError::TransactionLimitExceeded(limit))
            }
            _ => Ok(()),
        }
    }

    /// Counts one transaction, then applies support promotions (with
    /// candidate generation) before full-pass promotions.
    fn process(&mut self, transaction: &Transaction) {
        self.transactions_processed += 1;
        self.classification.observe(transaction);

        for itemset in self.classification.newly_frequent(self.min_support) {
            self.classification.promote(&itemset);
            tracing::debug!(?itemset, "itemset reached minimum support");
            let items = 0..self.store.num_items();
            add_supersets(&itemset, items, &mut self.classification);
        }

        for (itemset, class) in self.classification.solidify(self.num_transactions) {
            tracing::debug!(?itemset, ?class, "itemset observed across a full pass");
        }
    }
}

/// Frozen outcome of a counting run.
#[derive(Debug, Clone)]
pub struct FrequentItemsets<'s, T> {
    store: &'s TransactionStore<T>,
    min_support: SupportCount,
    classification: Classification,
    transactions_processed: u64,
}

impl<'s, T> FrequentItemsets<'s, T> {
    /// Solid squares.
    pub fn frequent(&self) -> impl Iterator<Item = &Itemset> + '_ {
        self.in_class(Class::SolidSquare)
    }

    /// Solid circles.
    pub fn infrequent(&self) -> impl Iterator<Item = &Itemset> + '_ {
        self.in_class(Class::SolidCircle)
    }

    /// Frequent itemsets with their support counts.
    pub fn frequent_counts(&self) -> ItemsetCounts {
        self.counts_in_class(Class::SolidSquare)
    }

    /// Infrequent itemsets with their support counts.
    pub fn infrequent_counts(&self) -> ItemsetCounts {
        self.counts_in_class(Class::SolidCircle)
    }

    pub fn is_frequent(&self, itemset: &[ItemId]) -> bool {
        self.class_of(itemset) == Some(Class::SolidSquare)
    }

    /// `None` for itemsets that were never generated.
    pub fn class_of(&self, itemset: &[ItemId]) -> Option<Class> {
        self.classification.class_of(itemset)
    }

    pub fn support_count(&self, itemset: &[ItemId]) -> Option<SupportCount> {
        self.classification.get(itemset).map(|tracked| tracked.support)
    }

    pub fn coverage_count(&self, itemset: &[ItemId]) -> Option<SupportCount> {
        self.classification.get(itemset).map(|tracked| tracked.coverage)
    }

    /// Support counts of every classified itemset.
    pub fn support_counts(&self) -> impl Iterator<Item = (&Itemset, SupportCount)> + '_ {
        self.classification
            .iter()
            .map(|(itemset, tracked)| (itemset, tracked.support))
    }

    /// Coverage counts of every classified itemset.
    pub fn coverage_counts(&self) -> impl Iterator<Item = (&Itemset, SupportCount)> + '_ {
        self.classification
            .iter()
            .map(|(itemset, tracked)| (itemset, tracked.coverage))
    }

    pub fn min_support(&self) -> SupportCount {
        self.min_support
    }

    /// Transactions drawn from the cyclic scan, including any drawn after
    /// the last itemset went solid within the final batch.
    pub fn transactions_processed(&self) -> u64 {
        self.transactions_processed
    }

    pub fn store(&self) -> &'s TransactionStore<T> {
        self.store
    }

    pub fn decode(&self, itemset: &[ItemId]) -> Vec<&'s T> {
        self.store.decode(itemset)
    }

    fn in_class(&self, class: Class) -> impl Iterator<Item = &Itemset> + '_ {
        self.classification
            .iter()
            .filter(move |(_, tracked)| tracked.class == class)
            .map(|(itemset, _)| itemset)
    }

    fn counts_in_class(&self, class: Class) -> ItemsetCounts {
        self.classification
            .iter()
            .filter(|(_, tracked)| tracked.class == class)
            .map(|(itemset, tracked)| (itemset.clone(), tracked.support))
            .collect()
    }
}

/// Builds the counter for `store` and runs it to completion.
pub fn generate_frequent_itemsets<'s, T>(
    store: &'s TransactionStore<T>,
    config: &Config,
) -> Result<FrequentItemsets<'s, T>> {
    DynamicItemsetCounter::new(store, config)?.run()
}
