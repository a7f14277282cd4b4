//! Frequent itemset mining with Dynamic Itemset Counting (DIC).
//!
//! Unlike level-wise Apriori, DIC does not wait for a full scan to finish
//! before counting larger itemsets. It scans the transactions cyclically and
//! starts counting a candidate as soon as all of its immediate subsets are
//! known to be frequent, then stops counting it once it has seen every
//! transaction exactly once.
//!
//! ```
//! use dic::{generate_frequent_itemsets, Config, TransactionStore};
//!
//! let store = TransactionStore::new(["AB", "A", "BC"].iter().map(|t| t.chars()));
//! let result = generate_frequent_itemsets(&store, &Config::new(2, 1)).unwrap();
//!
//! let a = store.encode("A".chars()).unwrap();
//! assert!(result.is_frequent(&a));
//! ```

pub mod combi;
pub mod config;
pub mod error;
pub mod itemsets;
pub mod transactions;
pub mod types;
#[cfg(feature = "python")]
mod wrapper;

pub use config::{Config, MinSupport};
pub use error::{DicError, Result};
pub use itemsets::{
    count::{generate_frequent_itemsets, DynamicItemsetCounter, FrequentItemsets},
    state::{Class, Classification},
};
pub use transactions::{CyclicCursor, TransactionStore};
