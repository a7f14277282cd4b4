use thiserror::Error;

pub type Result<T> = std::result::Result<T, DicError>;

/// Reasons a counting run refuses to start or gives up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DicError {
    #[error("batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    #[error("invalid minimum support: {0}")]
    InvalidMinSupport(String),

    /// A cyclic scan over zero transactions never yields one.
    #[error("cannot count itemsets over an empty dataset")]
    EmptyDataset,

    #[error("minimum support {min_support} exceeds the number of transactions ({transactions})")]
    MinSupportExceedsTransactions {
        min_support: u32,
        transactions: usize,
    },

    #[error("{0} transactions exceed what the support counters can hold")]
    TooManyTransactions(usize),

    #[error("itemsets still under counting after {0} transactions")]
    TransactionLimitExceeded(u64),
}
