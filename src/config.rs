use crate::error::{DicError, Result};
use crate::types::SupportCount;

/// Support threshold, either as a transaction count or relative to the
/// dataset size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinSupport {
    Count(SupportCount),
    /// Resolved to `ceil(fraction * l)`.
    Fraction(f32),
}

impl MinSupport {
    /// Absolute threshold for a dataset of `num_transactions` transactions.
    pub fn resolve(&self, num_transactions: usize) -> Result<SupportCount> {
        let min_support_count = match *self {
            MinSupport::Count(count) => count,
            MinSupport::Fraction(fraction) => {
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(DicError::InvalidMinSupport(format!(
                        "fraction {} is outside [0, 1]",
                        fraction
                    )));
                }
                // An exact integer product may come out slightly above the
                // integer because `fraction` itself is rounded to f32.
                let product = f64::from(fraction) * num_transactions as f64;
                let tolerance = product * f64::from(f32::EPSILON);
                (product - tolerance).ceil() as SupportCount
            }
        };

        if min_support_count as usize > num_transactions {
            return Err(DicError::MinSupportExceedsTransactions {
                min_support: min_support_count,
                transactions: num_transactions,
            });
        }

        Ok(min_support_count)
    }
}

impl Default for MinSupport {
    fn default() -> Self {
        MinSupport::Count(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub min_support: MinSupport,
    /// Transactions drawn per outer iteration before re-checking whether any
    /// itemset is still being counted.
    pub batch_size: usize,
    /// Give up once this many transactions were drawn without finishing.
    pub max_transactions: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_support: MinSupport::default(),
            batch_size: 1,
            max_transactions: None,
        }
    }
}

impl Config {
    pub fn new(min_support: SupportCount, batch_size: usize) -> Self {
        Config {
            min_support: MinSupport::Count(min_support),
            batch_size,
            ..Config::default()
        }
    }

    pub fn with_min_support(mut self, min_support: MinSupport) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_max_transactions(mut self, max_transactions: u64) -> Self {
        self.max_transactions = Some(max_transactions);
        self
    }

    /// Checks the parameters against a dataset of `num_transactions`
    /// transactions and returns the absolute support threshold.
    pub fn validate(&self, num_transactions: usize) -> Result<SupportCount> {
        if self.batch_size < 1 {
            return Err(DicError::InvalidBatchSize(self.batch_size));
        }
        if num_transactions == 0 {
            return Err(DicError::EmptyDataset);
        }
        if SupportCount::try_from(num_transactions).is_err() {
            return Err(DicError::TooManyTransactions(num_transactions));
        }
        self.min_support.resolve(num_transactions)
    }
}
