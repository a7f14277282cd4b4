use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{IntoPyDict, PyDict, PyFrozenSet};
use pyo3::wrap_pyfunction;

use crate::{
    generate_frequent_itemsets, types::ItemsetCounts, types::SupportCount, Config, DicError,
    FrequentItemsets, TransactionStore,
};

impl From<DicError> for PyErr {
    fn from(err: DicError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pymodule]
fn dic(_: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(frequent_itemsets, m)?)?;
    Ok(())
}

/// Dynamic Itemset Counting. Returns `(frequent, infrequent)`, each mapping
/// frozensets of items to their support counts.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, batch_size, /)")]
fn frequent_itemsets(
    py: Python,
    transactions: Vec<Vec<String>>,
    min_support: i64,
    batch_size: usize,
) -> PyResult<(Py<PyDict>, Py<PyDict>)> {
    let min_support = SupportCount::try_from(min_support).map_err(|_| {
        DicError::InvalidMinSupport(format!("{} is not a valid support count", min_support))
    })?;

    let store = TransactionStore::new(transactions);
    let result = generate_frequent_itemsets(&store, &Config::new(min_support, batch_size))?;

    let frequent = convert_itemset_counts(py, &result, result.frequent_counts())?;
    let infrequent = convert_itemset_counts(py, &result, result.infrequent_counts())?;
    Ok((frequent, infrequent))
}

fn convert_itemset_counts(
    py: Python,
    result: &FrequentItemsets<String>,
    itemset_counts: ItemsetCounts,
) -> PyResult<Py<PyDict>> {
    let entries = itemset_counts
        .into_iter()
        .map(|(itemset, count)| {
            let set: Py<PyFrozenSet> = PyFrozenSet::new(py, &result.decode(&itemset))?.into();
            Ok((set, count))
        })
        .collect::<PyResult<Vec<(Py<PyFrozenSet>, SupportCount)>>>()?;

    Ok(entries.into_py_dict(py).into())
}
