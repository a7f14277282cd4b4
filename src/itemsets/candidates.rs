use crate::{
    combi::{extend, immediate_subsets},
    itemsets::state::Classification,
    types::{ItemId, Itemset},
};

/// Starts counting every one-item extension of a freshly frequent `itemset`
/// whose immediate subsets are all known to be frequent.
///
/// Extensions that were ever classified are left alone. Returns the
/// candidates that were added, in item order.
pub fn add_supersets<I>(
    itemset: &[ItemId],
    items: I,
    classification: &mut Classification,
) -> Vec<Itemset>
where
    I: IntoIterator<Item = ItemId>,
{
    let mut added = vec![];

    for item in items {
        let candidate = match extend(itemset, item) {
            Some(candidate) => candidate,
            None => continue,
        };
        if classification.get(&candidate).is_some() {
            continue;
        }
        let closed = immediate_subsets(&candidate)
            .iter()
            .all(|subset| classification.is_frequent(subset));
        if !closed {
            continue;
        }

        tracing::trace!(?candidate, parent = ?itemset, "adding candidate");
        classification.insert_candidate(candidate.clone());
        added.push(candidate);
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every given itemset promoted to dashed square.
    fn frequent(itemsets: &[&[ItemId]]) -> Classification {
        let mut classification = Classification::new();
        for itemset in itemsets {
            classification.insert_candidate(itemset.to_vec());
            classification.promote(itemset);
        }
        classification
    }

    #[test]
    fn pairs_from_frequent_singletons() {
        let mut classification = frequent(&[&[0], &[1]]);
        classification.insert_candidate(vec![2]);

        let added = add_supersets(&[0], 0..3, &mut classification);

        assert_eq!(added, vec![vec![0, 1]]);
        assert!(classification.dashed().contains(&vec![0, 1]));
        assert!(classification.get(&[0, 2]).is_none());
    }

    #[test]
    fn triple_needs_every_pair() {
        let mut classification = frequent(&[&[0], &[1], &[2], &[0, 1], &[1, 2]]);

        assert!(add_supersets(&[0, 1], 0..3, &mut classification).is_empty());

        classification.insert_candidate(vec![0, 2]);
        classification.promote(&[0, 2]);
        assert_eq!(
            add_supersets(&[0, 1], 0..3, &mut classification),
            vec![vec![0, 1, 2]]
        );
    }

    #[test]
    fn existing_candidates_are_not_re_added() {
        let mut classification = frequent(&[&[0], &[1]]);

        assert_eq!(add_supersets(&[0], 0..2, &mut classification).len(), 1);
        assert!(add_supersets(&[1], 0..2, &mut classification).is_empty());
        assert_eq!(classification.len(), 3);
    }

    #[test]
    fn empty_itemset_proposes_nothing_new() {
        let mut classification = frequent(&[&[], &[0], &[1]]);
        assert!(add_supersets(&[], 0..2, &mut classification).is_empty());
    }
}
