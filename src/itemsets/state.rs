use std::collections::HashMap;

use bitvec::slice::BitSlice;

use crate::combi::is_subset;
use crate::types::{ItemId, Itemset, SupportCount};

/// Where an itemset stands in its counting lifecycle.
///
/// Dashed itemsets are still being counted; solid ones have been observed
/// across a full pass and never change again. Squares have reached the
/// support threshold, circles have not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    DashedCircle,
    DashedSquare,
    SolidCircle,
    SolidSquare,
}

impl Class {
    pub fn is_dashed(self) -> bool {
        matches!(self, Class::DashedCircle | Class::DashedSquare)
    }

    pub fn is_solid(self) -> bool {
        !self.is_dashed()
    }

    /// Known to meet the support threshold.
    pub fn is_square(self) -> bool {
        matches!(self, Class::DashedSquare | Class::SolidSquare)
    }

    /// The class reached once a full pass has been observed.
    pub fn solidified(self) -> Class {
        match self {
            Class::DashedCircle | Class::SolidCircle => Class::SolidCircle,
            Class::DashedSquare | Class::SolidSquare => Class::SolidSquare,
        }
    }
}

/// Classification and counters of one itemset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tracked {
    pub class: Class,
    /// Transactions containing the itemset since it entered counting.
    pub support: SupportCount,
    /// Transactions observed since it entered counting.
    pub coverage: SupportCount,
}

impl Tracked {
    pub fn candidate() -> Self {
        Tracked {
            class: Class::DashedCircle,
            support: 0,
            coverage: 0,
        }
    }

    pub fn observe(&mut self, contained: bool) {
        self.coverage += 1;
        if contained {
            self.support += 1;
        }
    }
}

/// Every itemset the engine has ever considered, keyed by itemset, plus the
/// dashed ones in the order they entered counting.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    tracked: HashMap<Itemset, Tracked>,
    dashed: Vec<Itemset>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting `itemset` as a dashed circle. Returns `false`, leaving
    /// everything untouched, if it was ever classified before.
    pub fn insert_candidate(&mut self, itemset: Itemset) -> bool {
        if self.tracked.contains_key(&itemset) {
            return false;
        }
        self.tracked.insert(itemset.clone(), Tracked::candidate());
        self.dashed.push(itemset);
        true
    }

    pub fn get(&self, itemset: &[ItemId]) -> Option<&Tracked> {
        self.tracked.get(itemset)
    }

    pub fn class_of(&self, itemset: &[ItemId]) -> Option<Class> {
        self.get(itemset).map(|tracked| tracked.class)
    }

    /// Dashed square or solid square.
    pub fn is_frequent(&self, itemset: &[ItemId]) -> bool {
        self.class_of(itemset).map_or(false, Class::is_square)
    }

    pub fn has_dashed(&self) -> bool {
        !self.dashed.is_empty()
    }

    pub fn dashed(&self) -> &[Itemset] {
        &self.dashed
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, &Tracked)> {
        self.tracked.iter()
    }

    /// Counts `transaction` against every dashed itemset.
    pub fn observe(&mut self, transaction: &BitSlice) {
        for itemset in &self.dashed {
            if let Some(tracked) = self.tracked.get_mut(itemset) {
                tracked.observe(is_subset(itemset, transaction));
            }
        }
    }

    /// Dashed circles whose support reached `min_support`, in counting order.
    pub fn newly_frequent(&self, min_support: SupportCount) -> Vec<Itemset> {
        self.dashed
            .iter()
            .filter(|itemset| {
                self.tracked.get(*itemset).map_or(false, |tracked| {
                    tracked.class == Class::DashedCircle && tracked.support >= min_support
                })
            })
            .cloned()
            .collect()
    }

    /// Dashed circle to dashed square.
    pub fn promote(&mut self, itemset: &[ItemId]) {
        if let Some(tracked) = self.tracked.get_mut(itemset) {
            if tracked.class == Class::DashedCircle {
                tracked.class = Class::DashedSquare;
            }
        }
    }

    /// Stops counting every dashed itemset observed across `num_transactions`
    /// transactions and returns them in their final class.
    pub fn solidify(&mut self, num_transactions: SupportCount) -> Vec<(Itemset, Class)> {
        let tracked = &mut self.tracked;
        let mut solidified = vec![];
        self.dashed.retain(|itemset| match tracked.get_mut(itemset) {
            Some(entry) if entry.coverage >= num_transactions => {
                entry.class = entry.class.solidified();
                solidified.push((itemset.clone(), entry.class));
                false
            }
            Some(_) => true,
            None => false,
        });
        solidified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn solidified_keeps_shape() {
        assert_eq!(Class::DashedCircle.solidified(), Class::SolidCircle);
        assert_eq!(Class::DashedSquare.solidified(), Class::SolidSquare);
        assert_eq!(Class::SolidSquare.solidified(), Class::SolidSquare);
    }

    #[test]
    fn dashed_and_square() {
        assert!(Class::DashedCircle.is_dashed());
        assert!(Class::DashedSquare.is_dashed());
        assert!(Class::SolidCircle.is_solid());
        assert!(Class::DashedSquare.is_square());
        assert!(Class::SolidSquare.is_square());
        assert!(!Class::SolidCircle.is_square());
    }

    #[test]
    fn observe_counts_coverage_and_support() {
        let mut tracked = Tracked::candidate();
        tracked.observe(true);
        tracked.observe(false);
        assert_eq!(tracked.support, 1);
        assert_eq!(tracked.coverage, 2);
    }

    #[test]
    fn candidates_are_never_re_added() {
        let mut classification = Classification::new();
        assert!(classification.insert_candidate(vec![0]));
        assert!(!classification.insert_candidate(vec![0]));
        assert_eq!(classification.dashed(), &[vec![0]]);
        assert_eq!(classification.len(), 1);
    }

    #[test]
    fn lifecycle_of_a_frequent_itemset() {
        let mut classification = Classification::new();
        classification.insert_candidate(vec![0]);
        classification.insert_candidate(vec![1]);

        let transaction = bitvec![usize, Lsb0; 1, 0];
        classification.observe(&transaction);
        assert_eq!(classification.newly_frequent(1), vec![vec![0]]);

        classification.promote(&[0]);
        assert!(classification.is_frequent(&[0]));
        assert!(classification.newly_frequent(1).is_empty());

        let solidified = classification.solidify(1);
        assert_eq!(
            solidified,
            vec![(vec![0], Class::SolidSquare), (vec![1], Class::SolidCircle)]
        );
        assert!(!classification.has_dashed());
        assert_eq!(classification.class_of(&[1]), Some(Class::SolidCircle));
        assert_eq!(classification.get(&[0]).map(|t| t.coverage), Some(1));
    }

    #[test]
    fn solid_itemsets_stop_counting() {
        let mut classification = Classification::new();
        classification.insert_candidate(vec![0]);
        let transaction = bitvec![usize, Lsb0; 1];

        classification.observe(&transaction);
        classification.solidify(1);
        classification.observe(&transaction);

        assert_eq!(classification.get(&[0]).map(|t| t.coverage), Some(1));
        assert_eq!(classification.get(&[0]).map(|t| t.support), Some(1));
    }
}
