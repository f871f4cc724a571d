//! One-vs-rest composition of binary k-nearest-neighbour classifiers.

use serde::{Deserialize, Serialize};

use crate::model::sparse::FeatureVector;

pub const DEFAULT_NEIGHBORS: usize = 5;

/// Binary k-NN with uniform weights and Euclidean distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNeighborsClassifier {
    k: usize,
    points: Vec<FeatureVector>,
    positive: Vec<bool>,
}

impl KNeighborsClassifier {
    pub fn fit(k: usize, points: Vec<FeatureVector>, positive: Vec<bool>) -> Self {
        let k = k.clamp(1, points.len().max(1));
        Self { k, points, positive }
    }

    /// Fraction of the `k` nearest training points that are positive.
    /// Equal distances keep training order.
    pub fn positive_probability(&self, x: &FeatureVector) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let mut distances: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.squared_distance(x), i))
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let hits = distances
            .iter()
            .take(self.k)
            .filter(|&&(_, i)| self.positive[i])
            .count();
        hits as f64 / self.k as f64
    }

    fn is_consistent(&self) -> bool {
        self.points.len() == self.positive.len() && self.k >= 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneVsRestClassifier {
    n_features: usize,
    estimators: Vec<KNeighborsClassifier>,
}

impl OneVsRestClassifier {
    /// Fits one binary estimator per class in `0..n_classes`.
    pub fn fit(
        k: usize,
        points: &[FeatureVector],
        targets: &[usize],
        n_classes: usize,
        n_features: usize,
    ) -> Self {
        let estimators = (0..n_classes)
            .map(|class| {
                let positive = targets.iter().map(|&t| t == class).collect();
                KNeighborsClassifier::fit(k, points.to_vec(), positive)
            })
            .collect();
        Self {
            n_features,
            estimators,
        }
    }

    /// Predicts the class whose estimator scores highest. Ties go to the later class.
    pub fn predict(&self, x: &FeatureVector) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (class, estimator) in self.estimators.iter().enumerate() {
            let score = estimator.positive_probability(x);
            match best {
                Some((_, top)) if score < top => {}
                _ => best = Some((class, score)),
            }
        }
        best.map(|(class, _)| class)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.estimators.len()
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.estimators.iter().all(|e| {
            e.is_consistent() && e.points.iter().all(|p| p.min_dimension() <= self.n_features)
        })
    }
}
