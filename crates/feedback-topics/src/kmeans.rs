//! Seeded k-means over dense rows.
//!
//! k-means++ seeding with greedy local trials, Lloyd iterations and several
//! restarts from one seeded generator. The run is a pure function of the
//! rows, k and the seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use feedback_types::ClusteringConfig;

use crate::error::TopicsError;
use crate::similarity::{mean, mean_variance, squared_distance};

/// Restart and convergence settings.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    pub n_init: usize,
    pub max_iter: usize,
    /// Relative to the mean feature variance of the data
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self::from(&ClusteringConfig::default())
    }
}

impl From<&ClusteringConfig> for KMeansConfig {
    fn from(config: &ClusteringConfig) -> Self {
        Self {
            n_init: config.n_init,
            max_iter: config.max_iter,
            tolerance: config.tolerance,
            seed: config.seed,
        }
    }
}

/// Result of the best restart.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster index per row
    pub labels: Vec<usize>,
    /// One centre per cluster; empty clusters keep their last centre
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances to assigned centres
    pub inertia: f64,
    /// Lloyd iterations of the winning run
    pub iterations: usize,
}

impl KMeansFit {
    /// Row indices assigned to `cluster`, ascending.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Member count per cluster.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

pub struct KMeans {
    k: usize,
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(k: usize, config: KMeansConfig) -> Result<Self, TopicsError> {
        if k == 0 {
            return Err(TopicsError::InvalidInput("k must be at least 1".to_string()));
        }
        if config.n_init == 0 || config.max_iter == 0 {
            return Err(TopicsError::InvalidConfig(
                "n_init and max_iter must be at least 1".to_string(),
            ));
        }
        Ok(Self { k, config })
    }

    /// Partition `rows` into k clusters.
    ///
    /// Requires at least k rows of equal length.
    pub fn fit(&self, rows: &[Vec<f64>]) -> Result<KMeansFit, TopicsError> {
        if rows.len() < self.k {
            return Err(TopicsError::InvalidInput(format!(
                "{} rows cannot form {} clusters",
                rows.len(),
                self.k
            )));
        }

        let tol = self.config.tolerance * mean_variance(rows);
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut best: Option<KMeansFit> = None;
        for run in 0..self.config.n_init {
            let centres = seed_centres(rows, self.k, &mut rng);
            let fit = lloyd(rows, centres, self.config.max_iter, tol);
            trace!(run, inertia = fit.inertia, iterations = fit.iterations, "k-means run");

            // Strictly better only: the earliest run wins ties
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        let fit = best.ok_or_else(|| TopicsError::InvalidConfig("n_init is zero".to_string()))?;
        debug!(
            k = self.k,
            rows = rows.len(),
            inertia = fit.inertia,
            iterations = fit.iterations,
            "k-means converged"
        );
        Ok(fit)
    }
}

/// k-means++ seeding with `2 + ln k` local trials per centre.
fn seed_centres(rows: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let n = rows.len();
    let trials = 2 + (k as f64).ln() as usize;

    let first = rng.random_range(0..n);
    let mut centres = vec![rows[first].clone()];
    let mut closest: Vec<f64> = rows
        .iter()
        .map(|r| squared_distance(r, &centres[0]))
        .collect();
    let mut potential: f64 = closest.iter().sum();

    while centres.len() < k {
        let candidates: Vec<usize> = if potential > 0.0 {
            let cumulative: Vec<f64> = closest
                .iter()
                .scan(0.0, |acc, d| {
                    *acc += d;
                    Some(*acc)
                })
                .collect();
            (0..trials)
                .map(|_| {
                    let target = rng.random::<f64>() * potential;
                    cumulative.partition_point(|&c| c < target).min(n - 1)
                })
                .collect()
        } else {
            // Every row coincides with a centre
            (0..trials).map(|_| rng.random_range(0..n)).collect()
        };

        let mut chosen: Option<(usize, Vec<f64>, f64)> = None;
        for candidate in candidates {
            let distances: Vec<f64> = rows
                .iter()
                .zip(&closest)
                .map(|(r, &d)| d.min(squared_distance(r, &rows[candidate])))
                .collect();
            let candidate_potential: f64 = distances.iter().sum();
            if chosen
                .as_ref()
                .map_or(true, |(_, _, p)| candidate_potential < *p)
            {
                chosen = Some((candidate, distances, candidate_potential));
            }
        }

        let Some((index, distances, new_potential)) = chosen else {
            break;
        };
        centres.push(rows[index].clone());
        closest = distances;
        potential = new_potential;
    }

    centres
}

fn lloyd(rows: &[Vec<f64>], mut centres: Vec<Vec<f64>>, max_iter: usize, tol: f64) -> KMeansFit {
    let mut labels = assign(rows, &centres);
    let mut iterations = 0;

    for iter in 0..max_iter {
        let updated = update_centres(rows, &labels, &centres);
        let shift: f64 = centres
            .iter()
            .zip(&updated)
            .map(|(old, new)| squared_distance(old, new))
            .sum();
        centres = updated;
        iterations = iter + 1;

        let relabelled = assign(rows, &centres);
        let stable = relabelled == labels;
        labels = relabelled;
        if stable || shift <= tol {
            break;
        }
    }

    let inertia = rows
        .iter()
        .zip(&labels)
        .map(|(r, &label)| squared_distance(r, &centres[label]))
        .sum();

    KMeansFit {
        labels,
        centroids: centres,
        inertia,
        iterations,
    }
}

/// Nearest centre per row; the lowest index wins ties.
fn assign(rows: &[Vec<f64>], centres: &[Vec<f64>]) -> Vec<usize> {
    rows.iter()
        .map(|row| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (i, centre) in centres.iter().enumerate() {
                let d = squared_distance(row, centre);
                if d < best_distance {
                    best = i;
                    best_distance = d;
                }
            }
            best
        })
        .collect()
}

/// Mean of each cluster's members; an empty cluster keeps its centre.
fn update_centres(rows: &[Vec<f64>], labels: &[usize], centres: &[Vec<f64>]) -> Vec<Vec<f64>> {
    centres
        .iter()
        .enumerate()
        .map(|(cluster, previous)| {
            let members: Vec<&[f64]> = rows
                .iter()
                .zip(labels)
                .filter(|(_, &label)| label == cluster)
                .map(|(r, _)| r.as_slice())
                .collect();
            if members.is_empty() {
                previous.clone()
            } else {
                mean(&members)
            }
        })
        .collect()
}
