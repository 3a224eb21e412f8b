//! Seeded random tableaux and digraphs.

use super::config::{RandomDigraphConfig, RandomTableauConfig, WeightDistribution};
use crate::digraph::{Action, ValuationDomain, ValuedDigraph};
use crate::error::Result;
use crate::tableau::{Criterion, Evaluation, PerformanceTableau, Threshold};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

fn padded(prefix: &str, i: usize, count: usize) -> String {
    let width = count.to_string().len();
    format!("{prefix}{i:0width$}")
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Beta(2, 2) variate: the median of three uniform draws.
fn beta22<R: Rng>(rng: &mut R) -> f64 {
    let mut u = [rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>()];
    u.sort_by(f64::total_cmp);
    u[1]
}

/// Random performance tableau generator.
pub struct RandomPerformanceTableau;

impl RandomPerformanceTableau {
    /// Generates a tableau; identical seeds give identical tableaux.
    pub fn generate(config: &RandomTableauConfig) -> Result<PerformanceTableau> {
        config.validate()?;
        let mut rng = create_rng(config.seed);

        let actions: Vec<Action> = (1..=config.actions)
            .map(|i| Action::new(padded("a", i, config.actions)).with_name(format!("action #{i}")))
            .collect();

        let (lo, hi) = config.scale;
        let amplitude = hi - lo;
        let criteria: Vec<Criterion> = (1..=config.criteria)
            .map(|j| {
                let weight = match config.weights {
                    WeightDistribution::Equisignificant => 1.0,
                    WeightDistribution::Random { min, max } => rng.random_range(min..=max) as f64,
                };
                let mut c = Criterion::new(padded("g", j, config.criteria), weight)
                    .with_scale(lo, hi)
                    .with_ind(Threshold::constant(round2(config.ind_percent * amplitude / 100.0)))
                    .with_pref(Threshold::constant(round2(config.pref_percent * amplitude / 100.0)));
                if let Some(v) = config.veto_percent {
                    c = c.with_veto(Threshold::constant(round2(v * amplitude / 100.0)));
                }
                c
            })
            .collect();

        let evaluation: Vec<Vec<Evaluation>> = (0..config.criteria)
            .map(|_| {
                (0..config.actions)
                    .map(|_| {
                        let x = round2(lo + beta22(&mut rng) * amplitude);
                        if rng.random_bool(config.missing_probability) {
                            Evaluation::NotApplicable
                        } else {
                            Evaluation::Number(x)
                        }
                    })
                    .collect()
            })
            .collect();

        debug!(
            event = "random_tableau",
            actions = config.actions,
            criteria = config.criteria,
            seed = ?config.seed,
        );
        Ok(PerformanceTableau::new(actions, criteria, evaluation)?.with_name("randomperftab"))
    }
}

/// Random valued digraph generator.
pub struct RandomValuedDigraph;

impl RandomValuedDigraph {
    /// Generates a digraph on actions `1..=order` in the normalised domain.
    pub fn generate(config: &RandomDigraphConfig) -> Result<ValuedDigraph> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let actions: Vec<Action> = (1..=config.order)
            .map(|i| Action::new(i.to_string()))
            .collect();
        let p = config.arc_probability;
        let valued = config.valued;
        ValuedDigraph::from_fn(actions, ValuationDomain::normalized(), |_, _| {
            let magnitude = if valued {
                rng.random_range(1..=100) as f64 / 100.0
            } else {
                1.0
            };
            if rng.random_bool(p) {
                magnitude
            } else {
                -magnitude
            }
        })
        .map(|g| g.with_name("randomValuationDigraph"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutrankingError;

    #[test]
    fn test_tableau_reproducible() {
        let config = RandomTableauConfig::default().with_seed(7);
        let t1 = RandomPerformanceTableau::generate(&config).unwrap();
        let t2 = RandomPerformanceTableau::generate(&config).unwrap();
        assert_eq!(t1, t2);
        assert_eq!(t1.order(), 13);
        assert_eq!(t1.criteria().len(), 7);
        assert_eq!(t1.actions()[0].id, "a01");
        assert_eq!(t1.criteria()[6].id, "g7");
    }

    #[test]
    fn test_tableau_values_on_scale() {
        let config = RandomTableauConfig::default()
            .with_seed(3)
            .with_missing_probability(0.0)
            .with_weights(WeightDistribution::Random { min: 1, max: 5 });
        let t = RandomPerformanceTableau::generate(&config).unwrap();
        for c in 0..t.criteria().len() {
            let w = t.criteria()[c].weight;
            assert!((1.0..=5.0).contains(&w));
            for a in 0..t.order() {
                let x = t.evaluation(c, a).value().unwrap();
                assert!((0.0..=100.0).contains(&x));
            }
        }
        assert_eq!(t.missing_rate(), 0.0);
    }

    #[test]
    fn test_tableau_all_missing() {
        let config = RandomTableauConfig::default()
            .with_seed(3)
            .with_missing_probability(1.0);
        let t = RandomPerformanceTableau::generate(&config).unwrap();
        assert_eq!(t.missing_rate(), 1.0);
    }

    #[test]
    fn test_digraph_reproducible_and_bounded() {
        let config = RandomDigraphConfig::default().with_order(6).with_seed(5);
        let g = RandomValuedDigraph::generate(&config).unwrap();
        assert_eq!(g, RandomValuedDigraph::generate(&config).unwrap());
        for a in 0..6 {
            assert_eq!(g.get(a, a), 0.0);
            for b in 0..6 {
                if a != b {
                    let v = g.get(a, b);
                    assert!(v != 0.0 && (-1.0..=1.0).contains(&v));
                }
            }
        }
    }

    #[test]
    fn test_digraph_arc_probability_extremes() {
        let full = RandomDigraphConfig::default()
            .with_order(5)
            .with_arc_probability(1.0)
            .with_valued(false)
            .with_seed(1);
        assert_eq!(RandomValuedDigraph::generate(&full).unwrap().size(), 20);
        let empty = full.clone().with_arc_probability(0.0);
        assert_eq!(RandomValuedDigraph::generate(&empty).unwrap().size(), 0);
    }

    #[test]
    fn test_digraph_bad_probability() {
        let config = RandomDigraphConfig::default().with_arc_probability(2.0);
        assert!(matches!(
            RandomValuedDigraph::generate(&config),
            Err(OutrankingError::DomainOverflow { .. })
        ));
    }
}
