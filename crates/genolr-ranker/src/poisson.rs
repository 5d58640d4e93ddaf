//! Poisson probability mass generalised to non-integer observations.
//!
//! The observed "count" is a sum of pathogenicity bin scores rather than a
//! literal allele count, so the factorial is replaced by Γ(k + 1):
//!
//! P(k; λ) = λ^k · e^(−λ) / Γ(k + 1)

use genolr_common::{GenolrError, Result};
use statrs::function::gamma::ln_gamma;

/// From here on ln Γ(k + 1) is expanded with Stirling's series and combined
/// with k·ln λ as k·ln(λ/k).
const STIRLING_THRESHOLD: f64 = 10.0;

/// Poisson model with a fixed rate. Immutable and `Copy`, so one instance
/// can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonModel {
    lambda: f64,
}

impl PoissonModel {
    /// Model for a disease with one expected pathogenic allele.
    pub const DOMINANT: PoissonModel = PoissonModel { lambda: 1.0 };
    /// Model for a disease with two expected pathogenic alleles.
    pub const RECESSIVE: PoissonModel = PoissonModel { lambda: 2.0 };

    /// Create a model with rate `lambda`. Rejects negative or non-finite rates.
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(GenolrError::InvalidRate(lambda));
        }
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Probability mass at `k`, which need not be an integer.
    ///
    /// Computed in log space to stay finite for large `k`. For λ = 0 the
    /// limit of the formula is used: 1 at k = 0, 0 elsewhere. For very large
    /// k the precision is bounded by that of k·ln(λ/k).
    pub fn probability(&self, k: f64) -> Result<f64> {
        if !k.is_finite() || k < 0.0 {
            return Err(GenolrError::InvalidObservation(k));
        }
        if self.lambda == 0.0 {
            return Ok(if k == 0.0 { 1.0 } else { 0.0 });
        }
        if k == 0.0 {
            return Ok((-self.lambda).exp());
        }
        let log_p = if k < STIRLING_THRESHOLD {
            k * self.lambda.ln() - self.lambda - ln_gamma(k + 1.0)
        } else {
            k * (self.lambda / k).ln() + (k - self.lambda)
                - 0.5 * (2.0 * std::f64::consts::PI * k).ln()
                - stirling_correction(k)
        };
        Ok(log_p.exp())
    }
}

/// ln Γ(k + 1) − (k·ln k − k + ½·ln 2πk), first three terms of the series.
fn stirling_correction(k: f64) -> f64 {
    let k2 = k * k;
    (1.0 / 12.0 - (1.0 / 360.0 - 1.0 / (1260.0 * k2)) / k2) / k
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factorial(n: u32) -> f64 {
        (1..=n).map(f64::from).product()
    }

    fn discrete_pmf(lambda: f64, k: u32) -> f64 {
        lambda.powi(k as i32) * (-lambda).exp() / factorial(k)
    }

    #[test]
    fn test_matches_discrete_pmf_on_integers() {
        for &lambda in &[0.05, 0.1, 0.5, 1.0, 2.0, 3.7, 10.0] {
            let model = PoissonModel::new(lambda).unwrap();
            for k in 0..=20u32 {
                let expected = discrete_pmf(lambda, k);
                let got = model.probability(f64::from(k)).unwrap();
                let tol = 1e-9 * expected.max(f64::MIN_POSITIVE);
                assert!(
                    (got - expected).abs() <= tol,
                    "lambda={lambda} k={k}: expected {expected}, got {got}"
                );
            }
        }
    }

    #[test]
    fn test_integer_mass_sums_to_one() {
        for &lambda in &[0.0, 0.1, 1.0, 2.0, 7.5] {
            let model = PoissonModel::new(lambda).unwrap();
            let total: f64 = (0..200).map(|k| model.probability(f64::from(k)).unwrap()).sum();
            assert!((total - 1.0).abs() < 1e-9, "lambda={lambda}: sum={total}");
        }
    }

    #[test]
    fn test_zero_rate_limit() {
        let model = PoissonModel::new(0.0).unwrap();
        assert_eq!(model.probability(0.0).unwrap(), 1.0);
        assert_eq!(model.probability(1.0).unwrap(), 0.0);
        assert_eq!(model.probability(0.3).unwrap(), 0.0);
    }

    #[test]
    fn test_fractional_observation() {
        // Γ(2.5) = 1.5 · 0.5 · √π
        let gamma_2_5 = 0.75 * std::f64::consts::PI.sqrt();
        let expected = 2.0f64.powf(1.5) * (-2.0f64).exp() / gamma_2_5;
        let got = PoissonModel::RECESSIVE.probability(1.5).unwrap();
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_large_observation_is_finite() {
        let p = PoissonModel::DOMINANT.probability(500.0).unwrap();
        assert!(p.is_finite());
        assert!(p >= 0.0);
    }

    #[test]
    fn test_series_agrees_with_ln_gamma_at_threshold() {
        for &k in &[STIRLING_THRESHOLD, 12.5, 40.0, 170.0] {
            let direct = k * 3.0f64.ln() - 3.0 - ln_gamma(k + 1.0);
            let got = PoissonModel::new(3.0).unwrap().probability(k).unwrap();
            assert!(
                (got.ln() - direct).abs() < 1e-9,
                "k={k}: ln p={} vs {direct}",
                got.ln()
            );
        }
    }

    #[test]
    fn test_huge_rate_and_observation() {
        // λ = k: the exponential terms cancel, leaving 1/√(2πk).
        let k = 1e300;
        let expected = (2.0 * std::f64::consts::PI * k).sqrt().recip();
        let got = PoissonModel::new(k).unwrap().probability(k).unwrap();
        assert!((got / expected - 1.0).abs() < 1e-9, "expected {expected}, got {got}");
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(PoissonModel::new(-1.0), Err(GenolrError::InvalidRate(_))));
        assert!(matches!(PoissonModel::new(f64::NAN), Err(GenolrError::InvalidRate(_))));
        assert!(matches!(
            PoissonModel::DOMINANT.probability(-0.1),
            Err(GenolrError::InvalidObservation(_))
        ));
    }

    #[test]
    fn test_canonical_models() {
        assert_eq!(PoissonModel::DOMINANT.lambda(), 1.0);
        assert_eq!(PoissonModel::RECESSIVE.lambda(), 2.0);
        assert_eq!(PoissonModel::new(2.0).unwrap(), PoissonModel::RECESSIVE);
    }
}
