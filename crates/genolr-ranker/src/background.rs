//! Trait for population background-frequency data access.
//!
//! The background lambda of a gene is the expected sum of pathogenic-bin
//! variant weight in that gene among unaffected individuals (gnomAD). The
//! table is built elsewhere; the engine only reads it.

use std::collections::HashMap;

use genolr_common::{GenolrError, Result};

/// Trait for looking up background lambdas by gene identifier.
///
/// Implementations can use:
/// - A precomputed in-memory table (production)
/// - Mock data (testing)
pub trait BackgroundFrequencyProvider: Send + Sync {
    /// Background lambda for a gene, e.g. `NCBIGene:2200`.
    ///
    /// Returns None if the gene is not covered; callers fall back to a default.
    fn background_lambda(&self, gene_id: &str) -> Option<f64>;

    /// Number of genes with a background value.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── In-memory table ──────────────────────────────────────────────────────────

/// Immutable gene → background lambda map.
#[derive(Debug, Clone, Default)]
pub struct BackgroundFrequencyTable {
    lambdas: HashMap<String, f64>,
}

impl BackgroundFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a background lambda. Rejects negative or non-finite rates.
    pub fn insert(&mut self, gene_id: impl Into<String>, lambda: f64) -> Result<()> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(GenolrError::InvalidRate(lambda));
        }
        self.lambdas.insert(gene_id.into(), lambda);
        Ok(())
    }

    /// Builder-style insert.
    pub fn with(mut self, gene_id: &str, lambda: f64) -> Result<Self> {
        self.insert(gene_id, lambda)?;
        Ok(self)
    }

    /// Build a table from `(gene_id, lambda)` pairs, failing on the first invalid rate.
    pub fn try_from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (gene_id, lambda) in pairs {
            table.insert(gene_id, lambda)?;
        }
        Ok(table)
    }
}

impl BackgroundFrequencyProvider for BackgroundFrequencyTable {
    fn background_lambda(&self, gene_id: &str) -> Option<f64> {
        self.lambdas.get(gene_id).copied()
    }

    fn len(&self) -> usize {
        self.lambdas.len()
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock provider with hardcoded data for unit tests. Stores values as
/// given, so it can also hand the engine invalid rates.
pub struct MockBackgroundProvider {
    data: HashMap<String, f64>,
}

impl MockBackgroundProvider {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Add a gene background lambda.
    pub fn with(mut self, gene_id: &str, lambda: f64) -> Self {
        self.data.insert(gene_id.to_string(), lambda);
        self
    }
}

impl Default for MockBackgroundProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundFrequencyProvider for MockBackgroundProvider {
    fn background_lambda(&self, gene_id: &str) -> Option<f64> {
        self.data.get(gene_id).copied()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
