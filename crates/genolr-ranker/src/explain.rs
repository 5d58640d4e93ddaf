//! Human-readable explanation of a genotype likelihood ratio.
//!
//! The text is embedded unescaped in the HTML report, so it carries inline
//! markup (`&lambda;`, `<sub>`, `<sup>`). Strict-mode penalties are never
//! shown; the explanation always reports the plain Poisson comparison.

use genolr_common::Result;

use crate::genotype::GenotypeEvidence;
use crate::inheritance::InheritanceMode;
use crate::likelihood::{
    clinvar_lr, GenotypeLikelihoodRatio, CLINVAR_PATHOGENIC_LR, EPSILON, MISSED_VARIANT_PROBABILITY,
};
use crate::poisson::PoissonModel;

impl GenotypeLikelihoodRatio {
    /// Explain the score [`Self::score_genotype`] gives for the same inputs.
    ///
    /// D and B are computed for the first listed mode of inheritance with the
    /// same effective background lambda the score uses.
    pub fn explain_genotype(
        &self,
        evidence: &GenotypeEvidence,
        modes: &[InheritanceMode],
        gene_id: &str,
    ) -> Result<String> {
        let observed = evidence.weighted_pathogenic_score_sum();
        let mut text = String::new();

        let mode = match modes.first() {
            Some(&mode) => {
                text.push_str(&format!("Mode of inheritance: {}. ", mode.description()));
                mode
            }
            None => {
                text.push_str("Mode of inheritance: not annotated, assuming autosomal dominant. ");
                InheritanceMode::AutosomalDominant
            }
        };

        let disease = self.disease_model(mode);
        let lambda_disease = disease.lambda();
        let lambda_background = match evidence.summary() {
            Some(summary) => self.effective_background_lambda(summary, gene_id),
            None => self.background_lambda(gene_id),
        };
        text.push_str(&format!(
            "Observed weighted pathogenic variant count: {:.2}. \
             &lambda;<sub>disease</sub>={}. &lambda;<sub>background</sub>={:.4}. ",
            observed, lambda_disease as u32, lambda_background
        ));

        if let Some(lr) = evidence.summary().and_then(|s| clinvar_lr(s, modes)) {
            if lr > CLINVAR_PATHOGENIC_LR {
                text.push_str(
                    "Genotype score set to LR=10<sup>6</sup> with two ClinVar pathogenic alleles \
                     and autosomal recessive mode of inheritance.",
                );
            } else {
                text.push_str("Genotype score set to LR=10<sup>3</sup> with one ClinVar pathogenic allele.");
            }
            return Ok(text);
        }

        // Chance of observing nothing even though this is the disease gene.
        let d = if observed < EPSILON {
            MISSED_VARIANT_PROBABILITY
        } else {
            disease.probability(observed)?
        };
        let b = PoissonModel::new(lambda_background)?.probability(observed)?;

        text.push_str(&format!("P(G|D)={d:.4}. P(G|&#172;D)={b:.4}"));
        if d > 0.0 && b > 0.0 {
            text.push_str(&format!(". log<sub>10</sub>(LR): {:.2}.", (d / b).log10()));
        } else {
            text.push('.');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use genolr_common::GenotypeConfig;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::background::MockBackgroundProvider;
    use crate::genotype::GeneVariantSummary;

    const GENE: &str = "NCBIGene:2200";

    fn engine(strict: bool) -> GenotypeLikelihoodRatio {
        let provider = MockBackgroundProvider::new()
            .with(GENE, 0.2)
            .with("NCBIGene:7157", 5.0);
        let config = GenotypeConfig { strict, ..Default::default() };
        GenotypeLikelihoodRatio::new(Arc::new(provider), config).unwrap()
    }

    fn summary(alleles: u32, weighted: f64) -> GeneVariantSummary {
        GeneVariantSummary::builder()
            .pathogenic_allele_count(alleles)
            .weighted_pathogenic_score_sum(weighted)
            .build()
            .unwrap()
    }

    #[test]
    fn test_general_explanation() {
        let text = engine(false)
            .explain_genotype(&summary(1, 0.8).into(), &[InheritanceMode::AutosomalDominant], GENE)
            .unwrap();
        assert_eq!(
            text,
            "Mode of inheritance: autosomal dominant. \
             Observed weighted pathogenic variant count: 0.80. \
             &lambda;<sub>disease</sub>=1. &lambda;<sub>background</sub>=0.2000. \
             P(G|D)=0.3950. P(G|&#172;D)=0.2426. log<sub>10</sub>(LR): 0.21."
        );
    }

    #[test]
    fn test_clinvar_dominant_explanation() {
        let evidence: GenotypeEvidence = GeneVariantSummary::builder()
            .clinvar_pathogenic_count(1)
            .pathogenic_allele_count(1)
            .weighted_pathogenic_score_sum(1.0)
            .build()
            .unwrap()
            .into();
        let text = engine(false)
            .explain_genotype(&evidence, &[InheritanceMode::AutosomalDominant], GENE)
            .unwrap();
        assert!(text.ends_with("Genotype score set to LR=10<sup>3</sup> with one ClinVar pathogenic allele."));
        assert!(!text.contains("P(G|D)"));
    }

    #[test]
    fn test_clinvar_recessive_explanation() {
        let evidence: GenotypeEvidence = GeneVariantSummary::builder()
            .clinvar_pathogenic_count(2)
            .pathogenic_allele_count(2)
            .weighted_pathogenic_score_sum(2.0)
            .build()
            .unwrap()
            .into();
        let text = engine(false)
            .explain_genotype(&evidence, &[InheritanceMode::AutosomalRecessive], GENE)
            .unwrap();
        assert!(text.starts_with("Mode of inheritance: autosomal recessive. "));
        assert!(text.contains("&lambda;<sub>disease</sub>=2."));
        assert!(text.contains("LR=10<sup>6</sup>"));
    }

    #[test]
    fn test_no_variant_uses_heuristic_d() {
        let text = engine(false)
            .explain_genotype(&GenotypeEvidence::NoVariantFound, &[InheritanceMode::AutosomalDominant], GENE)
            .unwrap();
        assert!(text.contains("count: 0.00."));
        assert!(text.ends_with("P(G|D)=0.0500. P(G|&#172;D)=0.8187. log<sub>10</sub>(LR): -1.21."));
    }

    #[test]
    fn test_explanation_uses_clamped_background() {
        let text = engine(false)
            .explain_genotype(&summary(2, 1.5).into(), &[InheritanceMode::XLinkedRecessive], "NCBIGene:7157")
            .unwrap();
        assert!(text.starts_with("Mode of inheritance: X-chromosomal recessive. "));
        assert!(text.contains("&lambda;<sub>background</sub>=2.0000."));
        assert!(text.ends_with("log<sub>10</sub>(LR): 0.00."));
    }

    #[test]
    fn test_strict_penalty_not_shown() {
        let e = engine(true);
        let evidence: GenotypeEvidence = summary(1, 0.9).into();
        let modes = [InheritanceMode::AutosomalRecessive];
        assert_eq!(e.score_genotype(&evidence, &modes, GENE).unwrap().value, -0.5);
        let text = e.explain_genotype(&evidence, &modes, GENE).unwrap();
        assert!(text.contains("log<sub>10</sub>(LR)"));
        assert!(!text.contains("-0.5"));
    }

    #[test]
    fn test_missing_mode_is_described() {
        let text = engine(false)
            .explain_genotype(&summary(1, 0.8).into(), &[], GENE)
            .unwrap();
        assert!(text.starts_with("Mode of inheritance: not annotated, assuming autosomal dominant. "));
        assert!(text.contains("&lambda;<sub>disease</sub>=1."));
    }

    #[test]
    fn test_ratio_consistent_with_score() {
        let e = engine(false);
        let evidence: GenotypeEvidence = summary(1, 0.8).into();
        let modes = [InheritanceMode::AutosomalDominant];
        let lr = e.score_and_explain(&evidence, &modes, GENE).unwrap();
        let shown = format!("log<sub>10</sub>(LR): {:.2}.", lr.log10().unwrap());
        assert!(lr.explanation.unwrap().ends_with(&shown));
    }

    #[test]
    fn test_recessive_ratio_consistent_with_score() {
        let e = engine(false);
        let evidence: GenotypeEvidence = summary(2, 1.9).into();
        let modes = [InheritanceMode::XLinkedRecessive];
        let lr = e.score_and_explain(&evidence, &modes, GENE).unwrap();
        let text = lr.explanation.unwrap();
        assert!(text.contains("&lambda;<sub>disease</sub>=2."));
        assert!(text.ends_with(&format!("log<sub>10</sub>(LR): {:.2}.", lr.value.log10())));
    }
}
