//! Modes of inheritance relevant to genotype scoring.

use std::fmt;
use std::str::FromStr;

use genolr_common::GenolrError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceMode {
    AutosomalDominant,
    AutosomalRecessive,
    XLinkedDominant,
    XLinkedRecessive,
}

impl InheritanceMode {
    pub const ALL: [InheritanceMode; 4] = [
        InheritanceMode::AutosomalDominant,
        InheritanceMode::AutosomalRecessive,
        InheritanceMode::XLinkedDominant,
        InheritanceMode::XLinkedRecessive,
    ];

    /// HPO term identifier of this mode.
    pub fn term_id(&self) -> &'static str {
        match self {
            InheritanceMode::AutosomalDominant  => "HP:0000006",
            InheritanceMode::AutosomalRecessive => "HP:0000007",
            InheritanceMode::XLinkedRecessive   => "HP:0001419",
            InheritanceMode::XLinkedDominant    => "HP:0001423",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            InheritanceMode::AutosomalDominant  => "autosomal_dominant",
            InheritanceMode::AutosomalRecessive => "autosomal_recessive",
            InheritanceMode::XLinkedDominant    => "x_linked_dominant",
            InheritanceMode::XLinkedRecessive   => "x_linked_recessive",
        }
    }

    /// Prose used in genotype explanations.
    pub fn description(&self) -> &'static str {
        match self {
            InheritanceMode::AutosomalDominant  => "autosomal dominant",
            InheritanceMode::AutosomalRecessive => "autosomal recessive",
            InheritanceMode::XLinkedDominant    => "X-chromosomal dominant",
            InheritanceMode::XLinkedRecessive   => "X-chromosomal recessive",
        }
    }

    /// Two causal alleles are expected for recessive modes.
    pub fn is_recessive(&self) -> bool {
        matches!(
            self,
            InheritanceMode::AutosomalRecessive | InheritanceMode::XLinkedRecessive
        )
    }

    /// Expected number of pathogenic alleles under the disease hypothesis (λ_disease).
    pub fn disease_lambda(&self) -> f64 {
        if self.is_recessive() {
            2.0
        } else {
            1.0
        }
    }
}

impl fmt::Display for InheritanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term_id())
    }
}

impl FromStr for InheritanceMode {
    type Err = GenolrError;

    /// Accepts the HPO CURIE (`HP:0000007`) or the snake-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        InheritanceMode::ALL
            .into_iter()
            .find(|mode| mode.term_id() == s || mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenolrError::UnknownInheritanceMode(s.to_string()))
    }
}

/// True when the mode list contains autosomal recessive inheritance.
pub fn includes_autosomal_recessive(modes: &[InheritanceMode]) -> bool {
    modes.contains(&InheritanceMode::AutosomalRecessive)
}
