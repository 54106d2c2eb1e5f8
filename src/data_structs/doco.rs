use std::fmt::{
    self,
    Display,
};
use std::str::FromStr;

use anyhow::anyhow;
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

use super::coords::Span;
use super::enums::Strand;

/// Separates the domain tokens from the gene label.
pub const GENE_SEPARATOR: &str = ";;; ";
/// DoCo of count rows whose transcript is unknown to the dictionary.
pub const UNMATCHED_DOCO: &str = ";;;";
/// Separates domain tokens.
pub const DOMAIN_SEPARATOR: char = ',';

/// Domain Combination of a transcript: its phased domains plus its gene.
///
/// The string form is `<domain>,<domain>;;; <gene>`. A transcript without
/// valid domains is `;;; <gene>`, and the bucket for unknown transcripts is
/// the bare `;;;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DoCo {
    domains: Vec<String>,
    gene:    Option<String>,
}

impl DoCo {
    pub fn new<S: Into<String>>(
        domains: Vec<String>,
        gene: S,
    ) -> Self {
        Self {
            domains,
            gene: Some(gene.into()),
        }
    }

    pub fn domainless<S: Into<String>>(gene: S) -> Self {
        Self::new(Vec::new(), gene)
    }

    pub fn unmatched() -> Self { Self::default() }

    pub fn domains(&self) -> &[String] { &self.domains }

    pub fn gene(&self) -> Option<&str> { self.gene.as_deref() }

    pub fn is_domainless(&self) -> bool { self.domains.is_empty() }

    pub fn is_unmatched(&self) -> bool { self.gene.is_none() }
}

/// Token of a single domain inside a DoCo: the bare domain id, or
/// `domain::chrom:start-end(strand)` when coordinates are requested.
pub fn domain_token(
    domain: &str,
    chrom: &str,
    span: Option<Span>,
    strand: Strand,
    with_coordinates: bool,
) -> String {
    match (with_coordinates, span) {
        (true, Some(span)) => {
            format!(
                "{}::{}:{}-{}({})",
                domain,
                chrom,
                span.start(),
                span.end(),
                strand
            )
        },
        _ => domain.to_string(),
    }
}

impl Display for DoCo {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.gene {
            None => write!(f, "{}", UNMATCHED_DOCO),
            Some(gene) => {
                write!(
                    f,
                    "{}{}{}",
                    self.domains.iter().join(&DOMAIN_SEPARATOR.to_string()),
                    GENE_SEPARATOR,
                    gene
                )
            },
        }
    }
}

impl FromStr for DoCo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNMATCHED_DOCO {
            return Ok(Self::unmatched());
        }
        let (domains, gene) = s
            .split_once(GENE_SEPARATOR)
            .ok_or_else(|| anyhow!("Missing '{}' gene separator in DoCo '{}'", GENE_SEPARATOR, s))?;
        let domains = if domains.is_empty() {
            Vec::new()
        }
        else {
            domains
                .split(DOMAIN_SEPARATOR)
                .map(String::from)
                .collect()
        };
        Ok(Self::new(domains, gene))
    }
}

impl Serialize for DoCo {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DoCo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        DoCo::from_str(&s).map_err(serde::de::Error::custom)
    }
}
