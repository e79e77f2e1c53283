use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::gene::Gene;
use crate::genotype::{VariantCall, is_rsid};
use crate::provider::Provider;

/// A JSON run description: which genes to analyze and where the genotypes come from.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default)]
    pub provider: Option<String>,
    /// Gene symbols; empty means every panel gene.
    #[serde(default)]
    pub genes: Vec<String>,
    #[serde(default)]
    pub calls: Vec<VariantCall>,
    /// Raw 23andMe or AncestryDNA export, relative to the config file.
    pub raw_data: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if let Some(raw) = &config.raw_data
            && raw.is_relative()
            && let Some(dir) = path.parent()
        {
            config.raw_data = Some(dir.join(raw));
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.provider()?;
        self.genes()?;

        for call in &self.calls {
            if !is_rsid(call.variant_id.trim()) {
                bail!("invalid variant id '{}': expected an rsID", call.variant_id);
            }
        }

        if self.calls.is_empty() && self.raw_data.is_none() {
            bail!("config must supply 'calls' or 'rawData'");
        }

        Ok(())
    }

    pub fn provider(&self) -> Result<Provider> {
        match &self.provider {
            Some(name) => name
                .parse::<Provider>()
                .with_context(|| format!("invalid provider: '{name}'")),
            None => Ok(Provider::Unknown),
        }
    }

    /// Requested genes, or the whole panel when none are listed.
    pub fn genes(&self) -> Result<Vec<Gene>> {
        if self.genes.is_empty() {
            return Ok(Gene::ALL.to_vec());
        }
        self.genes
            .iter()
            .map(|name| {
                name.parse::<Gene>()
                    .with_context(|| format!("invalid gene: '{name}'"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn valid_config_with_calls() {
        let json = r#"{
            "provider": "23andme",
            "genes": ["UGT1A1", "vkorc1"],
            "calls": [
                { "variantId": "rs4148323", "genotype": "A/A" },
                { "variantId": "rs9923231", "genotype": null }
            ]
        }"#;
        let f = write_config(json);
        let config = RunConfig::from_file(f.path()).unwrap();
        assert_eq!(config.provider().unwrap(), Provider::TwentyThreeAndMe);
        assert_eq!(config.genes().unwrap(), [Gene::Ugt1a1, Gene::Vkorc1]);
        assert_eq!(config.calls.len(), 2);
        assert_eq!(config.calls[1].genotype, None);
    }

    #[test]
    fn defaults_to_all_genes_and_unknown_provider() {
        let f = write_config(r#"{ "calls": [{ "variantId": "rs6025", "genotype": "GG" }] }"#);
        let config = RunConfig::from_file(f.path()).unwrap();
        assert_eq!(config.provider().unwrap(), Provider::Unknown);
        assert_eq!(config.genes().unwrap(), Gene::ALL);
    }

    #[test]
    fn raw_data_is_resolved_against_config_dir() {
        let f = write_config(r#"{ "rawData": "genome.txt" }"#);
        let config = RunConfig::from_file(f.path()).unwrap();
        let expected = f.path().parent().unwrap().join("genome.txt");
        assert_eq!(config.raw_data.as_deref(), Some(expected.as_path()));
    }

    #[test]
    fn invalid_gene() {
        let f = write_config(r#"{ "genes": ["CYP2D6"], "rawData": "x.txt" }"#);
        let err = RunConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("invalid gene"));
    }

    #[test]
    fn invalid_provider() {
        let f = write_config(r#"{ "provider": "myheritage", "rawData": "x.txt" }"#);
        let err = RunConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("invalid provider"));
    }

    #[test]
    fn invalid_variant_id() {
        let f = write_config(r#"{ "calls": [{ "variantId": "chr1:1000", "genotype": "AA" }] }"#);
        let err = RunConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("expected an rsID"));
    }

    #[test]
    fn no_input_source() {
        let f = write_config(r#"{ "genes": ["F5"] }"#);
        let err = RunConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("'calls' or 'rawData'"));
    }

    #[test]
    fn malformed_json() {
        let f = write_config("{ not json");
        let err = RunConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
