use super::types::{CountryIdentity, PostalCodeSpec, SpecDocument};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// A single-country document discovered next to the grouped family files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualSpec {
    /// Two-character file stem; names the generated artifacts and registry entry
    pub code: String,
    pub path: PathBuf,
}

/// Parse a specification document from JSON text.
pub fn parse_document(content: &str) -> anyhow::Result<SpecDocument> {
    let doc: SpecDocument = serde_json::from_str(content)?;
    Ok(doc)
}

/// Read and parse a specification document.
///
/// Parse failures and missing required `Format` fields are reported with the
/// offending path attached.
pub fn load_document(path: &Path) -> anyhow::Result<SpecDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read specification: {}", path.display()))?;
    parse_document(&content)
        .with_context(|| format!("Failed to parse specification: {}", path.display()))
}

/// Load a document and normalize it, optionally injecting a country identity.
pub fn load_spec(path: &Path, identity: Option<&CountryIdentity>) -> anyhow::Result<PostalCodeSpec> {
    let spec = load_document(path)?
        .into_spec(identity)
        .with_context(|| format!("Invalid specification: {}", path.display()))?;
    Ok(spec)
}

/// Returns the country code for `<CC>.json` file names, `None` otherwise.
pub fn individual_spec_code(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.chars().count() == 2 {
        Some(stem.to_string())
    } else {
        None
    }
}

/// List every two-character `.json` document in `dir`, sorted by code.
///
/// Family documents such as `5Digits.json` never match because their stems
/// are longer than two characters.
pub fn discover_individual_specs(dir: &Path) -> anyhow::Result<Vec<IndividualSpec>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list specification directory: {}", dir.display()))?;

    let mut specs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(code) = individual_spec_code(&path) {
            specs.push(IndividualSpec { code, path });
        }
    }
    specs.sort_by(|a, b| a.code.cmp(&b.code));
    Ok(specs)
}
