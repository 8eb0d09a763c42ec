use super::skeleton::SkeletonKind;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Destinations for every generated artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub validator_dir: PathBuf,
    pub test_dir: PathBuf,
    pub factory_path: PathBuf,
}

impl OutputLayout {
    pub fn validator_path(&self, code: &str) -> PathBuf {
        self.validator_dir.join(format!("{code}PostalCode.gen.cs"))
    }

    pub fn test_path(&self, code: &str) -> PathBuf {
        self.test_dir.join(format!("{code}PostalCodeTests.gen.cs"))
    }

    pub fn factory_path(&self) -> &Path {
        &self.factory_path
    }
}

/// A finished artifact ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: SkeletonKind,
    pub path: PathBuf,
    pub text: String,
}

/// Write an artifact, truncating whatever is at its path.
///
/// The parent directory must already exist. With `dry_run` nothing is
/// written; the path is still reported.
pub fn write_artifact(artifact: &GeneratedArtifact, dry_run: bool) -> anyhow::Result<()> {
    let label = artifact.kind.label();
    if dry_run {
        println!("📝 Would write {label} → {:?}", artifact.path);
        return Ok(());
    }
    fs::write(&artifact.path, &artifact.text).with_context(|| {
        format!("Failed to write {label} artifact: {}", artifact.path.display())
    })?;
    tracing::info!(kind = label, path = %artifact.path.display(), bytes = artifact.text.len(), "Artifact written");
    println!("✅ Saved {label} → {:?}", artifact.path);
    Ok(())
}
