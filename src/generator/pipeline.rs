//! End-to-end generation run.
//!
//! Grouped family documents are processed first, in configured order, with a
//! [`CountryIdentity`] injected per country. Individual `<CC>.json` documents
//! follow, sorted by code, so an individual document always overrides a
//! grouped country with the same code. The factory is rendered last from the
//! accumulated [`Registry`].

use super::emit::{write_artifact, GeneratedArtifact, OutputLayout};
use super::factory::render_cases;
use super::fixtures::{render_fixture, FixtureAccumulation};
use super::format::render_formats;
use super::layout::Layout;
use super::registry::{class_name_for, DuplicatePolicy, Registry};
use super::skeleton::{Placeholder, PlaceholderPolicy, Skeleton, SkeletonKind};
use crate::config::{FamilyConfig, ResolvedConfig};
use crate::spec::{
    discover_individual_specs, load_document, CountryIdentity, IndividualSpec, PostalCodeSpec,
    SpecDocument, TestFixture,
};
use anyhow::Context;
use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};

/// Where a country's specification comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// A shared family document reused for `country`
    Grouped { file: PathBuf, country: String },
    /// A single-country `<CC>.json` document
    Individual(IndividualSpec),
}

impl SpecSource {
    /// Code that names the generated artifacts and the registry entry
    pub fn artifact_code(&self) -> &str {
        match self {
            SpecSource::Grouped { country, .. } => country,
            SpecSource::Individual(spec) => &spec.code,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SpecSource::Grouped { file, .. } => file,
            SpecSource::Individual(spec) => &spec.path,
        }
    }
}

/// Every source of a run in processing order: families first, then individual documents.
pub fn collect_sources(spec_dir: &Path, families: &[FamilyConfig]) -> anyhow::Result<Vec<SpecSource>> {
    let mut sources = Vec::new();
    for family in families {
        let file = spec_dir.join(&family.file);
        for country in &family.countries {
            sources.push(SpecSource::Grouped {
                file: file.clone(),
                country: country.clone(),
            });
        }
    }
    sources.extend(
        discover_individual_specs(spec_dir)?
            .into_iter()
            .map(SpecSource::Individual),
    );
    Ok(sources)
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub validators: Vec<PathBuf>,
    pub tests: Vec<PathBuf>,
    pub factory: Option<PathBuf>,
    pub registry: Registry,
    /// Codes whose registry entry was replaced by a later source
    pub overridden: Vec<String>,
}

impl GenerationReport {
    fn record(&mut self, artifact: &GeneratedArtifact) {
        match artifact.kind {
            SkeletonKind::Validator => self.validators.push(artifact.path.clone()),
            SkeletonKind::Test => self.tests.push(artifact.path.clone()),
            SkeletonKind::Factory => self.factory = Some(artifact.path.clone()),
        }
    }
}

/// Loaded skeletons and settings shared by every country of a run
#[derive(Debug, Clone)]
pub struct GenerationContext {
    validator: Skeleton,
    tests: Skeleton,
    factory: Skeleton,
    layout: Layout,
    outputs: OutputLayout,
    fixture_accumulation: FixtureAccumulation,
    duplicate_policy: DuplicatePolicy,
    placeholder_policy: PlaceholderPolicy,
    dry_run: bool,
}

impl GenerationContext {
    /// Build a context from already-loaded skeletons.
    pub fn new(
        config: &ResolvedConfig,
        validator: Skeleton,
        tests: Skeleton,
        factory: Skeleton,
        dry_run: bool,
    ) -> Self {
        GenerationContext {
            validator,
            tests,
            factory,
            layout: config.layout.clone(),
            outputs: config.outputs.clone(),
            fixture_accumulation: config.fixture_accumulation,
            duplicate_policy: config.duplicate_policy,
            placeholder_policy: config.placeholder_policy,
            dry_run,
        }
    }

    /// Read the three skeletons from the configured templates directory.
    pub fn load(config: &ResolvedConfig, dry_run: bool) -> anyhow::Result<Self> {
        let dir = &config.templates_dir;
        Ok(GenerationContext::new(
            config,
            Skeleton::load(dir, SkeletonKind::Validator)?,
            Skeleton::load(dir, SkeletonKind::Test)?,
            Skeleton::load(dir, SkeletonKind::Factory)?,
            dry_run,
        ))
    }

    fn fill(
        &self,
        skeleton: &Skeleton,
        values: &[(Placeholder, &str)],
        path: PathBuf,
    ) -> anyhow::Result<GeneratedArtifact> {
        let text = skeleton.render(values, &path.display().to_string(), self.placeholder_policy)?;
        Ok(GeneratedArtifact {
            kind: skeleton.kind(),
            path,
            text,
        })
    }

    /// Fill the validator skeleton for `spec`, destined for `artifact_code`'s path.
    pub fn render_validator(
        &self,
        artifact_code: &str,
        spec: &PostalCodeSpec,
    ) -> anyhow::Result<GeneratedArtifact> {
        let formats = render_formats(&spec.formats, &self.layout);
        self.fill(
            &self.validator,
            &[
                (Placeholder::CountryCode, spec.country_code.as_str()),
                (Placeholder::CountryName, spec.country_name.as_str()),
                (Placeholder::WhiteSpaceCharacters, spec.white_space_characters.as_str()),
                (Placeholder::Formats, formats.as_str()),
            ],
            self.outputs.validator_path(artifact_code),
        )
    }

    /// Fill the test skeleton for `artifact_code`.
    pub fn render_tests(
        &self,
        artifact_code: &str,
        fixture: &TestFixture,
    ) -> anyhow::Result<GeneratedArtifact> {
        let blocks = render_fixture(fixture, &self.layout, self.fixture_accumulation);
        let mut values = vec![(Placeholder::CountryCode, artifact_code)];
        values.extend(blocks.substitutions());
        self.fill(&self.tests, &values, self.outputs.test_path(artifact_code))
    }

    /// Fill the factory skeleton with one case per registered country.
    pub fn render_factory(&self, registry: &Registry) -> anyhow::Result<GeneratedArtifact> {
        let cases = render_cases(registry, &self.layout);
        self.fill(
            &self.factory,
            &[(Placeholder::Cases, cases.as_str())],
            self.outputs.factory_path().to_path_buf(),
        )
    }

    /// Render, register and emit one country.
    ///
    /// Nothing is written until every artifact of the country has rendered and
    /// the registry has accepted its code, so a rejected duplicate leaves the
    /// earlier output untouched. Tests are only emitted when the spec carries
    /// test data.
    pub fn generate_country(
        &self,
        artifact_code: &str,
        spec: &PostalCodeSpec,
        report: &mut GenerationReport,
    ) -> anyhow::Result<()> {
        let validator = self.render_validator(artifact_code, spec)?;
        let tests = match &spec.test_fixture {
            Some(fixture) => Some(self.render_tests(artifact_code, fixture)?),
            None => {
                tracing::debug!(code = artifact_code, "No TestData; skipping test artifact");
                None
            }
        };

        let replaced = report.registry.register(
            artifact_code,
            class_name_for(artifact_code),
            self.duplicate_policy,
        )?;
        if replaced.is_some() {
            report.overridden.push(artifact_code.to_string());
        }

        for artifact in std::iter::once(validator).chain(tests) {
            write_artifact(&artifact, self.dry_run)?;
            report.record(&artifact);
        }
        Ok(())
    }

    /// Process every source from [`collect_sources`], then emit the factory.
    ///
    /// A family document is read once however many countries share it.
    pub fn run(&self, config: &ResolvedConfig) -> anyhow::Result<GenerationReport> {
        let mut report = GenerationReport::default();
        let mut documents: HashMap<PathBuf, SpecDocument> = HashMap::new();

        for source in collect_sources(&config.spec_dir, &config.families)? {
            let path = source.path();
            let document = match documents.entry(path.to_path_buf()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(load_document(path)?),
            };
            let identity = match &source {
                SpecSource::Grouped { country, .. } => Some(CountryIdentity::from_code(country.as_str())),
                SpecSource::Individual(_) => None,
            };
            let spec = document
                .clone()
                .into_spec(identity.as_ref())
                .with_context(|| format!("Invalid specification: {}", path.display()))?;
            self.generate_country(source.artifact_code(), &spec, &mut report)?;
        }

        let factory = self.render_factory(&report.registry)?;
        write_artifact(&factory, self.dry_run)?;
        report.record(&factory);

        Ok(report)
    }
}

/// Run a full generation with `config`.
pub fn generate_all(config: &ResolvedConfig, dry_run: bool) -> anyhow::Result<GenerationReport> {
    let context = GenerationContext::load(config, dry_run)?;
    let report = context.run(config)?;
    tracing::info!(
        validators = report.validators.len(),
        tests = report.tests.len(),
        countries = report.registry.len(),
        overridden = ?report.overridden,
        dry_run,
        "Generation complete"
    );
    Ok(report)
}
