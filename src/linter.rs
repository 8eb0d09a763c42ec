//! # Specification Linter
//!
//! Checks every grouped and individual specification document the generator
//! would read, without rendering or writing anything.
//!
//! ## Checks Performed
//!
//! 1. **Read / parse / schema** - the document must be readable, parse and
//!    normalize (error, once per document)
//! 2. **Country codes** - every code must be two ASCII letters (error)
//! 3. **Duplicates** - a code produced by more than one source (warning under
//!    the overwrite policy, error under reject)
//! 4. **Quoted literals** - values containing `"` or a line break would break
//!    the emitted string literal (warning)
//! 5. **Fixture repeats** - the same code listed twice in one test category (info)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use postalcode_gen::config::resolve_config;
//! use postalcode_gen::linter::{lint_spec_dir, print_lint_issues};
//!
//! let config = resolve_config(None, Path::new("scripts"))?;
//! let issues = lint_spec_dir(&config)?;
//! print_lint_issues(&issues);
//! ```

use crate::config::ResolvedConfig;
use crate::generator::{collect_sources, format_fields, DuplicatePolicy, FieldValue, SpecSource};
use crate::spec::{parse_document, validate_country_code, CountryIdentity, SpecDocument, TestFixture};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Error - Will cause generation to fail or produce broken output
    Error,
    /// Warning - Generation succeeds but the result is likely wrong
    Warning,
    /// Info - Worth a look
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in a specification document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Where the issue occurred (e.g. "5Digits.json[US]", "GB.json:Formats[2].Name")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g. "invalid_country_code", "duplicate_country")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

fn file_label(source: &SpecSource) -> String {
    source
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.path().display().to_string())
}

fn read_document(path: &Path) -> Result<SpecDocument, (&'static str, String)> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| ("read_error", format!("Failed to read {}: {err}", path.display())))?;
    parse_document(&content).map_err(|err| ("parse_error", format!("{err:#}")))
}

/// Lint every document a generation run with `config` would read.
///
/// Only a failure to list the specification directory is returned as `Err`;
/// every per-document problem becomes a [`LintIssue`].
pub fn lint_spec_dir(config: &ResolvedConfig) -> anyhow::Result<Vec<LintIssue>> {
    let sources = collect_sources(&config.spec_dir, &config.families)?;
    let mut issues = Vec::new();

    // Read once per file; failures keep their issue kind
    let mut documents: HashMap<PathBuf, Result<SpecDocument, (&'static str, String)>> =
        HashMap::new();
    // First source seen for each code
    let mut seen: HashMap<String, String> = HashMap::new();

    for source in &sources {
        let code = source.artifact_code();
        let location = match source {
            SpecSource::Grouped { .. } => format!("{}[{}]", file_label(source), code),
            SpecSource::Individual(_) => file_label(source),
        };

        if validate_country_code(code).is_err() {
            issues.push(
                LintIssue::new(
                    &location,
                    LintSeverity::Error,
                    "invalid_country_code",
                    format!("'{code}' is not a two-letter country code"),
                )
                .with_suggestion("Use an ISO 3166-1 alpha-2 code such as 'DE'"),
            );
        }

        match seen.get(code) {
            Some(first) => {
                let severity = match config.duplicate_policy {
                    DuplicatePolicy::Overwrite => LintSeverity::Warning,
                    DuplicatePolicy::Reject => LintSeverity::Error,
                };
                issues.push(LintIssue::new(
                    &location,
                    severity,
                    "duplicate_country",
                    format!("'{code}' is also generated from {first}; the later source wins"),
                ));
            }
            None => {
                seen.insert(code.to_string(), location.clone());
            }
        }

        let first_visit = !documents.contains_key(source.path());
        let document = documents
            .entry(source.path().to_path_buf())
            .or_insert_with(|| read_document(source.path()));

        // Document problems are reported once, not once per grouped country
        if !first_visit {
            continue;
        }
        let document = match document {
            Ok(document) => document,
            Err((kind, message)) => {
                issues.push(LintIssue::new(
                    file_label(source),
                    LintSeverity::Error,
                    *kind,
                    message.clone(),
                ));
                continue;
            }
        };

        let identity = match source {
            SpecSource::Grouped { country, .. } => Some(CountryIdentity::from_code(country.as_str())),
            SpecSource::Individual(_) => None,
        };
        if let Err(err) = document.clone().into_spec(identity.as_ref()) {
            issues.push(LintIssue::new(
                file_label(source),
                LintSeverity::Error,
                "schema_error",
                err.to_string(),
            ));
        }

        lint_document(document, &file_label(source), &mut issues);
    }

    Ok(issues)
}

/// Content checks for a parsed document; `label` prefixes every location.
pub fn lint_document(document: &SpecDocument, label: &str, issues: &mut Vec<LintIssue>) {
    if let Some(code) = &document.country_code {
        if let Err(err) = validate_country_code(code) {
            issues.push(LintIssue::new(
                format!("{label}:CountryCodeAlpha2"),
                LintSeverity::Error,
                "invalid_country_code",
                err.to_string(),
            ));
        }
    }

    let mut literal_check = |location: String, value: &str| {
        if value.contains('"') || value.contains('\n') || value.contains('\r') {
            issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Warning,
                    "unquotable_value",
                    format!("{value:?} would break the emitted string literal"),
                )
                .with_suggestion("Remove the quote or line break; values are emitted verbatim"),
            );
        }
    };

    if let Some(name) = &document.country_name {
        literal_check(format!("{label}:CountryName"), name);
    }
    literal_check(
        format!("{label}:WhiteSpaceCharacters"),
        &document.white_space_characters,
    );
    for (i, format) in document.formats.iter().enumerate() {
        for field in format_fields(format) {
            let value = match field.value {
                FieldValue::Text(v) | FieldValue::Pattern(v) => v,
                FieldValue::Flag(_) => continue,
            };
            literal_check(format!("{label}:Formats[{i}].{}", field.key), value);
        }
    }

    if let Some(fixture) = &document.test_data {
        lint_fixture(fixture, label, issues);
    }
}

fn lint_fixture(fixture: &TestFixture, label: &str, issues: &mut Vec<LintIssue>) {
    let lists = [
        ("Min", fixture.min.as_ref()),
        ("Max", fixture.max.as_ref()),
        ("Valid", fixture.valid.as_ref()),
        ("Invalid", fixture.invalid.as_ref()),
    ];
    for (category, codes) in lists {
        let Some(codes) = codes else { continue };
        let mut seen = HashSet::new();
        for code in codes {
            if !seen.insert(code.as_str()) {
                issues.push(LintIssue::new(
                    format!("{label}:TestData.{category}"),
                    LintSeverity::Info,
                    "repeated_fixture_code",
                    format!("'{code}' is listed more than once"),
                ));
            }
        }
    }
}

/// True if any issue is an error
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Print lint issues in a human-readable format
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let errors: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .collect();
    let warnings: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Warning)
        .collect();
    let infos: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Info)
        .collect();

    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        errors.len(),
        warnings.len(),
        infos.len()
    );

    let sections = [
        ("❌ Errors (must fix):", errors),
        ("⚠️  Warnings (should fix):", warnings),
        ("ℹ️  Info:", infos),
    ];
    for (heading, group) in sections {
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}
