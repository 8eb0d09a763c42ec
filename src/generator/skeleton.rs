use anyhow::Context;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

// Any `@@Word@@` token in a skeleton
#[allow(clippy::expect_used)]
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@@[A-Za-z][A-Za-z0-9_]*@@").expect("placeholder regex is valid"));

/// Named tokens understood by the skeleton templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    CountryCode,
    CountryName,
    WhiteSpaceCharacters,
    Formats,
    TestsPredecessor,
    TestsSuccessor,
    TestsMin,
    TestsMax,
    TestsValid,
    TestsInvalid,
    Cases,
}

impl Placeholder {
    /// Literal token as it appears in a skeleton
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::CountryCode => "@@CountryCode@@",
            Placeholder::CountryName => "@@CountryName@@",
            Placeholder::WhiteSpaceCharacters => "@@WhiteSpaceCharacters@@",
            Placeholder::Formats => "@@Formats@@",
            Placeholder::TestsPredecessor => "@@testsPredecessor@@",
            Placeholder::TestsSuccessor => "@@testsSuccessor@@",
            Placeholder::TestsMin => "@@testsMin@@",
            Placeholder::TestsMax => "@@testsMax@@",
            Placeholder::TestsValid => "@@testsValid@@",
            Placeholder::TestsInvalid => "@@testsInvalid@@",
            Placeholder::Cases => "@@cases@@",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The three skeletons the generator fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkeletonKind {
    Validator,
    Test,
    Factory,
}

impl SkeletonKind {
    /// Closed set of tokens a skeleton of this kind may contain
    pub fn placeholders(self) -> &'static [Placeholder] {
        match self {
            SkeletonKind::Validator => &[
                Placeholder::CountryCode,
                Placeholder::CountryName,
                Placeholder::WhiteSpaceCharacters,
                Placeholder::Formats,
            ],
            SkeletonKind::Test => &[
                Placeholder::CountryCode,
                Placeholder::TestsPredecessor,
                Placeholder::TestsSuccessor,
                Placeholder::TestsMin,
                Placeholder::TestsMax,
                Placeholder::TestsValid,
                Placeholder::TestsInvalid,
            ],
            SkeletonKind::Factory => &[Placeholder::Cases],
        }
    }

    pub fn accepts(self, placeholder: Placeholder) -> bool {
        self.placeholders().contains(&placeholder)
    }

    /// File name of the skeleton inside the templates directory
    pub fn file_name(self) -> &'static str {
        match self {
            SkeletonKind::Validator => "postalcode.cs.template",
            SkeletonKind::Test => "postalcodeunittests.cs.template",
            SkeletonKind::Factory => "postalcodefactory.cs.template",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkeletonKind::Validator => "validator",
            SkeletonKind::Test => "tests",
            SkeletonKind::Factory => "factory",
        }
    }
}

/// What to do with `@@Token@@` text still present after substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderPolicy {
    /// Fail the run
    #[default]
    Reject,
    /// Log a warning and keep going
    Warn,
}

/// Skeleton/generator drift detected during substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    /// A replacement was supplied for a token the skeleton kind does not own
    ForeignPlaceholder {
        kind: SkeletonKind,
        placeholder: Placeholder,
    },
    /// Tokens survived substitution
    Unresolved {
        /// Artifact being rendered (usually its destination path)
        artifact: String,
        tokens: Vec<String>,
    },
}

impl fmt::Display for SkeletonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkeletonError::ForeignPlaceholder { kind, placeholder } => write!(
                f,
                "{placeholder} is not a placeholder of the {} skeleton",
                kind.label()
            ),
            SkeletonError::Unresolved { artifact, tokens } => write!(
                f,
                "unresolved placeholders in {artifact}: {}",
                tokens.join(", ")
            ),
        }
    }
}

impl std::error::Error for SkeletonError {}

/// A loaded skeleton template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    kind: SkeletonKind,
    text: String,
}

impl Skeleton {
    pub fn from_text(kind: SkeletonKind, text: impl Into<String>) -> Self {
        Skeleton {
            kind,
            text: text.into(),
        }
    }

    /// Read the skeleton for `kind` from `dir`.
    pub fn load(dir: &Path, kind: SkeletonKind) -> anyhow::Result<Self> {
        let path = dir.join(kind.file_name());
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {} skeleton: {}", kind.label(), path.display()))?;
        Ok(Skeleton::from_text(kind, text))
    }

    pub fn kind(&self) -> SkeletonKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace each supplied token with its value.
    ///
    /// Replacement is literal and case-sensitive; every occurrence of a token
    /// is replaced in a single pass over the skeleton, so substituted values
    /// are never scanned for tokens. Tokens without a supplied value stay in
    /// the output; [`Skeleton::unresolved_after`] names them.
    pub fn substitute(&self, values: &[(Placeholder, &str)]) -> Result<String, SkeletonError> {
        if let Some((placeholder, _)) = values.iter().find(|(p, _)| !self.kind.accepts(*p)) {
            return Err(SkeletonError::ForeignPlaceholder {
                kind: self.kind,
                placeholder: *placeholder,
            });
        }
        let out = PLACEHOLDER_RE.replace_all(&self.text, |caps: &Captures<'_>| {
            let token = &caps[0];
            values
                .iter()
                .find(|(p, _)| p.token() == token)
                .map_or_else(|| token.to_string(), |(_, value)| (*value).to_string())
        });
        Ok(out.into_owned())
    }

    /// Distinct skeleton tokens, sorted, that `values` leaves unfilled
    pub fn unresolved_after(&self, values: &[(Placeholder, &str)]) -> Vec<String> {
        PLACEHOLDER_RE
            .find_iter(&self.text)
            .map(|m| m.as_str())
            .filter(|token| !values.iter().any(|(p, _)| p.token() == *token))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Substitute `values`, then apply `policy` to any skeleton token left unfilled.
    pub fn render(
        &self,
        values: &[(Placeholder, &str)],
        artifact: &str,
        policy: PlaceholderPolicy,
    ) -> Result<String, SkeletonError> {
        let text = self.substitute(values)?;
        check_unresolved(self.unresolved_after(values), artifact, policy)?;
        Ok(text)
    }
}

/// Apply `policy` to tokens a skeleton left unfilled.
pub fn check_unresolved(
    tokens: Vec<String>,
    artifact: &str,
    policy: PlaceholderPolicy,
) -> Result<(), SkeletonError> {
    if tokens.is_empty() {
        return Ok(());
    }
    match policy {
        PlaceholderPolicy::Reject => Err(SkeletonError::Unresolved {
            artifact: artifact.to_string(),
            tokens,
        }),
        PlaceholderPolicy::Warn => {
            tracing::warn!(artifact, tokens = ?tokens, "Unresolved placeholders left in artifact");
            Ok(())
        }
    }
}
