use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A specification document as authored on disk.
///
/// Grouped documents (one per digit-count family) usually leave the identity
/// fields unset or carry placeholder values; the pipeline injects a
/// [`CountryIdentity`] per country before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpecDocument {
    #[serde(rename = "CountryCodeAlpha2", default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    pub white_space_characters: String,
    pub formats: Vec<Format>,
    #[serde(default)]
    pub test_data: Option<TestFixture>,
}

/// One recognized shape a country's postal code may take.
///
/// `Name` and `RegexDefault` are required; every other field is emitted only
/// when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Format {
    pub name: String,
    pub regex_default: String,
    pub regex_short: Option<String>,
    pub output_default: Option<String>,
    pub output_short: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub auto_convert_to_short: Option<bool>,
    pub short_expansion_as_lowest_in_range: Option<String>,
    pub short_expansion_as_highest_in_range: Option<String>,
    pub left_padding_character: Option<String>,
    pub ignore_left_substring: Option<String>,
}

impl Format {
    /// Minimal format with only the required fields set
    pub fn new(name: impl Into<String>, regex_default: impl Into<String>) -> Self {
        Format {
            name: name.into(),
            regex_default: regex_default.into(),
            ..Default::default()
        }
    }
}

/// Categorized test data attached to a specification.
///
/// Every category is optional and independent of the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestFixture {
    /// code → expected predecessor code
    pub predecessor: Option<IndexMap<String, String>>,
    /// code → expected successor code
    pub successor: Option<IndexMap<String, String>>,
    pub min: Option<Vec<String>>,
    pub max: Option<Vec<String>>,
    pub valid: Option<Vec<String>>,
    pub invalid: Option<Vec<String>>,
}

impl TestFixture {
    pub fn is_empty(&self) -> bool {
        self.predecessor.is_none()
            && self.successor.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.valid.is_none()
            && self.invalid.is_none()
    }
}

/// Country code and display name injected into a shared document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryIdentity {
    pub code: String,
    pub name: String,
}

impl CountryIdentity {
    /// Identity used for grouped families, where the display name is the code itself
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        CountryIdentity {
            name: code.clone(),
            code,
        }
    }
}

/// A normalized, render-ready specification for a single country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCodeSpec {
    pub country_code: String,
    pub country_name: String,
    pub white_space_characters: String,
    /// Declared order; the first entry is the country's default format
    pub formats: Vec<Format>,
    pub test_fixture: Option<TestFixture>,
}

/// Schema failures detected while normalizing a [`SpecDocument`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Neither the document nor an injected identity supplies a country code
    MissingCountryCode,
    /// Neither the document nor an injected identity supplies a country name
    MissingCountryName {
        /// Country code the name was expected for
        code: String,
    },
    /// The `Formats` list is empty
    EmptyFormats {
        /// Country code of the offending document
        code: String,
    },
    /// A country code that is not two ASCII letters
    InvalidCountryCode {
        code: String,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::MissingCountryCode => {
                write!(f, "specification has no CountryCodeAlpha2 and none was injected")
            }
            SpecError::MissingCountryName { code } => {
                write!(f, "specification for '{code}' has no CountryName and none was injected")
            }
            SpecError::EmptyFormats { code } => {
                write!(f, "specification for '{code}' declares no Formats (at least one is required)")
            }
            SpecError::InvalidCountryCode { code } => {
                write!(f, "'{code}' is not a two-letter country code")
            }
        }
    }
}

impl std::error::Error for SpecError {}

/// Check that `code` is two ASCII letters.
pub fn validate_country_code(code: &str) -> Result<(), SpecError> {
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(SpecError::InvalidCountryCode {
            code: code.to_string(),
        })
    }
}

impl SpecDocument {
    /// Normalize into a [`PostalCodeSpec`].
    ///
    /// An injected identity overrides whatever the document carries, which is
    /// how grouped family documents are reused for every country in the group.
    pub fn into_spec(self, identity: Option<&CountryIdentity>) -> Result<PostalCodeSpec, SpecError> {
        let (country_code, country_name) = match identity {
            Some(id) => (id.code.clone(), id.name.clone()),
            None => {
                let code = self.country_code.ok_or(SpecError::MissingCountryCode)?;
                let name = self
                    .country_name
                    .ok_or_else(|| SpecError::MissingCountryName { code: code.clone() })?;
                (code, name)
            }
        };

        if self.formats.is_empty() {
            return Err(SpecError::EmptyFormats { code: country_code });
        }

        Ok(PostalCodeSpec {
            country_code,
            country_name,
            white_space_characters: self.white_space_characters,
            formats: self.formats,
            test_fixture: self.test_data,
        })
    }
}

/// Accepts `true`/`false` either as JSON booleans or as strings, since the
/// documents have historically carried both.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "AutoConvertToShort must be true or false, got '{other}'"
            ))),
        },
    }
}
