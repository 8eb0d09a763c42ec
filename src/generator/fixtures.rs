use super::layout::Layout;
use super::skeleton::Placeholder;
use crate::spec::TestFixture;
use serde::Deserialize;

/// Depth of each `[TestCase(...)]` line inside the test skeleton
pub const TEST_CASE_DEPTH: usize = 2;

/// How test-case lines accumulate within a category.
///
/// `LastEntryOnly` reproduces the historical generator, whose loop reassigned
/// the buffer on each entry so only the final case survived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixtureAccumulation {
    #[default]
    AllEntries,
    LastEntryOnly,
}

/// The six independent categories of a [`TestFixture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureCategory {
    Predecessor,
    Successor,
    Min,
    Max,
    Valid,
    Invalid,
}

impl FixtureCategory {
    pub const ALL: [FixtureCategory; 6] = [
        FixtureCategory::Predecessor,
        FixtureCategory::Successor,
        FixtureCategory::Min,
        FixtureCategory::Max,
        FixtureCategory::Valid,
        FixtureCategory::Invalid,
    ];

    pub fn placeholder(self) -> Placeholder {
        match self {
            FixtureCategory::Predecessor => Placeholder::TestsPredecessor,
            FixtureCategory::Successor => Placeholder::TestsSuccessor,
            FixtureCategory::Min => Placeholder::TestsMin,
            FixtureCategory::Max => Placeholder::TestsMax,
            FixtureCategory::Valid => Placeholder::TestsValid,
            FixtureCategory::Invalid => Placeholder::TestsInvalid,
        }
    }

    /// Key of the category inside `TestData`
    pub fn key(self) -> &'static str {
        match self {
            FixtureCategory::Predecessor => "Predecessor",
            FixtureCategory::Successor => "Successor",
            FixtureCategory::Min => "Min",
            FixtureCategory::Max => "Max",
            FixtureCategory::Valid => "Valid",
            FixtureCategory::Invalid => "Invalid",
        }
    }
}

/// Rendered blocks for the categories present in a fixture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureBlocks {
    blocks: Vec<(FixtureCategory, String)>,
}

impl FixtureBlocks {
    pub fn get(&self, category: FixtureCategory) -> Option<&str> {
        self.blocks
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, block)| block.as_str())
    }

    /// Categories that produced a block, in canonical order
    pub fn categories(&self) -> impl Iterator<Item = FixtureCategory> + '_ {
        self.blocks.iter().map(|(c, _)| *c)
    }

    /// Replacement for every test-skeleton category token.
    ///
    /// Absent categories map to an empty string so no token is left dangling.
    pub fn substitutions(&self) -> Vec<(Placeholder, &str)> {
        FixtureCategory::ALL
            .iter()
            .map(|c| (c.placeholder(), self.get(*c).unwrap_or("")))
            .collect()
    }
}

fn test_case(values: &[&str]) -> String {
    let args = values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!("[TestCase({args})]")
}

fn accumulate(lines: Vec<String>, layout: &Layout, policy: FixtureAccumulation) -> String {
    match policy {
        FixtureAccumulation::AllEntries => layout.join(&lines),
        FixtureAccumulation::LastEntryOnly => lines.last().cloned().unwrap_or_default(),
    }
}

/// Render one block per category present in `fixture`.
pub fn render_fixture(
    fixture: &TestFixture,
    layout: &Layout,
    policy: FixtureAccumulation,
) -> FixtureBlocks {
    let line = |values: &[&str]| layout.line(TEST_CASE_DEPTH, &test_case(values));
    let mut blocks = Vec::new();

    for category in FixtureCategory::ALL {
        let lines: Option<Vec<String>> = match category {
            FixtureCategory::Predecessor | FixtureCategory::Successor => {
                let pairs = if category == FixtureCategory::Predecessor {
                    fixture.predecessor.as_ref()
                } else {
                    fixture.successor.as_ref()
                };
                pairs.map(|map| {
                    map.iter()
                        .map(|(code, other)| line(&[code.as_str(), other.as_str()]))
                        .collect()
                })
            }
            FixtureCategory::Min => single_lines(fixture.min.as_deref(), &line),
            FixtureCategory::Max => single_lines(fixture.max.as_deref(), &line),
            FixtureCategory::Valid => single_lines(fixture.valid.as_deref(), &line),
            FixtureCategory::Invalid => single_lines(fixture.invalid.as_deref(), &line),
        };

        match lines {
            Some(lines) => blocks.push((category, accumulate(lines, layout, policy))),
            None => tracing::debug!(category = category.key(), "Skipping absent test category"),
        }
    }

    FixtureBlocks { blocks }
}

fn single_lines<F>(codes: Option<&[String]>, line: &F) -> Option<Vec<String>>
where
    F: Fn(&[&str]) -> String,
{
    codes.map(|codes| codes.iter().map(|code| line(&[code.as_str()])).collect())
}
