use serde::Deserialize;

/// Indentation unit repeated once per nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent {
    unit: String,
}

impl Indent {
    pub fn new(unit: impl Into<String>) -> Self {
        Indent { unit: unit.into() }
    }

    /// Leading whitespace for a line at `depth`
    pub fn offset(&self, depth: usize) -> String {
        self.unit.repeat(depth)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::new("    ")
    }
}

/// Line terminator used between generated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Whitespace conventions shared by every fragment renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub indent: Indent,
    pub line_ending: LineEnding,
}

impl Layout {
    pub fn new(indent: Indent, line_ending: LineEnding) -> Self {
        Layout { indent, line_ending }
    }

    /// One indented line, without a terminator
    pub fn line(&self, depth: usize, text: &str) -> String {
        format!("{}{}", self.indent.offset(depth), text)
    }

    /// Join lines with the line ending; no trailing terminator.
    pub fn join<S: AsRef<str>>(&self, lines: &[S]) -> String {
        lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(self.line_ending.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_repeats_unit() {
        let indent = Indent::new("\t");
        assert_eq!(indent.offset(0), "");
        assert_eq!(indent.offset(3), "\t\t\t");
        assert_eq!(Indent::default().offset(2), "        ");
    }

    #[test]
    fn test_join_without_trailing_terminator() {
        let layout = Layout::new(Indent::new("  "), LineEnding::CrLf);
        let lines = vec![layout.line(1, "a"), layout.line(2, "b")];
        assert_eq!(layout.join(&lines), "  a\r\n    b");
        assert_eq!(layout.join::<String>(&[]), "");
    }
}
