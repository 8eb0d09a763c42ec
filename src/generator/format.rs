use super::layout::Layout;
use crate::spec::Format;

/// Depth of the `new PostalCodeFormat {` line inside the validator skeleton
pub const FORMAT_DEPTH: usize = 3;

/// Value of a single field in the emitted format literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Quoted string literal
    Text(&'a str),
    /// Compiled, case-sensitive regular expression
    Pattern(&'a str),
    /// Bare boolean
    Flag(bool),
}

impl FieldValue<'_> {
    /// Source text for the right-hand side of the assignment
    pub fn literal(&self) -> String {
        match self {
            FieldValue::Text(s) => format!("\"{s}\""),
            FieldValue::Pattern(s) => format!("new Regex(\"{s}\", RegexOptions.Compiled)"),
            FieldValue::Flag(b) => b.to_string(),
        }
    }
}

/// A populated field of a [`Format`], in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatField<'a> {
    pub key: &'static str,
    pub value: FieldValue<'a>,
}

/// Populated fields of `format` in their fixed emission order.
///
/// `Name` and `RegexDefault` always come first; optional fields follow only
/// when present.
pub fn format_fields(format: &Format) -> Vec<FormatField<'_>> {
    let mut fields = vec![
        FormatField {
            key: "Name",
            value: FieldValue::Text(&format.name),
        },
        FormatField {
            key: "RegexDefault",
            value: FieldValue::Pattern(&format.regex_default),
        },
    ];

    let optional = [
        ("RegexShort", format.regex_short.as_deref().map(FieldValue::Pattern)),
        ("OutputDefault", format.output_default.as_deref().map(FieldValue::Text)),
        ("OutputShort", format.output_short.as_deref().map(FieldValue::Text)),
        ("AutoConvertToShort", format.auto_convert_to_short.map(FieldValue::Flag)),
        (
            "ShortExpansionAsLowestInRange",
            format.short_expansion_as_lowest_in_range.as_deref().map(FieldValue::Text),
        ),
        (
            "ShortExpansionAsHighestInRange",
            format.short_expansion_as_highest_in_range.as_deref().map(FieldValue::Text),
        ),
        (
            "LeftPaddingCharacter",
            format.left_padding_character.as_deref().map(FieldValue::Text),
        ),
        (
            "IgnoreLeftSubstring",
            format.ignore_left_substring.as_deref().map(FieldValue::Text),
        ),
    ];

    fields.extend(
        optional
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| FormatField { key, value })),
    );
    fields
}

/// Render one format as a `new PostalCodeFormat { ... }` literal.
pub fn render_format(format: &Format, layout: &Layout) -> String {
    let mut lines = Vec::with_capacity(12);
    lines.push(layout.line(FORMAT_DEPTH, "new PostalCodeFormat {"));
    for field in format_fields(format) {
        lines.push(layout.line(
            FORMAT_DEPTH + 1,
            &format!("{} = {},", field.key, field.value.literal()),
        ));
    }
    lines.push(layout.line(FORMAT_DEPTH, "}"));
    layout.join(&lines)
}

/// Render every format in declared order, separated by a comma and a line break.
pub fn render_formats(formats: &[Format], layout: &Layout) -> String {
    let separator = format!(",{}", layout.line_ending.as_str());
    formats
        .iter()
        .map(|f| render_format(f, layout))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::layout::{Indent, LineEnding};

    fn full_format() -> Format {
        Format {
            name: "US : 99999-9999".into(),
            regex_default: "^[0-9]{9}$".into(),
            regex_short: Some("^[0-9]{5}$".into()),
            output_default: Some("xxxxx-xxxx".into()),
            output_short: Some("xxxxx".into()),
            auto_convert_to_short: Some(true),
            short_expansion_as_lowest_in_range: Some("0000".into()),
            short_expansion_as_highest_in_range: Some("9999".into()),
            left_padding_character: Some("0".into()),
            ignore_left_substring: Some("US".into()),
        }
    }

    #[test]
    fn test_required_fields_only() {
        let rendered = render_format(&Format::new("Default", r"^\d{5}$"), &Layout::default());
        let expected = [
            "            new PostalCodeFormat {",
            "                Name = \"Default\",",
            "                RegexDefault = new Regex(\"^\\d{5}$\", RegexOptions.Compiled),",
            "            }",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let format = full_format();
        let keys: Vec<_> = format_fields(&format).iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            [
                "Name",
                "RegexDefault",
                "RegexShort",
                "OutputDefault",
                "OutputShort",
                "AutoConvertToShort",
                "ShortExpansionAsLowestInRange",
                "ShortExpansionAsHighestInRange",
                "LeftPaddingCharacter",
                "IgnoreLeftSubstring",
            ]
        );

        let rendered = render_format(&format, &Layout::default());
        assert!(rendered.contains("RegexShort = new Regex(\"^[0-9]{5}$\", RegexOptions.Compiled),"));
        assert!(rendered.contains("AutoConvertToShort = true,"));
        assert!(rendered.contains("IgnoreLeftSubstring = \"US\","));
        assert_eq!(rendered.lines().count(), 12);
    }

    #[test]
    fn test_each_optional_field_adds_exactly_one_line() {
        let base = Format::new("n", "^x$");
        let base_lines = render_format(&base, &Layout::default()).lines().count();

        let variants = [
            Format { regex_short: Some("^s$".into()), ..base.clone() },
            Format { output_default: Some("x".into()), ..base.clone() },
            Format { output_short: Some("x".into()), ..base.clone() },
            Format { auto_convert_to_short: Some(false), ..base.clone() },
            Format { short_expansion_as_lowest_in_range: Some("0".into()), ..base.clone() },
            Format { short_expansion_as_highest_in_range: Some("9".into()), ..base.clone() },
            Format { left_padding_character: Some("0".into()), ..base.clone() },
            Format { ignore_left_substring: Some("X".into()), ..base.clone() },
        ];
        for variant in &variants {
            let lines = render_format(variant, &Layout::default()).lines().count();
            assert_eq!(lines, base_lines + 1, "{variant:?}");
        }
    }

    #[test]
    fn test_render_formats_keeps_declared_order() {
        let layout = Layout::new(Indent::new("\t"), LineEnding::CrLf);
        let formats = vec![Format::new("first", "^1$"), Format::new("second", "^2$")];
        let rendered = render_formats(&formats, &layout);

        assert!(rendered.find("first").unwrap() < rendered.find("second").unwrap());
        assert!(rendered.contains("\t\t\t},\r\n\t\t\tnew PostalCodeFormat {"));
        assert!(rendered.ends_with("\t\t\t}"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let layout = Layout::default();
        let formats = vec![full_format(), Format::new("b", "^b$")];
        assert_eq!(render_formats(&formats, &layout), render_formats(&formats, &layout));
    }
}
