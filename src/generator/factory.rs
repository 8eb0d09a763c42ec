use super::layout::Layout;
use super::registry::Registry;

/// Depth of each `case` label inside the factory skeleton's switch
pub const CASE_DEPTH: usize = 4;

/// Name of the argument every generated constructor receives
pub const POSTAL_CODE_ARG: &str = "postalCode";

/// Render the dispatch block: one case label and return per registered country.
pub fn render_cases(registry: &Registry, layout: &Layout) -> String {
    let mut lines = Vec::with_capacity(registry.len() * 2);
    for (code, class) in registry.iter() {
        lines.push(layout.line(CASE_DEPTH, &format!("case \"{code}\":")));
        lines.push(layout.line(
            CASE_DEPTH + 1,
            &format!("return new {class}({POSTAL_CODE_ARG});"),
        ));
    }
    layout.join(&lines)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::generator::registry::{class_name_for, DuplicatePolicy};

    #[test]
    fn test_one_case_block_per_code() {
        let mut registry = Registry::new();
        for code in ["US", "AT"] {
            registry
                .register(code, class_name_for(code), DuplicatePolicy::Overwrite)
                .unwrap();
        }
        let cases = render_cases(&registry, &Layout::default());
        let expected = [
            "                case \"AT\":",
            "                    return new ATPostalCode(postalCode);",
            "                case \"US\":",
            "                    return new USPostalCode(postalCode);",
        ]
        .join("\n");
        assert_eq!(cases, expected);
    }

    #[test]
    fn test_overwritten_code_appears_once_with_latest_class() {
        let mut registry = Registry::new();
        registry.register("XX", "FirstPostalCode", DuplicatePolicy::Overwrite).unwrap();
        registry.register("XX", "SecondPostalCode", DuplicatePolicy::Overwrite).unwrap();

        let cases = render_cases(&registry, &Layout::default());
        assert_eq!(cases.matches("case \"XX\":").count(), 1);
        assert!(cases.contains("return new SecondPostalCode(postalCode);"));
        assert!(!cases.contains("FirstPostalCode"));
    }

    #[test]
    fn test_empty_registry_renders_nothing() {
        assert_eq!(render_cases(&Registry::new(), &Layout::default()), "");
    }
}
