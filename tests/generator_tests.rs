//! End-to-end generation over a copy of the demo specification tree

mod common;

use common::fixture_tree::DemoTree;
use postalcode_gen::config::resolve_config;
use postalcode_gen::generator::generate_all;
use std::fs;

const GROUPED: usize = 12 + 24 + 2 + 1;
const INDIVIDUAL: usize = 3; // CA, GB, NL

#[test]
fn test_full_run_counts() {
    let tree = DemoTree::new();
    let config = resolve_config(None, &tree.scripts()).unwrap();
    let report = generate_all(&config, false).unwrap();

    // NL is both grouped and individual
    assert_eq!(report.validators.len(), GROUPED + INDIVIDUAL);
    assert_eq!(report.registry.len(), GROUPED + INDIVIDUAL - 1);
    assert_eq!(report.overridden, vec!["NL".to_string()]);
    assert_eq!(report.tests.len(), 2);
    assert_eq!(report.factory.as_deref(), Some(tree.factory().as_path()));

    // One file per unique code plus the factory
    let validators = tree.generated(&tree.validator_dir());
    assert_eq!(validators.len(), report.registry.len() + 1);
    assert_eq!(
        tree.generated(&tree.test_dir()),
        vec!["GBPostalCodeTests.gen.cs", "NLPostalCodeTests.gen.cs"]
    );
}

#[test]
fn test_grouped_country_gets_code_as_name() {
    let tree = DemoTree::new();
    let config = resolve_config(None, &tree.scripts()).unwrap();
    generate_all(&config, false).unwrap();

    let de = tree.read(&tree.validator_dir().join("DEPostalCode.gen.cs"));
    assert!(de.contains("internal partial class DEPostalCode : AlphaNumericPostalCode"));
    assert!(de.contains("_countryName = \"DE\";"));
    assert!(de.contains("this(postalCode, \" -\", true)"));
    assert!(de.contains(
        "            new PostalCodeFormat {\n                Name = \"5-Digits - 99999\",\n"
    ));
    assert!(de.contains("RegexDefault = new Regex(\"^[0-9]{5}$\", RegexOptions.Compiled),"));
    assert!(de.contains("AutoConvertToShort = false,"));
    assert!(!de.contains("@@"));
}

#[test]
fn test_individual_document_overrides_group() {
    let tree = DemoTree::new();
    let config = resolve_config(None, &tree.scripts()).unwrap();
    generate_all(&config, false).unwrap();

    let nl = tree.read(&tree.validator_dir().join("NLPostalCode.gen.cs"));
    assert!(nl.contains("_countryName = \"Netherlands\";"));
    assert!(nl.contains("Name = \"NL : 9999 ZZ\","));
    assert!(nl.contains("AutoConvertToShort = true,"));
    assert!(!nl.contains("4-Digits"));
}

#[test]
fn test_factory_has_one_sorted_case_per_code() {
    let tree = DemoTree::new();
    let config = resolve_config(None, &tree.scripts()).unwrap();
    let report = generate_all(&config, false).unwrap();

    let factory = tree.read(&tree.factory());
    assert_eq!(factory.matches("case \"").count(), report.registry.len());
    assert_eq!(factory.matches("case \"NL\":").count(), 1);
    assert!(factory.contains(
        "                case \"GB\":\n                    return new GBPostalCode(postalCode);"
    ));
    let first = factory.find("case \"AS\":").unwrap();
    let last = factory.find("case \"VI\":").unwrap();
    assert!(first < last);
    assert!(!factory.contains("@@cases@@"));
}

#[test]
fn test_fixture_blocks_fill_every_occurrence() {
    let tree = DemoTree::new();
    let config = resolve_config(None, &tree.scripts()).unwrap();
    generate_all(&config, false).unwrap();

    let gb = tree.read(&tree.test_dir().join("GBPostalCodeTests.gen.cs"));
    assert!(gb.contains("internal class GBPostalCodeTests"));
    // Valid feeds three test methods
    assert_eq!(gb.matches("        [TestCase(\"ZZ9A9ZZ\")]").count(), 3);
    assert!(gb.contains("        [TestCase(\"Z999ZZ\",\"Z998\")]\n        [TestCase(\"ZZ9Z9ZZ\",\"ZZ9Z8\")]"));
    assert!(gb.contains("CreateCountry(\"GB\")"));
    assert!(!gb.contains("@@"));
}

#[test]
fn test_last_entry_only_keeps_one_case_per_category() {
    let tree = DemoTree::new();
    tree.write_spec(
        "postalcode-gen.toml",
        "fixture_accumulation = \"last-entry-only\"\n",
    );
    let config = resolve_config(None, &tree.scripts()).unwrap();
    generate_all(&config, false).unwrap();

    let gb = tree.read(&tree.test_dir().join("GBPostalCodeTests.gen.cs"));
    assert_eq!(gb.matches("[TestCase(\"ZZ9A9ZZ\")]").count(), 0);
    assert_eq!(gb.matches("[TestCase(\"Z29ZZ\")]").count(), 3);
    assert_eq!(gb.matches("[TestCase(\"Z999ZZ\",").count(), 0);
}

#[test]
fn test_generation_is_deterministic() {
    let tree = DemoTree::new();
    let config = resolve_config(None, &tree.scripts()).unwrap();

    generate_all(&config, false).unwrap();
    let first: Vec<_> = tree
        .generated(&tree.validator_dir())
        .iter()
        .map(|n| tree.read(&tree.validator_dir().join(n)))
        .collect();

    generate_all(&config, false).unwrap();
    let second: Vec<_> = tree
        .generated(&tree.validator_dir())
        .iter()
        .map(|n| tree.read(&tree.validator_dir().join(n)))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_dry_run_writes_nothing() {
    let tree = DemoTree::new();
    let config = resolve_config(None, &tree.scripts()).unwrap();
    let report = generate_all(&config, true).unwrap();

    assert_eq!(report.validators.len(), GROUPED + INDIVIDUAL);
    assert!(tree.generated(&tree.validator_dir()).is_empty());
    assert!(tree.generated(&tree.test_dir()).is_empty());
}

#[test]
fn test_missing_output_directory_fails() {
    let tree = DemoTree::new();
    fs::remove_dir(tree.test_dir()).unwrap();
    let config = resolve_config(None, &tree.scripts()).unwrap();

    let err = generate_all(&config, false).unwrap_err();
    assert!(
        format!("{err:#}").contains("Failed to write tests artifact"),
        "{err:#}"
    );
}

#[test]
fn test_missing_required_format_field_fails() {
    let tree = DemoTree::new();
    tree.write_spec(
        "XX.json",
        r#"{ "CountryCodeAlpha2": "XX", "CountryName": "Nowhere", "WhiteSpaceCharacters": "",
             "Formats": [ { "RegexDefault": "^[0-9]{3}$" } ] }"#,
    );
    let config = resolve_config(None, &tree.scripts()).unwrap();

    let err = generate_all(&config, false).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("XX.json"), "{message}");
    assert!(message.contains("Name"), "{message}");
}

#[test]
fn test_reject_policy_fails_on_override() {
    let tree = DemoTree::new();
    tree.write_spec("postalcode-gen.toml", "duplicate_policy = \"reject\"\n");
    let nl = tree.validator_dir().join("NLPostalCode.gen.cs");
    fs::write(&nl, "PREVIOUS").unwrap();
    let config = resolve_config(None, &tree.scripts()).unwrap();

    let err = generate_all(&config, false).unwrap_err();
    assert!(
        format!("{err:#}").contains("country 'NL' is already registered"),
        "{err:#}"
    );

    // The grouped NL output stands; the rejected NL.json left no trace
    let written = tree.read(&nl);
    assert!(written.contains("4-Digits"), "{written}");
    assert!(!written.contains("Netherlands"), "{written}");
    assert!(!tree.test_dir().join("NLPostalCodeTests.gen.cs").exists());
    assert!(!tree.factory().exists());
}

#[test]
fn test_token_text_in_document_is_emitted_verbatim() {
    let tree = DemoTree::new();
    tree.write_spec(
        "XX.json",
        r#"{ "CountryCodeAlpha2": "XX", "CountryName": "Mail @@Hub@@ Land", "WhiteSpaceCharacters": "",
             "Formats": [ { "Name": "XX : @@cases@@", "RegexDefault": "^[0-9]{3}$" } ] }"#,
    );
    let config = resolve_config(None, &tree.scripts()).unwrap();
    generate_all(&config, false).unwrap();

    let xx = tree.read(&tree.validator_dir().join("XXPostalCode.gen.cs"));
    assert!(xx.contains("_countryName = \"Mail @@Hub@@ Land\";"), "{xx}");
    assert!(xx.contains("Name = \"XX : @@cases@@\","), "{xx}");
    assert!(tree.read(&tree.factory()).contains("case \"XX\":"));
}

#[test]
fn test_custom_layout_and_families() {
    let tree = DemoTree::new();
    for name in ["CA.json", "GB.json", "NL.json"] {
        fs::remove_file(tree.scripts().join(name)).unwrap();
    }
    tree.write_spec(
        "postalcode-gen.toml",
        r#"
indent = "\t"
line_ending = "crlf"

[[families]]
file = "7Digits.json"
countries = ["JP"]
"#,
    );
    let config = resolve_config(None, &tree.scripts()).unwrap();
    let report = generate_all(&config, false).unwrap();
    assert_eq!(report.registry.len(), 1);

    let jp = tree.read(&tree.validator_dir().join("JPPostalCode.gen.cs"));
    assert!(jp.contains("\t\t\tnew PostalCodeFormat {\r\n\t\t\t\tName = \"7-Digits - 9999999\",\r\n"));

    let factory = tree.read(&tree.factory());
    assert!(factory.contains("\t\t\t\tcase \"JP\":\r\n\t\t\t\t\treturn new JPPostalCode(postalCode);"));
}
