#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod fixture_tree {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Sample specification directory shipped with the crate
    pub fn demo_scripts() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("demos")
            .join("scripts")
    }

    /// A temp copy of the demo tree laid out the way the default config
    /// expects: `scripts/` next to `src/PostalCodes/Generated` and
    /// `src/PostalCodes.UnitTests/Generated`.
    pub struct DemoTree {
        pub root: TempDir,
    }

    impl DemoTree {
        pub fn new() -> Self {
            let root = tempfile::tempdir().expect("create temp dir");
            let scripts = root.path().join("scripts");
            fs::create_dir_all(&scripts).unwrap();
            for entry in fs::read_dir(demo_scripts()).expect("read demo scripts") {
                let path = entry.unwrap().path();
                if path.is_file() {
                    fs::copy(&path, scripts.join(path.file_name().unwrap())).unwrap();
                }
            }
            fs::create_dir_all(root.path().join("src/PostalCodes/Generated")).unwrap();
            fs::create_dir_all(root.path().join("src/PostalCodes.UnitTests/Generated")).unwrap();
            DemoTree { root }
        }

        pub fn scripts(&self) -> PathBuf {
            self.root.path().join("scripts")
        }

        pub fn validator_dir(&self) -> PathBuf {
            self.root.path().join("src/PostalCodes/Generated")
        }

        pub fn test_dir(&self) -> PathBuf {
            self.root.path().join("src/PostalCodes.UnitTests/Generated")
        }

        pub fn factory(&self) -> PathBuf {
            self.validator_dir().join("PostalCodeFactory.gen.cs")
        }

        pub fn write_spec(&self, name: &str, content: &str) {
            fs::write(self.scripts().join(name), content).unwrap();
        }

        pub fn read(&self, path: &Path) -> String {
            fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
        }

        /// Every generated file under `dir`, sorted
        pub fn generated(&self, dir: &Path) -> Vec<String> {
            let mut names: Vec<_> = fs::read_dir(dir)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .filter(|n| n.ends_with(".gen.cs"))
                .collect();
            names.sort();
            names
        }
    }
}
