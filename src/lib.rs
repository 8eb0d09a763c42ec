//! # postalcode-gen
//!
//! **postalcode-gen** turns per-country postal-code specifications (JSON) into
//! generated source artifacts for a postal-code validation library: one
//! validator per country, one unit-test file per country that carries test
//! data, and a single factory dispatching on the ISO country code.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Specification documents: parsing, schema checks, identity injection
//! - **[`generator`]** - Fragment renderers, skeleton substitution, the registry and the run itself
//! - **[`config`]** - Optional `postalcode-gen.toml` with paths, layout and policies
//! - **[`linter`]** - Read-only checks over the specification directory
//! - **[`cli`]** - `generate` and `lint` commands
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(postalcode-gen)
//!     participant Config as config::resolve_config
//!     participant Gen as generator::generate_all
//!     participant Spec as spec::load_document
//!     participant FS as File System
//!
//!     CLI->>Config: resolve_config(--config, --spec-dir)
//!     Config-->>CLI: ResolvedConfig
//!     CLI->>Gen: generate_all(&config, dry_run)
//!     Gen->>FS: Read the three skeletons
//!     loop each family, then each <CC>.json
//!         Gen->>Spec: load_document(path)
//!         Spec-->>Gen: SpecDocument
//!         Gen->>Gen: into_spec(identity) → PostalCodeSpec
//!         Gen->>FS: Write {CC}PostalCode.gen.cs
//!         Gen->>FS: Write {CC}PostalCodeTests.gen.cs (if TestData)
//!         Gen->>Gen: Registry::register(CC)
//!     end
//!     Gen->>FS: Write PostalCodeFactory.gen.cs
//!     Gen-->>CLI: GenerationReport
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use postalcode_gen::config::resolve_config;
//! use postalcode_gen::generator::generate_all;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = resolve_config(None, Path::new("scripts"))?;
//! let report = generate_all(&config, false)?;
//! assert_eq!(report.validators.len(), report.registry.len() + report.overridden.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod spec;

pub use config::{resolve_config, GeneratorConfig, ResolvedConfig};
pub use generator::{generate_all, GenerationReport, Registry};
pub use spec::{load_spec, PostalCodeSpec, SpecDocument, SpecError};
