//! # Generator Module
//!
//! Turns postal-code specification documents into three kinds of artifact by
//! filling skeleton templates:
//!
//! - **Validator** - one `{CC}PostalCode.gen.cs` per country, embedding its
//!   format literals
//! - **Tests** - one `{CC}PostalCodeTests.gen.cs` per country that carries
//!   `TestData`
//! - **Factory** - a single `PostalCodeFactory.gen.cs` dispatching on country code
//!
//! ## Architecture
//!
//! ```text
//! Spec documents → SpecLoader → FormatRenderer / FixtureRenderer
//!                → Skeleton substitution → Emit → Registry → Factory
//! ```
//!
//! Every renderer is a pure function over the loaded data and a [`Layout`],
//! so output is byte-stable for a given input. The only state carried across
//! countries is the [`Registry`], which is threaded through the run
//! explicitly and consumed once to build the factory.
//!
//! ## Skeleton Tokens
//!
//! Each skeleton kind owns a closed set of `@@Token@@` placeholders (see
//! [`SkeletonKind::placeholders`]). Any token left after substitution is
//! rejected unless [`PlaceholderPolicy::Warn`] is configured.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use postalcode_gen::config::resolve_config;
//! use postalcode_gen::generator::generate_all;
//! use std::path::Path;
//!
//! let config = resolve_config(None, Path::new("scripts"))?;
//! let report = generate_all(&config, false)?;
//! println!("{} validators", report.validators.len());
//! ```

mod emit;
mod factory;
mod fixtures;
mod format;
mod layout;
mod pipeline;
mod registry;
mod skeleton;

pub use emit::*;
pub use factory::*;
pub use fixtures::*;
pub use format::*;
pub use layout::*;
pub use pipeline::*;
pub use registry::*;
pub use skeleton::*;
