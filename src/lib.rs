//! # stackforge
//!
//! A deterministic generator for backend projects. One declarative
//! [`BackendStructure`](ir::BackendStructure) (tables, endpoints, auth
//! providers, payment products) goes in; a complete, internally consistent
//! TypeScript project comes out:
//!
//! - `prisma/schema.prisma` and an initial SQL migration
//! - one Express route module per endpoint, plus a route index
//! - Clerk auth middleware and a user-lifecycle webhook
//! - Stripe checkout client, webhook and product config
//! - `package.json`, `README.md`, `.env.example`
//!
//! ## Modules
//!
//! - [`ir`] - the structure and its JSON/YAML loading
//! - [`generator`] - the emitters and the project composer
//! - [`archive`] - zip packaging
//! - [`config`] - `stackforge.toml` and environment overrides
//! - [`logging`] - `tracing` subscriber setup
//! - [`cli`] - the `stackforge-gen` command line
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use stackforge::{generate_project, GeneratorConfig, MockStructureSource, StructureSource};
//!
//! let structure = MockStructureSource.structure_for("client invoicing")?;
//! let project = generate_project(&structure, &GeneratorConfig::default())?;
//! for file in project.resolved_files() {
//!     println!("{}", file.path);
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod generator;
pub mod ir;
pub mod logging;

pub use config::GeneratorConfig;
pub use generator::{generate_project, GeneratedProject, GenerationWarning};
pub use ir::{load_structure, BackendStructure, MockStructureSource, StructureSource};
