//! # Generator Module
//!
//! Turns a [`BackendStructure`](crate::ir::BackendStructure) into the full
//! source tree of a TypeScript backend: Prisma schema and SQL migration,
//! Express route modules, Clerk auth middleware and webhook, Stripe
//! integration, `package.json`, README and `.env.example`.
//!
//! ## Architecture
//!
//! ```text
//! BackendStructure → emitters (schema, migration, routes, auth, payments, manifest)
//!                  → Askama templates → GeneratedProject { files, warnings }
//! ```
//!
//! Each emitter is a pure function of part of the structure. The composer
//! ([`generate_project`]) calls them in a fixed order, so the same input
//! always yields byte-identical output.
//!
//! ## Consistency between artifacts
//!
//! - Table names become both Prisma models and `CREATE TABLE` names.
//! - A `many_to_one` relationship to `T` becomes the same `{t}Id` field in the
//!   schema and column in the migration (see [`foreign_key_field`]).
//! - A route module only exists for an endpoint whose path names a table, and
//!   it calls that table's Prisma accessor.
//! - The README and `.env.example` are rendered from one variable list
//!   ([`ENV_VARS`]).
//!
//! ## Gaps
//!
//! Nothing in the structure makes generation fail. Where an emitter cannot
//! honour the input (unknown field type, endpoint matching no table,
//! `many_to_many`, duplicate output path, ...) it falls back to a safe default
//! and a [`GenerationWarning`] is returned with the files.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stackforge::config::GeneratorConfig;
//! use stackforge::generator::{generate_project, write_project, WriteOptions};
//! use stackforge::ir::load_structure;
//!
//! let structure = load_structure("structure.json".as_ref())?;
//! let project = generate_project(&structure, &GeneratorConfig::default())?;
//! write_project(&project, "out".as_ref(), WriteOptions::default())?;
//! ```

mod auth;
mod manifest;
mod migration;
mod payments;
mod project;
mod routes;
mod schema;
mod templates;
mod type_map;
mod warnings;

pub use auth::{render_auth_middleware, render_auth_webhook, user_table, WEBHOOK_ROUTES};
pub use manifest::{
    render_env_template, render_package_json, render_prisma_client, render_readme, ENV_VARS,
};
pub use migration::{dependency_order, order_tables, render_migration, MigrationOrder, TableOrder};
pub use payments::{
    default_checkout_mode, render_payments_client, render_payments_config,
    render_payments_webhook,
};
pub use project::*;
pub use routes::{
    model_accessor, render_route, render_routes_index, resolve_owner, route_file_path,
    route_slug, Owner,
};
pub use schema::{foreign_key_field, render_schema, schema_field_line};
pub use type_map::*;
pub use warnings::GenerationWarning;
