//! # Backend Structure (IR)
//!
//! The typed intermediate representation every emitter reads from:
//! tables, API endpoints, auth providers and payment products.
//!
//! Values are usually loaded from a JSON or YAML document with
//! [`load_structure`], or produced from a prompt by a [`StructureSource`].
//! The document shape uses camelCase keys:
//!
//! ```json
//! {
//!   "database": { "tables": [{ "name": "User", "fields": [], "relationships": [] }] },
//!   "api": { "endpoints": [{ "path": "/api/users", "method": "GET", "authentication": false }] },
//!   "auth": { "providers": [], "userFields": [] },
//!   "payments": { "products": [] }
//! }
//! ```

mod load;
mod source;
mod types;


pub use load::{load_structure, parse_structure_json, parse_structure_yaml};
pub use source::{saas_template, MockStructureSource, StructureSource};
pub use types::*;
