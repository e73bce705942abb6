//! # CLI Module
//!
//! Command-line front end of the generator, exposed as the `stackforge-gen`
//! binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! stackforge-gen generate --input structure.json --output my-backend
//! stackforge-gen generate --prompt "invoicing for freelancers" --output my-backend --archive my-backend.zip
//! ```
//!
//! Options:
//! - `--input <FILE>` / `--prompt <TEXT>` - Structure source (exactly one)
//! - `--output <DIR>` - Output directory
//! - `--archive <ZIP>` - Also write a zip of the project
//! - `--config <TOML>` - Generator config, defaults to `stackforge.toml` beside the input
//! - `--force` - Overwrite existing files
//! - `--dry-run` - Print what would be written
//! - `--migration-order <declared|dependency>` - Order of `CREATE TABLE` statements
//! - `--package-name <NAME>` - Name written to `package.json`
//!
//! ### `inspect`
//!
//! Lists every file a generation would produce, with its size, followed by
//! the warnings. Writes nothing.
//!
//! ### `mock`
//!
//! Prints the structure the mock source returns, handy as a starting point
//! for a hand-written input file:
//!
//! ```bash
//! stackforge-gen mock > structure.json
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands, OrderArg, StructureInput};
