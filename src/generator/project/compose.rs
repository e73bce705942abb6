use std::collections::{HashMap, HashSet};

use crate::config::GeneratorConfig;
use crate::generator::auth::{render_auth_middleware, render_auth_webhook, user_table};
use crate::generator::manifest::{
    render_env_template, render_package_json, render_prisma_client, render_readme,
};
use crate::generator::migration::{order_tables, render_migration};
use crate::generator::payments::{
    render_payments_client, render_payments_config, render_payments_webhook,
};
use crate::generator::routes::{
    render_route, render_routes_index, resolve_owner, route_file_path, route_slug, Owner,
};
use crate::generator::schema::render_schema;
use crate::generator::warnings::GenerationWarning;
use crate::ir::{BackendStructure, FieldType, FileContent, RelationshipKind, Table};

pub const SCHEMA_PATH: &str = "prisma/schema.prisma";
pub const MIGRATION_PATH: &str = "prisma/migrations/initial/migration.sql";
pub const ROUTES_INDEX_PATH: &str = "src/routes/index.ts";
pub const AUTH_MIDDLEWARE_PATH: &str = "src/middleware/auth.ts";
pub const AUTH_WEBHOOK_PATH: &str = "src/app/api/webhook/clerk/route.ts";
pub const PAYMENTS_CLIENT_PATH: &str = "src/lib/stripe.ts";
pub const PAYMENTS_WEBHOOK_PATH: &str = "src/app/api/webhook/stripe/route.ts";
pub const PAYMENTS_CONFIG_PATH: &str = "src/config/stripe.ts";
pub const PACKAGE_JSON_PATH: &str = "package.json";
pub const README_PATH: &str = "README.md";
pub const ENV_TEMPLATE_PATH: &str = ".env.example";
pub const PRISMA_CLIENT_PATH: &str = "src/lib/prisma.ts";

/// The ordered output of one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedProject {
    /// Files in emission order. Paths may repeat.
    pub files: Vec<FileContent>,
    pub warnings: Vec<GenerationWarning>,
}

impl GeneratedProject {
    /// Files as they end up on disk: one per path, at the path's first
    /// position, holding the content of its last occurrence.
    pub fn resolved_files(&self) -> Vec<&FileContent> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut resolved: Vec<&FileContent> = Vec::with_capacity(self.files.len());
        for file in &self.files {
            match index.get(file.path.as_str()) {
                Some(&i) => resolved[i] = file,
                None => {
                    index.insert(&file.path, resolved.len());
                    resolved.push(file);
                }
            }
        }
        resolved
    }

    pub fn file(&self, path: &str) -> Option<&FileContent> {
        self.files.iter().rev().find(|f| f.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

fn schema_warnings(tables: &[Table]) -> Vec<GenerationWarning> {
    let names: HashSet<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    let mut warnings = Vec::new();
    for table in tables {
        for field in &table.fields {
            if let FieldType::Unknown(raw) = &field.ty {
                warnings.push(GenerationWarning::UnknownFieldType {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    ty: raw.clone(),
                });
            }
        }
        for rel in &table.relationships {
            if !names.contains(rel.target_table.as_str()) {
                warnings.push(GenerationWarning::UnknownRelationshipTarget {
                    table: table.name.clone(),
                    target: rel.target_table.clone(),
                });
            }
            if rel.kind == RelationshipKind::ManyToMany {
                warnings.push(GenerationWarning::ManyToManyNotExpanded {
                    table: table.name.clone(),
                    target: rel.target_table.clone(),
                });
            }
        }
    }
    warnings
}

fn duplicate_warnings(files: &[FileContent]) -> Vec<GenerationWarning> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    files
        .iter()
        .filter(|f| !seen.insert(f.path.as_str()) && reported.insert(f.path.as_str()))
        .map(|f| GenerationWarning::DuplicatePath {
            path: f.path.clone(),
        })
        .collect()
}

/// Generate every artifact of the backend project described by `structure`.
///
/// Files come out in a fixed order: schema, migration, one route module per
/// endpoint that resolves to a table, route index, auth middleware, auth
/// webhook, payments client, payments webhook, payments config, package
/// manifest, README, environment template, Prisma client.
///
/// The structure itself never causes an error; gaps in it are reported as
/// [`GenerationWarning`]s. An `Err` means a template failed to render.
pub fn generate_project(
    structure: &BackendStructure,
    config: &GeneratorConfig,
) -> anyhow::Result<GeneratedProject> {
    let tables = &structure.database.tables;
    let mut files = Vec::new();
    let mut warnings = schema_warnings(tables);

    files.push(FileContent::new(SCHEMA_PATH, render_schema(tables)?));

    let order = order_tables(tables, config.migration_order);
    if !order.cycle.is_empty() {
        warnings.push(GenerationWarning::ForeignKeyCycle {
            tables: order.cycle.clone(),
        });
    }
    files.push(FileContent::new(MIGRATION_PATH, render_migration(&order.tables)?));

    let mut route_modules = Vec::new();
    for endpoint in &structure.api.endpoints {
        match resolve_owner(endpoint, tables) {
            Owner::Resolved(table) => {
                tracing::debug!(
                    method = %endpoint.method,
                    path = %endpoint.path,
                    model = %table.name,
                    "Generating route"
                );
                files.push(FileContent::new(
                    route_file_path(endpoint),
                    render_route(endpoint, table)?,
                ));
                let module = route_slug(&endpoint.path);
                if !route_modules.contains(&module) {
                    route_modules.push(module);
                }
            }
            Owner::Unresolved => warnings.push(GenerationWarning::UnresolvedEndpoint {
                method: endpoint.method,
                path: endpoint.path.clone(),
            }),
        }
    }
    files.push(FileContent::new(
        ROUTES_INDEX_PATH,
        render_routes_index(&route_modules)?,
    ));

    files.push(FileContent::new(
        AUTH_MIDDLEWARE_PATH,
        render_auth_middleware(&structure.auth, &structure.api)?,
    ));
    if user_table(tables).is_none() {
        warnings.push(GenerationWarning::MissingUserTable);
    }
    files.push(FileContent::new(AUTH_WEBHOOK_PATH, render_auth_webhook(tables)?));

    let products = &structure.payments.products;
    files.push(FileContent::new(
        PAYMENTS_CLIENT_PATH,
        render_payments_client(products)?,
    ));
    files.push(FileContent::new(PAYMENTS_WEBHOOK_PATH, render_payments_webhook()?));
    files.push(FileContent::new(
        PAYMENTS_CONFIG_PATH,
        render_payments_config(products)?,
    ));

    files.push(FileContent::new(
        PACKAGE_JSON_PATH,
        render_package_json(&config.package_name, &config.package_version)?,
    ));
    files.push(FileContent::new(
        README_PATH,
        render_readme(&config.package_name, structure)?,
    ));
    files.push(FileContent::new(ENV_TEMPLATE_PATH, render_env_template()?));
    files.push(FileContent::new(PRISMA_CLIENT_PATH, render_prisma_client()?));

    warnings.extend(duplicate_warnings(&files));
    for warning in &warnings {
        tracing::warn!(kind = warning.kind(), "{warning}");
    }
    tracing::info!(
        files = files.len(),
        warnings = warnings.len(),
        "Generated backend project"
    );

    Ok(GeneratedProject { files, warnings })
}
