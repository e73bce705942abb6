mod compose;
mod write;

pub use compose::{
    generate_project, GeneratedProject, AUTH_MIDDLEWARE_PATH, AUTH_WEBHOOK_PATH,
    ENV_TEMPLATE_PATH, MIGRATION_PATH, PACKAGE_JSON_PATH, PAYMENTS_CLIENT_PATH,
    PAYMENTS_CONFIG_PATH, PAYMENTS_WEBHOOK_PATH, PRISMA_CLIENT_PATH, README_PATH,
    ROUTES_INDEX_PATH, SCHEMA_PATH,
};
pub use write::{write_project, WriteOptions, WriteReport};
