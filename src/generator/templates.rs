use askama::Template;

use crate::ir::HttpMethod;

/// One `model` block of the Prisma schema, fields already rendered.
#[derive(Debug, Clone)]
pub struct ModelBlock {
    /// Model name (the table name)
    pub name: String,
    /// Rendered field lines, in declaration order
    pub lines: Vec<String>,
}

/// One `CREATE TABLE` statement, columns already rendered.
#[derive(Debug, Clone)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<String>,
}

/// A single key of a zod request-body schema.
#[derive(Debug, Clone)]
pub struct BodyField {
    /// Object key, quoted when it is not a plain identifier
    pub key: String,
    /// zod validator expression
    pub validator: String,
}

/// A documented user-model extension field.
#[derive(Debug, Clone)]
pub struct TsField {
    pub name: String,
    pub ty: String,
    pub optional: bool,
}

/// A configured sign-in provider listed in the middleware comments.
#[derive(Debug, Clone)]
pub struct ProviderLine {
    pub name: String,
    pub kind: String,
}

/// An endpoint as listed in the README.
#[derive(Debug, Clone)]
pub struct EndpointDoc {
    pub method: String,
    pub path: String,
    pub authentication: bool,
    pub description: String,
}

/// A table as listed in the README.
#[derive(Debug, Clone)]
pub struct TableDoc {
    pub name: String,
    /// `name: Type` entries
    pub fields: Vec<String>,
}

/// An environment variable read by the generated project.
#[derive(Debug, Clone)]
pub struct EnvVar {
    pub name: String,
    /// Value written to `.env.example`, already quoted
    pub example: String,
}

/// Template data for `prisma/schema.prisma`
#[derive(Template)]
#[template(path = "schema.prisma.txt", escape = "none")]
pub struct SchemaTemplateData {
    pub models: Vec<ModelBlock>,
}

/// Template data for the initial SQL migration
#[derive(Template)]
#[template(path = "migration.sql.txt", escape = "none")]
pub struct MigrationTemplateData {
    pub tables: Vec<CreateTable>,
}

/// Template data for one route handler module
///
/// Contains everything the handler body, its validation schema and its
/// default-export route descriptor need.
#[derive(Template)]
#[template(path = "route.ts.txt", escape = "none")]
pub struct RouteTemplateData {
    /// Exported handler identifier (the route slug)
    pub handler_name: String,
    /// Name of the zod schema constant
    pub schema_name: String,
    pub method: HttpMethod,
    /// Endpoint path as declared, for the header comment
    pub endpoint_path: String,
    /// Single-line description, may be empty
    pub description: String,
    /// Descriptor path as a quoted string literal
    pub path_literal: String,
    /// Lower-case router method
    pub router_method: String,
    /// Failure log label as a quoted string literal
    pub log_label: String,
    /// Prisma client accessor of the owning model
    pub model: String,
    /// Whether the handler runs behind `requireAuth`
    pub authenticated: bool,
    /// Names imported from `express`
    pub express_imports: String,
    /// Type of the handler's `req` parameter
    pub request_type: String,
    /// POST/PUT validate a body
    pub validates_body: bool,
    /// PUT/DELETE address one record by identifier
    pub by_id: bool,
    /// Whether the endpoint declared a request body
    pub has_request_body: bool,
    pub body_fields: Vec<BodyField>,
    /// Path parameter carrying the record identifier
    pub id_param: String,
}

/// Template data for `src/routes/index.ts`
#[derive(Template)]
#[template(path = "routes_index.ts.txt", escape = "none")]
pub struct RoutesIndexTemplateData {
    /// Route module names, in registration order
    pub routes: Vec<String>,
}

/// Template data for `src/middleware/auth.ts`
#[derive(Template)]
#[template(path = "auth_middleware.ts.txt", escape = "none")]
pub struct AuthMiddlewareTemplateData {
    /// Quoted route literals that bypass authentication
    pub public_routes: Vec<String>,
    pub providers: Vec<ProviderLine>,
    pub user_fields: Vec<TsField>,
}

/// Template data for the identity-provider webhook handler
#[derive(Template)]
#[template(path = "auth_webhook.ts.txt", escape = "none")]
pub struct AuthWebhookTemplateData {
    /// Prisma client accessor of the user model
    pub user_model: String,
    pub has_email: bool,
    pub has_name: bool,
}

/// Template data for `src/lib/stripe.ts`
#[derive(Template)]
#[template(path = "payments_client.ts.txt", escape = "none")]
pub struct PaymentsClientTemplateData {
    /// Checkout mode used when the caller does not pass one
    pub default_mode: String,
}

/// Template for the payments webhook handler
#[derive(Template)]
#[template(path = "payments_webhook.ts.txt", escape = "none")]
pub struct PaymentsWebhookTemplate;

/// Template data for `src/config/stripe.ts`
#[derive(Template)]
#[template(path = "payments_config.ts.txt", escape = "none")]
pub struct PaymentsConfigTemplateData {
    /// Pretty-printed JSON of the product list
    pub products_json: String,
}

/// Template data for the generated README
#[derive(Template)]
#[template(path = "README.md.txt", escape = "none")]
pub struct ReadmeTemplateData {
    pub name: String,
    pub env_vars: Vec<EnvVar>,
    pub endpoints: Vec<EndpointDoc>,
    pub tables: Vec<TableDoc>,
}

/// Template data for `.env.example`
#[derive(Template)]
#[template(path = "env.example.txt", escape = "none")]
pub struct EnvTemplateData {
    pub env_vars: Vec<EnvVar>,
}

/// Template for the Prisma client singleton
#[derive(Template)]
#[template(path = "prisma_client.ts.txt", escape = "none")]
pub struct PrismaClientTemplate;
