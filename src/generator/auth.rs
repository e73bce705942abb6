use askama::Template;

use super::routes::{model_accessor, quoted};
use super::templates::{AuthMiddlewareTemplateData, AuthWebhookTemplateData, ProviderLine, TsField};
use super::type_map::ts_type;
use crate::ir::{Api, Auth, Table};

/// Routes served by the generated webhook handlers; always public.
pub const WEBHOOK_ROUTES: [&str; 2] = ["/api/webhook/clerk", "/api/webhook/stripe"];

/// The table the identity webhook writes to, matched case-insensitively on `user`.
pub fn user_table(tables: &[Table]) -> Option<&Table> {
    tables.iter().find(|t| t.name.eq_ignore_ascii_case("user"))
}

fn public_routes(api: &Api) -> Vec<String> {
    let mut routes: Vec<&str> = WEBHOOK_ROUTES.to_vec();
    for endpoint in api.endpoints.iter().filter(|e| !e.authentication) {
        if !routes.contains(&endpoint.path.as_str()) {
            routes.push(&endpoint.path);
        }
    }
    routes.into_iter().map(quoted).collect()
}

/// Render `src/middleware/auth.ts`: the Clerk middleware, the `requireAuth`
/// gate and the documented user-model extension fields.
pub fn render_auth_middleware(auth: &Auth, api: &Api) -> anyhow::Result<String> {
    let data = AuthMiddlewareTemplateData {
        public_routes: public_routes(api),
        providers: auth
            .providers
            .iter()
            .map(|p| ProviderLine {
                name: p.name.clone(),
                kind: if p.kind.is_empty() {
                    "unspecified".to_string()
                } else {
                    p.kind.clone()
                },
            })
            .collect(),
        user_fields: auth
            .user_fields
            .iter()
            .map(|f| TsField {
                name: f.name.clone(),
                ty: ts_type(&f.ty).to_string(),
                optional: f.is_optional(),
            })
            .collect(),
    };
    Ok(data.render()?)
}

/// Render the identity-provider webhook route handler.
///
/// Without a user table the handler still targets `prisma.user` and writes
/// both `email` and `name`.
pub fn render_auth_webhook(tables: &[Table]) -> anyhow::Result<String> {
    let data = match user_table(tables) {
        Some(table) => AuthWebhookTemplateData {
            user_model: model_accessor(&table.name),
            has_email: table.has_field("email"),
            has_name: table.has_field("name"),
        },
        None => AuthWebhookTemplateData {
            user_model: "user".to_string(),
            has_email: true,
            has_name: true,
        },
    };
    Ok(data.render()?)
}
