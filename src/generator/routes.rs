use askama::Template;
use serde_json::Value;

use super::templates::{BodyField, RouteTemplateData, RoutesIndexTemplateData};
use super::type_map::zod_type;
use crate::ir::{Endpoint, HttpMethod, Table};

/// Outcome of looking up the table an endpoint operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Owner<'a> {
    Resolved(&'a Table),
    Unresolved,
}

/// Find the owning table of an endpoint.
///
/// The first table (in input order) whose name appears, case-insensitively,
/// anywhere in the endpoint path. Tables with an empty name never match.
pub fn resolve_owner<'a>(endpoint: &Endpoint, tables: &'a [Table]) -> Owner<'a> {
    let path = endpoint.path.to_lowercase();
    tables
        .iter()
        .filter(|t| !t.name.is_empty())
        .find(|t| path.contains(&t.name.to_lowercase()))
        .map_or(Owner::Unresolved, Owner::Resolved)
}

/// Path parameter name if the segment is one (`:id`, `{id}` or `[id]`).
fn path_param(segment: &str) -> Option<&str> {
    if let Some(name) = segment.strip_prefix(':') {
        return Some(name);
    }
    segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .or_else(|| segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')))
}

fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Underscore-joined path segments: `/api/clients/:id` → `api_clients_id`.
///
/// Used for both the route file name and the exported handler identifier.
pub fn route_slug(path: &str) -> String {
    let slug = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| sanitize_segment(path_param(s).unwrap_or(s)))
        .collect::<Vec<_>>()
        .join("_");
    if slug.is_empty() {
        "root".to_string()
    } else {
        slug
    }
}

/// Relative path of the route module generated for an endpoint.
pub fn route_file_path(endpoint: &Endpoint) -> String {
    format!("src/routes/{}.ts", route_slug(&endpoint.path))
}

/// Prisma client accessor for a model: first character lower-cased.
pub fn model_accessor(model: &str) -> String {
    let mut chars = model.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Words a TypeScript `const` binding may not use.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "package",
    "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "await",
];

pub(crate) fn handler_identifier(slug: &str) -> String {
    if slug.starts_with(|c: char| c.is_ascii_digit()) || RESERVED_WORDS.contains(&slug) {
        format!("_{slug}")
    } else {
        slug.to_string()
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// JSON string literal, which is also a valid TypeScript string literal.
pub(crate) fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn body_fields(endpoint: &Endpoint) -> Vec<BodyField> {
    let Some(body) = &endpoint.request_body else {
        return Vec::new();
    };
    body.iter()
        .map(|(key, ty)| BodyField {
            key: if is_identifier(key) {
                key.clone()
            } else {
                quoted(key)
            },
            validator: match ty {
                Value::String(s) => zod_type(s),
                _ => "z.unknown()".to_string(),
            },
        })
        .collect()
}

/// Identifier parameter for PUT/DELETE and the descriptor path to register.
///
/// The last path parameter of the endpoint path; when there is none, `id`
/// is used and `/:id` is appended to the descriptor path.
fn identifier_route(endpoint: &Endpoint) -> (String, String) {
    let declared = endpoint
        .path
        .split('/')
        .filter_map(path_param)
        .last()
        .map(sanitize_segment);
    match declared {
        Some(param) => (param, express_path(&endpoint.path)),
        None => (
            "id".to_string(),
            format!("{}/:id", express_path(&endpoint.path).trim_end_matches('/')),
        ),
    }
}

/// Rewrite `{id}`/`[id]` parameters to Express `:id` form.
fn express_path(path: &str) -> String {
    path.split('/')
        .map(|s| match path_param(s) {
            Some(name) => format!(":{name}"),
            None => s.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Render the handler module for one endpoint against its owning table.
pub fn render_route(endpoint: &Endpoint, table: &Table) -> anyhow::Result<String> {
    let slug = route_slug(&endpoint.path);
    let handler_name = handler_identifier(&slug);
    let by_id = matches!(endpoint.method, HttpMethod::Put | HttpMethod::Delete);
    let validates_body = matches!(endpoint.method, HttpMethod::Post | HttpMethod::Put);
    let (id_param, route_path) = if by_id {
        identifier_route(endpoint)
    } else {
        ("id".to_string(), express_path(&endpoint.path))
    };
    let description = endpoint
        .description
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let data = RouteTemplateData {
        schema_name: format!("{handler_name}Schema"),
        handler_name,
        method: endpoint.method,
        endpoint_path: endpoint.path.clone(),
        description,
        path_literal: quoted(&route_path),
        router_method: endpoint.method.router_key().to_string(),
        log_label: quoted(&format!("{} {} failed:", endpoint.method, endpoint.path)),
        model: model_accessor(&table.name),
        authenticated: endpoint.authentication,
        express_imports: if endpoint.authentication {
            "Response".to_string()
        } else {
            "Request, Response".to_string()
        },
        request_type: if endpoint.authentication {
            "AuthenticatedRequest".to_string()
        } else {
            "Request".to_string()
        },
        validates_body,
        by_id,
        has_request_body: endpoint.request_body.is_some(),
        body_fields: body_fields(endpoint),
        id_param,
    };
    Ok(data.render()?)
}

/// Render `src/routes/index.ts`, registering each route module in order.
pub fn render_routes_index(route_modules: &[String]) -> anyhow::Result<String> {
    let rendered = RoutesIndexTemplateData {
        routes: route_modules.to_vec(),
    }
    .render()?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::{json, Map};

    fn endpoint(path: &str, method: HttpMethod) -> Endpoint {
        Endpoint {
            path: path.to_string(),
            method,
            description: String::new(),
            authentication: false,
            request_body: None,
            response_schema: Value::Null,
        }
    }

    fn table(name: &str) -> Table {
        Table {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_route_slug() {
        assert_eq!(route_slug("/api/clients"), "api_clients");
        assert_eq!(route_slug("/api/clients/:id"), "api_clients_id");
        assert_eq!(route_slug("/api/clients/{clientId}"), "api_clients_clientId");
        assert_eq!(route_slug("api//v1/users/"), "api_v1_users");
        assert_eq!(route_slug("/api/line-items"), "api_line_items");
        assert_eq!(route_slug("/"), "root");
    }

    #[test]
    fn test_handler_identifier_avoids_reserved_words() {
        assert_eq!(handler_identifier("api_clients"), "api_clients");
        assert_eq!(handler_identifier("2fa"), "_2fa");
        for word in ["delete", "new", "default", "class", "import", "export"] {
            assert_eq!(handler_identifier(&route_slug(&format!("/{word}"))), format!("_{word}"));
        }
    }

    #[test]
    fn test_reserved_slug_renders_valid_handler() {
        let owner = table("Delete");
        let rendered = render_route(&endpoint("/delete", HttpMethod::Get), &owner).unwrap();
        assert!(rendered.contains("export const _delete = async"));
        assert!(!rendered.contains("const delete "));
    }

    #[test]
    fn test_resolve_owner_first_match_in_input_order() {
        let tables = vec![table("User"), table("Client"), table("Invoice")];
        let ep = endpoint("/api/clients", HttpMethod::Get);
        match resolve_owner(&ep, &tables) {
            Owner::Resolved(t) => assert_eq!(t.name, "Client"),
            Owner::Unresolved => panic!("expected Client"),
        }
        let ep = endpoint("/API/INVOICES", HttpMethod::Get);
        assert!(matches!(resolve_owner(&ep, &tables), Owner::Resolved(t) if t.name == "Invoice"));
        let ep = endpoint("/api/health", HttpMethod::Get);
        assert_eq!(resolve_owner(&ep, &tables), Owner::Unresolved);
    }

    #[test]
    fn test_resolve_owner_skips_empty_names() {
        let tables = vec![table(""), table("User")];
        let ep = endpoint("/api/users", HttpMethod::Get);
        assert!(matches!(resolve_owner(&ep, &tables), Owner::Resolved(t) if t.name == "User"));
    }

    #[test]
    fn test_model_accessor() {
        assert_eq!(model_accessor("User"), "user");
        assert_eq!(model_accessor("OrderItem"), "orderItem");
        assert_eq!(model_accessor(""), "");
    }

    #[test]
    fn test_get_route_without_auth() {
        let out = render_route(&endpoint("/api/users", HttpMethod::Get), &table("User")).unwrap();
        assert!(out.contains("export const api_users = async (req: Request, res: Response)"));
        assert!(out.contains("await prisma.user.findMany()"));
        assert!(out.contains("handler: [api_users]"));
        assert!(out.contains("method: 'get' as const"));
        assert!(!out.contains("requireAuth"));
        assert!(!out.contains("zod"));
    }

    #[test]
    fn test_post_route_validates_before_create() {
        let mut ep = endpoint("/api/clients", HttpMethod::Post);
        ep.authentication = true;
        let mut body = Map::new();
        body.insert("name".to_string(), json!("string"));
        body.insert("email".to_string(), json!("string"));
        body.insert("phone".to_string(), json!("string?"));
        ep.request_body = Some(body);

        let out = render_route(&ep, &table("Client")).unwrap();
        assert!(out.contains("const api_clientsSchema = z.object({"));
        assert!(out.contains("  name: z.string(),"));
        assert!(out.contains("  email: z.string(),"));
        assert!(out.contains("  phone: z.string().optional(),"));
        assert!(!out.contains(".passthrough()"));

        let parse = out.find("api_clientsSchema.parse(req.body)").unwrap();
        let create = out.find("prisma.client.create(").unwrap();
        assert!(parse < create);
        assert!(out.contains("res.status(201).json(item)"));
        assert!(out.contains("res.status(400).json({ error: error.errors[0]?.message"));
        assert!(out.contains("handler: [requireAuth, api_clients]"));
        assert!(out.contains("req: AuthenticatedRequest"));
    }

    #[test]
    fn test_post_without_body_uses_passthrough() {
        let out = render_route(&endpoint("/api/clients", HttpMethod::Post), &table("Client"))
            .unwrap();
        assert!(out.contains("z.object({\n}).passthrough();"));
    }

    #[test]
    fn test_put_route_appends_id_param() {
        let out = render_route(&endpoint("/api/clients", HttpMethod::Put), &table("Client"))
            .unwrap();
        assert!(out.contains("const id = req.params.id;"));
        assert!(out.contains("prisma.client.update({ where: { id }, data })"));
        assert!(out.contains("path: \"/api/clients/:id\""));
        assert!(out.contains("error.code === 'P2025'"));
        assert!(out.contains("res.json(item);"));
    }

    #[test]
    fn test_delete_route_uses_declared_param() {
        let out = render_route(
            &endpoint("/api/clients/{clientId}", HttpMethod::Delete),
            &table("Client"),
        )
        .unwrap();
        assert!(out.contains("const id = req.params.clientId;"));
        assert!(out.contains("path: \"/api/clients/:clientId\""));
        assert!(out.contains("res.status(204).end();"));
        assert!(!out.contains("z.ZodError"));
    }

    #[test]
    fn test_500_never_echoes_error() {
        let out = render_route(&endpoint("/api/users", HttpMethod::Get), &table("User")).unwrap();
        assert!(out.contains("console.error(\"GET /api/users failed:\", error);"));
        assert!(out.contains("res.status(500).json({ error: 'Internal server error' });"));
    }

    #[test]
    fn test_routes_index() {
        let out =
            render_routes_index(&["api_clients".to_string(), "api_invoices".to_string()]).unwrap();
        assert!(out.contains("import route0 from './api_clients';"));
        assert!(out.contains("import route1 from './api_invoices';"));
        assert!(out.contains("router[route1.method](route1.path, ...route1.handler);"));
        assert!(out.contains("export default router;"));
    }
}
