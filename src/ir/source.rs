//! Producers of [`BackendStructure`] values from free-text prompts.
//!
//! Turning a prompt into a structure is a black box to the generator. The
//! only implementation shipped here is [`MockStructureSource`], which returns
//! the same SaaS template for every prompt.

use super::types::{
    Api, Auth, AuthProvider, BackendStructure, Constraint, Database, Endpoint, Field, FieldType,
    HttpMethod, Payments, Product, ProductKind, Relationship, RelationshipKind, Table,
};
use serde_json::{json, Map, Value};

/// Anything that can turn a prompt into a backend structure.
pub trait StructureSource {
    fn structure_for(&self, prompt: &str) -> anyhow::Result<BackendStructure>;
}

/// Returns the fixed client-invoicing SaaS template regardless of the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockStructureSource;

impl StructureSource for MockStructureSource {
    fn structure_for(&self, prompt: &str) -> anyhow::Result<BackendStructure> {
        tracing::debug!(prompt_len = prompt.len(), "Using mock structure template");
        Ok(saas_template())
    }
}

fn field(name: &str, ty: FieldType, constraints: &[Constraint]) -> Field {
    Field {
        name: name.to_string(),
        ty,
        constraints: constraints.to_vec(),
    }
}

fn id_field() -> Field {
    field(
        "id",
        FieldType::String,
        &[Constraint::PrimaryKey, Constraint::DefaultGeneratedId],
    )
}

fn created_at() -> Field {
    field("createdAt", FieldType::DateTime, &[Constraint::DefaultNow])
}

fn many_to_one(table: &str) -> Relationship {
    Relationship {
        target_table: table.to_string(),
        kind: RelationshipKind::ManyToOne,
    }
}

fn body(pairs: &[(&str, &str)]) -> Option<Map<String, Value>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect(),
    )
}

fn endpoint(
    path: &str,
    method: HttpMethod,
    description: &str,
    request_body: Option<Map<String, Value>>,
    response_schema: Value,
) -> Endpoint {
    Endpoint {
        path: path.to_string(),
        method,
        description: description.to_string(),
        authentication: true,
        request_body,
        response_schema,
    }
}

/// The client-invoicing template: users own clients, clients own invoices.
pub fn saas_template() -> BackendStructure {
    let list_schema = json!({ "type": "array", "items": { "type": "object", "properties": { "id": "string" } } });
    let item_schema = json!({ "type": "object", "properties": { "id": "string" } });

    BackendStructure {
        database: Database {
            tables: vec![
                Table {
                    name: "User".to_string(),
                    fields: vec![
                        id_field(),
                        field("email", FieldType::String, &[Constraint::Unique]),
                        field("name", FieldType::String, &[]),
                        created_at(),
                    ],
                    relationships: vec![],
                },
                Table {
                    name: "Client".to_string(),
                    fields: vec![
                        id_field(),
                        field("name", FieldType::String, &[]),
                        field("email", FieldType::String, &[]),
                        field("phone", FieldType::String, &[Constraint::Optional]),
                        created_at(),
                    ],
                    relationships: vec![many_to_one("User")],
                },
                Table {
                    name: "Invoice".to_string(),
                    fields: vec![
                        id_field(),
                        field("amount", FieldType::Decimal, &[]),
                        field(
                            "status",
                            FieldType::String,
                            &[Constraint::Other("@default(\"draft\")".to_string())],
                        ),
                        field("dueDate", FieldType::DateTime, &[]),
                        created_at(),
                    ],
                    relationships: vec![many_to_one("Client"), many_to_one("User")],
                },
            ],
        },
        api: Api {
            endpoints: vec![
                endpoint(
                    "/api/clients",
                    HttpMethod::Get,
                    "Get all clients for the authenticated user",
                    None,
                    list_schema.clone(),
                ),
                endpoint(
                    "/api/clients",
                    HttpMethod::Post,
                    "Create a new client",
                    body(&[("name", "string"), ("email", "string"), ("phone", "string?")]),
                    item_schema.clone(),
                ),
                endpoint(
                    "/api/invoices",
                    HttpMethod::Get,
                    "Get all invoices",
                    None,
                    list_schema,
                ),
                endpoint(
                    "/api/invoices",
                    HttpMethod::Post,
                    "Create a new invoice",
                    body(&[
                        ("clientId", "string"),
                        ("amount", "number"),
                        ("dueDate", "string"),
                    ]),
                    item_schema,
                ),
            ],
        },
        auth: Auth {
            providers: vec![
                AuthProvider {
                    name: "email".to_string(),
                    kind: "email".to_string(),
                    config: json!({}),
                },
                AuthProvider {
                    name: "google".to_string(),
                    kind: "oauth".to_string(),
                    config: json!({}),
                },
            ],
            user_fields: vec![
                field("email", FieldType::String, &[]),
                field("name", FieldType::String, &[]),
                field("avatar", FieldType::String, &[Constraint::Optional]),
            ],
        },
        payments: Payments {
            products: vec![
                Product {
                    name: "Basic Plan".to_string(),
                    kind: ProductKind::Subscription,
                    price_description: "$10/month - Up to 10 clients".to_string(),
                    features: vec!["Up to 10 clients".to_string()],
                },
                Product {
                    name: "Pro Plan".to_string(),
                    kind: ProductKind::Subscription,
                    price_description: "$25/month - Unlimited clients".to_string(),
                    features: vec!["Unlimited clients".to_string()],
                },
            ],
        },
    }
}
