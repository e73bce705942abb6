use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The declarative backend description consumed by every emitter.
///
/// Constructed once per generation request and only ever borrowed immutably.
/// Every section defaults to empty when absent from the input document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendStructure {
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub payments: Payments,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// A database table. `name` doubles as the schema model identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Table {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// A column (or, for `auth.userFields`, a user-model extension field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl Field {
    pub fn is_optional(&self) -> bool {
        self.constraints.contains(&Constraint::Optional)
    }
}

/// The closed field-type vocabulary understood by the type mapper.
///
/// Parsing is case-insensitive. Anything outside the vocabulary lands in
/// [`FieldType::Unknown`], which every dialect maps to its text type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Int,
    Float,
    Decimal,
    Boolean,
    DateTime,
    /// Unrecognised type name, kept verbatim.
    Unknown(String),
}

impl FieldType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => FieldType::String,
            "int" | "integer" => FieldType::Int,
            "float" => FieldType::Float,
            "decimal" => FieldType::Decimal,
            "boolean" | "bool" => FieldType::Boolean,
            "datetime" | "date" | "timestamp" => FieldType::DateTime,
            _ => FieldType::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "String",
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::Decimal => "Decimal",
            FieldType::Boolean => "Boolean",
            FieldType::DateTime => "DateTime",
            FieldType::Unknown(raw) => raw,
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        FieldType::parse(&raw)
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field modifier.
///
/// Accepts both the abstract spelling (`"primary key"`, `"default now"`) and
/// the schema-language spelling (`"@id"`, `"@default(now())"`). Anything else
/// is kept as [`Constraint::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Constraint {
    PrimaryKey,
    Unique,
    DefaultNow,
    DefaultGeneratedId,
    Optional,
    Other(String),
}

impl Constraint {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let normalized = trimmed
            .strip_prefix('@')
            .unwrap_or(trimmed)
            .to_ascii_lowercase();
        match normalized.as_str() {
            "id" | "primary key" | "primary_key" | "pk" => Constraint::PrimaryKey,
            "unique" => Constraint::Unique,
            "default(now())" | "default now" | "default_now" => Constraint::DefaultNow,
            "default(cuid())" | "default(uuid())" | "default generated id" => {
                Constraint::DefaultGeneratedId
            }
            "?" | "optional" => Constraint::Optional,
            _ => Constraint::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Constraint::PrimaryKey => "primary key",
            Constraint::Unique => "unique",
            Constraint::DefaultNow => "default now",
            Constraint::DefaultGeneratedId => "default generated id",
            Constraint::Optional => "optional",
            Constraint::Other(raw) => raw,
        }
    }
}

impl From<String> for Constraint {
    fn from(raw: String) -> Self {
        Constraint::parse(&raw)
    }
}

impl From<Constraint> for String {
    fn from(c: Constraint) -> Self {
        c.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "table", alias = "targetTable")]
    pub target_table: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: RelationshipKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Api {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Lower-case name used as the router registration key.
    pub fn router_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub authentication: bool,
    /// Declared `field -> type` mapping for the request body, in declared order.
    #[serde(default)]
    pub request_body: Option<Map<String, Value>>,
    #[serde(default)]
    pub response_schema: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    #[serde(default)]
    pub providers: Vec<AuthProvider>,
    #[serde(default)]
    pub user_fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthProvider {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub config: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payments {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    OneTime,
    Subscription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    #[serde(default)]
    pub price_description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// One emitted file: a forward-slash relative path and its full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub content: String,
}

impl FileContent {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        FileContent {
            path: path.into(),
            content: content.into(),
        }
    }
}
