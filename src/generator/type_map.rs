//! Translation of abstract field types and constraints into each target dialect.
//!
//! Two dialects carry the database definition: the Prisma schema language and
//! SQLite DDL. Two more are derived for generated TypeScript: zod validators
//! for request bodies and plain TypeScript types for documentation.
//!
//! Every mapping is total. [`FieldType::Unknown`] is the one explicit fallback
//! and maps to the dialect's text type.

use crate::ir::{Constraint, FieldType};

/// Prisma scalar type for a field type.
pub fn schema_type(ty: &FieldType) -> &'static str {
    match ty {
        FieldType::String => "String",
        FieldType::Int => "Int",
        FieldType::Float => "Float",
        FieldType::Decimal => "Decimal",
        FieldType::Boolean => "Boolean",
        FieldType::DateTime => "DateTime",
        FieldType::Unknown(_) => "String",
    }
}

/// SQLite column type for a field type.
pub fn sql_type(ty: &FieldType) -> &'static str {
    match ty {
        FieldType::String => "TEXT",
        FieldType::Int => "INTEGER",
        FieldType::Float | FieldType::Decimal => "REAL",
        FieldType::Boolean => "BOOLEAN",
        FieldType::DateTime => "TIMESTAMP",
        FieldType::Unknown(_) => "TEXT",
    }
}

/// TypeScript type for a field type.
pub fn ts_type(ty: &FieldType) -> &'static str {
    match ty {
        FieldType::String | FieldType::Unknown(_) => "string",
        FieldType::Int | FieldType::Float | FieldType::Decimal => "number",
        FieldType::Boolean => "boolean",
        FieldType::DateTime => "Date",
    }
}

/// Prisma attribute for a constraint, `None` when it has no attribute form.
///
/// [`Constraint::Optional`] is expressed as a `?` type suffix instead.
pub fn schema_constraint(c: &Constraint) -> Option<&str> {
    match c {
        Constraint::PrimaryKey => Some("@id"),
        Constraint::Unique => Some("@unique"),
        Constraint::DefaultNow => Some("@default(now())"),
        Constraint::DefaultGeneratedId => Some("@default(cuid())"),
        Constraint::Optional => None,
        Constraint::Other(raw) => Some(raw.as_str()),
    }
}

/// SQL column constraint for a constraint, `None` when it is dropped.
///
/// Generated ids are left to the application layer: SQLite has no native
/// cuid/uuid generator. Unrecognised constraints carry no SQL meaning.
pub fn sql_constraint(c: &Constraint) -> Option<&'static str> {
    match c {
        Constraint::PrimaryKey => Some("PRIMARY KEY"),
        Constraint::Unique => Some("UNIQUE"),
        Constraint::DefaultNow => Some("DEFAULT CURRENT_TIMESTAMP"),
        Constraint::DefaultGeneratedId | Constraint::Optional | Constraint::Other(_) => None,
    }
}

/// zod validator for a request-body type string such as `"string"` or `"number?"`.
///
/// A trailing `?` makes the field optional. Unknown names validate as `z.unknown()`.
pub fn zod_type(raw: &str) -> String {
    let trimmed = raw.trim();
    let (base, optional) = match trimmed.strip_suffix('?') {
        Some(base) => (base.trim(), true),
        None => (trimmed, false),
    };
    let validator = match base.to_ascii_lowercase().as_str() {
        "number" | "float" | "decimal" => "z.number()",
        "int" | "integer" => "z.number().int()",
        _ => match FieldType::parse(base) {
            FieldType::String => "z.string()",
            FieldType::Boolean => "z.boolean()",
            FieldType::DateTime => "z.coerce.date()",
            FieldType::Int => "z.number().int()",
            FieldType::Float | FieldType::Decimal => "z.number()",
            FieldType::Unknown(_) => "z.unknown()",
        },
    };
    if optional {
        format!("{validator}.optional()")
    } else {
        validator.to_string()
    }
}
