use crate::ir::HttpMethod;
use std::fmt;

/// A non-fatal outcome of generation that callers may want to inspect.
///
/// Generation never fails on IR content. Instead, each place where the IR
/// breaks an assumption the emitters rely on, or where a known gap applies,
/// produces one of these alongside the file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// The endpoint path contains no table name, so no route file was emitted.
    UnresolvedEndpoint { method: HttpMethod, path: String },
    /// `many_to_many` relationships are accepted but never expanded into a join table.
    ManyToManyNotExpanded { table: String, target: String },
    /// A relationship points at a table that is not part of the structure.
    UnknownRelationshipTarget { table: String, target: String },
    /// The field type is outside the vocabulary and was emitted as text.
    UnknownFieldType {
        table: String,
        field: String,
        ty: String,
    },
    /// A later file reuses an earlier path; the later content wins on disk.
    DuplicatePath { path: String },
    /// Foreign-key ordering found a cycle; these tables kept their declared order.
    ForeignKeyCycle { tables: Vec<String> },
    /// No `User` table exists for the auth webhook to write to.
    MissingUserTable,
}

impl GenerationWarning {
    /// Stable identifier for the warning kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationWarning::UnresolvedEndpoint { .. } => "unresolved_endpoint",
            GenerationWarning::ManyToManyNotExpanded { .. } => "many_to_many_not_expanded",
            GenerationWarning::UnknownRelationshipTarget { .. } => "unknown_relationship_target",
            GenerationWarning::UnknownFieldType { .. } => "unknown_field_type",
            GenerationWarning::DuplicatePath { .. } => "duplicate_path",
            GenerationWarning::ForeignKeyCycle { .. } => "foreign_key_cycle",
            GenerationWarning::MissingUserTable => "missing_user_table",
        }
    }
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::UnresolvedEndpoint { method, path } => write!(
                f,
                "{method} {path} does not name any table; no route was generated"
            ),
            GenerationWarning::ManyToManyNotExpanded { table, target } => write!(
                f,
                "{table} -> {target} is many_to_many; no join table was generated"
            ),
            GenerationWarning::UnknownRelationshipTarget { table, target } => {
                write!(f, "{table} references unknown table {target}")
            }
            GenerationWarning::UnknownFieldType { table, field, ty } => write!(
                f,
                "{table}.{field} has unknown type '{ty}'; emitted as text"
            ),
            GenerationWarning::DuplicatePath { path } => {
                write!(f, "{path} was generated more than once; the last one wins")
            }
            GenerationWarning::ForeignKeyCycle { tables } => write!(
                f,
                "foreign keys form a cycle between {}; declared order kept",
                tables.join(", ")
            ),
            GenerationWarning::MissingUserTable => {
                write!(f, "no User table; the auth webhook writes to prisma.user")
            }
        }
    }
}
