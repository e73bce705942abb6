use askama::Template;

use super::templates::{ModelBlock, SchemaTemplateData};
use super::type_map::{schema_constraint, schema_type};
use crate::ir::{Field, RelationshipKind, Table};

/// Name of the shadow foreign-key field implied by a `many_to_one` relationship.
///
/// Shared with the migration emitter so both artifacts agree on the column name.
pub fn foreign_key_field(target_table: &str) -> String {
    format!("{}Id", target_table.to_lowercase())
}

/// Whether the table already declares the foreign-key field itself, in which
/// case the declared field is reused instead of appending a shadow one.
fn declares_foreign_key(table: &Table, target_table: &str) -> bool {
    table.has_field(&foreign_key_field(target_table))
}

/// Render one Prisma field line: `name Type[?] attrs...`.
pub fn schema_field_line(field: &Field) -> String {
    let mut line = format!("{} {}", field.name, schema_type(&field.ty));
    if field.is_optional() {
        line.push('?');
    }
    for attr in field.constraints.iter().filter_map(schema_constraint) {
        line.push(' ');
        line.push_str(attr);
    }
    line
}

fn model_block(table: &Table) -> ModelBlock {
    let mut lines: Vec<String> = table.fields.iter().map(schema_field_line).collect();

    for rel in &table.relationships {
        let target = &rel.target_table;
        let reference = target.to_lowercase();
        match rel.kind {
            RelationshipKind::ManyToOne => {
                let fk = foreign_key_field(target);
                lines.push(format!(
                    "{reference} {target} @relation(fields: [{fk}], references: [id])"
                ));
                if !declares_foreign_key(table, target) {
                    lines.push(format!("{fk} String"));
                }
            }
            RelationshipKind::OneToMany => {
                lines.push(format!("{reference}s {target}[]"));
            }
            // Not expanded; the composer reports it as a warning.
            RelationshipKind::ManyToMany => {}
        }
    }

    ModelBlock {
        name: table.name.clone(),
        lines,
    }
}

/// Render the Prisma schema: header plus one `model` block per table, in input order.
pub fn render_schema(tables: &[Table]) -> anyhow::Result<String> {
    let rendered = SchemaTemplateData {
        models: tables.iter().map(model_block).collect(),
    }
    .render()?;
    Ok(rendered)
}
