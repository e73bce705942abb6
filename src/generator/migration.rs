use askama::Template;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::schema::foreign_key_field;
use super::templates::{CreateTable, MigrationTemplateData};
use super::type_map::{sql_constraint, sql_type};
use crate::ir::{Field, RelationshipKind, Table};

/// Order in which `CREATE TABLE` statements are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationOrder {
    /// Input order. A table created before the table it references fails on
    /// engines that check foreign keys immediately.
    #[default]
    Declared,
    /// Referenced tables first, following `many_to_one` edges.
    Dependency,
}

impl MigrationOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declared" | "input" => Some(MigrationOrder::Declared),
            "dependency" | "dependencies" | "topological" => Some(MigrationOrder::Dependency),
            _ => None,
        }
    }
}

/// Result of ordering tables for the migration.
#[derive(Debug)]
pub struct TableOrder<'a> {
    pub tables: Vec<&'a Table>,
    /// Tables that could not be sorted because they sit on a foreign-key cycle.
    pub cycle: Vec<String>,
}

fn column_line(field: &Field) -> String {
    let mut line = format!("\"{}\" {}", field.name, sql_type(&field.ty));
    for c in field.constraints.iter().filter_map(sql_constraint) {
        line.push(' ');
        line.push_str(c);
    }
    line
}

fn create_table(table: &Table) -> CreateTable {
    let mut columns: Vec<String> = table.fields.iter().map(column_line).collect();
    for rel in table
        .relationships
        .iter()
        .filter(|r| r.kind == RelationshipKind::ManyToOne)
    {
        let fk = foreign_key_field(&rel.target_table);
        let reference = format!("REFERENCES \"{}\"(id)", rel.target_table);
        // A declared foreign-key column gets the reference instead of a twin.
        match table.fields.iter().position(|f| f.name == fk) {
            Some(pos) => {
                if let Some(column) = columns.get_mut(pos) {
                    if !column.contains("REFERENCES") {
                        column.push(' ');
                        column.push_str(&reference);
                    }
                }
            }
            None => columns.push(format!("\"{fk}\" TEXT {reference}")),
        }
    }
    CreateTable {
        name: table.name.clone(),
        columns,
    }
}

/// Order tables so every `many_to_one` target precedes the tables referencing it.
///
/// Stable: among tables whose dependencies are satisfied, input order wins.
/// Self-references and targets outside `tables` are ignored. Tables left on a
/// cycle are appended in input order and reported in [`TableOrder::cycle`].
pub fn dependency_order(tables: &[Table]) -> TableOrder<'_> {
    let index: HashMap<&str, usize> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();

    let deps: Vec<HashSet<usize>> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| {
            t.relationships
                .iter()
                .filter(|r| r.kind == RelationshipKind::ManyToOne)
                .filter_map(|r| index.get(r.target_table.as_str()).copied())
                .filter(|&dep| dep != i)
                .collect()
        })
        .collect();

    let mut placed = vec![false; tables.len()];
    let mut ordered = Vec::with_capacity(tables.len());
    loop {
        let next = (0..tables.len())
            .find(|&i| !placed[i] && deps[i].iter().all(|&d| placed[d]));
        match next {
            Some(i) => {
                placed[i] = true;
                ordered.push(&tables[i]);
            }
            None => break,
        }
    }

    let mut cycle = Vec::new();
    for (i, table) in tables.iter().enumerate() {
        if !placed[i] {
            cycle.push(table.name.clone());
            ordered.push(table);
        }
    }
    TableOrder {
        tables: ordered,
        cycle,
    }
}

/// Order tables according to `order`.
pub fn order_tables(tables: &[Table], order: MigrationOrder) -> TableOrder<'_> {
    match order {
        MigrationOrder::Declared => TableOrder {
            tables: tables.iter().collect(),
            cycle: Vec::new(),
        },
        MigrationOrder::Dependency => dependency_order(tables),
    }
}

/// Render the initial SQL migration for already-ordered tables.
pub fn render_migration(tables: &[&Table]) -> anyhow::Result<String> {
    let rendered = MigrationTemplateData {
        tables: tables.iter().map(|t| create_table(t)).collect(),
    }
    .render()?;
    Ok(rendered)
}
