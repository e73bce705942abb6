use super::types::BackendStructure;
use anyhow::Context;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

/// Load a [`BackendStructure`] from a JSON or YAML document.
///
/// The format is picked from the file extension: `.yaml`/`.yml` are parsed as
/// YAML, everything else as JSON.
pub fn load_structure(path: &Path) -> anyhow::Result<BackendStructure> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read backend structure: {}", path.display()))?;
    let structure = if is_yaml(path) {
        parse_structure_yaml(&content)
    } else {
        parse_structure_json(&content)
    }
    .with_context(|| format!("Failed to parse backend structure: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        tables = structure.database.tables.len(),
        endpoints = structure.api.endpoints.len(),
        "Loaded backend structure"
    );
    Ok(structure)
}

pub fn parse_structure_json(content: &str) -> anyhow::Result<BackendStructure> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_structure_yaml(content: &str) -> anyhow::Result<BackendStructure> {
    Ok(serde_yaml::from_str(content)?)
}
