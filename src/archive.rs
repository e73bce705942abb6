//! Zip packaging of a generated project.

use anyhow::Context;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::generator::GeneratedProject;

/// Pack the project's resolved files into an in-memory zip archive.
///
/// One entry per distinct path, in first-emission order, holding the content
/// of the path's last occurrence. Entry timestamps are fixed so the same
/// project always produces the same bytes.
pub fn archive_project(project: &GeneratedProject) -> anyhow::Result<Vec<u8>> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for file in project.resolved_files() {
        zip.start_file(file.path.as_str(), options)
            .with_context(|| format!("Failed to add {} to archive", file.path))?;
        zip.write_all(file.content.as_bytes())
            .with_context(|| format!("Failed to compress {}", file.path))?;
    }
    let cursor = zip.finish().context("Failed to finalise archive")?;
    Ok(cursor.into_inner())
}

/// Write the project archive to `path`, creating parent directories.
pub fn write_archive(project: &GeneratedProject, path: &Path) -> anyhow::Result<()> {
    let bytes = archive_project(project)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write archive {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Archive written");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::ir::FileContent;
    use std::io::Read;
    use zip::ZipArchive;

    fn project(files: &[(&str, &str)]) -> GeneratedProject {
        GeneratedProject {
            files: files.iter().map(|(p, c)| FileContent::new(*p, *c)).collect(),
            warnings: vec![],
        }
    }

    fn entries(bytes: Vec<u8>) -> Vec<(String, String)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut entry = archive.by_index(i).unwrap();
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                (entry.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_archive_preserves_paths_and_bytes() {
        let p = project(&[
            ("prisma/schema.prisma", "model User {\n}\n"),
            (".env.example", "DATABASE_URL=\"file:./dev.db\"\n"),
        ]);
        let entries = entries(archive_project(&p).unwrap());
        assert_eq!(
            entries,
            vec![
                ("prisma/schema.prisma".to_string(), "model User {\n}\n".to_string()),
                (
                    ".env.example".to_string(),
                    "DATABASE_URL=\"file:./dev.db\"\n".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_archive_duplicate_path_last_wins() {
        let p = project(&[("a.ts", "one"), ("b.ts", "b"), ("a.ts", "two")]);
        let entries = entries(archive_project(&p).unwrap());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("a.ts".to_string(), "two".to_string()));
    }

    #[test]
    fn test_archive_is_reproducible() {
        let p = project(&[("a.ts", "one")]);
        assert_eq!(archive_project(&p).unwrap(), archive_project(&p).unwrap());
    }

    #[test]
    fn test_write_archive_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist").join("project.zip");
        write_archive(&project(&[("a.ts", "one")]), &path).unwrap();
        assert!(path.exists());
    }
}
