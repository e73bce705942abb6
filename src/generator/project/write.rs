use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use super::compose::GeneratedProject;

/// How [`write_project`] treats the target directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Overwrite files that already exist
    pub force: bool,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

/// What happened to each resolved file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Join a forward-slash relative path onto `root`, refusing anything that
/// would escape it.
fn target_path(root: &Path, relative: &str) -> anyhow::Result<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in relative.split('/') {
        match segment {
            "" | "." => continue,
            ".." => anyhow::bail!("Refusing to write outside the output directory: {relative}"),
            s => path.push(s),
        }
    }
    if path == root {
        anyhow::bail!("Empty output path");
    }
    Ok(path)
}

/// Write the project's resolved files under `root`.
///
/// Existing files are left alone unless `options.force` is set. With
/// `options.dry_run` nothing is created and every file counts as written.
pub fn write_project(
    project: &GeneratedProject,
    root: &Path,
    options: WriteOptions,
) -> anyhow::Result<WriteReport> {
    let mut report = WriteReport::default();
    for file in project.resolved_files() {
        let path = target_path(root, &file.path)?;
        if options.dry_run {
            println!("📝 Would write {}", path.display());
            report.written.push(path);
            continue;
        }
        if path.exists() && !options.force {
            println!("⚠️  Skipping existing file: {}", path.display());
            report.skipped.push(path);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✅ Generated {}", path.display());
        report.written.push(path);
    }
    tracing::info!(
        root = %root.display(),
        written = report.written.len(),
        skipped = report.skipped.len(),
        dry_run = options.dry_run,
        "Project written"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::ir::FileContent;

    fn project(files: &[(&str, &str)]) -> GeneratedProject {
        GeneratedProject {
            files: files.iter().map(|(p, c)| FileContent::new(*p, *c)).collect(),
            warnings: vec![],
        }
    }

    #[test]
    fn test_target_path_rejects_escape() {
        let root = Path::new("/tmp/out");
        assert_eq!(
            target_path(root, "src/routes/index.ts").unwrap(),
            root.join("src").join("routes").join("index.ts")
        );
        assert!(target_path(root, "../etc/passwd").is_err());
        assert!(target_path(root, "").is_err());
    }

    #[test]
    fn test_skips_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "mine").unwrap();
        let p = project(&[("README.md", "generated"), ("src/a.ts", "a")]);

        let report = write_project(&p, dir.path(), WriteOptions::default()).unwrap();
        assert_eq!(report.skipped, vec![dir.path().join("README.md")]);
        assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), "mine");
        assert_eq!(fs::read_to_string(dir.path().join("src/a.ts")).unwrap(), "a");

        let forced = WriteOptions {
            force: true,
            dry_run: false,
        };
        write_project(&p, dir.path(), forced).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "generated"
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let options = WriteOptions {
            force: false,
            dry_run: true,
        };
        let report = write_project(&project(&[("a.txt", "a")]), &out, options).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(!out.exists());
    }

    #[test]
    fn test_duplicate_paths_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        let p = project(&[("x.ts", "first"), ("y.ts", "y"), ("x.ts", "second")]);
        let report = write_project(&p, dir.path(), WriteOptions::default()).unwrap();
        assert_eq!(report.written.len(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("x.ts")).unwrap(), "second");
    }
}
