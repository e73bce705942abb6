#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use stackforge::config::{auto_detect_config_path, load_config, GeneratorConfig};
use stackforge::generator::{
    generate_project, write_project, GeneratedProject, GenerationWarning, MigrationOrder,
    WriteOptions, AUTH_MIDDLEWARE_PATH, MIGRATION_PATH, PAYMENTS_CLIENT_PATH, ROUTES_INDEX_PATH,
    SCHEMA_PATH,
};
use stackforge::ir::{load_structure, BackendStructure, HttpMethod};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn bookshop() -> BackendStructure {
    load_structure(&fixture("bookshop.yaml")).expect("load bookshop fixture")
}

fn generate(structure: &BackendStructure) -> GeneratedProject {
    generate_project(structure, &GeneratorConfig::default()).expect("generate project")
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap_or_else(|e| panic!("{relative}: {e}"))
}

#[test]
fn test_yaml_fixture_loads() {
    let structure = bookshop();
    assert_eq!(structure.database.tables.len(), 3);
    assert_eq!(structure.api.endpoints.len(), 5);
    let body = structure.api.endpoints[1].request_body.as_ref().unwrap();
    let keys: Vec<&str> = body.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["title", "pages", "price", "inPrint", "authorId"]);
}

#[test]
fn test_generate_and_write_bookshop() {
    let dir = tempfile::tempdir().unwrap();
    let project = generate(&bookshop());
    let report = write_project(&project, dir.path(), WriteOptions::default()).unwrap();
    assert!(report.skipped.is_empty());
    let root = dir.path();

    let schema = read(root, SCHEMA_PATH);
    assert!(schema.contains("  pages Int\n  price Decimal\n  inPrint Boolean\n"));
    assert!(schema.contains("  bornAt DateTime?\n"));
    assert!(schema.contains("  books Book[]\n"));
    assert!(schema.contains("  author Author @relation(fields: [authorId], references: [id])\n"));

    let migration = read(root, MIGRATION_PATH);
    assert!(migration.contains("\"price\" REAL"));
    assert!(migration.contains("\"createdAt\" TIMESTAMP DEFAULT CURRENT_TIMESTAMP"));
    assert!(migration.contains("\"authorId\" TEXT REFERENCES \"Author\"(id)"));

    let post = read(root, "src/routes/api_books.ts");
    assert!(post.contains("  pages: z.number().int(),"));
    assert!(post.contains("  inPrint: z.boolean().optional(),"));
    assert!(post.contains("prisma.book.create("));

    let put = read(root, "src/routes/api_books_bookId.ts");
    assert!(put.contains("const id = req.params.bookId;"));
    assert!(put.contains("path: \"/api/books/:bookId\""));

    let delete = read(root, "src/routes/api_authors_authorId.ts");
    assert!(delete.contains("prisma.author.delete({ where: { id } })"));
    assert!(delete.contains("path: \"/api/authors/:authorId\""));

    assert!(!root.join("src/routes/api_health.ts").exists());

    let index = read(root, ROUTES_INDEX_PATH);
    assert!(index.contains("import route0 from './api_books';"));
    assert!(index.contains("import route1 from './api_books_bookId';"));
    assert!(index.contains("import route2 from './api_authors_authorId';"));

    let middleware = read(root, AUTH_MIDDLEWARE_PATH);
    assert!(middleware.contains("\"/api/books\","));
    assert!(middleware.contains("\"/api/health\","));
    assert!(middleware.contains("  favouriteGenre?: string;"));

    let stripe = read(root, PAYMENTS_CLIENT_PATH);
    assert!(stripe.contains("Mode = 'payment',"));
}

#[test]
fn test_bookshop_warnings() {
    let project = generate(&bookshop());
    assert_eq!(
        project.warnings,
        vec![
            GenerationWarning::UnresolvedEndpoint {
                method: HttpMethod::Get,
                path: "/api/health".to_string(),
            },
            GenerationWarning::DuplicatePath {
                path: "src/routes/api_books.ts".to_string(),
            },
        ]
    );
}

#[test]
fn test_fixture_config_is_auto_detected() {
    let input = fixture("bookshop.yaml");
    assert_eq!(
        auto_detect_config_path(&input),
        Some(fixture("stackforge.toml"))
    );
    let config = load_config(None, Some(&input)).unwrap();
    assert_eq!(config.package_version, "0.4.0");
    assert_eq!(config.migration_order, MigrationOrder::Dependency);

    let project = generate_project(&bookshop(), &config).unwrap();
    let manifest = &project.file("package.json").unwrap().content;
    assert!(manifest.contains("\"version\": \"0.4.0\""));
}

#[test]
fn test_regeneration_is_byte_identical_on_disk() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    write_project(&generate(&bookshop()), first.path(), WriteOptions::default()).unwrap();
    write_project(&generate(&bookshop()), second.path(), WriteOptions::default()).unwrap();

    for file in generate(&bookshop()).resolved_files() {
        assert_eq!(
            fs::read(first.path().join(&file.path)).unwrap(),
            fs::read(second.path().join(&file.path)).unwrap(),
            "{} differs",
            file.path
        );
    }
}
