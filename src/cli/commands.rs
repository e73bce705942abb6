use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::archive::write_archive;
use crate::config::{load_config, GeneratorConfig};
use crate::generator::{generate_project, write_project, GeneratedProject, MigrationOrder, WriteOptions};
use crate::ir::{load_structure, BackendStructure, MockStructureSource, StructureSource};

#[derive(Parser)]
#[command(name = "stackforge-gen", version)]
#[command(about = "Generate a Prisma/Express/Clerk/Stripe backend from a declarative structure", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the backend structure comes from: a file or a prompt.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct StructureInput {
    /// JSON or YAML backend structure
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Free-text description, turned into a structure by the mock source
    #[arg(short, long)]
    pub prompt: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the backend project into a directory
    Generate {
        #[command(flatten)]
        source: StructureInput,

        #[arg(short, long)]
        output: PathBuf,

        /// Also pack the project into this zip file
        #[arg(long)]
        archive: Option<PathBuf>,

        /// Generator config (defaults to stackforge.toml beside --input)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, default_value_t = false)]
        force: bool,

        #[arg(long, default_value_t = false)]
        dry_run: bool,

        #[arg(long, value_enum)]
        migration_order: Option<OrderArg>,

        #[arg(long)]
        package_name: Option<String>,
    },
    /// List the files and warnings a generation would produce
    Inspect {
        #[command(flatten)]
        source: StructureInput,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum)]
        migration_order: Option<OrderArg>,
    },
    /// Print the structure the mock source returns, as JSON
    Mock {
        #[arg(short, long, default_value = "")]
        prompt: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Declared,
    Dependency,
}

impl From<OrderArg> for MigrationOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Declared => MigrationOrder::Declared,
            OrderArg::Dependency => MigrationOrder::Dependency,
        }
    }
}

pub(crate) fn load_input(source: &StructureInput) -> anyhow::Result<BackendStructure> {
    match (&source.input, &source.prompt) {
        (Some(path), _) => load_structure(path),
        (None, Some(prompt)) => MockStructureSource.structure_for(prompt),
        (None, None) => anyhow::bail!("Either --input or --prompt is required"),
    }
}

pub(crate) fn resolve_config(
    source: &StructureInput,
    config: Option<&PathBuf>,
    migration_order: Option<OrderArg>,
    package_name: Option<&String>,
) -> anyhow::Result<GeneratorConfig> {
    let mut resolved = load_config(config.map(PathBuf::as_path), source.input.as_deref())?;
    if let Some(order) = migration_order {
        resolved.migration_order = order.into();
    }
    if let Some(name) = package_name {
        resolved.package_name = name.clone();
    }
    Ok(resolved)
}

fn print_warnings(project: &GeneratedProject) {
    for warning in &project.warnings {
        println!("⚠️  [{}] {warning}", warning.kind());
    }
}

/// Execute an already-parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            source,
            output,
            archive,
            config,
            force,
            dry_run,
            migration_order,
            package_name,
        } => {
            let structure = load_input(&source)?;
            let config = resolve_config(
                &source,
                config.as_ref(),
                migration_order,
                package_name.as_ref(),
            )?;
            let project = generate_project(&structure, &config)?;
            let report = write_project(&project, &output, WriteOptions { force, dry_run })
                .with_context(|| format!("Failed to write project to {}", output.display()))?;

            if let Some(archive) = archive {
                if dry_run {
                    println!("📝 Would write archive {}", archive.display());
                } else {
                    write_archive(&project, &archive)?;
                    println!("📦 Archived project → {}", archive.display());
                }
            }

            print_warnings(&project);
            println!(
                "✅ {} files written, {} skipped, {} warnings",
                report.written.len(),
                report.skipped.len(),
                project.warnings.len()
            );
        }
        Commands::Inspect {
            source,
            config,
            migration_order,
        } => {
            let structure = load_input(&source)?;
            let config = resolve_config(&source, config.as_ref(), migration_order, None)?;
            let project = generate_project(&structure, &config)?;
            for file in project.resolved_files() {
                println!("{:>8}  {}", file.content.len(), file.path);
            }
            print_warnings(&project);
        }
        Commands::Mock { prompt } => {
            let structure = MockStructureSource.structure_for(&prompt)?;
            let json = serde_json::to_string_pretty(&structure)
                .context("Failed to serialise mock structure")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Parse the process arguments and run the requested command.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli)?;
    Ok(())
}
