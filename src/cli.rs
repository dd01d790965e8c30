//! Minimal CLI: schema in → (tags | rust model) out
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::builder::build_record;
use crate::codegen::Codegen;
use crate::schema::{FieldDef, FieldType, Schema};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// convert a record schema's json tags into db tags and emit a Rust data model
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// stderr log level (off, error, warn, info, debug, trace)
    #[arg(short = 'L', long, global = true, default_value = "info", value_parser = parse_level)]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print each field's extracted json tag value (debug view)
    Tags(TagsOut),
    /// build db-tagged record types and emit formatted Rust source
    Gen(GenOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// schema descriptor file (JSON) declaring the record types
    #[arg(long, short)]
    schema: PathBuf,

    /// comma-separated list of type names to convert (default: every type,
    /// in schema declaration order)
    #[arg(long = "type", value_delimiter = ',')]
    types: Vec<String>,
}

#[derive(Args, Debug)]
struct TagsOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(Args, Debug)]
struct GenOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .rs file, overwritten if it already exists
    #[arg(short, long, default_value = "dbstruct_models.rs")]
    out: PathBuf,

    /// print to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Tags(target) => {
                let schema = Schema::load(&target.input_settings.schema)?;
                for (name, record) in schema.select(&target.input_settings.types)? {
                    for field in &record.fields {
                        print_tags(name, field);
                    }
                }
            }
            Command::Gen(target) => {
                let schema = Schema::load(&target.input_settings.schema)?;
                let selected = schema.select(&target.input_settings.types)?;

                // 1) build converted descriptors, 2) render
                let mut cg = Codegen::new();
                for (name, record) in selected {
                    let built = build_record(record, name);
                    log::info!(
                        "built type {}, zero value {}",
                        built.name,
                        built.zero_value()
                    );
                    cg.emit(&built);
                }
                let rust_src = cg.into_formatted();

                // 3) write the result
                if target.stdout {
                    println!("{rust_src}");
                } else {
                    if let Some(parent) = target.out.parent() {
                        if !parent.as_os_str().is_empty() {
                            std::fs::create_dir_all(parent).with_context(|| {
                                format!("creating output directory {}", parent.display())
                            })?;
                        }
                    }
                    std::fs::write(&target.out, &rust_src)
                        .with_context(|| format!("writing output {}", target.out.display()))?;
                    log::info!("wrote {}", target.out.display());
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn parse_level(s: &str) -> Result<log::LevelFilter, String> {
    s.parse::<log::LevelFilter>()
        .map_err(|_| format!("unknown log level '{s}'"))
}

/// Print `Type.field: <json tag value>` lines, one per scalar field,
/// recursing through nested records with dotted paths.
fn print_tags(path: &str, field: &FieldDef) {
    match &field.ty {
        FieldType::Record(nested) => {
            let path = format!("{path}.{}", field.name);
            for inner in &nested.fields {
                print_tags(&path, inner);
            }
        }
        FieldType::Scalar(_) => {
            let value = field
                .tag
                .as_ref()
                .and_then(|tag| tag.get("json"))
                .unwrap_or("");
            println!("{path}.{}: {value}", field.name);
        }
    }
}
