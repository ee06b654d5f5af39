//! Command-line interface for ddms

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use ddms::config::IndexLevel;
#[cfg(feature = "cli")]
use ddms::documents::Document;
#[cfg(feature = "cli")]
use ddms::elements::parse_component;
#[cfg(feature = "cli")]
use ddms::{DdmsComponent, OutputFormat, Properties, VersionRegistry};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "ddms")]
#[command(author, version, about = "DDMS component validation and rendering tool", long_about = None)]
struct Cli {
    /// Properties file overriding prefixes and output options
    #[arg(long, global = true, value_name = "FILE")]
    properties: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Xml,
    Html,
    Text,
    Json,
}

#[cfg(feature = "cli")]
impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Xml => OutputFormat::Xml,
            Format::Html => OutputFormat::Html,
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a DDMS component in another format
    Render {
        /// Path to the XML file holding one DDMS component
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Pretty print XML and JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Always index repeated names in HTML and text output
        #[arg(long)]
        index: bool,
    },

    /// Validate a DDMS component and list its warnings
    Validate {
        /// Path to the XML file holding one DDMS component
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the supported DDMS versions and their namespaces
    Versions,
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = install_properties(cli.properties).and_then(|()| match cli.command {
        Commands::Render {
            file,
            format,
            pretty,
            index,
        } => cmd_render(file, format, pretty, index),
        Commands::Validate { file } => cmd_validate(file),
        Commands::Versions => cmd_versions(),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn install_properties(path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = path {
        let custom = Properties::from_file(&path)?;
        VersionRegistry::install(&custom)?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_render(
    file: PathBuf,
    format: Format,
    pretty: bool,
    index: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = Document::from_file(&file)?.into_root()?;
    let component = parse_component(&root)?;

    let mut config = VersionRegistry::global()
        .output_config()
        .with_json_pretty(pretty);
    if index {
        config = config.with_index_level(IndexLevel::Always);
    }

    let output = match format {
        Format::Xml if pretty => component.to_xml_pretty()?,
        _ => component.render(format.into(), config)?,
    };
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_validate(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let root = Document::from_file(&file)?.into_root()?;

    match parse_component(&root) {
        Ok(component) => {
            println!(
                "✓ {} is valid DDMS {}",
                component.qualified_name(),
                component.version()
            );
            if !component.warnings().is_empty() {
                println!();
                println!("Warnings:");
                for warning in component.warnings() {
                    println!("  - {}", warning);
                }
            }
            Ok(())
        }
        Err(e) => {
            println!("✗ {} is invalid", root.qname.qualified());
            println!();
            println!("Errors:");
            println!("  - {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_versions() -> Result<(), Box<dyn std::error::Error>> {
    let registry = VersionRegistry::global();
    for info in registry.versions() {
        let marker = if info.version == registry.default_version() {
            " (default)"
        } else {
            ""
        };
        println!("{}{}", info.version, marker);
        println!("  ddms:  {}", info.ddms_namespace);
        println!("  ism:   {}", info.ism_namespace);
        println!("  gml:   {}", info.gml_namespace);
        println!("  xlink: {}", info.xlink_namespace);
        if let Some(ntk) = &info.ntk_namespace {
            println!("  ntk:   {}", ntk);
        }
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
