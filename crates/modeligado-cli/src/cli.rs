//! Command-line interface for the modeligado utility
//!
//! Provides a CLI to parse class diagram text and generate Java sources.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use modeligado::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use modeligado::core::Parser as _;
use modeligado::plugins::class::{class_name, ClassDiagram, ClassDiagramParser};
use modeligado::plugins::java::{write_sources, JavaGenerator};
use modeligado::Generator as _;

/// Modeligado - Generate Java sources from class diagrams
#[derive(Parser)]
#[command(name = "modeligado")]
#[command(about = "Turn a plain-text class diagram into Java source skeletons")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a diagram and print its classes and relations
    Parse {
        /// Input file containing the class diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the parsed model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate Java sources from a diagram
    Generate {
        /// Input file containing the class diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Package of the generated classes
        #[arg(short, long)]
        package: Option<String>,

        /// Directory receiving one .java file per class (stdout if omitted)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate class diagram syntax
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the bundled example diagram
    Example {
        /// Output file for the diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Main CLI application
pub struct ModeligadoApp {
    parser: ClassDiagramParser,
}

impl ModeligadoApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            parser: ClassDiagramParser::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Modeligado v{}", env!("CARGO_PKG_VERSION"));
        }

        debug!(verbose = cli.verbose, "Dispatching command");
        match cli.command {
            Commands::Parse { input, json } => self.parse_command(input, json, cli.verbose),
            Commands::Generate {
                input,
                package,
                output_dir,
            } => self.generate_command(input, package, output_dir, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Example { output } => self.write_output(output, modeligado::example_diagram()),
        }
    }

    /// Parse diagram text into a fresh database
    pub fn parse_diagram(&self, content: &str) -> Result<ClassDiagram> {
        let mut database = ClassDiagram::new();
        self.parser.parse(content, &mut database)?;
        Ok(database)
    }

    /// Handle the parse command
    fn parse_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = self.parse_diagram(&content)?;
        let output = if json {
            serde_json::to_string_pretty(&database)?
        } else {
            summarize(&database)
        };
        self.write_output(None, &output)
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        input: Option<PathBuf>,
        package: Option<String>,
        output_dir: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = self.parse_diagram(&content)?;
        let generator = match &package {
            Some(package) => JavaGenerator::new().with_package(package.as_str()),
            None => JavaGenerator::new(),
        };
        let sources = generator.generate(&database);

        match output_dir {
            Some(dir) => {
                let written = write_sources(&dir, package.as_deref(), &sources)?;
                if verbose {
                    for path in &written {
                        eprintln!("Wrote {}", path.display());
                    }
                }
                println!("Generated {} files in {}", written.len(), dir.display());
                Ok(())
            }
            None => self.write_output(None, &render_sources(&sources, generator.file_extension())),
        }
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.parse_diagram(&content) {
            Ok(database) => {
                println!("✓ Valid diagram ({} classes)", database.class_count());
                for missing in database.missing_classes() {
                    eprintln!("Warning: class '{}' is referenced but not defined", missing);
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid diagram: {}", e);
                Err(e)
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => {
                debug!(path = %path.display(), "Reading input file");
                fs::read_to_string(&path)
                    .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
            }
            _ => {
                debug!("Reading input from stdin");
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => fs::write(&path, content)
                .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e)),
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

impl Default for ModeligadoApp {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per class, followed by its relations
pub fn summarize(database: &ClassDiagram) -> String {
    let mut summary = String::new();
    for class in database.classes() {
        let context = &class.context;
        let qualifier = context
            .qualifier
            .map(|q| format!(" {}", q.token()))
            .unwrap_or_default();
        let _ = writeln!(
            summary,
            "{}{} ({} properties, {} constructors, {} methods)",
            context.name,
            qualifier,
            context.properties.len(),
            context.constructors().count(),
            context.operations().count()
        );
        for relation in &class.relations {
            let _ = writeln!(
                summary,
                "  {} --{}--> {}",
                class_name(&relation.from),
                relation.relationship,
                class_name(&relation.to)
            );
        }
    }
    summary
}

/// All sources in one text, each preceded by a comment naming its file
pub fn render_sources(sources: &BTreeMap<String, String>, extension: &str) -> String {
    sources
        .iter()
        .map(|(name, source)| format!("// {}.{}\n{}\n", name, extension, source))
        .collect::<Vec<_>>()
        .join("\n")
}
