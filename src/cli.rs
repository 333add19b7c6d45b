use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Swaggerize - Generate a Swagger 2.0 document from a route manifest and model sources
#[derive(Parser, Debug)]
#[command(name = "swaggerize")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the route manifest (YAML or JSON)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Directory (or single file) holding the model definitions.
    /// Defaults to the manifest's directory.
    #[arg(short = 'm', long = "models", value_name = "DIR")]
    pub models: Option<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl CliArgs {
    /// Where model sources are looked up
    pub fn models_path(&self) -> PathBuf {
        match &self.models {
            Some(models) => models.clone(),
            None => self
                .manifest
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.manifest.exists() {
        anyhow::bail!("Manifest does not exist: {}", args.manifest.display());
    }
    if !args.manifest.is_file() {
        anyhow::bail!("Manifest is not a file: {}", args.manifest.display());
    }

    let models = args.models_path();
    if !models.exists() {
        anyhow::bail!("Model path does not exist: {}", models.display());
    }

    info!("Manifest: {}", args.manifest.display());
    info!("Models: {}", models.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Produce the document described by `args` as text in the requested format.
pub fn generate(args: &CliArgs) -> Result<String> {
    use crate::manifest::Manifest;
    use crate::parser::SourceParser;
    use crate::resolver::ModelResolver;
    use crate::scanner::ModelScanner;
    use crate::serializer::{serialize_json, serialize_yaml};
    use crate::swaggerizer::aggregate;

    // Step 1: Load the manifest
    info!("Loading manifest...");
    let manifest = Manifest::load(&args.manifest)?;
    info!("Manifest declares {} routes", manifest.routes.len());

    // Step 2: Find and parse model sources
    let models_path = args.models_path();
    info!("Scanning model sources in {}...", models_path.display());
    let scan_result = ModelScanner::new(models_path).scan()?;
    for warning in &scan_result.warnings {
        warn!("{}", warning);
    }
    info!("Found {} Rust files", scan_result.source_files.len());

    let parsed = SourceParser::parse_files(&scan_result.source_files);
    info!("Successfully parsed {} files", parsed.len());

    // Step 3: Resolve the models each route names
    let mut resolver = ModelResolver::new(parsed);
    let routes = manifest
        .routes(&mut resolver)
        .with_context(|| format!("Failed to resolve routes of {}", args.manifest.display()))?;

    // Step 4: Aggregate into the document
    info!("Building Swagger document...");
    let mut document = manifest.document();
    aggregate(&mut document, &routes)?;
    info!(
        "Document has {} paths and {} definitions",
        document.paths.len(),
        document.definitions.len()
    );

    // Step 5: Serialize
    info!("Serializing to {:?} format...", args.output_format);
    match args.output_format {
        OutputFormat::Json => serialize_json(&document),
        OutputFormat::Yaml => serialize_yaml(&document),
    }
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::serializer::write_to_file;

    info!("Starting Swagger document generation...");
    let content = generate(&args)?;

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Successfully wrote Swagger document to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    info!("Generation complete!");
    Ok(())
}
