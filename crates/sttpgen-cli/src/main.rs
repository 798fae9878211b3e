use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use sttpgen_core::config::{self, CONFIG_FILE_NAME, GeneratorConfig};
use sttpgen_core::ir::ResolvedSpec;
use sttpgen_core::parse::{self, spec::ApiModel};

#[derive(Parser)]
#[command(
    name = "sttpgen",
    about = "Lower API models for the sttp4/jsoniter Scala client generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower an API model and print the resolved client model
    Lower {
        /// Path to the API model file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Config file; defaults to .sttpgen.yaml in the current directory
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// Check that an API model loads and lowers
    Validate {
        /// Path to the API model file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize a new sttpgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lower {
            input,
            config,
            format,
        } => cmd_lower(&input, config.as_deref(), format),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "sttpgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config file, falling back to defaults when it does not exist.
fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let path = path.unwrap_or(Path::new(CONFIG_FILE_NAME));
    let cfg = config::load_config(path)?;
    if cfg.is_none() {
        log::debug!("no config at {}, using defaults", path.display());
    }
    Ok(cfg.unwrap_or_default())
}

fn load_model(path: &Path) -> Result<ApiModel> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let model = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(model)
}

fn lower(input: &Path, cfg: &GeneratorConfig) -> Result<ResolvedSpec> {
    let model = load_model(input)?;
    let resolved = sttpgen_core::lower(&model, cfg)?;
    Ok(resolved)
}

fn cmd_lower(input: &Path, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let cfg = load_config(config)?;
    let resolved = lower(input, &cfg)?;

    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&resolved)?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&resolved)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let resolved = lower(input, &GeneratorConfig::default())?;

    eprintln!("Valid API model: {}", resolved.info.title);
    eprintln!("  Version: {}", resolved.info.version);
    eprintln!("  APIs: {}", resolved.apis.len());
    eprintln!(
        "  Operations: {}",
        resolved.apis.iter().map(|a| a.operations.len()).sum::<usize>()
    );
    eprintln!("  Models: {}", resolved.models.len());
    eprintln!("  Codecs: {}", resolved.codecs.len());

    if resolved.issues.is_empty() {
        eprintln!("Validation successful.");
    } else {
        eprintln!("Validation finished with {} issue(s):", resolved.issues.len());
        for issue in &resolved.issues {
            eprintln!("  - {issue}");
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
