mod error_formatter;
mod formatter;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use formatter::{BatchEntry, Formatter};
use rust_decimal::Decimal;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use takeoff::units::{convert_units, parse_quantity};
use takeoff::{
    Co2Estimator, Fact, InferenceEngine, MeasurementExtractor, Project, ProjectRegistry,
    TakeoffError, Value, HAS_VALUE,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "takeoff")]
#[command(about = "Material takeoff and CO2 estimates for infrastructure projects.")]
#[command(
    long_about = "Takeoff derives material quantities (concrete, steel, asphalt, ballast, timber) for bridges, roads, railways and other projects from a few known measurements.\nThe CLI builds projects from JSON payloads or command line overrides and estimates their CO2."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered project types with their parameters
    Types,
    /// Build a project from defaults and overrides and show every parameter
    ///
    /// Overrides are forced values. Values may carry a unit, which is
    /// converted to the parameter's units.
    ///
    /// Examples:
    ///   takeoff show bridges length=100 lanes=2
    ///   takeoff show roads length=7mi
    ///   takeoff show bridges --describe "a 1,200 ft bridge with 4 lanes"
    Show {
        /// Project type (see `takeoff types`)
        project_type: String,
        /// Parameters to force (format: name=value or name=value<unit>)
        params: Vec<String>,
        /// Extract required parameters from a free text description
        #[arg(long)]
        describe: Option<String>,
        /// Output JSON only (for piping to other tools)
        #[arg(short = 'r', long)]
        raw: bool,
    },
    /// Build a project from a JSON payload file (`-` reads stdin)
    Run {
        file: PathBuf,
        #[arg(short = 'r', long)]
        raw: bool,
    },
    /// Estimate tons of CO2 for a JSON payload file (`-` reads stdin)
    Co2 {
        file: PathBuf,
        #[arg(short = 'r', long)]
        raw: bool,
    },
    /// Run every JSON payload under a directory and summarize CO2 estimates
    Batch {
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
    },
    /// Query a target from ad-hoc rules and facts
    ///
    /// Example: takeoff eval --rule "area = width * length" area width=4 length=10
    Eval {
        /// Rule to add (repeatable, format: target = expression)
        #[arg(long = "rule")]
        rules: Vec<String>,
        /// Subject to query
        target: String,
        /// Facts to add (format: name=value)
        facts: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("takeoff=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Types => types_command(),
        Commands::Show {
            project_type,
            params,
            describe,
            raw,
        } => show_command(project_type, params, describe.as_deref(), *raw),
        Commands::Run { file, raw } => run_command(file, *raw),
        Commands::Co2 { file, raw } => co2_command(file, *raw),
        Commands::Batch { workdir } => batch_command(workdir),
        Commands::Eval {
            rules,
            target,
            facts,
        } => eval_command(rules, target, facts),
    };

    if let Err(e) = result {
        if let Some(takeoff_err) = e.downcast_ref::<TakeoffError>() {
            eprintln!("{}", error_formatter::format_error(takeoff_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn registry() -> ProjectRegistry {
    ProjectRegistry::with_builtin_types().with_extractor(Arc::new(MeasurementExtractor::new()))
}

fn types_command() -> Result<()> {
    let formatter = Formatter::default();
    print!("{}", formatter.format_types(&registry()));
    Ok(())
}

fn show_command(
    project_type: &str,
    params: &[String],
    description: Option<&str>,
    raw: bool,
) -> Result<()> {
    let registry = registry();
    let Some(mut project) = registry.from_type(project_type)? else {
        bail!(
            "Unknown project type '{}'. Valid types: {}",
            project_type,
            registry.project_types().join(", ")
        );
    };

    if let Some(text) = description {
        let extracted = project.params_from_description(text)?;
        debug!(extracted, "parameters extracted from description");
    }

    for param in params {
        let (name, raw_value) = split_assignment(param)?;
        let value = override_value(&project, name, raw_value)?;
        project.force_param(name, value)?;
    }

    let formatter = Formatter::default();
    print!("{}", formatter.format_project(&project, raw));
    Ok(())
}

fn run_command(file: &Path, raw: bool) -> Result<()> {
    let project = load_project(&registry(), file)?;
    let formatter = Formatter::default();
    print!("{}", formatter.format_project(&project, raw));
    Ok(())
}

fn co2_command(file: &Path, raw: bool) -> Result<()> {
    let project = load_project(&registry(), file)?;
    let co2 = Co2Estimator::new().estimate(&project)?;
    let formatter = Formatter::default();
    print!("{}", formatter.format_co2(&project, co2, raw));
    Ok(())
}

fn batch_command(workdir: &Path) -> Result<()> {
    let registry = registry();
    let estimator = Co2Estimator::new();
    let mut entries = Vec::new();

    let mut paths: Vec<PathBuf> = WalkDir::new(workdir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();

    for path in paths {
        let file = path
            .strip_prefix(workdir)
            .unwrap_or(&path)
            .display()
            .to_string();

        let payload = match read_payload(&path) {
            Ok(payload) => payload,
            Err(e) => {
                entries.push(BatchEntry {
                    file,
                    project_type: None,
                    result: Err(vec![format!("{:#}", e)]),
                });
                continue;
            }
        };
        let project_type = payload
            .get(takeoff::project::PROJECT_TYPE_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let result = registry
            .from_json(&payload)
            .and_then(|project| estimator.estimate(&project))
            .map_err(|e| e.messages());

        entries.push(BatchEntry {
            file,
            project_type,
            result,
        });
    }

    let formatter = Formatter::default();
    print!("{}", formatter.format_batch_summary(&entries));

    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    if failed > 0 {
        bail!("{} of {} payloads failed", failed, entries.len());
    }
    Ok(())
}

fn eval_command(rules: &[String], target: &str, facts: &[String]) -> Result<()> {
    let mut engine = InferenceEngine::new();
    for fact in facts {
        let (name, raw_value) = split_assignment(fact)?;
        engine.add_fact(Fact::has_value(name, literal_value(raw_value)));
    }
    for rule in rules {
        engine.add_rule_text(rule)?;
    }

    let values = engine.query(HAS_VALUE, target)?;
    let formatter = Formatter::default();
    print!("{}", formatter.format_query(target, &values));
    Ok(())
}

fn load_project(registry: &ProjectRegistry, file: &Path) -> Result<Project> {
    let payload = read_payload(file)?;
    Ok(registry.from_json(&payload)?)
}

fn read_payload(file: &Path) -> Result<serde_json::Value> {
    let content = if file.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read payload from stdin")?;
        content
    } else {
        fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", file.display()))
}

fn split_assignment(input: &str) -> Result<(&str, &str)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => bail!("Expected name=value, got '{}'", input),
    }
}

fn literal_value(raw: &str) -> Value {
    if raw.is_empty() || raw == "null" {
        return Value::Null;
    }
    match Decimal::from_str(&raw.replace('_', "")) {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(raw.to_string()),
    }
}

/// Numbers are taken as-is; quantities with a unit are converted to the
/// parameter's units; anything else is kept as text
fn override_value(project: &Project, name: &str, raw: &str) -> Result<Value> {
    let literal = literal_value(raw);
    if !matches!(literal, Value::Text(_)) {
        return Ok(literal);
    }

    let Some(param) = project.get_param(name) else {
        return Ok(literal);
    };
    match parse_quantity(raw) {
        Some((value, unit)) => match convert_units(value, unit, &param.units) {
            Some(converted) => Ok(Value::Number(converted)),
            None => bail!(
                "Cannot convert {} to {} for '{}'",
                unit,
                param.units,
                name
            ),
        },
        None => Ok(literal),
    }
}
