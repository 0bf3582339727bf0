use std::{cell::RefCell, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use curator_core::create_plugin;
use curator_plugin_sdk::{
    vocabulary, Access, BatchElementError, EntityReference, ManagerPlugin, PluginManifest,
    Settings, TraitSet, TraitsData,
};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "curator", author, version, about = "Example asset-manager plugin host")]
struct Cli {
    /// Sets the log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Optional TOML settings file passed to the manager's initialize().
    #[arg(long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve trait data for one or more entity references.
    Resolve {
        /// Trait identifiers to request (repeatable).
        #[arg(long = "trait", value_name = "ID", default_values_t = [vocabulary::LOCATABLE_CONTENT.to_string()])]
        traits: Vec<String>,

        #[arg(long, default_value = "read")]
        access: Access,

        #[arg(value_name = "REF", required = true)]
        references: Vec<String>,
    },
    /// Report the full trait set of one or more entities.
    EntityTraits {
        #[arg(long, default_value = "read")]
        access: Access,

        #[arg(value_name = "REF", required = true)]
        references: Vec<String>,
    },
    /// Query the management policy for trait sets.
    Policy {
        /// A comma-separated trait set (repeatable, one policy per set).
        #[arg(long = "trait-set", value_name = "IDS", required = true)]
        trait_sets: Vec<String>,

        #[arg(long, default_value = "read")]
        access: Access,
    },
    /// Test whether a string is recognized as an entity reference.
    Check {
        #[arg(value_name = "STRING")]
        candidate: String,
    },
    /// Print the manager's identity and info mapping.
    Info,
    /// Inspect installed manager plugins.
    Plugins {
        #[command(subcommand)]
        command: PluginCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PluginCommands {
    /// Lists plugin manifests discovered in a directory.
    List {
        #[arg(long, value_name = "DIR", default_value = "plugins")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    if let Commands::Plugins { command } = &cli.command {
        return handle_plugins(command);
    }

    let mut plugin = create_plugin();
    plugin
        .initialize(load_settings(cli.settings.as_deref())?)
        .context("manager initialization failed")?;

    match cli.command {
        Commands::Resolve {
            traits,
            access,
            references,
        } => handle_resolve(plugin.as_ref(), &references, traits, access),
        Commands::EntityTraits { access, references } => {
            handle_entity_traits(plugin.as_ref(), &references, access)
        }
        Commands::Policy { trait_sets, access } => {
            handle_policy(plugin.as_ref(), &trait_sets, access)
        }
        Commands::Check { candidate } => handle_check(plugin.as_ref(), &candidate),
        Commands::Info => handle_info(plugin.as_ref()),
        Commands::Plugins { .. } => unreachable!("handled before initialization"),
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).try_init().ok();
    Ok(())
}

fn load_settings(path: Option<&std::path::Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::new());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let value: serde_json::Value =
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    value
        .as_object()
        .cloned()
        .with_context(|| format!("settings file {} must contain a table", path.display()))
}

fn parse_references(references: &[String]) -> Vec<EntityReference> {
    references
        .iter()
        .map(|reference| EntityReference::new(reference.clone()))
        .collect()
}

fn error_json(reference: &EntityReference, error: &BatchElementError) -> serde_json::Value {
    json!({
        "reference": reference,
        "error": error,
    })
}

fn handle_resolve(
    plugin: &dyn ManagerPlugin,
    references: &[String],
    traits: Vec<String>,
    access: Access,
) -> Result<()> {
    let references = parse_references(references);
    warn_on_unrecognized(plugin, &references);
    let requested: TraitSet = traits.into_iter().collect();

    let results = RefCell::new(Vec::with_capacity(references.len()));
    plugin.resolve(
        &references,
        &requested,
        access,
        &mut |idx: usize, data: TraitsData| {
            results
                .borrow_mut()
                .push(json!({ "reference": &references[idx], "data": data }));
        },
        &mut |idx: usize, error: BatchElementError| {
            results.borrow_mut().push(error_json(&references[idx], &error));
        },
    );

    println!("{}", serde_json::to_string_pretty(&results.into_inner())?);
    Ok(())
}

fn handle_entity_traits(
    plugin: &dyn ManagerPlugin,
    references: &[String],
    access: Access,
) -> Result<()> {
    let references = parse_references(references);
    warn_on_unrecognized(plugin, &references);

    let results = RefCell::new(Vec::with_capacity(references.len()));
    plugin.entity_traits(
        &references,
        access,
        &mut |idx: usize, traits: TraitSet| {
            results
                .borrow_mut()
                .push(json!({ "reference": &references[idx], "traits": traits }));
        },
        &mut |idx: usize, error: BatchElementError| {
            results.borrow_mut().push(error_json(&references[idx], &error));
        },
    );

    println!("{}", serde_json::to_string_pretty(&results.into_inner())?);
    Ok(())
}

fn handle_policy(plugin: &dyn ManagerPlugin, trait_sets: &[String], access: Access) -> Result<()> {
    let sets: Vec<TraitSet> = trait_sets
        .iter()
        .map(|set| set.split(',').map(|id| id.trim().to_string()).collect())
        .collect();
    let policies = plugin.management_policy(&sets, access);
    let results: Vec<serde_json::Value> = sets
        .iter()
        .zip(&policies)
        .map(|(set, policy)| json!({ "traitSet": set, "policy": policy }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn handle_check(plugin: &dyn ManagerPlugin, candidate: &str) -> Result<()> {
    if plugin.is_entity_reference_string(candidate) {
        println!("recognized: `{candidate}` belongs to {}", plugin.identifier());
    } else {
        println!("not recognized: `{candidate}`");
    }
    Ok(())
}

fn handle_info(plugin: &dyn ManagerPlugin) -> Result<()> {
    let summary = json!({
        "identifier": plugin.identifier(),
        "displayName": plugin.display_name(),
        "version": plugin.version().to_string(),
        "info": plugin.info(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn handle_plugins(command: &PluginCommands) -> Result<()> {
    match command {
        PluginCommands::List { dir } => {
            let manifests = discover_manifests(dir)?;
            if manifests.is_empty() {
                println!("no plugin manifests found under {}", dir.display());
            } else {
                for manifest in manifests {
                    println!(
                        "- {} ({}) v{}{}",
                        manifest.display_name,
                        manifest.identifier,
                        manifest.version,
                        manifest
                            .description
                            .as_ref()
                            .map(|d| format!(": {d}"))
                            .unwrap_or_default()
                    );
                }
            }
        }
    }
    Ok(())
}

/// Hosts normally pre-filter with the info() prefix hint; emulate that and
/// flag strings the manager would never be asked about.
fn warn_on_unrecognized(plugin: &dyn ManagerPlugin, references: &[EntityReference]) {
    for reference in references {
        if !plugin.is_entity_reference_string(reference.as_str()) {
            tracing::warn!(reference = %reference, "string is not recognized by this manager");
        }
    }
}

fn discover_manifests(dir: &PathBuf) -> Result<Vec<PluginManifest>> {
    let mut manifests = Vec::new();
    if !dir.exists() {
        return Ok(manifests);
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let data = fs::read_to_string(&path)?;
        let manifest: PluginManifest = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        manifests.push(manifest);
    }
    Ok(manifests)
}
