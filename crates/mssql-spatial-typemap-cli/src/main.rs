//! mssql-spatial-typemap CLI - resolve SQL Server spatial type mappings.

use clap::{Parser, Subcommand};
use mssql_spatial_typemap::{
    ClrType, Config, MappingError, MappingInfo, SqlServerGeometryTypeMapping,
    SqlServerSpatialTypeMappingPlugin, TypeMappingCatalog,
};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mssql-spatial-typemap")]
#[command(about = "Resolve SQL Server geometry/geography type mappings")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file [default: config.yaml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the type mapping for an application type and/or store type
    Resolve {
        /// Application type (e.g. Point, Polygon, Geometry, String)
        #[arg(long)]
        clr_type: Option<String>,

        /// Column store type (e.g. geography, geometry, varchar)
        #[arg(long)]
        store_type: Option<String>,
    },

    /// Parse a WKT value through the resolved spatial mapping
    Parse {
        /// Well-known text of the value
        #[arg(long)]
        wkt: String,

        /// Application type the value is read into
        #[arg(long)]
        clr_type: Option<String>,

        /// Column store type [default: geography]
        #[arg(long)]
        store_type: Option<String>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), MappingError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(|e| MappingError::Config(e.to_string()))?;

    let config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(ref path) = cli.config {
        info!("Loaded configuration from {:?}", path);
    }
    let services = Arc::new(config.geometry_services()?);

    match cli.command {
        Commands::Resolve {
            clr_type,
            store_type,
        } => {
            let info = MappingInfo::new(parse_clr_type(clr_type.as_deref())?, store_type);
            let catalog = TypeMappingCatalog::with_spatial(services);
            debug!("Resolving {}", info);

            let mapping = catalog.find_mapping(&info)?;
            let spatial = mapping
                .as_ref()
                .and_then(|m| m.as_any().downcast_ref::<SqlServerGeometryTypeMapping>());

            if cli.output_json {
                let output = match spatial {
                    Some(m) => json!({
                        "mapped": true,
                        "clr_type": m.clr_type().name(),
                        "store_type": m.store_type(),
                        "is_geography": m.is_geography(),
                        "srid": m.factory().srid(),
                    }),
                    None => json!({ "mapped": false }),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                match spatial {
                    Some(m) => {
                        println!("Spatial mapping:");
                        println!("  CLR type: {}", m.clr_type());
                        println!("  Store type: {}", m.store_type());
                        println!(
                            "  Kind: {}",
                            if m.is_geography() { "geography" } else { "geometry" }
                        );
                        println!("  SRID: {}", m.factory().srid());
                    }
                    None => println!("No mapping for {}", info),
                }
            }
        }

        Commands::Parse {
            wkt,
            clr_type,
            store_type,
        } => {
            let clr_type = parse_clr_type(clr_type.as_deref())?;
            let plugin = SqlServerSpatialTypeMappingPlugin::new(services);

            // Without any hint the value is read as a geography.
            let store_type = match (&clr_type, store_type) {
                (None, None) => Some("geography".to_string()),
                (_, store_type) => store_type,
            };

            let mapping = plugin
                .resolve(clr_type.as_ref(), store_type.as_deref())?
                .ok_or_else(|| {
                    MappingError::Config(format!(
                        "No spatial mapping for {}",
                        MappingInfo::new(clr_type.clone(), store_type.clone())
                    ))
                })?;

            let value = mapping.parse_wkt(&wkt)?;
            let text = mapping.write_wkt(&value);

            if cli.output_json {
                let output = json!({
                    "store_type": mapping.store_type(),
                    "kind": value.kind().name(),
                    "srid": value.srid,
                    "wkt": text,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("Parsed value:");
                println!("  Store type: {}", mapping.store_type());
                println!("  Kind: {}", value.kind());
                println!("  SRID: {}", value.srid);
                println!("  WKT: {}", text);
            }
        }
    }

    Ok(())
}

fn parse_clr_type(name: Option<&str>) -> Result<Option<ClrType>, MappingError> {
    name.map(str::parse::<ClrType>).transpose()
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays parseable.
///
/// `RUST_LOG` takes precedence over `--verbosity` when set.
fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("unknown verbosity '{}'", other)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
