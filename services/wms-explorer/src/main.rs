//! WMS layer explorer CLI.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use layer_session::LayerSession;
use wms_common::CrsCode;
use wms_explorer::{client, query_feature_info, ExplorerConfig, WmsClient};

#[derive(Parser)]
#[command(name = "wms-explorer")]
#[command(about = "Explore the layers of OGC WMS servers", long_about = None)]
struct Cli {
    /// Path to the server list
    #[arg(short, long, env = "EXPLORER_CONFIG", default_value = "config/servers.yaml")]
    config: PathBuf,

    /// Fetch capabilities through a running wms-proxy
    #[arg(long, env = "WMS_PROXY_URL")]
    proxy_url: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured servers
    Servers,

    /// List the layers a server advertises
    Layers {
        /// Configured server id or WMS URL
        #[arg(short, long)]
        server: String,

        /// Only show layers whose title or name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show the extent to zoom to for a layer
    Extent {
        #[arg(short, long)]
        server: String,

        #[arg(short, long)]
        layer: String,
    },

    /// Show title, abstract and bounding box of a layer
    Info {
        #[arg(short, long)]
        server: String,

        #[arg(short, long)]
        layer: String,
    },

    /// Print the GetLegendGraphic URL of a layer
    Legend {
        #[arg(short, long)]
        server: String,

        #[arg(short, long)]
        layer: String,
    },

    /// Query feature information at a location over several layers
    Query {
        #[arg(short, long)]
        server: String,

        /// Layers to put on the map, in display order (repeatable)
        #[arg(short, long = "layer", required = true)]
        layers: Vec<String>,

        /// Active layers to hide before querying (repeatable)
        #[arg(long)]
        hide: Vec<String>,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Degrees per pixel of the query window
        #[arg(long)]
        resolution: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // stdout carries command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = ExplorerConfig::load_or_default(&cli.config)?;
    let proxy_url = cli.proxy_url.clone().or_else(|| config.proxy_url.clone());
    let wms = WmsClient::new(Duration::from_secs(config.request_timeout_secs), proxy_url)?;

    match cli.command {
        Commands::Servers => {
            if config.servers.is_empty() {
                println!("No servers configured in {}", cli.config.display());
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec!["ID", "Title", "URL"]);
            for server in &config.servers {
                table.add_row(vec![&server.id, &server.title, &server.url]);
            }
            println!("{table}");
        }

        Commands::Layers { server, filter } => {
            let session = open_session(&wms, &config, &server).await?;
            let Some(document) = session.document() else {
                bail!("No capabilities loaded");
            };

            println!("{}", document.service_title);
            println!("{}\n", document.service_abstract);

            let layers = match &filter {
                Some(query) => document.search(query),
                None => document.layers.iter().collect(),
            };

            if layers.is_empty() {
                match filter {
                    Some(query) => println!("No layers match '{}'", query),
                    None => println!("No layers found in the GetCapabilities response"),
                }
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec!["Name", "Title"]);
            for layer in &layers {
                table.add_row(vec![&layer.name, &layer.title]);
            }
            println!("{table}");
            println!("{} of {} layers", layers.len(), document.layer_count());
        }

        Commands::Extent { server, layer } => {
            let session = open_session(&wms, &config, &server).await?;
            let extent = session.extent(&layer)?;
            let bbox = extent.bbox();
            let units = CrsCode::from_wms_string(&extent.crs)
                .map(|crs| crs.units())
                .unwrap_or("units");

            println!("Layer:  {}", layer);
            println!("CRS:    {}", extent.crs);
            println!("Lower:  {}, {}", extent.min_x, extent.min_y);
            println!("Upper:  {}, {}", extent.max_x, extent.max_y);
            println!("Size:   {} x {} {}", bbox.width(), bbox.height(), units);
        }

        Commands::Info { server, layer } => {
            let session = open_session(&wms, &config, &server).await?;
            let info = session.layer_info(&layer)?;

            println!("{}", info.title);
            println!("{}", info.abstract_text);
            println!("Bounding box: {}", info.bbox_summary);
        }

        Commands::Legend { server, layer } => {
            let server_url = config.resolve_server(&server)?;
            println!("{}", client::legend_url(&server_url, &layer)?);
        }

        Commands::Query {
            server,
            layers,
            hide,
            lon,
            lat,
            resolution,
            format,
        } => {
            let mut session = open_session(&wms, &config, &server).await?;

            for name in &layers {
                let title = session
                    .document()
                    .and_then(|doc| doc.lookup(name))
                    .map(|descriptor| descriptor.title.clone())
                    .unwrap_or_else(|| name.clone());
                session.activate(name.as_str(), title)?;
            }
            for name in &hide {
                session.set_visibility(name, false)?;
            }

            let resolution = resolution.unwrap_or(config.feature_info_resolution);
            let report = query_feature_info(&wms, &session, lon, lat, resolution).await;

            match format {
                OutputFormat::Text => println!("{}", report.to_text()),
                OutputFormat::Html => println!("{}", report.to_html()),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
        }
    }

    Ok(())
}

/// Fetch and parse the capabilities of a server into a fresh session.
async fn open_session(
    wms: &WmsClient,
    config: &ExplorerConfig,
    server: &str,
) -> Result<LayerSession> {
    let server_url = config.resolve_server(server)?;
    let xml = wms.fetch_capabilities(&server_url).await?;

    let mut session = LayerSession::new();
    let document = session.load_capabilities(server_url.as_str(), &xml)?;
    debug!(
        server = %server_url,
        layers = document.layer_count(),
        "Loaded capabilities"
    );
    Ok(session)
}
