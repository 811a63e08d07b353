use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mapstate::prelude::*;
use serde_json::json;

#[derive(Parser)]
#[command(
    name = "mapstate",
    version,
    about = "Resolve, encode and decode map view states"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the initial view a map URL would open with.
    Resolve {
        /// Page URL (query and fragment are read).
        url: String,
        /// IANA time zone of the visitor.
        #[arg(long)]
        timezone: Option<String>,
        /// View configuration JSON.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Time-zone bounds JSON.
        #[arg(long)]
        timezones: Option<PathBuf>,
        /// Last stored location as `lon|lat|zoom|layers`.
        #[arg(long)]
        stored: Option<String>,
    },
    /// Write a view as URL hash, short link and geo URI.
    Encode {
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long)]
        zoom: u8,
        /// Active layer code.
        #[arg(long, default_value = "")]
        layers: String,
        /// Ask the short link to drop a marker.
        #[arg(long)]
        marker: bool,
    },
    /// Read a URL hash, short link, bare token or geo URI.
    Decode {
        input: String,
    },
}

fn main() -> Result<()> {
    mapstate::init_logging();

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Resolve {
            url,
            timezone,
            config,
            timezones,
            stored,
        } => {
            let config = config
                .as_deref()
                .map(load_config)
                .transpose()
                .context("load view config")?
                .unwrap_or_default();
            let timezones = timezones
                .as_deref()
                .map(load_timezones)
                .transpose()
                .context("load time-zone bounds")?
                .unwrap_or_default();
            let store = stored
                .as_deref()
                .map(MemoryStateStore::from_location)
                .unwrap_or_default();

            let mut request = ResolveRequest::from_url(&url);
            if let Some(timezone) = timezone {
                request = request.with_timezone(timezone);
            }

            let view = InitialStateResolver::new(config)
                .with_store(&store)
                .with_timezones(&timezones)
                .resolve_view(&request);

            json!({
                "view": view,
                "hash": StateCodec::encode_hash(&view.state),
            })
        }
        Command::Encode {
            lon,
            lat,
            zoom,
            layers,
            marker,
        } => {
            let state = MapState::new(lon, lat, zoom).with_layers(layers);
            if !state.is_valid() {
                bail!("view out of range: {:?}", state);
            }

            json!({
                "hash": StateCodec::encode_hash(&state),
                "short_link": ShortLinkCodec::path(&state, marker)?,
                "geo_uri": encode_geo_uri(&state),
            })
        }
        Command::Decode { input } => decode(&input)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn decode(input: &str) -> Result<serde_json::Value> {
    let is_geo = input
        .get(..4)
        .map_or(false, |scheme| scheme.eq_ignore_ascii_case("geo:"));
    if is_geo {
        let state = decode_geo_uri(input).context("unreadable geo URI")?;
        return Ok(json!({ "kind": "geo_uri", "state": state }));
    }

    if input.contains("/go/") {
        let target = ShortLinkTarget::parse(input).context("unreadable short link")?;
        return Ok(json!({
            "kind": "short_link",
            "state": target.state,
            "marker": target.marker,
            "expanded": target.expand(),
        }));
    }

    if input.contains('#') {
        let state = StateCodec::decode_hash(input).context("unreadable URL hash")?;
        return Ok(json!({ "kind": "hash", "state": state }));
    }

    let state = ShortLinkCodec::decode(input)?;
    Ok(json!({ "kind": "token", "state": state }))
}

fn load_config(path: &Path) -> Result<ViewConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config = ViewConfig::from_json(&text)?;
    log::debug!("loaded view config from {}", path.display());
    Ok(config)
}

fn load_timezones(path: &Path) -> Result<StaticTimezoneBounds> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let table = StaticTimezoneBounds::from_json(&text)?;
    log::debug!("loaded {} time-zone bounds", table.len());
    Ok(table)
}
