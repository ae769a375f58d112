use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use blockies::{create_icon, render_svg, svg_data_uri, Identicon, RawOptions};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// SVG markup
    Svg,
    /// base64 `data:` URI of the SVG markup
    DataUri,
    /// binary PPM image
    Ppm,
    /// resolved options and grid as JSON
    Json,
}

/// Generate a deterministic blocky identicon
#[derive(Debug, Parser)]
#[command(name = "blockies", version, about)]
struct Args {
    /// Seed string; a random seed is used when omitted
    #[arg(long)]
    seed: Option<String>,

    /// Grid side length in cells
    #[arg(long)]
    size: Option<u32>,

    /// Pixels per cell
    #[arg(long)]
    scale: Option<u32>,

    /// Primary color (#rgb or #rrggbb)
    #[arg(long)]
    color: Option<String>,

    /// Background color (#rgb or #rrggbb)
    #[arg(long)]
    bgcolor: Option<String>,

    /// Spot color (#rgb or #rrggbb)
    #[arg(long)]
    spotcolor: Option<String>,

    /// Options as a JSON object; individual flags take precedence
    #[arg(long, value_name = "JSON")]
    options: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn raw_options(&self) -> anyhow::Result<RawOptions> {
        let base = match &self.options {
            Some(text) => RawOptions::from_json_str(text).context("parsing --options")?,
            None => RawOptions::default(),
        };
        let flags = RawOptions {
            seed: self.seed.clone(),
            size: self.size,
            scale: self.scale,
            color: self.color.clone(),
            bgcolor: self.bgcolor.clone(),
            spotcolor: self.spotcolor.clone(),
        };
        Ok(base.merge(flags))
    }
}

fn render(format: Format, options: &RawOptions) -> anyhow::Result<Vec<u8>> {
    let bytes = match format {
        Format::Svg => render_svg(&Identicon::generate(options)).into_bytes(),
        Format::DataUri => svg_data_uri(options).into_bytes(),
        Format::Ppm => create_icon(options).context("rasterizing icon")?.to_ppm(),
        Format::Json => serde_json::to_vec_pretty(&Identicon::generate(options))?,
    };
    Ok(bytes)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = args.raw_options()?;
    let bytes = render(args.format, &options)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&bytes)?;
            if args.format != Format::Ppm {
                writeln!(out)?;
            }
            out.flush()?;
        }
    }
    Ok(())
}
