use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use forcemap::config::RenderConfig;
use forcemap::generator;
use forcemap::server;

/// Force-directed graph layout and rendering.
#[derive(Parser)]
#[command(name = "forcemap")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RenderOpts {
    /// Canvas width
    #[arg(long, default_value_t = 500.0)]
    width: f32,

    /// Canvas height
    #[arg(long, default_value_t = 300.0)]
    height: f32,

    /// Centering pull strength
    #[arg(long, default_value_t = 0.15)]
    gravity: f32,

    /// Target rest distance for linked nodes
    #[arg(long = "distance", default_value_t = 70.0)]
    link_distance: f32,

    /// Charge strength; negative values repel
    #[arg(long, default_value_t = -100.0, allow_negative_numbers = true)]
    charge: f32,

    /// Asset reference for the path-node fill pattern
    #[arg(long)]
    pattern: Option<String>,
}

impl RenderOpts {
    fn into_config(self) -> RenderConfig {
        let mut config = RenderConfig {
            width: self.width,
            height: self.height,
            gravity: self.gravity,
            link_distance: self.link_distance,
            charge: self.charge,
            ..RenderConfig::default()
        };
        if let Some(pattern) = self.pattern {
            config.pattern_href = pattern;
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a graph description to a static output
    Render {
        /// Input graph description (.json, .yaml)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Output format: svg, html, or json
        #[arg(short, long, default_value = "svg")]
        format: String,

        #[command(flatten)]
        opts: RenderOpts,
    },
    /// Render, watch the input for changes, and serve with live reload
    Serve {
        /// Input graph description (.json, .yaml)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Output format served from the output directory
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Port to run the server on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        #[command(flatten)]
        opts: RenderOpts,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            opts,
        } => {
            generator::generate(&input, &output, &format, &opts.into_config())?;
            println!(
                "Rendered {} as {} in {}",
                input.display(),
                format,
                output.display()
            );
        }
        Commands::Serve {
            input,
            output,
            format,
            port,
            opts,
        } => {
            server::serve(&input, &output, &format, port, opts.into_config()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_render_subcommand() {
        let cli = Cli::try_parse_from([
            "forcemap", "render", "--input", "graph.json", "--output", "out", "--format", "html",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                input,
                output,
                format,
                ..
            } => {
                assert_eq!(input, PathBuf::from("graph.json"));
                assert_eq!(output, PathBuf::from("out"));
                assert_eq!(format, "html");
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn cli_render_defaults_to_svg() {
        let cli = Cli::try_parse_from(["forcemap", "render", "--input", "graph.json"]).unwrap();
        match cli.command {
            Commands::Render { format, opts, .. } => {
                assert_eq!(format, "svg");
                let config = opts.into_config();
                assert_eq!(config.width, 500.0);
                assert_eq!(config.charge, -100.0);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn cli_parses_physics_overrides() {
        let cli = Cli::try_parse_from([
            "forcemap", "render", "--input", "g.json", "--charge", "-40", "--distance", "120",
            "--pattern", "tile.png",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { opts, .. } => {
                let config = opts.into_config();
                assert_eq!(config.charge, -40.0);
                assert_eq!(config.link_distance, 120.0);
                assert_eq!(config.pattern_href, "tile.png");
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn cli_parses_serve_subcommand() {
        let cli = Cli::try_parse_from([
            "forcemap", "serve", "--input", "graph.json", "--port", "8080",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve { port, format, .. } => {
                assert_eq!(port, 8080);
                assert_eq!(format, "html");
            }
            _ => panic!("Expected Serve command"),
        }
    }
}
