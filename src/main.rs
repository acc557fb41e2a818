use clap::{Parser, Subcommand};
use printsite::generate::{self, Site};
use printsite::{config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "printsite")]
#[command(about = "Static site builder for a printer-driver project website")]
#[command(long_about = "\
Static site builder for a printer-driver project website

Page fragments in the content directory are wrapped in a shared layout with
a navigation bar above and below the content.

Content structure:

  content/
  ├── config.toml          # Optional, see 'printsite gen-config'
  ├── index.html           # Home page, always first in the nav bar
  ├── p_Download.html      # Nav page labelled \"Download\"
  ├── p_FAQ.html           # Nav page labelled \"FAQ\"
  ├── images/              # <!--#image name=\"logo\" --> finds images/logo.png
  └── assets/              # Copied to the output root

Directives inside fragments:

  <!--#image name=\"logo\" alt=\"Logo\" class=\"right\" -->
  <!--#nav caption=\"Back to top\" -->

Set RUST_LOG=info to see every rendered page, RUST_LOG=debug for image probes.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page into the output directory
    Build,
    /// Render every page without writing anything
    Check,
    /// Print the navigation bar as seen from one page
    Nav {
        /// Page the bar is rendered for, e.g. p_FAQ.html
        #[arg(default_value = "")]
        page: String,
        /// Trailing text of the bar
        #[arg(long)]
        caption: Option<String>,
        /// Print the nav entries as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!(
                "==> Building {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::build(&cli.source, &cli.output)?;
            output::print_build_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = generate::check(&cli.source)?;
            output::print_build_output(&report);
        }
        Command::Nav {
            page,
            caption,
            json,
        } => {
            let site = Site::load(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&site.pages()?)?);
            } else {
                output::print_nav_listing(&site.pages()?);
                println!();
                println!("{}", site.nav(&page, caption.as_deref())?.into_string());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so they never mix with command output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
