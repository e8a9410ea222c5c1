use clap::{Parser, Subcommand};
use section_press::media::CdnAssetUrls;
use section_press::render::RenderContext;
use section_press::{config, generate, output, schema};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "section-press")]
#[command(about = "Render CMS page sections into static HTML")]
#[command(long_about = "\
Render CMS page sections into static HTML

Pages are read from a site document exported from the content store. Every
section is checked against its schema, localized, and rendered with its
images resolved to displayable URLs.

Site document:

  {
    \"pages\": [
      {
        \"slug\": \"index\",
        \"title\": \"Home\",
        \"sections\": [
          { \"_type\": \"contentBanner\", \"title\": \"...\", \"layout\": \"right-image\" },
          { \"_type\": \"posterBanner\", \"imageUrl\": \"https://drive.google.com/file/d/...\" },
          { \"_type\": \"productShowcase\", \"headerData\": { \"title\": \"...\" } },
          { \"_type\": \"testimonialsSection\", \"title\": \"...\" }
        ]
      }
    ],
    \"products\": [ { \"_id\": \"...\", \"title\": \"...\", \"category\": \"...\" } ]
  }

Content problems never stop a build: they are logged (RUST_LOG=warn, the
default) and the section renders with whatever data is usable.

Run 'section-press gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Render in this locale instead of the configured one
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page of a site document to HTML
    Generate {
        /// Site document (JSON)
        input: PathBuf,
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Validate a site document against the section schemas without rendering
    Check {
        /// Site document (JSON)
        input: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print a schema descriptor as JSON, or list schema names
    Schema {
        /// Document type, e.g. contentBanner
        name: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            input,
            output: output_dir,
        } => {
            let site_config = load_config(&cli.config, cli.locale)?;
            let assets = CdnAssetUrls::new(&site_config.assets);
            let ctx = RenderContext::new(&site_config, &assets);
            let pages = generate::generate(&input, &output_dir, &ctx)?;
            output::print_generate_output(&pages);
            println!("Site generated at {}", output_dir.display());
        }
        Command::Check { input } => {
            let site_config = load_config(&cli.config, cli.locale)?;
            let site = generate::load_site(&input)?;
            let pages = generate::check_site(&site, &site_config);
            output::print_check_output(&pages);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Schema { name: None } => {
            for name in schema::SCHEMA_NAMES {
                println!("{name}");
            }
        }
        Command::Schema { name: Some(name) } => {
            let descriptor = schema::by_name(&name).ok_or_else(|| {
                format!(
                    "unknown schema '{name}' (expected one of: {})",
                    schema::SCHEMA_NAMES.join(", ")
                )
            })?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
    }

    Ok(())
}

/// Load config, applying the `--locale` override.
fn load_config(
    path: &std::path::Path,
    locale: Option<String>,
) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(path)?;
    if let Some(locale) = locale {
        log::debug!("rendering in locale '{locale}'");
        site_config.locale.active = locale;
        site_config.validate()?;
    }
    Ok(site_config)
}
