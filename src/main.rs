use clap::{Parser, Subcommand};
use gallerygen::config::{self, BuildConfig};
use gallerygen::{generate, metadata, output};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup; called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "gallerygen")]
#[command(about = "Static site generator for item galleries")]
#[command(long_about = "\
Static site generator for item galleries

Every subdirectory of the content directory is an item. Its meta.json
supplies the fields for its page; its images are resized into a full-size
and a thumbnail variant.

Content structure:

  contents/
  ├── meta.json            # Site fields, e.g. {\"title\": \"Gallery\"}
  └── cat/                 # Item (directory name = URL segment)
      ├── meta.json        # {\"title\": \"Cat\", \"thumb\": \"a.jpg\", ...}
      ├── a.jpg            # Images: jpg, jpeg, gif, png
      └── b.png

Templates (templates/index.html, templates/item.html) use MiniJinja syntax.
The output directory is deleted and regenerated on every build.

Run 'gallerygen gen-config' to generate a documented gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file [default: gallery.toml, used only if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content directory (overrides config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Template directory (overrides config)
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the site (default)
    Build,
    /// Validate the content directory without writing anything
    Check,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    // Failures go to stdout like all other output; the exit status carries the signal.
    if let Err(e) = run(cli) {
        println!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let config = resolve_config(&cli)?;
            init_thread_pool(&config.processing);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_build_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = generate::build(&config, Some(tx));
            printer.join().ok();

            output::print_build_summary(&result?, &config.output_dir);
        }
        Command::Check => {
            let config = resolve_config(&cli)?;
            println!("==> Checking {}", config.content_dir.display());
            let outcome = metadata::load_site(&config)?;
            output::print_load_output(&outcome);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and apply command-line path overrides.
///
/// An explicit `--config` must exist; the implicit `gallery.toml` is optional.
fn resolve_config(cli: &Cli) -> Result<BuildConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new(config::CONFIG_FILE))?,
    };
    if let Some(source) = &cli.source {
        config.content_dir = source.clone();
    }
    if let Some(templates) = &cli.templates {
        config.template_dir = templates.clone();
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    Ok(config)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Config can lower it, never raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
