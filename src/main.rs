mod ascii;
mod collectors;
mod config;
mod render;
mod report;
mod style;

use clap::Parser;
use collectors::system::SysinfoSource;
use collectors::toolchains::ProcessRunner;
use config::{Config, Layout};
use report::{write_report, Format};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ngfetch")]
#[command(version, about = "Host facts and installed toolchains in one report")]
struct Cli {
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    print_default_config: bool,
    /// Disable ASCII art display
    #[arg(long)]
    no_ascii: bool,
    /// Disable colored output
    #[arg(long)]
    no_colors: bool,
    #[arg(long, value_enum)]
    layout: Option<Layout>,
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        println!("{}", Config::example_yaml());
        return;
    }

    let mut cfg = match cli.config.as_deref() {
        Some(path) => match Config::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                error!(error = %err, "не удалось загрузить конфигурацию");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    if cli.no_ascii {
        cfg.ascii.enabled = false;
    }
    if cli.no_colors {
        cfg.colors.enabled = false;
    }
    if let Some(layout) = cli.layout {
        cfg.layout = layout;
    }
    let format = if cli.json { Format::Json } else { Format::Text };

    if cfg.ascii.enabled && format == Format::Text {
        match ascii::load_art(&cfg.ascii.assets_dir, &cfg.ascii.name) {
            Ok(art) => println!("{art}"),
            Err(err) => warn!(error = %err, "ASCII-арт пропущен"),
        }
    }

    let mut source = SysinfoSource::new();
    let mut stdout = std::io::stdout().lock();
    if let Err(err) = write_report(&mut source, &ProcessRunner, &cfg, format, &mut stdout).await {
        error!(error = %err, "отчёт не сформирован");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
