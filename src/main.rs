use chrono::Local;
use clap::Parser;
use help_catalog::{
    Args,
    catalog::{DeclaredCatalog, render_declared},
    config::HelpCfg,
    console::{Status, log_catalog, render_box, status_line},
    error::HelpError,
};
use snafu::ResultExt;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %Z"))
    }
}

fn run(args: Args) -> Result<(), HelpError> {
    let colored = !args.plain;
    let cfg = HelpCfg::read(&args.config)?;
    info!("Loaded configuration from {}", cfg.path.display());
    eprintln!("{}", status_line("configuration", Status::Ok, colored));

    let raw = std::fs::read_to_string(&args.catalog)
        .whatever_context::<_, HelpError>(format!("Failed to read {}", args.catalog.display()))?;
    let catalog = match DeclaredCatalog::from_json(&raw) {
        Ok(catalog) => catalog,
        Err(why) => {
            eprintln!("{}", status_line("catalog", Status::Fail, colored));
            return Err(why);
        }
    };
    let status = if catalog.is_empty() { Status::Warn } else { Status::Ok };
    eprintln!("{}", status_line("catalog", status, colored));

    let rendered = render_declared(&catalog, &cfg.render);
    log_catalog(&rendered);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        println!("{}", render_box(&rendered, colored));
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(true)
        .with_timer(LocalTime)
        .with_writer(std::io::stderr)
        .init();

    if let Err(why) = run(Args::parse()) {
        error!("{why}");
        std::process::exit(1);
    }
}
