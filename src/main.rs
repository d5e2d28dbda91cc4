use folio::config::{Config, USAGE};
use folio::page::Page;
use folio::report::Suite;
use std::process::ExitCode;
use tracing::{error, info, warn, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Exit status when the page could not be checked at all
const EXIT_UNUSABLE: u8 = 2;

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(EXIT_UNUSABLE);
        }
    };
    if config.help {
        print!("{}", USAGE);
        return ExitCode::SUCCESS;
    }
    if config.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::DEBUG)
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish()
            .init();
        info!("Logger initialized");
    }

    let page = match Page::load(&config.paths) {
        Ok(page) => page,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::from(EXIT_UNUSABLE);
        }
    };

    let mut suite = Suite::all();
    if let Some(filter) = &config.filter {
        suite = suite.filtered(filter);
        if suite.is_empty() {
            warn!(filter = filter.as_str(), "No checks match the filter");
            eprintln!("no checks match the filter {:?}", filter);
            return ExitCode::from(EXIT_UNUSABLE);
        }
    }
    let report = suite.run(&page);
    print!("{}", report);
    if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
