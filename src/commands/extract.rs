//! Extract subcommand handler

use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use rtr::cli::ExtractArgs;
use rtr::{Config, ExportSource, ExtractError, FileSource, HttpSource, Response, Session, ThreadUrl};

/// Acquire a thread from a URL or a saved export and print it.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: ExtractArgs) -> Result<()> {
    let config = Config::load()?;
    let (render, filters) = args.view.resolve(&config);

    let mut options = config.fetch.options();
    if let Some(secs) = args.timeout {
        options.timeout = Duration::from_secs(secs.max(1));
    }

    let location = match args.url.as_deref().map(ThreadUrl::parse).transpose() {
        Ok(location) => location,
        Err(err) if args.envelope => {
            return print_envelope(Err(ExtractError::from(err)));
        }
        Err(err) => return Err(err.into()),
    };

    let source: Box<dyn ExportSource> = match (location, &args.input) {
        (Some(location), Some(path)) => Box::new(FileSource::new(path).for_location(location)),
        (None, Some(path)) => Box::new(FileSource::new(path)),
        (Some(location), None) => Box::new(HttpSource::new(location, &options)?),
        (None, None) => return Err(anyhow!("Either a URL or --input is required")),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let mut session = Session::new(render, filters);
    let result = runtime.block_on(session.extract(&*source));

    if args.envelope {
        return print_envelope(result);
    }

    match result {
        Ok(output) => super::emit(&output, args.copy),
        Err(err) => Err(anyhow!(err.user_message())),
    }
}

#[cfg(not(tarpaulin_include))]
fn print_envelope(result: Result<String, ExtractError>) -> Result<()> {
    let response = Response::from(result);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
