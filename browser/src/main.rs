//! Terminal photo browser.
//!
//! Searches Flickr by tag and prints one page of photo ids, optionally with
//! thumbnail and large image URLs. Configuration comes from the environment
//! (see `FlickrConfig::from_env`); Ctrl-C cancels requests still in flight.
//! Every failure, configuration included, prints `no results: <reason>` and
//! exits non-zero.

mod listing;

use std::process::ExitCode;

use clap::Parser;
use flickr_core::{ConfigError, FlickrConfig, FlickrPhotosRequest, FlickrRestService};
use rest_transport::JsonTransport;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::listing::Listing;

#[derive(Parser, Debug)]
#[command(version, about = "Browse Flickr photos by tag")]
struct Args {
    /// Tags to search for; prefix a tag with `-` to exclude it.
    #[arg(required = true)]
    tags: Vec<String>,

    /// Page of results to show.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Also look up thumbnail and large image URLs for every photo.
    #[arg(long)]
    sizes: bool,
}

/// Build the service from `config` and run one search.
///
/// Configuration and transport failures become an empty listing, like any
/// other failure.
async fn browse(
    config: Result<FlickrConfig, ConfigError>,
    request: &FlickrPhotosRequest,
    with_sizes: bool,
    cancel: CancellationToken,
) -> Listing {
    let config = match config {
        Ok(config) => config,
        Err(err) => return Listing::empty(format!("loading configuration: {err}")),
    };
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "configured");

    let transport = match JsonTransport::with_timeout(&config.base_url, config.timeout) {
        Ok(transport) => transport.with_cancellation(cancel),
        Err(err) => return Listing::empty(format!("building transport: {err}")),
    };
    let service = FlickrRestService::new(config, transport);

    listing::load(&service, request, with_sizes).await
}

/// Process status for a finished search: 1 when nothing could be shown.
fn exit_status(listing: &Listing) -> u8 {
    u8::from(listing.is_empty())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupted, cancelling requests");
                cancel.cancel();
            }
        }
    });

    let request = FlickrPhotosRequest::with_tags(args.tags).page(args.page);
    let listing = browse(FlickrConfig::from_env(), &request, args.sizes, cancel).await;
    interrupt.abort();

    if listing.is_empty() {
        println!("{listing}");
    } else {
        print!("{listing}");
    }
    ExitCode::from(exit_status(&listing))
}
