//! Trace capturing facilities.

use std::io;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// The filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "storefront_api=info,warn";

/// Initializes [`tracing-subscriber`].
///
/// Logs are written to stderr. The filter is read from `RUST_LOG`.
///
/// [`tracing-subscriber`]: tracing_subscriber
pub fn init() -> anyhow::Result<()>
{
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(DEFAULT_FILTER)?,
	};

	let stderr = tracing_subscriber::fmt::layer()
		.pretty()
		.with_ansi(true)
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_writer(io::stderr)
		.with_filter(filter);

	tracing_subscriber::registry().with(stderr).try_init()?;

	tracing::info!("initialized tracing");

	Ok(())
}
