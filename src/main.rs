use anyhow::Context;
use storefront_api::Config;

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("Failed to load `.env` file: {error}");
	}

	logging::init().context("initialize tracing")?;

	let config = Config::new().context("load configuration")?;

	storefront_api::run(config).await
}
