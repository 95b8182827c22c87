//! Infinite-scrolling crypto asset table
//!
//! Rank | Icon | Name | Price | Market Cap, paged in from the CoinCap
//! assets endpoint as the list is scrolled.

pub mod app;
pub mod config;
pub mod data;
pub mod feed;
pub mod logging;
pub mod request;
pub mod third_party;
pub mod ui;

use crate::app::App;
use crate::config::Settings;
use clap::Parser;
use color_eyre::Result;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = Settings::parse();
    logging::init(&settings.log_file)?;

    let app = App::new(settings);
    app.run().await
}
