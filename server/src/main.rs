//! docxtract server - HTTP backend for document extraction, JSON storage,
//! and image upload.

mod config;
mod error;
mod routes;
mod store;
mod upload;

use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::store::JsonStore;
use crate::upload::CloudinaryUploader;

#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP backend for document extraction and storage")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (overrides PORT from the environment)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let store = JsonStore::connect(&config).await?;
    let uploader = CloudinaryUploader::new(config.cloudinary.clone());
    let app = routes::create_router(store, uploader);

    let addr = format!("{}:{}", args.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
