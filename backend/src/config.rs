//! Runtime configuration, read from the command line with environment fallbacks.

use clap::Parser;
use std::net::SocketAddr;

use crate::storage::sqlite::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone, Parser)]
#[command(name = "eaglebank-backend", version, about = "Eagle Bank REST backend")]
pub struct AppConfig {
    /// SQLite database URL; the file is created if missing
    #[arg(long, env = "EAGLEBANK_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "EAGLEBANK_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "EAGLEBANK_CORS_ORIGIN", default_value = "http://localhost:8080")]
    pub cors_origin: String,
}
