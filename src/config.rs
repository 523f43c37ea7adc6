//! Command-line configuration and fixed presentation constants.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sector selected when a session starts, if present in the data.
pub const DEFAULT_SECTOR: &str = "Banquet Halls";

/// Default source file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/la_wedding_venue_data_lat_long.csv";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

/// Rows per page in the venue table.
pub const PAGE_SIZE: usize = 10;

/// Map marker diameter in points.
pub const MARKER_SIZE: f32 = 15.0;

/// Live HTTP sessions kept before the least recently used one is dropped.
pub const MAX_SESSIONS: usize = 1024;

/// Wedding venue price dashboard.
#[derive(Debug, Parser)]
#[command(name = "venue-dash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Venue data file (.csv, .parquet or .json)
    #[arg(long, global = true, env = "VENUE_DASH_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Sector selected when a session starts
    #[arg(long, global = true, env = "VENUE_DASH_DEFAULT_SECTOR", default_value = DEFAULT_SECTOR)]
    pub default_sector: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the native dashboard window (default)
    Gui,

    /// Serve the dashboard over HTTP
    Serve {
        /// Address to bind
        #[arg(long, env = "VENUE_DASH_HOST", default_value = DEFAULT_HOST)]
        host: IpAddr,

        /// Port to bind
        #[arg(short, long, env = "VENUE_DASH_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

impl Cli {
    /// The subcommand to run; no subcommand means the native window.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Gui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_opens_gui_with_defaults() {
        let cli = Cli::try_parse_from(["venue-dash"]).unwrap();
        assert!(matches!(cli.command(), Command::Gui));
        assert_eq!(cli.default_sector, DEFAULT_SECTOR);
        assert_eq!(cli.data, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn serve_accepts_host_port_and_global_data() {
        let cli = Cli::try_parse_from([
            "venue-dash",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--data",
            "venues.parquet",
        ])
        .unwrap();
        match cli.command() {
            Command::Serve { host, port } => {
                assert_eq!(host.to_string(), "0.0.0.0");
                assert_eq!(port, 9000);
            }
            Command::Gui => panic!("expected serve"),
        }
        assert_eq!(cli.data, PathBuf::from("venues.parquet"));
    }
}
