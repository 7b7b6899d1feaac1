use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use clap::Parser;
use tracing::Level;
use crate::bootstrap::StoragePaths;

pub const APP_NAME: &str = "album-server";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 52_428_800; // 50 MB

#[derive(Parser, Debug)]
#[command(name = APP_NAME, version, about = "REST backend for photo albums")]
pub struct AppArgs {
    #[arg(long, env = "ALBUM_SERVER_HOST", default_value = "0.0.0.0", help = "Address to listen on")]
    pub host: IpAddr,

    #[arg(long, env = "ALBUM_SERVER_PORT", default_value_t = DEFAULT_PORT, help = "Port to listen on")]
    pub port: u16,

    #[arg(long, env = "ALBUM_SERVER_WORKDIR", help = "Directory holding the database and uploads [default: <tempdir>/album-server]")]
    pub workdir: Option<PathBuf>,

    #[arg(long, env = "ALBUM_SERVER_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES, help = "Request body limit for photo uploads")]
    pub max_upload_bytes: usize,

    #[arg(long, env = "ALBUM_SERVER_LOG", default_value = "info", help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Level,
}

impl AppArgs {
    pub fn workdir(&self) -> PathBuf {
        self.workdir.clone().unwrap_or_else(default_workdir)
    }
}

pub fn default_workdir() -> PathBuf {
    std::env::temp_dir().join(APP_NAME)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub workdir: PathBuf,
    pub db_path: PathBuf,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn new(args: &AppArgs, paths: StoragePaths) -> Self {
        Self {
            addr: SocketAddr::new(args.host, args.port),
            workdir: paths.workdir,
            db_path: paths.db_path,
            upload_dir: paths.upload_dir,
            max_upload_bytes: args.max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = AppArgs::try_parse_from([APP_NAME]).unwrap();
        assert_eq!(args.port, DEFAULT_PORT);
        assert_eq!(args.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(args.log_level, Level::INFO);
        assert_eq!(args.workdir(), std::env::temp_dir().join("album-server"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = AppArgs::try_parse_from([
            APP_NAME,
            "--host", "127.0.0.1",
            "--port", "9000",
            "--workdir", "/srv/albums",
            "--log-level", "debug",
        ]).unwrap();
        let paths = StoragePaths {
            workdir: args.workdir(),
            db_path: PathBuf::from("/srv/albums/database.db"),
            upload_dir: PathBuf::from("/srv/albums/uploads"),
        };
        let config = AppConfig::new(&args, paths);
        assert_eq!(config.addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.workdir, PathBuf::from("/srv/albums"));
        assert_eq!(args.log_level, Level::DEBUG);
    }
}
