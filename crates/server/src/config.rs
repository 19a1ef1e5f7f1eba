use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Upload size limit applied to spreadsheet imports (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// kwitansi-server - receipt exports and student imports over HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "kwitansi-server")]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "KWITANSI_ADDR", default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Directory uploaded spreadsheets are written to before import
    #[arg(long, env = "KWITANSI_UPLOAD_DIR", default_value = "./uploads")]
    pub upload_dir: PathBuf,

    /// Logo drawn on PDF exports
    #[arg(long, env = "KWITANSI_LOGO", default_value = "./public/buper.png")]
    pub logo: PathBuf,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "KWITANSI_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::parse_from(["kwitansi-server"]);
        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "kwitansi-server",
            "--addr",
            "127.0.0.1:9000",
            "--upload-dir",
            "/tmp/kw",
            "--max-upload-bytes",
            "1024",
        ]);
        assert_eq!(config.addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/kw"));
        assert_eq!(config.max_upload_bytes, 1024);
    }
}
