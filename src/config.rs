use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub resources: ResourcesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

/// The three fixed API paths the Weltmeister editor requests. The defaults
/// mirror the PHP backend paths baked into the stock editor frontend.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub save: String,
    pub browse: String,
    pub glob: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResourcesConfig {
    /// Served for `/`
    pub game_entry: String,
    /// Served for `/editor`
    pub editor_entry: String,
    /// Extensions (with leading dot) kept by the browse `type=images` filter
    pub image_types: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", false)?
            .set_default("api.save", "/lib/weltmeister/api/save.php")?
            .set_default("api.browse", "/lib/weltmeister/api/browse.php")?
            .set_default("api.glob", "/lib/weltmeister/api/glob.php")?
            .set_default("resources.game_entry", "index.html")?
            .set_default("resources.editor_entry", "weltmeister.html")?
            .set_default(
                "resources.image_types",
                vec![".png", ".jpg", ".gif", ".jpeg"],
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// `true` when the extension (with leading dot) is a recognized image type.
    pub fn is_image_extension(&self, dotted_ext: &str) -> bool {
        self.resources
            .image_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(dotted_ext))
    }
}
