use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub auth: AuthConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Удалённый GraphQL API каталога
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Сервис аутентификации (public gateway)
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub api_url: String,
    /// Секрет для подписи локальных JWT; если не задан, генерируется при старте
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Ограничение времени на одну отправку; без ограничения, если не задано
    #[serde(default)]
    pub submit_timeout_secs: Option<u64>,
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_batch_size() -> usize {
    10
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[catalog]
api_url = "http://localhost:3000/graphql"
request_timeout_secs = 120

[auth]
api_url = "http://localhost:3000/graphql-public"

[import]
batch_size = 10
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Then CATALOG_API_URL / AUTH_API_URL / JWT_SECRET from the environment override file values.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = load_file_or_default()?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn load_file_or_default() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config, get_var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = get_var("CATALOG_API_URL").filter(|v| !v.trim().is_empty()) {
        config.catalog.api_url = url;
    }
    if let Some(url) = get_var("AUTH_API_URL").filter(|v| !v.trim().is_empty()) {
        config.auth.api_url = url;
    }
    if let Some(secret) = get_var("JWT_SECRET").filter(|v| !v.is_empty()) {
        config.auth.jwt_secret = Some(secret);
    }
    if config.import.batch_size == 0 {
        tracing::warn!("import.batch_size = 0 in config, using 1");
        config.import.batch_size = 1;
    }
}

/// Загрузить конфигурацию один раз при старте
pub fn initialize_config() -> anyhow::Result<&'static Config> {
    let config = load_config()?;
    Ok(CONFIG.get_or_init(|| config))
}

/// Текущая конфигурация; до initialize_config() возвращает встроенную по умолчанию
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must be valid TOML")
    })
}
