use serde::Deserialize;
use std::path::PathBuf;
use steerkit_router::{PackPaths, RouterConfig};

/// Built-in defaults, overridden by every other layer
const DEFAULT_CONFIG: &str = r#"
[content]
root = "."
steering_dir = "steering"
capabilities_file = "mcp.json"

[router]
max_modules = 3
min_score = 1
default_module = "general-guidance"
max_query_len = 8192

[logging]
level = "warn"  # trace, debug, info, warn, error
json = false
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    pub root: PathBuf,
    pub steering_dir: String,
    pub capabilities_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RouterSection {
    pub max_modules: usize,
    pub min_score: u32,
    pub default_module: String,
    pub max_query_len: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub content: ContentConfig,
    pub router: RouterSection,
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over every config layer
#[derive(Debug, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    /// Get the global config path: ~/.steerkit/steerkit.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".steerkit").join("steerkit.toml"))
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.steerkit/steerkit.toml (optional)
    /// 3. Local override: ./steerkit.toml (optional)
    /// 4. Explicit --config file (required when given)
    /// 5. Environment variables with STEERKIT__ prefix
    /// 6. Command-line flags (highest priority)
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(config::File::from(global).required(false));
        }

        builder = builder.add_source(config::File::with_name("steerkit").required(false));

        if let Some(path) = &overrides.config_file {
            builder = builder.add_source(config::File::from(path.clone()));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("STEERKIT")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(root) = &overrides.root {
            builder = builder.set_override("content.root", root.display().to_string())?;
        }

        if let Some(level) = &overrides.log_level {
            builder = builder.set_override("logging.level", level.as_str())?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn pack_paths(&self) -> PackPaths {
        PackPaths::under(
            &self.content.root,
            &self.content.steering_dir,
            &self.content.capabilities_file,
        )
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            max_modules: self.router.max_modules,
            min_score: self.router.min_score,
            max_query_len: self.router.max_query_len,
        }
    }
}
