use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Default request timeout for the inference call. Local CPU-only models can
/// take minutes on a large prompt, so the default is generous.
const DEFAULT_OLLAMA_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct CodegenConfig {
    pub common: HttpConfig,
    pub ollama: OllamaSettings,
    pub models: ModelSettings,
}

/// Common HTTP section, loaded from `configuration.*` / `APP__*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Model used for component generation. The 7b coder variant is the
    /// speed/quality tradeoff that still runs acceptably on CPU-only hosts.
    pub code_model: String,
}

impl CodegenConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common: HttpConfig = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CodegenConfig {
            common,
            ollama: OllamaSettings {
                base_url: get_env("OLLAMA_URL", Some("http://localhost:11434"), is_prod)?,
                request_timeout_secs: get_env(
                    "OLLAMA_TIMEOUT_SECS",
                    Some(&DEFAULT_OLLAMA_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_OLLAMA_TIMEOUT_SECS),
            },
            models: ModelSettings {
                code_model: get_env("CODEGEN_MODEL", Some("qwen2.5-coder:7b"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_prefers_set_variable() {
        env::set_var("CODEGEN_TEST_KEY", "custom");
        assert_eq!(
            get_env("CODEGEN_TEST_KEY", Some("fallback"), false).unwrap(),
            "custom"
        );
        env::remove_var("CODEGEN_TEST_KEY");
    }

    #[test]
    fn get_env_falls_back_in_dev() {
        assert_eq!(
            get_env("CODEGEN_TEST_MISSING", Some("fallback"), false).unwrap(),
            "fallback"
        );
    }

    #[test]
    fn get_env_requires_explicit_value_in_prod() {
        assert!(get_env("CODEGEN_TEST_MISSING", Some("fallback"), true).is_err());
    }
}
