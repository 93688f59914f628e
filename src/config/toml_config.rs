use super::ScraperConfig;
use crate::utils::error::ConfigError;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::OnceLock;

fn env_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl ScraperConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let processed_content = substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }
}

/// 替換環境變數 (例如 ${REMOTE_BROWSER_ENDPOINT})；未設定的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    env_placeholder()
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}
