use anyhow::Result;
use phone_specs::utils::validation::Validate;
use phone_specs::{BrowserMode, ScraperConfig};
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("phone-specs.toml");

    let config_content = r#"
base_url = "https://www.gsmarena.com"
browser = "remote"
remote_endpoint = "wss://chrome.browserless.io?token=${PHONE_SPECS_FILE_TEST_TOKEN}"
user_agent = "Mozilla/5.0 (X11; Linux x86_64) phone-specs"

[timeouts]
search_navigation_ms = 45000
specs_container_ms = 12000
"#;
    tokio::fs::write(&config_path, config_content).await?;

    std::env::set_var("PHONE_SPECS_FILE_TEST_TOKEN", "abc123");
    let config = ScraperConfig::from_file(&config_path)?;
    std::env::remove_var("PHONE_SPECS_FILE_TEST_TOKEN");

    assert_eq!(config.browser, BrowserMode::Remote);
    assert_eq!(
        config.remote_endpoint.as_deref(),
        Some("wss://chrome.browserless.io?token=abc123")
    );
    assert_eq!(config.site_root(), "https://www.gsmarena.com/");
    assert_eq!(config.timeouts.search_navigation(), Duration::from_secs(45));
    assert_eq!(config.timeouts.specs_container(), Duration::from_secs(12));
    assert_eq!(config.timeouts.search_results(), Duration::from_secs(15));
    assert!(config.validate().is_ok());

    Ok(())
}

#[tokio::test]
async fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = ScraperConfig::from_file(temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_from_env_reads_remote_endpoint() {
    std::env::set_var("REMOTE_BROWSER_ENDPOINT", "ws://127.0.0.1:9222/devtools/browser/abc");
    std::env::set_var("PHONE_SPECS_BROWSER", "local");

    let config = ScraperConfig::from_env().unwrap();
    assert_eq!(
        config.remote_endpoint.as_deref(),
        Some("ws://127.0.0.1:9222/devtools/browser/abc")
    );
    assert_eq!(config.browser, BrowserMode::Local);

    std::env::set_var("PHONE_SPECS_BROWSER", "carrier-pigeon");
    assert!(ScraperConfig::from_env().is_err());

    std::env::remove_var("REMOTE_BROWSER_ENDPOINT");
    std::env::remove_var("PHONE_SPECS_BROWSER");
    let config = ScraperConfig::from_env().unwrap();
    assert_eq!(config.remote_endpoint, None);
    assert_eq!(config.browser, BrowserMode::Remote);
}
