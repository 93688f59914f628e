use httpmock::prelude::*;
use phone_specs::{BrowserMode, ConfiguredLauncher, Scraper, ScraperConfig};
use serde_json::json;

const SEARCH_HTML: &str = r#"
<html><body>
  <div class="makers">
    <ul>
      <li><a href="/xiaomi_redmi_10_2022-11253.php"><img src="x.jpg"><strong><span>Xiaomi Redmi 10 2022</span></strong></a></li>
      <li><a href="/xiaomi_redmi_10-11069.php"><strong><span>Xiaomi Redmi 10</span></strong></a></li>
    </ul>
  </div>
</body></html>"#;

const EMPTY_SEARCH_HTML: &str = r#"
<html><body>
  <div class="makers"><ul></ul></div>
  <p>Sorry, no results.</p>
</body></html>"#;

const DETAIL_HTML: &str = r##"
<html><body>
  <h1 class="specs-phone-name-title" data-spec="modelname">Xiaomi Redmi 10 2022</h1>
  <div class="specs-photo-main">
    <a href="xiaomi_redmi_10_2022-pictures-11253.php"><img alt="Xiaomi Redmi 10 2022 MORE PICTURES" src="https://fdn2.gsmarena.com/vv/bigpic/xiaomi-redmi-10-2022.jpg"></a>
  </div>
  <div id="specs-list">
    <table cellspacing="0">
      <tr>
        <th rowspan="2" scope="row">Network</th>
        <td class="ttl"><a href="network-bands.php3">Technology</a></td>
        <td class="nfo"><a href="#" class="link-network-detail collapse">GSM / HSPA / LTE</a></td>
      </tr>
      <tr class="tr-toggle">
        <td class="ttl"><a href="network-bands.php3">2G bands</a></td>
        <td class="nfo">GSM 850 / 900 / 1800 / 1900 - SIM 1 &amp; SIM 2</td>
      </tr>
    </table>
    <table cellspacing="0">
      <tr>
        <th rowspan="3" scope="row">Battery</th>
        <td class="ttl"><a href="glossary.php3?term=rechargeable-battery-types">Type</a></td>
        <td class="nfo">Li-Po 5000 mAh, non-removable</td>
      </tr>
      <tr>
        <td class="ttl"><a href="glossary.php3?term=battery-charging">Charging</a></td>
        <td class="nfo">18W wired</td>
      </tr>
    </table>
    <table cellspacing="0">
      <tr><th scope="row">Misc</th><td class="ttl">&nbsp;</td><td class="nfo"></td></tr>
    </table>
  </div>
</body></html>"##;

fn http_config(server: &MockServer) -> ScraperConfig {
    let mut config = ScraperConfig::default();
    config.browser = BrowserMode::Http;
    config.base_url = server.base_url();
    config
}

fn scraper_for(server: &MockServer) -> Scraper<ConfiguredLauncher> {
    let config = http_config(server);
    Scraper::new(ConfiguredLauncher::from_config(&config), config)
}

#[tokio::test]
async fn test_http_scrape_end_to_end() {
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/res.php3")
            .query_param_exists("sSearch");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(SEARCH_HTML);
    });
    let detail_mock = server.mock(|when, then| {
        when.method(GET).path("/xiaomi_redmi_10_2022-11253.php");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(DETAIL_HTML);
    });

    let outcome = scraper_for(&server).scrape("Xiaomi Redmi 10 2022").await;

    search_mock.assert();
    detail_mock.assert();
    assert_eq!(
        outcome.to_json(),
        json!({
            "Phone Name": "Xiaomi Redmi 10 2022",
            "Image URL": "https://fdn2.gsmarena.com/vv/bigpic/xiaomi-redmi-10-2022.jpg",
            "Network": {
                "Technology": "GSM / HSPA / LTE",
                "2G bands": "GSM 850 / 900 / 1800 / 1900 - SIM 1 & SIM 2"
            },
            "Battery": {
                "Type": "Li-Po 5000 mAh, non-removable",
                "Charging": "18W wired"
            }
        })
    );
}

#[tokio::test]
async fn test_http_scrape_sends_user_agent() {
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/res.php3")
            .header("user-agent", "phone-specs-test/1.0");
        then.status(200).body(EMPTY_SEARCH_HTML);
    });

    let mut config = http_config(&server);
    config.user_agent = "phone-specs-test/1.0".to_string();
    let scraper = Scraper::new(ConfiguredLauncher::from_config(&config), config);

    let outcome = scraper.scrape("nothing").await;

    search_mock.assert();
    assert!(outcome.is_error());
}

#[tokio::test]
async fn test_http_scrape_no_results() {
    let server = MockServer::start();

    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/res.php3");
        then.status(200).body(EMPTY_SEARCH_HTML);
    });

    let outcome = scraper_for(&server).scrape("zzqx 9000").await;

    search_mock.assert();
    assert_eq!(
        outcome.error_message(),
        Some("Search results took too long to load or no results found for query: \"zzqx 9000\".")
    );
}

#[tokio::test]
async fn test_http_detail_without_specs_list() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/res.php3");
        then.status(200).body(SEARCH_HTML);
    });
    let detail_mock = server.mock(|when, then| {
        when.method(GET).path("/xiaomi_redmi_10_2022-11253.php");
        then.status(503).body("<html><body>Service Unavailable</body></html>");
    });

    let outcome = scraper_for(&server).scrape("Xiaomi Redmi 10 2022").await;

    detail_mock.assert();
    assert_eq!(
        outcome.error_message(),
        Some("Details page took too long to load or specs list not found for: \"Xiaomi Redmi 10 2022\".")
    );
}

#[tokio::test]
async fn test_http_detail_timeout() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/res.php3");
        then.status(200).body(SEARCH_HTML);
    });
    server.mock(|when, then| {
        when.method(GET).path("/xiaomi_redmi_10_2022-11253.php");
        then.status(200)
            .delay(std::time::Duration::from_millis(1500))
            .body(DETAIL_HTML);
    });

    let mut config = http_config(&server);
    config.timeouts.detail_navigation_ms = 200;
    let scraper = Scraper::new(ConfiguredLauncher::from_config(&config), config);

    let outcome = scraper.scrape("Xiaomi Redmi 10 2022").await;

    assert!(outcome
        .error_message()
        .unwrap()
        .starts_with("Details page took too long to load"));
}

#[tokio::test]
async fn test_remote_mode_without_endpoint_fails_before_navigation() {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/res.php3");
        then.status(200).body(SEARCH_HTML);
    });

    let mut config = http_config(&server);
    config.browser = BrowserMode::Remote;
    config.remote_endpoint = None;
    let scraper = Scraper::new(ConfiguredLauncher::from_config(&config), config);

    let outcome = scraper.scrape("Xiaomi Redmi 10 2022").await;

    search_mock.assert_hits(0);
    assert_eq!(
        outcome.error_message(),
        Some("Browser could not be started: Remote browser endpoint not configured.")
    );
}
