use crate::config::ScraperConfig;

/// Spaces become `+`; nothing else is escaped.
pub fn normalize_query(query: &str) -> String {
    query.replace(' ', "+")
}

pub fn build_search_url(config: &ScraperConfig, query: &str) -> String {
    format!(
        "{}{}?{}={}",
        config.site_root(),
        config.search_path.trim_start_matches('/'),
        config.search_param,
        normalize_query(query)
    )
}

/// Leaves `http(s)` links alone and joins anything else onto `site_root`
/// with a single separator.
pub fn absolutize(site_root: &str, link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("{}{}", site_root, link.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("Xiaomi Redmi 10 2022"), "Xiaomi+Redmi+10+2022");
        assert_eq!(normalize_query("pixel"), "pixel");
        assert_eq!(normalize_query(""), "");
        // 只處理空白，其它字元原樣保留
        assert_eq!(normalize_query("a&b c"), "a&b+c");
    }

    #[test]
    fn test_build_search_url() {
        let config = ScraperConfig::default();
        assert_eq!(
            build_search_url(&config, "Xiaomi Redmi 10 2022"),
            "https://www.gsmarena.com/res.php3?sSearch=Xiaomi+Redmi+10+2022"
        );
    }

    #[test]
    fn test_absolutize_relative_link() {
        let root = "https://www.gsmarena.com/";
        assert_eq!(
            absolutize(root, "/phone.php?id=1"),
            "https://www.gsmarena.com/phone.php?id=1"
        );
        assert_eq!(
            absolutize(root, "xiaomi_redmi_10_2022-11253.php"),
            "https://www.gsmarena.com/xiaomi_redmi_10_2022-11253.php"
        );
        assert_eq!(
            absolutize(root, "//phone.php?id=1"),
            "https://www.gsmarena.com/phone.php?id=1"
        );
    }

    #[test]
    fn test_absolutize_keeps_absolute_link() {
        let link = "https://fdn2.gsmarena.com/vv/bigpic/xiaomi-redmi-10-2022.jpg";
        assert_eq!(absolutize("https://www.gsmarena.com/", link), link);
    }
}
