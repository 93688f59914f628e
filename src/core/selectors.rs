//! Markup contract of the target site. Every selector and attribute the
//! scraper reads lives here so markup drift is a one-file change.

/// Result anchors on the search page.
pub const SEARCH_RESULT_LINK: &str = "div.makers ul li a";

pub const SPECS_CONTAINER: &str = "#specs-list";
pub const PHONE_NAME_TITLE: &str = "h1.specs-phone-name-title";
pub const MAIN_IMAGE: &str = ".specs-photo-main a img";

// Inside the specs container
pub const SPEC_TABLE: &str = "table";
pub const CATEGORY_HEADER: &str = "th";
pub const SPEC_ROW: &str = "tr";
pub const SPEC_LABEL: &str = "td.ttl";
pub const SPEC_VALUE: &str = "td.nfo";

pub const LINK_ATTR: &str = "href";
pub const IMAGE_ATTR: &str = "src";
