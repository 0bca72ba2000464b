//! Shared fixtures: listing/detail HTML in the shape of a real-estate
//! results site, and a full configuration pointed at a mock server.

use gleaner::config::Config;
use std::path::Path;

/// A results page: gallery rows with a detail link per item, and optionally
/// a next-page pager entry.
pub fn listing_html(items: &[(&str, &str, Option<&str>)], next_href: Option<&str>) -> String {
    let mut rows = String::new();
    for (href, label, price) in items {
        rows.push_str("<li><h2><a href=\"");
        rows.push_str(href);
        rows.push_str("\">");
        rows.push_str(label);
        rows.push_str("</a></h2>");
        if let Some(price) = price {
            rows.push_str("<span class=\"price\">");
            rows.push_str(price);
            rows.push_str("</span>");
        }
        rows.push_str("</li>");
    }

    let pager = match next_href {
        Some(href) => format!(
            r#"<ul class="pager"><li class="pagerNext"><a href="{}">Next</a></li></ul>"#,
            href
        ),
        None => String::new(),
    };

    format!(
        r#"<html><body><div id="galleryView"><ul>{}</ul></div>{}</body></html>"#,
        rows, pager
    )
}

/// A detail page carrying the listing number behind a label and the full
/// address as the heading.
pub fn detail_html(listing_number: &str, address: &str) -> String {
    format!(
        r#"<html><body><h1>{}</h1><p><strong>Listing Number:</strong> {}</p></body></html>"#,
        address, listing_number
    )
}

/// A complete configuration against a mock server: gallery rows, a JOIN
/// link follower pulling id and address off each detail page, and a pager
/// following up to two additional pages.
pub fn test_config(base_url: &str, cache_root: &Path, csv_path: &Path) -> Config {
    let toml = format!(
        r##"
[crawl]
url-template = "{base}/results?location={{location}}&page=1"
location = "22008"

[cache]
root-dir = "{cache}"
policy = "permanent"

[output]
csv-path = "{csv}"

[entity]
name = "houses"
rows = [{{ tag = "div", id = "galleryView" }}, {{ tag = "li" }}]

[[entity.fields]]
name = "propertyDetailsLink"
path = [{{ tag = "h2" }}, {{ tag = "a" }}]
mode = "attribute"
attribute = "href"

[entity.fields.follow]
merge = "join"

[[entity.fields.follow.fields]]
name = "id"
path = [{{ tag = "strong", text-contains = "Listing Number" }}]
mode = "following-text"

[[entity.fields.follow.fields]]
name = "address"
path = [{{ tag = "h1" }}]
mode = "text"

[[entity.fields]]
name = "price"
path = [{{ tag = "span", classes = ["price"] }}]
mode = "text"

[paginator]
max-follow-count = 2
next-page = [{{ tag = "li", classes = ["pagerNext"] }}, {{ tag = "a" }}]
"##,
        base = base_url,
        cache = cache_root.display(),
        csv = csv_path.display(),
    );

    let config: Config = toml::from_str(&toml).expect("fixture config should parse");
    gleaner::config::validate(&config).expect("fixture config should validate");
    config
}
