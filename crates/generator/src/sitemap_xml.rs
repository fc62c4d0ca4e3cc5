use chrono::SecondsFormat;
use inkpress_core::SitemapEntry;

use crate::render::html_escape;

/// Render entries as a sitemaps.org 0.9 `<urlset>` document
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n  </url>\n",
            html_escape(&entry.url),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}
