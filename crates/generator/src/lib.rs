// Static site generation: HTML for every enumerated route plus sitemap.xml

pub mod render;
pub mod sitemap_xml;

use chrono::{DateTime, Utc};
use inkpress_core::config::resolve_locale;
use inkpress_core::{Route, SiteConfig, WorkspaceData, build_sitemap, enumerate_paths};

pub use render::{PageStatus, RenderOptions, RenderedPage, html_escape, render_route};
pub use sitemap_xml::render_sitemap_xml;

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
}

impl GeneratedSite {
    pub fn file_count(&self) -> usize {
        self.pages.len() + self.assets.len()
    }
}

/// Page locale for a workspace under the given configuration
pub fn site_locale<'a>(data: Option<&'a WorkspaceData>, config: &'a SiteConfig) -> &'a str {
    resolve_locale(
        data.and_then(|d| d.workspace.lang.as_deref()),
        &config.site.locale,
    )
}

/// Output file for a route, e.g. `agents/a1/2/index.html`.
///
/// Returns `None` for segments that would escape the output directory.
pub fn output_path(segments: &[String]) -> Option<String> {
    if segments.is_empty() {
        return Some("index.html".to_string());
    }
    let unsafe_segment = segments
        .iter()
        .any(|s| s.is_empty() || s == "." || s == ".." || s.contains(['/', '\\']));
    if unsafe_segment {
        return None;
    }
    Some(format!("{}/index.html", segments.join("/")))
}

/// Render the whole site for a fetched workspace
pub fn generate_site(data: &WorkspaceData, config: &SiteConfig, now: DateTime<Utc>) -> GeneratedSite {
    let options = RenderOptions {
        locale: site_locale(Some(data), config),
        live_reload: false,
    };

    let mut pages = Vec::new();
    for segments in enumerate_paths(Some(data)) {
        let Some(path) = output_path(&segments) else {
            tracing::warn!(?segments, "Skipping route that cannot be written safely");
            continue;
        };
        let page = render_route(Some(data), &Route::parse(segments.as_slice()), options);
        pages.push((path, page.html));
    }

    let not_found = render_route(Some(data), &Route::NotFound, options);
    pages.push(("404.html".to_string(), not_found.html));

    let entries = build_sitemap(Some(data), &config.site.url, now);
    let assets = vec![(
        "sitemap.xml".to_string(),
        render_sitemap_xml(&entries).into_bytes(),
    )];

    GeneratedSite { pages, assets }
}
