pub mod config;
pub mod display;
pub mod error;
pub mod pagination;
pub mod routes;
pub mod sitemap;
pub mod types;

pub use config::{ApiConfig, SiteConfig, parse_site_toml};
pub use error::{Error, Result};
pub use pagination::{PAGE_SIZE, PageWindow, resolve_page, total_pages};
pub use routes::{Route, encode_segment, enumerate_paths, normalize_path};
pub use sitemap::{SitemapEntry, build_sitemap};
pub use types::*;
