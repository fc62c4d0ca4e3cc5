//! Formatting helpers shared by the page renderer.

use crate::types::{Agent, WorkspaceHeader, read_string};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DE_MONTHS: [&str; 12] = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez.",
];
const TR_MONTHS: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];

/// Label/URL pair for header links
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

impl ContactLink {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Short date in the site locale, e.g. "Jan 5, 2025". Unknown locales use English.
pub fn format_date(value: Option<DateTime<Utc>>, locale: &str) -> Option<String> {
    let date = value?;
    let month = date.month0() as usize;
    let formatted = match locale {
        "de" => format!("{}. {} {}", date.day(), DE_MONTHS[month], date.year()),
        "tr" => format!("{} {} {}", date.day(), TR_MONTHS[month], date.year()),
        _ => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
    };
    Some(formatted)
}

/// Hostname without a leading `www.`; unparsable input just loses its scheme
pub fn readable_host(value: &str) -> String {
    match url::Url::parse(value) {
        Ok(url) => match url.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => strip_scheme(value),
        },
        Err(_) => strip_scheme(value),
    }
}

fn strip_scheme(value: &str) -> String {
    value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .unwrap_or(value)
        .to_string()
}

/// Website, Blog, Docs and Support links in that order, skipping unset ones
pub fn primary_links(header: Option<&WorkspaceHeader>) -> Vec<ContactLink> {
    let Some(header) = header else {
        return Vec::new();
    };

    [
        ("Website", header.website.as_deref()),
        ("Blog", header.blog.as_deref()),
        ("Docs", header.documentation.as_deref()),
        ("Support", header.support.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, url)| read_string(url).map(|url| ContactLink::new(label, url)))
    .collect()
}

/// Social accounts with a non-empty URL, ordered by network name
pub fn social_links(header: Option<&WorkspaceHeader>) -> Vec<ContactLink> {
    let Some(header) = header else {
        return Vec::new();
    };

    header
        .social_accounts
        .iter()
        .filter_map(|(network, url)| {
            url.as_deref()
                .filter(|u| !u.is_empty())
                .map(|u| ContactLink::new(network, u))
        })
        .collect()
}

pub fn agent_display_name(agent: &Agent) -> String {
    if let Some(name) = read_string(agent.name.as_deref()) {
        return name.to_string();
    }
    let prefix: String = agent.id.chars().take(4).collect();
    format!("Agent {}", prefix.to_uppercase())
}

pub fn agent_tagline(agent: &Agent) -> String {
    read_string(agent.headline.as_deref())
        .or_else(|| read_string(agent.persona.as_deref()))
        .or_else(|| read_string(agent.bio.as_deref()))
        .unwrap_or("Keeping the knowledge base fresh")
        .to_string()
}

/// Format an integer with thousands separators ("12,345")
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
