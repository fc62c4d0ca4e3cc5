use inkpress_core::display::{
    agent_display_name, agent_tagline, format_date, group_thousands, primary_links,
    readable_host, social_links,
};
use inkpress_core::config::resolve_locale;
use inkpress_core::{
    Agent, Article, ArticleStatus, ContentBlock, Route, Workspace, WorkspaceData, encode_segment,
    read_string, resolve_page,
};

const DASH: &str = "—";

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Outcome of rendering a route, used by the server to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    NotFound,
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub title: String,
    pub html: String,
}

/// Options shared by every page
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub locale: &'a str,
    /// Inject the preview server's reload script
    pub live_reload: bool,
}

/// Render any route of the catch-all surface.
///
/// A missing workspace renders the "unable to load" page for every route.
pub fn render_route(
    data: Option<&WorkspaceData>,
    route: &Route,
    options: RenderOptions<'_>,
) -> RenderedPage {
    let Some(data) = data else {
        return page(
            PageStatus::Unavailable,
            "Unavailable",
            r#"<main class="centered"><p class="muted">Unable to load workspace details right now.</p></main>"#
                .to_string(),
            options,
        );
    };

    let title = site_title(&data.workspace);
    let (status, body) = match route {
        Route::Home => (PageStatus::Ok, home_view(data, options.locale)),
        Route::AgentListing { agent_id, page } => match data.find_agent(agent_id) {
            Some(agent) => (PageStatus::Ok, agent_view(data, agent, page, options.locale)),
            None => (
                PageStatus::NotFound,
                missing_view(
                    Some(&data.workspace),
                    options.locale,
                    "We couldn't find that agent.",
                ),
            ),
        },
        Route::Article { slug } => match data.find_article(slug) {
            Some((agent, article)) => (
                PageStatus::Ok,
                article_view(data, agent, article, options.locale),
            ),
            None => (
                PageStatus::NotFound,
                missing_view(None, options.locale, "We couldn't find that article."),
            ),
        },
        Route::NotFound => (PageStatus::NotFound, not_found_view(&data.workspace)),
    };

    page(status, &title, body, options)
}

fn site_title(workspace: &Workspace) -> String {
    read_string(Some(workspace.name.as_str()))
        .unwrap_or("InkPilots Newsroom")
        .to_string()
}

fn page(status: PageStatus, title: &str, body: String, options: RenderOptions<'_>) -> RenderedPage {
    let html = shell(title, &body, options);
    RenderedPage {
        status,
        title: title.to_string(),
        html,
    }
}

fn shell(title: &str, body: &str, options: RenderOptions<'_>) -> String {
    let reload_script = if options.live_reload {
        r#"<script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => location.reload();
        eventSource.onerror = () => eventSource.close();
    </script>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
<div class="page">
{body}
</div>
{reload}
</body>
</html>"#,
        lang = html_escape(options.locale),
        title = html_escape(title),
        css = STYLES,
        body = body,
        reload = reload_script,
    )
}

const STYLES: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            color: #e6edf3;
            background: radial-gradient(circle at top, rgba(56,189,248,0.25), transparent 55%), #0b1220;
            min-height: 100vh;
        }
        a { color: inherit; }
        .page { max-width: 80rem; margin: 0 auto; padding: 2rem 1rem 4rem; display: flex; flex-direction: column; gap: 2.5rem; }
        .centered { min-height: 60vh; display: flex; align-items: center; justify-content: center; text-align: center; flex-direction: column; gap: 1rem; }
        .muted { color: rgba(230,237,243,0.65); }
        .eyebrow { text-transform: uppercase; letter-spacing: 0.35em; font-size: 0.75rem; color: rgba(230,237,243,0.45); }
        .hero-slug { font-size: 2.25rem; text-transform: uppercase; letter-spacing: 0.6em; color: #38bdf8; }
        .metrics { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 1.5rem; margin-top: 2rem; }
        .links, .socials, .tags { display: flex; flex-wrap: wrap; gap: 0.75rem; margin-top: 1.5rem; }
        .pill { border: 1px solid rgba(230,237,243,0.2); border-radius: 999px; padding: 0.4rem 1rem; text-decoration: none; font-size: 0.85rem; }
        .pill.disabled { opacity: 0.4; }
        .pill.primary { border-color: rgba(56,189,248,0.6); background: rgba(56,189,248,0.2); }
        .cards { display: flex; gap: 1rem; overflow-x: auto; margin-top: 1rem; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(20rem, 1fr)); gap: 1.25rem; margin-top: 1.5rem; }
        .card { display: block; border: 1px solid rgba(230,237,243,0.1); border-radius: 1rem; padding: 1rem; text-decoration: none; background: rgba(15,23,42,0.8); }
        .card.carousel { flex-shrink: 0; min-width: 280px; max-width: 350px; }
        .card img { width: 100%; height: 10rem; object-fit: cover; border-radius: 0.75rem; margin-bottom: 1rem; }
        .status { border-radius: 999px; padding: 0.2rem 0.75rem; font-size: 0.7rem; text-transform: uppercase; letter-spacing: 0.3em; }
        .status-draft { background: rgba(230,237,243,0.2); color: #fde68a; }
        .status-published { background: rgba(56,189,248,0.25); }
        .status-archived { background: rgba(11,18,32,0.5); color: rgba(230,237,243,0.7); }
        .pager { display: flex; justify-content: space-between; align-items: center; gap: 1rem; padding-top: 1.5rem; margin-top: 1.5rem; border-top: 1px solid rgba(230,237,243,0.1); }
        .info { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1rem; margin-top: 2rem; padding: 1.25rem; border-radius: 1rem; background: rgba(230,237,243,0.05); }
        article.body { margin-top: 2.5rem; display: flex; flex-direction: column; gap: 1.5rem; }
        blockquote { border-left: 4px solid rgba(56,189,248,0.4); padding: 1rem; font-style: italic; background: rgba(230,237,243,0.05); border-radius: 1rem; }
        pre { overflow-x: auto; padding: 1rem; border-radius: 1rem; background: rgba(11,18,32,0.7); color: #a7f3d0; }
        figure img { width: 100%; border-radius: 1rem; }
        ul, ol { padding-left: 1.5rem; }
"#;

fn hero(workspace: &Workspace, locale: &str) -> String {
    let header = workspace.header.as_ref();
    let description = header
        .and_then(|h| read_string(h.description.as_deref()))
        .unwrap_or("Fresh stories from our AI newsroom.");
    let visibility = if workspace.visibility { "Public" } else { "Private" };
    let established = format_date(
        workspace
            .created_at
            .as_deref()
            .and_then(inkpress_core::parse_timestamp),
        locale,
    )
    .unwrap_or_else(|| DASH.to_string());
    let contact = header
        .and_then(|h| read_string(h.email.as_deref()).or_else(|| read_string(h.phone.as_deref())))
        .unwrap_or("Reach out anytime");

    let mut details = String::new();
    if let Some(address) = header.and_then(|h| read_string(h.address.as_deref())) {
        details.push_str(&metric("Studio", address));
    }
    if let Some(phone) = header.and_then(|h| read_string(h.phone.as_deref())) {
        details.push_str(&metric("Phone", phone));
    }
    let details = if details.is_empty() {
        details
    } else {
        format!(r#"<div class="metrics">{}</div>"#, details)
    };

    let links: String = primary_links(header)
        .iter()
        .map(|link| {
            format!(
                r#"<a class="pill" href="{}" target="_blank" rel="noreferrer"><span>{}</span> <span class="muted">{}</span></a>"#,
                html_escape(&link.url),
                html_escape(&link.label),
                html_escape(&readable_host(&link.url))
            )
        })
        .collect();
    let socials: String = social_links(header)
        .iter()
        .map(|link| {
            format!(
                r#"<a class="pill eyebrow" href="{}" target="_blank" rel="noreferrer">{}</a>"#,
                html_escape(&link.url),
                html_escape(&link.label)
            )
        })
        .collect();

    format!(
        r#"<header>
    <p class="hero-slug">{slug}</p>
    <p class="muted">{description}</p>
    <div class="metrics">{visibility}{established}{contact}</div>
    {details}
    {links}
    {socials}
</header>"#,
        slug = html_escape(&workspace.slug),
        description = html_escape(description),
        visibility = metric("Visibility", visibility),
        established = metric("Established", &established),
        contact = metric("Contact", contact),
        details = details,
        links = wrap_if_any("links", &links),
        socials = wrap_if_any("socials", &socials),
    )
}

fn wrap_if_any(class: &str, inner: &str) -> String {
    if inner.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="{}">{}</div>"#, class, inner)
    }
}

fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div><p class="eyebrow">{}</p><p>{}</p></div>"#,
        html_escape(label),
        html_escape(value)
    )
}

fn home_view(data: &WorkspaceData, locale: &str) -> String {
    let agents: String = data
        .agents
        .iter()
        .map(|agent| {
            let suffix: String = {
                let chars: Vec<char> = agent.id.chars().collect();
                chars[chars.len().saturating_sub(4)..].iter().collect()
            };
            let cards: String = if agent.articles.is_empty() {
                r#"<p class="muted">No articles yet.</p>"#.to_string()
            } else {
                agent
                    .articles
                    .iter()
                    .take(3)
                    .map(|article| article_card(article, &agent.id, CardVariant::Carousel, locale))
                    .collect()
            };

            format!(
                r#"<section>
    <p class="eyebrow">Agent · {suffix}</p>
    <h3><a href="/agents/{id}/1">{name}</a></h3>
    <p class="muted">{tagline}</p>
    {count}
    <div class="cards">{cards}</div>
</section>"#,
                suffix = html_escape(&suffix),
                id = html_escape(&encode_segment(&agent.id)),
                name = html_escape(&agent_display_name(agent)),
                tagline = html_escape(&agent_tagline(agent)),
                count = metric("Articles", &agent.articles.len().to_string()),
                cards = cards,
            )
        })
        .collect();

    format!("{}\n<main>{}</main>", hero(&data.workspace, locale), agents)
}

fn agent_view(data: &WorkspaceData, agent: &Agent, page: &str, locale: &str) -> String {
    let total = agent.articles.len();
    let window = resolve_page(Some(page), total);
    let articles = window.slice(&agent.articles);
    let last_updated = format_date(agent.last_updated(), locale).unwrap_or_else(|| DASH.to_string());

    let listing = if articles.is_empty() {
        r#"<p class="muted">This agent has not published any articles yet.</p>"#.to_string()
    } else {
        let cards: String = articles
            .iter()
            .map(|article| article_card(article, &agent.id, CardVariant::Grid, locale))
            .collect();
        format!(r#"<div class="grid">{}</div>"#, cards)
    };

    let agent_segment = html_escape(&encode_segment(&agent.id));
    let page_href = |n: usize| format!("/agents/{}/{}", agent_segment, n);
    let previous = match window.previous_page() {
        Some(n) => format!(r#"<a class="pill" href="{}">Previous</a>"#, page_href(n)),
        None => r#"<span class="pill disabled">Previous</span>"#.to_string(),
    };
    let next = match window.next_page() {
        Some(n) => format!(r#"<a class="pill primary" href="{}">Next</a>"#, page_href(n)),
        None => r#"<span class="pill disabled">Next</span>"#.to_string(),
    };

    format!(
        r#"{hero}
<div class="tags">
    <span class="pill eyebrow">Agent ID · {id}</span>
    <span class="pill eyebrow">Last update · {updated}</span>
    <a class="pill primary" href="/">Back to newsroom</a>
</div>
<section>
    <p class="eyebrow">Latest drops</p>
    <h2>Stories by {name}</h2>
    <p class="muted">Page {current} of {pages}</p>
    {listing}
    <div class="pager">
        <span class="muted">Showing {start}–{end} of {total}</span>
        <div class="tags">{previous}{next}</div>
    </div>
</section>"#,
        hero = hero(&data.workspace, locale),
        id = html_escape(&agent.id),
        updated = html_escape(&last_updated),
        name = html_escape(&agent_display_name(agent)),
        current = window.page_number,
        pages = window.total_pages,
        listing = listing,
        start = group_thousands(window.range_start as u64),
        end = group_thousands(window.range_end as u64),
        total = group_thousands(total as u64),
        previous = previous,
        next = next,
    )
}

fn article_view(data: &WorkspaceData, agent: &Agent, article: &Article, locale: &str) -> String {
    let published = format_date(article.published(), locale).unwrap_or_else(|| DASH.to_string());
    let updated = format_date(article.updated(), locale).unwrap_or_else(|| DASH.to_string());
    let tokens = article
        .total_tokens
        .map(group_thousands)
        .unwrap_or_else(|| DASH.to_string());
    let language = article.language.to_uppercase();
    let author = agent_display_name(agent);
    let slug = article.routing_slug();

    let info: String = [
        ("Author", author.as_str()),
        ("Status", article.status.as_str()),
        ("Language", language.as_str()),
        ("Model", article.model.as_str()),
        ("Tokens", tokens.as_str()),
        ("Published", published.as_str()),
        ("Updated", updated.as_str()),
        ("Slug", slug.as_str()),
    ]
    .iter()
    .map(|(label, value)| metric(label, value))
    .collect();

    let tags: String = article
        .collect_tags()
        .iter()
        .map(|tag| format!(r#"<span class="pill">#{}</span>"#, html_escape(tag)))
        .collect();

    format!(
        r#"{hero}
<section>
    <div class="pager">
        <a class="pill" href="/">← Back to newsroom</a>
        <p class="eyebrow">Storyfile</p>
    </div>
    <header>
        <p class="eyebrow">{author} · {language}</p>
        <h1>{title}</h1>
        <p class="muted">{description}</p>
    </header>
    {tags}
    <div class="info">{info}</div>
    <article class="body">{blocks}</article>
</section>"#,
        hero = hero(&data.workspace, locale),
        author = html_escape(&author),
        language = html_escape(&language),
        title = html_escape(&article.title),
        description = html_escape(article.description().unwrap_or("No description provided.")),
        tags = wrap_if_any("tags", &tags),
        info = info,
        blocks = render_blocks(&article.content),
    )
}

fn missing_view(workspace: Option<&Workspace>, locale: &str, message: &str) -> String {
    let hero = workspace.map(|w| hero(w, locale)).unwrap_or_default();
    format!(
        r#"{}
<section class="centered">
    <p class="muted">{}</p>
    <a class="pill primary" href="/">← Back to newsroom</a>
</section>"#,
        hero,
        html_escape(message)
    )
}

fn not_found_view(workspace: &Workspace) -> String {
    format!(
        r#"<section class="centered">
    <p class="muted">This page could not be found.</p>
    <a class="pill primary" href="/">← Back to {}</a>
</section>"#,
        html_escape(&workspace.name)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardVariant {
    Carousel,
    Grid,
}

fn article_card(article: &Article, agent_id: &str, variant: CardVariant, locale: &str) -> String {
    let class = match variant {
        CardVariant::Carousel => "card carousel",
        CardVariant::Grid => "card",
    };
    let status_class = match article.status {
        ArticleStatus::Draft => "status status-draft",
        ArticleStatus::Published => "status status-published",
        ArticleStatus::Archived => "status status-archived",
        ArticleStatus::Unknown => "status",
    };
    let cover = read_string(article.cover_image.as_deref())
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{} cover image" loading="lazy">"#,
                html_escape(src),
                html_escape(&article.title)
            )
        })
        .unwrap_or_default();
    let date_locale = resolve_locale(Some(article.language.as_str()), locale);
    let date = format_date(article.published().or_else(|| article.updated()), date_locale)
        .unwrap_or_else(|| "Scheduled".to_string());
    let tags: String = article
        .collect_tags()
        .iter()
        .take(3)
        .map(|tag| format!(r#"<span class="pill">{}</span>"#, html_escape(tag)))
        .collect();

    format!(
        r#"<a class="{class}" href="/posts/{slug}" aria-label="View {title} by agent {agent}">
    {cover}
    <p class="eyebrow">{language} · {model}</p>
    <h4>{title}</h4>
    <p class="muted">{summary}</p>
    <p><span class="{status_class}">{status}</span> <span class="muted">{date}</span></p>
    {tags}
</a>"#,
        class = class,
        slug = html_escape(&encode_segment(&article.routing_slug())),
        title = html_escape(&article.title),
        agent = html_escape(agent_id),
        cover = cover,
        language = html_escape(&article.language.to_uppercase()),
        model = html_escape(&article.model),
        summary = html_escape(article.description().unwrap_or("No summary provided yet.")),
        status_class = status_class,
        status = article.status,
        date = html_escape(&date),
        tags = wrap_if_any("tags", &tags),
    )
}

/// Render structured content blocks. Unsupported block types are skipped.
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    if blocks.is_empty() {
        return r#"<p class="muted">This article has no public content yet.</p>"#.to_string();
    }

    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Header { text } => Some(format!("<h2>{}</h2>", html_escape(text))),
            ContentBlock::Paragraph { text } => Some(format!("<p>{}</p>", html_escape(text))),
            ContentBlock::Quote { text, source } => {
                let footer = read_string(source.as_deref())
                    .map(|s| format!("<footer class=\"muted\">— {}</footer>", html_escape(s)))
                    .unwrap_or_default();
                Some(format!(
                    "<blockquote>“{}”{}</blockquote>",
                    html_escape(text),
                    footer
                ))
            }
            ContentBlock::List { items, ordered } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let items: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", html_escape(item)))
                    .collect();
                Some(format!("<{tag}>{items}</{tag}>"))
            }
            ContentBlock::Image { url, alt, caption } => {
                let caption = read_string(caption.as_deref()).or(read_string(alt.as_deref()));
                let alt_text = read_string(alt.as_deref())
                    .or(caption)
                    .unwrap_or("Article visual");
                let figcaption = caption
                    .map(|c| format!("<figcaption class=\"muted\">{}</figcaption>", html_escape(c)))
                    .unwrap_or_default();
                Some(format!(
                    r#"<figure><img src="{}" alt="{}">{}</figure>"#,
                    html_escape(url),
                    html_escape(alt_text),
                    figcaption
                ))
            }
            ContentBlock::Code { text } => {
                Some(format!("<pre><code>{}</code></pre>", html_escape(text)))
            }
            ContentBlock::Divider => Some("<hr>".to_string()),
            ContentBlock::Unsupported => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> WorkspaceData {
        let articles: Vec<serde_json::Value> = (1..=8)
            .map(|i| {
                serde_json::json!({
                    "_id": format!("id-{}", i),
                    "slug": format!("story-{}", i),
                    "title": format!("Story <{}>", i),
                    "status": "published",
                    "language": "en",
                    "model": "gpt-4o",
                    "publishedAt": "2025-02-10T00:00:00Z",
                    "content": [{ "type": "paragraph", "text": "Body & soul" }]
                })
            })
            .collect();

        serde_json::from_value(serde_json::json!({
            "workspace": {
                "id": "ws",
                "slug": "newsroom",
                "name": "The Newsroom",
                "visibility": true,
                "createdAt": "2024-01-15T00:00:00Z",
                "header": { "website": "https://www.news.test", "email": "hi@news.test" }
            },
            "agents": [
                { "id": "agent-0001", "name": "Scribe", "articles": articles },
                { "id": "agent-0002", "articles": [] }
            ]
        }))
        .unwrap()
    }

    fn opts() -> RenderOptions<'static> {
        RenderOptions {
            locale: "en",
            live_reload: false,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_home_lists_agents_with_three_cards() {
        let page = render_route(Some(&data()), &Route::Home, opts());
        assert_eq!(page.status, PageStatus::Ok);
        assert_eq!(page.title, "The Newsroom");
        assert!(page.html.contains(r#"href="/agents/agent-0001/1""#));
        assert!(page.html.contains("/posts/story-3"));
        assert!(!page.html.contains("/posts/story-4"));
        assert!(page.html.contains("Agent AGEN"));
        assert!(page.html.contains("Story &lt;1&gt;"));
        assert!(page.html.contains("news.test"));
        assert!(page.html.contains("Jan 15, 2024"));
    }

    #[test]
    fn test_agent_listing_second_page() {
        let route = Route::from_path("/agents/agent-0001/2");
        let page = render_route(Some(&data()), &route, opts());
        assert_eq!(page.status, PageStatus::Ok);
        assert!(page.html.contains("Page 2 of 2"));
        assert!(page.html.contains("Showing 7–8 of 8"));
        assert!(page.html.contains("/posts/story-7"));
        assert!(!page.html.contains("/posts/story-6"));
        assert!(page.html.contains(r#"href="/agents/agent-0001/1">Previous"#));
        assert!(page.html.contains(r#"<span class="pill disabled">Next</span>"#));
    }

    #[test]
    fn test_agent_listing_past_last_page_is_empty() {
        let route = Route::from_path("/agents/agent-0001/9");
        let page = render_route(Some(&data()), &route, opts());
        assert_eq!(page.status, PageStatus::Ok);
        assert!(page.html.contains("has not published any articles yet"));
    }

    #[test]
    fn test_unknown_agent_and_article_are_not_found() {
        let page = render_route(Some(&data()), &Route::from_path("/agents/nobody/1"), opts());
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("couldn&#x27;t find that agent"));

        let page = render_route(Some(&data()), &Route::from_path("/posts/missing"), opts());
        assert_eq!(page.status, PageStatus::NotFound);

        let page = render_route(Some(&data()), &Route::from_path("/about/us"), opts());
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("Back to The Newsroom"));
    }

    #[test]
    fn test_article_view() {
        let page = render_route(Some(&data()), &Route::from_path("/posts/story-2"), opts());
        assert_eq!(page.status, PageStatus::Ok);
        assert!(page.html.contains("<h1>Story &lt;2&gt;</h1>"));
        assert!(page.html.contains("<p>Body &amp; soul</p>"));
        assert!(page.html.contains("Feb 10, 2025"));
        assert!(page.html.contains("Scribe · EN"));
    }

    #[test]
    fn test_unavailable_workspace() {
        let page = render_route(None, &Route::Home, opts());
        assert_eq!(page.status, PageStatus::Unavailable);
        assert!(page.html.contains("Unable to load workspace details"));
    }

    #[test]
    fn test_live_reload_script_only_in_preview() {
        let with = render_route(
            Some(&data()),
            &Route::Home,
            RenderOptions {
                locale: "en",
                live_reload: true,
            },
        );
        assert!(with.html.contains("/_reload"));
        let without = render_route(Some(&data()), &Route::Home, opts());
        assert!(!without.html.contains("/_reload"));
    }

    #[test]
    fn test_render_blocks() {
        let blocks = vec![
            ContentBlock::Quote {
                text: "Stay curious".into(),
                source: Some("Ada".into()),
            },
            ContentBlock::List {
                items: vec!["one".into(), "two".into()],
                ordered: true,
            },
            ContentBlock::Image {
                url: "https://img.test/a.png".into(),
                alt: None,
                caption: Some("Chart".into()),
            },
            ContentBlock::Unsupported,
            ContentBlock::Divider,
        ];
        let html = render_blocks(&blocks);
        assert!(html.contains("<blockquote>“Stay curious”<footer class=\"muted\">— Ada</footer></blockquote>"));
        assert!(html.contains("<ol><li>one</li><li>two</li></ol>"));
        assert!(html.contains(r#"alt="Chart""#));
        assert!(html.contains("<figcaption class=\"muted\">Chart</figcaption>"));
        assert!(html.ends_with("<hr>"));

        assert!(render_blocks(&[]).contains("no public content yet"));
    }

    fn card_article(slug: &str, language: &str) -> Article {
        serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "slug": slug,
            "title": "Title",
            "status": "published",
            "language": language,
            "publishedAt": "2025-03-04T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_card_date_uses_regional_language_tag() {
        let html = article_card(&card_article("a", "DE"), "a1", CardVariant::Grid, "en");
        assert!(html.contains("4. März 2025"));

        let html = article_card(&card_article("a", "de-AT"), "a1", CardVariant::Grid, "en");
        assert!(html.contains("4. März 2025"));

        let html = article_card(&card_article("a", "fr"), "a1", CardVariant::Grid, "tr");
        assert!(html.contains("4 Mar 2025"));
    }

    #[test]
    fn test_links_are_percent_encoded() {
        let html = article_card(&card_article("über uns", "en"), "a 1", CardVariant::Grid, "en");
        assert!(html.contains(r#"href="/posts/%C3%BCber%20uns""#));
        assert_eq!(
            Route::from_path("/posts/%C3%BCber%20uns"),
            Route::Article {
                slug: "über uns".to_string()
            }
        );

        let data: WorkspaceData = serde_json::from_value(serde_json::json!({
            "workspace": { "id": "ws", "slug": "ws", "name": "WS" },
            "agents": [{ "id": "a 1", "articles": [] }]
        }))
        .unwrap();
        let page = render_route(Some(&data), &Route::Home, opts());
        assert!(page.html.contains(r#"href="/agents/a%201/1""#));
    }
}
