use anyhow::{Context, Result};
use inkpress_core::config::{DEFAULT_API_BASE, DEFAULT_API_KEY_ENV, parse_site_toml_str};
use std::fs;
use std::path::{Path, PathBuf};

use super::SITE_TOML;

/// Escape a string for safe inclusion in a TOML basic string
///
/// The template keeps its comments, so values are spliced in by hand
/// rather than serialized through the toml crate.
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a site directory with a starter site.toml
pub async fn run(path: PathBuf, workspace_id: Option<String>, site_url: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    if !path.exists() {
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    let site_toml_path = path.join(SITE_TOML);
    if site_toml_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            SITE_TOML,
            site_toml_path.display()
        );
    }

    generate_site_toml(&path, workspace_id.as_deref(), site_url.as_deref())?;

    println!("\n✓ Initialization complete!");
    println!("  {}/", path.display());
    println!("  └── {}            ← Edit this to point at your workspace", SITE_TOML);
    println!("\nNext steps:");
    println!("  1. export {}=<your api key>", DEFAULT_API_KEY_ENV);
    println!("  2. Validate: inkpress validate {}", path.display());
    println!("  3. Preview:  inkpress serve {}", path.display());

    Ok(())
}

fn generate_site_toml(base: &Path, workspace_id: Option<&str>, site_url: Option<&str>) -> Result<()> {
    let id = toml_escape_string(workspace_id.unwrap_or("your-workspace-id"));
    let id_comment = if workspace_id.is_some() {
        ""
    } else {
        "  # TODO: Set workspace id"
    };
    let url = toml_escape_string(site_url.unwrap_or("https://example.com"));
    let url_comment = if site_url.is_some() {
        ""
    } else {
        "  # TODO: Set public site URL"
    };

    let toml = format!(
        "# Generated by inkpress init\n\
# Edit this file to customize your site\n\
\n\
[site]\n\
# Used for sitemap URLs when the workspace has no website of its own.\n\
# INKPRESS_SITE_URL overrides this value.\n\
url = \"{url}\"{url_comment}\n\
locale = \"en\"  # en, de or tr; the workspace language wins when set\n\
\n\
[inkpilots]\n\
workspace_id = \"{id}\"{id_comment}\n\
# api_base = \"{DEFAULT_API_BASE}\"\n\
# api_key_env = \"{DEFAULT_API_KEY_ENV}\"\n"
    );

    // Validate the generated TOML can be parsed
    parse_site_toml_str(&toml)
        .context("Generated site.toml is invalid - this is a bug in the template generator")?;

    fs::write(base.join(SITE_TOML), toml)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpress_core::parse_site_toml;
    use tempfile::TempDir;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string(r#"Test "Quote""#), r#"Test \"Quote\""#);
        assert_eq!(toml_escape_string(r"Test\Back"), r"Test\\Back");
        assert_eq!(toml_escape_string("Test\nNewline"), r"Test\nNewline");
        assert_eq!(toml_escape_string("Normal String"), "Normal String");
    }

    #[test]
    fn test_generate_site_toml_defaults() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(dir.path(), None, None).unwrap();

        let content = fs::read_to_string(dir.path().join(SITE_TOML)).unwrap();
        assert!(content.contains("TODO: Set workspace id"));
        assert!(content.contains("TODO: Set public site URL"));

        let config = parse_site_toml(dir.path().join(SITE_TOML)).unwrap();
        assert_eq!(config.api.workspace_id, "your-workspace-id");
        assert_eq!(config.api.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_generate_site_toml_with_values() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(dir.path(), Some("ws \"1\""), Some("https://news.test/")).unwrap();

        let content = fs::read_to_string(dir.path().join(SITE_TOML)).unwrap();
        assert!(!content.contains("TODO"));

        let config = parse_site_toml(dir.path().join(SITE_TOML)).unwrap();
        assert_eq!(config.api.workspace_id, "ws \"1\"");
        assert_eq!(config.site.url, "https://news.test");
    }

    #[tokio::test]
    async fn test_run_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        run(dir.path().to_path_buf(), Some("ws".into()), None).await.unwrap();
        let err = run(dir.path().to_path_buf(), None, None).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_invalid_site_url_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(generate_site_toml(dir.path(), None, Some("not a url")).is_err());
        assert!(!dir.path().join(SITE_TOML).exists());
    }
}
