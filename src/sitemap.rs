//! `sitemap.xml` generation.
//!
//! The sitemap lists, in order:
//!
//! 1. the fixed pages from `[sitemap] pages` (home, blog index, cheat sheets)
//! 2. one `/series/<slug>` page per configured series
//! 3. every scanned post not already listed as a fixed page, with `lastmod`
//!    when its front matter has `updated`
//!
//! XML is built with maud, so every interpolated value is escaped.

use crate::config::SiteConfig;
use crate::series::series_path;
use crate::types::ContentFile;
use maud::{Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `<changefreq>` values from the sitemaps.org protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<url>` element. `url` is site-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub url: String,
    pub changefreq: ChangeFreq,
    pub lastmod: Option<String>,
}

/// Collect sitemap entries: fixed pages, then series, then posts.
///
/// Posts whose URL is already listed as a fixed page (`index.md` files) are
/// left out so each URL appears once.
pub fn sitemap_entries(config: &SiteConfig, files: &[ContentFile]) -> Vec<SitemapEntry> {
    let pages = config.sitemap.pages.iter().map(|p| SitemapEntry {
        url: p.url.clone(),
        changefreq: p.changefreq,
        lastmod: None,
    });
    let series = config.series.iter().map(|s| SitemapEntry {
        url: series_path(&s.slug),
        changefreq: config.sitemap.series_changefreq,
        lastmod: None,
    });
    let is_page = |url: &str| config.sitemap.pages.iter().any(|p| p.url == url);
    let posts = files.iter().filter(|f| !is_page(&f.path)).map(|f| SitemapEntry {
        url: f.path.clone(),
        changefreq: config.sitemap.post_changefreq,
        lastmod: f.updated.clone(),
    });
    pages.chain(series).chain(posts).collect()
}

/// Join the hostname and a site-relative URL without doubling the slash.
fn absolute_url(hostname: &str, url: &str) -> String {
    format!("{}{}", hostname.trim_end_matches('/'), url)
}

fn urlset(hostname: &str, entries: &[SitemapEntry]) -> Markup {
    html! {
        urlset xmlns=(SITEMAP_NS) {
            @for entry in entries {
                url {
                    loc { (absolute_url(hostname, &entry.url)) }
                    @if let Some(lastmod) = &entry.lastmod {
                        lastmod { (lastmod) }
                    }
                    changefreq { (entry.changefreq.as_str()) }
                }
            }
        }
    }
}

/// Render entries as a complete sitemap document.
pub fn render_sitemap(hostname: &str, entries: &[SitemapEntry]) -> String {
    html! {
        (PreEscaped(XML_PROLOG))
        (urlset(hostname, entries))
    }
    .into_string()
}

/// Build and write `<public_dir>/sitemap.xml`. Returns the written path and
/// the number of URLs.
pub fn write_sitemap(
    public_dir: &Path,
    config: &SiteConfig,
    files: &[ContentFile],
) -> Result<(PathBuf, usize), SitemapError> {
    let entries = sitemap_entries(config, files);
    let xml = render_sitemap(&config.site.hostname, &entries);
    fs::create_dir_all(public_dir)?;
    let path = public_dir.join("sitemap.xml");
    fs::write(&path, xml)?;
    Ok((path, entries.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesDefinition;
    use tempfile::TempDir;

    fn post(path: &str, updated: Option<&str>) -> ContentFile {
        ContentFile {
            id: format!("content{}", path.replace('/', ":")),
            path: path.into(),
            source: format!("{}.md", path.trim_start_matches('/')),
            title: "Post".into(),
            series: None,
            updated: updated.map(String::from),
        }
    }

    fn config_with_series() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.series.push(SeriesDefinition {
            slug: "wsl".into(),
            name: "WSL".into(),
        });
        config
    }

    #[test]
    fn entries_are_pages_then_series_then_posts() {
        let files = vec![post("/blog/a", None)];
        let entries = sitemap_entries(&config_with_series(), &files);
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/blog", "/sheets", "/series/wsl", "/blog/a"]);
    }

    #[test]
    fn index_pages_are_not_repeated() {
        let files = vec![post("/", None), post("/blog", None), post("/blog/a", None)];
        let entries = sitemap_entries(&SiteConfig::default(), &files);
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/blog", "/sheets", "/blog/a"]);
    }

    #[test]
    fn changefreqs_follow_config() {
        let files = vec![post("/blog/a", Some("2023-02-01"))];
        let entries = sitemap_entries(&config_with_series(), &files);
        assert_eq!(entries[0].changefreq, ChangeFreq::Daily);
        assert_eq!(entries[2].changefreq, ChangeFreq::Monthly);
        assert_eq!(entries[3].changefreq, ChangeFreq::Daily);
        assert_eq!(entries[4].changefreq, ChangeFreq::Weekly);
        assert_eq!(entries[4].lastmod.as_deref(), Some("2023-02-01"));
    }

    #[test]
    fn render_produces_urlset_document() {
        let entries = vec![SitemapEntry {
            url: "/blog/a".into(),
            changefreq: ChangeFreq::Weekly,
            lastmod: Some("2023-02-01".into()),
        }];
        let xml = render_sitemap("https://voracious.dev/", &entries);
        assert!(xml.starts_with(XML_PROLOG));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://voracious.dev/blog/a</loc>"));
        assert!(xml.contains("<lastmod>2023-02-01</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
    }

    #[test]
    fn lastmod_omitted_when_unknown() {
        let entries = vec![SitemapEntry {
            url: "/".into(),
            changefreq: ChangeFreq::Daily,
            lastmod: None,
        }];
        let xml = render_sitemap("https://voracious.dev", &entries);
        assert!(!xml.contains("<lastmod>"));
        assert!(xml.contains("<loc>https://voracious.dev/</loc>"));
    }

    #[test]
    fn urls_are_escaped() {
        let entries = vec![SitemapEntry {
            url: "/search?a=1&b=2".into(),
            changefreq: ChangeFreq::Never,
            lastmod: None,
        }];
        let xml = render_sitemap("https://voracious.dev", &entries);
        assert!(xml.contains("a=1&amp;b=2"));
    }

    #[test]
    fn changefreq_serde_is_lowercase() {
        let value: ChangeFreq = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(value, ChangeFreq::Monthly);
        assert_eq!(ChangeFreq::Yearly.to_string(), "yearly");
    }

    #[test]
    fn write_sitemap_creates_file() {
        let tmp = TempDir::new().unwrap();
        let public = tmp.path().join("public");
        let files = vec![post("/blog/a", None), post("/blog/b", None)];
        let (path, count) = write_sitemap(&public, &SiteConfig::default(), &files).unwrap();
        assert_eq!(path, public.join("sitemap.xml"));
        assert_eq!(count, 5);
        let xml = fs::read_to_string(path).unwrap();
        assert_eq!(xml.matches("<url>").count(), 5);
    }
}
