// Sitemap loading: fetch a sitemap (or sitemap index) and flatten it into URLs

use crate::error::{CheckError, Result};
use reqwest::Client;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use sitemap::structs::Location;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How many sitemap index levels are followed below the first document.
pub const MAX_INDEX_DEPTH: usize = 3;

/// Entries found in a single sitemap document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedSitemap {
    /// `<url><loc>` entries, in document order.
    pub urls: Vec<String>,
    /// `<sitemap><loc>` entries of a sitemap index, in document order.
    pub sitemaps: Vec<String>,
    /// Entries the reader could not make sense of.
    pub errors: Vec<String>,
}

impl ParsedSitemap {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.sitemaps.is_empty()
    }
}

/// Parse one sitemap document. Never fails; unreadable entries are collected
/// in `errors` and skipped.
pub fn parse_sitemap(xml: &str) -> ParsedSitemap {
    let mut parsed = ParsedSitemap::default();

    for entity in SiteMapReader::new(xml.as_bytes()) {
        match entity {
            SiteMapEntity::Url(entry) => match entry.loc {
                Location::Url(url) => parsed.urls.push(url.to_string()),
                Location::ParseErr(e) => parsed.errors.push(format!("{:?}", e)),
                Location::None => parsed.errors.push("<url> without <loc>".to_string()),
            },
            SiteMapEntity::SiteMap(entry) => match entry.loc {
                Location::Url(url) => parsed.sitemaps.push(url.to_string()),
                Location::ParseErr(e) => parsed.errors.push(format!("{:?}", e)),
                Location::None => parsed.errors.push("<sitemap> without <loc>".to_string()),
            },
            SiteMapEntity::Err(e) => parsed.errors.push(format!("{:?}", e)),
        }
    }

    parsed
}

pub fn sitemap_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("sitecheck/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}

/// Fetch `sitemap_url` and return every listed page URL in document order.
///
/// Sitemap indexes are followed breadth-first up to [`MAX_INDEX_DEPTH`]
/// levels. Any fetch failure is fatal; a run never starts on a partial list.
pub async fn fetch_sitemap_urls(client: &Client, sitemap_url: &str) -> Result<Vec<String>> {
    let mut pending = VecDeque::from([(sitemap_url.to_string(), 0usize)]);
    let mut visited = HashSet::new();
    let mut urls = Vec::new();

    while let Some((current, depth)) = pending.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }

        let body = fetch_document(client, &current).await?;
        let parsed = parse_sitemap(&body);

        for error in &parsed.errors {
            warn!("Skipping unreadable entry in {}: {}", current, error);
        }
        if parsed.is_empty() && !parsed.errors.is_empty() {
            return Err(CheckError::SitemapParse {
                url: current,
                reason: parsed.errors.join("; "),
            });
        }

        debug!(
            "{} lists {} URLs and {} sitemaps",
            current,
            parsed.urls.len(),
            parsed.sitemaps.len()
        );
        urls.extend(parsed.urls);

        if depth < MAX_INDEX_DEPTH {
            pending.extend(parsed.sitemaps.into_iter().map(|s| (s, depth + 1)));
        } else if !parsed.sitemaps.is_empty() {
            warn!(
                "Not following {} nested sitemaps in {}: index depth limit reached",
                parsed.sitemaps.len(),
                current
            );
        }
    }

    if urls.is_empty() {
        return Err(CheckError::EmptySitemap(sitemap_url.to_string()));
    }

    info!("Loaded {} URLs from {}", urls.len(), sitemap_url);
    Ok(urls)
}

async fn fetch_document(client: &Client, url: &str) -> Result<String> {
    let fetch_error = |source| CheckError::SitemapFetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(fetch_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CheckError::SitemapStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(fetch_error)
}
