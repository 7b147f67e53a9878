//! People-search URL construction.

use serde::{Deserialize, Serialize};
use url::Url;

use warmpath_shared::{ConnectionDegree, Result, SiteConfig, WarmpathError};

const PEOPLE_SEARCH_PATH: &str = "/search/results/people/";

/// Parameters for a people search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleSearchQuery {
    /// Free-text keywords.
    pub keywords: String,
    /// Optional location appended to the keywords.
    #[serde(default)]
    pub location: Option<String>,
    /// Degree filters, in the order they should appear in the `network` param.
    #[serde(default)]
    pub network: Vec<ConnectionDegree>,
    /// Result page for page-number pagination; page 1 is implicit.
    #[serde(default)]
    pub page: Option<u32>,
}

/// Build `https://<host>/search/results/people/?keywords=...&network=[...]`.
///
/// `network` is only present when at least one filter maps to a code
/// (`F`, `S`, `O`); unknown degrees are skipped.
pub fn people_search_url(site: &SiteConfig, query: &PeopleSearchQuery) -> Result<Url> {
    let mut url = Url::parse(&site.origin())
        .and_then(|base| base.join(PEOPLE_SEARCH_PATH))
        .map_err(|e| WarmpathError::config(format!("invalid site host {:?}: {e}", site.host)))?;

    let keywords = [Some(query.keywords.as_str()), query.location.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut codes: Vec<&str> = Vec::new();
    for code in query.network.iter().filter_map(|d| d.network_code()) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }

    {
        let mut pairs = url.query_pairs_mut();
        if !keywords.is_empty() {
            pairs.append_pair("keywords", &keywords);
        }
        if !codes.is_empty() {
            let network = serde_json::to_string(&codes)
                .map_err(|e| WarmpathError::parse(format!("network filter: {e}")))?;
            pairs.append_pair("network", &network);
        }
        if let Some(page) = query.page.filter(|p| *p > 1) {
            pairs.append_pair("page", &page.to_string());
        }
    }

    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url)
}

/// Return `url` pointed at result page `page`, replacing any existing `page` param.
pub fn with_page(url: &Url, page: u32) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut next = url.clone();
    next.set_query(None);
    if !kept.is_empty() || page > 1 {
        let mut pairs = next.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
    }
    next
}
