//! Card extraction from saved results-list HTML.
//!
//! Renders each card container to line-oriented text (block elements become line
//! breaks, inline runs stay joined) so [`parse_card_text`](crate::parse_card_text)
//! sees the same shape it would get from the live page's `innerText`.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use warmpath_shared::RawCard;

/// Default card containers across search, connections, and mutuals templates.
const DEFAULT_CARD_SELECTOR: &str = "li.reusable-search__result-container, \
     div[data-chameleon-result-urn], \
     li.mn-connection-card, \
     li.search-results__list-item, \
     div[data-view-name=\"search-entity-result-universal-template\"]";

/// Default profile link inside a card.
const DEFAULT_LINK_SELECTOR: &str = "a[href*=\"/in/\"]";

/// Elements that start a new line of card text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "br", "dd", "div", "dl", "dt", "footer", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hr", "li", "ol", "p", "section", "table", "td", "th", "tr", "ul",
];

/// Elements whose text never reaches the user.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "button"];

static DEFAULT_CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(DEFAULT_CARD_SELECTOR).expect("valid selector"));
static DEFAULT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(DEFAULT_LINK_SELECTOR).expect("valid selector"));
static ANY_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// CSS selectors locating cards and their profile links.
#[derive(Debug, Clone)]
pub struct CardSelectors {
    pub card: String,
    pub link: String,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            card: DEFAULT_CARD_SELECTOR.to_string(),
            link: DEFAULT_LINK_SELECTOR.to_string(),
        }
    }
}

impl CardSelectors {
    fn compile(&self) -> (Selector, Selector) {
        let card = Selector::parse(&self.card).unwrap_or_else(|e| {
            warn!(selector = %self.card, error = %e, "invalid card selector, using default");
            DEFAULT_CARD.clone()
        });
        let link = Selector::parse(&self.link).unwrap_or_else(|e| {
            warn!(selector = %self.link, error = %e, "invalid link selector, using default");
            DEFAULT_LINK.clone()
        });
        (card, link)
    }
}

/// Extract every card in `html`. Cards without a link keep `link: None`.
pub fn cards_from_html(html: &str, selectors: &CardSelectors) -> Vec<RawCard> {
    let doc = Html::parse_document(html);
    let (card_sel, link_sel) = selectors.compile();

    let cards: Vec<RawCard> = doc
        .select(&card_sel)
        .map(|card| {
            let mut text = String::new();
            render_text(card, &mut text);
            RawCard {
                text,
                link: first_href(card, &link_sel),
            }
        })
        .collect();

    debug!(cards = cards.len(), "extracted cards from snapshot");
    cards
}

fn first_href(card: ElementRef<'_>, link_sel: &Selector) -> Option<String> {
    card.select(link_sel)
        .chain(card.select(&ANY_LINK))
        .find_map(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

fn render_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => push_collapsed(out, text),
            Node::Element(element) => {
                let name = element.name();
                if SKIP_TAGS.contains(&name) || element.classes().any(|c| c == "visually-hidden")
                {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    render_text(child_el, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Append text with whitespace runs collapsed to one space, as layout would.
fn push_collapsed(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with([' ', '\n']) {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_card_text;

    const RESULTS: &str = r#"<html><body><ul>
        <li class="reusable-search__result-container">
          <div class="entity-result">
            <a href="https://www.linkedin.com/in/jane-doe?miniProfileUrn=abc">
              <span aria-hidden="true">Jane</span> <span aria-hidden="true">Doe</span>
              <span class="visually-hidden">View Jane Doe's profile</span>
            </a>
            <span class="entity-result__badge">• 2nd</span>
            <div class="entity-result__primary-subtitle">Partner at Alpha Ventures</div>
            <div class="entity-result__secondary-subtitle">San Francisco Bay Area</div>
            <button>Connect</button>
          </div>
        </li>
        <li class="reusable-search__result-container">
          <div>LinkedIn Member</div>
          <div>Designer</div>
        </li>
    </ul></body></html>"#;

    #[test]
    fn extracts_cards_with_links() {
        let cards = cards_from_html(RESULTS, &CardSelectors::default());
        assert_eq!(cards.len(), 2);
        assert_eq!(
            cards[0].link.as_deref(),
            Some("https://www.linkedin.com/in/jane-doe?miniProfileUrn=abc")
        );
        assert!(cards[1].link.is_none());
    }

    #[test]
    fn rendered_text_parses_into_fields() {
        let cards = cards_from_html(RESULTS, &CardSelectors::default());
        let card = parse_card_text(&cards[0].text);
        assert_eq!(card.name, "Jane Doe");
        assert_eq!(card.headline, "Partner at Alpha Ventures");
        assert_eq!(card.location, "San Francisco Bay Area");
        assert!(!cards[0].text.contains("View Jane Doe"));
        assert!(!cards[0].text.contains("Connect"));
    }

    #[test]
    fn source_whitespace_does_not_split_lines() {
        let html = r#"<ul><li class="mn-connection-card"><a href="/in/x">
            Ada
            Lovelace</a><p>Analyst</p></li></ul>"#;
        let cards = cards_from_html(html, &CardSelectors::default());
        assert_eq!(parse_card_text(&cards[0].text).name, "Ada Lovelace");
        assert_eq!(parse_card_text(&cards[0].text).headline, "Analyst");
    }

    #[test]
    fn invalid_selector_falls_back_to_default() {
        let selectors = CardSelectors {
            card: "li[[[".into(),
            link: "a[href*=\"/in/\"]".into(),
        };
        assert_eq!(cards_from_html(RESULTS, &selectors).len(), 2);
    }

    #[test]
    fn no_cards_in_unrelated_markup() {
        let cards = cards_from_html("<html><body><p>Sign in</p></body></html>", &CardSelectors::default());
        assert!(cards.is_empty());
    }
}
