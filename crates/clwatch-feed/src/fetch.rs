//! Feed fetch and RSS parsing.

use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::FeedError;
use crate::listing::Listing;

/// HTTP client for the listing feed.
pub struct FeedClient {
    client: reqwest::Client,
}

impl FeedClient {
    /// Creates a client with a bounded request timeout and custom user agent.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the feed at `url` and parses its items into listings.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on network failure or non-2xx status, or
    /// [`FeedError::Xml`] on malformed feed XML. Either aborts the run; the
    /// caller's persisted state is untouched.
    pub async fn fetch_listings(&self, url: &str) -> Result<Vec<Listing>, FeedError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_feed(&body)
    }
}

/// Parse an RSS/RDF feed body into listings.
///
/// Each `<item>` becomes one [`Listing`]: `<guid>` (falling back to `<link>`)
/// is the id, `<title>` the title, `<description>` the summary; every other
/// child element lands in the listing's `extra` map keyed by its local name.
/// Items with no usable id are skipped with a warning.
pub(crate) fn parse_feed(xml: &str) -> Result<Vec<Listing>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut listings = Vec::new();
    let mut fields: std::collections::BTreeMap<String, String> = std::collections::BTreeMap::new();
    let mut in_item = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(e.name().as_ref());
                if name == "item" {
                    in_item = true;
                    fields.clear();
                } else {
                    current_tag = name;
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                if local_name(raw.as_ref()) == "item" && in_item {
                    in_item = false;
                    match listing_from_fields(&mut fields) {
                        Some(listing) => listings.push(listing),
                        None => tracing::warn!("skipping feed item without guid or link"),
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    // Undeclared entities (e.g. HTML's &ndash;) fail to
                    // unescape; keep the raw text rather than losing the field.
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(err) => {
                            tracing::warn!(tag = %current_tag, error = %err, "keeping raw feed text after unescape failure");
                            String::from_utf8_lossy(e.as_ref()).into_owned()
                        }
                    };
                    append_field(&mut fields, &current_tag, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    append_field(&mut fields, &current_tag, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(listings)
}

/// Elements can split their content across several text/CDATA events; each
/// chunk is appended to the field rather than replacing it.
fn append_field(
    fields: &mut std::collections::BTreeMap<String, String>,
    tag: &str,
    text: &str,
) {
    match fields.get_mut(tag) {
        Some(existing) => existing.push_str(text),
        None => {
            fields.insert(tag.to_owned(), text.to_owned());
        }
    }
}

/// Strip any namespace prefix from a qualified tag name.
fn local_name(raw: &[u8]) -> String {
    let name = std::str::from_utf8(raw).unwrap_or("");
    name.rsplit(':').next().unwrap_or(name).to_string()
}

fn listing_from_fields(
    fields: &mut std::collections::BTreeMap<String, String>,
) -> Option<Listing> {
    let id = fields
        .remove("guid")
        .or_else(|| fields.get("link").cloned())?;
    if id.is_empty() {
        return None;
    }
    let title = fields.remove("title").unwrap_or_default();
    let summary = fields.remove("description").unwrap_or_default();

    let mut listing = Listing::new(id, title, summary);
    listing.extra = std::mem::take(fields);
    Some(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dc="http://purl.org/dc/elements/1.1/"
         xmlns="http://purl.org/rss/1.0/">
  <channel>
    <title>craigslist denver | cars &amp; trucks</title>
  </channel>
  <item>
    <title>2016 VW GTI SE &amp;#x0024;17500</title>
    <link>https://denver.craigslist.org/cto/d/gti/7001.html</link>
    <description>Clean title, one owner.</description>
    <dc:date>2026-08-20T14:02:00-06:00</dc:date>
  </item>
  <item>
    <title><![CDATA[2018 Golf R]]></title>
    <link>https://denver.craigslist.org/ctd/d/golf-r/7002.html</link>
    <description><![CDATA[Low miles.]]></description>
  </item>
</rdf:RDF>"#;

    #[test]
    fn parses_items_in_feed_order() {
        let listings = parse_feed(SAMPLE_FEED).expect("should parse valid feed");
        assert_eq!(listings.len(), 2);
        assert_eq!(
            listings[0].id,
            "https://denver.craigslist.org/cto/d/gti/7001.html"
        );
        assert_eq!(listings[0].title, "2016 VW GTI SE &#x0024;17500");
        assert_eq!(listings[0].summary, "Clean title, one owner.");
        assert_eq!(
            listings[1].id,
            "https://denver.craigslist.org/ctd/d/golf-r/7002.html"
        );
        assert_eq!(listings[1].title, "2018 Golf R");
        assert_eq!(listings[1].summary, "Low miles.");
    }

    #[test]
    fn link_and_date_land_in_extra() {
        let listings = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(
            listings[0].link(),
            Some("https://denver.craigslist.org/cto/d/gti/7001.html")
        );
        assert_eq!(
            listings[0].extra.get("date").map(String::as_str),
            Some("2026-08-20T14:02:00-06:00")
        );
    }

    #[test]
    fn guid_wins_over_link_as_id() {
        let xml = r#"<rss version="2.0"><channel><item>
            <guid>post-123</guid>
            <link>https://example.org/post-123.html</link>
            <title>t</title>
            <description>s</description>
        </item></channel></rss>"#;
        let listings = parse_feed(xml).unwrap();
        assert_eq!(listings[0].id, "post-123");
        assert_eq!(listings[0].link(), Some("https://example.org/post-123.html"));
    }

    #[test]
    fn item_without_id_is_skipped() {
        let xml = r#"<rss version="2.0"><channel>
          <item><title>orphan</title></item>
          <item><link>https://example.org/ok.html</link><title>ok</title></item>
        </channel></rss>"#;
        let listings = parse_feed(xml).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "ok");
    }

    #[test]
    fn undeclared_entity_keeps_the_raw_text() {
        let xml = r#"<rss version="2.0"><channel><item>
            <link>https://example.org/dash.html</link>
            <title>2014 Jetta &ndash; low miles</title>
            <description>runs &ndash; drives</description>
        </item></channel></rss>"#;
        let listings = parse_feed(xml).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "2014 Jetta &ndash; low miles");
        assert_eq!(listings[0].summary, "runs &ndash; drives");
    }

    #[test]
    fn mixed_text_and_cdata_chunks_are_concatenated() {
        let xml = r#"<rss version="2.0"><channel><item>
            <link>https://example.org/mixed.html</link>
            <title>one&amp;two<![CDATA[three]]></title>
        </item></channel></rss>"#;
        let listings = parse_feed(xml).unwrap();
        assert_eq!(listings[0].title, "one&twothree");
    }

    #[test]
    fn empty_feed_parses_to_no_listings() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        assert!(parse_feed(xml).unwrap().is_empty());
    }
}
