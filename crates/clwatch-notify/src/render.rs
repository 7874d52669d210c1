//! Plaintext and HTML digests of new listings.

use clwatch_feed::Listing;

/// Render the plaintext view of the digest.
#[must_use]
pub fn render_text(user: &str, listings: &[Listing]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Hi {user},\n\n"));
    out.push_str(&format!(
        "{} new listing(s) matched your search:\n\n",
        listings.len()
    ));
    for listing in listings {
        out.push_str(&format!("* {}\n", listing.title));
        if !listing.summary.is_empty() {
            out.push_str(&format!("  {}\n", listing.summary));
        }
        if let Some(link) = listing.link() {
            out.push_str(&format!("  {link}\n"));
        }
        out.push('\n');
    }
    out
}

/// Render the HTML view of the digest. Listing text is escaped; the link is
/// attribute-escaped and used as the title's href when present.
#[must_use]
pub fn render_html(user: &str, listings: &[Listing]) -> String {
    let mut items = String::new();
    for listing in listings {
        let title = escape_html(&listing.title);
        let heading = match listing.link() {
            Some(link) => format!(r#"<a href="{}">{title}</a>"#, escape_html(link)),
            None => title,
        };
        items.push_str(&format!(
            "<li><strong>{heading}</strong><br>{}</li>\n",
            escape_html(&listing.summary)
        ));
    }
    format!(
        "<html><body>\n<p>Hi {user},</p>\n<p>{count} new listing(s) matched your search:</p>\n<ul>\n{items}</ul>\n</body></html>\n",
        user = escape_html(user),
        count = listings.len(),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Listing> {
        let mut listing = Listing::new("id-1", "2016 GTI $17500", "Clean title & one owner");
        listing
            .extra
            .insert("link".into(), "https://example.org/gti.html".into());
        vec![listing]
    }

    #[test]
    fn text_digest_carries_title_summary_and_link() {
        let text = render_text("Mike", &sample());
        assert!(text.contains("Hi Mike,"));
        assert!(text.contains("* 2016 GTI $17500"));
        assert!(text.contains("Clean title & one owner"));
        assert!(text.contains("https://example.org/gti.html"));
    }

    #[test]
    fn html_digest_escapes_listing_text() {
        let html = render_html("Mike", &sample());
        assert!(html.contains("Clean title &amp; one owner"));
        assert!(html.contains(r#"<a href="https://example.org/gti.html">"#));
    }

    #[test]
    fn html_digest_without_link_keeps_plain_title() {
        let listings = vec![Listing::new("id-2", "<script>", "s")];
        let html = render_html("Mike", &listings);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<a href"));
    }
}
