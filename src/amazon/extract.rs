//! Ordered-fallback field extraction.
//!
//! Each product field is described by a declarative chain of
//! [`FieldRule`]s tried in priority order. A rule that matches nothing is
//! not an error; it is how extraction survives markup drift. The first
//! rule yielding non-empty text wins, even if later rules would match too.

use scraper::{ElementRef, Selector};
use tracing::trace;

/// How to pull text out of a matched node.
#[derive(Debug, Clone, Copy)]
pub enum Extractor {
    /// Collect the node's full text content.
    Text,
    /// Read a named attribute.
    Attr(&'static str),
}

/// One (locator, extractor) pair in a field's fallback chain.
pub struct FieldRule {
    selector: Selector,
    extractor: Extractor,
}

impl FieldRule {
    /// Rule that extracts a matched node's text content.
    pub fn text(css: &str) -> Self {
        Self { selector: Selector::parse(css).unwrap(), extractor: Extractor::Text }
    }

    /// Rule that reads an attribute off a matched node.
    pub fn attr(css: &str, name: &'static str) -> Self {
        Self { selector: Selector::parse(css).unwrap(), extractor: Extractor::Attr(name) }
    }

    /// Applies this rule within `scope`, returning trimmed non-empty text.
    pub fn apply(&self, scope: ElementRef) -> Option<String> {
        let node = scope.select(&self.selector).next()?;

        let raw = match self.extractor {
            Extractor::Text => node.text().collect::<String>(),
            Extractor::Attr(name) => node.value().attr(name)?.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Runs a fallback chain against `scope`, returning the first rule's
/// non-empty result. `None` means every rule missed; callers treat that
/// as an absent field, never as an error.
pub fn extract_first(scope: ElementRef, rules: &[FieldRule]) -> Option<String> {
    for (index, rule) in rules.iter().enumerate() {
        if let Some(value) = rule.apply(scope) {
            trace!("rule {} matched: {:?}", index, value);
            return Some(value);
        }
    }
    None
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn root(html: &Html) -> ElementRef {
        html.root_element()
    }

    #[test]
    fn test_text_rule() {
        let html = Html::parse_document("<div><span id='t'>  Hello  </span></div>");
        let rule = FieldRule::text("span#t");
        assert_eq!(rule.apply(root(&html)), Some("Hello".to_string()));
    }

    #[test]
    fn test_attr_rule() {
        let html = Html::parse_document("<div><a id='x' title='4.5 out of 5 stars'>go</a></div>");
        let rule = FieldRule::attr("a#x", "title");
        assert_eq!(rule.apply(root(&html)), Some("4.5 out of 5 stars".to_string()));
    }

    #[test]
    fn test_missing_node_is_no_match() {
        let html = Html::parse_document("<div></div>");
        let rule = FieldRule::text("span#absent");
        assert_eq!(rule.apply(root(&html)), None);
    }

    #[test]
    fn test_empty_text_is_no_match() {
        let html = Html::parse_document("<div><span id='t'>   </span></div>");
        let rule = FieldRule::text("span#t");
        assert_eq!(rule.apply(root(&html)), None);
    }

    #[test]
    fn test_missing_attr_is_no_match() {
        let html = Html::parse_document("<div><a id='x'>go</a></div>");
        let rule = FieldRule::attr("a#x", "title");
        assert_eq!(rule.apply(root(&html)), None);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Both the second and third rules match; the second is earlier in
        // the chain so its value must be returned.
        let html = Html::parse_document(
            "<div><span class='new'>from-new</span><span class='old'>from-old</span></div>",
        );
        let rules = vec![
            FieldRule::text("span#nonexistent"),
            FieldRule::text("span.new"),
            FieldRule::text("span.old"),
        ];
        assert_eq!(extract_first(root(&html), &rules), Some("from-new".to_string()));
    }

    #[test]
    fn test_chain_falls_through_empty_matches() {
        // The first rule matches a node with empty text; the chain must
        // keep going instead of stopping there.
        let html = Html::parse_document(
            "<div><span class='new'>  </span><span class='old'>value</span></div>",
        );
        let rules = vec![FieldRule::text("span.new"), FieldRule::text("span.old")];
        assert_eq!(extract_first(root(&html), &rules), Some("value".to_string()));
    }

    #[test]
    fn test_exhausted_chain_is_none() {
        let html = Html::parse_document("<div><p>unrelated</p></div>");
        let rules = vec![FieldRule::text("span.a"), FieldRule::text("span.b")];
        assert_eq!(extract_first(root(&html), &rules), None);
    }

    #[test]
    fn test_scoped_extraction() {
        // Rules applied inside an ancestor node must not see siblings.
        let html = Html::parse_document(
            "<div class='block'><span class='v'>inner</span></div><span class='v'>outer</span>",
        );
        let block_sel = Selector::parse("div.block").unwrap();
        let block = html.select(&block_sel).next().unwrap();

        let rule = FieldRule::text("span.v");
        assert_eq!(rule.apply(block), Some("inner".to_string()));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\n\t c"), "a b c");
        assert_eq!(collapse_whitespace("  one  "), "one");
        assert_eq!(collapse_whitespace(""), "");
    }
}
