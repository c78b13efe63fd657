//! Masking of code and markup spans.
//!
//! Before cleaning, each protected span is swapped for a single private-use
//! sentinel character and recorded in the order its sentinel appears in the
//! masked text. Restoration walks the cleaned text and hands back the k-th
//! span for the k-th sentinel. Sentinels already present in the source are
//! recorded as spans of their own, so the mapping stays injective whatever
//! the input contains.

use std::sync::LazyLock;

use regex::Regex;

/// Character standing in for a protected span in masked text.
pub const SENTINEL: char = '\u{E000}';

static FENCE_RE: LazyLock<Regex> = lazy_regex!(r"(?s)```.*?```", "valid code fence regex");
static INLINE_CODE_RE: LazyLock<Regex> = lazy_regex!(r"`[^`]*`", "valid inline code regex");
static SCRIPT_RE: LazyLock<Regex> =
    lazy_regex!(r"(?is)<script\b[^>]*>.*?</script>", "valid script block regex");
static STYLE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?is)<style\b[^>]*>.*?</style>", "valid style block regex");
static PRE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?is)<pre\b[^>]*>.*?</pre>", "valid pre block regex");
static CODE_ELEMENT_RE: LazyLock<Regex> =
    lazy_regex!(r"(?is)<code\b[^>]*>.*?</code>", "valid code element regex");
static TAG_RE: LazyLock<Regex> = lazy_regex!(r"<[^>]+>", "valid tag regex");

/// What a protected span was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A sentinel character that was already part of the source.
    Sentinel,
    Fence,
    InlineCode,
    Script,
    Style,
    Pre,
    CodeElement,
    Tag,
}

impl SpanKind {
    /// Masking passes in the order they run.
    ///
    /// Code is masked before the generic tag pass so that tag matching never
    /// splits the contents of a code block.
    pub const PASSES: [SpanKind; 7] = [
        SpanKind::Fence,
        SpanKind::InlineCode,
        SpanKind::Script,
        SpanKind::Style,
        SpanKind::Pre,
        SpanKind::CodeElement,
        SpanKind::Tag,
    ];

    fn regex(self) -> Option<&'static Regex> {
        let re = match self {
            SpanKind::Sentinel => return None,
            SpanKind::Fence => &FENCE_RE,
            SpanKind::InlineCode => &INLINE_CODE_RE,
            SpanKind::Script => &SCRIPT_RE,
            SpanKind::Style => &STYLE_RE,
            SpanKind::Pre => &PRE_RE,
            SpanKind::CodeElement => &CODE_ELEMENT_RE,
            SpanKind::Tag => &TAG_RE,
        };
        Some(LazyLock::force(re))
    }
}

/// An original substring hidden behind a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub kind: SpanKind,
    pub text: String,
}

/// Text with its protected spans swapped out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Masked {
    text: String,
    spans: Vec<ProtectedSpan>,
}

impl Masked {
    /// Wrap `source` without masking anything yet.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let spans = source
            .chars()
            .filter(|&c| c == SENTINEL)
            .map(|c| ProtectedSpan {
                kind: SpanKind::Sentinel,
                text: c.to_string(),
            })
            .collect();
        Self {
            text: source.to_string(),
            spans,
        }
    }

    /// Mask every code and markup span in `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unellipsis::protect::{Masked, SENTINEL};
    ///
    /// let masked = Masked::protect("see `a...b` here");
    /// assert_eq!(masked.text(), format!("see {SENTINEL} here"));
    /// assert_eq!(masked.restore(masked.text()), "see `a...b` here");
    /// ```
    #[must_use]
    pub fn protect(source: &str) -> Self {
        let mut masked = Self::new(source);
        for kind in SpanKind::PASSES {
            masked.mask(kind);
        }
        masked
    }

    /// Run one masking pass over the current text.
    ///
    /// Matches are leftmost-first and non-overlapping. A match that swallows
    /// earlier sentinels records the fully expanded original text.
    pub fn mask(&mut self, kind: SpanKind) {
        let Some(re) = kind.regex() else {
            return;
        };
        if !re.is_match(&self.text) {
            return;
        }

        let mut previous = std::mem::take(&mut self.spans).into_iter();
        let mut text = String::with_capacity(self.text.len());
        let mut spans = Vec::new();
        let mut last = 0;
        for found in re.find_iter(&self.text) {
            let gap = &self.text[last..found.start()];
            spans.extend(previous.by_ref().take(sentinel_count(gap)));
            text.push_str(gap);
            spans.push(ProtectedSpan {
                kind,
                text: expand(found.as_str(), &mut previous),
            });
            text.push(SENTINEL);
            last = found.end();
        }
        let tail = &self.text[last..];
        spans.extend(previous.by_ref().take(sentinel_count(tail)));
        text.push_str(tail);

        self.text = text;
        self.spans = spans;
    }

    /// The masked text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Protected spans in sentinel order.
    #[must_use]
    pub fn spans(&self) -> &[ProtectedSpan] {
        &self.spans
    }

    /// Replace each sentinel in `cleaned` with its span, in order.
    ///
    /// `cleaned` must be derived from [`Masked::text`] by edits that neither
    /// add nor remove sentinels.
    #[must_use]
    pub fn restore(&self, cleaned: &str) -> String {
        if self.spans.is_empty() {
            return cleaned.to_string();
        }
        let extra: usize = self.spans.iter().map(|s| s.text.len()).sum();
        let mut out = String::with_capacity(cleaned.len() + extra);
        let mut spans = self.spans.iter().peekable();
        for c in cleaned.chars() {
            match spans.next_if(|_| c == SENTINEL) {
                Some(span) => out.push_str(&span.text),
                None => out.push(c),
            }
        }
        out
    }
}

fn sentinel_count(s: &str) -> usize {
    s.matches(SENTINEL).count()
}

fn expand(chunk: &str, spans: &mut impl Iterator<Item = ProtectedSpan>) -> String {
    let mut out = String::with_capacity(chunk.len());
    for c in chunk.chars() {
        if c == SENTINEL
            && let Some(span) = spans.next()
        {
            out.push_str(&span.text);
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(masked: &Masked) -> Vec<SpanKind> {
        masked.spans().iter().map(|s| s.kind).collect()
    }

    #[test]
    fn masks_fence_before_inline_code() {
        let masked = Masked::protect("a ```x...`y`...``` b `z...`");
        assert_eq!(masked.text(), format!("a {SENTINEL} b {SENTINEL}"));
        assert_eq!(kinds(&masked), vec![SpanKind::Fence, SpanKind::InlineCode]);
        assert_eq!(masked.spans()[0].text, "```x...`y`...```");
    }

    #[test]
    fn spans_follow_position_not_pass_order() {
        let masked = Masked::protect("<b>one...</b> then `two...`");
        assert_eq!(
            kinds(&masked),
            vec![SpanKind::Tag, SpanKind::Tag, SpanKind::InlineCode]
        );
        assert_eq!(masked.text(), format!("{SENTINEL}one...{SENTINEL} then {SENTINEL}"));
    }

    #[test]
    fn code_elements_are_case_insensitive_and_multiline() {
        let masked = Masked::protect("x <PRE class=\"a\">\nwait...\n</PRE> y");
        assert_eq!(kinds(&masked), vec![SpanKind::Pre]);
        assert_eq!(masked.text(), format!("x {SENTINEL} y"));
    }

    #[test]
    fn nested_spans_expand_to_original_text() {
        let masked = Masked::protect("<a title=`t...`> ok");
        assert_eq!(kinds(&masked), vec![SpanKind::Tag]);
        assert_eq!(masked.spans()[0].text, "<a title=`t...`>");
        assert_eq!(masked.restore(masked.text()), "<a title=`t...`> ok");
    }

    #[test]
    fn source_sentinels_round_trip() {
        let source = format!("{SENTINEL} `a` {SENTINEL}");
        let masked = Masked::protect(&source);
        assert_eq!(
            kinds(&masked),
            vec![SpanKind::Sentinel, SpanKind::InlineCode, SpanKind::Sentinel]
        );
        assert_eq!(masked.restore(masked.text()), source);
    }

    #[test]
    fn unmatched_fence_falls_back_to_inline_code() {
        let masked = Masked::protect("```a...");
        assert_eq!(kinds(&masked), vec![SpanKind::InlineCode]);
        assert_eq!(masked.text(), format!("{SENTINEL}`a..."));
    }

    #[test]
    fn plain_text_is_untouched() {
        let masked = Masked::protect("nothing to hide...");
        assert!(masked.spans().is_empty());
        assert_eq!(masked.text(), "nothing to hide...");
    }
}
