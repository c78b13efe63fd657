//! Helper macros used across the crate.

/// Lazily compile a regex with a custom panic message.
///
/// The macro calls `Regex::new` on whichever `Regex` type is in scope, so it
/// serves both [`regex::Regex`] and [`fancy_regex::Regex`].
///
/// # Examples
///
/// Masking patterns need nothing beyond [`regex`]:
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static INLINE: LazyLock<Regex> = unellipsis::lazy_regex!(r"`[^`\n]+`", "inline code");
/// assert!(INLINE.is_match("run `x...` now"));
/// ```
///
/// Dot runs with a digit guard need look-around, so they use
/// [`fancy_regex`], whose matches are fallible:
///
/// ```
/// use std::sync::LazyLock;
///
/// use fancy_regex::Regex;
/// static RUN: LazyLock<Regex> =
///     unellipsis::lazy_regex!(r"(?<![0-9])\.{3,}(?![0-9])", "guarded run");
/// assert!(RUN.is_match("wait...").unwrap());
/// assert!(!RUN.is_match("3...4").unwrap());
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
