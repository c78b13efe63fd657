//! Strip ellipsis runs from message text.
//!
//! Cleaning runs in three regex passes over the (optionally masked) text:
//! runs directly after a quote or emphasis marker, runs directly before one,
//! then every remaining run. Code and markup are masked first when
//! [`CleanerConfig::protect_code`] is set, and restored afterwards.

use std::borrow::Cow;

use fancy_regex::Regex;
use log::{trace, warn};

use crate::{
    config::CleanerConfig,
    patterns::{DotMode, PatternSet},
    protect::Masked,
};

/// Cleaned text and the number of characters the patterns matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanResult<'a> {
    pub text: Cow<'a, str>,
    /// Characters matched across all passes; this is not the length delta,
    /// since a removal may leave a space behind.
    pub removed: usize,
}

impl<'a> CleanResult<'a> {
    fn unchanged(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            removed: 0,
        }
    }
}

/// Remove ellipsis runs from `text`.
///
/// Text without any match is returned borrowed and byte-for-byte unchanged.
/// Cleaning never fails: should a pattern hit the regex engine's backtrack
/// limit, the text is left as it was and a warning is logged.
///
/// # Examples
///
/// ```
/// use unellipsis::{CleanerConfig, clean};
///
/// let res = clean("hello...world `a...b`", &CleanerConfig::default());
/// assert_eq!(res.text, "hello world `a...b`");
/// assert_eq!(res.removed, 3);
/// ```
#[must_use]
pub fn clean<'a>(text: &'a str, config: &CleanerConfig) -> CleanResult<'a> {
    if !text.contains(['.', '…']) {
        return CleanResult::unchanged(text);
    }
    match try_clean(text, config) {
        Ok(Some((cleaned, removed))) => {
            trace!("removed {removed} ellipsis characters");
            CleanResult {
                text: Cow::Owned(cleaned),
                removed,
            }
        }
        Ok(None) => CleanResult::unchanged(text),
        Err(err) => {
            warn!("leaving text unchanged: {err}");
            CleanResult::unchanged(text)
        }
    }
}

fn try_clean(
    text: &str,
    config: &CleanerConfig,
) -> Result<Option<(String, usize)>, fancy_regex::Error> {
    let patterns = PatternSet::for_mode(DotMode::from_config(config));
    let masked = config.protect_code.then(|| Masked::protect(text));
    let working = masked.as_ref().map_or(text, Masked::text);

    let mut removed = 0;
    let trimmed = replace_runs(&patterns.after_marker, working, &mut removed, |_, _| "")?;
    let mut working = replace_runs(&patterns.before_marker, &trimmed, &mut removed, |_, _| "")?;
    // Deleting a run can join the dots on either side into a new one.
    loop {
        let before = removed;
        let next = if config.preserve_space {
            replace_runs(&patterns.run, &working, &mut removed, gap)?
        } else {
            replace_runs(&patterns.run_with_space, &working, &mut removed, |_, _| "")?
        };
        if removed == before {
            break;
        }
        working = Cow::Owned(next.into_owned());
    }

    if removed == 0 {
        return Ok(None);
    }
    let cleaned = match &masked {
        Some(masked) => masked.restore(&working),
        None => working.into_owned(),
    };
    Ok(Some((cleaned, removed)))
}

/// Replace every match of `re`, adding the matched characters to `removed`.
///
/// `replacement` receives the text before and after the match, as it stood
/// before this pass.
fn replace_runs<'h, F>(
    re: &Regex,
    haystack: &'h str,
    removed: &mut usize,
    mut replacement: F,
) -> Result<Cow<'h, str>, fancy_regex::Error>
where
    F: FnMut(&str, &str) -> &'static str,
{
    let mut out: Option<String> = None;
    let mut last = 0;
    for found in re.find_iter(haystack) {
        let found = found?;
        *removed += found.as_str().chars().count();
        let buf = out.get_or_insert_with(|| String::with_capacity(haystack.len()));
        buf.push_str(&haystack[last..found.start()]);
        buf.push_str(replacement(&haystack[..found.start()], &haystack[found.end()..]));
        last = found.end();
    }
    Ok(match out {
        Some(mut buf) => {
            buf.push_str(&haystack[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(haystack),
    })
}

/// Space left behind by a removed run.
///
/// A single space keeps two words apart; none is needed at either end of the
/// text or next to existing whitespace.
fn gap(before: &str, after: &str) -> &'static str {
    let prev = before.chars().next_back();
    let next = after.chars().next();
    match (prev, next) {
        (Some(p), Some(n)) if !is_blank(p) && !is_blank(n) => " ",
        _ => "",
    }
}

/// Whitespace as ECMAScript's `\s` sees it: Unicode `White_Space` without
/// NEL, plus the byte-order mark.
fn is_blank(c: char) -> bool {
    c == '\u{feff}' || (c != '\u{85}' && c.is_whitespace())
}
