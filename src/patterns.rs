//! Ellipsis patterns selected from the cleaner configuration.
//!
//! The dot-run patterns need look-around to keep decimals such as `3.14`
//! intact, so they are compiled with `fancy_regex`. Each mode compiles once.

use std::sync::LazyLock;

use fancy_regex::Regex;

use crate::config::CleanerConfig;

/// How many dots make a removable run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotMode {
    /// Every period, including single ones and decimal points.
    AllDots,
    /// Runs of two or more dots not touching a digit.
    TwoOrMore,
    /// Runs of three or more dots not touching a digit.
    ThreeOrMore,
}

impl DotMode {
    #[must_use]
    pub fn from_config(config: &CleanerConfig) -> Self {
        if config.remove_all_dots {
            Self::AllDots
        } else if config.treat_two_dots {
            Self::TwoOrMore
        } else {
            Self::ThreeOrMore
        }
    }

    /// Pattern source matching one ellipsis run.
    ///
    /// The digit guard only applies to the counted modes; `AllDots` strips
    /// decimal points too.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::AllDots => r"\.+|…",
            Self::TwoOrMore => r"(?<![0-9])\.{2,}(?![0-9])|…",
            Self::ThreeOrMore => r"(?<![0-9])\.{3,}(?![0-9])|…",
        }
    }
}

/// Compiled patterns for one [`DotMode`].
#[derive(Debug)]
pub struct PatternSet {
    /// A bare run.
    pub run: Regex,
    /// A run plus trailing spaces and tabs.
    pub run_with_space: Regex,
    /// A run plus trailing blanks, directly after `*`, `"` or `'`.
    pub after_marker: Regex,
    /// A run plus trailing blanks, directly before `*`, `"` or `'`.
    pub before_marker: Regex,
}

static ALL_DOTS: LazyLock<PatternSet> = LazyLock::new(|| PatternSet::compile(DotMode::AllDots));
static TWO_OR_MORE: LazyLock<PatternSet> =
    LazyLock::new(|| PatternSet::compile(DotMode::TwoOrMore));
static THREE_OR_MORE: LazyLock<PatternSet> =
    LazyLock::new(|| PatternSet::compile(DotMode::ThreeOrMore));

impl PatternSet {
    fn compile(mode: DotMode) -> Self {
        let run = mode.source();
        Self {
            run: Regex::new(run).expect("valid ellipsis regex"),
            run_with_space: Regex::new(&format!(r"(?:{run})[ \t]*"))
                .expect("valid ellipsis regex"),
            after_marker: Regex::new(&format!(r#"(?<=[*"'])(?:{run})[ \t]*"#))
                .expect("valid ellipsis regex"),
            before_marker: Regex::new(&format!(r#"(?:{run})[ \t]*(?=[*"'])"#))
                .expect("valid ellipsis regex"),
        }
    }

    /// Patterns for `mode`, compiled on first use.
    #[must_use]
    pub fn for_mode(mode: DotMode) -> &'static Self {
        match mode {
            DotMode::AllDots => LazyLock::force(&ALL_DOTS),
            DotMode::TwoOrMore => LazyLock::force(&TWO_OR_MORE),
            DotMode::ThreeOrMore => LazyLock::force(&THREE_OR_MORE),
        }
    }
}
