// src/version.rs

//! Version parsing and comparison for Python package versions
//!
//! This module implements the standard Python packaging version scheme
//! (epoch, release segments, pre/post/dev markers, local segment) with a
//! lexicographic fallback for version strings that do not follow it.
//! Parsing never fails: unrecognized strings become `Legacy` versions
//! that sort below every standard version.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>a|b|c|rc|alpha|beta|pre|preview)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        $",
    )
    .unwrap()
});

/// Pre-release label, normalized from the accepted spellings
/// (alpha/a, beta/b, c/pre/preview/rc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreLabel {
    Alpha,
    Beta,
    Rc,
}

impl PreLabel {
    fn from_spelling(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "a" | "alpha" => PreLabel::Alpha,
            "b" | "beta" => PreLabel::Beta,
            _ => PreLabel::Rc,
        }
    }
}

impl fmt::Display for PreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreLabel::Alpha => write!(f, "a"),
            PreLabel::Beta => write!(f, "b"),
            PreLabel::Rc => write!(f, "rc"),
        }
    }
}

/// One segment of a local version suffix. Numeric segments compare
/// numerically and rank above textual segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalSegment {
    Text(String),
    Number(u64),
}

impl Ord for LocalSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LocalSegment::Number(a), LocalSegment::Number(b)) => a.cmp(b),
            (LocalSegment::Number(_), LocalSegment::Text(_)) => Ordering::Greater,
            (LocalSegment::Text(_), LocalSegment::Number(_)) => Ordering::Less,
            (LocalSegment::Text(a), LocalSegment::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSegment::Text(s) => write!(f, "{}", s),
            LocalSegment::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A version following the standard Python packaging scheme
#[derive(Debug, Clone)]
pub struct StandardVersion {
    pub epoch: u64,
    pub release: Vec<u64>,
    pub pre: Option<(PreLabel, u64)>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    pub local: Option<Vec<LocalSegment>>,
}

impl StandardVersion {
    /// Release segments with trailing zeros removed, so that
    /// "1.0" and "1.0.0" compare (and hash) as the same version
    fn trimmed_release(&self) -> &[u64] {
        let mut end = self.release.len();
        while end > 1 && self.release[end - 1] == 0 {
            end -= 1;
        }
        &self.release[..end]
    }

    /// Pre-release rank: a dev-only version sorts below every
    /// pre-release, and a final version sorts above them all
    fn pre_key(&self) -> (u8, u8, u64) {
        match self.pre {
            Some((label, number)) => (1, label as u8, number),
            None if self.post.is_none() && self.dev.is_some() => (0, 0, 0),
            None => (2, 0, 0),
        }
    }

    /// Dev rank: a missing dev marker sorts above any dev number
    fn dev_key(&self) -> (u8, u64) {
        match self.dev {
            Some(number) => (0, number),
            None => (1, 0),
        }
    }
}

impl Ord for StandardVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for StandardVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for StandardVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StandardVersion {}

impl Hash for StandardVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        self.trimmed_release().hash(state);
        self.pre_key().hash(state);
        self.post.hash(state);
        self.dev_key().hash(state);
        self.local.hash(state);
    }
}

impl fmt::Display for StandardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((label, number)) = self.pre {
            write!(f, "{}{}", label, number)?;
        }
        if let Some(number) = self.post {
            write!(f, ".post{}", number)?;
        }
        if let Some(number) = self.dev {
            write!(f, ".dev{}", number)?;
        }
        if let Some(ref local) = self.local {
            let segments: Vec<String> = local.iter().map(ToString::to_string).collect();
            write!(f, "+{}", segments.join("."))?;
        }
        Ok(())
    }
}

/// A parsed package version: either the standard scheme or a legacy
/// string kept verbatim
///
/// Legacy versions sort below all standard versions and compare with
/// each other lexicographically on the raw string. Display renders the
/// normalized form for standard versions ("0.2beta" becomes "0.2b0")
/// and the raw string for legacy ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageVersion {
    Legacy(String),
    Standard(StandardVersion),
}

impl PackageVersion {
    /// Parse a version string. Never fails: strings outside the standard
    /// scheme are kept as `Legacy`.
    pub fn parse(input: &str) -> Self {
        match parse_standard(input.trim()) {
            Some(version) => PackageVersion::Standard(version),
            None => PackageVersion::Legacy(input.to_string()),
        }
    }

    /// Compare two package versions
    pub fn compare(&self, other: &PackageVersion) -> Ordering {
        match (self, other) {
            (PackageVersion::Legacy(a), PackageVersion::Legacy(b)) => a.cmp(b),
            (PackageVersion::Legacy(_), PackageVersion::Standard(_)) => Ordering::Less,
            (PackageVersion::Standard(_), PackageVersion::Legacy(_)) => Ordering::Greater,
            (PackageVersion::Standard(a), PackageVersion::Standard(b)) => a.cmp(b),
        }
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageVersion::Legacy(s) => write!(f, "{}", s),
            PackageVersion::Standard(v) => write!(f, "{}", v),
        }
    }
}

/// Group number that may be absent (absent means 0, as in "1.0rc")
fn implicit_number(m: Option<regex::Match<'_>>) -> Option<u64> {
    match m {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0),
    }
}

fn parse_standard(s: &str) -> Option<StandardVersion> {
    let caps = VERSION_RE.captures(s)?;

    let epoch = match caps.name("epoch") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    // A release segment too large for u64 degrades the whole string to Legacy
    let release: Vec<u64> = caps["release"]
        .split('.')
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;

    let pre = match caps.name("pre_l") {
        Some(label) => Some((
            PreLabel::from_spelling(label.as_str()),
            implicit_number(caps.name("pre_n"))?,
        )),
        None => None,
    };

    let post = if let Some(bare) = caps.name("post_n1") {
        Some(bare.as_str().parse().ok()?)
    } else if caps.name("post_l").is_some() {
        Some(implicit_number(caps.name("post_n2"))?)
    } else {
        None
    };

    let dev = match caps.name("dev_l") {
        Some(_) => Some(implicit_number(caps.name("dev_n"))?),
        None => None,
    };

    let local = caps.name("local").map(|m| {
        m.as_str()
            .split(['-', '_', '.'])
            .map(|segment| match segment.parse::<u64>() {
                Ok(number) => LocalSegment::Number(number),
                Err(_) => LocalSegment::Text(segment.to_ascii_lowercase()),
            })
            .collect()
    });

    Some(StandardVersion {
        epoch,
        release,
        pre,
        post,
        dev,
        local,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> PackageVersion {
        PackageVersion::parse(s)
    }

    fn is_standard(v: &PackageVersion) -> bool {
        matches!(v, PackageVersion::Standard(_))
    }

    #[test]
    fn test_parse_simple_release() {
        let v = parse("1.0.0");
        assert!(is_standard(&v));
        assert_eq!(v.to_string(), "1.0.0");
    }

    #[test]
    fn test_parse_long_release() {
        let v = parse("2016.12.10.1.48");
        assert!(is_standard(&v));
        assert_eq!(v.to_string(), "2016.12.10.1.48");
    }

    #[test]
    fn test_parse_v_prefix_and_whitespace() {
        assert_eq!(parse(" v1.0 ").to_string(), "1.0");
    }

    #[test]
    fn test_parse_pre_release_spellings() {
        assert_eq!(parse("1.11.1rc1").to_string(), "1.11.1rc1");
        assert_eq!(parse("0.2beta").to_string(), "0.2b0");
        assert_eq!(parse("1.0alpha2").to_string(), "1.0a2");
        assert_eq!(parse("1.0-preview-3").to_string(), "1.0rc3");
        assert_eq!(parse("1.0C1").to_string(), "1.0rc1");
    }

    #[test]
    fn test_parse_post_release_spellings() {
        assert_eq!(parse("1.0post1").to_string(), "1.0.post1");
        assert_eq!(parse("1.0.post1").to_string(), "1.0.post1");
        assert_eq!(parse("1.0rev1").to_string(), "1.0.post1");
        assert_eq!(parse("1.0-1").to_string(), "1.0.post1");
    }

    #[test]
    fn test_parse_dev_release() {
        assert_eq!(parse("1.0.3.dev-20110405").to_string(), "1.0.3.dev20110405");
        assert_eq!(parse("1.0.dev").to_string(), "1.0.dev0");
    }

    #[test]
    fn test_parse_local_segment() {
        assert_eq!(
            parse("1.3.7+build.11.e0f985a").to_string(),
            "1.3.7+build.11.e0f985a"
        );
        assert_eq!(parse("1.0+ubuntu_1").to_string(), "1.0+ubuntu.1");
    }

    #[test]
    fn test_parse_epoch() {
        assert_eq!(parse("1!2.0").to_string(), "1!2.0");
        assert!(parse("1!1.0") > parse("2.0"));
    }

    #[test]
    fn test_unparseable_becomes_legacy() {
        assert!(matches!(parse("french toast"), PackageVersion::Legacy(_)));
        assert!(matches!(parse(""), PackageVersion::Legacy(_)));
        assert!(matches!(
            parse("0.1.0.linux-x86_64"),
            PackageVersion::Legacy(_)
        ));
        assert!(matches!(
            parse("0.2.1_r291-py2.5"),
            PackageVersion::Legacy(_)
        ));
    }

    #[test]
    fn test_legacy_displays_raw_string() {
        assert_eq!(parse("0.1.3-py2.7").to_string(), "0.1.3-py2.7");
    }

    #[test]
    fn test_release_ordering() {
        assert!(parse("1.0.0") < parse("1.0.1"));
        assert!(parse("0.2.0") < parse("0.2.1"));
        assert!(parse("1.2.0") < parse("10.0.0"));
        assert!(parse("2.0.0") < parse("2016.12.10"));
    }

    #[test]
    fn test_pre_post_dev_ordering() {
        assert!(parse("1.0.dev1") < parse("1.0a1"));
        assert!(parse("1.0a1") < parse("1.0b1"));
        assert!(parse("1.0b1") < parse("1.0rc1"));
        assert!(parse("1.0rc1") < parse("1.0"));
        assert!(parse("1.0") < parse("1.0.post1"));
        assert!(parse("1.11.1rc1") < parse("1.11.1"));
    }

    #[test]
    fn test_dev_of_pre_release_sorts_below_it() {
        assert!(parse("1.0a1.dev1") < parse("1.0a1"));
    }

    #[test]
    fn test_local_ordering() {
        assert!(parse("1.0") < parse("1.0+abc"));
        assert!(parse("1.0+abc") < parse("1.0+5"));
        assert!(parse("1.0+a.2") < parse("1.0+a.10"));
    }

    #[test]
    fn test_legacy_sorts_below_standard() {
        assert!(parse("0.1.0.linux-x86_64") < parse("0.0.1"));
    }

    #[test]
    fn test_legacy_pair_compares_lexicographically() {
        assert!(parse("apple pie") < parse("banana"));
    }

    #[test]
    fn test_trailing_zeros_do_not_matter() {
        assert_eq!(parse("1.0"), parse("1.0.0"));
        assert!(parse("1.0") >= parse("1.0.0"));
        assert!(parse("1.0") <= parse("1.0.0"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse("1.0RC1"), parse("1.0rc1"));
        assert_eq!(parse("1.0.DEV2").to_string(), "1.0.dev2");
    }
}
