//! Blacklist filtering and visibility of directory listings.
//!
//! Patterns are either literal names or contain `*`, which matches any run of
//! characters (including none). Every other character, `.` included, matches
//! only itself. Matching is case-sensitive and anchored to the whole name.

use crate::models::DirectoryListing;

// =============================================================================
// Patterns
// =============================================================================

/// A single blacklist entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlacklistPattern {
    /// Exact file name
    Literal(String),
    /// Literal pieces separated by `*` wildcards
    Wildcard(Vec<String>),
}

impl BlacklistPattern {
    pub fn parse(pattern: &str) -> Self {
        if pattern.contains('*') {
            Self::Wildcard(pattern.split('*').map(str::to_string).collect())
        } else {
            Self::Literal(pattern.to_string())
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Literal(literal) => name == literal,
            Self::Wildcard(pieces) => wildcard_match(pieces, name),
        }
    }
}

/// Anchored match of `piece*piece*...*piece` against `name`.
///
/// The first piece must be a prefix, the last a suffix, and the middle
/// pieces must appear in order without overlapping.
fn wildcard_match(pieces: &[String], name: &str) -> bool {
    let (Some(first), Some(last)) = (pieces.first(), pieces.last()) else {
        return name.is_empty();
    };
    if pieces.len() == 1 {
        return name == first;
    }
    let Some(rest) = name.strip_prefix(first.as_str()) else {
        return false;
    };
    if rest.len() < last.len() || !rest.ends_with(last.as_str()) {
        return false;
    }
    let mut middle = &rest[..rest.len() - last.len()];
    for piece in &pieces[1..pieces.len() - 1] {
        match middle.find(piece.as_str()) {
            Some(idx) => middle = &middle[idx + piece.len()..],
            None => return false,
        }
    }
    true
}

// =============================================================================
// Listing Filter
// =============================================================================

/// What the file panel should render for a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingView {
    /// Directory the listing belongs to
    pub directory: String,
    /// Non-blacklisted files, always shown
    pub visible_files: Vec<String>,
    /// Whether the management section is expanded
    pub show_all: bool,
    /// Parent entry (`..`), only when expanded and not at root
    pub show_parent: bool,
    /// Subdirectories, only when expanded
    pub dirs: Vec<String>,
    /// Blacklisted files, only when expanded
    pub hidden_files: Vec<String>,
}

/// Blacklist plus the "show all files" toggle.
#[derive(Clone, Debug)]
pub struct ListingFilter {
    patterns: Vec<BlacklistPattern>,
    show_all: bool,
}

impl ListingFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| BlacklistPattern::parse(p.as_ref()))
                .collect(),
            show_all: false,
        }
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Flip the "show all files" flag and return its new value.
    pub fn toggle(&mut self) -> bool {
        self.show_all = !self.show_all;
        self.show_all
    }

    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Split file names into `(visible, hidden)`, preserving order.
    pub fn partition(&self, listing: &DirectoryListing) -> (Vec<String>, Vec<String>) {
        listing
            .files
            .iter()
            .cloned()
            .partition(|name| !self.is_blacklisted(name))
    }

    /// Apply the rendering policy to a listing of `directory`.
    pub fn render(&self, listing: &DirectoryListing, directory: &str) -> ListingView {
        let (visible_files, hidden_files) = self.partition(listing);
        if !self.show_all {
            return ListingView {
                directory: directory.to_string(),
                visible_files,
                ..Default::default()
            };
        }
        ListingView {
            directory: directory.to_string(),
            visible_files,
            show_all: true,
            show_parent: directory != crate::config::ROOT_DIR,
            dirs: listing.dirs.clone(),
            hidden_files,
        }
    }
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BLACKLIST)
    }
}
