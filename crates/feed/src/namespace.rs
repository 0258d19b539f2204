// ABOUTME: Registry of the three XML vocabularies a podcast feed speaks: RSS 2.0, iTunes and Podcasting 2.0.
// ABOUTME: Resolves raw element names to (vocabulary, local name) pairs and tracks scoped xmlns declarations.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace URI for RSS 2.0 names. Unprefixed names resolve here unless a
/// document declares another default namespace.
pub const RSS_NAMESPACE: &str = "https://www.rssboard.org/rss-specification";

/// Namespace URI for the Apple Podcasts vocabulary.
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// Namespace URI for the Podcasting 2.0 vocabulary.
pub const PODCAST_NAMESPACE: &str = "https://podcastindex.org/namespace/1.0";

/// Alternative spellings seen in published feeds, mapped onto their vocabulary.
const URI_ALIASES: &[(&str, Namespace)] = &[
    ("http://backend.userland.com/rss2", Namespace::Rss),
    ("https://www.itunes.com/dtds/podcast-1.0.dtd", Namespace::Itunes),
    ("http://www.itunes.com/DTDs/Podcast-1.0.dtd", Namespace::Itunes),
    (
        "https://github.com/Podcastindex-org/podcast-namespace/blob/main/docs/1.0.md",
        Namespace::Podcast,
    ),
];

/// One of the registered vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    Rss,
    Itunes,
    Podcast,
}

impl Namespace {
    /// Every registered vocabulary, in declaration order.
    pub const ALL: [Namespace; 3] = [Namespace::Rss, Namespace::Itunes, Namespace::Podcast];

    /// The canonical URI of this vocabulary.
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Rss => RSS_NAMESPACE,
            Namespace::Itunes => ITUNES_NAMESPACE,
            Namespace::Podcast => PODCAST_NAMESPACE,
        }
    }

    /// The conventional prefix. RSS names are written unprefixed.
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Rss => "",
            Namespace::Itunes => "itunes",
            Namespace::Podcast => "podcast",
        }
    }

    /// Looks a namespace URI up in the registry, including known aliases.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let uri = uri.trim();
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.uri() == uri)
            .or_else(|| {
                URI_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == uri)
                    .map(|(_, ns)| *ns)
            })
    }

    /// Maps a conventional prefix back to its vocabulary.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "itunes" => Some(Namespace::Itunes),
            "podcast" => Some(Namespace::Podcast),
            _ => None,
        }
    }

    /// Writes `local` the way the encoder spells it in this vocabulary.
    pub fn qualify(self, local: &'static str) -> Cow<'static, str> {
        match self {
            Namespace::Rss => Cow::Borrowed(local),
            other => Cow::Owned(format!("{}:{}", other.prefix(), local)),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Namespace::Rss => "rss",
            Namespace::Itunes => "itunes",
            Namespace::Podcast => "podcast",
        };
        write!(f, "{}", s)
    }
}

/// An element name after namespace resolution. `namespace` is `None` when
/// the name belongs to a vocabulary outside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'n> {
    pub namespace: Option<Namespace>,
    pub local: &'n str,
}

impl QualifiedName<'_> {
    /// True when this name is `local` inside `namespace`.
    pub fn is(&self, namespace: Namespace, local: &str) -> bool {
        self.namespace == Some(namespace) && self.local == local
    }
}

/// Resolves a raw element name.
///
/// A prefixed name takes whatever URI `lookup` reports for its prefix; an
/// unprefixed name takes `enclosing_default`. The URI is then matched against
/// the registry.
pub fn resolve<'n, 'u>(
    raw: &'n str,
    enclosing_default: &'u str,
    lookup: impl FnOnce(&str) -> Option<&'u str>,
) -> QualifiedName<'n> {
    let (uri, local) = match raw.split_once(':') {
        Some((prefix, local)) => (lookup(prefix), local),
        None => (Some(enclosing_default), raw),
    };
    QualifiedName {
        namespace: uri.and_then(Namespace::from_uri),
        local,
    }
}

#[derive(Debug, Clone)]
struct Declaration {
    prefix: Option<String>,
    uri: String,
}

/// Scoped `xmlns` declarations for the elements currently open in a document.
///
/// Every element opens a scope, even when it declares nothing, so that
/// `pop_scope` on its end tag always matches.
#[derive(Debug, Clone)]
pub struct NamespaceStack {
    declarations: Vec<Declaration>,
    marks: Vec<usize>,
    fallback: Namespace,
    conventional_prefixes: bool,
}

impl NamespaceStack {
    /// Creates an empty stack. `fallback` is the vocabulary for unprefixed
    /// names when no default namespace is declared.
    pub fn new(fallback: Namespace, conventional_prefixes: bool) -> Self {
        Self {
            declarations: Vec::new(),
            marks: Vec::new(),
            fallback,
            conventional_prefixes,
        }
    }

    pub fn push_scope(&mut self) {
        self.marks.push(self.declarations.len());
    }

    pub fn pop_scope(&mut self) {
        if let Some(mark) = self.marks.pop() {
            self.declarations.truncate(mark);
        }
    }

    /// Records a declaration in the innermost scope. `None` declares the
    /// default namespace.
    pub fn declare(&mut self, prefix: Option<&str>, uri: &str) {
        tracing::trace!(prefix = prefix.unwrap_or(""), uri, "namespace declared");
        self.declarations.push(Declaration {
            prefix: prefix.map(str::to_owned),
            uri: uri.to_owned(),
        });
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.marks.len()
    }

    /// The URI in effect for unprefixed names. `xmlns=""` undeclares the
    /// default, which falls back to the configured vocabulary.
    pub fn default_uri(&self) -> &str {
        self.declarations
            .iter()
            .rev()
            .find(|decl| decl.prefix.is_none())
            .map(|decl| decl.uri.as_str())
            .filter(|uri| !uri.is_empty())
            .unwrap_or_else(|| self.fallback.uri())
    }

    /// The URI bound to `prefix`, if any. Undeclared conventional prefixes
    /// resolve to their vocabulary when that leniency is enabled.
    pub fn prefix_uri(&self, prefix: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|decl| decl.prefix.as_deref() == Some(prefix))
            .map(|decl| decl.uri.as_str())
            .or_else(|| {
                if self.conventional_prefixes {
                    Namespace::from_prefix(prefix).map(Namespace::uri)
                } else {
                    None
                }
            })
    }

    pub fn resolve<'n>(&self, raw: &'n str) -> QualifiedName<'n> {
        resolve(raw, self.default_uri(), |prefix| self.prefix_uri(prefix))
    }
}
