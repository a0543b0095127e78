//! `go get` vanity import pages.
//!
//! `go get go101.org/golds` fetches `https://go101.org/golds?go-get=1` and
//! reads the `go-import` meta tag to find the repository. Browsers following
//! the same URL are sent on to the package documentation.

use std::collections::BTreeMap;

use serde::Deserialize;

const GITHUB: &str = "https://github.com/";
const PKG_GO_DEV: &str = "https://pkg.go.dev/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoGetInfo {
    /// Import path of the module root, e.g. `go101.org/golds`.
    pub root_package: String,
    /// GitHub `owner/repo`.
    pub source_repo: String,
    /// Documentation site the import path is appended to. Without one the
    /// repository itself is the documentation.
    #[serde(default)]
    pub doc_website: Option<String>,
}

impl GoGetInfo {
    fn new(root_package: &str, source_repo: &str, doc_website: Option<&str>) -> Self {
        Self {
            root_package: root_package.to_owned(),
            source_repo: source_repo.to_owned(),
            doc_website: doc_website.map(str::to_owned),
        }
    }

    /// Resolve the URLs for `sub` (may be empty) at `version` (may be empty).
    #[must_use]
    pub fn page(&self, sub: &str, version: &str) -> GoGetPage {
        let repo_url = format!("{GITHUB}{}", self.source_repo);
        let doc_url = match self.doc_website.as_deref().filter(|site| !site.is_empty()) {
            Some(site) if sub.is_empty() => format!("{site}{}{version}", self.root_package),
            Some(site) => format!("{site}{}/{sub}{version}", self.root_package),
            None if sub.is_empty() => repo_url.clone(),
            None => format!("{repo_url}/tree/master/{sub}"),
        };
        GoGetPage { import_prefix: self.root_package.clone(), repo_url, doc_url }
    }
}

/// What the go-get page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoGetPage {
    pub import_prefix: String,
    pub repo_url: String,
    pub doc_url: String,
}

/// Vanity packages keyed by the first URL path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PackageTable(BTreeMap<String, GoGetInfo>);

impl PackageTable {
    /// The packages published under the book's domain.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            ("tinyrouter", GoGetInfo::new("go101.org/tinyrouter", "go101/tinyrouter", Some(PKG_GO_DEV))),
            ("skia", GoGetInfo::new("go101.org/skia", "go101/go-skia", Some(PKG_GO_DEV))),
            ("go101", GoGetInfo::new("go101.org/go101", "go101/go101", None)),
            ("golang101", GoGetInfo::new("go101.org/golang101", "golang101/golang101", None)),
            ("gold", GoGetInfo::new("go101.org/gold", "go101/gold", Some(PKG_GO_DEV))),
            ("golds", GoGetInfo::new("go101.org/golds", "go101/golds", Some(PKG_GO_DEV))),
            ("ebooktool", GoGetInfo::new("go101.org/ebooktool", "go101/ebooktool", Some(PKG_GO_DEV))),
            ("nstd", GoGetInfo::new("go101.org/nstd", "go101/nstd", Some(PKG_GO_DEV))),
            ("gotv", GoGetInfo::new("go101.org/gotv", "go101/gotv", Some(PKG_GO_DEV))),
            ("tmd.go", GoGetInfo::new("go101.org/tmd.go", "go101/tmd.go", Some(PKG_GO_DEV))),
            ("tmd", GoGetInfo::new("go101.org/tmd", "go101/tmd", Some(PKG_GO_DEV))),
            ("godev", GoGetInfo::new("go101.org/godev", "go101/godev", Some(PKG_GO_DEV))),
        ];
        Self(entries.into_iter().map(|(name, info)| (name.to_owned(), info)).collect())
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GoGetInfo> {
        self.0.get(name)
    }
}

/// A go-get request split into package, sub package and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoGetRequest {
    pub root: String,
    pub sub: String,
    /// `@vN...` or empty.
    pub version: String,
}

impl GoGetRequest {
    /// Cache key distinguishing sub packages and versions.
    #[must_use]
    pub fn cache_key(&self) -> String {
        if self.sub.is_empty() {
            format!("{}{}", self.root, self.version)
        } else {
            format!("{}/{}{}", self.root, self.sub, self.version)
        }
    }
}

/// Split `@version` off the request path.
///
/// The version comes from the sub path when there is one, otherwise from the
/// root segment. Anything not shaped like `@v<digit>...` is dropped.
#[must_use]
pub fn split_version(root: &str, sub: &str) -> GoGetRequest {
    let (root, sub, version) = if sub.is_empty() {
        match root.find('@') {
            Some(at) if at > 0 => (&root[..at], sub, &root[at..]),
            _ => (root, sub, ""),
        }
    } else {
        match sub.find('@') {
            Some(at) => (root, &sub[..at], &sub[at..]),
            None => (root, sub, ""),
        }
    };

    let version = if is_module_version(version) { version } else { "" };
    GoGetRequest { root: root.to_owned(), sub: sub.to_owned(), version: version.to_owned() }
}

fn is_module_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() >= 3 && bytes[1] == b'v' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
#[path = "goget_test.rs"]
mod tests;
