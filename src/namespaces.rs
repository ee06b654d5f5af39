//! XML namespace handling
//!
//! Qualified names and the in-scope prefix bindings used while reading a
//! document.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// XLink namespace, fixed across all DDMS versions
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Qualified name. Equality and hashing ignore the prefix.
#[derive(Debug, Clone)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<String>,
    /// Prefix used when serializing
    pub prefix: Option<String>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace and prefix
    pub fn new(
        namespace: impl Into<String>,
        prefix: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        let prefix = prefix.into();
        Self {
            namespace: Some(namespace.into()),
            prefix: if prefix.is_empty() { None } else { Some(prefix) },
            local_name: local_name.into(),
        }
    }

    /// Namespace URI, or "" for none
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    /// Prefix, or "" for none
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }

    /// `prefix:local`, or just `local` without a prefix
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// True if this name is `local_name` in `namespace`
    pub fn matches(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace_uri() == namespace && self.local_name == local_name
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local_name == other.local_name
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local_name.hash(state);
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace context for resolving prefixes
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    prefixes: HashMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace. An empty URI undeclares it.
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        self.default_namespace = if namespace.is_empty() { None } else { Some(namespace) };
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Resolve an element name. Unprefixed names take the default namespace.
    pub fn resolve_element(&self, name: &str) -> Result<QName> {
        match name.split_once(':') {
            Some((prefix, local)) => self.resolve_prefixed(prefix, local),
            None => Ok(QName {
                namespace: self.default_namespace.clone(),
                prefix: None,
                local_name: name.to_string(),
            }),
        }
    }

    /// Resolve an attribute name. Unprefixed attributes have no namespace.
    pub fn resolve_attribute(&self, name: &str) -> Result<QName> {
        match name.split_once(':') {
            Some((prefix, local)) => self.resolve_prefixed(prefix, local),
            None => Ok(QName::local(name)),
        }
    }

    fn resolve_prefixed(&self, prefix: &str, local: &str) -> Result<QName> {
        let namespace = self
            .get_namespace(prefix)
            .ok_or_else(|| Error::Xml(format!("Unknown prefix: {}", prefix)))?;
        Ok(QName::new(namespace, prefix, local))
    }
}
