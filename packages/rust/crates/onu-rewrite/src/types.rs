//! Core types for the rewrite pipeline.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::DEFAULT_MAX_NAME_LEN;

/// Result of one interface block in pass 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    /// Name and code found; the `name` directive was rewritten.
    #[serde(rename = "OK")]
    Ok,
    /// `name` or `description ODP-...` missing; block left untouched.
    #[serde(rename = "SKIP")]
    Skip,
}

impl OutcomeStatus {
    /// Log representation (`OK` / `SKIP`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the outcome log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    /// Source file name.
    #[serde(rename = "filename")]
    pub file: String,
    /// Interface identifier from the block header.
    pub interface: String,
    /// Base label from the `name` directive, empty on skip.
    pub old_name: String,
    /// Canonical name written back, empty on skip.
    pub new_name: String,
    /// Outcome.
    pub status: OutcomeStatus,
}

impl OutcomeRecord {
    /// Record for a block that was renamed.
    #[must_use]
    pub fn ok(file: &str, interface: &str, old_name: &str, new_name: &str) -> Self {
        Self {
            file: file.to_string(),
            interface: interface.to_string(),
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            status: OutcomeStatus::Ok,
        }
    }

    /// Record for a block that could not be processed.
    #[must_use]
    pub fn skip(file: &str, interface: &str) -> Self {
        Self {
            file: file.to_string(),
            interface: interface.to_string(),
            old_name: String::new(),
            new_name: String::new(),
            status: OutcomeStatus::Skip,
        }
    }
}

/// Interface identifier → canonical name, scoped to one document.
///
/// Filled during pass 1, read during pass 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameIndex {
    names: HashMap<String, String>,
}

impl NameIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the canonical name of an interface; a later block wins.
    pub fn insert(&mut self, interface: &str, name: String) {
        self.names.insert(interface.to_string(), name);
    }

    /// Canonical name for an interface, if one was assigned.
    #[must_use]
    pub fn get(&self, interface: &str) -> Option<&str> {
        self.names.get(interface).map(String::as_str)
    }

    /// Number of named interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no interface was named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parameters of the injected TR-069 management stanza.
///
/// Defaults reproduce the deployed stanza byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tr069Profile {
    /// ACS endpoint written into the `tr069-mgmt ... acs` line.
    pub acs_url: String,
    /// Management VLAN for the service and tag lines.
    pub vlan: u16,
}

impl Default for Tr069Profile {
    fn default() -> Self {
        Self {
            acs_url: "http://172.17.11.6:7547".to_string(),
            vlan: 100,
        }
    }
}

/// Configuration for document rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Upper bound for canonical names (best effort).
    pub max_name_len: usize,
    /// Injected management stanza parameters.
    pub tr069: Tr069Profile,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            tr069: Tr069Profile::default(),
        }
    }
}

/// Result of rewriting one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRewrite {
    /// Final text after both passes.
    pub text: String,
    /// One record per interface block, in document order.
    pub outcomes: Vec<OutcomeRecord>,
    /// Names assigned during pass 1.
    pub names: NameIndex,
    /// Whether `text` differs from the input.
    pub changed: bool,
}
