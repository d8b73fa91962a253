//! Pass 1: interface renaming.
//!
//! Reads the base label from the first `name` directive and the slot/port
//! code from the first `description ODP-<site>-<slot>/<port>` directive,
//! then rewrites the `name` directive to the canonical name.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::naming::build_canonical_name;
use crate::scanner::Block;
use crate::types::{NameIndex, OutcomeRecord};

static NAME_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\s*)name\s+(\S+)")
        .unwrap_or_else(|err| panic!("invalid NAME_DIRECTIVE regex: {err}"))
});

static ODP_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^(\s*)description\s+ODP-[^\s-]*-(\d+/\d+)")
        .unwrap_or_else(|err| panic!("invalid ODP_DESCRIPTION regex: {err}"))
});

/// Fields an interface block must carry to be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceIdentity<'a> {
    /// Value of the first `name` directive.
    pub base: &'a str,
    /// `slot/port` code from the first ODP description.
    pub code: &'a str,
}

/// Extract the identity of an interface block body.
///
/// `None` when either directive is missing or malformed.
#[must_use]
pub fn extract_identity(body: &str) -> Option<InterfaceIdentity<'_>> {
    let base = NAME_DIRECTIVE.captures(body)?.get(2)?.as_str();
    let code = ODP_DESCRIPTION.captures(body)?.get(2)?.as_str();
    Some(InterfaceIdentity { base, code })
}

/// Renames interface blocks and records the chosen names.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceRewriter {
    max_name_len: usize,
}

impl InterfaceRewriter {
    /// Rewriter producing names bounded by `max_name_len`.
    #[must_use]
    pub const fn new(max_name_len: usize) -> Self {
        Self { max_name_len }
    }

    /// Rewrite one interface block.
    ///
    /// Always appends exactly one record to `outcomes`. On success the
    /// canonical name is stored in `names` under the block identifier and the
    /// first `name` directive is replaced, keeping its indentation. Otherwise
    /// the block is returned unchanged.
    pub fn rewrite(
        &self,
        block: &Block<'_>,
        names: &mut NameIndex,
        outcomes: &mut Vec<OutcomeRecord>,
        file: &str,
    ) -> String {
        let Some(identity) = extract_identity(block.body) else {
            tracing::debug!(file, interface = block.identifier, "missing name or ODP code; skipped");
            outcomes.push(OutcomeRecord::skip(file, block.identifier));
            return format!("{}{}", block.header, block.body);
        };

        let canonical = build_canonical_name(identity.base, identity.code, self.max_name_len);
        tracing::debug!(
            file,
            interface = block.identifier,
            old_name = identity.base,
            new_name = %canonical,
            "interface renamed"
        );

        let body = NAME_DIRECTIVE.replacen(block.body, 1, |caps: &Captures<'_>| {
            format!("{}name {canonical}", &caps[1])
        });

        outcomes.push(OutcomeRecord::ok(
            file,
            block.identifier,
            identity.base,
            &canonical,
        ));
        names.insert(block.identifier, canonical);

        format!("{}{body}", block.header)
    }
}
