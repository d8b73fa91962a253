//! Pass 2: ONU management credentials and TR-069 injection.
//!
//! For every `pon-onu-mng <id>` block whose interface was renamed in pass 1,
//! PPPoE `user`/`password` values become the canonical name, a TR-069
//! service line follows the HOTSPOT service, and the management stanza
//! follows the last WiFi VLAN port line.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::scanner::Block;
use crate::types::{NameIndex, Tr069Profile};

/// Line that triggers the TR-069 service line.
pub const HOTSPOT_MARKER: &str = "service HOTSPOT";
/// Presence of this text means the service line already exists.
pub const TR069_SERVICE_MARKER: &str = "service TR069";
/// Line after which the management stanza goes.
pub const WIFI_PORT_MARKER: &str = "vlan port wifi";
/// Presence of this text means the management stanza already exists.
pub const TR069_MGMT_MARKER: &str = "tr069-mgmt";

static PPPOE_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buser\s+\S+").unwrap_or_else(|err| panic!("invalid PPPOE_USER regex: {err}"))
});

static PPPOE_PASSWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bpassword\s+\S+")
        .unwrap_or_else(|err| panic!("invalid PPPOE_PASSWORD regex: {err}"))
});

impl Tr069Profile {
    /// `service TR069` gemport/VLAN declaration.
    #[must_use]
    pub fn service_line(&self) -> String {
        format!("  service TR069 gemport 1 vlan {}\n", self.vlan)
    }

    /// Unlock, ACS credentials and priority tag, in document order.
    #[must_use]
    pub fn mgmt_stanza(&self, user: &str, password: &str) -> [String; 3] {
        [
            "  tr069-mgmt 1 state unlock\n".to_string(),
            format!(
                "  tr069-mgmt 1 acs {} validate basic username {user} password {password}\n",
                self.acs_url
            ),
            format!("  tr069-mgmt 1 tag pri 0 vlan {}\n", self.vlan),
        ]
    }
}

/// Replace the first `user <x>` and `password <x>` on one line.
#[must_use]
pub fn substitute_credentials(line: &str, name: &str) -> String {
    let line = PPPOE_USER.replace(line, NoExpand(&format!("user {name}")));
    PPPOE_PASSWORD
        .replace(&line, NoExpand(&format!("password {name}")))
        .into_owned()
}

/// Rewrites `pon-onu-mng` blocks against the pass-1 name index.
#[derive(Debug, Clone, Copy)]
pub struct PonMngRewriter<'p> {
    profile: &'p Tr069Profile,
}

impl<'p> PonMngRewriter<'p> {
    /// Rewriter injecting stanzas built from `profile`.
    #[must_use]
    pub const fn new(profile: &'p Tr069Profile) -> Self {
        Self { profile }
    }

    /// Rewrite one block; unnamed interfaces come back unchanged.
    ///
    /// The HOTSPOT trigger is skipped when a `service TR069` line exists
    /// anywhere in the block, before or after the trigger. The WiFi trigger
    /// is skipped when any `tr069-mgmt` line exists in the rewritten block.
    /// The two triggers are independent and may both fire.
    #[must_use]
    pub fn rewrite(&self, block: &Block<'_>, names: &NameIndex) -> String {
        let Some(name) = names.get(block.identifier) else {
            tracing::debug!(interface = block.identifier, "no canonical name; block untouched");
            return format!("{}{}", block.header, block.body);
        };

        let source: Vec<&str> = block.body.split_inclusive('\n').collect();
        let service_present = source.iter().any(|l| l.contains(TR069_SERVICE_MARKER));

        let mut lines: Vec<String> = Vec::with_capacity(source.len() + 4);
        let mut last_wifi = None;

        for raw in source {
            let line = substitute_credentials(raw, name);
            let hotspot = line.contains(HOTSPOT_MARKER);
            let wifi = line.contains(WIFI_PORT_MARKER);
            lines.push(line);

            if wifi {
                last_wifi = Some(lines.len() - 1);
            }

            if hotspot
                && !service_present
                && !lines.iter().any(|l| l.contains(TR069_SERVICE_MARKER))
            {
                terminate_last(&mut lines);
                lines.push(self.profile.service_line());
                tracing::debug!(interface = block.identifier, "TR069 service line injected");
            }
        }

        if let Some(idx) = last_wifi
            && !lines.iter().any(|l| l.contains(TR069_MGMT_MARKER))
        {
            if !lines[idx].ends_with('\n') {
                lines[idx].push('\n');
            }
            for (offset, line) in self.profile.mgmt_stanza(name, name).into_iter().enumerate() {
                lines.insert(idx + 1 + offset, line);
            }
            tracing::debug!(interface = block.identifier, "TR069 management stanza injected");
        }

        format!("{}{}", block.header, lines.concat())
    }
}

fn terminate_last(lines: &mut [String]) {
    if let Some(last) = lines.last_mut()
        && !last.ends_with('\n')
    {
        last.push('\n');
    }
}
