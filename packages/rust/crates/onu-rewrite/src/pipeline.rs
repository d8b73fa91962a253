//! Two-pass document pipeline.
//!
//! Pass 1 renames `interface` blocks and builds the [`NameIndex`]; pass 2
//! rewrites `pon-onu-mng` blocks of the pass-1 output against that index.
//! All state lives in the returned [`DocumentRewrite`]; nothing is shared
//! between documents.

use crate::interface::InterfaceRewriter;
use crate::pon_mng::PonMngRewriter;
use crate::scanner::{INTERFACE_BLOCKS, PON_ONU_MNG_BLOCKS};
use crate::types::{DocumentRewrite, NameIndex, OutcomeRecord, RewriteConfig};

/// Text-in/text-out rewriter for one configuration document.
///
/// # Example
///
/// ```rust,ignore
/// use onu_rewrite::{RewriteConfig, RewritePipeline};
///
/// let pipeline = RewritePipeline::new(RewriteConfig::default());
/// let result = pipeline.rewrite(&text, "olt-01.txt");
/// println!("{} interfaces, changed: {}", result.outcomes.len(), result.changed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RewritePipeline {
    config: RewriteConfig,
}

impl RewritePipeline {
    /// Pipeline for `config`.
    #[must_use]
    pub const fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrite `text`; `file` labels the outcome records.
    #[must_use]
    pub fn rewrite(&self, text: &str, file: &str) -> DocumentRewrite {
        let mut names = NameIndex::new();
        let mut outcomes: Vec<OutcomeRecord> = Vec::new();

        let interfaces = InterfaceRewriter::new(self.config.max_name_len);
        let renamed = INTERFACE_BLOCKS.rewrite(text, |block| {
            interfaces.rewrite(block, &mut names, &mut outcomes, file)
        });

        let pon_mng = PonMngRewriter::new(&self.config.tr069);
        let rewritten = PON_ONU_MNG_BLOCKS.rewrite(&renamed, |block| pon_mng.rewrite(block, &names));

        let changed = rewritten != text;
        tracing::debug!(
            file,
            interfaces = outcomes.len(),
            named = names.len(),
            changed,
            "document rewritten"
        );

        DocumentRewrite {
            text: rewritten,
            outcomes,
            names,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutcomeStatus;

    #[test]
    fn test_no_blocks_round_trip() {
        let text = "hostname OLT-01\n!\nvlan 100\n name mgmt\n!\nend\n";
        let result = RewritePipeline::default().rewrite(text, "olt.txt");
        assert_eq!(result.text, text);
        assert!(result.outcomes.is_empty());
        assert!(!result.changed);
    }

    #[test]
    fn test_pon_block_uses_pass_one_name() {
        let text = "\
interface gpon-onu_1/1/1:1
  name foo-bar
  description ODP-X-5/6
!
interface gpon-onu_1/1/1:2
  name no-code
!
pon-onu-mng gpon-onu_1/1/1:1
  pppoe 1 user a password b
!
pon-onu-mng gpon-onu_1/1/1:2
  pppoe 1 user c password d
";
        let result = RewritePipeline::default().rewrite(text, "olt.txt");

        assert!(result.text.contains("  name JMP-foo-bar-5/6\n"));
        assert!(result.text.contains("user JMP-foo-bar-5/6 password JMP-foo-bar-5/6"));
        assert!(result.text.contains("  pppoe 1 user c password d\n"));

        let statuses: Vec<_> = result.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(statuses, vec![OutcomeStatus::Ok, OutcomeStatus::Skip]);
        assert!(result.changed);
    }
}
