//! Block segmentation.
//!
//! A block is a declaration line (`interface <id>`, `pon-onu-mng <id>`)
//! plus everything up to the next declaration of the same keyword or the end
//! of the document. Declarations are only recognized at the start of a line.
//! Text outside blocks is copied through untouched on reassembly.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Keyword of interface declarations.
pub const INTERFACE_KEYWORD: &str = "interface";

/// Keyword of ONU management declarations.
pub const PON_ONU_MNG_KEYWORD: &str = "pon-onu-mng";

/// Shared scanner for `interface <id>` blocks.
pub static INTERFACE_BLOCKS: LazyLock<BlockScanner> =
    LazyLock::new(|| BlockScanner::new(INTERFACE_KEYWORD));

/// Shared scanner for `pon-onu-mng <id>` blocks.
pub static PON_ONU_MNG_BLOCKS: LazyLock<BlockScanner> =
    LazyLock::new(|| BlockScanner::new(PON_ONU_MNG_KEYWORD));

/// One matched block, borrowed from the scanned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// First whitespace-delimited token after the keyword.
    pub identifier: &'a str,
    /// Declaration text, keyword through identifier.
    pub header: &'a str,
    /// Rest of the header line and all following lines of the block.
    pub body: &'a str,
    /// Byte range of `header` + `body` in the document.
    pub span: Range<usize>,
}

/// Regex-driven splitter for one declaration keyword.
#[derive(Debug, Clone)]
pub struct BlockScanner {
    declaration: Regex,
}

impl BlockScanner {
    /// Scanner for declarations of the form `<keyword> <identifier>`.
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        let pattern = format!(r"(?m)^{}[ \t]+(\S+)", regex::escape(keyword));
        let declaration = Regex::new(&pattern)
            .unwrap_or_else(|err| panic!("escaped declaration regex must compile: {err}"));
        Self { declaration }
    }

    /// Split `text` into ordered, disjoint blocks.
    #[must_use]
    pub fn scan<'a>(&self, text: &'a str) -> Vec<Block<'a>> {
        let heads: Vec<(Range<usize>, &'a str)> = self
            .declaration
            .captures_iter(text)
            .filter_map(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str())))
            .collect();

        heads
            .iter()
            .enumerate()
            .map(|(idx, (head, identifier))| {
                let end = heads.get(idx + 1).map_or(text.len(), |(next, _)| next.start);
                Block {
                    identifier: *identifier,
                    header: &text[head.clone()],
                    body: &text[head.end..end],
                    span: head.start..end,
                }
            })
            .collect()
    }

    /// Rebuild `text`, replacing every block with `rewrite(block)`.
    pub fn rewrite<F>(&self, text: &str, mut rewrite: F) -> String
    where
        F: FnMut(&Block<'_>) -> String,
    {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for block in self.scan(text) {
            out.push_str(&text[last..block.span.start]);
            out.push_str(&rewrite(&block));
            last = block.span.end;
        }
        out.push_str(&text[last..]);
        out
    }
}
