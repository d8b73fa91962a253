#![allow(clippy::doc_markdown)]

//! onu-rewrite - Provisioning script rewriter for ONU/OLT access nodes
//!
//! A pattern-driven text transformer: it has no grammar for the
//! configuration language, only for the handful of directives it rewrites.
//!
//! # Features
//!
//! - **Canonical names**: `interface` blocks get `JMP-...-<slot/port>` names
//!   bounded to a maximum length
//! - **Credential sync**: `pon-onu-mng` PPPoE user/password follow the name
//! - **TR-069 injection**: management service and ACS stanza added once
//! - **Batch runs**: parallel per-file processing with backups, CSV outcome
//!   log and dry-run diffs
//!
//! # Architecture
//!
//! ```text
//! onu-rewrite/src/
//! ├── lib.rs          # Re-exports (this file)
//! ├── error.rs        # RewriteError enum (thiserror)
//! ├── types.rs        # OutcomeRecord, NameIndex, RewriteConfig
//! ├── naming.rs       # Canonical name construction
//! ├── scanner.rs      # Header/body block segmentation
//! ├── interface.rs    # Pass 1: interface renaming
//! ├── pon_mng.rs      # Pass 2: credentials + TR-069 injection
//! ├── pipeline.rs     # Two-pass document pipeline
//! ├── diff.rs         # Dry-run unified diffs
//! ├── batch.rs        # Parallel directory runs (rayon)
//! ├── outcome_log.rs  # CSV outcome log
//! ├── settings.rs     # YAML settings + CLI overlay
//! └── bin/onu_rewrite.rs
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use onu_rewrite::{BatchConfig, RewriteConfig, RewritePipeline, rewrite_batch, write_outcome_log};
//!
//! // Single document
//! let result = RewritePipeline::new(RewriteConfig::default()).rewrite(&text, "olt-01.txt");
//!
//! // Whole directory
//! let report = rewrite_batch(&BatchConfig::default())?;
//! write_outcome_log(Path::new("data_log.csv"), &report.outcomes)?;
//! ```

mod batch;
mod diff;
mod error;
mod interface;
mod naming;
mod outcome_log;
mod pipeline;
mod pon_mng;
mod scanner;
mod settings;
mod types;

pub use batch::{BatchConfig, BatchReport, rewrite_batch};
pub use error::RewriteError;
pub use interface::{InterfaceIdentity, InterfaceRewriter, extract_identity};
pub use naming::{DEFAULT_MAX_NAME_LEN, NAME_PREFIX, build_canonical_name};
pub use outcome_log::{LOG_HEADER, write_outcome_log};
pub use pipeline::RewritePipeline;
pub use pon_mng::{
    HOTSPOT_MARKER, PonMngRewriter, TR069_MGMT_MARKER, TR069_SERVICE_MARKER, WIFI_PORT_MARKER,
    substitute_credentials,
};
pub use scanner::{
    Block, BlockScanner, INTERFACE_BLOCKS, INTERFACE_KEYWORD, PON_ONU_MNG_BLOCKS,
    PON_ONU_MNG_KEYWORD,
};
pub use settings::{
    DEFAULT_LOG_PATH, DEFAULT_SETTINGS_FILE, RewriteSettings, Tr069Settings, load_settings,
};
pub use types::{
    DocumentRewrite, NameIndex, OutcomeRecord, OutcomeStatus, RewriteConfig, Tr069Profile,
};

pub use diff::generate_unified_diff;
