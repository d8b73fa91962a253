#![allow(clippy::doc_markdown)]

//! onu-io - File I/O for provisioning script batches
//!
//! Reads ONU/OLT configuration text leniently, preserves originals as
//! `.bak` siblings and writes rewritten output.
//!
//! # Features
//!
//! - **Lenient decoding**: undecodable bytes are dropped, never fatal
//! - **Safety**: size limits and verbatim backups before any rewrite
//! - **Discovery**: glob-filtered, non-recursive input listing
//!
//! # Architecture
//!
//! ```text
//! onu-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── decode.rs   # Lossy UTF-8 decoding
//! ├── sync.rs     # Read / write / backup
//! └── discover.rs # Input file discovery
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use onu_io::{read_text_lossy, write_backup};
//!
//! let backup = write_backup("configs/olt-01.txt")?;
//! let content = read_text_lossy("configs/olt-01.txt", 8 * 1024 * 1024)?;
//! ```

mod decode;
mod discover;
mod error;
mod sync;

pub use decode::decode_lossy;
pub use discover::{DiscoverOptions, discover_inputs};
pub use error::IoError;
pub use sync::{BACKUP_SUFFIX, backup_path_for, read_text_lossy, write_backup, write_text};
