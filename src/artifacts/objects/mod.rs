//! Stored object types
//!
//! Everything kept in the content store is an object identified by the SHA-1
//! digest of its canonical payload:
//!
//! - **Blob**: file content (raw bytes)
//! - **Commit**: snapshot record (message, timestamp, parent, file manifest)
//!
//! On disk each object is framed as `<type> <size>\0<payload>` and zlib
//! compressed; the frame is not part of the digest.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated digest
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
