//! Flat-file record storage.
//!
//! Records are JSON documents, one per record, stored under sharded
//! directories derived from the record's canonical UUID (see
//! [`crate::uuid`]). Listing walks the shard tree and skips unreadable or
//! corrupt documents with a warning rather than failing the whole listing.

pub mod reports;
mod shared;
pub mod users;

pub use reports::ReportService;
pub use users::{NewUser, ProfileUpdate, User, UserService};
