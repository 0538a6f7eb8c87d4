//! Microsoft Graph model types.
//!
//! Every entity keeps properties it does not model in `additional_data`, so
//! payloads survive a read-modify-write cycle unchanged.

mod actions;
mod collection;
mod directory;
mod drive;
mod event;
mod mail;
mod odata_error;
mod site;
mod team;

pub use actions::*;
pub use collection::*;
pub use directory::*;
pub use drive::*;
pub use event::*;
pub use mail::*;
pub use odata_error::*;
pub use site::*;
pub use team::*;
