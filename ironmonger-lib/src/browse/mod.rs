//! Browse layer composing the table core with the API client
//!
//! Two patterns, matching how listings behave in the storefront:
//!
//! - [`LocalBrowser`] fetches a collection once and does all searching,
//!   sorting, and paging in memory.
//! - [`RemoteBrowser`] keeps the server authoritative: every filter or
//!   cursor change refetches, with latest-wins sequencing so overlapping
//!   responses cannot clobber newer state.

mod local;
mod remote;

pub use local::*;
pub use remote::*;
