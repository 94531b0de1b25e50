//! Small helpers shared by the index builder and the query listing.

pub mod date;
pub mod slug;
pub mod text;
