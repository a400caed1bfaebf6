//! sea-orm entities for the Reppay API database.

pub mod escrow_entries;
pub mod otps;
pub mod users;
