// Item reporting: lost/found intake, per-user listings, owner-only deletion
// and the per-user stats summary.

pub mod handlers;
