//! Back-office surface: every `/api/admin/*` route sits behind
//! [`require_admin`](crate::auth::require_admin).

pub mod router;

pub use router::{admin_router, AdminOverview};
