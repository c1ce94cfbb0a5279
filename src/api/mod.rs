pub mod appointments;
pub mod auth;
pub mod bookings;
pub mod middleware;
pub mod notifications;
pub mod router;
pub mod slots;

pub use middleware::*;
pub use router::build_router;
