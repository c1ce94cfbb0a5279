pub mod auth;
pub mod booking_service;
pub mod ledger;
pub mod notification_service;

pub use booking_service::BookingService;
pub use ledger::BookingLedger;
pub use notification_service::NotificationService;
