//! Domain records and the typed field sets used to write them.

pub mod appeal;
pub mod appeal_status;
pub mod clamp;
pub mod payment_status;

pub use appeal::{AppealPatch, AppealRecord, AppealWithClamp, NewAppeal};
pub use appeal_status::AppealStatus;
pub use clamp::{ClampFilter, ClampPatch, ClampRecord, ClampSummary, NewClamp};
pub use payment_status::PaymentStatus;
