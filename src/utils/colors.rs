/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Colour used for a payment status in CLI listings.
pub fn color_for_payment(status: crate::models::PaymentStatus) -> &'static str {
    use crate::models::PaymentStatus;
    match status {
        PaymentStatus::Paid => GREEN,
        PaymentStatus::NotPaid => RED,
        PaymentStatus::Processing => YELLOW,
    }
}

/// Colour for an internal-log operation name.
pub fn color_for_operation(op: &str) -> &'static str {
    match op {
        "add" => GREEN,
        "del" => RED,
        "edit" => YELLOW,
        "init" => BLUE,
        "migration_applied" => MAGENTA,
        _ => RESET,
    }
}
