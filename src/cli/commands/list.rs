use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::clamps;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{ClampFilter, PaymentStatus};
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_payment};
use crate::utils::table::Table;

fn resolve_filter(paid: bool, status: &Option<String>) -> AppResult<Option<ClampFilter>> {
    if paid {
        return Ok(Some(ClampFilter::PaymentStatus(PaymentStatus::Paid)));
    }
    match status {
        None => Ok(None),
        Some(s) => PaymentStatus::from_input(s)
            .map(|p| Some(ClampFilter::PaymentStatus(p)))
            .ok_or_else(|| AppError::InvalidPaymentStatus(s.clone())),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { paid, status } = cmd {
        let filter = resolve_filter(*paid, status)?;
        let pool = DbPool::new(&cfg.database)?;
        let records = clamps::list_clamps(&pool.conn, filter)?;

        if records.is_empty() {
            info("No clamp records.");
            return Ok(());
        }

        let mut table = Table::new([
            "ID", "Date", "In", "Out", "Location", "Registration", "Offense", "Payment",
        ]);
        for c in &records {
            table.add_row(vec![
                c.id.to_string(),
                c.date_str(),
                c.time_in_str(),
                if c.is_released() {
                    c.time_released_str()
                } else {
                    "--:--".to_string()
                },
                c.location.clone(),
                c.registration.clone(),
                c.offense.clone(),
                c.payment_status.to_string(),
            ]);
        }

        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        print!("{}", table.render(sep));

        println!();
        for s in PaymentStatus::ALL {
            let n = records.iter().filter(|c| c.payment_status == s).count();
            if n > 0 {
                println!("{}{}{}: {}", color_for_payment(s), s, RESET, n);
            }
        }
    }
    Ok(())
}
