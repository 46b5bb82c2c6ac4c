use super::clamps::clamp_rows;
use super::{escape, layout};
use crate::models::ClampRecord;
use crate::utils::date::long_date;

/// Currency and fee shown on invoice pages.
#[derive(Debug, Clone)]
pub struct InvoiceTerms {
    pub currency: String,
    pub clamp_fee: f64,
}

impl InvoiceTerms {
    pub fn amount(&self, value: f64) -> String {
        format!("{} {:.2}", self.currency, value)
    }
}

pub fn invoicing_page(paid: &[ClampRecord], terms: &InvoiceTerms, notice: Option<&str>) -> String {
    let mut body = String::new();

    if paid.is_empty() {
        body.push_str("<p>No paid clamps to invoice.</p>\n");
    } else {
        body.push_str(&clamp_rows(paid, false));
        body.push_str("<ul>\n");
        for c in paid {
            body.push_str(&format!(
                "<li><a href=\"/presentation/invoice/{id}\">Invoice #{id}</a></li>\n",
                id = c.id
            ));
        }
        body.push_str("</ul>\n");
        body.push_str(&format!(
            "<p><strong>Total collected:</strong> {}</p>\n",
            terms.amount(terms.clamp_fee * paid.len() as f64)
        ));
    }

    layout("Invoicing", notice, &body)
}

pub fn invoice_page(c: &ClampRecord, terms: &InvoiceTerms) -> String {
    let reference = if c.clamp_reference.is_empty() {
        format!("CL-{:05}", c.id)
    } else {
        c.clamp_reference.clone()
    };

    let vehicle = [c.color.as_str(), c.car_type.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let body = format!(
        "<dl>\n\
         <dt>Reference</dt><dd>{reference}</dd>\n\
         <dt>Date</dt><dd>{date}</dd>\n\
         <dt>Location</dt><dd>{location}</dd>\n\
         <dt>Registration</dt><dd>{registration}</dd>\n\
         <dt>Vehicle</dt><dd>{vehicle}</dd>\n\
         <dt>Clamped</dt><dd>{time_in}</dd>\n\
         <dt>Released</dt><dd>{released}</dd>\n\
         <dt>Offense</dt><dd>{offense}</dd>\n\
         <dt>Status</dt><dd>{status}</dd>\n\
         <dt>Amount</dt><dd>{amount}</dd>\n\
         </dl>\n",
        reference = escape(&reference),
        date = long_date(&c.clamp_date),
        location = escape(&c.location),
        registration = escape(&c.registration),
        vehicle = escape(&vehicle),
        time_in = c.time_in_str(),
        released = if c.is_released() {
            c.time_released_str()
        } else {
            "not yet released".to_string()
        },
        offense = escape(&c.offense),
        status = c.payment_status,
        amount = terms.amount(terms.clamp_fee),
    );

    layout(&format!("Invoice #{}", c.id), None, &body)
}
