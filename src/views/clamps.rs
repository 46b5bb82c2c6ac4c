use super::{escape, layout, select};
use crate::models::{ClampRecord, PaymentStatus};
use std::fmt::Write;

fn status_options() -> Vec<&'static str> {
    PaymentStatus::ALL.iter().map(|s| s.to_db_str()).collect()
}

fn input(label: &str, name: &str, kind: &str, value: &str, required: bool) -> String {
    format!(
        r#"<label>{label} <input type="{kind}" name="{name}" value="{value}"{req}></label>"#,
        label = escape(label),
        kind = kind,
        name = name,
        value = escape(value),
        req = if required { " required" } else { "" },
    )
}

/// Inputs shared by the add and edit forms, pre-filled from `c` when editing.
fn form_fields(c: Option<&ClampRecord>) -> String {
    let v = |f: fn(&ClampRecord) -> String| c.map(f).unwrap_or_default();

    [
        input("Location", "location", "text", &v(|c| c.location.clone()), true),
        input("Registration", "registration", "text", &v(|c| c.registration.clone()), false),
        input("Date", "clamp_date", "date", &v(|c| c.date_str()), true),
        input("Time in", "time_in", "time", &v(|c| c.time_in_str()), true),
        input("Time released", "time_released", "time", &v(|c| c.time_released_str()), false),
        input("Offense", "offense", "text", &v(|c| c.offense.clone()), true),
        format!(
            "<label>Payment status {}</label>",
            select(
                "payment_status",
                &status_options(),
                c.map(|c| c.payment_status.to_db_str()).unwrap_or("Processing"),
            )
        ),
        input("Time called", "time_called", "text", &v(|c| c.time_called.clone()), false),
        input("Car type", "car_type", "text", &v(|c| c.car_type.clone()), false),
        input("Colour", "color", "text", &v(|c| c.color.clone()), false),
        input("Clamp reference", "clamp_reference", "text", &v(|c| c.clamp_reference.clone()), false),
        input("Image path", "image_path", "text", &v(|c| c.image_path.clone()), false),
    ]
    .join("\n")
}

pub fn clamp_rows(clamps: &[ClampRecord], actions: bool) -> String {
    let mut html = String::from(
        "<table>\n<tr><th>ID</th><th>Location</th><th>Registration</th><th>Date</th>\
         <th>Time in</th><th>Released</th><th>Offense</th><th>Payment</th>",
    );
    html.push_str(if actions { "<th></th></tr>\n" } else { "</tr>\n" });

    for c in clamps {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            c.id,
            escape(&c.location),
            escape(&c.registration),
            c.date_str(),
            c.time_in_str(),
            c.time_released_str(),
            escape(&c.offense),
            c.payment_status,
        );
        if actions {
            let _ = write!(
                html,
                r#"<td><a href="/edit-clamp/{id}">Edit</a> <a href="/delete-clamp/{id}">Delete</a></td>"#,
                id = c.id
            );
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n");
    html
}

pub fn list_page(clamps: &[ClampRecord], notice: Option<&str>) -> String {
    let mut body = String::new();

    if clamps.is_empty() {
        body.push_str("<p>No clamp records yet.</p>\n");
    } else {
        body.push_str(&clamp_rows(clamps, true));
    }

    let _ = write!(
        body,
        "<h2>Add clamp</h2>\n<form method=\"post\" action=\"/add-clamp\">\n{}\n\
         <button type=\"submit\">Add</button>\n</form>\n",
        form_fields(None)
    );

    layout("Clamp records", notice, &body)
}

pub fn edit_page(clamp: &ClampRecord, notice: Option<&str>) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/edit-clamp/{}\">\n{}\n\
         <button type=\"submit\">Save</button>\n</form>\n",
        clamp.id,
        form_fields(Some(clamp))
    );
    layout(&format!("Edit clamp #{}", clamp.id), notice, &body)
}
