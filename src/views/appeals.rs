use super::{escape, layout, select};
use crate::models::{AppealRecord, AppealStatus, AppealWithClamp, ClampRecord};
use std::fmt::Write;

fn status_options() -> Vec<&'static str> {
    AppealStatus::ALL.iter().map(|s| s.to_db_str()).collect()
}

/// Clamp picker; the JSON lookup endpoint fills in the details client-side.
fn clamp_select(clamps: &[ClampRecord], current: Option<i64>) -> String {
    let mut html = String::from(r#"<select name="clamp_id" id="clamp_id" required>"#);
    for c in clamps {
        let sel = if Some(c.id) == current { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{id}"{sel}>#{id} · {loc}</option>"#,
            id = c.id,
            loc = escape(&c.location),
        );
    }
    html.push_str("</select>");
    html
}

const LOOKUP_SCRIPT: &str = r#"<p id="clamp_info"></p>
<script>
const pick = document.getElementById('clamp_id');
async function showClamp() {
  const res = await fetch('/api/clamp/' + pick.value);
  const data = await res.json();
  document.getElementById('clamp_info').textContent =
    res.ok ? data.location + ' ' + data.registration : data.error;
}
if (pick) { pick.addEventListener('change', showClamp); }
</script>"#;

fn form_fields(clamps: &[ClampRecord], a: Option<&AppealRecord>) -> String {
    format!(
        "<label>Clamp {}</label>\n\
         <label>Date <input type=\"date\" name=\"appeal_date\" value=\"{}\"></label>\n\
         <label>Reason <input type=\"text\" name=\"appeal_reason\" value=\"{}\" required></label>\n\
         <label>Status {}</label>\n\
         <label>Notes <textarea name=\"notes\">{}</textarea></label>",
        clamp_select(clamps, a.map(|a| a.clamp_id)),
        a.map(|a| a.date_str()).unwrap_or_default(),
        escape(a.map(|a| a.appeal_reason.as_str()).unwrap_or("")),
        select(
            "appeal_status",
            &status_options(),
            a.map(|a| a.appeal_status.to_db_str()).unwrap_or("Pending"),
        ),
        escape(a.map(|a| a.notes_str()).unwrap_or("")),
    )
}

pub fn list_page(
    appeals: &[AppealWithClamp],
    clamps: &[ClampRecord],
    notice: Option<&str>,
) -> String {
    let mut body = String::new();

    if appeals.is_empty() {
        body.push_str("<p>No appeals filed.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>ID</th><th>Clamp</th><th>Location</th><th>Registration</th>\
             <th>Date</th><th>Reason</th><th>Status</th><th>Notes</th><th></th></tr>\n",
        );
        for row in appeals {
            let a = &row.appeal;
            let _ = writeln!(
                body,
                "<tr><td>{id}</td><td>{clamp}</td><td>{loc}</td><td>{reg}</td><td>{date}</td>\
                 <td>{reason}</td><td>{status}</td><td>{notes}</td>\
                 <td><a href=\"/edit-appeal/{id}\">Edit</a> <a href=\"/delete-appeal/{id}\">Delete</a></td></tr>",
                id = a.id,
                clamp = a.clamp_id,
                loc = escape(&row.location),
                reg = escape(&row.registration),
                date = a.date_str(),
                reason = escape(&a.appeal_reason),
                status = a.appeal_status,
                notes = escape(a.notes_str()),
            );
        }
        body.push_str("</table>\n");
    }

    body.push_str("<h2>File appeal</h2>\n");
    if clamps.is_empty() {
        body.push_str("<p>Add a clamp record before filing an appeal.</p>\n");
    } else {
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/add-appeal\">\n{}\n\
             <button type=\"submit\">File</button>\n</form>\n{}\n",
            form_fields(clamps, None),
            LOOKUP_SCRIPT
        );
    }

    layout("Appeals", notice, &body)
}

pub fn edit_page(appeal: &AppealRecord, clamps: &[ClampRecord], notice: Option<&str>) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/edit-appeal/{}\">\n{}\n\
         <button type=\"submit\">Save</button>\n</form>\n{}\n",
        appeal.id,
        form_fields(clamps, Some(appeal)),
        LOOKUP_SCRIPT
    );
    layout(&format!("Edit appeal #{}", appeal.id), notice, &body)
}
