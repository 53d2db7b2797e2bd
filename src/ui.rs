use crate::sheet::{date_key, AttendanceSheet, EmployeeRow};
use chrono::NaiveDate;

pub fn render_index(sheet: &AttendanceSheet, today: NaiveDate) -> String {
    let month = sheet.month_label().unwrap_or_default();
    INDEX_HTML
        .replace("{{MONTH}}", &escape_html(&month))
        .replace("{{TODAY}}", &date_key(today))
        .replace("{{TABLE}}", &render_table(sheet, today))
}

fn render_table(sheet: &AttendanceSheet, today: NaiveDate) -> String {
    let header: String = sheet
        .header()
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let is_today = index > 0 && sheet.dates()[index - 1] == today;
            let class = if is_today { " class=\"today\"" } else { "" };
            format!("<th{class}>{}</th>", escape_html(label))
        })
        .collect();

    let body: String = if sheet.rows().is_empty() {
        format!(
            "<tr><td class=\"empty\" colspan=\"{}\">No employees yet. Add one with the admin form above.</td></tr>\n",
            sheet.dates().len() + 1
        )
    } else {
        sheet
            .rows()
            .iter()
            .map(|row| render_row(sheet, row, today))
            .collect()
    };

    format!("<table>\n<thead><tr>{header}</tr></thead>\n<tbody>\n{body}</tbody>\n</table>")
}

fn render_row(sheet: &AttendanceSheet, row: &EmployeeRow, today: NaiveDate) -> String {
    let name = escape_html(&row.name);
    let cells: String = sheet
        .dates()
        .iter()
        .zip(&row.days)
        .map(|(date, status)| {
            if *date == today {
                let checked = if status.is_present() { " checked" } else { "" };
                format!(
                    "<td class=\"today\"><input type=\"checkbox\" name=\"attendance\" value=\"{name}\"{checked}></td>"
                )
            } else if status.is_present() {
                "<td>&#10003;</td>".to_string()
            } else {
                "<td></td>".to_string()
            }
        })
        .collect();
    format!("<tr><td class=\"name\">{name}</td>{cells}</tr>\n")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance Management</title>
  <style>
    :root {
      --bg: #f4f6f8;
      --ink: #2b2a28;
      --accent: #2f6f9f;
      --accent-2: #c0392b;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(47, 72, 88, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .container {
      max-width: 1200px;
      margin: 0 auto;
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      text-align: center;
    }

    .subtitle {
      margin: 4px 0 0;
      text-align: center;
      color: #6b645d;
    }

    .form-container {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 16px;
    }

    form.admin {
      display: grid;
      gap: 8px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 12px;
    }

    input[type="text"],
    input[type="password"] {
      padding: 8px 10px;
      border: 1px solid #c9ced4;
      border-radius: 8px;
      font-size: 0.95rem;
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      color: white;
      background: var(--accent);
      cursor: pointer;
    }

    button.danger {
      background: var(--accent-2);
    }

    .table-wrap {
      overflow-x: auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.85rem;
    }

    th, td {
      border: 1px solid #dde2e7;
      padding: 6px 8px;
      text-align: center;
      white-space: nowrap;
    }

    th {
      background: var(--accent);
      color: white;
    }

    td.name {
      text-align: left;
      font-weight: 600;
    }

    th.today {
      background: #1d4e73;
    }

    td.today {
      background: #eaf3fa;
    }

    td.empty {
      color: #8b857d;
      font-style: italic;
    }

    tbody tr:nth-child(even) {
      background: #f8f9fa;
    }

    .status {
      min-height: 1.2em;
      color: #6b645d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="container">
    <header>
      <h1>Attendance Management</h1>
      <p class="subtitle">Month {{MONTH}} &middot; marking attendance for {{TODAY}}</p>
    </header>

    <section class="form-container">
      <form class="admin" method="post" action="/add_employee">
        <label for="add-employee">Add Employee</label>
        <input type="text" id="add-employee" name="employee_name" placeholder="Employee Name" required>
        <input type="password" name="admin_password" placeholder="Admin Password" required>
        <button type="submit">Add Employee</button>
      </form>
      <form class="admin" method="post" action="/delete_employee">
        <label for="delete-employee">Delete Employee</label>
        <input type="text" id="delete-employee" name="employee_name" placeholder="Employee Name" required>
        <input type="password" name="admin_password" placeholder="Admin Password" required>
        <button class="danger" type="submit">Delete Employee</button>
      </form>
    </section>

    <form id="attendance-form" method="post" action="/submit_attendance">
      <div class="table-wrap">
{{TABLE}}
      </div>
      <p><button type="submit">Submit Attendance</button></p>
    </form>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    document.querySelectorAll('form').forEach((form) => {
      form.addEventListener('submit', async (event) => {
        event.preventDefault();
        setStatus('Saving...', 'info');
        try {
          const res = await fetch(form.action, {
            method: 'POST',
            headers: { 'content-type': 'application/x-www-form-urlencoded' },
            body: new URLSearchParams(new FormData(form))
          });
          const body = await res.json().catch(() => ({ message: 'Request failed' }));
          if (!res.ok) {
            setStatus(body.message, 'error');
            return;
          }
          setStatus(body.message, 'ok');
          setTimeout(() => window.location.reload(), 800);
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn today_column_has_checkboxes() {
        let today = day(2024, 2, 10);
        let mut sheet = AttendanceSheet::for_month(today);
        sheet.add_employee("Alice").unwrap();
        sheet.add_employee("Bob").unwrap();
        sheet.submit_attendance(today, &["Alice"]).unwrap();

        let page = render_index(&sheet, today);
        assert!(page.contains("<th class=\"today\">2024-02-10</th>"));
        assert!(page.contains(r#"value="Alice" checked>"#));
        assert!(page.contains(r#"value="Bob">"#));
        assert_eq!(page.matches("type=\"checkbox\"").count(), 2);
        assert!(page.contains("Month 2024-02"));
    }

    #[test]
    fn employee_names_are_escaped() {
        let today = day(2024, 2, 10);
        let mut sheet = AttendanceSheet::for_month(today);
        sheet.add_employee("<script>alert(1)</script>").unwrap();

        let page = render_index(&sheet, today);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn empty_sheet_shows_placeholder() {
        let today = day(2024, 2, 10);
        let sheet = AttendanceSheet::for_month(today);
        let page = render_index(&sheet, today);
        assert!(page.contains("No employees yet"));
        assert!(page.contains("colspan=\"30\""));
    }
}
