use crate::errors::AppError;
use crate::models::{EmployeeAttendance, EmployeeForm, MessageResponse, SheetResponse};
use crate::sheet::date_key;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today_date();
    let store = state.store.lock().await;
    let sheet = store.load_or_init(today).await?;
    Ok(Html(render_index(&sheet, today)))
}

pub async fn get_attendance(State(state): State<AppState>) -> Result<Json<SheetResponse>, AppError> {
    let today = today_date();
    let store = state.store.lock().await;
    let sheet = store.load_or_init(today).await?;

    let employees = sheet
        .rows()
        .iter()
        .map(|row| EmployeeAttendance {
            name: row.name.clone(),
            present_dates: sheet
                .dates()
                .iter()
                .zip(&row.days)
                .filter(|(_, status)| status.is_present())
                .map(|(date, _)| date_key(*date))
                .collect(),
        })
        .collect();

    Ok(Json(SheetResponse {
        month: sheet.month_label().unwrap_or_default(),
        today: date_key(today),
        dates: sheet.dates().iter().map(|date| date_key(*date)).collect(),
        employees,
    }))
}

/// Checkboxes arrive as repeated `attendance=<name>` pairs; unchecked boxes are
/// simply absent from the body.
pub async fn submit_attendance(
    State(state): State<AppState>,
    fields: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Form(fields) = fields?;
    let present: Vec<String> = fields
        .into_iter()
        .filter(|(key, _)| key == "attendance")
        .map(|(_, name)| name)
        .collect();

    let today = today_date();
    let store = state.store.lock().await;
    let mut sheet = store.load_or_init(today).await?;
    let marked = sheet.submit_attendance(today, present.as_slice())?;
    store.persist(today, &sheet).await?;

    info!(date = %today, present = marked, total = sheet.rows().len(), "attendance submitted");
    Ok(Json(MessageResponse::new("Attendance submitted successfully!")))
}

pub async fn add_employee(
    State(state): State<AppState>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Form(form) = form?;
    authorize(&state, &form, "add")?;

    let today = today_date();
    let store = state.store.lock().await;
    let mut sheet = store.load_or_init(today).await?;
    if let Err(err) = sheet.add_employee(&form.employee_name) {
        warn!(employee = %form.employee_name, "add rejected: {err}");
        return Err(err.into());
    }
    store.persist(today, &sheet).await?;

    let name = form.employee_name.trim();
    info!(employee = %name, "employee added");
    Ok(Json(MessageResponse::new(format!(
        "Employee '{name}' added successfully!"
    ))))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Form(form) = form?;
    authorize(&state, &form, "delete")?;

    let today = today_date();
    let store = state.store.lock().await;
    let mut sheet = store.load_or_init(today).await?;
    if let Err(err) = sheet.delete_employee(&form.employee_name) {
        warn!(employee = %form.employee_name, "delete rejected: {err}");
        return Err(err.into());
    }
    store.persist(today, &sheet).await?;

    let name = form.employee_name.trim();
    info!(employee = %name, "employee deleted");
    Ok(Json(MessageResponse::new(format!(
        "Employee '{name}' deleted successfully!"
    ))))
}

fn authorize(state: &AppState, form: &EmployeeForm, action: &str) -> Result<(), AppError> {
    if state.check_password(&form.admin_password) {
        return Ok(());
    }
    warn!(employee = %form.employee_name, action, "invalid admin password");
    Err(AppError::unauthorized("Invalid admin password!"))
}

fn today_date() -> NaiveDate {
    Local::now().date_naive()
}
