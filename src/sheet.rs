//! In-memory attendance sheet for one calendar month.
//!
//! A sheet is a header of ISO dates (every day of the month, ascending) and one
//! row per employee holding a status for each of those dates.

use crate::models::AttendanceStatus;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;
use thiserror::Error;

pub const NAME_HEADER: &str = "Employee Name";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("Employee '{0}' already exists")]
    DuplicateEmployee(String),

    #[error("Employee '{0}' not found")]
    EmployeeNotFound(String),

    #[error("Employee name must not be empty")]
    EmptyName,

    #[error("{0} is not a column of this sheet")]
    DateNotInSheet(NaiveDate),

    #[error("sheet has no header row")]
    MissingHeader,

    #[error("invalid date column '{0}' in header")]
    InvalidHeaderDate(String),

    #[error("header does not cover every day of {expected} (found {found} date columns)")]
    HeaderMonthMismatch { expected: String, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub name: String,
    pub days: Vec<AttendanceStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSheet {
    dates: Vec<NaiveDate>,
    rows: Vec<EmployeeRow>,
}

impl AttendanceSheet {
    /// Empty sheet covering every day of the month that contains `date`.
    pub fn for_month(date: NaiveDate) -> Self {
        Self {
            dates: month_dates(date),
            rows: Vec::new(),
        }
    }

    /// Builds a sheet from raw CSV records, header first.
    ///
    /// Rows shorter than the header are padded with absent cells, longer rows
    /// are truncated, and rows with a blank name are dropped.
    pub fn from_records(records: Vec<Vec<String>>) -> Result<Self, SheetError> {
        let mut records = records.into_iter();
        let header = records.next().ok_or(SheetError::MissingHeader)?;

        let dates = header
            .iter()
            .skip(1)
            .map(|cell| {
                NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d")
                    .map_err(|_| SheetError::InvalidHeaderDate(cell.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = records
            .filter_map(|record| {
                let mut cells = record.into_iter();
                let name = cells.next()?.trim().to_string();
                if name.is_empty() {
                    return None;
                }
                let mut days: Vec<AttendanceStatus> = cells
                    .take(dates.len())
                    .map(|cell| AttendanceStatus::from_cell(&cell))
                    .collect();
                days.resize(dates.len(), AttendanceStatus::Absent);
                Some(EmployeeRow { name, days })
            })
            .collect();

        Ok(Self { dates, rows })
    }

    /// Fails unless the header lists exactly the days of the month containing
    /// `date`, in order.
    pub fn ensure_month(&self, date: NaiveDate) -> Result<(), SheetError> {
        if self.dates == month_dates(date) {
            return Ok(());
        }
        Err(SheetError::HeaderMonthMismatch {
            expected: date.format("%Y-%m").to_string(),
            found: self.dates.len(),
        })
    }

    pub fn to_records(&self) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.header());
        for row in &self.rows {
            let mut record = Vec::with_capacity(row.days.len() + 1);
            record.push(row.name.clone());
            record.extend(row.days.iter().map(|status| status.as_cell().to_string()));
            records.push(record);
        }
        records
    }

    pub fn header(&self) -> Vec<String> {
        std::iter::once(NAME_HEADER.to_string())
            .chain(self.dates.iter().map(|date| date_key(*date)))
            .collect()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn rows(&self) -> &[EmployeeRow] {
        &self.rows
    }

    pub fn employees(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.name.as_str())
    }

    /// `YYYY-MM` of the first date column, if the sheet has any.
    pub fn month_label(&self) -> Option<String> {
        self.dates
            .first()
            .map(|date| date.format("%Y-%m").to_string())
    }

    pub fn is_present(&self, name: &str, date: NaiveDate) -> bool {
        let Some(column) = self.column(date) else {
            return false;
        };
        self.rows
            .iter()
            .find(|row| row.name == name)
            .is_some_and(|row| row.days[column].is_present())
    }

    pub fn add_employee(&mut self, name: &str) -> Result<(), SheetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SheetError::EmptyName);
        }
        if self.rows.iter().any(|row| row.name == name) {
            return Err(SheetError::DuplicateEmployee(name.to_string()));
        }

        self.rows.push(EmployeeRow {
            name: name.to_string(),
            days: vec![AttendanceStatus::Absent; self.dates.len()],
        });
        Ok(())
    }

    pub fn delete_employee(&mut self, name: &str) -> Result<(), SheetError> {
        let name = name.trim();
        let index = self
            .rows
            .iter()
            .position(|row| row.name == name)
            .ok_or_else(|| SheetError::EmployeeNotFound(name.to_string()))?;
        self.rows.remove(index);
        Ok(())
    }

    /// Marks `date` present for every named employee and absent for everyone
    /// else. Names that are not on the sheet are ignored. Returns how many
    /// employees ended up present.
    pub fn submit_attendance<S: AsRef<str>>(
        &mut self,
        date: NaiveDate,
        present: &[S],
    ) -> Result<usize, SheetError> {
        let column = self.column(date).ok_or(SheetError::DateNotInSheet(date))?;
        let present: HashSet<&str> = present.iter().map(|name| name.as_ref().trim()).collect();

        let mut marked = 0;
        for row in &mut self.rows {
            row.days[column] = if present.contains(row.name.as_str()) {
                marked += 1;
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            };
        }
        Ok(marked)
    }

    fn column(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|candidate| *candidate == date)
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn month_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let first = date - Duration::days(i64::from(date.day0()));
    first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn leap_february_has_thirty_columns() {
        let sheet = AttendanceSheet::for_month(day(2024, 2, 17));
        let header = sheet.header();
        assert_eq!(header.len(), 30);
        assert_eq!(header[0], NAME_HEADER);
        assert_eq!(header[1], "2024-02-01");
        assert_eq!(header[29], "2024-02-29");
        assert!(header[1..].windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(sheet.month_label().as_deref(), Some("2024-02"));
    }

    #[test]
    fn month_lengths_follow_calendar() {
        assert_eq!(AttendanceSheet::for_month(day(2023, 2, 1)).dates().len(), 28);
        assert_eq!(AttendanceSheet::for_month(day(2024, 4, 30)).dates().len(), 30);
        assert_eq!(AttendanceSheet::for_month(day(2024, 12, 31)).dates().len(), 31);
    }

    #[test]
    fn add_employee_appends_absent_row() {
        let mut sheet = AttendanceSheet::for_month(day(2024, 2, 1));
        sheet.add_employee("Alice").unwrap();

        let row = &sheet.rows()[0];
        assert_eq!(row.name, "Alice");
        assert_eq!(row.days.len(), 29);
        assert!(row.days.iter().all(|status| !status.is_present()));
    }

    #[test]
    fn add_duplicate_employee_is_rejected() {
        let mut sheet = AttendanceSheet::for_month(day(2024, 2, 1));
        sheet.add_employee("Alice").unwrap();
        let before = sheet.clone();

        let err = sheet.add_employee("Alice").unwrap_err();
        assert_eq!(err, SheetError::DuplicateEmployee("Alice".into()));
        assert_eq!(sheet, before);

        // names are case-sensitive
        sheet.add_employee("alice").unwrap();
        assert_eq!(sheet.rows().len(), 2);
    }

    #[test]
    fn add_blank_name_is_rejected() {
        let mut sheet = AttendanceSheet::for_month(day(2024, 2, 1));
        assert_eq!(sheet.add_employee("   "), Err(SheetError::EmptyName));
        assert!(sheet.rows().is_empty());
    }

    #[test]
    fn delete_removes_only_that_row() {
        let mut sheet = AttendanceSheet::for_month(day(2024, 2, 1));
        sheet.add_employee("Alice").unwrap();
        sheet.add_employee("Bob").unwrap();
        sheet.add_employee("Carol").unwrap();
        sheet.submit_attendance(day(2024, 2, 1), &["Carol"]).unwrap();

        sheet.delete_employee("Bob").unwrap();

        let names: Vec<_> = sheet.employees().collect();
        assert_eq!(names, ["Alice", "Carol"]);
        assert!(sheet.is_present("Carol", day(2024, 2, 1)));
    }

    #[test]
    fn delete_missing_employee_reports_not_found() {
        let mut sheet = AttendanceSheet::for_month(day(2024, 2, 1));
        sheet.add_employee("Alice").unwrap();
        let before = sheet.clone();

        let err = sheet.delete_employee("Zed").unwrap_err();
        assert_eq!(err, SheetError::EmployeeNotFound("Zed".into()));
        assert_eq!(sheet, before);
    }

    #[test]
    fn submit_marks_only_checked_names_for_today() {
        let today = day(2024, 2, 10);
        let mut sheet = AttendanceSheet::for_month(today);
        sheet.add_employee("Alice").unwrap();
        sheet.add_employee("Bob").unwrap();

        let marked = sheet.submit_attendance(today, &["Alice"]).unwrap();
        assert_eq!(marked, 1);
        assert!(sheet.is_present("Alice", today));
        assert!(!sheet.is_present("Bob", today));

        let alice = &sheet.rows()[0];
        let present_days = alice.days.iter().filter(|status| status.is_present()).count();
        assert_eq!(present_days, 1);
    }

    #[test]
    fn submit_clears_unchecked_names() {
        let today = day(2024, 2, 10);
        let mut sheet = AttendanceSheet::for_month(today);
        sheet.add_employee("Alice").unwrap();
        sheet.add_employee("Bob").unwrap();
        sheet.submit_attendance(today, &["Alice", "Bob"]).unwrap();

        let none: [&str; 0] = [];
        let marked = sheet.submit_attendance(today, &none).unwrap();
        assert_eq!(marked, 0);
        assert!(!sheet.is_present("Alice", today));
        assert!(!sheet.is_present("Bob", today));
    }

    #[test]
    fn submit_ignores_unknown_names() {
        let today = day(2024, 2, 10);
        let mut sheet = AttendanceSheet::for_month(today);
        sheet.add_employee("Alice").unwrap();

        let marked = sheet.submit_attendance(today, &["Alice", "Mallory"]).unwrap();
        assert_eq!(marked, 1);
        assert_eq!(sheet.rows().len(), 1);
    }

    #[test]
    fn submit_outside_month_is_rejected() {
        let mut sheet = AttendanceSheet::for_month(day(2024, 2, 10));
        let err = sheet.submit_attendance(day(2024, 3, 1), &["Alice"]).unwrap_err();
        assert_eq!(err, SheetError::DateNotInSheet(day(2024, 3, 1)));
    }

    #[test]
    fn records_round_trip() {
        let today = day(2024, 2, 10);
        let mut sheet = AttendanceSheet::for_month(today);
        sheet.add_employee("Alice").unwrap();
        sheet.add_employee("Doe, John").unwrap();
        sheet.submit_attendance(today, &["Doe, John"]).unwrap();

        let reloaded = AttendanceSheet::from_records(sheet.to_records()).unwrap();
        assert_eq!(reloaded, sheet);
    }

    #[test]
    fn legacy_present_cells_load() {
        let records = vec![
            vec!["Employee Name".into(), "2024-02-01".into(), "2024-02-02".into()],
            vec!["Alice".into(), "Present".into(), "".into()],
            vec!["Bob".into()],
            vec!["".into(), "Present".into()],
        ];
        let sheet = AttendanceSheet::from_records(records).unwrap();

        assert_eq!(sheet.rows().len(), 2);
        assert!(sheet.is_present("Alice", day(2024, 2, 1)));
        assert!(!sheet.is_present("Alice", day(2024, 2, 2)));
        assert_eq!(sheet.rows()[1].days.len(), 2);
    }

    #[test]
    fn ensure_month_requires_full_calendar() {
        let sheet = AttendanceSheet::for_month(day(2024, 2, 10));
        assert_eq!(sheet.ensure_month(day(2024, 2, 29)), Ok(()));
        assert_eq!(
            sheet.ensure_month(day(2024, 3, 1)),
            Err(SheetError::HeaderMonthMismatch {
                expected: "2024-03".into(),
                found: 29,
            })
        );

        let truncated = vec![vec!["Employee Name".into(), "2024-02-01".into()]];
        let sheet = AttendanceSheet::from_records(truncated).unwrap();
        assert!(sheet.ensure_month(day(2024, 2, 1)).is_err());
    }

    #[test]
    fn from_records_rejects_bad_header() {
        assert_eq!(
            AttendanceSheet::from_records(Vec::new()),
            Err(SheetError::MissingHeader)
        );

        let records = vec![vec!["Employee Name".into(), "yesterday".into()]];
        assert_eq!(
            AttendanceSheet::from_records(records),
            Err(SheetError::InvalidHeaderDate("yesterday".into()))
        );
    }
}
