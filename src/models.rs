use serde::{Deserialize, Serialize};

/// Value stored in one date cell of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttendanceStatus {
    Present,
    #[default]
    Absent,
}

impl AttendanceStatus {
    pub fn as_cell(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "1",
            AttendanceStatus::Absent => "0",
        }
    }

    /// Older sheets used "Present" and blank cells, so both spellings load.
    pub fn from_cell(cell: &str) -> Self {
        let cell = cell.trim();
        if cell == "1" || cell.eq_ignore_ascii_case("present") {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }

    pub fn is_present(self) -> bool {
        self == AttendanceStatus::Present
    }
}

#[derive(Debug, Deserialize)]
pub struct EmployeeForm {
    pub employee_name: String,
    pub admin_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeAttendance {
    pub name: String,
    pub present_dates: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SheetResponse {
    pub month: String,
    pub today: String,
    pub dates: Vec<String>,
    pub employees: Vec<EmployeeAttendance>,
}
