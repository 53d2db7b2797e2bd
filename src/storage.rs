use crate::sheet::{AttendanceSheet, SheetError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed attendance sheet {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: SheetError,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Directory of monthly sheets, one `attendance_YYYY_MM.csv` per month.
#[derive(Debug, Clone)]
pub struct AttendanceStore {
    dir: PathBuf,
}

impl AttendanceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn sheet_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("attendance_{}.csv", date.format("%Y_%m")))
    }

    /// Loads the sheet for the month containing `date`, creating the file with
    /// a fresh header the first time that month is touched.
    pub async fn load_or_init(&self, date: NaiveDate) -> Result<AttendanceSheet, StoreError> {
        let path = self.sheet_path(date);
        match fs::read(&path).await {
            Ok(bytes) => parse_sheet(&path, &bytes, date),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let sheet = AttendanceSheet::for_month(date);
                self.persist(date, &sheet).await?;
                info!(path = %path.display(), "created attendance sheet");
                Ok(sheet)
            }
            Err(err) => {
                error!("failed to read attendance sheet: {err}");
                Err(StoreError::io(&path, err))
            }
        }
    }

    /// Rewrites the month's file through a temporary sibling and a rename, so
    /// readers never observe a half-written sheet.
    pub async fn persist(&self, date: NaiveDate, sheet: &AttendanceSheet) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| StoreError::io(&self.dir, err))?;

        let path = self.sheet_path(date);
        let payload = encode_sheet(&path, sheet)?;
        let tmp_path = path.with_extension("csv.tmp");
        fs::write(&tmp_path, payload)
            .await
            .map_err(|err| StoreError::io(&tmp_path, err))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|err| StoreError::io(&path, err))?;
        Ok(())
    }
}

fn parse_sheet(path: &Path, bytes: &[u8], date: NaiveDate) -> Result<AttendanceSheet, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| StoreError::csv(path, err))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    let malformed = |source: SheetError| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    };
    let sheet = AttendanceSheet::from_records(records).map_err(malformed)?;
    sheet.ensure_month(date).map_err(malformed)?;
    Ok(sheet)
}

fn encode_sheet(path: &Path, sheet: &AttendanceSheet) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in sheet.to_records() {
        writer
            .write_record(&record)
            .map_err(|err| StoreError::csv(path, err))?;
    }
    writer
        .into_inner()
        .map_err(|err| StoreError::io(path, err.into_error()))
}
