use std::path::{Path, PathBuf};

use crate::api::{ApiClient, Blob, RequestOptions};
use crate::download::{self, DEFAULT_REPORT_NAME};
use crate::error::CommunityResult;
use crate::model::{Id, Meeting};

/// Spreadsheet reports the gateway can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    People,
    Families,
    Attendance(Id<Meeting>),
}

impl ReportKind {
    pub fn path(&self) -> String {
        match self {
            ReportKind::People => "/reportes/reporte/personas".to_string(),
            ReportKind::Families => "/reportes/reporte/familias".to_string(),
            ReportKind::Attendance(id) => format!("/reportes/reporte/asistencia/{}", id),
        }
    }

    pub fn parse(name: &str, meeting_id: Option<Id<Meeting>>) -> Option<Self> {
        match (name.trim().to_lowercase().as_str(), meeting_id) {
            ("personas" | "people", _) => Some(ReportKind::People),
            ("familias" | "families", _) => Some(ReportKind::Families),
            ("asistencia" | "attendance", Some(id)) => Some(ReportKind::Attendance(id)),
            _ => None,
        }
    }
}

pub fn fetch_report(client: &ApiClient, kind: ReportKind) -> CommunityResult<Blob> {
    client.blob(&kind.path(), RequestOptions::get())
}

/// Downloads a report and saves it under `dir`.
pub fn download_report(client: &ApiClient, kind: ReportKind, dir: &Path) -> CommunityResult<PathBuf> {
    let blob = fetch_report(client, kind)?;
    download::save_blob(&blob, dir, DEFAULT_REPORT_NAME)
}
