use tracing::{error, info, warn};

use crate::domain::models::{AttendanceRecord, ScanPayload};
use crate::domain::notice::Notice;
use crate::domain::scanner::{CapturedScan, Scanner, NOTHING_CAPTURED_MESSAGE, SCAN_LOCKED_MESSAGE, SCAN_LOCKED_TITLE};
use crate::domain::session::Session;
use crate::domain::timestamp::{normalize_scan_timestamp, TimestampZone};
use crate::error::{ClientError, ClientResult, SUBMISSION_ERROR_MESSAGE};
use crate::io::rest::mappers::attendance_mapper::AttendanceMapper;
use crate::io::ApiClient;

pub const TEMPERATURE_REQUIRED_TITLE: &str = "Campo requerido";
pub const TEMPERATURE_REQUIRED_MESSAGE: &str = "Por favor ingresa la temperatura.";
pub const REGISTRATION_FALLBACK_MESSAGE: &str = "No se pudo registrar la asistencia";

/// Service that turns a captured scan into a submitted attendance record
#[derive(Clone)]
pub struct AttendanceService {
    api: ApiClient,
    zone: TimestampZone,
}

impl AttendanceService {
    pub fn new(api: ApiClient, zone: TimestampZone) -> Self {
        Self { api, zone }
    }

    /// Parse the captured payload and assemble the record for `site`
    pub fn build_record(&self, site: &str, scan: &CapturedScan) -> ClientResult<AttendanceRecord> {
        let payload = ScanPayload::parse(&scan.raw)?;
        let naive = normalize_scan_timestamp(&payload.fecha, &payload.hora)?;
        let fecha_hora = self.zone.resolve(naive)?;

        Ok(AttendanceRecord {
            nombre_persona: payload.nombre,
            apellidos: payload.apellidos,
            cai: payload.cai,
            fecha_hora,
            escuelasupervisor: site.to_string(),
            temperatura: non_blank(&scan.temperatura),
            comentarios_adicionales: non_blank(&scan.comentarios_adicionales),
        })
    }

    /// Submit the scanner's captured scan. Always yields exactly one notice.
    pub async fn submit(&self, session: &Session, scanner: &Scanner) -> Notice {
        match self.try_submit(session, scanner).await {
            Ok(notice) => notice,
            Err(e @ (ClientError::Network(_) | ClientError::Server { .. })) => {
                error!("Attendance submission failed: {}", e);
                Notice::error(SUBMISSION_ERROR_MESSAGE)
            }
            Err(e) => {
                warn!("Attendance not submitted: {}", e);
                e.notice()
            }
        }
    }

    async fn try_submit(&self, session: &Session, scanner: &Scanner) -> ClientResult<Notice> {
        let site = session
            .site()
            .ok_or_else(|| ClientError::validation(SCAN_LOCKED_TITLE, SCAN_LOCKED_MESSAGE))?;
        let scan = scanner
            .captured()
            .ok_or_else(|| ClientError::validation(SCAN_LOCKED_TITLE, NOTHING_CAPTURED_MESSAGE))?;

        if scanner.options().require_temperature && scan.temperatura.trim().is_empty() {
            return Err(ClientError::validation(
                TEMPERATURE_REQUIRED_TITLE,
                TEMPERATURE_REQUIRED_MESSAGE,
            ));
        }

        let record = self.build_record(site, scan)?;
        info!(
            "Submitting attendance for cai '{}' at {}",
            record.cai, record.fecha_hora
        );

        let response = self
            .api
            .register_attendance(&AttendanceMapper::to_dto(record))
            .await?;

        match response.message.filter(|m| !m.trim().is_empty()) {
            Some(message) => {
                info!("Backend answered: {}", message);
                Ok(Notice::info(message))
            }
            None => {
                warn!("Backend response carried no message");
                Ok(Notice::error(REGISTRATION_FALLBACK_MESSAGE))
            }
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
