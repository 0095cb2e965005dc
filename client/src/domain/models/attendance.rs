use chrono::{DateTime, FixedOffset};

/// Attendance record ready to be submitted
///
/// Built from a [`super::ScanPayload`] plus session state. It is sent once and
/// never stored locally.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub nombre_persona: String,
    pub apellidos: String,
    pub cai: String,
    pub fecha_hora: DateTime<FixedOffset>,
    pub escuelasupervisor: String,
    pub temperatura: Option<String>,
    pub comentarios_adicionales: Option<String>,
}
