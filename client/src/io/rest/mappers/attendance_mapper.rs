use shared::AttendanceRecordRequest;

use crate::domain::models::AttendanceRecord;
use crate::domain::timestamp::to_wire_timestamp;

/// Maps attendance records to the wire DTO
pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_dto(record: AttendanceRecord) -> AttendanceRecordRequest {
        AttendanceRecordRequest {
            nombre_persona: record.nombre_persona,
            apellidos: record.apellidos,
            cai: record.cai,
            fecha_hora: to_wire_timestamp(&record.fecha_hora),
            escuelasupervisor: record.escuelasupervisor,
            temperatura: record.temperatura,
            comentarios_adicionales: record.comentarios_adicionales,
        }
    }
}
