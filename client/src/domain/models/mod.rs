pub mod attendance;
pub mod scan_payload;

pub use attendance::AttendanceRecord;
pub use scan_payload::ScanPayload;
