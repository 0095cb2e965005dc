use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Content of an attendance QR code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanPayload {
    pub nombre: String,
    pub apellidos: String,
    pub cai: String,
    /// Localized date, `D/M/YYYY`
    pub fecha: String,
    /// Localized 12-hour time, `h:mm:ss a`
    pub hora: String,
}

impl ScanPayload {
    /// Decode the raw QR text. Only a parse is attempted; values are not validated here.
    pub fn parse(raw: &str) -> ClientResult<Self> {
        serde_json::from_str(raw).map_err(|e| ClientError::MalformedScan(e.to_string()))
    }
}
