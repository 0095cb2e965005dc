//! # Scanner
//!
//! Scan lifecycle for the attendance screen. The camera delivers decoded QR
//! text; the first payload accepted while idle is captured and every later
//! decode is ignored until the supervisor asks to scan again.

use tracing::{debug, info};

use crate::domain::notice::Notice;
use crate::domain::site_gate::SiteGate;
use crate::error::{ClientError, ClientResult};

pub const SCAN_LOCKED_TITLE: &str = "CAI requerido";
pub const SCAN_LOCKED_MESSAGE: &str = "Selecciona y confirma tu CAI antes de escanear.";
pub const NOTHING_CAPTURED_MESSAGE: &str = "Escanea un código QR primero.";

/// Camera permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPermission {
    /// Platform has not answered yet
    #[default]
    Undetermined,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Back => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Back,
        }
    }
}

/// Form data held while a scan is captured
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedScan {
    /// Raw decoded QR text
    pub raw: String,
    pub temperatura: String,
    pub comentarios_adicionales: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Camera active, decoding enabled
    #[default]
    Idle,
    /// Decoding disabled, submission form shown
    Captured(CapturedScan),
}

/// What happened to a decode event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Payload captured; the notice echoes the scanned code
    Captured(Notice),
    /// A scan is already held, the event was dropped
    Ignored,
}

/// Options that vary between deployments of the scanning screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Refuse to submit until a temperature was entered
    pub require_temperature: bool,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            require_temperature: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScannerOptions,
    permission: CameraPermission,
    facing: CameraFacing,
    state: ScanState,
}

impl Scanner {
    pub fn new(options: ScannerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> ScannerOptions {
        self.options
    }

    pub fn permission(&self) -> CameraPermission {
        self.permission
    }

    pub fn set_permission(&mut self, permission: CameraPermission) {
        info!("Camera permission is now {:?}", permission);
        self.permission = permission;
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    pub fn toggle_facing(&mut self) -> CameraFacing {
        self.facing = self.facing.toggled();
        self.facing
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Whether the camera stream should currently be decoded
    pub fn accepts_decodes(&self, gate: &SiteGate) -> bool {
        self.permission == CameraPermission::Granted
            && gate.is_unlocked()
            && self.state == ScanState::Idle
    }

    /// Raw text of the captured scan, empty while idle
    pub fn qr_data(&self) -> &str {
        match &self.state {
            ScanState::Captured(scan) => &scan.raw,
            ScanState::Idle => "",
        }
    }

    pub fn captured(&self) -> Option<&CapturedScan> {
        match &self.state {
            ScanState::Captured(scan) => Some(scan),
            ScanState::Idle => None,
        }
    }

    /// Handle a decode event from the camera
    pub fn on_decoded(&mut self, gate: &SiteGate, data: &str) -> ClientResult<DecodeOutcome> {
        if self.permission != CameraPermission::Granted {
            return Err(ClientError::PermissionDenied);
        }
        if !gate.is_unlocked() {
            return Err(ClientError::validation(SCAN_LOCKED_TITLE, SCAN_LOCKED_MESSAGE));
        }
        if let ScanState::Captured(_) = self.state {
            debug!("Dropping decode event while a scan is held");
            return Ok(DecodeOutcome::Ignored);
        }

        info!("Captured QR payload ({} bytes)", data.len());
        self.state = ScanState::Captured(CapturedScan {
            raw: data.to_string(),
            ..CapturedScan::default()
        });
        Ok(DecodeOutcome::Captured(Notice::info(format!(
            "Código escaneado: {}",
            data
        ))))
    }

    fn captured_mut(&mut self) -> ClientResult<&mut CapturedScan> {
        match &mut self.state {
            ScanState::Captured(scan) => Ok(scan),
            ScanState::Idle => Err(ClientError::validation(SCAN_LOCKED_TITLE, NOTHING_CAPTURED_MESSAGE)),
        }
    }

    pub fn set_temperature(&mut self, temperatura: &str) -> ClientResult<()> {
        self.captured_mut()?.temperatura = temperatura.to_string();
        Ok(())
    }

    pub fn set_comments(&mut self, comentarios: &str) -> ClientResult<()> {
        self.captured_mut()?.comentarios_adicionales = comentarios.to_string();
        Ok(())
    }

    /// Discard the held payload and form fields and resume decoding
    pub fn scan_again(&mut self) {
        if self.state != ScanState::Idle {
            info!("Resetting scanner for a new scan");
        }
        self.state = ScanState::Idle;
    }
}
