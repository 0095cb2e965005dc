//! # Domain Module
//!
//! Business logic of the attendance client, independent of any UI toolkit
//! and of the concrete storage backend.
//!
//! ## Module Organization
//!
//! - **timestamp**: combining the scanned date and 12-hour time into one timestamp
//! - **scanner**: scan lifecycle (idle / captured), camera permission and facing
//! - **site_gate**: locked / unlocked state of the supervising site
//! - **session**: token and site gate backed by persisted storage
//! - **attendance_service**: formatting and submitting attendance records
//! - **auth_service**, **site_service**, **bulletin_service**, **chat_service**:
//!   the remaining backend-facing screens
//!
//! ## Rules
//!
//! - Scanning is only possible with camera permission and a confirmed site
//! - One scan is held at a time; later decodes are dropped until reset
//! - A scan whose payload or timestamp does not parse is never submitted
//! - Every submission attempt produces exactly one user-visible notice

pub mod attendance_service;
pub mod auth_service;
pub mod bulletin_service;
pub mod chat_service;
pub mod models;
pub mod notice;
pub mod scanner;
pub mod session;
pub mod site_gate;
pub mod site_service;
pub mod timestamp;

pub use attendance_service::AttendanceService;
pub use auth_service::AuthService;
pub use bulletin_service::BulletinService;
pub use chat_service::{ChatLine, ChatService};
pub use notice::{Notice, NoticeKind};
pub use scanner::{CameraFacing, CameraPermission, DecodeOutcome, ScanState, Scanner, ScannerOptions};
pub use session::Session;
pub use site_gate::SiteGate;
pub use site_service::SiteService;
pub use timestamp::TimestampZone;
