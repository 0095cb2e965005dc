//! Asistencia CLI
//!
//! Drives the attendance client from a terminal. QR decoding happens
//! elsewhere; `scan` takes the decoded text as an argument or on stdin.
//!
//! Usage:
//!     asistencia login --username ana --password secreto
//!     asistencia site confirm "CAI Norte" "CAI Norte"
//!     asistencia scan --temperature 36.5 < payload.json

use anyhow::Result;
use asistencia_client::config::ClientConfig;
use asistencia_client::domain::auth_service::login_error_message;
use asistencia_client::domain::bulletin_service::NO_AVISOS_MESSAGE;
use asistencia_client::domain::{CameraPermission, DecodeOutcome, Notice, TimestampZone};
use asistencia_client::{initialize_client, logging, ClientState};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "asistencia", about = "Attendance scanning client for school supervisors")]
struct Args {
    /// YAML configuration file
    #[arg(long, env = "ASISTENCIA_CONFIG")]
    config: Option<PathBuf>,

    /// Backend root URL
    #[arg(long, env = "ASISTENCIA_BASE_URL")]
    base_url: Option<String>,

    /// Directory holding the persisted session
    #[arg(long, env = "ASISTENCIA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Zone for scanned timestamps: local, utc or ±HH:MM
    #[arg(long, env = "ASISTENCIA_TIMEZONE")]
    timezone: Option<TimestampZone>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the bearer token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "ASISTENCIA_PASSWORD")]
        password: String,
    },
    /// Search site candidates
    Cais { search: String },
    /// Show or confirm the supervising site
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },
    /// Forget token and supervising site
    Logout,
    /// Submit attendance for a decoded QR payload
    Scan {
        /// Decoded QR text; read from stdin when omitted
        #[arg(long)]
        payload: Option<String>,
        #[arg(long, default_value = "")]
        temperature: String,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Show the bulletin board
    Avisos,
    /// List chat users
    Users,
    /// Show a conversation, optionally sending a message first
    Chat {
        user_id: i64,
        #[arg(long)]
        send: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SiteAction {
    Show,
    /// Confirm by typing the site name twice
    Confirm { site: String, confirmation: String },
}

fn report(notice: &Notice) -> ExitCode {
    if notice.is_error() {
        println!("⚠️  {}", notice);
        ExitCode::FAILURE
    } else {
        println!("{}", notice);
        ExitCode::SUCCESS
    }
}

fn build_config(args: &Args) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(data_dir) = &args.data_dir {
        config.data_directory = data_dir.clone();
    }
    if let Some(timezone) = args.timezone {
        config.timezone = timezone;
    }
    Ok(config)
}

fn read_payload(payload: Option<String>) -> Result<String> {
    match payload {
        Some(payload) => Ok(payload),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

async fn run_scan(state: &mut ClientState, payload: &str, temperature: &str, comments: &str) -> ExitCode {
    // The caller already decoded the QR, so the camera step counts as granted
    state.scanner.set_permission(CameraPermission::Granted);

    match state.scanner.on_decoded(state.session.gate(), payload) {
        Ok(DecodeOutcome::Captured(notice)) => println!("{}", notice),
        Ok(DecodeOutcome::Ignored) => {}
        Err(e) => return report(&e.notice()),
    }

    let form = state
        .scanner
        .set_temperature(temperature)
        .and_then(|_| state.scanner.set_comments(comments));
    if let Err(e) = form {
        return report(&e.notice());
    }

    let notice = state.attendance_service.submit(&state.session, &state.scanner).await;
    report(&notice)
}

async fn run_chat(state: &ClientState, user_id: i64, send: Option<String>) -> ExitCode {
    let peer = match state.chat_service.find_user(&state.session, user_id).await {
        Ok(peer) => peer,
        Err(e) => return report(&e.notice()),
    };

    let lines = match send {
        Some(text) => match state.chat_service.send(&state.session, &peer, &text).await {
            Ok(Some(lines)) => lines,
            Ok(None) => return ExitCode::SUCCESS,
            Err(e) => return report(&e.notice()),
        },
        None => match state.chat_service.conversation(&state.session, &peer).await {
            Ok(lines) => lines,
            Err(e) => return report(&e.notice()),
        },
    };

    println!("Chat con {}", peer.username);
    for line in lines {
        let marker = if line.from_peer { "<" } else { ">" };
        println!("{} {}: {}", marker, line.author, line.text);
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config = build_config(&args)?;
    let mut state = initialize_client(config)?;
    info!("Client ready (data directory {:?})", state.config.data_directory);

    let code = match args.command {
        Command::Login { username, password } => {
            match state.auth_service.login(&mut state.session, &username, &password).await {
                Ok(()) => report(&Notice::info("Sesión iniciada")),
                Err(e) => report(&Notice::error(login_error_message(&e))),
            }
        }
        Command::Cais { search } => {
            let cais = state.site_service.search(&search).await;
            for cai in cais {
                println!("{}\t{}", cai.id, cai.nombre);
            }
            ExitCode::SUCCESS
        }
        Command::Site { action: SiteAction::Show } => {
            match state.session.site() {
                Some(site) => println!("Supervisor: {}", site),
                None => println!("Sin CAI confirmado"),
            }
            ExitCode::SUCCESS
        }
        Command::Site { action: SiteAction::Confirm { site, confirmation } } => {
            let result = state
                .session
                .set_site_candidate(&site)
                .and_then(|_| state.session.confirm_site(&confirmation));
            match result {
                Ok(site) => report(&Notice::info(format!("CAI guardado correctamente: {}", site))),
                Err(e) => report(&e.notice()),
            }
        }
        Command::Logout => match state.session.logout() {
            Ok(()) => report(&Notice::info("Sesión cerrada")),
            Err(e) => report(&e.notice()),
        },
        Command::Scan { payload, temperature, comments } => {
            let payload = read_payload(payload)?;
            run_scan(&mut state, &payload, &temperature, &comments).await
        }
        Command::Avisos => {
            let avisos = state.bulletin_service.list().await;
            if avisos.is_empty() {
                println!("{}", NO_AVISOS_MESSAGE);
            }
            for aviso in avisos {
                println!("{}\n  {}\n  📅 {}\n", aviso.titulo, aviso.descripcion, aviso.fecha);
            }
            ExitCode::SUCCESS
        }
        Command::Users => match state.chat_service.list_users(&state.session).await {
            Ok(users) if users.is_empty() => {
                println!("No hay usuarios disponibles");
                ExitCode::SUCCESS
            }
            Ok(users) => {
                for user in users {
                    println!("{}\t{}", user.id, user.username);
                }
                ExitCode::SUCCESS
            }
            Err(e) => report(&e.notice()),
        },
        Command::Chat { user_id, send } => run_chat(&state, user_id, send).await,
    };

    Ok(code)
}
