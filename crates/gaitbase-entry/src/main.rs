use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;

use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::validate::validate_patient_code;
use gaitbase_entry::config::{self, GaitbaseConfig};
use gaitbase_entry::session::EntrySession;
use gaitbase_export::docx::generate_docx;
use gaitbase_export::render::Renderer;
use gaitbase_export::styles::DocumentStyles;
use gaitbase_export::template::TextTemplate;
use gaitbase_export::xlsx;
use gaitbase_rom::rom_form;
use gaitbase_storage::sqlite::SqliteStore;

#[derive(Debug, Parser)]
#[command(name = "gaitbase")]
#[command(about = "Range-of-motion data entry and reports.")]
struct Cli {
    /// Config file to use instead of the per-user one.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database tables for the current form.
    InitDb,
    /// Add a patient and print its id.
    NewPatient(NewPatientArgs),
    /// Create a ROM record for a patient and print its id.
    NewRecord { patient_id: i64 },
    /// Set a field of a ROM record.
    Set {
        rom_id: i64,
        field: String,
        value: String,
    },
    /// Print the text report of a ROM record.
    Report(ReportArgs),
    /// Print every form variable and its storage affinity as JSON.
    Vars,
    /// Check a patient code.
    CheckCode { code: String },
}

#[derive(Debug, Parser)]
struct NewPatientArgs {
    #[arg(long)]
    firstname: String,
    #[arg(long)]
    lastname: String,
    #[arg(long, default_value = "")]
    ssn: String,
    /// Patient code, e.g. `C1234_AB`.
    #[arg(long)]
    code: String,
    #[arg(long, default_value = "")]
    diagnosis: String,
}

#[derive(Debug, Parser)]
struct ReportArgs {
    rom_id: i64,

    /// Leave units out of the text report.
    #[arg(long)]
    no_units: bool,

    /// Also write the XLSX report to this path.
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Also write the text report as DOCX to this path.
    #[arg(long)]
    docx: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = config::load_or_create(&config_path)?;

    match cli.command {
        Command::InitDb => {
            let store = open_store(&config)?;
            store.init_schema(rom_form()?.fields())?;
            println!("initialized {}", config.database.path.display());
        }
        Command::NewPatient(args) => {
            if !validate_patient_code(&args.code) {
                return Err(eyre::eyre!("invalid patient code: {}", args.code));
            }
            let patient = PatientInfo {
                firstname: args.firstname,
                lastname: args.lastname,
                ssn: args.ssn,
                patient_code: args.code,
                diagnosis: args.diagnosis,
            };
            let patient_id = open_store(&config)?.create_patient(&patient)?;
            println!("{patient_id}");
        }
        Command::NewRecord { patient_id } => {
            let form = rom_form()?;
            let store = open_store(&config)?;
            let rom_id = store.create_record(patient_id)?;
            let mut session = EntrySession::open(&form, store, rom_id, true)?;
            if config.json.dump_json {
                std::fs::create_dir_all(&config.json.json_path)?;
                session = session.with_backup_dir(&config.json.json_path);
            }
            for warning in session.open_warnings() {
                eprintln!("warning: {warning}");
            }
            session.close(false)?;
            println!("{rom_id}");
        }
        Command::Set {
            rom_id,
            field,
            value,
        } => {
            let form = rom_form()?;
            let mut session = EntrySession::open(&form, open_store(&config)?, rom_id, false)?;
            let outcome = session.edit_input(&field, &value)?;
            for name in &outcome.recomputed {
                if let Some(value) = session.get(name) {
                    println!("{name} = {value}");
                }
            }
            for warning in session.open_warnings().iter().chain(&outcome.warnings) {
                eprintln!("warning: {warning}");
            }
            if let Err(e) = session.validate() {
                eprintln!("warning: {e}");
            }
            session.close(true)?;
        }
        Command::Report(args) => {
            let form = rom_form()?;
            let session = EntrySession::open(&form, open_store(&config)?, args.rom_id, false)?;
            let renderer = Renderer::new(config.report.clone());
            let template = TextTemplate::load_or_default(config.templates.text.as_deref())?;
            let text = session.text_report(&template, &renderer, !args.no_units)?;
            println!("{text}");

            if let Some(output) = &args.xlsx {
                let template = config
                    .templates
                    .xlsx
                    .as_deref()
                    .ok_or_else(|| eyre::eyre!("no XLSX template configured"))?;
                let book = session.xlsx_report(template, &renderer)?;
                xlsx::save_workbook(&book, output)?;
            }
            if let Some(output) = &args.docx {
                let patient = session.patient();
                let title = format!(
                    "{} {} {}",
                    patient.patient_code, patient.lastname, patient.firstname
                );
                let bytes = generate_docx(title.trim(), &text, &DocumentStyles::default())?;
                std::fs::write(output, bytes)?;
                tracing::info!(path = %output.display(), "saved DOCX report");
            }
            session.close(true)?;
        }
        Command::Vars => {
            let affinities = rom_form()?.variable_affinities();
            println!("{}", serde_json::to_string_pretty(&affinities)?);
        }
        Command::CheckCode { code } => {
            if !validate_patient_code(&code) {
                return Err(eyre::eyre!("invalid patient code: {code}"));
            }
            println!("ok");
        }
    }

    Ok(())
}

fn open_store(config: &GaitbaseConfig) -> Result<SqliteStore> {
    if let Some(dir) = config.database.path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(SqliteStore::open_path(&config.database.path)?)
}
