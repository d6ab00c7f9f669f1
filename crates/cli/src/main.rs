// rollcall CLI - user-roster imports from the command line

mod exit_codes;
mod store;

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rollcall_engine::matcher::partition;
use rollcall_engine::template::TEMPLATE_CSV;
use rollcall_engine::{reconcile, staging, ImportError, UserRecord, UserStore};
use rollcall_io::parse_named;

use exit_codes::{import_exit_code, EXIT_IO, EXIT_SUCCESS};
use store::JsonStore;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Bulk user-roster imports: preview, commit, template")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a roster file and stage it against the store
    #[command(after_help = "\
Reads the roster, splits it into rows that match existing users (by user
name or email) and rows that do not, and stages the whole batch for
`rollcall commit`. Nothing is written to the store.

Examples:
  rollcall preview roster.csv --store users.json
  rollcall preview roster.xlsx --store users.json --staged /tmp/batch.json
  rollcall preview roster.csv --store users.json --json | jq '.matched | length'")]
    Preview {
        /// Roster file (.csv, .xlsx, or .xls)
        file: PathBuf,

        /// User store (JSON file)
        #[arg(long, env = "ROLLCALL_STORE")]
        store: PathBuf,

        /// Where the staged batch is written
        #[arg(long, env = "ROLLCALL_STAGED", default_value = "staged-users.json")]
        staged: PathBuf,

        /// Emit the preview as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Reconcile the staged batch into the store
    #[command(after_help = "\
Consumes the staged batch written by `rollcall preview` (the batch file
is deleted before reconciling), merges rows that match existing users,
creates new users, and skips rows with neither a user name nor an email.

Examples:
  rollcall commit --store users.json
  rollcall commit --store users.json --staged /tmp/batch.json --json")]
    Commit {
        /// User store (JSON file)
        #[arg(long, env = "ROLLCALL_STORE")]
        store: PathBuf,

        /// Staged batch written by preview
        #[arg(long, env = "ROLLCALL_STAGED", default_value = "staged-users.json")]
        staged: PathBuf,

        /// Emit the counts as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Print the roster template
    #[command(after_help = "\
Examples:
  rollcall template
  rollcall template -o users-template.csv")]
    Template {
        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Preview { file, store, staged, json } => cmd_preview(file, store, staged, json),
        Commands::Commit { store, staged, json } => cmd_commit(store, staged, json),
        Commands::Template { output } => cmd_template(output),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Create an error from an import failure with its registry exit code.
    fn import(err: ImportError) -> Self {
        let hint = match &err {
            ImportError::UnsupportedFormat(_) => {
                Some("supported roster formats are .csv, .xlsx, and .xls".to_string())
            }
            ImportError::TransferMissing => {
                Some("run `rollcall preview <FILE>` first; each staged batch commits once".to_string())
            }
            _ => None,
        };
        Self { code: import_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// preview
// ============================================================================

/// Machine-readable preview report for `--json`.
#[derive(Debug, serde::Serialize)]
struct PreviewReport {
    file: String,
    data_rows: usize,
    skipped_blank: usize,
    skipped_malformed: usize,
    matched: Vec<UserRecord>,
    unmatched: Vec<UserRecord>,
    staged: String,
}

fn cmd_preview(file: PathBuf, store_path: PathBuf, staged: PathBuf, json: bool) -> Result<(), CliError> {
    let bytes = fs::read(&file).map_err(|e| CliError::io(format!("{}: {}", file.display(), e)))?;
    if bytes.is_empty() {
        return Err(CliError::import(ImportError::EmptyInput));
    }

    let name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let outcome = parse_named(name, &bytes).map_err(CliError::import)?;
    if outcome.records.is_empty() {
        return Err(CliError::import(ImportError::EmptyInput));
    }

    let store = JsonStore::open(&store_path).map_err(|e| {
        CliError::import(ImportError::Persistence(e))
            .with_hint("the store must be a JSON array of user records")
    })?;
    let snapshot: Vec<UserRecord> = store
        .list_all()
        .map_err(|e| CliError::import(ImportError::Persistence(e)))?
        .into_iter()
        .map(|(_, row)| row)
        .collect();
    log::debug!("{}: {} existing user(s)", store_path.display(), snapshot.len());

    let groups = partition(&outcome.records, &snapshot);

    let blob = staging::encode(&outcome.records).map_err(CliError::import)?;
    fs::write(&staged, &blob).map_err(|e| CliError::io(format!("{}: {}", staged.display(), e)))?;
    log::debug!("staged {} record(s) at {}", outcome.records.len(), staged.display());

    if json {
        let report = PreviewReport {
            file: name.to_string(),
            data_rows: outcome.data_rows,
            skipped_blank: outcome.skipped_blank,
            skipped_malformed: outcome.skipped_malformed,
            matched: groups.matched,
            unmatched: groups.unmatched,
            staged: staged.display().to_string(),
        };
        let payload =
            serde_json::to_string_pretty(&report).map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", payload);
    } else {
        eprintln!("{}: {}", file.display(), outcome.summary());
        eprintln!(
            "preview: {} matched existing users, {} new or keyless",
            groups.matched.len(),
            groups.unmatched.len()
        );
        eprintln!("staged at {}; run `rollcall commit` to apply", staged.display());
    }
    Ok(())
}

// ============================================================================
// commit
// ============================================================================

fn cmd_commit(store_path: PathBuf, staged: PathBuf, json: bool) -> Result<(), CliError> {
    let blob = match fs::read_to_string(&staged) {
        Ok(s) if !s.trim().is_empty() => s,
        Ok(_) => return Err(CliError::import(ImportError::TransferMissing)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CliError::import(ImportError::TransferMissing));
        }
        Err(e) => return Err(CliError::io(format!("{}: {}", staged.display(), e))),
    };

    // The staged batch is consumed on first read, even when the decode or
    // the reconcile below fails.
    fs::remove_file(&staged).map_err(|e| CliError::io(format!("{}: {}", staged.display(), e)))?;

    let records = staging::decode(&blob).map_err(CliError::import)?;
    let mut store = JsonStore::open(&store_path).map_err(|e| {
        CliError::import(ImportError::Persistence(e))
            .with_hint("the store must be a JSON array of user records")
    })?;
    let summary = reconcile(&records, &mut store).map_err(CliError::import)?;
    log::info!("reconciled {} staged record(s): {}", records.len(), summary);

    if json {
        let payload =
            serde_json::to_string_pretty(&summary).map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", payload);
    } else {
        eprintln!("import completed: {}", summary);
    }
    Ok(())
}

// ============================================================================
// template
// ============================================================================

fn cmd_template(output: Option<PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            fs::write(&path, TEMPLATE_CSV)
                .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{}", TEMPLATE_CSV),
    }
    Ok(())
}
