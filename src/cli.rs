use anyhow::{anyhow, bail, Context as _, Result};
use console::{pad_str, style, Alignment, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::args::{Args, Command, DbCommand, Source};
use crate::config::Config;
use crate::db::{self, DatabaseV1};
use crate::error::TreeError;
use crate::import;
use crate::record::TransactionRecord;
use crate::terminal::{self, BulletPointPrinter, LineWriter};
use crate::tree::aggregate;
use crate::tree::projection::DisplayRow;
use crate::tree::session::Session;
use crate::tui::{self, App, Theme};

/// Depth of the beneficiary rows. Their children are the single transactions.
const BENEFICIARY_DEPTH: usize = 2;
const DETAIL_DEPTH: usize = 3;

pub async fn main(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let cli = Cli { config };
    match args.command {
        Command::View { file } => cli.main_view(&file),
        Command::App { db } => cli.main_app(db).await,
        Command::List { source, details } => cli.main_list(source, details).await,
        Command::Db {
            command: DbCommand::Init { db },
        } => cli.main_db_init(db).await,
        Command::Db {
            command: DbCommand::Load { file, db },
        } => cli.main_db_load(&file, db).await,
    }
}

pub struct Cli {
    config: Config,
}

impl Cli {
    fn db_path(&self, db: Option<PathBuf>) -> PathBuf {
        db.unwrap_or_else(|| self.config.database.clone())
    }

    fn show(&self, records: &[TransactionRecord], title: String) -> Result<()> {
        let app = App::new(Session::from_records(records), title);
        tui::run(app, &Theme::from_config(&self.config.view))
    }

    pub fn main_view(&self, file: &Path) -> Result<()> {
        let records = import::load_file(file)
            .with_context(|| anyhow!("Failed to read statement {}", file.display()))?;
        self.show(&records, file.display().to_string())
    }

    pub async fn main_app(&self, db: Option<PathBuf>) -> Result<()> {
        let db_path = self.db_path(db);
        let db = load_existing_db(&db_path).await?;
        let records: Vec<TransactionRecord> = db.records().cloned().collect();
        self.show(&records, aggregate::ROOT_TITLE.to_string())
    }

    pub async fn main_list(&self, source: Source, details: bool) -> Result<()> {
        let records = match (source.file, source.db) {
            (Some(file), _) => import::load_file(&file)
                .with_context(|| anyhow!("Failed to read statement {}", file.display()))?,
            (None, db) => {
                let db = load_existing_db(&self.db_path(db)).await?;
                db.records().cloned().collect()
            }
        };
        let session = list_session(&records, details)?;
        println!("{}", style_header(&format!("{}:", aggregate::ROOT_TITLE)));
        if session.is_empty() {
            println!("{}", style("(none)").italic());
        } else {
            print_rows(&BulletPointPrinter::new_stdout(), session.rows());
        }
        Ok(())
    }

    pub async fn main_db_init(&self, db: Option<PathBuf>) -> Result<()> {
        let db_path = self.db_path(db);
        init_db(&db_path, || {
            terminal::prompt_yes_no(&format!(
                "Database {} already exists. Overwrite it with an empty one?",
                db_path.display()
            ))
        })
        .await?;
        println!("Created database {}", db_path.display());
        Ok(())
    }

    pub async fn main_db_load(&self, file: &Path, db: Option<PathBuf>) -> Result<()> {
        let db_path = self.db_path(db);
        let num_added = import_statement(file, &db_path).await?;
        println!(
            "Added {} transactions to {}",
            style(num_added).bold(),
            db_path.display()
        );
        Ok(())
    }
}

async fn load_existing_db(path: &Path) -> Result<DatabaseV1> {
    db::load(path)
        .await
        .with_context(|| anyhow!("Failed to load database {}", path.display()))?
        .ok_or_else(|| {
            anyhow!(
                "Database file {} not found. Create it with `banking db init`.",
                path.display()
            )
        })
}

/// Writes an empty database to `path`. An existing one is only replaced if `confirm_overwrite`
/// agrees.
async fn init_db(path: &Path, confirm_overwrite: impl FnOnce() -> Result<bool>) -> Result<()> {
    if tokio::fs::try_exists(path).await? && !confirm_overwrite()? {
        bail!("Database {} already exists", path.display());
    }
    db::save(DatabaseV1::new(), path)
        .await
        .context("Failed to save database")
}

/// Adds all transactions of a statement file to the database. If any of them is already in the
/// database, nothing is added.
async fn import_statement(file: &Path, db_path: &Path) -> Result<usize> {
    let records = import::load_file(file)
        .with_context(|| anyhow!("Failed to read statement {}", file.display()))?;
    let mut db = load_existing_db(db_path).await?;

    let duplicates = find_duplicates(&db, &records);
    if duplicates > 0 {
        bail!(
            "{} of {} transactions are already in the database, nothing was imported",
            duplicates,
            records.len()
        );
    }

    let ids = db.add_batch(records)?;
    db::save(db, db_path)
        .await
        .context("Failed to save database")?;
    Ok(ids.len())
}

fn find_duplicates(db: &DatabaseV1, records: &[TransactionRecord]) -> usize {
    let bar = ProgressBar::new(records.len() as u64);
    if let Ok(progress_style) =
        ProgressStyle::with_template("{prefix:.bold} [{bar:40}] {pos}/{len}")
    {
        bar.set_style(progress_style);
    }
    bar.set_prefix("Checking");
    let printer = BulletPointPrinter::new_progress_bar(&bar);
    let mut duplicates = 0;
    for record in records {
        if db.has_transaction(record) {
            printer.print_item(style("Already in database:").red());
            print_record(&printer.indent(), record);
            duplicates += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    duplicates
}

/// The rows the tree view starts with. With `details`, every beneficiary is expanded as if it
/// had been selected.
fn list_session(records: &[TransactionRecord], details: bool) -> Result<Session, TreeError> {
    let mut session = Session::from_records(records);
    if details {
        let beneficiaries: Vec<usize> = session
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.depth == BENEFICIARY_DEPTH)
            .map(|(index, _)| index)
            .collect();
        // Back to front, expanding a row only shifts the rows after it
        for row in beneficiaries.into_iter().rev() {
            session.on_select(row)?;
        }
    }
    Ok(session)
}

fn print_rows<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, rows: &[DisplayRow]) {
    for row in rows {
        let line = if row.depth >= DETAIL_DEPTH {
            format!(
                "{} {}",
                pad_str(&style_amount(&row.total).to_string(), 12, Alignment::Right, None),
                style_detail(row.label())
            )
        } else {
            format!("{} {}", style_group(row.label()), style_amount(&row.total))
        };
        printer.indent_by(row.depth).print_item(line);
    }
}

fn print_record<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, record: &TransactionRecord) {
    printer.print_item(format!(
        "{} {} {} {}",
        style_date(&record.value_date),
        pad_str(
            &style_amount(&format!("{:.2}", record.amount)).to_string(),
            12,
            Alignment::Right,
            None
        ),
        style_group(&record.beneficiary),
        style_detail(&record.purpose),
    ));
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_group(group: &str) -> StyledObject<&str> {
    style(group).cyan().bold()
}

fn style_detail(detail: &str) -> StyledObject<&str> {
    style(detail).italic()
}

fn style_date(date: &chrono::NaiveDate) -> StyledObject<String> {
    style(date.format("%Y-%m-%d").to_string()).magenta()
}

fn style_amount(amount: &str) -> StyledObject<&str> {
    let result = style(amount).bold();
    if amount.starts_with('-') {
        result.red()
    } else {
        result.green()
    }
}
