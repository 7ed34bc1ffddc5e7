//! Command-line driver for the notes controller.
//!
//! # Responsibility
//! - Run one intent against a SQLite-backed blob store and print the list.
//! - Exercise the same load delay, capability gating and write-back paths a
//!   rendering layer would.

use clap::{Parser, Subcommand};
use log::info;
use notenest_core::{
    core_version, default_log_level, init_logging, parse_user_role, search_query_from_url,
    Clock, LogSettings, NotesConfig, NotesController, NotesView, PermissionsProvider,
    SortMode, SqliteBlobStore, SystemClock,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "notenest", version, about = "NoteNest notes list driver")]
struct Cli {
    /// SQLite file holding the blob store. In-memory when omitted.
    #[arg(long)]
    db: Option<PathBuf>,
    /// viewer|editor|admin
    #[arg(long, default_value = "editor")]
    role: String,
    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the filtered, sorted list.
    List {
        #[arg(long, default_value = "newest")]
        sort: SortMode,
        #[arg(long)]
        search: Option<String>,
        /// Query string to take `search` from, e.g. `?search=meeting`.
        #[arg(long, conflicts_with = "search")]
        url_query: Option<String>,
    },
    /// Create a note.
    Add {
        title: String,
        content: Option<String>,
    },
    /// Replace a note's title and content.
    Edit {
        id: i64,
        title: String,
        content: Option<String>,
    },
    /// Delete a note.
    Delete { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        init_logging(&LogSettings::new(default_log_level(), log_dir)?)?;
    }
    info!("event=cli_start module=cli status=ok version={}", core_version());

    let config = match &cli.config {
        Some(path) => NotesConfig::from_file(path)?,
        None => NotesConfig::default(),
    };
    let role = parse_user_role(&cli.role)?;
    let store = match &cli.db {
        Some(path) => SqliteBlobStore::open(path)?,
        None => SqliteBlobStore::open_in_memory()?,
    };

    let mut controller = NotesController::mount(store, SystemClock, &role, config);
    wait_for_load(&mut controller);

    match cli.command {
        Command::List {
            sort,
            search,
            url_query,
        } => {
            let query = search
                .or_else(|| url_query.as_deref().and_then(search_query_from_url))
                .unwrap_or_default();
            controller.set_search_query(query);
            controller.set_sort_mode(sort);
        }
        Command::Add { title, content } => {
            controller.open_create()?;
            fill_and_submit(&mut controller, title, content)?;
        }
        Command::Edit { id, title, content } => {
            controller.open_edit(id)?;
            fill_and_submit(&mut controller, title, content)?;
        }
        Command::Delete { id } => {
            controller.stage_delete(id)?;
            if let Some(removed) = controller.confirm_delete()? {
                println!("Deleted note {}.", removed.id);
            }
        }
    }

    if !role.capabilities().shows_item_actions() {
        println!("Signed in as {}; notes are read-only.", role.as_str());
    }
    print_view(&controller.view());
    controller.teardown();
    Ok(())
}

fn wait_for_load<C: Clock>(controller: &mut NotesController<SqliteBlobStore, C>) {
    while controller.is_loading() {
        if let Some(due) = controller.next_timer_due() {
            let wait = due.saturating_sub(SystemClock.now_ms()).max(0);
            std::thread::sleep(Duration::from_millis(wait.unsigned_abs()));
        }
        controller.tick();
    }
}

fn fill_and_submit<C: Clock>(
    controller: &mut NotesController<SqliteBlobStore, C>,
    title: String,
    content: Option<String>,
) -> Result<(), Box<dyn Error>> {
    controller.set_form_title(title)?;
    controller.set_form_content(content.unwrap_or_default())?;
    let saved = controller.submit_form()?;
    if let Some(message) = controller.view().success_message {
        println!("{message} (id {})", saved.id);
    }
    Ok(())
}

fn print_view(view: &NotesView) {
    if let Some(error) = &view.load_error {
        eprintln!("warning: {error}");
    }
    println!("Sorted by: {}", view.sort_mode.label());
    if view.is_empty_result {
        println!("No results found. Try adjusting your search keywords.");
        return;
    }
    for item in &view.notes {
        println!("[{}] {}", item.note.id, item.note.title);
        println!("    {}", item.created_label);
        println!("    {}", item.content_preview());
    }
}
