use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kanban_store::{Board, FileStore, KeyValueStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

mod app;
mod config;
mod logging;
mod ui;

use app::{App, AppEvent};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut data_dir: Option<PathBuf> = None;
    let mut export_path: Option<PathBuf> = None;
    let mut import_path: Option<PathBuf> = None;
    let mut assume_yes = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "--export" | "--import" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires a path argument", args[i]);
                    std::process::exit(1);
                };
                let value = PathBuf::from(value);
                match args[i].as_str() {
                    "--data-dir" => data_dir = Some(value),
                    "--export" => export_path = Some(value),
                    _ => import_path = Some(value),
                }
                i += 2;
            }
            "--yes" | "-y" => {
                assume_yes = true;
                i += 1;
            }
            "--help" | "-h" => {
                println!("Usage: kanban [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --data-dir <DIR>   Directory holding the board and log file");
                println!("  --export <FILE>    Write the board to a JSON file and exit");
                println!("  --import <FILE>    Replace the board with a JSON export and exit");
                println!("  --yes, -y          Do not ask before importing");
                println!("  --help, -h         Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                std::process::exit(1);
            }
        }
    }

    let mut config = Config::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    logging::init(&config.log_path())?;
    tracing::info!(store = %config.store_path().display(), "Starting kanban");

    let storage = FileStore::open(config.store_path())
        .with_context(|| format!("Could not open {}", config.store_path().display()))?;
    let mut board = Board::open(storage)?;
    board.switch_category(&config.category);

    if let Some(path) = export_path {
        let written = export_board(&board, &path)?;
        println!("Exported {} tasks to {}", board.tasks().len(), written.display());
        return Ok(());
    }

    if let Some(path) = import_path {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        if !assume_yes && !confirm("This will replace all current data. Continue?")? {
            println!("Import cancelled");
            return Ok(());
        }
        board.import(&json)?;
        println!(
            "Imported {} tasks and {} ideas",
            board.tasks().len(),
            board.state().ideas.len()
        );
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(board);
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Application error: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Writes the export document. A directory target gets the dated default
/// file name inside it.
fn export_board<S: KeyValueStore>(board: &Board<S>, path: &Path) -> Result<PathBuf> {
    let document = board.export();
    let target = if path.is_dir() {
        path.join(document.file_name())
    } else {
        path.to_path_buf()
    };

    let json = board.export_json()?;
    std::fs::write(&target, json)
        .with_context(|| format!("Could not write {}", target.display()))?;
    tracing::info!(path = %target.display(), "Exported board");
    Ok(target)
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn run_app<B, S>(terminal: &mut Terminal<B>, mut app: App<S>) -> Result<()>
where
    B: ratatui::backend::Backend,
    S: KeyValueStore,
{
    // Create event channel
    let (tx, mut rx) = mpsc::channel::<AppEvent>(100);

    // Spawn input handler
    tokio::spawn(async move {
        loop {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        let _ = tx.send(AppEvent::Key(key)).await;
                    }
                }
            }
            // Send tick events for UI refresh
            if tx.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        match rx.recv().await {
            Some(AppEvent::Key(key)) => {
                if app.handle_key(key)? {
                    return Ok(());
                }
            }
            // Just refresh UI, the day counters move with the clock
            Some(AppEvent::Tick) => {}
            None => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_into_directory_uses_dated_name() {
        let dir = TempDir::new().unwrap();
        let mut board = Board::in_memory();
        board.create_task("work", "waiting").unwrap();

        let written = export_board(&board, dir.path()).unwrap();
        let name = written.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("taskmgr-tasks-"));

        let mut restored = Board::in_memory();
        restored
            .import(&std::fs::read_to_string(&written).unwrap())
            .unwrap();
        assert_eq!(restored.tasks().len(), 1);
    }
}
