// clipboard-manager - remembers everything you copy
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use clipboard_manager_lib::{
    config::parse_limit,
    core::{ChangeDetector, Control, History, SystemClipboard, Watcher},
    db::ClipboardEntry,
    logging, ClipError, Config, Database, Result,
};
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> ExitCode {
    // Grab whatever the user typed
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let verbose = args.iter().any(|arg| arg == "--verbose");
    logging::init(verbose);

    let command = &args[1];
    let rest: Vec<String> = args[2..]
        .iter()
        .filter(|arg| *arg != "--verbose")
        .cloned()
        .collect();

    let result = match command.as_str() {
        "watch" => handle_watch(&rest).await,
        "recent" => handle_recent(&rest).await,
        "search" => handle_search(&rest).await,
        "copy" => handle_copy(&rest).await,
        "delete" => handle_delete(&rest).await,
        "clear" => handle_clear(&rest).await,
        "status" => handle_status().await,
        "version" | "-v" | "--version" => {
            println!("clipboard-manager v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn handle_watch(args: &[String]) -> Result<()> {
    let mut config = Config::from_env()?;

    let mut i = 0;
    while i < args.len() {
        if args[i] == "--interval-ms" {
            i += 1;
            match args.get(i).and_then(|s| s.parse::<u64>().ok()) {
                Some(ms) => config = config.poll_interval_ms(ms),
                None => {
                    return Err(ClipError::Config(
                        "--interval-ms needs a number of milliseconds".to_string(),
                    ))
                }
            }
        }
        i += 1;
    }

    // Storage problems at startup are fatal, everything after is not
    let db = Arc::new(get_database(&config).await?);
    let clipboard = SystemClipboard::new()?;
    let detector = ChangeDetector::new(Arc::clone(&db));

    let (tx, rx) = mpsc::channel(8);
    forward_stdin_controls(tx.clone());
    #[cfg(unix)]
    forward_pause_signal(tx)?;

    println!("Watching the clipboard. History: {}", db.path().display());
    println!("Type 'p' + Enter to pause/resume, Ctrl-C to quit.");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    Watcher::new(detector, clipboard, config.poll_interval)
        .run(rx, shutdown)
        .await;

    db.close().await;
    Ok(())
}

// The foreground stand-in for a tray "Pause Monitoring" toggle
fn forward_stdin_controls(tx: mpsc::Sender<Control>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let control = match line.trim() {
                "p" | "toggle" => Control::Toggle,
                "pause" => Control::Pause,
                "resume" => Control::Resume,
                _ => continue,
            };
            if tx.send(control).await.is_err() {
                break;
            }
        }
    });
}

// `kill -USR1 <pid>` toggles pause on a backgrounded watcher
#[cfg(unix)]
fn forward_pause_signal(tx: mpsc::Sender<Control>) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut usr1 = signal(SignalKind::user_defined1())?;
    tokio::spawn(async move {
        while usr1.recv().await.is_some() {
            if tx.send(Control::Toggle).await.is_err() {
                break;
            }
        }
    });

    Ok(())
}

async fn handle_recent(args: &[String]) -> Result<()> {
    let config = Config::from_env()?;
    let json = args.iter().any(|arg| arg == "--json");
    let limit = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(raw) => parse_limit(raw)?,
        None => config.history_limit,
    };

    let history = History::new(Arc::new(get_database(&config).await?));
    let entries = history.recent(limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("History is empty. Copy something while 'clipboard-manager watch' runs!");
    } else {
        println!("\nRecent clipboard entries:");
        print_entries(&entries);
    }

    Ok(())
}

async fn handle_search(args: &[String]) -> Result<()> {
    let json = args.iter().any(|arg| arg == "--json");
    let terms: Vec<&str> = args
        .iter()
        .filter(|arg| *arg != "--json")
        .map(String::as_str)
        .collect();

    if terms.is_empty() {
        eprintln!("Error: No search query provided");
        return Ok(());
    }

    let query = terms.join(" ");
    let config = Config::from_env()?;
    let history = History::new(Arc::new(get_database(&config).await?));
    let results = history.search(&query, config.history_limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No entries found matching '{}'", query);
    } else {
        println!("\nFound {} entr{} matching '{}':", results.len(), plural(results.len()), query);
        print_entries(&results);
    }

    Ok(())
}

async fn handle_copy(args: &[String]) -> Result<()> {
    let Some(id) = parse_id(args) else {
        eprintln!("Error: copy needs an entry id (see 'clipboard-manager recent')");
        return Ok(());
    };

    let config = Config::from_env()?;
    let history = History::new(Arc::new(get_database(&config).await?));
    let mut clipboard = SystemClipboard::new()?;

    // Look the entry up first so a bad id never prints a success line
    let entry = history.get(id).await?;
    if cfg!(target_os = "linux") {
        println!("Copied entry {}. Holding the clipboard until another app takes it...", id);
    }
    history.copy_entry(&entry, &mut clipboard)?;
    if !cfg!(target_os = "linux") {
        println!("Copied entry {} to the clipboard.", id);
    }

    Ok(())
}

async fn handle_delete(args: &[String]) -> Result<()> {
    let Some(id) = parse_id(args) else {
        eprintln!("Error: delete needs an entry id (see 'clipboard-manager recent')");
        return Ok(());
    };

    let config = Config::from_env()?;
    let history = History::new(Arc::new(get_database(&config).await?));

    // Goes by content: identical copies of this entry go too
    let removed = history.delete(id).await?;
    println!("Deleted {} entr{}.", removed, plural(removed as usize));

    Ok(())
}

async fn handle_clear(args: &[String]) -> Result<()> {
    let skip_prompt = args.iter().any(|arg| arg == "--yes" || arg == "-y");

    if !skip_prompt && !confirm("Clear entire history? This cannot be undone. [y/N] ")? {
        println!("Nothing deleted.");
        return Ok(());
    }

    let config = Config::from_env()?;
    let history = History::new(Arc::new(get_database(&config).await?));
    let removed = history.clear().await?;
    println!("History cleared ({} entr{} removed).", removed, plural(removed as usize));

    Ok(())
}

async fn handle_status() -> Result<()> {
    let config = Config::from_env()?;
    let db = get_database(&config).await?;
    let stats = db.stats().await?;

    println!("\nclipboard-manager Status");
    println!("{}", "=".repeat(60));
    println!("  Database:  {}", db.path().display());
    println!("  Entries:   {}", stats.total_entries);
    if let (Some(oldest), Some(newest)) = (&stats.oldest, &stats.newest) {
        println!("  Oldest:    {} UTC", oldest);
        println!("  Newest:    {} UTC", newest);
    }
    println!("  Poll:      every {} ms", config.poll_interval.as_millis());
    println!("{}", "=".repeat(60));

    db.close().await;
    Ok(())
}

async fn get_database(config: &Config) -> Result<Database> {
    Database::new(&config.db_path).await
}

fn print_entries(entries: &[ClipboardEntry]) {
    println!("{}", "=".repeat(60));
    for entry in entries {
        println!("{:>6}  {}  {}", entry.id, entry.time_of_day(), entry.preview());
    }
    println!("{}", "=".repeat(60));
}

fn parse_id(args: &[String]) -> Option<i64> {
    args.first().and_then(|s| s.parse::<i64>().ok())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_usage() {
    println!(
        r#"clipboard-manager v{} - Your clipboard remembers everything

USAGE:
    clipboard-manager <COMMAND> [OPTIONS]

COMMANDS:
    watch [--interval-ms N]    Record clipboard changes until Ctrl-C
    recent [limit] [--json]    Show recent entries (default: 50)
    search <query> [--json]    Find entries containing text (case-sensitive)
    copy <id>                  Put an entry back on the clipboard
    delete <id>                Delete an entry and all identical copies
    clear [--yes]              Delete the whole history
    status                     Show database location and stats
    version                    Show version
    help                       Show this help

OPTIONS:
    --verbose                  Debug logging on stderr

While watching, type 'p' + Enter (or send SIGUSR1) to pause/resume.

History lives in $XDG_DATA_HOME/clipboard-manager/history.db
(~/.local/share/clipboard-manager/history.db when XDG_DATA_HOME is unset).
"#,
        env!("CARGO_PKG_VERSION")
    );
}
