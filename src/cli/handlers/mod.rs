mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, BoardError};
use crate::model::board::Board;
use crate::store::StoreError;

/// Global override for the board directory (set by -C flag)
static BOARD_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_board_cwd()
    if let Some(ref dir) = cli.board_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        BOARD_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        None => {
            eprintln!("no subcommand (try `pm --help`)");
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before board discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::List => cmd_list(json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Search(args) => cmd_search(args, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, json),
            Commands::Delete(args) => cmd_delete(args),
            Commands::Clear(args) => cmd_clear(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_board_cwd() -> Result<Board, BoardError> {
    let start = match BOARD_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(BoardError::IoError)?,
    };
    let root = board_io::discover_board(&start)?;
    let board = board_io::load_board(&root)?;
    if let Some(ref warning) = board.storage_warning {
        eprintln!("warning: {} (continuing with an empty board)", warning);
    }
    Ok(board)
}

fn save_or_warn(board: &Board) -> Result<(), Box<dyn std::error::Error>> {
    board_io::save_pins(board).map_err(|e| format!("pins not saved: {}", e).into())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = load_board_cwd()?;
    let pins = board.store.list();

    if json {
        let out = PinListJson {
            count: pins.len(),
            pins,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("== {} ({} pins) ==", board.config.board.name, pins.len());
    for pin in pins {
        println!("{}", format_pin_line(pin));
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = load_board_cwd()?;
    let pin = board
        .store
        .get(&args.id)
        .ok_or_else(|| StoreError::NotFound(args.id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(pin)?);
        return Ok(());
    }
    for line in format_pin_detail(pin) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = load_board_cwd()?;
    let hits = board.store.search(&args.term);

    if json {
        let out = PinListJson {
            count: hits.len(),
            pins: hits,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("no pins match \"{}\"", args.term);
        return Ok(());
    }
    for pin in hits {
        println!("{}", format_pin_line(pin));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = load_board_cwd()?;

    let id = board.store.create(args.lat, args.lng);
    if let Err(e) = board.store.confirm(&id, &args.title, &args.description) {
        // Leave no draft behind on validation failure
        board.store.discard_draft(&id);
        return Err(e.into());
    }
    save_or_warn(&board)?;

    let pin = board
        .store
        .get(&id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(pin)?);
    } else {
        println!("added {}", format_pin_line(pin));
    }
    Ok(())
}

fn cmd_delete(args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.yes {
        return Err("refusing to delete without --yes".into());
    }
    let mut board = load_board_cwd()?;

    for id in &args.ids {
        let pin = board.store.delete(id)?;
        println!("deleted \"{}\"", pin.title);
    }
    save_or_warn(&board)
}

fn cmd_clear(args: ClearArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.yes {
        return Err("refusing to clear without --yes".into());
    }
    let mut board = load_board_cwd()?;
    let count = board.store.count();
    board.store.clear();
    save_or_warn(&board)?;
    println!("cleared {} pins", count);
    Ok(())
}
