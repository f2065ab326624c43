//! Interactive loop: read line commands, drive the gallery, re-render

use crate::view;
use anyhow::Result;
use gallery_core::{pick_local_file, GalleryConfig, GalleryError, GalleryHandle, ImageRef, PickerFn};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  ls                 show the grid
  open N             open photo N full-screen
  close              back to the grid
  next | prev        move through photos in the detail view
  fav [N]            toggle favorite (selected photo, or photo N)
  rm N               delete photo N
  add URI [TITLE]    add a photo by content reference
  pick PATH          import an image file
  more               load the next page
  reload             reload the current page
  help               this text
  quit               exit
";

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    List,
    Open(usize),
    Close,
    Next,
    Prev,
    Favorite(Option<usize>),
    Remove(usize),
    Add { uri: String, title: Option<String> },
    Pick(PathBuf),
    More,
    Reload,
    Help,
    Quit,
}

fn parse_index(arg: Option<&str>) -> std::result::Result<usize, String> {
    let arg = arg.ok_or_else(|| "missing photo number".to_string())?;
    arg.parse().map_err(|_| format!("not a photo number: {}", arg))
}

/// Parse a command line. Blank input yields `Ok(None)`.
pub fn parse_input(line: &str) -> std::result::Result<Option<Input>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    let input = match word {
        "" => return Ok(None),
        "ls" | "grid" => Input::List,
        "open" => Input::Open(parse_index(arg)?),
        "close" | "back" => Input::Close,
        "next" | "n" => Input::Next,
        "prev" | "p" => Input::Prev,
        "fav" => Input::Favorite(arg.map(|a| parse_index(Some(a))).transpose()?),
        "rm" | "delete" => Input::Remove(parse_index(arg)?),
        "add" => {
            let arg = arg.ok_or_else(|| "missing image reference".to_string())?;
            let (uri, title) = match arg.split_once(char::is_whitespace) {
                Some((uri, title)) => (uri, Some(title.trim().to_string())),
                None => (arg, None),
            };
            Input::Add {
                uri: uri.to_string(),
                title,
            }
        }
        "pick" => Input::Pick(PathBuf::from(arg.ok_or_else(|| "missing file path".to_string())?)),
        "more" => Input::More,
        "reload" => Input::Reload,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command: {} (try `help`)", other)),
    };
    Ok(Some(input))
}

/// Apply one input. Returns false when the user asked to quit.
async fn execute(gallery: &GalleryHandle, input: Input) -> gallery_core::Result<bool> {
    match input {
        Input::List => gallery.clear_selection().await?,
        Input::Open(index) => gallery.select_photo(index).await?,
        Input::Close => gallery.clear_selection().await?,
        Input::Next => gallery.next_photo().await?,
        Input::Prev => gallery.previous_photo().await?,
        Input::Favorite(Some(index)) => {
            gallery.toggle_favorite(index).await?;
        }
        Input::Favorite(None) => {
            gallery.toggle_favorite_selected().await?;
        }
        Input::Remove(index) => {
            if let Some(photo) = gallery.delete_photo(index).await? {
                println!("Deleted {}", photo.title());
            }
        }
        Input::Add { uri, title } => {
            gallery.add_new_photo(ImageRef::external(uri), title).await?;
        }
        Input::Pick(path) => {
            let picker = PickerFn::new(move || pick_local_file(path.clone()));
            if gallery.import(&picker).await?.is_none() {
                println!("Nothing picked");
            }
        }
        Input::More => {
            gallery.load_next_page().await?;
        }
        Input::Reload => {
            gallery.load().await?;
        }
        Input::Help => print!("{}", HELP),
        Input::Quit => return Ok(false),
    }
    Ok(true)
}

/// Report a failed command. Only fatal errors end the session.
fn report_failure(e: GalleryError) -> Result<()> {
    if e.is_fatal() {
        return Err(e.into());
    }
    tracing::debug!("Command failed: {}", e);
    println!("{}", e.user_message());
    Ok(())
}

/// Print a notice whenever a load starts
fn spawn_loading_notifier(gallery: &GalleryHandle) {
    let mut updates = gallery.subscribe();
    tokio::spawn(async move {
        let mut was_loading = updates.borrow().is_loading;
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.is_loading && !was_loading {
                println!("Loading page {}...", snapshot.current_page + 1);
            }
            was_loading = snapshot.is_loading;
        }
    });
}

/// Run the interactive gallery until `quit` or end of input
pub async fn run(config: GalleryConfig) -> Result<()> {
    let gallery = gallery_core::start(&config);
    spawn_loading_notifier(&gallery);

    if let Err(e) = gallery.load().await {
        println!("{}", e.user_message());
    }
    print!("{}", view::render(&gallery.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_input(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };
        let show = !matches!(input, Input::Help | Input::Quit);

        match execute(&gallery, input).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => report_failure(e)?,
        }

        if show {
            print!("{}", view::render(&gallery.snapshot()));
        }
    }

    gallery.shutdown()?;
    tracing::info!("Photo Gallery exiting");
    Ok(())
}
