//! Text rendering of the grid and detail views

use gallery_core::{GallerySnapshot, Photo};
use std::fmt::Write;

/// Render whichever view the snapshot calls for
pub fn render(snapshot: &GallerySnapshot) -> String {
    match (snapshot.selected_photo(), snapshot.selected_index) {
        (Some(photo), Some(index)) => render_detail(photo, index, snapshot.items.len()),
        _ => render_grid(snapshot),
    }
}

fn favorite_mark(photo: &Photo) -> char {
    if photo.is_favorite() {
        '*'
    } else {
        ' '
    }
}

/// Grid view: one line per photo
pub fn render_grid(snapshot: &GallerySnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Page {} - {} photo(s){}",
        snapshot.current_page + 1,
        snapshot.items.len(),
        if snapshot.is_loading { " (loading...)" } else { "" }
    );

    if snapshot.items.is_empty() && !snapshot.is_loading {
        let _ = writeln!(out, "  No photos. Use `add` or `pick` to import one.");
    }

    for (index, photo) in snapshot.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4} {} {:<24} {}",
            index,
            favorite_mark(photo),
            photo.title(),
            photo.image()
        );
    }
    out
}

/// Detail view: the selected photo full-screen
pub fn render_detail(photo: &Photo, index: usize, total: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}/{}] {} {}", index + 1, total, favorite_mark(photo), photo.title());
    let _ = writeln!(out, "  image:   {}", photo.image());
    if !photo.description().is_empty() {
        let _ = writeln!(out, "  about:   {}", photo.description());
    }
    let _ = writeln!(out, "  added:   {}", photo.created_at().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "  (next / prev / fav / close)");
    out
}
