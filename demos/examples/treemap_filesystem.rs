// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap over a directory on disk.
//!
//! Walks the directory given on the command line (or the current one), lays it out,
//! and prints the largest files with their breadcrumbs.
//!
//! Run:
//! - `cargo run -p understory_demos --example treemap_filesystem -- <path>`

use std::fs;
use std::io;
use std::path::Path;

use understory_treemap::{FileSystem, PixelRect, RandomColours, Subtree, Tree};

/// Build a subtree for `path`: files become leaves sized in bytes, folders become branches.
fn load(path: &Path) -> io::Result<Subtree> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let meta = fs::symlink_metadata(path)?;
    if !meta.is_dir() {
        return Ok(Subtree::leaf(name, meta.len()));
    }
    let mut entries: Vec<_> = fs::read_dir(path)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());
    let mut children = Vec::with_capacity(entries.len());
    for entry in entries {
        // Unreadable entries are skipped rather than aborting the whole walk.
        if let Ok(child) = load(&entry.path()) {
            children.push(child);
        }
    }
    Ok(Subtree::branch(name, children))
}

fn main() -> io::Result<()> {
    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_owned());
    let subtree = load(Path::new(&root))?;
    let tree = Tree::from_subtree(FileSystem, RandomColours::seeded(148), subtree)
        .map_err(io::Error::other)?;

    let tiles = tree.layout(PixelRect::new(0, 0, 1024, 738));
    let drawable = tiles.iter().filter(|t| !t.rect.is_degenerate()).count();
    println!(
        "{} bytes in {} files ({} large enough to draw)",
        tree.size(tree.root()).unwrap_or(0),
        tiles.len(),
        drawable
    );

    let mut by_area: Vec<_> = tiles.iter().enumerate().collect();
    by_area.sort_by_key(|(_, t)| std::cmp::Reverse(t.rect.area()));
    for (ordinal, tile) in by_area.into_iter().take(10) {
        if let Some(text) = tree
            .node_at_ordinal(ordinal)
            .and_then(|id| tree.selection_text(id))
        {
            println!("{:>8} px  {}", tile.rect.area(), text);
        }
    }
    Ok(())
}
