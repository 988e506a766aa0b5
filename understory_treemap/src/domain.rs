// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data domains a tree can describe.
//!
//! A loader for some data source (a directory walk, a table of statistics, ...) builds
//! a [`Tree`](crate::Tree) and tags it with a [`Domain`]. The domain decides only how
//! breadcrumb text is joined; sizes, labels, and layout are the same for every domain.

/// Capability a data domain provides to the core tree.
pub trait Domain {
    /// Text placed after each ancestor label in [`Tree::path_text`](crate::Tree::path_text).
    fn separator(&self) -> &str;
}

/// Files and folders: labels are entry names, sizes are byte counts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FileSystem;

impl Domain for FileSystem {
    fn separator(&self) -> &str {
        "/"
    }
}

/// Flat statistical categories: labels are category names, sizes are magnitudes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Statistical;

impl Domain for Statistical {
    fn separator(&self) -> &str {
        " > "
    }
}
