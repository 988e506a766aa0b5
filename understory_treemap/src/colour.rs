// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colour sources used when nodes are created.
//!
//! Every node draws exactly one colour at construction and keeps it for life.
//! The source is handed to the tree by the caller, so tests and golden renders can
//! use a seeded or fixed source instead of process-wide randomness.

use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::types::Rgb;

/// Supplies the colour of each newly constructed node.
pub trait ColourSource {
    /// Produce the colour for the next node.
    fn next_colour(&mut self) -> Rgb;
}

/// Uniformly random colours drawn from any `rand` generator.
#[derive(Clone, Debug)]
pub struct RandomColours<R> {
    rng: R,
}

impl<R: RngCore> RandomColours<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomColours<SmallRng> {
    /// A deterministic source: the same seed always yields the same colour sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> ColourSource for RandomColours<R> {
    fn next_colour(&mut self) -> Rgb {
        let [r, g, b, _] = self.rng.next_u32().to_le_bytes();
        Rgb::new(r, g, b)
    }
}

/// Cycles through a fixed list of colours.
///
/// An empty palette yields black for every node.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    colours: Vec<Rgb>,
    next: usize,
}

impl Palette {
    /// Create a palette that hands out `colours` in order, wrapping around.
    pub fn new(colours: impl Into<Vec<Rgb>>) -> Self {
        Self {
            colours: colours.into(),
            next: 0,
        }
    }
}

impl ColourSource for Palette {
    fn next_colour(&mut self) -> Rgb {
        if self.colours.is_empty() {
            return Rgb::default();
        }
        let colour = self.colours[self.next % self.colours.len()];
        self.next = self.next.wrapping_add(1);
        colour
    }
}
