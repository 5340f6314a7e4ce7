//! Palettes, lock masks and regeneration
//!
//! A [`Palette`] is always exactly [`PALETTE_SIZE`] colors. Regenerating a
//! palette keeps every locked slot and draws fresh random colors for the rest.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::color::{random_color_with, Color};

/// Number of colors in a palette
pub const PALETTE_SIZE: usize = 5;

/// An ordered set of [`PALETTE_SIZE`] colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette([Color; PALETTE_SIZE]);

impl Palette {
    pub fn new(colors: [Color; PALETTE_SIZE]) -> Self {
        Self(colors)
    }

    /// A fully random palette, used to seed the first generation.
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(std::array::from_fn(|_| random_color_with(rng)))
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Color> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.0.iter()
    }

    /// True when every color is well-formed hex.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(Color::is_valid)
    }
}

impl Index<usize> for Palette {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = Vec<Color>;

    /// Fails with the original vector unless it holds exactly [`PALETTE_SIZE`] colors.
    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        <[Color; PALETTE_SIZE]>::try_from(colors).map(Self)
    }
}

/// Per-slot lock flags, aligned with a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockMask([bool; PALETTE_SIZE]);

impl LockMask {
    /// All slots unlocked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mask with the given slots locked. Returns the first out-of-range index as an error.
    pub fn with_locked(indices: &[usize]) -> Result<Self, usize> {
        let mut mask = Self::new();
        for &index in indices {
            if index >= PALETTE_SIZE {
                return Err(index);
            }
            mask.0[index] = true;
        }
        Ok(mask)
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Flip one slot and return its new state, or `None` if the index is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.0.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Unlock every slot.
    pub fn reset(&mut self) {
        self.0 = [false; PALETTE_SIZE];
    }

    pub fn locked_count(&self) -> usize {
        self.0.iter().filter(|&&locked| locked).count()
    }

    pub fn as_slice(&self) -> &[bool; PALETTE_SIZE] {
        &self.0
    }
}

/// Regenerate a palette, keeping locked slots from `previous`.
pub fn generate(lock_mask: &LockMask, previous: &Palette) -> Palette {
    generate_with(&mut rand::rng(), lock_mask, previous)
}

/// [`generate`] with a caller-supplied RNG.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    lock_mask: &LockMask,
    previous: &Palette,
) -> Palette {
    Palette(std::array::from_fn(|i| {
        if lock_mask.is_locked(i) {
            previous[i].clone()
        } else {
            random_color_with(rng)
        }
    }))
}
