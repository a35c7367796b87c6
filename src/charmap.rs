//! Per-game character remapping
//!
//! Game text is stored as 8-bit codes, not ASCII. Localized releases put
//! accented letters at codes the font does not have, so every character is
//! passed through a remapping table before it is measured or drawn.

use std::fmt;

/// Code reserved for "draw nothing"
pub const INVISIBLE: u8 = 255;

/// A 256-entry byte translation table
#[derive(Clone, PartialEq, Eq)]
pub struct CharMap {
    table: [u8; 256],
}

impl CharMap {
    /// Map every code to itself
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        CharMap { table }
    }

    /// Build a table from an arbitrary pure function
    pub fn from_fn(f: impl Fn(u8) -> u8) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = f(i as u8);
        }
        CharMap { table }
    }

    /// Identity table with the given overrides applied
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Self {
        let mut map = Self::identity();
        for &(from, to) in pairs {
            map.set(from, to);
        }
        map
    }

    pub fn set(&mut self, from: u8, to: u8) {
        self.table[from as usize] = to;
    }

    #[inline]
    pub fn remap(&self, c: u8) -> u8 {
        self.table[c as usize]
    }
}

impl Default for CharMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for CharMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let changed: Vec<(u8, u8)> = (0..=255u8)
            .filter(|&c| self.remap(c) != c)
            .map(|c| (c, self.remap(c)))
            .collect();
        f.debug_struct("CharMap").field("overrides", &changed).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn identity_leaves_codes_alone() {
        let map = CharMap::identity();
        assert_eq!(map.remap(b'a'), b'a');
        assert_eq!(map.remap(0), 0);
        assert_eq!(map.remap(INVISIBLE), INVISIBLE);
    }

    #[test]
    fn overrides_apply() {
        // German release: code 129 is drawn with the glyph stored at '{'
        let map = CharMap::from_pairs(&[(129, b'{'), (b'#', INVISIBLE)]);
        assert_eq!(map.remap(129), b'{');
        assert_eq!(map.remap(b'#'), INVISIBLE);
        assert_eq!(map.remap(b'b'), b'b');
    }

    #[test]
    fn from_fn_matches_closure() {
        let map = CharMap::from_fn(|c| c.to_ascii_uppercase());
        assert_eq!(map.remap(b'q'), b'Q');
        assert_eq!(map.remap(b'7'), b'7');
    }
}
