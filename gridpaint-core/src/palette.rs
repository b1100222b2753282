use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::grid::{Grid, PaletteIndex};

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// An opaque 8-bit-per-channel color.
///
/// Serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel complement (`255 - c`).
    #[inline]
    pub const fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || CoreError::InvalidPalette {
            reason: format!("'{s}' is not a #rrggbb color"),
        };
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A fixed mapping from palette index to color.
///
/// Index 0 is the background ("empty cell") color and is always present.
/// Lookups of unregistered indices fall back to it instead of failing, so a
/// grid loaded with out-of-palette values still renders.
///
/// Serialized as a JSON object keyed by index: `{"0": "#ffffff", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<PaletteIndex, Rgb>",
    into = "BTreeMap<PaletteIndex, Rgb>"
)]
pub struct Palette {
    entries: BTreeMap<PaletteIndex, Rgb>,
}

impl Palette {
    /// Register a palette.  Fails if no entry for index 0 is given.
    pub fn new(entries: impl IntoIterator<Item = (PaletteIndex, Rgb)>) -> crate::Result<Self> {
        let entries: BTreeMap<_, _> = entries.into_iter().collect();
        if !entries.contains_key(&0) {
            return Err(CoreError::InvalidPalette {
                reason: "index 0 (background) must be registered".into(),
            });
        }
        Ok(Self { entries })
    }

    /// The registered color for `index`, or the background color when the
    /// index has no entry.
    #[inline]
    pub fn color_of(&self, index: PaletteIndex) -> Rgb {
        self.entries
            .get(&index)
            .copied()
            .unwrap_or_else(|| self.background())
    }

    /// Color of index 0.
    #[inline]
    pub fn background(&self) -> Rgb {
        self.entries[&0]
    }

    pub fn contains(&self, index: PaletteIndex) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending index order.
    pub fn entries(&self) -> impl Iterator<Item = (PaletteIndex, Rgb)> + '_ {
        self.entries.iter().map(|(&i, &c)| (i, c))
    }

    /// The index whose color is closest to `color`.
    ///
    /// Entries are scanned in ascending index order and only a strictly
    /// smaller distance replaces the current best, so ties go to the lowest
    /// index.
    pub fn nearest_index(&self, color: Rgb) -> PaletteIndex {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (index, candidate) in self.entries() {
            let d = color.distance_sq(candidate);
            if d < best_dist {
                best = index;
                best_dist = d;
                if d == 0 {
                    break;
                }
            }
        }
        best
    }

    /// Map every registered index to the index nearest its inverted color.
    pub fn inversion_table(&self) -> BTreeMap<PaletteIndex, PaletteIndex> {
        self.entries()
            .map(|(i, c)| (i, self.nearest_index(c.inverted())))
            .collect()
    }
}

impl TryFrom<BTreeMap<PaletteIndex, Rgb>> for Palette {
    type Error = CoreError;

    fn try_from(entries: BTreeMap<PaletteIndex, Rgb>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Palette> for BTreeMap<PaletteIndex, Rgb> {
    fn from(p: Palette) -> Self {
        p.entries
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COLORS
                .iter()
                .enumerate()
                .map(|(i, &(r, g, b))| (i as PaletteIndex, Rgb::new(r, g, b)))
                .collect(),
        }
    }
}

/// Built-in 11-color palette.  Index 0 is white, the canvas background.
const DEFAULT_COLORS: [(u8, u8, u8); 11] = [
    (0xff, 0xff, 0xff),
    (0x00, 0x00, 0x00),
    (0xff, 0x44, 0x44),
    (0xff, 0x88, 0x00),
    (0xff, 0xee, 0x33),
    (0x44, 0xff, 0x44),
    (0x44, 0xdd, 0xff),
    (0x44, 0x88, 0xff),
    (0x99, 0x55, 0xff),
    (0xff, 0x55, 0xdd),
    (0x96, 0x4b, 0x00),
];

// ---------------------------------------------------------------------------
// Grid inversion
// ---------------------------------------------------------------------------

/// Invert every cell's color and snap it back onto the palette.
///
/// This is a palette-constrained approximation of a color negative: applying
/// it twice only restores the original grid when the palette is closed under
/// inversion.  Returns the number of cells whose value changed.
pub fn invert_grid(grid: &mut Grid, palette: &Palette) -> usize {
    let table = palette.inversion_table();
    let unregistered = palette.nearest_index(palette.background().inverted());
    let mut changed = 0;
    for cell in grid.cells_mut() {
        let target = table.get(cell).copied().unwrap_or(unregistered);
        if *cell != target {
            *cell = target;
            changed += 1;
        }
    }
    debug!("Inverted grid: {changed} cells changed");
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bw() -> Palette {
        Palette::new([(0, Rgb::WHITE), (1, Rgb::BLACK)]).unwrap()
    }

    #[test]
    fn invert_color_complements_channels() {
        assert_eq!(Rgb::new(10, 200, 255).inverted(), Rgb::new(245, 55, 0));
        assert_eq!(Rgb::BLACK.inverted(), Rgb::WHITE);
    }

    #[test]
    fn hex_parse_and_format() {
        let c: Rgb = "#1a2B3c".parse().unwrap();
        assert_eq!(c, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(c.to_string(), "#1a2b3c");
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn palette_requires_background() {
        let err = Palette::new([(1, Rgb::BLACK)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPalette { .. }));
    }

    #[test]
    fn unknown_index_falls_back_to_background() {
        let p = bw();
        assert_eq!(p.color_of(1), Rgb::BLACK);
        assert_eq!(p.color_of(42), Rgb::WHITE);
    }

    #[test]
    fn nearest_index_matches_every_entry_exactly() {
        let p = Palette::default();
        for (i, c) in p.entries() {
            assert_eq!(p.nearest_index(p.color_of(i)), i);
            assert_eq!(p.nearest_index(c), i);
        }
    }

    #[test]
    fn nearest_index_breaks_ties_toward_lowest() {
        let p = Palette::new([
            (0, Rgb::new(0, 0, 0)),
            (3, Rgb::new(20, 0, 0)),
            (5, Rgb::new(0, 20, 0)),
        ])
        .unwrap();
        // Equidistant from 3 and 5, further from 0.
        assert_eq!(p.nearest_index(Rgb::new(15, 15, 0)), 3);
    }

    #[test]
    fn invert_black_and_white() {
        let mut g = Grid::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(invert_grid(&mut g, &bw()), 4);
        assert_eq!(g.to_rows(), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn invert_is_not_self_inverse_on_asymmetric_palette() {
        let p = Palette::new([
            (0, Rgb::WHITE),
            (1, Rgb::BLACK),
            (2, Rgb::new(100, 100, 100)),
        ])
        .unwrap();
        let mut g = Grid::from_rows(vec![vec![2]]).unwrap();
        invert_grid(&mut g, &p);
        // (155,155,155) is nearest grey (100) over white (255).
        assert_eq!(g.get(0, 0), Some(2));

        let p = Palette::new([(0, Rgb::WHITE), (1, Rgb::new(200, 200, 200))]).unwrap();
        let mut g = Grid::from_rows(vec![vec![0]]).unwrap();
        invert_grid(&mut g, &p);
        // White inverts to black, which snaps to the light grey; that grey inverts
        // to a dark grey still closer to itself than to white.
        assert_eq!(g.get(0, 0), Some(1));
        invert_grid(&mut g, &p);
        assert_eq!(g.get(0, 0), Some(1));
    }

    #[test]
    fn invert_unregistered_uses_background() {
        let mut g = Grid::from_rows(vec![vec![9]]).unwrap();
        invert_grid(&mut g, &bw());
        assert_eq!(g.get(0, 0), Some(1));
    }

    #[test]
    fn default_palette_inversion() {
        let p = Palette::default();
        assert_eq!(p.len(), 11);
        assert_eq!(p.color_of(10).to_string(), "#964b00");
        let table = p.inversion_table();
        assert_eq!(table[&0], 1);
        assert_eq!(table[&1], 0);
        // Yellow inverts to a deep blue, nearest the light blue at 7.
        assert_eq!(table[&4], 7);
        // Light blue inverts to an olive brown, nearest the brown at 10.
        assert_eq!(table[&7], 10);
    }

    #[test]
    fn palette_json_round_trip() {
        let p = Palette::default();
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"0\":\"#ffffff\""));
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn palette_json_without_background_is_rejected() {
        assert!(serde_json::from_str::<Palette>(r##"{"1": "#000000"}"##).is_err());
    }
}
