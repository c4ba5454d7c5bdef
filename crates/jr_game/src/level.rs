//! Level descriptors: character grids turned into typed entity placements.
//!
//! Each character of the grid is one 32px tile. Recognised symbols:
//!
//! | char      | placement                          |
//! |-----------|------------------------------------|
//! | `1`..`3`  | background image for that level    |
//! | `P`       | platform                           |
//! | `F`       | fall trigger                       |
//! | `C`       | coin, offset (+4, +4)              |
//! | `H`       | heart, offset (+4, +4)             |
//! | `J`       | jump pad                           |
//! | `X`       | exit door                          |
//! | `E`       | enemy, offset (0, -13)             |
//!
//! Anything else (spaces, art annotations such as `g`) is skipped so level
//! art can carry markers the simulation does not know about.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const TILE_SIZE: i32 = 32;
const ITEM_OFFSET: i32 = 4;
const ENEMY_Y_OFFSET: i32 = -13;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {0} does not exist")]
    UnknownLevel(u32),
    #[error("level {0} grid is empty")]
    EmptyGrid(u32),
    #[error("level {0} is declared twice in the manifest")]
    DuplicateLevel(u32),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse level manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Pixel position of a placed entity plus its index in grid scan order.
/// The index preserves the authoring order used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundPlacement {
    pub image: u8,
    pub at: Placement,
}

/// Parsed, immutable description of one level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelLayout {
    pub background: Option<BackgroundPlacement>,
    pub platforms: Vec<Placement>,
    pub fall_blocks: Vec<Placement>,
    pub coins: Vec<Placement>,
    pub hearts: Vec<Placement>,
    pub jump_pads: Vec<Placement>,
    pub exit_doors: Vec<Placement>,
    pub enemies: Vec<Placement>,
    pub width: i32,
    pub height: i32,
}

/// Parse a character grid. Rows may differ in length; missing trailing
/// cells count as blanks and the level is as wide as its longest row.
pub fn parse_level_grid(grid: &str) -> LevelLayout {
    let mut layout = LevelLayout::default();
    let mut order = 0u32;
    let mut rows = 0usize;
    let mut columns = 0usize;

    for (row, line) in grid.lines().enumerate() {
        rows = row + 1;
        let line = line.trim_end_matches('\r');
        columns = columns.max(line.chars().count());
        for (col, symbol) in line.chars().enumerate() {
            let x = col as i32 * TILE_SIZE;
            let y = row as i32 * TILE_SIZE;
            let at = |dx: i32, dy: i32| Placement {
                x: x + dx,
                y: y + dy,
                order,
            };
            match symbol {
                '1' | '2' | '3' => {
                    if layout.background.is_none() {
                        layout.background = Some(BackgroundPlacement {
                            image: symbol as u8 - b'0',
                            at: at(0, 0),
                        });
                    }
                }
                'P' => layout.platforms.push(at(0, 0)),
                'F' => layout.fall_blocks.push(at(0, 0)),
                'C' => layout.coins.push(at(ITEM_OFFSET, ITEM_OFFSET)),
                'H' => layout.hearts.push(at(ITEM_OFFSET, ITEM_OFFSET)),
                'J' => layout.jump_pads.push(at(0, 0)),
                'X' => layout.exit_doors.push(at(0, 0)),
                'E' => layout.enemies.push(at(0, ENEMY_Y_OFFSET)),
                _ => continue,
            }
            order += 1;
        }
    }

    layout.width = columns as i32 * TILE_SIZE;
    layout.height = rows as i32 * TILE_SIZE;
    layout
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    levels: Vec<ManifestLevel>,
}

#[derive(Debug, Deserialize)]
struct ManifestLevel {
    number: u32,
    grid: PathBuf,
    spawn: (i32, i32),
}

/// A loaded level: its layout plus the player's spawn centre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    pub layout: LevelLayout,
    pub spawn: (i32, i32),
}

#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: BTreeMap<u32, LevelEntry>,
}

impl LevelCatalog {
    /// Load every level named in a JSON manifest. Grid paths are relative
    /// to the manifest's directory.
    pub fn load(manifest_path: &Path) -> Result<Self, LevelError> {
        let raw = read_file(manifest_path)?;
        let manifest: ManifestFile =
            serde_json::from_str(&raw).map_err(|source| LevelError::Manifest {
                path: manifest_path.to_path_buf(),
                source,
            })?;
        let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

        let mut catalog = Self::default();
        for level in manifest.levels {
            let grid = read_file(&base.join(&level.grid))?;
            catalog.insert(level.number, &grid, level.spawn)?;
        }
        log::info!(
            "Loaded {} levels from {}",
            catalog.len(),
            manifest_path.display()
        );
        Ok(catalog)
    }

    pub fn insert(&mut self, number: u32, grid: &str, spawn: (i32, i32)) -> Result<(), LevelError> {
        let layout = parse_level_grid(grid);
        if layout.width == 0 || layout.height == 0 {
            return Err(LevelError::EmptyGrid(number));
        }
        if self.levels.contains_key(&number) {
            return Err(LevelError::DuplicateLevel(number));
        }
        log::debug!(
            "Level {number}: {}x{} px, {} platforms, {} enemies",
            layout.width,
            layout.height,
            layout.platforms.len(),
            layout.enemies.len()
        );
        self.levels.insert(number, LevelEntry { layout, spawn });
        Ok(())
    }

    pub fn entry(&self, number: u32) -> Result<&LevelEntry, LevelError> {
        self.levels
            .get(&number)
            .ok_or(LevelError::UnknownLevel(number))
    }

    /// Highest level number; completing it completes the game.
    pub fn final_level(&self) -> u32 {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn read_file(path: &Path) -> Result<String, LevelError> {
    fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "jr_level_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn symbols_map_to_offset_placements() {
        let layout = parse_level_grid("P1\n CHE\nJX F");
        assert_eq!(
            layout.background.map(|b| (b.image, b.at.x, b.at.y)),
            Some((1, 32, 0))
        );
        assert_eq!(layout.platforms.len(), 1);
        assert_eq!((layout.coins[0].x, layout.coins[0].y), (36, 36));
        assert_eq!((layout.hearts[0].x, layout.hearts[0].y), (68, 36));
        assert_eq!((layout.enemies[0].x, layout.enemies[0].y), (96, 32 - 13));
        assert_eq!((layout.jump_pads[0].x, layout.jump_pads[0].y), (0, 64));
        assert_eq!((layout.exit_doors[0].x, layout.exit_doors[0].y), (32, 64));
        assert_eq!((layout.fall_blocks[0].x, layout.fall_blocks[0].y), (96, 64));
    }

    #[test]
    fn ragged_rows_use_longest_row_for_width() {
        let layout = parse_level_grid("PPPP\nP\nPP");
        assert_eq!(layout.width, 4 * 32);
        assert_eq!(layout.height, 3 * 32);
        assert_eq!(layout.platforms.len(), 7);
    }

    #[test]
    fn unknown_symbols_are_ignored() {
        let layout = parse_level_grid("Pgg#\nggZ?");
        assert_eq!(layout.platforms.len(), 1);
        assert!(layout.coins.is_empty());
        assert!(layout.enemies.is_empty());
        assert_eq!(layout.width, 128);
    }

    #[test]
    fn placement_order_follows_scan_order() {
        let layout = parse_level_grid("C X\nH C");
        assert_eq!(layout.coins[0].order, 0);
        assert_eq!(layout.exit_doors[0].order, 1);
        assert_eq!(layout.hearts[0].order, 2);
        assert_eq!(layout.coins[1].order, 3);
    }

    #[test]
    fn parsing_is_deterministic() {
        let grid = "P1   P\nP  CE P\nPPPPPP";
        assert_eq!(parse_level_grid(grid), parse_level_grid(grid));
    }

    #[test]
    fn unknown_level_number_is_an_error() {
        let mut catalog = LevelCatalog::default();
        catalog.insert(1, "PPP", (10, 10)).expect("insert level");
        assert!(matches!(catalog.entry(4), Err(LevelError::UnknownLevel(4))));
        assert_eq!(catalog.final_level(), 1);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let mut catalog = LevelCatalog::default();
        assert!(matches!(
            catalog.insert(1, "", (0, 0)),
            Err(LevelError::EmptyGrid(1))
        ));
    }

    #[test]
    fn manifest_loads_relative_grids() {
        let dir = temp_dir("manifest");
        fs::write(dir.join("a.txt"), "PPPP\nP  P\nPPPP").expect("write grid");
        fs::write(dir.join("b.txt"), "PPPPPP\nP C EP\nPPPPPP").expect("write grid");
        fs::write(
            dir.join("levels.json"),
            r#"{ "levels": [
                { "number": 1, "grid": "a.txt", "spawn": [40, 40] },
                { "number": 2, "grid": "b.txt", "spawn": [50, 40] }
            ] }"#,
        )
        .expect("write manifest");

        let catalog = LevelCatalog::load(&dir.join("levels.json")).expect("manifest should load");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.final_level(), 2);
        let second = catalog.entry(2).expect("level 2");
        assert_eq!(second.spawn, (50, 40));
        assert_eq!(second.layout.coins.len(), 1);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn manifest_with_missing_grid_fails() {
        let dir = temp_dir("missing_grid");
        fs::write(
            dir.join("levels.json"),
            r#"{ "levels": [ { "number": 1, "grid": "nope.txt", "spawn": [0, 0] } ] }"#,
        )
        .expect("write manifest");

        let err = LevelCatalog::load(&dir.join("levels.json")).expect_err("should fail");
        assert!(matches!(err, LevelError::Io { .. }));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn shipped_levels_parse() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/levels/levels.json");
        let catalog = LevelCatalog::load(&manifest).expect("shipped levels should load");
        assert_eq!(catalog.final_level(), 3);
        for number in 1..=3 {
            let entry = catalog.entry(number).expect("level present");
            assert_eq!(
                entry.layout.background.map(|b| u32::from(b.image)),
                Some(number)
            );
            assert_eq!(entry.layout.exit_doors.len(), 1);
            assert!(!entry.layout.enemies.is_empty());
        }
        assert_eq!(catalog.entry(1).expect("level 1").layout.width, 70 * 32);
    }
}
