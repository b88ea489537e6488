//! Sprite catalog resource.
//!
//! Holds the fixed list of sprite sheet regions the tumbling block can take
//! and the sound table used when a rotation starts. The catalog is loaded once
//! at startup and never changes afterwards.
//!
//! # File Format
//!
//! ```json
//! {
//!   "regions": [
//!     { "x": 0, "y": 0, "width": 13, "height": 13, "sound": 0 },
//!     { "x": 13, "y": 0, "width": 9, "height": 9, "sound": 1 }
//!   ],
//!   "sounds": [
//!     { "id": 0, "path": "assets/sounds/0.wav" }
//!   ]
//! }
//! ```

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TumbleError};

/// Rectangle of the sprite sheet plus the sound it plays when tumbling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteRegion {
    /// Left edge in the sprite sheet.
    pub x: i32,
    /// Top edge in the sprite sheet.
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Sound played when a rotation starts.
    pub sound: u32,
}

impl SpriteRegion {
    pub const fn new(x: i32, y: i32, width: u32, height: u32, sound: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            sound,
        }
    }
}

/// Sound file referenced by [`SpriteRegion::sound`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundEntry {
    pub id: u32,
    pub path: String,
}

/// On-disk shape of the catalog, validated into [`SpriteCatalog`].
#[derive(Debug, Deserialize)]
struct CatalogFile {
    regions: Vec<SpriteRegion>,
    #[serde(default)]
    sounds: Vec<SoundEntry>,
}

impl TryFrom<CatalogFile> for SpriteCatalog {
    type Error = TumbleError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        SpriteCatalog::with_sounds(file.regions, file.sounds)
    }
}

/// Non-empty list of sprite regions.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile")]
pub struct SpriteCatalog {
    regions: Vec<SpriteRegion>,
    sounds: Vec<SoundEntry>,
}

/// Regions of the bundled sprite sheet.
const DEFAULT_REGIONS: [SpriteRegion; 6] = [
    SpriteRegion::new(0, 0, 13, 13, 0),
    SpriteRegion::new(13, 0, 9, 9, 1),
    SpriteRegion::new(22, 0, 11, 19, 2),
    SpriteRegion::new(33, 0, 9, 15, 3),
    SpriteRegion::new(42, 0, 13, 11, 4),
    SpriteRegion::new(55, 0, 15, 15, 5),
];

impl Default for SpriteCatalog {
    fn default() -> Self {
        let sounds = DEFAULT_REGIONS
            .iter()
            .map(|r| SoundEntry {
                id: r.sound,
                path: format!("assets/sounds/{}.wav", r.sound),
            })
            .collect();
        Self {
            regions: DEFAULT_REGIONS.to_vec(),
            sounds,
        }
    }
}

impl SpriteCatalog {
    /// Catalog without sounds.
    pub fn new(regions: Vec<SpriteRegion>) -> Result<Self> {
        Self::with_sounds(regions, Vec::new())
    }

    /// Catalog with a sound table.
    ///
    /// Fails if there are no regions or a region has zero width or height.
    pub fn with_sounds(regions: Vec<SpriteRegion>, sounds: Vec<SoundEntry>) -> Result<Self> {
        if regions.is_empty() {
            return Err(TumbleError::EmptyCatalog);
        }
        if let Some((index, r)) = regions
            .iter()
            .enumerate()
            .find(|(_, r)| r.width == 0 || r.height == 0)
        {
            return Err(TumbleError::DegenerateRegion {
                index,
                width: r.width,
                height: r.height,
            });
        }
        Ok(Self { regions, sounds })
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(text)?;
        file.try_into()
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TumbleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text)?;
        info!(
            "Loaded sprite catalog {:?}: {} regions, {} sounds",
            path,
            catalog.len(),
            catalog.sounds.len()
        );
        Ok(catalog)
    }

    pub fn regions(&self) -> &[SpriteRegion] {
        &self.regions
    }

    pub fn sounds(&self) -> &[SoundEntry] {
        &self.sounds
    }

    /// Region at `index`, wrapping around the catalog length.
    pub fn get_wrapped(&self, index: usize) -> SpriteRegion {
        self.regions[index % self.regions.len()]
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always `false`; kept for symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn contains(&self, region: &SpriteRegion) -> bool {
        self.regions.contains(region)
    }
}

/// Audio id under which a sound is loaded and played.
pub fn sound_key(sound: u32) -> String {
    format!("sound{sound}")
}
