//! Asset catalog - named groups of multi-frame ASCII sprites
//!
//! Each [`Asset`] is a list of frames; a frame is a list of text rows. Fish
//! carry two frames (right-facing first, left-facing second), bubbles a single
//! one-glyph frame. Width and height are derived from the first frame.
//!
//! Frame literals are written as raw strings; leading and trailing blank
//! lines are trimmed so the literal can start on its own line.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::rng::SpawnRng;
use crate::types::{BUBBLE_GROUP, FISH_GROUP};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownGroup(String),
    NoFrames(String),
    EmptyFrame(String),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::UnknownGroup(_) => "unknown_group",
            CatalogError::NoFrames(_) | CatalogError::EmptyFrame(_) => "invalid_asset",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CatalogError::UnknownGroup(_) => "asset group is not registered",
            CatalogError::NoFrames(_) => "asset has no frames",
            CatalogError::EmptyFrame(_) => "asset frame has no rows",
        }
    }

    pub fn group(&self) -> &str {
        match self {
            CatalogError::UnknownGroup(g) | CatalogError::NoFrames(g) | CatalogError::EmptyFrame(g) => g,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (group `{}`)", self.message(), self.group())
    }
}

impl std::error::Error for CatalogError {}

/// One frame of a sprite: rows of characters, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Vec<char>>,
}

impl Frame {
    pub fn parse(src: &str) -> Self {
        let mut rows: Vec<Vec<char>> = src.lines().map(|l| l.chars().collect()).collect();
        while rows.first().is_some_and(|r| is_blank(r)) {
            rows.remove(0);
        }
        while rows.last().is_some_and(|r| is_blank(r)) {
            rows.pop();
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn width(&self) -> i32 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }
}

fn is_blank(row: &[char]) -> bool {
    row.iter().all(|c| c.is_whitespace())
}

/// A named multi-frame sprite definition.
///
/// Cloning is cheap: frames are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    group: Arc<str>,
    frames: Arc<[Frame]>,
    width: i32,
    height: i32,
}

impl Asset {
    pub fn new(group: &str, sources: &[&str]) -> Result<Self, CatalogError> {
        let frames: Vec<Frame> = sources.iter().map(|s| Frame::parse(s)).collect();
        let first = frames
            .first()
            .ok_or_else(|| CatalogError::NoFrames(group.to_string()))?;
        if frames.iter().any(|f| f.rows.is_empty()) {
            return Err(CatalogError::EmptyFrame(group.to_string()));
        }
        let width = first.width();
        let height = first.height();
        Ok(Self {
            group: Arc::from(group),
            frames: frames.into(),
            width,
            height,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

/// Named groups of assets with random selection.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    groups: HashMap<String, Vec<Asset>>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the stock fish and bubble sprites.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for sources in BUILTIN_FISH {
            // Built-in literals always carry rows.
            if let Ok(asset) = Asset::new(FISH_GROUP, sources) {
                catalog.insert(asset);
            }
        }
        for glyph in BUILTIN_BUBBLES {
            if let Ok(asset) = Asset::new(BUBBLE_GROUP, &[glyph]) {
                catalog.insert(asset);
            }
        }
        catalog
    }

    /// Parse and add an asset to `group`.
    pub fn register(&mut self, group: &str, sources: &[&str]) -> Result<(), CatalogError> {
        let asset = Asset::new(group, sources)?;
        self.insert(asset);
        Ok(())
    }

    fn insert(&mut self, asset: Asset) {
        self.groups
            .entry(asset.group().to_string())
            .or_default()
            .push(asset);
    }

    /// Fail unless `group` has at least one asset.
    pub fn require(&self, group: &str) -> Result<(), CatalogError> {
        match self.groups.get(group) {
            Some(assets) if !assets.is_empty() => Ok(()),
            _ => Err(CatalogError::UnknownGroup(group.to_string())),
        }
    }

    pub fn group(&self, group: &str) -> Option<&[Asset]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Uniform random asset from `group`.
    pub fn random(&self, group: &str, rng: &mut SpawnRng) -> Result<Asset, CatalogError> {
        self.groups
            .get(group)
            .and_then(|assets| rng.choose(assets))
            .cloned()
            .ok_or_else(|| CatalogError::UnknownGroup(group.to_string()))
    }
}

const BUILTIN_FISH: &[&[&str]] = &[
    &[
        r"
  __
\/ @\
/\__/
",
        r"
 __
/@ \/
\__/\
",
    ],
    &[
        r"
  ___
\/ CC\
/\__~/
",
        r"
 ___
/CC \/
\~__/\
",
    ],
    &[r">(#)@>", r"<@(#)<"],
    &[
        r#"
       \
     ...\..,
\  /'       \
 >=     (  ' >
/  \      / /
    /"'"'/''
"#,
        r#"
      /
  ,../...
 /       '\  /
< '  )     =<
 \ \      /  \
  ''\'"'"\
"#,
    ],
    &[
        r"
    \
\ /--\
>=  (o>
/ \__/
    /
",
        r"
  /
 /--\ /
<o)  =<
 \__/ \
  \
",
    ],
];

const BUILTIN_BUBBLES: &[&str] = &["*", ".", "o", "O"];
