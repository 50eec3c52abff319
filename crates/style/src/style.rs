//! Style file: board layout and theme colors as JSON.
//!
//! Every field is optional. Anything left out keeps its built-in default, so an
//! empty object is a valid style.
//!
//! ```json
//! {
//!   "layout": { "pos_x": 4, "tile_width": 10, "anim_seconds": 0.15 },
//!   "colors": { "tile_one": { "fg": "white", "bg": "blue" } }
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, StyleError};
use threes_types::{Color, Layout, Palette, Theme};

/// Resolved layout and theme.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub layout: Layout,
    pub theme: Theme,
}

impl Style {
    pub fn from_json(text: &str) -> Result<Self> {
        let file: StyleFile = serde_json::from_str(text)?;
        file.resolve()
    }

    pub fn into_parts(self) -> (Layout, Theme) {
        (self.layout, self.theme)
    }
}

/// Read and resolve the style file at `path`.
pub fn load_style(path: &Path) -> Result<Style> {
    let text = fs::read_to_string(path).map_err(|source| StyleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let style = Style::from_json(&text)?;
    info!(path = %path.display(), "style loaded");
    Ok(style)
}

/// Like [`load_style`], but a missing file yields the built-in style.
pub fn load_style_or_default(path: &Path) -> Result<Style> {
    match load_style(path) {
        Err(StyleError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no style file, using defaults");
            Ok(Style::default())
        }
        other => other,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StyleFile {
    layout: LayoutFile,
    colors: ColorsFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LayoutFile {
    pos_x: Option<i32>,
    pos_y: Option<i32>,
    tile_width: Option<i32>,
    tile_height: Option<i32>,
    tile_spacing: Option<i32>,
    anim_seconds: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ColorsFile {
    board_lines: Option<ColorPair>,
    board_background: Option<ColorPair>,
    tile_one: Option<ColorPair>,
    tile_two: Option<ColorPair>,
    tile: Option<ColorPair>,
    header: Option<ColorPair>,
    status_bar: Option<ColorPair>,
    panel: Option<ColorPair>,
    panel_header: Option<ColorPair>,
}

/// A missing half keeps the default's foreground or background.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ColorPair {
    fg: Option<String>,
    bg: Option<String>,
}

fn palette(name: &str) -> Result<Palette> {
    Palette::from_name(name).ok_or_else(|| StyleError::UnknownColor(name.to_string()))
}

impl ColorPair {
    fn apply(&self, base: Color) -> Result<Color> {
        let fg = self.fg.as_deref().map(palette).transpose()?.unwrap_or(base.fg());
        let bg = self.bg.as_deref().map(palette).transpose()?.unwrap_or(base.bg());
        Ok(Color::new(fg, bg))
    }
}

fn apply(pair: &Option<ColorPair>, slot: &mut Color) -> Result<()> {
    if let Some(pair) = pair {
        *slot = pair.apply(*slot)?;
    }
    Ok(())
}

impl StyleFile {
    fn resolve(self) -> Result<Style> {
        let mut layout = Layout::default();
        let l = self.layout;
        layout.pos_x = l.pos_x.unwrap_or(layout.pos_x);
        layout.pos_y = l.pos_y.unwrap_or(layout.pos_y);
        layout.tile_width = l.tile_width.unwrap_or(layout.tile_width).max(1);
        layout.tile_height = l.tile_height.unwrap_or(layout.tile_height).max(1);
        layout.tile_spacing = l.tile_spacing.unwrap_or(layout.tile_spacing).max(0);
        layout.anim_seconds = l.anim_seconds.unwrap_or(layout.anim_seconds).max(0.0);

        let mut theme = Theme::default();
        let c = &self.colors;
        apply(&c.board_lines, &mut theme.board_lines)?;
        apply(&c.board_background, &mut theme.board_background)?;
        apply(&c.tile_one, &mut theme.tile_one)?;
        apply(&c.tile_two, &mut theme.tile_two)?;
        apply(&c.tile, &mut theme.tile)?;
        apply(&c.header, &mut theme.header)?;
        apply(&c.status_bar, &mut theme.status_bar)?;
        apply(&c.panel, &mut theme.panel)?;
        apply(&c.panel_header, &mut theme.panel_header)?;

        Ok(Style { layout, theme })
    }
}
