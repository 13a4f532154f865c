//! Scripted editor sessions loaded from TOML or JSON
//!
//! ```toml
//! [[step]]
//! action = "polygon"
//! points = [[10, 10], [190, 10], [190, 190], [10, 190]]
//! filled = true
//!
//! [[step]]
//! action = "pentagon"
//! center = [100, 100]
//! radius = 40
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::domain::{FillMode, Point};
use crate::editor::Editor;

/// One editor action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Draw a polygon vertex by vertex and close it
    Polygon {
        points: Vec<[i32; 2]>,
        #[serde(default)]
        snap: bool,
        #[serde(default)]
        filled: bool,
        #[serde(default)]
        fill_mode: Option<FillMode>,
    },
    /// Clip every polygon with a regular pentagon
    Pentagon { center: [i32; 2], radius: i32 },
    /// Subtract the polygon under `clipper` from the one under `subject`
    Clip { subject: [i32; 2], clipper: [i32; 2] },
    Fill { at: [i32; 2] },
    SetFillMode { at: [i32; 2], mode: FillMode },
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scene {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scene {
    /// Read a scene file; `.json` files are parsed as JSON, anything else as TOML
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON scene: {}", path.display()))
        } else {
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML scene: {}", path.display()))
        }
    }

    /// Run every step against `editor`, stopping at the first failure
    pub fn apply(&self, editor: &mut Editor) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            apply_step(editor, step)
                .with_context(|| format!("Scene step {} ({:?}) failed", i + 1, step))?;
        }
        Ok(())
    }
}

fn apply_step(editor: &mut Editor, step: &Step) -> Result<()> {
    match step {
        Step::Polygon {
            points,
            snap,
            filled,
            fill_mode,
        } => {
            for &p in points {
                editor.add_vertex(p.into(), *snap)?;
            }
            let index = editor.finish_polygon()?;
            if let Some(mode) = fill_mode {
                editor.set_fill_mode(index, *mode);
            }
            if *filled {
                editor.fill(index);
            }
        }
        Step::Pentagon { center, radius } => {
            let report = editor.clip_with_pentagon(Point::from(*center), *radius)?;
            tracing::debug!(?report, "pentagon step");
        }
        Step::Clip { subject, clipper } => {
            editor.clip(Point::from(*subject), Point::from(*clipper))?;
        }
        Step::Fill { at } => {
            editor.fill_at(Point::from(*at));
        }
        Step::SetFillMode { at, mode } => {
            if editor.set_fill_mode_at(Point::from(*at), *mode).is_none() {
                tracing::warn!(x = at[0], y = at[1], "no polygon to change fill mode of");
            }
        }
        Step::Clear => editor.clear(),
    }
    Ok(())
}
