//! Drawing session: the canvas, the finished polygons and the one in progress

use serde::{Deserialize, Serialize};

use crate::clip::{self, Containment};
use crate::domain::{FillMode, InvalidShapeError, Point, Polygon, regular_pentagon};
use crate::fill::{fill_area, scanline_fill, seed_fill};
use crate::geometry::{aligned_point, seed_point};
use crate::raster::{Color, PixelSurface, draw_outline, rasterize_line};

fn default_background() -> Color {
    0x000000
}
fn default_boundary() -> Color {
    0xFFFFFF
}
fn default_fill() -> Color {
    0x00FF00
}
fn default_preview() -> Color {
    0x00FF00
}

/// Colors the editor paints with, as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_boundary")]
    pub boundary: Color,
    #[serde(default = "default_fill")]
    pub fill: Color,
    #[serde(default = "default_preview")]
    pub preview: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: default_background(),
            boundary: default_boundary(),
            fill: default_fill(),
            preview: default_preview(),
        }
    }
}

/// What a shape clip did to the polygon collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClipReport {
    /// Polygons that took the clipper as a new hole
    pub holes_added: usize,
    /// Polygons replaced by their fragments
    pub clipped: usize,
    /// Fragments inserted in place of clipped polygons
    pub fragments: usize,
    /// Polygons the clipper did not share any area with
    pub untouched: usize,
}

pub struct Editor {
    surface: PixelSurface,
    palette: Palette,
    polygons: Vec<Polygon>,
    current: Polygon,
    default_fill_mode: FillMode,
}

impl Editor {
    pub fn new(width: usize, height: usize, palette: Palette) -> Self {
        Self {
            surface: PixelSurface::new(width, height, palette.background),
            palette,
            polygons: Vec::new(),
            current: Polygon::new(),
            default_fill_mode: FillMode::default(),
        }
    }

    /// Fill mode given to every polygon finished from now on
    pub fn with_default_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.default_fill_mode = fill_mode;
        self
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The polygon being drawn; empty when none is in progress
    pub fn current(&self) -> &Polygon {
        &self.current
    }

    /// Append a vertex to the polygon in progress and draw the new edge.
    ///
    /// With `snap`, the point is first aligned to the nearest 45 degree
    /// direction from the previous vertex. Returns the vertex as stored.
    pub fn add_vertex(&mut self, point: Point, snap: bool) -> Result<Point, InvalidShapeError> {
        let previous = self.current.vertices().last().copied();
        let point = match previous {
            Some(from) if snap => aligned_point(from, point),
            _ => point,
        };

        self.current.add_vertex(point)?;

        match previous {
            Some(from) => rasterize_line(&mut self.surface, from, point, self.palette.boundary),
            None => self.surface.set(point.x, point.y, self.palette.boundary),
        }
        Ok(point)
    }

    /// Close the polygon in progress and move it into the collection.
    ///
    /// Returns its index. With fewer than 3 vertices the polygon stays in
    /// progress and the error is returned.
    pub fn finish_polygon(&mut self) -> Result<usize, InvalidShapeError> {
        self.current.close()?;

        let mut polygon = std::mem::take(&mut self.current);
        polygon.set_fill_mode(self.default_fill_mode);
        tracing::debug!(vertices = polygon.vertices().len(), "polygon finished");

        self.polygons.push(polygon);
        self.redraw();
        Ok(self.polygons.len() - 1)
    }

    /// Index of the first polygon whose outer boundary contains `point`
    pub fn polygon_at(&self, point: Point) -> Option<usize> {
        let (x, y) = point.to_f64();
        self.polygons.iter().position(|p| p.contains(x, y))
    }

    /// Mark the polygon filled and paint it
    pub fn fill(&mut self, index: usize) {
        let Some(polygon) = self.polygons.get_mut(index) else {
            return;
        };
        polygon.set_filled(true);
        tracing::info!(index, fill_mode = ?polygon.fill_mode(), "polygon filled");
        self.redraw();
    }

    /// Fill whichever polygon `point` hits. Returns the index filled.
    pub fn fill_at(&mut self, point: Point) -> Option<usize> {
        let index = self.polygon_at(point);
        match index {
            Some(i) => self.fill(i),
            None => tracing::warn!(x = point.x, y = point.y, "no polygon to fill"),
        }
        index
    }

    pub fn set_fill_mode(&mut self, index: usize, fill_mode: FillMode) {
        let Some(polygon) = self.polygons.get_mut(index) else {
            return;
        };
        polygon.set_fill_mode(fill_mode);
        if polygon.is_filled() {
            self.redraw();
        }
    }

    pub fn set_fill_mode_at(&mut self, point: Point, fill_mode: FillMode) -> Option<usize> {
        let index = self.polygon_at(point)?;
        self.set_fill_mode(index, fill_mode);
        Some(index)
    }

    /// Subtract the polygon under `clipper_point` from the one under
    /// `subject_point`.
    ///
    /// The subject is removed and its fragments appended to the collection.
    /// Returns the fragment count, or `None` when the two points do not pick
    /// two different polygons.
    pub fn clip(
        &mut self,
        subject_point: Point,
        clipper_point: Point,
    ) -> Result<Option<usize>, InvalidShapeError> {
        let (Some(subject), Some(clipper)) =
            (self.polygon_at(subject_point), self.polygon_at(clipper_point))
        else {
            tracing::warn!("clip needs a subject and a clipper polygon");
            return Ok(None);
        };
        if subject == clipper {
            tracing::warn!(index = subject, "subject and clipper are the same polygon");
            return Ok(None);
        }

        let fragments = clip::subtract(&self.polygons[subject], &self.polygons[clipper])?;
        let count = fragments.len();
        if count == 0 {
            tracing::info!(index = subject, "clip consumed the subject polygon");
        } else {
            tracing::info!(index = subject, fragments = count, "clip replaced the subject polygon");
        }

        self.polygons.remove(subject);
        self.polygons.extend(fragments);
        self.redraw();
        Ok(Some(count))
    }

    /// Clip every polygon with a regular pentagon
    pub fn clip_with_pentagon(
        &mut self,
        center: Point,
        radius: i32,
    ) -> Result<ClipReport, InvalidShapeError> {
        if radius <= 0 {
            return Err(InvalidShapeError::NonPositiveRadius { radius });
        }
        self.clip_with_shape(regular_pentagon(center, radius))
    }

    /// Clip every polygon with `clipper`.
    ///
    /// A polygon that holds the clipper cleanly inside gains it as a hole;
    /// one it overlaps is replaced by the fragments left after subtraction;
    /// the rest are untouched. On error the collection is left as it was.
    pub fn clip_with_shape(&mut self, clipper: Polygon) -> Result<ClipReport, InvalidShapeError> {
        let clipper = if clipper.is_closed() {
            clipper
        } else {
            Polygon::closed(clipper.vertices().to_vec())?
        };

        let relations = self
            .polygons
            .iter()
            .map(|polygon| clip::classify_containment(&clipper, polygon))
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = ClipReport::default();
        let mut kept = Vec::with_capacity(self.polygons.len());
        let mut added = Vec::new();

        for (polygon, relation) in self.polygons.iter().zip(relations) {
            match relation {
                Containment::ContainedNotTouching => {
                    let mut polygon = polygon.clone();
                    polygon.add_hole(clipper.clone())?;
                    report.holes_added += 1;
                    kept.push(polygon);
                }
                Containment::Overlapping => {
                    let fragments = clip::subtract(polygon, &clipper)?;
                    report.clipped += 1;
                    report.fragments += fragments.len();
                    added.extend(fragments);
                }
                Containment::Disjoint => {
                    report.untouched += 1;
                    kept.push(polygon.clone());
                }
            }
        }

        kept.extend(added);
        self.polygons = kept;
        tracing::info!(
            holes = report.holes_added,
            clipped = report.clipped,
            fragments = report.fragments,
            "shape clip applied"
        );

        self.redraw();
        Ok(report)
    }

    /// Repaint the whole canvas from the polygon collection
    pub fn redraw(&mut self) {
        let palette = self.palette;
        self.surface.clear(palette.background);

        for polygon in &self.polygons {
            draw_outline(&mut self.surface, polygon, palette.boundary);
            for hole in polygon.holes() {
                draw_outline(&mut self.surface, hole, palette.boundary);
            }
        }

        for polygon in self.polygons.iter().filter(|p| p.is_filled()) {
            paint(&mut self.surface, polygon, palette);
        }

        draw_outline(&mut self.surface, &self.current, palette.boundary);
    }

    /// Redraw, then preview the edges the cursor would close the polygon
    /// in progress with
    pub fn draw_rubber_band(&mut self, cursor: Point) {
        self.redraw();

        let vertices = self.current.vertices();
        let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) else {
            return;
        };

        rasterize_line(&mut self.surface, last, cursor, self.palette.preview);
        if vertices.len() > 1 {
            rasterize_line(&mut self.surface, first, cursor, self.palette.preview);
        }
    }

    /// Drop every polygon and blank the canvas
    pub fn clear(&mut self) {
        self.polygons.clear();
        self.current.clear();
        self.surface.clear(self.palette.background);
    }
}

/// Fill one polygon's interior on top of already drawn outlines
fn paint(surface: &mut PixelSurface, polygon: &Polygon, palette: Palette) {
    if !polygon.holes().is_empty() {
        fill_area(surface, polygon, palette.fill, palette.boundary);
        return;
    }

    match polygon.fill_mode() {
        FillMode::ScanLine => scanline_fill(surface, polygon, palette.fill, palette.boundary),
        FillMode::SeedFill => match seed_point(polygon.vertices()) {
            Some(seed) if polygon.contains(seed.x as f64, seed.y as f64) => {
                seed_fill(surface, seed, palette.fill, palette.boundary)
            }
            _ => {
                // centroid outside a concave shape
                tracing::debug!("seed point outside polygon, using area fill");
                fill_area(surface, polygon, palette.fill, palette.boundary);
            }
        },
    }
}
