use crate::{
    catalog,
    color::{self, Bgr8, STROKE},
    error::{TetrascopeError, TetrascopeResult},
    frame::FrameBgr,
    grid::{OccupancyGrid, PieceGrid},
    overlay,
};

/// Per-run rendering options.
#[derive(Clone, Copy, Debug)]
pub struct ComposeOptions {
    /// Block size in pixels per grid cell.
    pub scale: u32,
    /// Boundary stroke width in pixels.
    pub stroke_width: u32,
    /// Under-paint silhouette cells before pieces are drawn over them.
    pub paint_unfilled: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            scale: 24,
            stroke_width: 2,
            paint_unfilled: false,
        }
    }
}

impl ComposeOptions {
    pub fn validate(&self) -> TetrascopeResult<()> {
        if self.scale == 0 {
            return Err(TetrascopeError::validation("scale must be >= 1"));
        }
        if self.stroke_width * 2 >= self.scale {
            // A wider stroke would leave no interior to fill.
            return Err(TetrascopeError::validation(
                "stroke width must be less than half the block scale",
            ));
        }
        Ok(())
    }
}

/// Renders piece-id grids into raster frames.
///
/// Options are validated once at construction; grid invariants are carried
/// by [`PieceGrid`], so composition itself cannot fail.
pub struct Compositor {
    opts: ComposeOptions,
}

impl Compositor {
    pub fn new(opts: ComposeOptions) -> TetrascopeResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.opts
    }

    /// Render one piece-id grid into a fresh `(H*scale) x (W*scale)` frame.
    ///
    /// With the paint-unfilled option, `occupancy` cells are under-painted
    /// in the background color first and overwritten wherever a piece covers
    /// them. A piece is drawn whether or not occupancy agrees; solver
    /// over-coverage stays visible.
    pub fn composite(
        &self,
        pieces: &PieceGrid,
        occupancy: Option<&OccupancyGrid>,
        label: Option<&str>,
    ) -> FrameBgr {
        let (h, w) = pieces.dims();
        let scale = i64::from(self.opts.scale);
        let mut frame = FrameBgr::new(
            w as u32 * self.opts.scale,
            h as u32 * self.opts.scale,
        );

        if self.opts.paint_unfilled
            && let Some(map) = occupancy
        {
            let unfilled = color::piece_color(0);
            let (mh, mw) = map.dims();
            for y in 0..mh {
                for x in 0..mw {
                    if map.is_set(y, x) {
                        let (x1, y1) = (x as i64 * scale, y as i64 * scale);
                        frame.fill_rect(x1, y1, x1 + scale, y1 + scale, unfilled);
                    }
                }
            }
        }

        for y in 0..h {
            for x in 0..w {
                let id = pieces.get(y, x);
                if id == 0 {
                    continue;
                }
                let fill = color::piece_color(id);
                for &(dy, dx) in catalog::cells(id) {
                    self.paint_cell(&mut frame, id, fill, y as i64 + dy, x as i64 + dx, dy, dx);
                }
            }
        }

        if let Some(label) = label {
            overlay::draw_label(&mut frame, label);
        }
        frame
    }

    // Paint one constituent cell of a placed piece: the inset interior, then
    // the four edge bands and four corner squares. A band or corner continues
    // the fill color only where the matching neighbor offsets are all members
    // of the same shape; otherwise it is part of the silhouette boundary and
    // gets the stroke color. The corner check is a local 3-cell AND, valid
    // for the fixed 4-cell catalog but not for arbitrary polyominoes.
    fn paint_cell(
        &self,
        frame: &mut FrameBgr,
        id: u8,
        fill: Bgr8,
        cy: i64,
        cx: i64,
        dy: i64,
        dx: i64,
    ) {
        let scale = i64::from(self.opts.scale);
        let sw = i64::from(self.opts.stroke_width);
        let (x1, y1) = (cx * scale, cy * scale);
        let (x2, y2) = (x1 + scale, y1 + scale);
        let seam = |member: bool| if member { fill } else { STROKE };

        frame.fill_rect(x1 + sw, y1 + sw, x2 - sw, y2 - sw, fill);

        frame.fill_rect(x1 + sw, y2 - sw, x2 - sw, y2, seam(catalog::contains(id, dy + 1, dx)));
        frame.fill_rect(x1 + sw, y1, x2 - sw, y1 + sw, seam(catalog::contains(id, dy - 1, dx)));
        frame.fill_rect(x2 - sw, y1 + sw, x2, y2 - sw, seam(catalog::contains(id, dy, dx + 1)));
        frame.fill_rect(x1, y1 + sw, x1 + sw, y2 - sw, seam(catalog::contains(id, dy, dx - 1)));

        let corner = |sy: i64, sx: i64| {
            seam(
                catalog::contains(id, dy + sy, dx + sx)
                    && catalog::contains(id, dy + sy, dx)
                    && catalog::contains(id, dy, dx + sx),
            )
        };
        frame.fill_rect(x1, y1, x1 + sw, y1 + sw, corner(-1, -1));
        frame.fill_rect(x2 - sw, y1, x2, y1 + sw, corner(-1, 1));
        frame.fill_rect(x1, y2 - sw, x1 + sw, y2, corner(1, -1));
        frame.fill_rect(x2 - sw, y2 - sw, x2, y2, corner(1, 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_validation_catches_bad_values() {
        assert!(
            ComposeOptions {
                scale: 0,
                stroke_width: 0,
                paint_unfilled: false,
            }
            .validate()
            .is_err()
        );
        assert!(
            ComposeOptions {
                scale: 4,
                stroke_width: 2,
                paint_unfilled: false,
            }
            .validate()
            .is_err()
        );
        assert!(ComposeOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_stroke_width_is_allowed() {
        assert!(
            ComposeOptions {
                scale: 1,
                stroke_width: 0,
                paint_unfilled: false,
            }
            .validate()
            .is_ok()
        );
    }
}
