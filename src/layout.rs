// layout.rs — centered placement of a rendered grid within the viewport
//
// The engine reports a usable origin/size; it never reflows content. A grid
// wider or taller than the viewport is clamped to viewport − MARGIN and the
// caller crops. Offsets exist for the shadow layer (same grid, nudged one
// cell) and are applied before the final clamp so the shadow can never push
// the panel out of bounds.

/// Margin reserved on each clamped axis when the grid exceeds the viewport.
pub const MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Place a `grid_width` × `grid_height` grid centered in a `viewport_width`
/// × `viewport_height` viewport, shifted by (`dx`, `dy`) before clamping.
///
/// Guarantees for every axis: `origin + size <= viewport` and `origin >= 0`.
pub fn place(
    grid_width: usize,
    grid_height: usize,
    viewport_width: u16,
    viewport_height: u16,
    dx: i32,
    dy: i32,
) -> Placement {
    let (x, width) = place_axis(grid_width, viewport_width, dx);
    let (y, height) = place_axis(grid_height, viewport_height, dy);
    Placement { x, y, width, height }
}

fn place_axis(grid: usize, viewport: u16, offset: i32) -> (u16, u16) {
    let viewport = i64::from(viewport);
    let mut size = grid as i64;
    if size > viewport {
        size = (viewport - i64::from(MARGIN)).max(0);
    }
    let origin = ((viewport - size) / 2 + i64::from(offset)).clamp(0, viewport - size);
    (origin as u16, size as u16)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_when_grid_fits() {
        // 65×5 grid in an 80×24 viewport: no clamping.
        let p = place(65, 5, 80, 24, 0, 0);
        assert_eq!(p, Placement { x: 7, y: 9, width: 65, height: 5 });
    }

    #[test]
    fn clamps_oversized_grid_with_margin() {
        let p = place(100, 30, 80, 24, 0, 0);
        assert_eq!(p.width, 78);
        assert_eq!(p.height, 22);
        assert!(p.x + p.width <= 80);
        assert!(p.y + p.height <= 24);
    }

    #[test]
    fn origin_plus_size_never_exceeds_viewport() {
        for grid_w in [0usize, 1, 40, 80, 81, 200] {
            for grid_h in [0usize, 1, 12, 24, 25, 90] {
                for (dx, dy) in [(0, 0), (1, 1), (-5, -5), (1000, 1000)] {
                    let p = place(grid_w, grid_h, 80, 24, dx, dy);
                    assert!(u32::from(p.x) + u32::from(p.width) <= 80);
                    assert!(u32::from(p.y) + u32::from(p.height) <= 24);
                }
            }
        }
    }

    #[test]
    fn offset_shifts_before_clamping() {
        let centered = place(10, 4, 80, 24, 0, 0);
        let shifted = place(10, 4, 80, 24, 1, 1);
        assert_eq!(shifted.x, centered.x + 1);
        assert_eq!(shifted.y, centered.y + 1);
        // A huge offset pins the panel to the far edge, still in bounds.
        let pinned = place(10, 4, 80, 24, 500, 500);
        assert_eq!(pinned.x, 70);
        assert_eq!(pinned.y, 20);
    }

    #[test]
    fn degenerate_viewport_yields_zero_size() {
        let p = place(65, 5, 1, 1, 0, 0);
        assert!(p.width <= 1 && p.height <= 1);
        assert!(p.x + p.width <= 1);
    }
}
