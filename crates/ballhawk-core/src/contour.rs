//! External contour extraction on binary masks.
//!
//! One contour per 8-connected foreground component, traced along the outer
//! boundary only: holes inside a component do not produce contours of their
//! own.

use nalgebra::Point2;

use crate::image::Rect;
use crate::mask::Mask;

/// Outer boundary of one connected foreground component.
///
/// Points are pixel coordinates in clockwise order (image y grows downward);
/// the chain is closed implicitly, last point connects back to the first.
#[derive(Clone, Debug)]
pub struct Contour {
    pub points: Vec<Point2<i32>>,
}

impl Contour {
    /// Enclosed area in px^2 via the shoelace formula over the boundary
    /// polygon.
    pub fn area(&self) -> f32 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0i64;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            acc += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
        }
        acc.abs() as f32 * 0.5
    }

    /// Length of the closed boundary polyline.
    pub fn perimeter(&self) -> f32 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mut acc = 0.0f32;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            let dx = (q.x - p.x) as f32;
            let dy = (q.y - p.y) as f32;
            acc += (dx * dx + dy * dy).sqrt();
        }
        acc
    }

    /// Area-moment centroid of the boundary polygon, `None` when the polygon
    /// is degenerate (zero area).
    pub fn centroid(&self) -> Option<Point2<f32>> {
        let n = self.points.len();
        if n < 3 {
            return None;
        }
        let mut signed = 0.0f64;
        let mut cx = 0.0f64;
        let mut cy = 0.0f64;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            let cross = p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
            signed += cross;
            cx += (p.x + q.x) as f64 * cross;
            cy += (p.y + q.y) as f64 * cross;
        }
        if signed.abs() < 1e-9 {
            return None;
        }
        let scale = 1.0 / (3.0 * signed);
        Some(Point2::new((cx * scale) as f32, (cy * scale) as f32))
    }

    pub fn bounding_rect(&self) -> Rect {
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if min_x > max_x {
            return Rect {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            };
        }
        Rect {
            x: min_x as usize,
            y: min_y as usize,
            width: (max_x - min_x + 1) as usize,
            height: (max_y - min_y + 1) as usize,
        }
    }
}

// Moore neighborhood in clockwise order (y down): E, SE, S, SW, W, NW, N, NE.
const CW: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

fn dir_of(dx: i32, dy: i32) -> usize {
    match (dx, dy) {
        (1, 0) => 0,
        (1, 1) => 1,
        (0, 1) => 2,
        (-1, 1) => 3,
        (-1, 0) => 4,
        (-1, -1) => 5,
        (0, -1) => 6,
        _ => 7,
    }
}

/// Find the external contours of `mask`, one per 8-connected component, in
/// row-major discovery order.
pub fn find_external_contours(mask: &Mask) -> Vec<Contour> {
    let mut visited = vec![false; mask.width * mask.height];
    let mut contours = Vec::new();

    for y in 0..mask.height {
        for x in 0..mask.width {
            let idx = y * mask.width + x;
            if mask.data[idx] == 0 || visited[idx] {
                continue;
            }
            // First foreground pixel of an unvisited component in row-major
            // order: its west neighbor is guaranteed background.
            let points = trace_boundary(mask, x as i32, y as i32);
            mark_component(mask, &mut visited, x, y);
            contours.push(Contour { points });
        }
    }

    contours
}

/// Moore-neighbor boundary tracing from the component's topmost-leftmost
/// pixel, with Jacob's stopping criterion and a hard step cap.
fn trace_boundary(mask: &Mask, sx: i32, sy: i32) -> Vec<Point2<i32>> {
    let start = (sx, sy);
    let start_back = (sx - 1, sy);

    let mut points = vec![Point2::new(sx, sy)];
    let mut cur = start;
    let mut back = start_back;

    let max_steps = 4 * mask.width * mask.height + 8;
    for _ in 0..max_steps {
        let bi = dir_of(back.0 - cur.0, back.1 - cur.1);
        let mut moved = false;
        for k in 1..=8 {
            let di = (bi + k) % 8;
            let (dx, dy) = CW[di];
            let next = (cur.0 + dx, cur.1 + dy);
            if mask.get_i32(next.0, next.1) {
                let (px, py) = CW[(bi + k - 1) % 8];
                back = (cur.0 + px, cur.1 + py);
                cur = next;
                moved = true;
                break;
            }
        }
        if !moved {
            break; // isolated pixel
        }
        if cur == start && back == start_back {
            break; // boundary closed
        }
        points.push(Point2::new(cur.0, cur.1));
    }

    points
}

/// Flood-fill `visited` over the 8-connected component containing `(x, y)`.
fn mark_component(mask: &Mask, visited: &mut [bool], x: usize, y: usize) {
    let mut stack = vec![(x as i32, y as i32)];
    while let Some((cx, cy)) = stack.pop() {
        if !mask.get_i32(cx, cy) {
            continue;
        }
        let idx = cy as usize * mask.width + cx as usize;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        for (dx, dy) in CW {
            let (nx, ny) = (cx + dx, cy + dy);
            if mask.get_i32(nx, ny) && !visited[ny as usize * mask.width + nx as usize] {
                stack.push((nx, ny));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_rect(mask: &mut Mask, x0: usize, y0: usize, w: usize, h: usize) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.set(x, y, true);
            }
        }
    }

    #[test]
    fn one_contour_per_component() {
        let mut m = Mask::new(40, 40);
        filled_rect(&mut m, 2, 2, 8, 8);
        filled_rect(&mut m, 20, 20, 10, 5);

        let contours = find_external_contours(&m);
        assert_eq!(contours.len(), 2);

        let r0 = contours[0].bounding_rect();
        assert_eq!((r0.x, r0.y, r0.width, r0.height), (2, 2, 8, 8));
        let r1 = contours[1].bounding_rect();
        assert_eq!((r1.x, r1.y, r1.width, r1.height), (20, 20, 10, 5));
    }

    #[test]
    fn holes_do_not_produce_contours() {
        let mut m = Mask::new(30, 30);
        filled_rect(&mut m, 5, 5, 12, 12);
        // punch a hole
        for y in 9..13 {
            for x in 9..13 {
                m.set(x, y, false);
            }
        }
        let contours = find_external_contours(&m);
        assert_eq!(contours.len(), 1);
        let r = contours[0].bounding_rect();
        assert_eq!((r.width, r.height), (12, 12));
    }

    #[test]
    fn rect_area_and_perimeter_match_the_boundary_polygon() {
        let mut m = Mask::new(50, 50);
        filled_rect(&mut m, 10, 10, 21, 11);
        let contours = find_external_contours(&m);
        assert_eq!(contours.len(), 1);
        let c = &contours[0];
        // boundary polygon spans 20x10 between pixel centers
        assert!((c.area() - 200.0).abs() < 1e-3);
        assert!((c.perimeter() - 60.0).abs() < 1e-3);

        let centroid = c.centroid().expect("non-degenerate");
        assert!((centroid.x - 20.0).abs() < 1e-3);
        assert!((centroid.y - 15.0).abs() < 1e-3);
    }

    #[test]
    fn single_pixel_component_yields_a_point_contour() {
        let mut m = Mask::new(10, 10);
        m.set(4, 4, true);
        let contours = find_external_contours(&m);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points.len(), 1);
        assert_eq!(contours[0].area(), 0.0);
    }
}
