//! Contour geometry: minimum enclosing circles, polygon simplification,
//! convexity.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Circle in pixel coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2<f32>,
    pub radius: f32,
}

#[derive(Clone, Copy)]
struct Disk {
    x: f64,
    y: f64,
    r: f64,
}

impl Disk {
    fn contains(&self, p: (f64, f64)) -> bool {
        let dx = p.0 - self.x;
        let dy = p.1 - self.y;
        (dx * dx + dy * dy).sqrt() <= self.r + 1e-7 * (1.0 + self.r)
    }

    fn from_two(a: (f64, f64), b: (f64, f64)) -> Disk {
        let x = 0.5 * (a.0 + b.0);
        let y = 0.5 * (a.1 + b.1);
        let dx = a.0 - x;
        let dy = a.1 - y;
        Disk {
            x,
            y,
            r: (dx * dx + dy * dy).sqrt(),
        }
    }

    /// Circumcircle of three points; falls back to the widest diameter circle
    /// when the points are (near-)collinear.
    fn from_three(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Disk {
        let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
        if d.abs() < 1e-12 {
            let ab = Disk::from_two(a, b);
            let ac = Disk::from_two(a, c);
            let bc = Disk::from_two(b, c);
            let mut best = ab;
            if ac.r > best.r {
                best = ac;
            }
            if bc.r > best.r {
                best = bc;
            }
            return best;
        }
        let a2 = a.0 * a.0 + a.1 * a.1;
        let b2 = b.0 * b.0 + b.1 * b.1;
        let c2 = c.0 * c.0 + c.1 * c.1;
        let x = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
        let y = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
        let dx = a.0 - x;
        let dy = a.1 - y;
        Disk {
            x,
            y,
            r: (dx * dx + dy * dy).sqrt(),
        }
    }
}

/// Smallest circle containing every point, `None` for an empty set.
///
/// Incremental Welzl without randomization; quadratic in the worst case,
/// which is fine for boundary chains of a few hundred points.
pub fn min_enclosing_circle(points: &[Point2<i32>]) -> Option<Circle> {
    if points.is_empty() {
        return None;
    }
    let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();

    let mut disk = Disk {
        x: pts[0].0,
        y: pts[0].1,
        r: 0.0,
    };
    for i in 1..pts.len() {
        if disk.contains(pts[i]) {
            continue;
        }
        disk = Disk::from_two(pts[i], pts[0]);
        for j in 1..i {
            if disk.contains(pts[j]) {
                continue;
            }
            disk = Disk::from_two(pts[i], pts[j]);
            for k in 0..j {
                if !disk.contains(pts[k]) {
                    disk = Disk::from_three(pts[i], pts[j], pts[k]);
                }
            }
        }
    }

    Some(Circle {
        center: Point2::new(disk.x as f32, disk.y as f32),
        radius: disk.r as f32,
    })
}

fn line_distance(p: Point2<i32>, a: Point2<i32>, b: Point2<i32>) -> f32 {
    let apx = (p.x - a.x) as f32;
    let apy = (p.y - a.y) as f32;
    let abx = (b.x - a.x) as f32;
    let aby = (b.y - a.y) as f32;
    let len = (abx * abx + aby * aby).sqrt();
    if len < 1e-6 {
        return (apx * apx + apy * apy).sqrt();
    }
    (apx * aby - apy * abx).abs() / len
}

fn rdp(points: &[Point2<i32>], epsilon: f32, out: &mut Vec<Point2<i32>>) {
    if points.len() < 3 {
        out.push(points[0]);
        return;
    }
    let first = points[0];
    let last = points[points.len() - 1];

    let mut split = 0;
    let mut dmax = 0.0f32;
    for (i, &p) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let d = line_distance(p, first, last);
        if d > dmax {
            dmax = d;
            split = i;
        }
    }

    if dmax > epsilon {
        rdp(&points[..=split], epsilon, out);
        rdp(&points[split..], epsilon, out);
    } else {
        out.push(first);
    }
}

/// Simplify a closed boundary chain with the Douglas-Peucker algorithm.
///
/// The chain is split at the point farthest from its first point so both
/// halves have stable anchors, then each open half is simplified with the
/// given tolerance in pixels.
pub fn approx_polygon(points: &[Point2<i32>], epsilon: f32) -> Vec<Point2<i32>> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let anchor = points[0];
    let mut far = 0;
    let mut dmax = -1.0f32;
    for (i, p) in points.iter().enumerate() {
        let dx = (p.x - anchor.x) as f32;
        let dy = (p.y - anchor.y) as f32;
        let d = dx * dx + dy * dy;
        if d > dmax {
            dmax = d;
            far = i;
        }
    }
    if far == 0 {
        return vec![anchor];
    }

    let first_half: Vec<Point2<i32>> = points[..=far].to_vec();
    let mut second_half: Vec<Point2<i32>> = points[far..].to_vec();
    second_half.push(anchor);

    let mut out = Vec::new();
    rdp(&first_half, epsilon, &mut out);
    rdp(&second_half, epsilon, &mut out);
    out
}

/// True when the polygon turns in one direction only (collinear runs are
/// tolerated).
pub fn is_convex(points: &[Point2<i32>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0i64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross =
            (b.x - a.x) as i64 * (c.y - b.y) as i64 - (b.y - a.y) as i64 * (c.x - b.x) as i64;
        if cross != 0 {
            if sign == 0 {
                sign = cross.signum();
            } else if sign != cross.signum() {
                return false;
            }
        }
    }
    sign != 0
}
