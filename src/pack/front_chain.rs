use super::Circle;
use super::enclose::enclose;

/// Front-chain sibling packing. Positions every circle in `circles` (radii
/// already set, largest first for best results) so that no two overlap, then
/// recenters the whole set on its minimal enclosing circle and returns that
/// enclosure, centered at the origin.
pub(super) fn pack_siblings(circles: &mut [Circle]) -> Circle {
    let n = circles.len();
    if n == 0 {
        return Circle {
            x: 0.0,
            y: 0.0,
            r: 0.0,
        };
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;

    if n > 1 {
        circles[0].x = -circles[1].r;
        circles[1].x = circles[0].r;
        circles[1].y = 0.0;
    }

    if n > 2 {
        let (c0, c1) = (circles[0], circles[1]);
        let mut c = circles[2];
        place(&c1, &c0, &mut c);
        circles[2] = c;

        // Doubly linked front chain over circle indices.
        let mut next = vec![0usize; n];
        let mut prev = vec![0usize; n];
        next[0] = 1;
        prev[2] = 1;
        next[1] = 2;
        prev[0] = 2;
        next[2] = 0;
        prev[1] = 0;
        let mut a = 0usize;
        let mut b = 2usize;

        let mut i = 3;
        'pack: while i < n {
            let (ca, cb) = (circles[a], circles[b]);
            let mut c = circles[i];
            place(&ca, &cb, &mut c);
            circles[i] = c;

            // Walk outward from the anchor pair, alternating by accumulated
            // chain distance, looking for the nearest intersecting circle.
            let mut j = next[b];
            let mut k = prev[a];
            let mut sj = circles[b].r;
            let mut sk = circles[a].r;
            loop {
                if sj <= sk {
                    if intersects(&circles[j], &circles[i]) {
                        b = j;
                        next[a] = b;
                        prev[b] = a;
                        continue 'pack;
                    }
                    sj += circles[j].r;
                    j = next[j];
                } else {
                    if intersects(&circles[k], &circles[i]) {
                        a = k;
                        next[a] = b;
                        prev[b] = a;
                        continue 'pack;
                    }
                    sk += circles[k].r;
                    k = prev[k];
                }
                if j == next[k] {
                    break;
                }
            }

            // Insert between a and b, then re-anchor on the chain pair whose
            // weighted midpoint sits closest to the centroid.
            prev[i] = a;
            next[i] = b;
            next[a] = i;
            prev[b] = i;

            b = i;
            let mut best = a;
            let mut best_score = score(circles, &next, a);
            let mut cursor = next[i];
            while cursor != i {
                let s = score(circles, &next, cursor);
                if s < best_score {
                    best = cursor;
                    best_score = s;
                }
                cursor = next[cursor];
            }
            a = best;
            b = next[a];

            i += 1;
        }
    }

    let enclosing = enclose(circles);
    for circle in circles.iter_mut() {
        circle.x -= enclosing.x;
        circle.y -= enclosing.y;
    }

    Circle {
        x: 0.0,
        y: 0.0,
        r: enclosing.r,
    }
}

/// Positions `c` tangent to both `b` and `a`, on the outside of the pair.
fn place(b: &Circle, a: &Circle, c: &mut Circle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;

    if d2 > 0.0 {
        let mut a2 = a.r + c.r;
        a2 *= a2;
        let mut b2 = b.r + c.r;
        b2 *= b2;
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + a.r + c.r;
        c.y = a.y;
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = circles[node];
    let b = circles[next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
