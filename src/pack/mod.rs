mod enclose;
mod front_chain;

use serde::Serialize;

use front_chain::pack_siblings;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct PackConfig {
    pub width: f64,
    pub height: f64,
    /// Gap kept between sibling circles and around the enclosure edge.
    pub padding: f64,
    /// Radius floor so zero-weight or invalid items stay visible.
    pub min_radius: f64,
}

#[derive(Clone, Debug)]
pub struct Packed {
    /// One circle per input weight, in input order.
    pub circles: Vec<Circle>,
    /// Minimal enclosing circle, centered at the origin.
    pub enclosing: Circle,
}

/// Packs one circle per weight into the configured canvas: radius grows with
/// the square root of the weight (area tracks weight), siblings never
/// overlap, and everything fits inside the returned enclosing circle. When
/// the packed enclosure overflows the canvas bound, positions and radii are
/// rescaled together so weight ordering survives.
pub fn pack(weights: &[f64], config: &PackConfig) -> Packed {
    let n = weights.len();
    if n == 0 {
        return Packed {
            circles: Vec::new(),
            enclosing: Circle {
                x: 0.0,
                y: 0.0,
                r: 0.0,
            },
        };
    }

    let target = (config.width.min(config.height) / 2.0).max(0.0);

    let weights = weights
        .iter()
        .map(|&w| if w.is_finite() { w.max(0.0) } else { 0.0 })
        .collect::<Vec<_>>();
    let max_weight = weights.iter().cloned().fold(0.0, f64::max);
    let scale = if max_weight > 0.0 {
        target / max_weight.sqrt()
    } else {
        0.0
    };

    let base_radii = weights
        .iter()
        .map(|&w| {
            let r = scale * w.sqrt();
            if r.is_finite() && r >= config.min_radius {
                r
            } else {
                config.min_radius
            }
        })
        .collect::<Vec<_>>();

    // Largest first; stable sort keeps ties in input order so repeated runs
    // produce identical geometry.
    let mut order = (0..n).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        base_radii[b]
            .partial_cmp(&base_radii[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Pack with half the padding folded into every radius, then report the
    // deflated radii, which leaves a full padding gap between siblings. A
    // lone circle has no siblings to pad against.
    let half_pad = if n > 1 {
        config.padding.max(0.0) / 2.0
    } else {
        0.0
    };
    let mut packed = order
        .iter()
        .map(|&index| Circle {
            x: 0.0,
            y: 0.0,
            r: base_radii[index] + half_pad,
        })
        .collect::<Vec<_>>();
    let enclosing = pack_siblings(&mut packed);

    let fit = if enclosing.r > target && enclosing.r > 0.0 {
        target / enclosing.r
    } else {
        1.0
    };

    let mut circles = vec![
        Circle {
            x: 0.0,
            y: 0.0,
            r: 0.0,
        };
        n
    ];
    for (slot, &index) in order.iter().enumerate() {
        circles[index] = Circle {
            x: packed[slot].x * fit,
            y: packed[slot].y * fit,
            r: base_radii[index] * fit,
        };
    }

    Packed {
        circles,
        enclosing: Circle {
            x: 0.0,
            y: 0.0,
            r: enclosing.r * fit,
        },
    }
}
