//! CIEDE2000 colour difference.
//!
//! Follows Sharma, Wu & Dalal, "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical Observations"
//! (2005), with kL = kC = kH = 1.

use std::f64::consts::PI;

use super::color::LabColor;


// 25^7, exact in f64
const POW25_7: f64 = 6_103_515_625.0;

#[inline]
fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Hue angle in degrees, 0..360. Zero when both components are zero.
#[inline]
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let angle = b.atan2(a) * 180.0 / PI;
    if angle >= 0.0 {
        angle
    } else {
        angle + 360.0
    }
}

/// `sqrt(c^7 / (c^7 + 25^7))`, zero when the denominator is.
#[inline]
fn chroma_weight(c: f64) -> f64 {
    let c7 = c.powf(7.0);
    let denom = c7 + POW25_7;
    if denom == 0.0 {
        0.0
    } else {
        (c7 / denom).sqrt()
    }
}

/// Signed hue difference h2 - h1 wrapped into [-180, 180]; zero if either chroma is zero.
/// Exactly -180 stays -180, so the result is sign-symmetric in its arguments.
#[inline]
fn hue_difference(h1: f64, h2: f64, chroma_product: f64) -> f64 {
    if chroma_product == 0.0 {
        return 0.0;
    }
    let mut diff = h2 - h1;
    if diff > 180.0 {
        diff -= 360.0;
    }
    if diff < -180.0 {
        diff += 360.0;
    }
    diff
}

/// Mean hue. With a zero chroma the published formula takes the plain sum.
#[inline]
fn mean_hue(h1: f64, h2: f64, chroma_product: f64) -> f64 {
    if chroma_product == 0.0 {
        h1 + h2
    } else if (h1 - h2).abs() <= 180.0 {
        (h1 + h2) / 2.0
    } else if h1 + h2 < 360.0 {
        (h1 + h2 + 360.0) / 2.0
    } else {
        (h1 + h2 - 360.0) / 2.0
    }
}

/// ΔE00 between two Lab colours. Always finite and non-negative.
pub fn delta_e2000(lab1: LabColor, lab2: LabColor) -> f64 {
    let (l1, a1, b1) = (lab1.l(), lab1.a(), lab1.b());
    let (l2, a2, b2) = (lab2.l(), lab2.a(), lab2.b());

    let l_bar = (l1 + l2) / 2.0;
    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let c_bar = (c1 + c2) / 2.0;

    let g = 0.5 * (1.0 - chroma_weight(c_bar));

    let a1_prime = (1.0 + g) * a1;
    let a2_prime = (1.0 + g) * a2;
    let c1_prime = a1_prime.hypot(b1);
    let c2_prime = a2_prime.hypot(b2);
    let c_bar_prime = (c1_prime + c2_prime) / 2.0;

    let h1_prime = hue_angle(a1_prime, b1);
    let h2_prime = hue_angle(a2_prime, b2);
    let chroma_product = c1_prime * c2_prime;

    let delta_l_prime = l2 - l1;
    let delta_c_prime = c2_prime - c1_prime;
    let delta_h_angle = hue_difference(h1_prime, h2_prime, chroma_product);
    let delta_h_prime = 2.0 * chroma_product.sqrt() * (deg_to_rad(delta_h_angle) / 2.0).sin();

    let h_bar_prime = mean_hue(h1_prime, h2_prime, chroma_product);

    let t = 1.0 - 0.17 * deg_to_rad(h_bar_prime - 30.0).cos()
        + 0.24 * deg_to_rad(2.0 * h_bar_prime).cos()
        + 0.32 * deg_to_rad(3.0 * h_bar_prime + 6.0).cos()
        - 0.20 * deg_to_rad(4.0 * h_bar_prime - 63.0).cos();

    let delta_theta = 30.0 * (-((h_bar_prime - 275.0) / 25.0).powf(2.0)).exp();
    let rc = 2.0 * chroma_weight(c_bar_prime);
    let l_offset_sq = (l_bar - 50.0).powf(2.0);
    let sl = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let sc = 1.0 + 0.045 * c_bar_prime;
    let sh = 1.0 + 0.015 * c_bar_prime * t;
    let rt = -deg_to_rad(2.0 * delta_theta).sin() * rc;

    let dl = delta_l_prime / sl;
    let dc = delta_c_prime / sc;
    let dh = delta_h_prime / sh;
    // rounding can push an all-but-zero radicand below 0
    (dl * dl + dc * dc + dh * dh + rt * dc * dh).max(0.0).sqrt()
}
