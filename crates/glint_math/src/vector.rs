//! Reflection, refraction and color helpers.

use glam::DVec3;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit direction through a surface using Snell's law.
///
/// `n` must be unit length and face against `d` (`d·n <= 0`). `from` and
/// `to` are the refractive indices on the incoming and outgoing sides.
/// Returns None under total internal reflection.
pub fn refract(d: DVec3, n: DVec3, from: f64, to: f64) -> Option<DVec3> {
    let eta = from / to;
    let cos_i = -d.dot(n);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * d + (eta * cos_i - k.sqrt()) * n)
}

/// True if any channel is non-zero.
#[inline]
pub fn any_nonzero(c: DVec3) -> bool {
    c.x != 0.0 || c.y != 0.0 || c.z != 0.0
}
