//! Physical constants in SI units

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.67259e-11;

/// Speed of light in m/s
pub const C: f64 = 299_792_458.0;

/// Coulomb constant in N m² C⁻²
pub const K: f64 = 8.987_551_787_368_176e9;

/// Elementary charge in C
pub const E: f64 = 1.602_176_634e-19;
