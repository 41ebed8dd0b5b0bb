//! Canonical confidence value: fixed-point 0.0..=1.0 in basis points.
//!
//! All confidence arithmetic happens in integer basis points so identical
//! inputs reproduce identical outputs bit for bit. The legacy 0–100 score is
//! derived from this representation only at the API boundary.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Confidence in basis points (0 ≙ 0.0, 10 000 ≙ 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Confidence(u16);

impl Confidence {
    pub const SCALE: u16 = 10_000;
    pub const ZERO: Confidence = Confidence(0);
    pub const ONE: Confidence = Confidence(Self::SCALE);

    /// Build from basis points, saturating at 1.0.
    pub const fn from_basis_points(bp: u16) -> Self {
        if bp > Self::SCALE {
            Self(Self::SCALE)
        } else {
            Self(bp)
        }
    }

    /// Build from a float, clamping to [0, 1]. Non-finite input maps to zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        let bp = (value.clamp(0.0, 1.0) * f64::from(Self::SCALE)).round();
        Self(bp as u16)
    }

    /// Build from a legacy 0–100 score.
    pub const fn from_score(score: u8) -> Self {
        let score = if score > 100 { 100 } else { score };
        Self(score as u16 * 100)
    }

    pub const fn basis_points(self) -> u16 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    /// Legacy 0–100 view: `round(confidence × 100)`, halves rounding up.
    pub const fn to_score(self) -> u8 {
        ((self.0 as u32 + 50) / 100) as u8
    }

    /// Apply a signed delta expressed as a fraction of 1.0, saturating at both ends.
    pub fn offset(self, delta: f64) -> Self {
        if !delta.is_finite() {
            return self;
        }
        let delta_bp = (delta * f64::from(Self::SCALE)).round() as i32;
        let next = (i32::from(self.0) + delta_bp).clamp(0, i32::from(Self::SCALE));
        Self(next as u16)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_f64())
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Self::from_f64(value))
    }
}
