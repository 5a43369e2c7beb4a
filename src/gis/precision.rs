// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Precision models controlling how ordinates are rounded on construction

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrecisionModel {
    /// Full double precision, no rounding
    #[default]
    Floating,
    /// Rounded to single precision
    FloatingSingle,
    /// Rounded to a grid of `1 / scale`
    Fixed { scale: f64 },
}

impl PrecisionModel {
    pub fn make_precise(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        match *self {
            Self::Floating => value,
            Self::FloatingSingle => value as f32 as f64,
            Self::Fixed { scale } if scale > 0.0 => (value * scale).round() / scale,
            Self::Fixed { .. } => value,
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Floating | Self::FloatingSingle)
    }
}
