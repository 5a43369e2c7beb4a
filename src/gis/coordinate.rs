// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! GIS coordinates and coordinate sequences

use serde::{Deserialize, Serialize};

/// An (x, y, z) position. A missing z is stored as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[serde(
        default = "nan",
        skip_serializing_if = "is_missing",
        deserialize_with = "z_or_nan"
    )]
    pub z: f64,
}

fn nan() -> f64 {
    f64::NAN
}

fn is_missing(z: &f64) -> bool {
    z.is_nan()
}

fn z_or_nan<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let z: Option<f64> = Deserialize::deserialize(deserializer)?;
    Ok(z.unwrap_or(f64::NAN))
}

impl Coordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A 2D coordinate (z is NaN)
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: f64::NAN }
    }

    pub fn has_z(&self) -> bool {
        !self.z.is_nan()
    }

    /// Exact equality in x and y, ignoring z
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Exact equality in all three ordinates; two NaN z values compare equal
    pub fn equals_3d(&self, other: &Coordinate) -> bool {
        self.equals_2d(other) && (self.z == other.z || (self.z.is_nan() && other.z.is_nan()))
    }

    pub fn ordinate(&self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            _ => None,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord { x: c.x, y: c.y }
    }
}

/// Ordered list of coordinates backing line strings and rings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateSequence(Vec<Coordinate>);

impl CoordinateSequence {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.0
    }

    /// Closed when non-empty and the first coordinate equals the last in 2D
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(a), Some(b)) => a.equals_2d(b),
            _ => false,
        }
    }

    /// Number of ordinates carried: 3 if any coordinate has a z value
    pub fn dimension(&self) -> usize {
        if self.0.iter().any(Coordinate::has_z) {
            3
        } else {
            2
        }
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    pub fn into_vec(self) -> Vec<Coordinate> {
        self.0
    }

    pub fn to_geo(&self) -> geo::LineString<f64> {
        self.0.iter().map(|c| geo::Coord::from(*c)).collect()
    }
}

impl From<Vec<Coordinate>> for CoordinateSequence {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }
}

impl FromIterator<Coordinate> for CoordinateSequence {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CoordinateSequence {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xy_coordinate_has_no_z() {
        let c = Coordinate::xy(1.0, 2.0);
        assert!(!c.has_z());
        assert!(c.equals_3d(&Coordinate::xy(1.0, 2.0)));
        assert!(!c.equals_3d(&Coordinate::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_sequence_closure_and_dimension() {
        let seq: CoordinateSequence = vec![
            Coordinate::xy(0.0, 0.0),
            Coordinate::xy(1.0, 0.0),
            Coordinate::xy(0.0, 0.0),
        ]
        .into();
        assert!(seq.is_closed());
        assert_eq!(seq.dimension(), 2);
        assert!(!CoordinateSequence::default().is_closed());
    }

    #[test]
    fn test_missing_z_deserializes_as_nan() {
        let c: Coordinate = serde_json::from_str(r#"{"x": 1.0, "y": 2.0}"#).unwrap();
        assert!(c.z.is_nan());
        let c: Coordinate = serde_json::from_str(r#"{"x": 1.0, "y": 2.0, "z": null}"#).unwrap();
        assert!(c.z.is_nan());
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"x":1.0,"y":2.0}"#);
    }
}
