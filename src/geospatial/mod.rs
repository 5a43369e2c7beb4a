// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Georeferenced CAD geometry
//!
//! Each wrapper owns one CAD geometry and the [`ProjectionSystem`] it was
//! recorded in. `to_target_basis` moves the geometry from its source basis
//! into the world frame; `to_source_basis` moves it back. Neither tracks
//! which frame the geometry is currently in.

mod collection;
mod facade;
mod line_string;
mod point;
mod shape;

pub use collection::{GeoCollection, MultiGeoLineString, MultiGeoPoint, MultiGeoShape};
pub use facade::{to_geospatial, GeoGeometry};
pub use line_string::GeoLineString;
pub use point::GeoPoint;
pub use shape::GeoShape;

use crate::error::Result;
use crate::geometry::Transform;
use crate::projection::ProjectionSystem;

/// A CAD geometry tied to the projection system it was recorded in
pub trait Georeferenced {
    fn projection_system(&self) -> &ProjectionSystem;

    /// Apply `xform` to the wrapped geometry in place
    fn transform(&mut self, xform: &Transform);

    /// Source basis -> world frame
    fn to_target_basis(&mut self) {
        let xform = self.projection_system().forward_transform();
        self.transform(&xform);
    }

    /// World frame -> source basis
    fn to_source_basis(&mut self) -> Result<()> {
        let xform = self.projection_system().inverse_transform()?;
        self.transform(&xform);
        Ok(())
    }
}
