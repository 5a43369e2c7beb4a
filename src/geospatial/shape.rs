// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::{GeoCollection, GeoLineString, Georeferenced, MultiGeoLineString};
use crate::convert::{brep_to_polygon, extract_hole_loops, extract_outer_loop};
use crate::convert::{polygon_to_brep, ring_to_brep};
use crate::error::Result;
use crate::geometry::{Brep, Plane, Transform};
use crate::gis::{LinearRing, Polygon};
use crate::projection::ProjectionSystem;
use serde::{Deserialize, Serialize};

/// A georeferenced planar patch; maps to a GIS polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoShape {
    brep: Brep,
    projection: ProjectionSystem,
}

impl GeoShape {
    pub fn new(brep: Brep, projection: ProjectionSystem) -> Self {
        Self { brep, projection }
    }

    /// Rebuilds the patch from the polygon's rings; SRID comes from the polygon
    pub fn from_polygon(polygon: &Polygon, source_basis: Plane, tolerance: f64) -> Result<Self> {
        Ok(Self::new(
            polygon_to_brep(polygon, tolerance)?,
            ProjectionSystem::new(polygon.srid, source_basis),
        ))
    }

    pub fn from_ring(ring: &LinearRing, source_basis: Plane, tolerance: f64) -> Result<Self> {
        Ok(Self::new(
            ring_to_brep(ring, tolerance)?,
            ProjectionSystem::new(ring.srid, source_basis),
        ))
    }

    pub fn brep(&self) -> &Brep {
        &self.brep
    }

    pub fn into_brep(self) -> Brep {
        self.brep
    }

    /// Outer loop sharing this shape's projection system
    pub fn boundary(&self) -> Result<GeoLineString> {
        GeoLineString::new(extract_outer_loop(&self.brep)?, self.projection)
    }

    /// Hole loops sharing this shape's projection system; empty without holes
    pub fn holes(&self) -> Result<MultiGeoLineString> {
        let holes = extract_hole_loops(&self.brep)?
            .into_iter()
            .map(|pl| GeoLineString::new(pl, self.projection))
            .collect::<Result<Vec<_>>>()?;
        Ok(GeoCollection::with_projection(holes, self.projection))
    }

    pub fn to_gis(&self) -> Result<Polygon> {
        brep_to_polygon(&self.brep, &self.projection)
    }
}

impl Georeferenced for GeoShape {
    fn projection_system(&self) -> &ProjectionSystem {
        &self.projection
    }

    fn transform(&mut self, xform: &Transform) {
        self.brep.transform(xform);
    }
}
