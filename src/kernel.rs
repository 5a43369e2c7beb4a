// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API binding settings to the conversion pipeline

use crate::config::Settings;
use crate::convert::{polygon_to_brep, ring_to_brep};
use crate::error::Result;
use crate::geometry::{
    clean_brep, curve_self_intersections, Brep, Curve, CurveIntersections, Plane,
};
use crate::geospatial::{to_geospatial, GeoGeometry};
use crate::gis::{Geometry, LinearRing, Polygon};
use crate::projection::{CoordinateSystem, ProjectionSystem, ReferenceCatalog};

/// Conversion entry point carrying the ambient tolerance and catalog
#[derive(Debug, Clone)]
pub struct Kernel {
    settings: Settings,
    catalog: ReferenceCatalog,
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel {
    /// Create a kernel with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let catalog = settings.reference_catalog();
        Self { settings, catalog }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Ambient model tolerance
    pub fn tolerance(&self) -> f64 {
        self.settings.model.absolute_tolerance
    }

    /// Projection system with the configured default SRID
    pub fn default_projection(&self, source_basis: Plane) -> ProjectionSystem {
        ProjectionSystem::new(self.settings.projection.default_srid, source_basis)
    }

    /// Parsed definition from the configured catalog
    pub fn reference_system(&self, srid: i32) -> Result<CoordinateSystem> {
        self.catalog.lookup(srid)
    }

    /// Wrap a GIS geometry at the ambient tolerance
    pub fn georeference(
        &self,
        geometry: Option<&Geometry>,
        source_basis: &Plane,
    ) -> Result<Option<GeoGeometry>> {
        to_geospatial(geometry, source_basis, self.tolerance())
    }

    pub fn polygon_to_brep(&self, polygon: &Polygon) -> Result<Brep> {
        polygon_to_brep(polygon, self.tolerance())
    }

    pub fn ring_to_brep(&self, ring: &LinearRing) -> Result<Brep> {
        ring_to_brep(ring, self.tolerance())
    }

    /// Best-effort cleanup; `None` when the patch could not be cleaned
    pub fn clean(&self, brep: &Brep, cap_holes: bool, merge_faces: bool) -> Option<Brep> {
        clean_brep(brep, cap_holes, merge_faces, self.tolerance())
    }

    pub fn self_intersections(&self, curve: &Curve) -> CurveIntersections {
        curve_self_intersections(curve, self.tolerance())
    }
}
