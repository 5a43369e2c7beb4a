// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::{catalog, CoordinateSystem};
use crate::error::{Error, Result};
use crate::geometry::{Plane, Transform};
use crate::gis::GeometryFactory;
use serde::{Deserialize, Serialize};

/// An SRID paired with the local frame a geometry was placed in.
///
/// Equality is exact over both fields; two systems with the same SRID but
/// bases differing in the last bit are not equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSystem {
    srid: i32,
    source_basis: Plane,
}

impl ProjectionSystem {
    /// Any SRID is accepted; the catalog is only consulted by
    /// [`ProjectionSystem::reference_system`].
    pub fn new(srid: i32, source_basis: Plane) -> Self {
        Self { srid, source_basis }
    }

    /// System whose source basis is the world XY plane
    pub fn world(srid: i32) -> Self {
        Self::new(srid, Plane::world_xy())
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn source_basis(&self) -> &Plane {
        &self.source_basis
    }

    /// Maps coordinates recorded in the source basis into the world frame
    pub fn forward_transform(&self) -> Transform {
        Transform::change_basis(&Plane::world_xy(), &self.source_basis)
    }

    /// Inverse of [`ProjectionSystem::forward_transform`]
    pub fn inverse_transform(&self) -> Result<Transform> {
        self.forward_transform()
            .try_inverse()
            .ok_or(Error::NonInvertibleBasis)
    }

    /// Parsed definition of this system's SRID from the built-in catalog
    pub fn reference_system(&self) -> Result<CoordinateSystem> {
        catalog::lookup_reference_system(self.srid)
    }

    /// Floating-precision factory tagging geometries with this SRID
    pub fn factory(&self) -> GeometryFactory {
        GeometryFactory::with_srid(self.srid)
    }
}
