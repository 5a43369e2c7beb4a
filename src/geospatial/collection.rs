// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::{GeoLineString, GeoPoint, GeoShape, Georeferenced};
use crate::error::{Error, Result};
use crate::geometry::Transform;
use crate::gis::{MultiLineString, MultiPoint, MultiPolygon};
use crate::projection::ProjectionSystem;
use serde::{Deserialize, Serialize};

/// Ordered georeferenced members sharing one projection system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCollection<T> {
    members: Vec<T>,
    projection: ProjectionSystem,
}

pub type MultiGeoPoint = GeoCollection<GeoPoint>;
pub type MultiGeoLineString = GeoCollection<GeoLineString>;
pub type MultiGeoShape = GeoCollection<GeoShape>;

impl<T: Georeferenced> GeoCollection<T> {
    /// Collection whose projection system is the one all members agree on.
    ///
    /// Fails with `InvalidArgument` for no members and `ProjectionMismatch`
    /// when any member differs from the first.
    pub fn new(members: Vec<T>) -> Result<Self> {
        let projection = *members
            .first()
            .ok_or_else(|| Error::invalid("members", "collection has no members"))?
            .projection_system();
        if let Some(other) = members
            .iter()
            .map(Georeferenced::projection_system)
            .find(|p| **p != projection)
        {
            return Err(Error::ProjectionMismatch {
                expected: projection.srid(),
                found: other.srid(),
            });
        }
        Ok(Self {
            members,
            projection,
        })
    }

    /// Collection with an explicit projection system; members are not checked
    pub fn with_projection(members: Vec<T>, projection: ProjectionSystem) -> Self {
        Self {
            members,
            projection,
        }
    }

    pub fn push(&mut self, member: T) -> Result<()> {
        if *member.projection_system() != self.projection {
            return Err(Error::ProjectionMismatch {
                expected: self.projection.srid(),
                found: member.projection_system().srid(),
            });
        }
        self.members.push(member);
        Ok(())
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }
}

impl<T: Georeferenced> Georeferenced for GeoCollection<T> {
    fn projection_system(&self) -> &ProjectionSystem {
        &self.projection
    }

    fn transform(&mut self, xform: &Transform) {
        for member in &mut self.members {
            member.transform(xform);
        }
    }
}

impl GeoCollection<GeoPoint> {
    pub fn to_gis(&self) -> MultiPoint {
        self.projection
            .factory()
            .create_multi_point(self.members.iter().map(GeoPoint::to_gis).collect())
    }
}

impl GeoCollection<GeoLineString> {
    pub fn to_gis(&self) -> Result<MultiLineString> {
        let line_strings = self
            .members
            .iter()
            .map(GeoLineString::to_gis)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.projection.factory().create_multi_line_string(line_strings))
    }
}

impl GeoCollection<GeoShape> {
    pub fn to_gis(&self) -> Result<MultiPolygon> {
        let polygons = self
            .members
            .iter()
            .map(GeoShape::to_gis)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.projection.factory().create_multi_polygon(polygons))
    }
}
