// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CAD geometry module - planes, polylines, curves and planar breps

mod bbox;
mod brep;
mod curve;
mod plane;
mod polyline;
mod transform;
pub mod clean;
pub mod intersect;
pub mod planar;

pub use bbox::BoundingBox;
pub use brep::{Brep, BrepFace, BrepLoop, LoopType, PlaneSurface};
pub use clean::clean_brep;
pub use curve::{Arc, Curve};
pub use intersect::{curve_self_intersections, CurveIntersections, IntersectionEvent};
pub use planar::create_planar_breps;
pub use plane::Plane;
pub use polyline::{CurveOrientation, Polyline};
pub use transform::Transform;
