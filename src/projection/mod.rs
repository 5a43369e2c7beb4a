// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Projection systems: SRID plus source basis, and the reference system catalog

pub mod catalog;
mod reference;
mod system;
pub mod wkt;

pub use catalog::{lookup_reference_system, ReferenceCatalog, ReferenceSystemEntry};
pub use reference::{
    Authority, Axis, CoordinateSystem, CoordinateSystemKind, Datum, GeographicSystem,
    PrimeMeridian, Projection, Spheroid, Unit,
};
pub use system::ProjectionSystem;
