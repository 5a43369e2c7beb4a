// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types shared by the conversion, projection and geospatial modules

/// Result type for antelope operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input violated a structural requirement (open ring, too few points, ...)
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A loop or curve cannot be represented as a polyline
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// Planar patch generation produced no candidate
    #[error("planar patch generation failed: {0}")]
    PatchGenerationFailed(String),

    /// A geometry failed a structural validity check
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("unknown SRID {0}")]
    UnknownSrid(i32),

    #[error("source basis is not invertible")]
    NonInvertibleBasis,

    #[error(
        "this is a {0}; geospatial conversion for geometries of type {0} has not been implemented"
    )]
    UnsupportedGeometryType(String),

    /// Members of a geospatial collection carry different projection systems
    #[error("projection systems disagree: expected SRID {expected}, found SRID {found}")]
    ProjectionMismatch { expected: i32, found: i32 },

    #[error("malformed WKT: {0}")]
    Wkt(String),

    #[cfg(feature = "proj")]
    #[error("projection error: {0}")]
    Projection(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
