//! Geometry type algebra
//!
//! A closed set of nine geometry tags and the three primitive buckets they
//! collapse into. Every dispatch in geonorm matches exhaustively on these
//! enums, so adding a tag is a compile error at each dispatch site.

use std::fmt;
use std::str::FromStr;

use geo_types::{CoordNum, Geometry, LineString, MultiPoint, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geometry type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Missing,
    Point,
    LineString,
    /// Closed ring. Only used as a tag: rings live inside polygons.
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// All geometry types
    pub const ALL: [GeometryType; 9] = [
        GeometryType::Missing,
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::LinearRing,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Missing => "Missing",
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Tag of a geometry value.
    ///
    /// The auxiliary `geo` variants report their canonical tag: a `Line`
    /// is a `LineString`, `Rect` and `Triangle` are `Polygon`s.
    pub fn of<T: CoordNum>(geometry: &Geometry<T>) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::Line(_) | Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
                GeometryType::Polygon
            }
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// True for the Multi* tags and GeometryCollection
    pub fn is_multi(self) -> bool {
        matches!(
            self,
            GeometryType::MultiPoint
                | GeometryType::MultiLineString
                | GeometryType::MultiPolygon
                | GeometryType::GeometryCollection
        )
    }

    /// The Multi* variant of this type.
    ///
    /// Multi* types and GeometryCollection map onto themselves.
    /// `Missing` and `LinearRing` have no multi form.
    pub fn to_multi(self) -> Result<GeometryType> {
        match self {
            GeometryType::MultiPoint
            | GeometryType::MultiLineString
            | GeometryType::MultiPolygon
            | GeometryType::GeometryCollection => Ok(self),
            GeometryType::Point => Ok(GeometryType::MultiPoint),
            GeometryType::LineString => Ok(GeometryType::MultiLineString),
            GeometryType::Polygon => Ok(GeometryType::MultiPolygon),
            GeometryType::Missing | GeometryType::LinearRing => Err(Error::invalid_argument(
                format!("no multi variant for geometry type {}", self),
            )),
        }
    }

    /// The primitive bucket of this type.
    pub fn primitive(self) -> Result<PrimitiveType> {
        match self {
            GeometryType::Point | GeometryType::MultiPoint => Ok(PrimitiveType::Point),
            GeometryType::LineString | GeometryType::MultiLineString => {
                Ok(PrimitiveType::LineString)
            }
            GeometryType::Polygon | GeometryType::MultiPolygon => Ok(PrimitiveType::Polygon),
            GeometryType::Missing | GeometryType::LinearRing | GeometryType::GeometryCollection => {
                Err(Error::invalid_argument(format!(
                    "no primitive type available for geometry type {}",
                    self
                )))
            }
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryType {
    type Err = Error;

    /// Case-insensitive exact match on the type name
    fn from_str(s: &str) -> Result<Self> {
        GeometryType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument(format!("unknown geometry type: {:?}", s)))
    }
}

/// Primitive geometry type, ignoring the single/multi distinction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Point,
    LineString,
    Polygon,
}

impl PrimitiveType {
    /// The single-part geometry type of this bucket
    pub fn base_type(self) -> GeometryType {
        match self {
            PrimitiveType::Point => GeometryType::Point,
            PrimitiveType::LineString => GeometryType::LineString,
            PrimitiveType::Polygon => GeometryType::Polygon,
        }
    }

    /// The multi-part geometry type of this bucket
    pub fn multi_type(self) -> GeometryType {
        match self {
            PrimitiveType::Point => GeometryType::MultiPoint,
            PrimitiveType::LineString => GeometryType::MultiLineString,
            PrimitiveType::Polygon => GeometryType::MultiPolygon,
        }
    }

    /// Empty geometry of this bucket.
    ///
    /// `geo` has no empty `Point`, so the Point bucket yields an empty
    /// `MultiPoint`.
    pub fn empty_geometry(self) -> Geometry<f64> {
        match self {
            PrimitiveType::Point => Geometry::MultiPoint(MultiPoint::new(vec![])),
            PrimitiveType::LineString => Geometry::LineString(LineString::new(vec![])),
            PrimitiveType::Polygon => {
                Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![]))
            }
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_type().name())
    }
}

/// Anything that names a geometry type: the tag itself or its name.
pub trait IntoGeometryType {
    fn into_geometry_type(self) -> Result<GeometryType>;
}

impl IntoGeometryType for GeometryType {
    fn into_geometry_type(self) -> Result<GeometryType> {
        Ok(self)
    }
}

impl IntoGeometryType for &str {
    fn into_geometry_type(self) -> Result<GeometryType> {
        self.parse()
    }
}

impl IntoGeometryType for &String {
    fn into_geometry_type(self) -> Result<GeometryType> {
        self.parse()
    }
}

impl IntoGeometryType for String {
    fn into_geometry_type(self) -> Result<GeometryType> {
        self.parse()
    }
}

/// Resolve a geometry type from a tag or a (case-insensitive) name.
pub fn to_geometry_type(input: impl IntoGeometryType) -> Result<GeometryType> {
    input.into_geometry_type()
}

/// Convert a geometry type to its Multi* variant.
pub fn to_multi_variant(input: impl IntoGeometryType) -> Result<GeometryType> {
    input.into_geometry_type()?.to_multi()
}

/// Get the primitive type for a geometry type.
pub fn to_primitive_type(input: impl IntoGeometryType) -> Result<PrimitiveType> {
    input.into_geometry_type()?.primitive()
}
