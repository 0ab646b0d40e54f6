//! Geometry primitives shared by input and output records.

use serde::{Deserialize, Deserializer, Serialize};

/// A point on a page, in the page's unit.
///
/// Serializes as a two-element array `[x, y]`. Deserializes from either
/// `[x, y]` or `{"x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointRepr", into = "[f64; 2]")]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl From<PointRepr> for Point {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Pair([x, y]) => Point { x, y },
            PointRepr::Object { x, y } => Point { x, y },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolygonRepr {
    Flat(Vec<f64>),
    Points(Vec<Point>),
}

/// Deserialize a polygon from the flat `[x1, y1, x2, y2, ...]` wire form or
/// from a list of points.
pub(crate) fn deserialize_polygon<'de, D>(deserializer: D) -> Result<Vec<Point>, D::Error>
where
    D: Deserializer<'de>,
{
    match PolygonRepr::deserialize(deserializer)? {
        PolygonRepr::Flat(coords) => {
            if coords.len() % 2 != 0 {
                return Err(serde::de::Error::custom(format!(
                    "polygon has an odd number of coordinates ({})",
                    coords.len()
                )));
            }
            Ok(coords
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect())
        }
        PolygonRepr::Points(points) => Ok(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_polygon")]
        polygon: Vec<Point>,
    }

    #[test]
    fn test_point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, 2.25)).unwrap();
        assert_eq!(json, "[1.5,2.25]");
    }

    #[test]
    fn test_point_from_object() {
        let point: Point = serde_json::from_str(r#"{"x": 0.5, "y": 3}"#).unwrap();
        assert_eq!(point, Point::new(0.5, 3.0));
    }

    #[test]
    fn test_flat_polygon() {
        let holder: Holder =
            serde_json::from_str(r#"{"polygon": [1, 2, 3, 2, 3, 4, 1, 4]}"#).unwrap();
        assert_eq!(holder.polygon.len(), 4);
        assert_eq!(holder.polygon[2], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_pair_polygon() {
        let holder: Holder = serde_json::from_str(r#"{"polygon": [[1, 2], [3, 2]]}"#).unwrap();
        assert_eq!(holder.polygon, vec![Point::new(1.0, 2.0), Point::new(3.0, 2.0)]);
    }

    #[test]
    fn test_odd_flat_polygon_rejected() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"polygon": [1, 2, 3]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_polygon() {
        let holder: Holder = serde_json::from_str(r#"{"polygon": []}"#).unwrap();
        assert!(holder.polygon.is_empty());
    }
}
