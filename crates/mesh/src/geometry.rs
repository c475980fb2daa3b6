//! Vertex and bounding extent.

/// A 2-D point in double precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box over a set of vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Elementwise min/max over `vertices`.
    ///
    /// An empty slice yields an extent of NaNs.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let Some(first) = vertices.first() else {
            return Self {
                min_x: f64::NAN,
                max_x: f64::NAN,
                min_y: f64::NAN,
                max_y: f64::NAN,
            };
        };

        vertices.iter().skip(1).fold(
            Self {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |e, v| Self {
                min_x: e.min_x.min(v.x),
                max_x: e.max_x.max(v.x),
                min_y: e.min_y.min(v.y),
                max_y: e.max_y.max(v.y),
            },
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
