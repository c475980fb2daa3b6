//! Quad mesh reconstruction from cell centres and connectivity.
//!
//! FLO-2D stores only the centre of each square cell and the ids of its four
//! neighbours. The corners are synthesised here: the cell size is measured
//! once between two neighbouring centres, every cell contributes the four
//! corners at half that size from its centre, and corners shared between
//! cells are merged through a quantised coordinate key.

use std::collections::HashMap;
use std::path::Path;

use flo2d_mesh::{Face, Mesh, Vertex};
use tracing::debug;

use crate::error::IoError;
use crate::records::for_each_record;

/// Neighbour directions in the order they appear in the connectivity file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    fn slot(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// How the reference cell size is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellSizeProbe {
    /// Use the first neighbour found in N, E, S, W order, measured along
    /// that neighbour's axis.
    #[default]
    Directional,
    /// Only ever look at the northern neighbour. Reproduces meshes built by
    /// older FLO-2D readers.
    FirstSlot,
}

/// A cell centre with its neighbour references. The cell id is its position
/// in the cell list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCenter {
    pub x: f64,
    pub y: f64,
    /// Neighbour ids in N, E, S, W order; `None` on the domain boundary.
    pub neighbours: [Option<usize>; 4],
}

impl CellCenter {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            neighbours: [None; 4],
        }
    }

    pub fn neighbour(&self, direction: Direction) -> Option<usize> {
        self.neighbours[direction.slot()]
    }
}

/// Quantised vertex position used to merge coincident corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey {
    x: i64,
    y: i64,
}

impl VertexKey {
    fn new(v: Vertex, resolution: f64) -> Self {
        Self {
            x: (v.x * resolution).round() as i64,
            y: (v.y * resolution).round() as i64,
        }
    }
}

/// Corner offsets in SE, NE, NW, SW order, in units of half a cell.
const CORNERS: [(f64, f64); 4] = [(1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)];

/// Reconstructed mesh together with the per-face bed elevation.
#[derive(Debug, Clone)]
pub struct Topology {
    pub mesh: Mesh,
    /// Bed elevation of each face, in face order.
    pub elevations: Vec<f64>,
}

/// Parse the cell centre file: one `id x y` line per cell.
///
/// Ids are 1-based and must follow line order, since they are the ids the
/// connectivity file refers to.
///
/// # Errors
///
/// [`IoError::FileNotFound`] if the file is absent, [`IoError::UnknownFormat`]
/// for a line without exactly 3 numeric fields or an id out of sequence.
pub fn parse_cell_centers(path: &Path) -> Result<Vec<CellCenter>, IoError> {
    let mut cells = Vec::new();
    for_each_record(path, |r| {
        r.expect_len(3)?;
        let id = r.index(0)?;
        if id != cells.len() {
            return Err(r.format_error(format!(
                "cell id {} out of sequence, expected {}",
                id + 1,
                cells.len() + 1
            )));
        }
        cells.push(CellCenter::new(r.f64(1)?, r.f64(2)?));
        Ok(())
    })?;
    debug!(path = %path.display(), n_cells = cells.len(), "parsed cell centres");
    Ok(cells)
}

/// Parse the connectivity file into `cells` and return the bed elevations.
///
/// Each line is `id N E S W manning elevation`, with 1-based neighbour ids
/// and 0 for the boundary. Rows must be in cell id order so the returned
/// elevations line up with face ids.
///
/// # Errors
///
/// [`IoError::FileNotFound`] if the file is absent, [`IoError::UnknownFormat`]
/// for a malformed or out-of-order row, [`IoError::IncompatibleMesh`] if a
/// row or neighbour refers to a cell that does not exist or the row count
/// differs from the cell count.
pub fn parse_connectivity(path: &Path, cells: &mut [CellCenter]) -> Result<Vec<f64>, IoError> {
    let n_cells = cells.len();
    let mut elevations = Vec::with_capacity(n_cells);

    for_each_record(path, |r| {
        r.expect_len(7)?;
        let id = r.index(0)?;
        if id >= n_cells {
            return Err(IoError::IncompatibleMesh {
                reason: format!(
                    "{}:{}: connectivity for cell {} but only {n_cells} cell centres",
                    path.display(),
                    r.line(),
                    id + 1
                ),
            });
        }
        if id != elevations.len() {
            return Err(r.format_error(format!(
                "connectivity row for cell {} out of order, expected cell {}",
                id + 1,
                elevations.len() + 1
            )));
        }

        for slot in 0..4 {
            let neighbour = r.optional_index(slot + 1)?;
            if let Some(n) = neighbour
                && n >= n_cells
            {
                return Err(IoError::IncompatibleMesh {
                    reason: format!(
                        "{}:{}: cell {} has neighbour {} but only {n_cells} cells exist",
                        path.display(),
                        r.line(),
                        id + 1,
                        n + 1
                    ),
                });
            }
            cells[id].neighbours[slot] = neighbour;
        }

        elevations.push(r.f64(6)?);
        Ok(())
    })?;

    if elevations.len() != n_cells {
        return Err(IoError::IncompatibleMesh {
            reason: format!(
                "{} has {} rows for {n_cells} cells",
                path.display(),
                elevations.len()
            ),
        });
    }
    Ok(elevations)
}

/// Half the distance between the first cell with a neighbour and that
/// neighbour, along the axis of the direction probed.
///
/// # Errors
///
/// [`IoError::IncompatibleMesh`] if no cell has a neighbour or the measured
/// distance is not positive.
pub fn half_cell_size(cells: &[CellCenter], probe: CellSizeProbe) -> Result<f64, IoError> {
    for cell in cells {
        for direction in Direction::ALL {
            let slot = match probe {
                CellSizeProbe::Directional => direction,
                CellSizeProbe::FirstSlot => Direction::North,
            };
            let Some(n) = cell.neighbour(slot) else {
                continue;
            };
            let other = cells.get(n).ok_or_else(|| IoError::IncompatibleMesh {
                reason: format!("neighbour {} does not exist", n + 1),
            })?;
            let distance = if direction.is_vertical() {
                (other.y - cell.y).abs()
            } else {
                (other.x - cell.x).abs()
            };
            if !(distance.is_finite() && distance > 0.0) {
                return Err(IoError::IncompatibleMesh {
                    reason: format!("degenerate cell size {distance} measured to cell {}", n + 1),
                });
            }
            return Ok(distance / 2.0);
        }
    }

    Err(IoError::IncompatibleMesh {
        reason: "no cell has a neighbour, cannot derive the cell size".to_string(),
    })
}

/// Build quad faces around each cell centre, sharing coincident corners.
///
/// `resolution` is the number of key steps per coordinate unit used to
/// decide that two corners coincide.
pub fn build_faces(
    cells: &[CellCenter],
    half_cell_size: f64,
    resolution: f64,
) -> (Vec<Vertex>, Vec<Face>) {
    let mut vertices = Vec::with_capacity(cells.len() + 1);
    let mut faces = Vec::with_capacity(cells.len());
    let mut lookup: HashMap<VertexKey, usize> = HashMap::with_capacity(cells.len() + 1);

    for cell in cells {
        let mut face: Face = [0; 4];
        for (corner, &(sx, sy)) in CORNERS.iter().enumerate() {
            let v = Vertex::new(
                cell.x + sx * half_cell_size,
                cell.y + sy * half_cell_size,
            );
            face[corner] = *lookup
                .entry(VertexKey::new(v, resolution))
                .or_insert_with(|| {
                    vertices.push(v);
                    vertices.len() - 1
                });
        }
        faces.push(face);
    }

    (vertices, faces)
}

/// Parse both topology files and build the mesh.
///
/// # Errors
///
/// Propagates the errors of [`parse_cell_centers`], [`parse_connectivity`]
/// and [`half_cell_size`].
pub fn reconstruct(
    cadpts: &Path,
    fplain: &Path,
    uri: &str,
    probe: CellSizeProbe,
    resolution: f64,
) -> Result<Topology, IoError> {
    let mut cells = parse_cell_centers(cadpts)?;
    let elevations = parse_connectivity(fplain, &mut cells)?;
    let half = half_cell_size(&cells, probe)?;

    let (vertices, faces) = build_faces(&cells, half, resolution);
    debug!(
        n_cells = cells.len(),
        n_vertices = vertices.len(),
        half_cell_size = half,
        "reconstructed quad mesh"
    );

    let mesh = Mesh::new(uri, vertices, faces)?;
    Ok(Topology { mesh, elevations })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: f64, y: f64, n: [Option<usize>; 4]) -> CellCenter {
        CellCenter {
            x,
            y,
            neighbours: n,
        }
    }

    /// 2x2 grid of 10-unit cells, ids row by row from the south-west:
    /// 0 (5,5), 1 (15,5), 2 (5,15), 3 (15,15).
    fn grid_2x2() -> Vec<CellCenter> {
        vec![
            cell(5.0, 5.0, [Some(2), Some(1), None, None]),
            cell(15.0, 5.0, [Some(3), None, None, Some(0)]),
            cell(5.0, 15.0, [None, Some(3), Some(0), None]),
            cell(15.0, 15.0, [None, None, Some(1), Some(2)]),
        ]
    }

    #[test]
    fn half_cell_size_from_north_neighbour() {
        let h = half_cell_size(&grid_2x2(), CellSizeProbe::Directional).unwrap();
        assert_eq!(h, 5.0);
    }

    #[test]
    fn directional_probe_uses_east_neighbour_axis() {
        // Only an eastern neighbour, 8 units away horizontally.
        let cells = vec![
            cell(0.0, 0.0, [None, Some(1), None, None]),
            cell(8.0, 0.0, [None, None, None, Some(0)]),
        ];
        assert_eq!(
            half_cell_size(&cells, CellSizeProbe::Directional).unwrap(),
            4.0
        );
    }

    #[test]
    fn first_slot_probe_ignores_other_directions() {
        let cells = vec![
            cell(0.0, 0.0, [None, Some(1), None, None]),
            cell(8.0, 0.0, [None, None, None, Some(0)]),
        ];
        let err = half_cell_size(&cells, CellSizeProbe::FirstSlot).unwrap_err();
        assert!(matches!(err, IoError::IncompatibleMesh { .. }));
    }

    #[test]
    fn isolated_cells_are_incompatible() {
        let cells = vec![cell(0.0, 0.0, [None; 4]), cell(10.0, 0.0, [None; 4])];
        let err = half_cell_size(&cells, CellSizeProbe::Directional).unwrap_err();
        assert!(matches!(err, IoError::IncompatibleMesh { .. }));
    }

    #[test]
    fn coincident_centres_are_incompatible() {
        let cells = vec![
            cell(0.0, 0.0, [Some(1), None, None, None]),
            cell(0.0, 0.0, [None, None, Some(0), None]),
        ];
        assert!(half_cell_size(&cells, CellSizeProbe::Directional).is_err());
    }

    #[test]
    fn grid_2x2_shares_corners() {
        let (vertices, faces) = build_faces(&grid_2x2(), 5.0, 1000.0);
        assert_eq!(vertices.len(), 9);
        assert_eq!(faces.len(), 4);

        // Centre point (10,10) is NE of cell 0, NW of cell 1, SE of cell 2, SW of cell 3.
        let centre = faces[0][1];
        assert_eq!(vertices[centre], Vertex::new(10.0, 10.0));
        assert_eq!(faces[1][2], centre);
        assert_eq!(faces[2][0], centre);
        assert_eq!(faces[3][3], centre);
    }

    #[test]
    fn corner_order_is_se_ne_nw_sw() {
        let (vertices, faces) = build_faces(&[cell(0.0, 0.0, [None; 4])], 1.0, 1000.0);
        let corners: Vec<Vertex> = faces[0].iter().map(|&i| vertices[i]).collect();
        assert_eq!(
            corners,
            vec![
                Vertex::new(1.0, -1.0),
                Vertex::new(1.0, 1.0),
                Vertex::new(-1.0, 1.0),
                Vertex::new(-1.0, -1.0),
            ]
        );
    }

    #[test]
    fn nearly_equal_corners_merge() {
        // Centres carry rounding noise typical of text coordinates.
        let cells = vec![
            cell(0.1 + 0.2, 0.0, [None; 4]),
            cell(2.3, 0.0, [None; 4]),
        ];
        let (vertices, _) = build_faces(&cells, 1.0, 1000.0);
        assert_eq!(vertices.len(), 6);
    }

    #[test]
    fn points_with_colliding_scalar_key_stay_distinct() {
        // x*1e6 + y*1e3 is equal for (0, 1000) and (1, 0); quantised keys are not.
        let a = VertexKey::new(Vertex::new(0.0, 1000.0), 1000.0);
        let b = VertexKey::new(Vertex::new(1.0, 0.0), 1000.0);
        assert_ne!(a, b);
    }

    // -- parsing -------------------------------------------------------------

    const CENTRES: &str = "1 5 5\n2 15 5\n3 5 15\n4 15 15\n";

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn centres() -> Vec<CellCenter> {
        parse_cell_centers(write_temp(CENTRES).path()).unwrap()
    }

    #[test]
    fn parse_cell_centers_in_order() {
        let cells = centres();
        assert_eq!(cells.len(), 4);
        assert_eq!((cells[3].x, cells[3].y), (15.0, 15.0));
        assert!(cells.iter().all(|c| c.neighbours == [None; 4]));
    }

    #[test]
    fn cell_center_id_out_of_sequence() {
        let f = write_temp("1 5 5\n3 15 5\n");
        match parse_cell_centers(f.path()).unwrap_err() {
            IoError::UnknownFormat { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("out of sequence"));
            }
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn parse_connectivity_maps_zero_to_boundary() {
        let mut cells = centres();
        let f = write_temp(
            "1 3 2 0 0 0.03 100\n\
             2 4 0 0 1 0.03 101\n\
             3 0 4 1 0 0.03 102\n\
             4 0 0 2 3 0.03 103\n",
        );
        let elevations = parse_connectivity(f.path(), &mut cells).unwrap();
        assert_eq!(elevations, vec![100.0, 101.0, 102.0, 103.0]);
        assert_eq!(cells, grid_2x2());
    }

    #[test]
    fn connectivity_needs_seven_fields() {
        let mut cells = centres();
        let f = write_temp("1 3 2 0 0 100\n");
        let err = parse_connectivity(f.path(), &mut cells).unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat { line: 1, .. }));
    }

    #[test]
    fn connectivity_rows_out_of_order() {
        let mut cells = centres();
        let f = write_temp(
            "1 3 2 0 0 0.03 100\n\
             3 0 4 1 0 0.03 102\n",
        );
        match parse_connectivity(f.path(), &mut cells).unwrap_err() {
            IoError::UnknownFormat { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("out of order"));
            }
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn connectivity_row_beyond_cell_count() {
        let mut cells = centres();
        let f = write_temp("5 0 0 0 0 0.03 100\n");
        let err = parse_connectivity(f.path(), &mut cells).unwrap_err();
        assert!(matches!(err, IoError::IncompatibleMesh { .. }));
    }

    #[test]
    fn connectivity_neighbour_beyond_cell_count() {
        let mut cells = centres();
        let f = write_temp("1 9 2 0 0 0.03 100\n");
        match parse_connectivity(f.path(), &mut cells).unwrap_err() {
            IoError::IncompatibleMesh { reason } => {
                assert!(reason.contains(":1:"));
                assert!(reason.contains("neighbour 9"));
            }
            other => panic!("expected IncompatibleMesh, got {other:?}"),
        }
    }

    #[test]
    fn connectivity_row_count_must_match_cells() {
        let mut cells = centres();
        let f = write_temp(
            "1 3 2 0 0 0.03 100\n\
             2 4 0 0 1 0.03 101\n",
        );
        match parse_connectivity(f.path(), &mut cells).unwrap_err() {
            IoError::IncompatibleMesh { reason } => {
                assert!(reason.contains("2 rows for 4 cells"));
            }
            other => panic!("expected IncompatibleMesh, got {other:?}"),
        }
    }
}
