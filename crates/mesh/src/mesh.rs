//! Faces and the mesh container.

use crate::dataset::{DataLocation, DatasetGroup};
use crate::error::MeshError;
use crate::geometry::{Extent, Vertex};

/// A quad face: four vertex indices in SE, NE, NW, SW corner order.
pub type Face = [usize; 4];

/// Vertices, faces and the dataset groups defined on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    uri: String,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    extent: Extent,
    groups: Vec<DatasetGroup>,
}

impl Mesh {
    /// Creates a mesh after checking every face index against the vertex
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::FaceIndexOutOfRange`] for the first face that
    /// references a missing vertex.
    pub fn new(
        uri: impl Into<String>,
        vertices: Vec<Vertex>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&vertex) = indices.iter().find(|&&v| v >= vertex_count) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }

        let extent = Extent::from_vertices(&vertices);
        Ok(Self {
            uri: uri.into(),
            vertices,
            faces,
            extent,
            groups: Vec::new(),
        })
    }

    /// Appends a dataset group.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ElementCountMismatch`] if the group does not
    /// cover exactly the mesh's faces (or vertices, for vertex groups).
    pub fn add_group(&mut self, group: DatasetGroup) -> Result<(), MeshError> {
        let expected = match group.location() {
            DataLocation::Faces => self.face_count(),
            DataLocation::Vertices => self.vertex_count(),
        };
        if group.element_count() != expected {
            return Err(MeshError::ElementCountMismatch {
                group: group.name().to_string(),
                expected,
                got: group.element_count(),
            });
        }
        self.groups.push(group);
        Ok(())
    }

    /// Locator of the file the mesh was loaded from.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Largest number of vertices on a single face.
    pub fn face_vertex_max(&self) -> usize {
        if self.faces.is_empty() { 0 } else { 4 }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn groups(&self) -> &[DatasetGroup] {
        &self.groups
    }

    /// First group called `name`.
    pub fn group(&self, name: &str) -> Option<&DatasetGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ValueKind;

    fn unit_square() -> Mesh {
        let vertices = vec![
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(0.0, 1.0),
            Vertex::new(0.0, 0.0),
        ];
        Mesh::new("mem", vertices, vec![[0, 1, 2, 3]]).unwrap()
    }

    #[test]
    fn new_computes_extent() {
        let mesh = unit_square();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.extent().max_x, 1.0);
        assert_eq!(mesh.extent().min_y, 0.0);
        assert_eq!(mesh.face_vertex_max(), 4);
    }

    #[test]
    fn new_rejects_dangling_index() {
        let vertices = vec![Vertex::new(0.0, 0.0); 4];
        let err = Mesh::new("mem", vertices, vec![[0, 1, 2, 4]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::FaceIndexOutOfRange {
                face: 0,
                vertex: 4,
                vertex_count: 4,
            }
        );
    }

    #[test]
    fn add_group_checks_element_count() {
        let mut mesh = unit_square();
        let ok = DatasetGroup::new("a", "mem", DataLocation::Faces, ValueKind::Scalar, 1);
        let wrong = DatasetGroup::new("b", "mem", DataLocation::Faces, ValueKind::Scalar, 4);
        let on_vertices =
            DatasetGroup::new("c", "mem", DataLocation::Vertices, ValueKind::Scalar, 4);

        mesh.add_group(ok).unwrap();
        assert!(matches!(
            mesh.add_group(wrong),
            Err(MeshError::ElementCountMismatch { .. })
        ));
        mesh.add_group(on_vertices).unwrap();

        assert_eq!(mesh.groups().len(), 2);
        assert!(mesh.group("a").is_some());
        assert!(mesh.group("b").is_none());
    }
}
