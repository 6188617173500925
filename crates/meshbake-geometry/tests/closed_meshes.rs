//! Validation and Gauss–Bonnet checks on closed meshes.

use std::f32::consts::PI;

use glam::Vec3;
use meshbake_core::RawMeshRecord;
use meshbake_geometry::*;
use proptest::prelude::*;

/// Unit cube made of six outward-wound quads.
fn cube_record(scale: Vec3, offset: Vec3) -> RawMeshRecord {
    let positions = (0..8)
        .map(|i| {
            let corner = Vec3::new(
                f32::from(u8::from(i & 1 != 0)),
                f32::from(u8::from(i & 2 != 0)),
                f32::from(u8::from(i & 4 != 0)),
            );
            corner * scale + offset
        })
        .collect();
    RawMeshRecord::from_polygons(
        positions,
        &[
            vec![0, 2, 3, 1], // -z
            vec![4, 5, 7, 6], // +z
            vec![0, 1, 5, 4], // -y
            vec![2, 6, 7, 3], // +y
            vec![0, 4, 6, 2], // -x
            vec![1, 3, 7, 5], // +x
        ],
    )
}

/// Cube where every quad carries its own copy of its four corners.
fn split_cube_record() -> RawMeshRecord {
    let cube = cube_record(Vec3::ONE, Vec3::ZERO);
    let mut positions = Vec::new();
    let mut faces = Vec::new();
    for face in &cube.faces {
        let mut polygon = Vec::new();
        for corner in face {
            polygon.push(u32::try_from(positions.len()).unwrap());
            positions.push(cube.positions[corner.position as usize]);
        }
        faces.push(polygon);
    }
    RawMeshRecord::from_polygons(positions, &faces)
}

fn icosahedron_record(radius: f32) -> RawMeshRecord {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    let positions = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize() * radius)
    .to_vec();
    let faces: Vec<Vec<u32>> = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ]
    .iter()
    .map(|f| f.to_vec())
    .collect();
    RawMeshRecord::from_polygons(positions, &faces)
}

fn total_angle_defect(record: &RawMeshRecord) -> f32 {
    let mesh = CanonicalMesh::from_record(record).unwrap();
    assert_eq!(check_surface(&mesh.triangle_vertices()), Ok(()));
    let topo = Topology::from_mesh(&mesh);
    Geometry::new(&mesh.positions, &topo)
        .total_angle_defect()
        .unwrap()
}

#[test]
fn test_cube_is_closed_surface() {
    let mesh = CanonicalMesh::from_record(&cube_record(Vec3::ONE, Vec3::ZERO)).unwrap();
    assert_eq!(mesh.num_triangles(), 12);
    assert_eq!(check_surface(&mesh.triangle_vertices()), Ok(()));
}

#[test]
fn test_cube_missing_face_is_open() {
    let mut record = cube_record(Vec3::ONE, Vec3::ZERO);
    record.faces.pop();
    let mesh = CanonicalMesh::from_record(&record).unwrap();
    assert!(matches!(
        check_surface(&mesh.triangle_vertices()),
        Err(SurfaceDefect::MissingTwin { .. })
    ));
}

#[test]
fn test_split_cube_is_welded_by_compression() {
    let record = split_cube_record();
    assert_eq!(record.positions.len(), 24);
    let mesh = CanonicalMesh::from_record(&record).unwrap();
    assert_eq!(mesh.num_vertices(), 8);
    assert_eq!(check_surface(&mesh.triangle_vertices()), Ok(()));
}

#[test]
fn test_gauss_bonnet_cube() {
    assert!((total_angle_defect(&cube_record(Vec3::ONE, Vec3::ZERO)) - 4.0 * PI).abs() < 1e-3);
}

#[test]
fn test_gauss_bonnet_icosahedron() {
    assert!((total_angle_defect(&icosahedron_record(1.0)) - 4.0 * PI).abs() < 1e-3);
}

#[test]
fn test_icosahedron_full_derivation() {
    let mut mesh = CanonicalMesh::from_record(&icosahedron_record(1.0)).unwrap();
    let topo = Topology::from_mesh(&mesh);
    assert_eq!(synthesize_normals(&mut mesh, &topo, 5).unwrap(), 12);
    finalize_curvature(&mut mesh, &topo, 5).unwrap();

    // Synthesized normals of a vertex-regular solid point along the position.
    for (v, p) in mesh.positions.iter().enumerate() {
        let n = mesh.normals[v];
        assert!((n - p.normalize()).length() < 1e-4);
    }
    // Gaussian curvature integrates to 4π over the dual areas.
    let geo = Geometry::new(&mesh.positions, &topo);
    let integrated: f32 = (0..12u32)
        .map(|v| mesh.curvatures[v as usize].x * geo.circumcentric_dual_area(v).unwrap())
        .sum();
    assert!((integrated - 4.0 * PI).abs() < 1e-3);
}

proptest! {
    #[test]
    fn prop_gauss_bonnet_boxes(
        sx in 0.1f32..10.0,
        sy in 0.1f32..10.0,
        sz in 0.1f32..10.0,
        ox in -5.0f32..5.0,
        oy in -5.0f32..5.0,
        oz in -5.0f32..5.0,
    ) {
        let record = cube_record(Vec3::new(sx, sy, sz), Vec3::new(ox, oy, oz));
        prop_assert!((total_angle_defect(&record) - 4.0 * PI).abs() < 1e-3);
    }

    #[test]
    fn prop_gauss_bonnet_icosahedra(radius in 0.05f32..50.0) {
        prop_assert!((total_angle_defect(&icosahedron_record(radius)) - 4.0 * PI).abs() < 1e-3);
    }
}
