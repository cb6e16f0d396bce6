use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use std::f32::consts::TAU;

/// Point list mesh, one vertex per particle. Positions are replaced every frame.
pub fn point_cloud_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh
}

pub fn set_point_positions(mesh: &mut Mesh, positions: Vec<[f32; 3]>) {
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
}

/// Cylinder wall without top and bottom caps, centred on the origin
pub fn open_cylinder_mesh(radius: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let half_height = height / 2.0;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    // One bottom and one top vertex per column; the seam column is duplicated for uvs
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let normal = [sin, 0.0, cos];

        positions.push([radius * sin, -half_height, radius * cos]);
        positions.push([radius * sin, half_height, radius * cos]);
        normals.push(normal);
        normals.push(normal);
        uvs.push([u, 1.0]);
        uvs.push([u, 0.0]);
    }

    for i in 0..segments {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;

        indices.extend_from_slice(&[bottom, next_bottom, top, top, next_bottom, next_top]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
