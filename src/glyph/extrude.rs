//! Extrusion of flat outlines into closed solid meshes
//!
//! Caps come from lyon's fill tessellator, side walls from the flattened
//! contours. Every triangle is wound so that its geometric normal agrees with
//! the stored vertex normal.

use bevy::asset::RenderAssetUsages;
use bevy::math::{Vec2, Vec3};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use lyon::path::iterator::PathIterator;
use lyon::path::{Path, PathEvent};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

use super::GlyphError;

/// Triangle mesh produced by [`extrude_path`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtrudedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl ExtrudedMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Shift the mesh so its x/y bounds are centered on the origin
    pub fn center_xy(&mut self) {
        let Some((min, max)) = self.bounds() else {
            return;
        };
        let offset = -(min + max).with_z(0.0) * 0.5;
        for p in &mut self.positions {
            *p = (Vec3::from_array(*p) + offset).to_array();
        }
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_indices(Indices::U32(self.indices))
    }

    /// Add a triangle, flipping its winding if needed so it faces `normal`
    fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, normal: Vec3) {
        let (b, c) = if (b - a).cross(c - a).dot(normal) < 0.0 {
            (c, b)
        } else {
            (b, c)
        };
        let base = self.positions.len() as u32;
        self.positions
            .extend_from_slice(&[a.to_array(), b.to_array(), c.to_array()]);
        self.normals.extend_from_slice(&[normal.to_array(); 3]);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Add a quad p0-p1-p2-p3 as two triangles facing `normal`
    fn add_quad(&mut self, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, normal: Vec3) {
        self.add_triangle(p0, p1, p2, normal);
        self.add_triangle(p0, p2, p3, normal);
    }
}

/// Flatten a path into closed polylines.
///
/// Curves are approximated within `tolerance`; the closing point is not
/// repeated.
pub fn flatten_contours(path: &Path, tolerance: f32) -> Vec<Vec<Vec2>> {
    let mut contours = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    for event in path.iter().flattened(tolerance) {
        match event {
            PathEvent::Begin { at } => {
                current.clear();
                current.push(Vec2::new(at.x, at.y));
            }
            PathEvent::Line { to, .. } => {
                current.push(Vec2::new(to.x, to.y));
            }
            PathEvent::End { .. } => {
                if current.len() > 1 && current.first() == current.last() {
                    current.pop();
                }
                if current.len() >= 3 {
                    contours.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
            // Flattening only yields lines
            PathEvent::Quadratic { .. } | PathEvent::Cubic { .. } => {}
        }
    }

    contours
}

/// Non-zero winding number of `point` with respect to closed contours
pub fn winding_number(point: Vec2, contours: &[Vec<Vec2>]) -> i32 {
    let mut winding = 0;
    for contour in contours {
        for (i, &a) in contour.iter().enumerate() {
            let b = contour[(i + 1) % contour.len()];
            let side = (b - a).perp_dot(point - a);
            if a.y <= point.y {
                if b.y > point.y && side > 0.0 {
                    winding += 1;
                }
            } else if b.y <= point.y && side < 0.0 {
                winding -= 1;
            }
        }
    }
    winding
}

/// Decide on which side of a contour the filled area lies.
///
/// Returns `true` when the material is on the left of the travel direction.
fn material_on_left(contour: &[Vec2], contours: &[Vec<Vec2>]) -> bool {
    // Probe next to the longest edge, it gives the most reliable answer
    let Some((a, b)) = (0..contour.len())
        .map(|i| (contour[i], contour[(i + 1) % contour.len()]))
        .max_by(|(a0, b0), (a1, b1)| a0.distance_squared(*b0).total_cmp(&a1.distance_squared(*b1)))
    else {
        return true;
    };
    let dir = b - a;
    let len = dir.length();
    if len <= f32::EPSILON {
        return true;
    }
    let left = Vec2::new(-dir.y, dir.x) / len;
    let sample = (a + b) * 0.5 + left * (len * 1e-3).max(1e-5);
    winding_number(sample, contours) != 0
}

/// Extrude a closed path along +Z from `z = 0` to `z = depth`.
///
/// The front cap (`z = depth`) faces +Z, the back cap faces -Z, side walls
/// face away from the filled area.
pub fn extrude_path(path: &Path, depth: f32, tolerance: f32) -> Result<ExtrudedMesh, GlyphError> {
    let mut caps: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let options = FillOptions::tolerance(tolerance).with_fill_rule(FillRule::NonZero);
    FillTessellator::new()
        .tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut caps, |v: FillVertex| v.position().to_array()),
        )
        .map_err(|e| GlyphError::Tessellation(format!("{e:?}")))?;

    let mut mesh = ExtrudedMesh::default();

    for tri in caps.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec2::from_array(caps.vertices[i as usize]));
        mesh.add_triangle(a.extend(depth), b.extend(depth), c.extend(depth), Vec3::Z);
        mesh.add_triangle(a.extend(0.0), b.extend(0.0), c.extend(0.0), Vec3::NEG_Z);
    }

    let contours = flatten_contours(path, tolerance);
    for contour in &contours {
        let outward_is_right = material_on_left(contour, &contours);
        for (i, &a) in contour.iter().enumerate() {
            let b = contour[(i + 1) % contour.len()];
            let dir = b - a;
            if dir.length_squared() <= f32::EPSILON * f32::EPSILON {
                continue;
            }
            let left = Vec2::new(-dir.y, dir.x).normalize();
            let outward = if outward_is_right { -left } else { left };
            mesh.add_quad(
                a.extend(0.0),
                b.extend(0.0),
                b.extend(depth),
                a.extend(depth),
                outward.extend(0.0),
            );
        }
    }

    if mesh.is_empty() {
        return Err(GlyphError::EmptyOutline);
    }
    Ok(mesh)
}
