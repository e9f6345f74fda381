//! Flatten the scene into a line-list vertex stream
//!
//! Every polyline segment becomes one vertex pair with the node transform
//! applied on the CPU. Draw order is back to front: grid, circle, polygon,
//! revolution, axis.

use glam::Mat4;

use super::vertex::Vertex;
use crate::geometry::Polyline;
use crate::scene::Scene;

fn push_polyline(out: &mut Vec<Vertex>, line: &Polyline, transform: &Mat4) {
    out.reserve(line.segment_count() * 2);
    let colored: Vec<Vertex> = line
        .points
        .iter()
        .zip(&line.colors)
        .map(|(point, color)| {
            let p = transform.transform_point3(*point);
            Vertex::new(p.x, p.y, p.z, color.with_alpha(line.opacity))
        })
        .collect();

    for pair in colored.windows(2) {
        out.push(pair[0]);
        out.push(pair[1]);
    }
}

fn push_lines<'a>(out: &mut Vec<Vertex>, transform: Mat4, lines: impl IntoIterator<Item = &'a Polyline>) {
    for line in lines {
        push_polyline(out, line, &transform);
    }
}

/// All visible scene lines as `LineList` vertices
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut out = Vec::new();

    if let Some(grid) = scene.grid.drawable() {
        push_lines(&mut out, scene.grid.transform.matrix(), &grid.lines);
    }
    if let Some(circle) = scene.circle.drawable() {
        push_lines(&mut out, scene.circle.transform.matrix(), [&circle.outline]);
    }
    if let Some(polygon) = scene.polygon.drawable() {
        let lines = polygon.radials.iter().chain([&polygon.outline]);
        push_lines(&mut out, scene.polygon.transform.matrix(), lines);
    }
    if let Some(revolution) = scene.revolution.drawable() {
        let rings = revolution.rings.iter().map(|ring| &ring.line);
        push_lines(&mut out, scene.revolution.transform.matrix(), revolution.meridians.iter().chain(rings));
    }
    if let Some(axis) = scene.axis.drawable() {
        push_lines(&mut out, scene.axis.transform.matrix(), [axis]);
    }

    out
}
