//! Triangulator.

use anyhow::{anyhow, bail, Context};
use cgmath::{InnerSpace, Point3, Vector2, Vector3};
use log::debug;

use crate::data::{GeometryMesh, Polygon};

/// Returns a copy of the geometry with every polygon split into triangles.
///
/// Loops are shared with the source polygon, so only the polygon list
/// changes. Polygons which cannot be triangulated are kept as they are.
///
/// Fails if a polygon references a missing loop or vertex.
pub fn triangulate(geometry: &GeometryMesh) -> anyhow::Result<GeometryMesh> {
    let mut polygons = Vec::with_capacity(geometry.polygons.len());
    let mut triangles = Vec::new();
    for (index, polygon) in geometry.polygons.iter().enumerate() {
        for &l in &polygon.loops {
            get_vec(geometry, l).with_context(|| format!("Invalid polygon {}", index))?;
        }
        triangles.clear();
        match triangulator(geometry, &polygon.loops, &mut triangles) {
            Ok(()) => polygons.extend(triangles.iter().map(|&tri| Polygon::new(tri))),
            Err(e) => {
                debug!("Polygon {} is left as is: {}", index, e);
                polygons.push(polygon.clone());
            }
        }
    }

    Ok(GeometryMesh {
        polygons,
        ..geometry.clone()
    })
}

/// Triangulates a polygon given as loop indices.
fn triangulator(
    geometry: &GeometryMesh,
    poly_loops: &[usize],
    results: &mut Vec<[usize; 3]>,
) -> anyhow::Result<()> {
    /// Returns the vector by loop indices.
    macro_rules! get_vec {
        ($li:expr) => {
            get_vec(geometry, poly_loops[$li])
        };
    }

    match poly_loops.len() {
        n @ 0..=2 => {
            // It is impossible to triangulate a point, line, or "nothing".
            bail!("Not enough vertices in the polygon: length={}", n);
        }
        3 => {
            results.push([poly_loops[0], poly_loops[1], poly_loops[2]]);
            Ok(())
        }
        4 => {
            let p0 = get_vec!(0)?;
            let p1 = get_vec!(1)?;
            let p2 = get_vec!(2)?;
            let p3 = get_vec!(3)?;
            // n1, n3: normals of the corners 1 and 3.
            // They point to the same side only when both corners are convex
            // or both are concave.
            let n1 = (p0 - p1).cross(p1 - p2);
            let n3 = (p2 - p3).cross(p3 - p0);
            if n1.dot(n3) >= 0.0 {
                // Cut from p0 to p2.
                results.extend_from_slice(&[
                    [poly_loops[0], poly_loops[1], poly_loops[2]],
                    [poly_loops[2], poly_loops[3], poly_loops[0]],
                ]);
            } else {
                // Cut from p1 to p3.
                results.extend_from_slice(&[
                    [poly_loops[0], poly_loops[1], poly_loops[3]],
                    [poly_loops[3], poly_loops[1], poly_loops[2]],
                ]);
            }
            Ok(())
        }
        n => {
            let points = (0..n).map(|i| get_vec!(i)).collect::<Result<Vec<_>, _>>()?;
            let (min, max) =
                bounding_box(&points).ok_or_else(|| anyhow!("Empty polygon: length={}", n))?;
            // Project onto the plane of the two widest axes.
            let points_2d: Vec<_> = match smallest_direction(&(max - min)) {
                Axis::X => points.iter().map(|v| Vector2::new(v.y, v.z)).collect(),
                Axis::Y => points.iter().map(|v| Vector2::new(v.x, v.z)).collect(),
                Axis::Z => points.iter().map(|v| Vector2::new(v.x, v.y)).collect(),
            };
            // Turning direction at each corner.
            let normal_directions = {
                // 0 ... n-1
                let iter_cur = points_2d.iter();
                // n-1, 0, ... n-2
                let iter_prev = points_2d.iter().cycle().skip(n - 1);
                // 1, ... n-1, 0
                let iter_next = points_2d.iter().cycle().skip(1);
                iter_cur
                    .zip(iter_prev)
                    .zip(iter_next)
                    .map(|((cur, prev), next)| {
                        let prev_cur = prev - cur;
                        let cur_next = cur - next;
                        prev_cur.perp_dot(cur_next) > 0.0
                    })
                    .collect::<Vec<_>>()
            };

            let dirs_true_count = normal_directions.iter().filter(|&&v| v).count();
            if dirs_true_count <= 1 || dirs_true_count >= n - 1 {
                // Zero or one corner is concave.
                let minor_sign = dirs_true_count <= 1;
                // With no concave corner, fan from the first one.
                let convex_index = normal_directions
                    .iter()
                    .position(|&sign| sign == minor_sign)
                    .unwrap_or(0);

                let convex_loop = poly_loops[convex_index];
                let iter1 = (0..n)
                    .cycle()
                    .skip(convex_index + 1)
                    .take(n - 2)
                    .map(|i| poly_loops[i]);
                let iter2 = (0..n).cycle().skip(convex_index + 2).map(|i| poly_loops[i]);
                for (loop1, loop2) in iter1.zip(iter2) {
                    results.push([convex_loop, loop1, loop2]);
                }
                Ok(())
            } else {
                bail!(
                    "Unsupported polygon: {}-gon with two or more concave angles",
                    n
                );
            }
        }
    }
}

/// Returns the position of the loop's vertex.
fn get_vec(geometry: &GeometryMesh, loop_index: usize) -> anyhow::Result<Point3<f64>> {
    let vertex = geometry
        .loop_vertex(loop_index)
        .ok_or_else(|| anyhow!("Loop index out of range: {}", loop_index))?;
    let p = geometry
        .position(vertex)
        .ok_or_else(|| anyhow!("Vertex index out of range: {}", vertex))?;
    Ok(Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
}

/// Returns bounding box as `(min, max)`.
fn bounding_box<'a>(
    points: impl IntoIterator<Item = &'a Point3<f64>>,
) -> Option<(Point3<f64>, Point3<f64>)> {
    points.into_iter().fold(None, |minmax, point| {
        minmax.map_or_else(
            || Some((*point, *point)),
            |(min, max)| {
                Some((
                    Point3 {
                        x: min.x.min(point.x),
                        y: min.y.min(point.y),
                        z: min.z.min(point.z),
                    },
                    Point3 {
                        x: max.x.max(point.x),
                        y: max.y.max(point.y),
                        z: max.z.max(point.z),
                    },
                ))
            },
        )
    })
}

/// Axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// X.
    X,
    /// Y.
    Y,
    /// Z.
    Z,
}

/// Returns smallest direction.
fn smallest_direction(v: &Vector3<f64>) -> Axis {
    if v.x < v.y {
        if v.z < v.x {
            Axis::Z
        } else {
            Axis::X
        }
    } else if v.z < v.y {
        Axis::Z
    } else {
        Axis::Y
    }
}
