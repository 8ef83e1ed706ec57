//! # Ray Intersection
//!
//! Ray tests against sets of scene nodes, used by the collision guard to
//! probe the space ahead of the viewer.
//!
//! ## How it works
//!
//! 1. **Bound**: each candidate node's geometry is boxed in local space
//! 2. **Transform**: the box is carried into world space through the node's
//!    composed transform
//! 3. **Slab test**: the ray is tested against the world-space box; hits are
//!    collected with their distance and returned nearest-first
//!
//! Recursive casts descend into child hierarchies, so tagging a container
//! node covers everything under it.

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4, Zero};

use super::{Geometry, NodeId, Scene};

// Planes are boxed with a small half-depth so no slab degenerates to zero
// extent (0 * inf = NaN in the slab test).
const PLANE_HALF_DEPTH: f32 = 1e-3;

/// A 3D ray for intersection testing.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new Aabb
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create an Aabb from a set of points
    pub fn from_points(points: &[[f32; 3]]) -> Self {
        if points.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(points[0][0], points[0][1], points[0][2]);
        let mut max = min;

        for point in points.iter().skip(1) {
            let p = Vector3::new(point[0], point[1], point[2]);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Self::new(min, max)
    }

    /// Local-space bounds of a node geometry, centered on the origin.
    pub fn of_geometry(geometry: &Geometry) -> Self {
        match *geometry {
            Geometry::Plane { width, height } => Self::new(
                Vector3::new(-width / 2.0, -height / 2.0, -PLANE_HALF_DEPTH),
                Vector3::new(width / 2.0, height / 2.0, PLANE_HALF_DEPTH),
            ),
            Geometry::Box {
                width,
                height,
                depth,
            } => Self::new(
                Vector3::new(-width / 2.0, -height / 2.0, -depth / 2.0),
                Vector3::new(width / 2.0, height / 2.0, depth / 2.0),
            ),
        }
    }

    /// Test ray-Aabb intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the Aabb
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners and re-bound
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let p = matrix * homogeneous;
            transformed.push([p.x / p.w, p.y / p.w, p.z / p.w]);
        }

        Self::from_points(&transformed)
    }
}

/// A single ray intersection.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Node whose geometry was struck
    pub node: NodeId,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Casts a ray against a set of nodes, returning hits ordered by ascending
/// distance.
///
/// Stale ids in `targets` are skipped, as are nodes without geometry. With
/// `recursive` set, child hierarchies under each target are tested too.
pub fn raycast(scene: &Scene, ray: &Ray, targets: &[NodeId], recursive: bool) -> Vec<RayHit> {
    let mut hits = Vec::new();
    for &id in targets {
        if scene.contains(id) {
            test_node(scene, ray, id, recursive, &mut hits);
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn test_node(scene: &Scene, ray: &Ray, id: NodeId, recursive: bool, hits: &mut Vec<RayHit>) {
    let Some(node) = scene.get(id) else {
        return;
    };

    if let Some(geometry) = &node.geometry {
        if let Some(world) = scene.world_transform(id) {
            let aabb = Aabb::of_geometry(geometry).transform(&world);
            if let Some(distance) = aabb.intersect_ray(ray) {
                hits.push(RayHit {
                    node: id,
                    distance,
                    point: ray.point_at(distance),
                });
            }
        }
    }

    if recursive {
        for &child in scene.children(id) {
            test_node(scene, ray, child, recursive, hits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;
    use cgmath::{Deg, Quaternion, Rotation3};

    #[test]
    fn test_aabb_creation() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_points(&points);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray).is_some());

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_raycast_orders_hits_by_distance() {
        let mut scene = Scene::new();
        let near = scene.spawn(
            Node::new()
                .with_position(Vector3::new(0.0, 0.0, -2.0))
                .with_geometry(Geometry::Plane {
                    width: 2.0,
                    height: 2.0,
                }),
        );
        let far = scene.spawn(
            Node::new()
                .with_position(Vector3::new(0.0, 0.0, -5.0))
                .with_geometry(Geometry::Plane {
                    width: 2.0,
                    height: 2.0,
                }),
        );

        let ray = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let hits = raycast(&scene, &ray, &[far, near], false);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert_eq!(hits[1].node, far);
        assert!((hits[0].distance - 2.0).abs() < 1e-2);
        assert!((hits[1].distance - 5.0).abs() < 1e-2);
    }

    #[test]
    fn test_raycast_respects_node_rotation() {
        let mut scene = Scene::new();
        // Plane yawed 90 degrees now faces +X; a ray down -Z slips past it,
        // a ray down -X from the side strikes it
        let wall = scene.spawn(
            Node::new()
                .with_position(Vector3::new(-3.0, 0.0, 0.0))
                .with_rotation(Quaternion::from_angle_y(Deg(90.0)))
                .with_geometry(Geometry::Plane {
                    width: 2.0,
                    height: 2.0,
                }),
        );

        let down_x = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(raycast(&scene, &down_x, &[wall], false).len(), 1);

        let down_z = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(raycast(&scene, &down_z, &[wall], false).is_empty());
    }

    #[test]
    fn test_recursive_cast_descends_into_children() {
        let mut scene = Scene::new();
        let group = scene.spawn(Node::new().with_position(Vector3::new(0.0, 0.0, -4.0)));
        let child = scene.spawn_child(
            group,
            Node::new().with_geometry(Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            }),
        );

        let ray = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(raycast(&scene, &ray, &[group], false).is_empty());

        let hits = raycast(&scene, &ray, &[group], true);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, child);
    }

    #[test]
    fn test_stale_targets_are_skipped() {
        let mut scene = Scene::new();
        let wall = scene.spawn(
            Node::new()
                .with_position(Vector3::new(0.0, 0.0, -2.0))
                .with_geometry(Geometry::Plane {
                    width: 2.0,
                    height: 2.0,
                }),
        );
        scene.despawn(wall);

        let ray = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(raycast(&scene, &ray, &[wall], true).is_empty());
    }
}
