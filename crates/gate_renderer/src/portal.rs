//! Rectangular portal surfaces and the arena that owns them.
//!
//! A pair of portals refer to each other through their fluid materials. The
//! materials store a [`PortalId`] rather than a pointer, and every lookup goes
//! through the [`PortalArena`] owned by the scene.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use gate_math::{Interval, Point3, Vec3};
use std::fmt;
use std::sync::Arc;

/// Below this `|dot(direction, normal)|` a ray is treated as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Index of a portal inside a [`PortalArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortalId(pub(crate) usize);

impl PortalId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PortalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "portal#{}", self.0)
    }
}

/// A bounded planar patch spanned by two orthogonal half-extent vectors.
#[derive(Debug, Clone)]
pub struct Portal {
    center: Point3,
    p: Vec3,
    q: Vec3,
    normal: Vec3,
    fluid: Arc<Material>,
}

impl Portal {
    /// Create a portal centred at `center`.
    ///
    /// `p` is kept as given (scaled to `p_scale`); `q` is re-derived so that it
    /// lies in the plane and is orthogonal to `p`, then scaled to `q_scale`.
    /// The normal is `unit(cross(q, p))`.
    pub fn new(
        center: Point3,
        q: Vec3,
        q_scale: f32,
        p: Vec3,
        p_scale: f32,
        fluid: Arc<Material>,
    ) -> Self {
        let p = p_scale * p.normalize();
        let normal = q.cross(p).normalize();
        let q = q_scale * p.cross(normal).normalize();

        Self {
            center,
            p,
            q,
            normal,
            fluid,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn p(&self) -> Vec3 {
        self.p
    }

    pub fn q(&self) -> Vec3 {
        self.q
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn fluid(&self) -> &Material {
        &self.fluid
    }

    /// Replace the material applied to rays that hit this portal.
    pub fn set_fluid(&mut self, fluid: Arc<Material>) {
        self.fluid = fluid;
    }

    /// World position of local coordinates `(q_coord, p_coord)`.
    pub fn point_at(&self, q_coord: f32, p_coord: f32) -> Point3 {
        self.center + p_coord * self.p + q_coord * self.q
    }
}

impl Hittable for Portal {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = self.normal.dot(self.center - ray.origin()) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        // Signed projections onto each half-extent, in units of that extent
        let offset = ray.at(t) - self.center;
        let q_coord = self.q.dot(offset) / self.q.length_squared();
        let p_coord = self.p.dot(offset) / self.p.length_squared();
        if q_coord.abs() > 1.0 || p_coord.abs() > 1.0 {
            return None;
        }

        let mut rec = HitRecord::new(ray, t, self.normal, &self.fluid);
        rec.local_uv = Some((q_coord, p_coord));
        Some(rec)
    }
}

/// Owns every portal in a scene. Ids are handed out in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PortalArena {
    portals: Vec<Portal>,
}

impl PortalArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a portal and return its id.
    pub fn push(&mut self, portal: Portal) -> PortalId {
        self.portals.push(portal);
        PortalId(self.portals.len() - 1)
    }

    pub fn get(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id.0)
    }

    pub fn get_mut(&mut self, id: PortalId) -> Option<&mut Portal> {
        self.portals.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }
}
