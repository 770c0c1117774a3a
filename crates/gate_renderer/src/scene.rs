//! The world: an ordered list of surfaces plus the portal arena.

use crate::hittable::{HitRecord, Hittable};
use crate::portal::{Portal, PortalArena, PortalId};
use crate::{Material, Ray, Sphere};
use gate_math::Interval;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling a scene.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown portal: {0}")]
    UnknownPortal(PortalId),

    #[error("cannot link {0} to itself")]
    SelfLink(PortalId),
}

/// A surface in the scene. Portals live in the arena and are referenced by id.
#[derive(Debug, Clone)]
pub enum Object {
    Sphere(Sphere),
    Portal(PortalId),
}

/// An append-only collection of surfaces, read-only once rendering starts.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
    portals: PortalArena,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.objects.push(Object::Sphere(sphere));
    }

    /// Add a portal to the scene and the arena.
    pub fn add_portal(&mut self, portal: Portal) -> PortalId {
        let id = self.portals.push(portal);
        self.objects.push(Object::Portal(id));
        id
    }

    /// Make `a` and `b` teleport into each other.
    ///
    /// Replaces whatever fluid either portal had with a portal fluid pointing
    /// at the other one.
    pub fn link_portals(&mut self, a: PortalId, b: PortalId) -> Result<(), SceneError> {
        if a == b {
            return Err(SceneError::SelfLink(a));
        }
        for id in [a, b] {
            if self.portals.get(id).is_none() {
                return Err(SceneError::UnknownPortal(id));
            }
        }

        for (from, to) in [(a, b), (b, a)] {
            if let Some(portal) = self.portals.get_mut(from) {
                portal.set_fluid(Arc::new(Material::portal_fluid(to)));
            }
        }

        log::debug!("Linked {} <-> {}", a, b);
        Ok(())
    }

    pub fn portal(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id)
    }

    pub fn portals(&self) -> &PortalArena {
        &self.portals
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn portal_count(&self) -> usize {
        self.portals.len()
    }

    fn hit_object<'a>(&'a self, object: &'a Object, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match object {
            Object::Sphere(sphere) => sphere.hit(ray, ray_t),
            Object::Portal(id) => self.portals.get(*id)?.hit(ray, ray_t),
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = self.hit_object(object, ray, Interval::new(ray_t.min, max)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use gate_math::Vec3;

    fn diffuse(c: f32) -> Arc<Material> {
        Arc::new(Material::lambertian(Color::splat(c)))
    }

    fn square(center: Vec3) -> Portal {
        Portal::new(center, Vec3::X, 1.0, Vec3::Y, 1.0, diffuse(0.5))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.hit(&Ray::default(), Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let near = diffuse(0.1);
        let far = diffuse(0.9);
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, Arc::clone(&far)));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Arc::clone(&near)));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-4);
        assert_eq!(rec.material, near.as_ref());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_portal_in_front_of_sphere() {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, diffuse(0.5)));
        let id = scene.add_portal(square(Vec3::new(0.0, 0.0, -2.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(rec.local_uv.is_some());
        assert_eq!(scene.portal_count(), 1);
        assert!(scene.portal(id).is_some());
    }

    #[test]
    fn test_link_portals() {
        let mut scene = Scene::new();
        let a = scene.add_portal(square(Vec3::new(-3.0, 0.0, 0.0)));
        let b = scene.add_portal(square(Vec3::new(3.0, 0.0, 0.0)));

        scene.link_portals(a, b).unwrap();

        assert_eq!(scene.portal(a).unwrap().fluid(), &Material::portal_fluid(b));
        assert_eq!(scene.portal(b).unwrap().fluid(), &Material::portal_fluid(a));
    }

    #[test]
    fn test_link_portals_errors() {
        let mut scene = Scene::new();
        let a = scene.add_portal(square(Vec3::ZERO));

        assert_eq!(scene.link_portals(a, a), Err(SceneError::SelfLink(a)));
        assert_eq!(
            scene.link_portals(a, PortalId(7)),
            Err(SceneError::UnknownPortal(PortalId(7)))
        );
        assert_eq!(
            SceneError::UnknownPortal(PortalId(7)).to_string(),
            "unknown portal: portal#7"
        );
        // Failed link leaves the original fluid in place
        assert_eq!(scene.portal(a).unwrap().fluid(), &Material::lambertian(Color::splat(0.5)));
    }
}
