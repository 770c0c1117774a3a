//! The demonstration scene: a ground plane, two linked portals, a field of
//! small random spheres and three large feature spheres.

use anyhow::{Context, Result};
use gate_renderer::sampling::{gen_f32, gen_range_f32, random_color, random_color_range};
use gate_renderer::{Color, Material, Point3, Portal, Scene, Sphere, Vec3};
use rand::RngCore;
use std::sync::Arc;

pub fn build_scene(rng: &mut dyn RngCore) -> Result<Scene> {
    let mut scene = Scene::new();

    // Ground
    scene.add_sphere(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5))),
    ));

    // Portal fluids are replaced by the link below
    let unlinked = Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    let first = scene.add_portal(Portal::new(
        Point3::new(-4.0, 3.0, 5.0),
        Vec3::new(-1.0, 0.0, 0.0),
        4.0,
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::clone(&unlinked),
    ));
    let second = scene.add_portal(Portal::new(
        Point3::new(5.0, 3.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        4.0,
        Vec3::new(-1.0, 1.0, 0.0),
        1.0,
        unlinked,
    ));
    scene
        .link_portals(first, second)
        .context("failed to link demo portals")?;

    // Small random spheres
    let glass = Arc::new(Material::dielectric(1.5));
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(rng) * random_color(rng);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };
            scene.add_sphere(Sphere::new(center, 0.2, material));
        }
    }

    // Three large feature spheres
    scene.add_sphere(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));
    scene.add_sphere(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    ));
    scene.add_sphere(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    log::debug!(
        "Demo scene built: {} objects, {} portals",
        scene.len(),
        scene.portal_count()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_renderer::{Object, PortalId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_scene_layout() {
        let mut rng = StdRng::seed_from_u64(0);
        let scene = build_scene(&mut rng).unwrap();

        assert_eq!(scene.portal_count(), 2);
        // ground + 2 portals + at most 22x22 small spheres + 3 feature spheres
        assert!(scene.len() > 3 + 2 + 400);
        assert!(scene.len() <= 1 + 2 + 22 * 22 + 3);
        assert!(matches!(scene.objects()[1], Object::Portal(_)));
    }

    #[test]
    fn test_demo_portals_are_linked() {
        let mut rng = StdRng::seed_from_u64(0);
        let scene = build_scene(&mut rng).unwrap();
        let ids: Vec<PortalId> = scene
            .objects()
            .iter()
            .filter_map(|o| match o {
                Object::Portal(id) => Some(*id),
                Object::Sphere(_) => None,
            })
            .collect();

        let first = scene.portal(ids[0]).unwrap();
        let second = scene.portal(ids[1]).unwrap();
        assert_eq!(first.fluid(), &Material::portal_fluid(ids[1]));
        assert_eq!(second.fluid(), &Material::portal_fluid(ids[0]));
    }

    #[test]
    fn test_demo_scene_is_seeded() {
        let a = build_scene(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = build_scene(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.len(), b.len());
    }
}
