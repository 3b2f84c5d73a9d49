use fireworks_wasm::firework::{BurstSet, FireworkSpec, ParticleCloud};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn cloud_points_sit_in_the_radius_band() {
    let mut rng = StdRng::seed_from_u64(7);
    let radius = 2.0;
    let cloud = ParticleCloud::generate(&mut rng, 500, radius);

    assert_eq!(cloud.len(), 500);
    assert_eq!(cloud.positions.len(), 1500);
    for p in cloud.positions.chunks_exact(3) {
        let r = Vec3::from_slice(p).length();
        assert!(r >= 0.75 * radius - 1e-4 && r <= radius + 1e-4, "r = {r}");
    }
    assert!(cloud.sizes.iter().all(|s| (0.0..1.0).contains(s)));
    assert!(cloud.timers.iter().all(|t| (1.0..=2.0).contains(t)));
}

#[test]
fn seeded_clouds_are_reproducible() {
    let a = ParticleCloud::generate(&mut StdRng::seed_from_u64(3), 64, 1.0);
    let b = ParticleCloud::generate(&mut StdRng::seed_from_u64(3), 64, 1.0);
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.timers, b.timers);
}

#[test]
fn random_specs_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let spec = FireworkSpec::random(&mut rng, 8);
        assert!((400..=1400).contains(&spec.count));
        assert!(spec.position.x.abs() <= 7.5 && spec.position.z.abs() <= 7.5);
        assert!((0.0..1.0).contains(&spec.position.y));
        assert!((0.2..=0.4).contains(&spec.size));
        assert!(spec.texture < 8);
        assert!((2.0..=3.5).contains(&spec.radius));
    }
}

#[test]
fn opening_burst_is_small_and_centred() {
    let spec = FireworkSpec::opening(&mut StdRng::seed_from_u64(0), 8);
    assert_eq!(spec.count, 100);
    assert_eq!(spec.position, Vec3::ZERO);
    assert_eq!(spec.radius, 1.0);
    assert_eq!(spec.color.to_hex(), 0x00ffff);
}

#[test]
fn burst_is_released_once_when_its_time_is_up() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut set = BurstSet::new(3.0);
    set.spawn(FireworkSpec::opening(&mut rng, 8), "first");

    let mut last = 0.0;
    for _ in 0..5 {
        assert!(set.advance(0.5).is_empty());
        let progress = set.iter().next().unwrap().progress();
        assert!(progress >= last && progress < 1.0);
        last = progress;
    }

    set.spawn(FireworkSpec::opening(&mut rng, 8), "second");
    assert_eq!(set.advance(0.5), vec!["first"]);
    assert_eq!(set.len(), 1);
    assert!(set.advance(0.5).is_empty());

    assert_eq!(set.advance(10.0), vec!["second"]);
    assert!(set.is_empty());
    assert!(set.advance(1.0).is_empty());
}
