use glam::DVec3;
use polarkit_core::shared;
use polarkit_visualizer::{OrbitCamera, PolarAxesActor, RecordingViewport, Renderable};
use proptest::prelude::*;

fn viewport() -> RecordingViewport {
    RecordingViewport::new(400, 300)
}

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

proptest! {
    #[test]
    fn prop_axes_split_the_angle_evenly(count in 2usize..=50, angle in 0.0f64..=360.0) {
        let mut actor = PolarAxesActor::new();
        actor.set_number_of_radial_axes(count);
        actor.set_maximum_angle(angle);
        actor.build_axes(&viewport());

        let axes = actor.radial_axes();
        prop_assert_eq!(axes.len(), count);
        prop_assert_eq!(axes[0].angle(), 0.0);
        prop_assert_eq!(axes[count - 1].angle(), angle);

        let step = angle / (count - 1) as f64;
        for pair in axes.windows(2) {
            prop_assert!(approx(pair[1].angle() - pair[0].angle(), step, 1e-9));
        }
    }

    #[test]
    fn prop_axis_count_is_clamped(count in 0usize..500) {
        let mut actor = PolarAxesActor::new();
        actor.set_number_of_radial_axes(count);
        actor.build_axes(&viewport());
        prop_assert_eq!(actor.radial_axes().len(), count.clamp(2, 50));
    }

    #[test]
    fn prop_angle_and_radius_are_clamped(angle in -1.0e3f64..1.0e3, radius in -1.0e3f64..1.0e3) {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_angle(angle);
        actor.set_maximum_radius(radius);
        prop_assert!((0.0..=360.0).contains(&actor.maximum_angle()));
        prop_assert!(actor.maximum_radius() >= 0.0);
    }

    #[test]
    fn prop_ticks_increase_to_the_radius(radius in 1.0e-3f64..1.0e6, count in 2usize..=20, subdivide in any::<bool>()) {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(radius);
        actor.set_number_of_polar_ticks(count);
        actor.set_auto_subdivide_polar_axis(subdivide);
        actor.build_axes(&viewport());

        let radii: Vec<f64> = actor.tick_set().radii().collect();
        prop_assert_eq!(radii[0], 0.0);
        prop_assert_eq!(*radii.last().unwrap(), radius);
        prop_assert!(radii.windows(2).all(|w| w[0] < w[1]));
        if !subdivide {
            prop_assert_eq!(radii.len(), count);
        }
    }

    #[test]
    fn prop_auto_labels_share_precision(radius in 1.0e-2f64..1.0e5, subdivide in any::<bool>()) {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(radius);
        actor.set_auto_subdivide_polar_axis(subdivide);
        actor.build_axes(&viewport());

        let decimals: Vec<usize> = actor
            .tick_set()
            .labels()
            .map(|l| l.split_once('.').map_or(0, |(_, frac)| frac.len()))
            .collect();
        prop_assert!(decimals.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn prop_labels_strictly_increase(radius in 1.0e-3f64..1.0e6, count in 2usize..=20, subdivide in any::<bool>()) {
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(radius);
        actor.set_number_of_polar_ticks(count);
        actor.set_auto_subdivide_polar_axis(subdivide);
        actor.build_axes(&viewport());

        let values: Vec<f64> = actor
            .tick_set()
            .labels()
            .map(|l| l.parse::<f64>().unwrap())
            .collect();
        prop_assert!(values.len() >= 2);
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]), "labels {:?}", values);
    }

    #[test]
    fn prop_render_twice_is_stable(radius in 0.5f64..20.0, count in 2usize..12, angle in 1.0f64..=360.0) {
        let mut camera = OrbitCamera::new(DVec3::ZERO, 80.0);
        camera.set_top_view();
        let mut actor = PolarAxesActor::new();
        actor.set_maximum_radius(radius);
        actor.set_number_of_radial_axes(count);
        actor.set_maximum_angle(angle);
        actor.set_camera(shared(camera));

        let mut viewport = RecordingViewport::new(300, 300);
        let first = actor.render_opaque_geometry(&mut viewport);
        let recorded = viewport.commands().to_vec();
        viewport.clear();
        let second = actor.render_opaque_geometry(&mut viewport);

        prop_assert!(first.rebuilt);
        prop_assert!(!second.rebuilt);
        prop_assert_eq!(first.draw_calls, second.draw_calls);
        prop_assert_eq!(viewport.commands(), recorded.as_slice());
    }
}
