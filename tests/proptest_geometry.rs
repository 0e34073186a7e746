use posecount::geometry::{angle_at, CoordinateMapper, ScaleMode};
use posecount::pose::{Coord, Dimensions, Pixel};
use proptest::prelude::*;

mod proptest_helpers;

use proptest_helpers::approx_eq;

fn pixel((x, y): (f64, f64)) -> Coord<Pixel> {
    Coord::new(x, y)
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn fit_keeps_unit_square_on_surface(
        image in proptest_helpers::arb_dimensions(),
        surface in proptest_helpers::arb_dimensions(),
        x in 0.0f64..=1.0,
        y in 0.0f64..=1.0,
    ) {
        let mapper = CoordinateMapper::new(image, surface, ScaleMode::Fit).expect("mapper");
        let at = mapper.map(Coord::new(x, y));

        prop_assert!(at.x <= surface.width as f64 * (1.0 + 1e-12));
        prop_assert!(at.y <= surface.height as f64 * (1.0 + 1e-12));
    }

    #[test]
    fn fill_covers_surface(
        image in proptest_helpers::arb_dimensions(),
        surface in proptest_helpers::arb_dimensions(),
    ) {
        let mapper = CoordinateMapper::new(image, surface, ScaleMode::Fill).expect("mapper");
        let corner = mapper.map(Coord::new(1.0, 1.0));

        prop_assert!(corner.x >= surface.width as f64 * (1.0 - 1e-12));
        prop_assert!(corner.y >= surface.height as f64 * (1.0 - 1e-12));
    }

    #[test]
    fn fill_never_scales_less_than_fit(
        image in proptest_helpers::arb_dimensions(),
        surface in proptest_helpers::arb_dimensions(),
    ) {
        let fit = CoordinateMapper::new(image, surface, ScaleMode::Fit).expect("fit");
        let fill = CoordinateMapper::new(image, surface, ScaleMode::Fill).expect("fill");
        prop_assert!(fill.scale_factor() >= fit.scale_factor());
    }

    #[test]
    fn growing_surface_scales_mapped_points(
        image in proptest_helpers::arb_dimensions(),
        w in 1u32..1024,
        h in 1u32..1024,
        k in 1u32..4,
        fill in any::<bool>(),
        x in 0.0f64..=1.0,
        y in 0.0f64..=1.0,
    ) {
        let mode = if fill { ScaleMode::Fill } else { ScaleMode::Fit };
        let small = CoordinateMapper::new(image, Dimensions::new(w, h), mode).expect("small");
        let large = CoordinateMapper::new(image, Dimensions::new(w * k, h * k), mode).expect("large");

        let a = small.map(Coord::new(x, y));
        let b = large.map(Coord::new(x, y));
        prop_assert!(approx_eq(b.x, a.x * k as f64), "{} vs {}", b.x, a.x * k as f64);
        prop_assert!(approx_eq(b.y, a.y * k as f64), "{} vs {}", b.y, a.y * k as f64);
    }

    #[test]
    fn joint_scaling_keeps_scale_factor(
        iw in 1u32..1024,
        ih in 1u32..1024,
        sw in 0u32..1024,
        sh in 0u32..1024,
        k in 1u32..4,
        fill in any::<bool>(),
        x in 0.0f64..=1.0,
        y in 0.0f64..=1.0,
    ) {
        let mode = if fill { ScaleMode::Fill } else { ScaleMode::Fit };
        let base = CoordinateMapper::new(Dimensions::new(iw, ih), Dimensions::new(sw, sh), mode)
            .expect("base");
        let scaled = CoordinateMapper::new(
            Dimensions::new(iw * k, ih * k),
            Dimensions::new(sw * k, sh * k),
            mode,
        )
        .expect("scaled");

        prop_assert!(
            approx_eq(scaled.scale_factor(), base.scale_factor()),
            "{} vs {}",
            scaled.scale_factor(),
            base.scale_factor()
        );

        // The output is multiplied by the image size, so it grows with k.
        let a = base.map(Coord::new(x, y));
        let b = scaled.map(Coord::new(x, y));
        prop_assert!(approx_eq(b.x, a.x * k as f64), "{} vs {}", b.x, a.x * k as f64);
        prop_assert!(approx_eq(b.y, a.y * k as f64), "{} vs {}", b.y, a.y * k as f64);
    }

    #[test]
    fn angle_stays_in_half_open_range(
        a in proptest_helpers::arb_grid_point(),
        v in proptest_helpers::arb_grid_point(),
        b in proptest_helpers::arb_grid_point(),
    ) {
        let degrees = angle_at(pixel(a), pixel(v), pixel(b));
        prop_assert!((0.0..360.0).contains(&degrees), "got {}", degrees);
    }

    #[test]
    fn swapping_rays_gives_the_other_side(
        a in proptest_helpers::arb_grid_point(),
        v in proptest_helpers::arb_grid_point(),
        b in proptest_helpers::arb_grid_point(),
    ) {
        let forward = angle_at(pixel(a), pixel(v), pixel(b));
        let backward = angle_at(pixel(b), pixel(v), pixel(a));
        let sum = forward + backward;

        // Both sides add up to a full turn, or both are zero when the rays
        // point the same way.
        prop_assert!((sum - 360.0).abs() < 1e-9 || sum.abs() < 1e-9, "sum {}", sum);
    }

    #[test]
    fn angle_ignores_uniform_translation(
        a in proptest_helpers::arb_grid_point(),
        v in proptest_helpers::arb_grid_point(),
        b in proptest_helpers::arb_grid_point(),
        dx in -50i32..=50,
        dy in -50i32..=50,
    ) {
        let shift = |(x, y): (f64, f64)| (x + dx as f64, y + dy as f64);
        let before = angle_at(pixel(a), pixel(v), pixel(b));
        let after = angle_at(pixel(shift(a)), pixel(shift(v)), pixel(shift(b)));
        prop_assert_eq!(before, after);
    }
}
