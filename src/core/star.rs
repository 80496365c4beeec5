use rand::Rng;

use crate::{
    config,
    geom::{lerp, proximity, Aabb},
    types::{StarColor, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub alive: bool,
    pub initial_radius: f32,
    pub radius: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub dur: f32,
    pub color: StarColor,
}

impl Default for Star {
    fn default() -> Self {
        Self {
            alive: false,
            initial_radius: config::STAR_RADIUS_MIN,
            radius: config::STAR_RADIUS_MIN,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            dur: 0.0,
            color: StarColor::WHITE,
        }
    }
}

impl Star {
    pub fn spawn<R: Rng + ?Sized>(bounds: &Aabb, rng: &mut R) -> Self {
        let mut star = Star {
            color: random_star_color(rng),
            ..Star::default()
        };
        star.recycle(bounds, rng);
        star
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, bounds: &Aabb, steer: Vec2, rng: &mut R) {
        self.alive = bounds.contains(self.pos) && self.dur < config::MAX_DURATION;
        if !self.alive {
            self.recycle(bounds, rng);
        } else {
            self.dur += dt;
            self.radius = self.initial_radius + self.dur / config::MAX_DURATION;
            self.pos += (self.vel - steer) * dt;
        }
    }

    pub fn recycle<R: Rng + ?Sized>(&mut self, bounds: &Aabb, rng: &mut R) {
        self.alive = true;
        self.dur = 0.0;
        self.initial_radius = config::STAR_RADIUS_MIN + rng.r#gen::<f32>();
        self.radius = self.initial_radius;

        self.pos = Vec2::new(
            lerp(bounds.x_min, bounds.x_max, rng.r#gen::<f32>()),
            lerp(bounds.y_min, bounds.y_max, rng.r#gen::<f32>()),
        );
        self.vel = self.pos - bounds.center();
    }
}

pub fn random_star_hue<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let hue = rng.r#gen::<f32>() * config::STAR_HUE_ARC - config::STAR_HUE_ARC / 2.0;
    if hue >= 0.0 {
        hue
    } else {
        hue + config::STAR_HUE_WRAP
    }
}

pub fn saturation_for_hue<R: Rng + ?Sized>(hue: f32, rng: &mut R) -> f32 {
    let rand_sat = rng.r#gen::<f64>().powf(config::STAR_SATURATION_EXPONENT) as f32;
    let yellowness = proximity(hue, config::YELLOW_HUE, config::YELLOW_HUE_CUTOFF);
    lerp(rand_sat, 1.0, yellowness)
}

pub fn random_star_color<R: Rng + ?Sized>(rng: &mut R) -> StarColor {
    let hue = random_star_hue(rng);
    StarColor::from_hsv(hue, saturation_for_hue(hue, rng), 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn bounds() -> Aabb {
        Aabb::new(-100.0, 100.0, -50.0, 50.0)
    }

    mod recycle {
        use super::*;

        #[test]
        fn revives_star_inside_bounds() {
            let mut rng = StdRng::seed_from_u64(7);
            let mut star = Star::default();
            assert!(!star.alive);
            star.dur = 3.0;
            star.recycle(&bounds(), &mut rng);
            assert!(star.alive);
            assert_eq!(star.dur, 0.0);
            assert!(bounds().contains(star.pos));
        }

        #[test]
        fn velocity_points_away_from_center() {
            let mut rng = StdRng::seed_from_u64(11);
            let b = Aabb::new(10.0, 30.0, 10.0, 30.0);
            let mut star = Star::default();
            star.recycle(&b, &mut rng);
            assert_eq!(star.vel, star.pos - Vec2::new(20.0, 20.0));
        }

        #[test]
        fn initial_radius_in_unit_range_above_min() {
            let mut rng = StdRng::seed_from_u64(3);
            let mut star = Star::default();
            for _ in 0..100 {
                star.recycle(&bounds(), &mut rng);
                assert!(star.initial_radius >= 1.0 && star.initial_radius < 2.0);
                assert_eq!(star.radius, star.initial_radius);
            }
        }

        #[test]
        fn keeps_colour() {
            let mut rng = StdRng::seed_from_u64(5);
            let mut star = Star::spawn(&bounds(), &mut rng);
            let color = star.color;
            star.recycle(&bounds(), &mut rng);
            assert_eq!(star.color, color);
        }
    }

    mod update {
        use super::*;

        fn resting_star() -> Star {
            Star {
                alive: true,
                pos: Vec2::new(10.0, 5.0),
                vel: Vec2::new(2.0, 1.0),
                ..Star::default()
            }
        }

        #[test]
        fn advances_position_by_velocity_minus_steer() {
            let mut rng = StdRng::seed_from_u64(1);
            let mut star = resting_star();
            star.update(0.5, &bounds(), Vec2::new(4.0, -2.0), &mut rng);
            assert!(star.alive);
            assert_eq!(star.pos, Vec2::new(9.0, 6.5));
            assert_eq!(star.dur, 0.5);
        }

        #[test]
        fn radius_grows_with_age() {
            let mut rng = StdRng::seed_from_u64(1);
            let mut star = resting_star();
            star.update(3.5, &bounds(), Vec2::ZERO, &mut rng);
            assert!((star.radius - (star.initial_radius + 0.5)).abs() < 1e-6);
        }

        #[test]
        fn star_outside_bounds_is_recycled_in_same_call() {
            let mut rng = StdRng::seed_from_u64(2);
            let mut star = Star {
                pos: Vec2::new(500.0, 0.0),
                dur: 2.0,
                ..resting_star()
            };
            star.update(0.1, &bounds(), Vec2::ZERO, &mut rng);
            assert!(star.alive);
            assert_eq!(star.dur, 0.0);
            assert!(bounds().contains(star.pos));
        }

        #[test]
        fn expired_star_recycles_exactly_once() {
            let mut rng = StdRng::seed_from_u64(9);
            let mut star = Star {
                vel: Vec2::ZERO,
                ..resting_star()
            };
            let dt = 0.5;
            let mut recycles = 0;
            // 7 s of life needs 14 steps; the 15th sees dur == MAX_DURATION.
            for _ in 0..15 {
                let before = star.dur;
                star.update(dt, &bounds(), Vec2::ZERO, &mut rng);
                assert!(star.alive);
                if star.dur < before {
                    recycles += 1;
                }
            }
            assert_eq!(recycles, 1);
            assert_eq!(star.dur, 0.0);
        }
    }

    mod colour {
        use super::*;

        #[test]
        fn hue_skips_greens_and_purples() {
            let mut rng = StdRng::seed_from_u64(42);
            for _ in 0..1000 {
                let hue = random_star_hue(&mut rng);
                assert!(
                    (0.0..60.0).contains(&hue) || (180.0..240.0).contains(&hue),
                    "unexpected hue {hue}"
                );
            }
        }

        #[test]
        fn exact_yellow_is_fully_saturated() {
            let mut rng = StdRng::seed_from_u64(42);
            for _ in 0..50 {
                assert_eq!(saturation_for_hue(60.0, &mut rng), 1.0);
            }
        }

        #[test]
        fn saturation_is_biased_low_away_from_yellow() {
            let mut rng = StdRng::seed_from_u64(42);
            let n = 2000;
            let mean: f32 =
                (0..n).map(|_| saturation_for_hue(200.0, &mut rng)).sum::<f32>() / n as f32;
            // E[u^5.2] = 1 / 6.2
            assert!(mean < 0.25, "mean saturation {mean}");
        }

        #[test]
        fn value_is_full_brightness() {
            let mut rng = StdRng::seed_from_u64(8);
            for _ in 0..200 {
                let c = random_star_color(&mut rng);
                assert_eq!(c.r.max(c.g).max(c.b), 255);
            }
        }
    }

    proptest! {
        #[test]
        fn recycle_always_lands_inside_bounds(
            seed in any::<u64>(),
            x in -500f32..500.0,
            w in 1f32..1000.0,
            y in -500f32..500.0,
            h in 1f32..1000.0,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let b = Aabb::new(x, x + w, y, y + h);
            let star = Star::spawn(&b, &mut rng);
            prop_assert!(star.alive);
            prop_assert_eq!(star.dur, 0.0);
            prop_assert!(b.contains(star.pos));
        }
    }
}
