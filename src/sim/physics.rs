//! Bird physics: gravity integration and flap impulse

use super::state::Avatar;

/// Advance the bird by `dt_ticks` ticks of gravity, then clamp it on-surface.
///
/// Touching the ceiling or ground is not lethal; the bird just stops there.
pub fn integrate(avatar: &mut Avatar, surface_height: f32, dt_ticks: f32) {
    avatar.velocity += avatar.gravity * dt_ticks;
    avatar.pos.y += avatar.velocity * dt_ticks;

    let max_y = avatar.max_y(surface_height);
    avatar.pos.y = avatar.pos.y.min(max_y).max(0.0);
}

/// Replace the current velocity with the upward lift.
///
/// Unconditional: callers gate this on the session being in play.
#[inline]
pub fn flap(avatar: &mut Avatar) {
    avatar.velocity = avatar.lift;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Surface;
    use proptest::prelude::*;

    fn bird() -> Avatar {
        Avatar::spawn(&GameConfig::default(), Surface::new(800.0, 600.0))
    }

    #[test]
    fn test_one_tick_of_gravity() {
        let mut avatar = bird();
        assert_eq!(avatar.pos.y, 300.0);

        integrate(&mut avatar, 600.0, 1.0);
        assert!((avatar.velocity - 0.8).abs() < 0.0001);
        assert!((avatar.pos.y - 300.8).abs() < 0.0001);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut avatar = bird();
        avatar.velocity = 25.0;
        flap(&mut avatar);
        assert_eq!(avatar.velocity, -12.0);

        avatar.velocity = -30.0;
        flap(&mut avatar);
        assert_eq!(avatar.velocity, -12.0);
    }

    #[test]
    fn test_clamps_at_ground_and_ceiling() {
        let mut avatar = bird();
        avatar.pos.y = 565.0;
        avatar.velocity = 20.0;
        integrate(&mut avatar, 600.0, 1.0);
        assert_eq!(avatar.pos.y, 570.0);

        avatar.pos.y = 3.0;
        avatar.velocity = -12.0;
        integrate(&mut avatar, 600.0, 1.0);
        assert_eq!(avatar.pos.y, 0.0);
        // Clamping leaves velocity alone
        assert!((avatar.velocity + 11.2).abs() < 0.0001);
    }

    #[test]
    fn test_surface_shorter_than_bird() {
        let mut avatar = bird();
        integrate(&mut avatar, 10.0, 1.0);
        assert_eq!(avatar.pos.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_y_stays_on_surface(
            start in 0.0f32..570.0,
            velocity in -50.0f32..50.0,
            flaps in proptest::collection::vec(any::<bool>(), 1..200),
        ) {
            let mut avatar = bird();
            avatar.pos.y = start;
            avatar.velocity = velocity;
            for flapped in flaps {
                if flapped {
                    flap(&mut avatar);
                }
                integrate(&mut avatar, 600.0, 1.0);
                prop_assert!(avatar.pos.y >= 0.0);
                prop_assert!(avatar.pos.y <= 600.0 - avatar.height);
            }
        }
    }
}
