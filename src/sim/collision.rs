//! Collision detection
//!
//! Every collidable entity is a circle. Overlap is tested on squared
//! distances so the hot loop never takes a square root.

use glam::Vec2;

use super::state::{Mine, Player, PowerUp, Token};
use crate::circles_overlap;

/// A circle that takes part in collision checks
pub trait Collider {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// True when the two circles touch or overlap
    fn hits<C: Collider + ?Sized>(&self, other: &C) -> bool {
        circles_overlap(self.center(), self.radius(), other.center(), other.radius())
    }
}

macro_rules! impl_collider {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Collider for $ty {
                #[inline]
                fn center(&self) -> Vec2 {
                    self.pos
                }

                #[inline]
                fn radius(&self) -> f32 {
                    self.radius
                }
            }
        )*
    };
}

impl_collider!(Player, Token, Mine, PowerUp);

/// Indices of every item the player overlaps, in list order
pub fn overlapping<C: Collider>(player: &Player, items: &[C]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| player.hits(*item))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn token_at(id: u32, x: f32, y: f32) -> Token {
        Token {
            id,
            pos: Vec2::new(x, y),
            radius: TOKEN_RADIUS,
            pulse: 0.0,
        }
    }

    #[test]
    fn test_player_token_hit_at_sum_of_radii() {
        let mut player = Player::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        player.pos = Vec2::new(100.0, 100.0);

        let touching = token_at(1, 100.0 + PLAYER_RADIUS + TOKEN_RADIUS, 100.0);
        let apart = token_at(2, 100.0 + PLAYER_RADIUS + TOKEN_RADIUS + 0.01, 100.0);
        assert!(player.hits(&touching));
        assert!(!player.hits(&apart));
    }

    #[test]
    fn test_overlapping_keeps_list_order() {
        let mut player = Player::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        player.pos = Vec2::new(200.0, 200.0);
        let tokens = vec![
            token_at(1, 205.0, 200.0),
            token_at(2, 600.0, 200.0),
            token_at(3, 200.0, 190.0),
        ];
        assert_eq!(overlapping(&player, &tokens), vec![0, 2]);
    }

    #[test]
    fn test_mine_collider() {
        let mut player = Player::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        player.pos = Vec2::new(50.0, 50.0);
        let mine = Mine::new(1, Vec2::new(50.0, 50.0 + PLAYER_RADIUS + MINE_RADIUS), 0.0, 1.0);
        assert!(player.hits(&mine));
        assert!(mine.hits(&player));
    }
}
