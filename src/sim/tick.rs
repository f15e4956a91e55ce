//! Per-frame simulation tick
//!
//! Core game loop step. There is no timestep: velocities are pixels per tick
//! and the host decides the cadence.

use serde::{Deserialize, Serialize};

use super::collision::{bottomed_out, paddle_bounce_velocity, paddle_contact, reflect_off_walls};
use super::state::{GameEvent, RunMode, Session};

/// Player intent sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
}

/// Advance the session by one tick.
///
/// No-op unless the session is Running. Order within a tick: paddle move,
/// ball move, wall reflection, bottom-out, paddle bounce, block hits,
/// round-clear check. A bottom-out ends the tick.
pub fn tick(session: &mut Session, input: &InputIntent) {
    if session.mode != RunMode::Running {
        return;
    }

    session.time_ticks += 1;
    let board_width = session.tuning.board_width;

    // Paddle
    if input.left {
        session.paddle.move_left();
    }
    if input.right {
        session.paddle.move_right(board_width);
    }

    // Ball
    session.ball.pos += session.ball.vel;
    reflect_off_walls(&session.ball.rect(), &mut session.ball.vel, board_width);

    if bottomed_out(&session.ball.rect(), session.tuning.board_height) {
        session.end_game();
        return;
    }

    resolve_paddle(session);
    let destroyed = resolve_blocks(session);

    // Round clear; a grid that was never dealt has nothing to clear
    if !session.blocks.is_empty() && session.blocks.all_destroyed() {
        if session.score < session.tuning.max_score {
            session.next_round();
        } else if destroyed > 0 {
            session.push_event(GameEvent::MaxScoreReached {
                score: session.score,
            });
        }
    }
}

/// Bounce off the paddle with a hit-offset dependent angle
fn resolve_paddle(session: &mut Session) {
    let paddle = session.paddle.rect();
    if !paddle_contact(&session.ball.rect(), &paddle) {
        return;
    }

    let tuning = &session.tuning;
    session.ball.vel = paddle_bounce_velocity(
        session.ball.center_x(),
        session.paddle.center_x(),
        session.paddle.width,
        tuning.ball_speed,
        tuning.max_deflection,
    );
    if tuning.snap_ball_to_paddle {
        session.ball.pos.y = paddle.top() - session.ball.size;
    }
    session.push_event(GameEvent::PaddleHit);
}

/// Destroy every standing block under the ball; returns how many fell
fn resolve_blocks(session: &mut Session) -> u32 {
    let ball = session.ball.rect();
    let reward = session.tuning.block_reward;
    let mut destroyed = 0;
    let mut hits = Vec::new();

    for block in session.blocks.blocks_mut() {
        if block.destroyed || !block.rect.overlaps(&ball) {
            continue;
        }
        block.destroyed = true;
        destroyed += 1;
        hits.push((block.row, block.column));
    }

    for (row, column) in hits {
        // One vertical flip per block, regardless of which face was struck
        session.ball.vel.y = -session.ball.vel.y;
        session.score += reward;
        session.push_event(GameEvent::BlockDestroyed {
            row,
            column,
            score: session.score,
        });
    }

    destroyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::Highscore;
    use crate::sim::state::BlockGrid;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_session() -> Session {
        let mut session = Session::new(Tuning::default(), Highscore::default()).unwrap();
        session.start().unwrap();
        session.drain_events();
        session
    }

    fn destroy_all(session: &mut Session) {
        for block in session.blocks.blocks_mut() {
            block.destroyed = true;
        }
    }

    #[test]
    fn test_tick_moves_ball() {
        let mut s = running_session();
        assert_eq!(s.ball.pos, Vec2::new(310.0, 250.0));
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.ball.pos, Vec2::new(310.0, 246.0));
        assert_eq!(s.ball.vel, Vec2::new(0.0, -4.0));
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_tick_noop_unless_running() {
        let mut s = Session::new(Tuning::default(), Highscore::default()).unwrap();
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.ball.pos, Vec2::new(310.0, 250.0));

        s.start().unwrap();
        s.pause().unwrap();
        tick(&mut s, &InputIntent { left: true, right: false });
        assert_eq!(s.ball.pos, Vec2::new(310.0, 250.0));
        assert_eq!(s.paddle.pos.x, 270.0);
        assert_eq!(s.time_ticks, 0);
    }

    #[test]
    fn test_paddle_follows_intent() {
        let mut s = running_session();
        tick(&mut s, &InputIntent { left: true, right: false });
        assert_eq!(s.paddle.pos.x, 262.0);
        tick(&mut s, &InputIntent { left: false, right: true });
        assert_eq!(s.paddle.pos.x, 270.0);
        // Both held: the moves cancel out
        tick(&mut s, &InputIntent { left: true, right: true });
        assert_eq!(s.paddle.pos.x, 270.0);
    }

    #[test]
    fn test_dead_center_paddle_hit() {
        let mut s = running_session();
        // Ball center at 310 over the paddle center, falling onto the paddle top
        s.ball.pos = Vec2::new(305.0, 474.0);
        s.ball.vel = Vec2::new(0.0, 4.0);
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.ball.vel, Vec2::new(0.0, -4.0));
        assert_eq!(s.ball.pos.y, 475.0);
        assert!(s.drain_events().contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_off_center_paddle_hit_deflects_right() {
        let mut s = running_session();
        s.ball.pos = Vec2::new(325.0, 474.0);
        s.ball.vel = Vec2::new(0.0, 4.0);
        tick(&mut s, &InputIntent::default());
        assert!(s.ball.vel.x > 0.0);
        assert!(s.ball.vel.y < 0.0);
        assert!((s.ball.vel.length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_no_snap_when_disabled() {
        let tuning = Tuning {
            snap_ball_to_paddle: false,
            ..Default::default()
        };
        let mut s = Session::new(tuning, Highscore::default()).unwrap();
        s.start().unwrap();
        s.ball.pos = Vec2::new(305.0, 474.0);
        s.ball.vel = Vec2::new(0.0, 4.0);
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.ball.pos.y, 478.0);
        assert_eq!(s.ball.vel, Vec2::new(0.0, -4.0));
    }

    #[test]
    fn test_block_hit_row_zero() {
        let mut s = running_session();
        // Block (0, 0) spans x 15..65, y 45..65; ball moves up into its bottom face
        s.ball.pos = Vec2::new(30.0, 68.0);
        s.ball.vel = Vec2::new(0.0, -4.0);
        tick(&mut s, &InputIntent::default());

        let block = &s.blocks.blocks()[0];
        assert!(block.destroyed);
        assert_eq!(s.ball.vel.y, 4.0);
        assert_eq!(s.score, 10);
        assert_eq!(s.blocks.remaining(), 29);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::BlockDestroyed {
                row: 0,
                column: 0,
                score: 10
            }]
        );
    }

    #[test]
    fn test_tangent_ball_leaves_block_standing() {
        let mut s = running_session();
        // After the move the ball top sits exactly on the block bottom (y = 65)
        s.ball.pos = Vec2::new(30.0, 69.0);
        s.ball.vel = Vec2::new(0.0, -4.0);
        tick(&mut s, &InputIntent::default());
        assert!(!s.blocks.blocks()[0].destroyed);
        assert_eq!(s.score, 0);
        assert_eq!(s.ball.vel.y, -4.0);
    }

    #[test]
    fn test_destroyed_block_does_not_retrigger() {
        let mut s = running_session();
        s.blocks.blocks_mut()[0].destroyed = true;
        s.ball.pos = Vec2::new(30.0, 68.0);
        s.ball.vel = Vec2::new(0.0, -4.0);
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.score, 0);
        assert_eq!(s.ball.vel.y, -4.0);
    }

    #[test]
    fn test_two_blocks_in_one_tick_flip_twice() {
        let tuning = Tuning {
            block_spacing: 0.0,
            ..Default::default()
        };
        let mut s = Session::new(tuning, Highscore::default()).unwrap();
        s.start().unwrap();
        // Straddles blocks (0, 0) and (0, 1) which now share the edge x = 65
        s.ball.pos = Vec2::new(60.0, 58.0);
        s.ball.vel = Vec2::new(0.0, -4.0);
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.score, 20);
        assert_eq!(s.ball.vel.y, -4.0);
    }

    #[test]
    fn test_round_clear_regenerates() {
        let mut s = running_session();
        destroy_all(&mut s);
        s.score = 300;
        s.ball.pos = Vec2::new(100.0, 300.0);
        s.ball.vel = Vec2::new(2.0, 3.0);
        s.paddle.pos.x = 100.0;

        tick(&mut s, &InputIntent::default());

        assert_eq!(s.blocks, BlockGrid::generate(&s.tuning));
        assert_eq!(s.blocks.remaining(), 30);
        assert_eq!(s.ball.pos, Vec2::new(310.0, 250.0));
        assert_eq!(s.ball.vel, Vec2::new(0.0, -4.0));
        assert_eq!(s.paddle.pos.x, 270.0);
        assert_eq!(s.score, 300);
        assert_eq!(s.round, 2);
        assert_eq!(s.mode, RunMode::Running);
        assert_eq!(s.drain_events(), vec![GameEvent::RoundCleared { round: 2 }]);
    }

    #[test]
    fn test_clear_at_max_score_keeps_empty_board() {
        let mut s = running_session();
        destroy_all(&mut s);
        s.blocks.blocks_mut()[0].destroyed = false;
        s.score = s.tuning.max_score - 10;
        s.ball.pos = Vec2::new(30.0, 68.0);
        s.ball.vel = Vec2::new(0.0, -4.0);

        tick(&mut s, &InputIntent::default());
        assert_eq!(s.score, s.tuning.max_score);
        assert_eq!(s.blocks.remaining(), 0);
        assert_eq!(s.mode, RunMode::Running);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::MaxScoreReached { score: 50_000 }));

        // Reported once; afterwards the ball just keeps bouncing
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.blocks.remaining(), 0);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_empty_grid_never_clears() {
        let mut s = Session::new(Tuning::default(), Highscore::default()).unwrap();
        // Tuning edited after validation
        s.tuning.block_rows = 0;
        s.start().unwrap();
        s.drain_events();
        assert!(s.blocks.is_empty());

        for _ in 0..5 {
            tick(&mut s, &InputIntent::default());
        }
        assert_eq!(s.round, 1);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_bottom_out_ends_game() {
        let mut s = running_session();
        s.score = 120;
        s.paddle.pos.x = 0.0;
        s.ball.pos = Vec2::new(400.0, 487.0);
        s.ball.vel = Vec2::new(0.0, 4.0);
        tick(&mut s, &InputIntent::default());

        assert_eq!(s.mode, RunMode::Ended);
        assert_eq!(s.pending_highscore(), Some(120));
        assert_eq!(
            s.drain_events(),
            vec![
                GameEvent::GameOver { score: 120 },
                GameEvent::HighscoreBeaten { score: 120 }
            ]
        );

        // Ended sessions do not advance
        let pos = s.ball.pos;
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.ball.pos, pos);
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut s = running_session();
        s.ball.pos = Vec2::new(300.0, 2.0);
        s.ball.vel = Vec2::new(1.0, -4.0);
        tick(&mut s, &InputIntent::default());
        assert_eq!(s.ball.vel, Vec2::new(1.0, 4.0));
    }

    fn arb_intent() -> impl Strategy<Value = InputIntent> {
        (any::<bool>(), any::<bool>()).prop_map(|(left, right)| InputIntent { left, right })
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_board(
            start_x in 0.0f32..540.0,
            intents in prop::collection::vec(arb_intent(), 1..200),
        ) {
            let mut s = running_session();
            s.paddle.pos.x = start_x;
            for intent in &intents {
                // Keep the ball out of the way so the session stays Running
                s.ball.pos = glam::Vec2::new(300.0, 200.0);
                s.ball.vel = glam::Vec2::new(0.0, 1.0);
                tick(&mut s, intent);
                let max_x = s.tuning.board_width - s.paddle.width;
                prop_assert!(s.paddle.pos.x >= 0.0);
                prop_assert!(s.paddle.pos.x <= max_x);
            }
        }

        #[test]
        fn prop_wall_reflection_preserves_magnitudes(
            x in -5.0f32..630.0,
            y in -5.0f32..300.0,
            vx in -6.0f32..6.0,
            vy in -6.0f32..6.0,
        ) {
            let mut vel = glam::Vec2::new(vx, vy);
            let ball = crate::sim::Rect::new(x, y, 10.0, 10.0);
            reflect_off_walls(&ball, &mut vel, 620.0);
            prop_assert_eq!(vel.x.abs(), vx.abs());
            prop_assert_eq!(vel.y.abs(), vy.abs());
        }

        #[test]
        fn prop_score_moves_in_block_rewards(
            ticks in 1usize..400,
            vx in -4.0f32..4.0,
        ) {
            let mut s = running_session();
            s.ball.vel.x = vx;
            let mut last_score = s.score;
            for _ in 0..ticks {
                let before_remaining = s.blocks.remaining();
                let round = s.round;
                tick(&mut s, &InputIntent::default());
                if s.mode != RunMode::Running {
                    break;
                }
                prop_assert!(s.score >= last_score);
                if s.round == round {
                    let fallen = (before_remaining - s.blocks.remaining()) as u32;
                    prop_assert_eq!(s.score - last_score, fallen * 10);
                }
                last_score = s.score;
            }
        }
    }
}
