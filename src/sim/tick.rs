//! Fixed timestep simulation tick
//!
//! Per tick, in order: clear, pairwise collisions, events, input (skipped if
//! anything collided), physics, draw, present.

use super::collision::CollisionReport;
use super::game::Game;
use super::state::{CONTROL_SCHEMES, LoopState, TickOutcome};
use crate::error::Result;
use crate::platform::{FrameClock, InputEvent, InputSource};
use crate::renderer::{MARKER_RADIUS_PX, Paint, Renderable, Surface};

impl<S: Surface> Game<S> {
    /// Advance the game by one frame
    pub fn tick(&mut self, input: &mut dyn InputSource) -> Result<TickOutcome> {
        self.check_ready()?;

        if self.state == LoopState::Stopped {
            log::debug!("Tick requested after stop; ignoring");
            return Ok(TickOutcome {
                collided: false,
                reports: Vec::new(),
                state: self.state,
            });
        }

        let dt = self.settings.time_between_frame;

        self.surface.clear();

        let reports = self.detect_collisions(dt);
        let collided = !reports.is_empty();

        for event in input.poll_events() {
            if event == InputEvent::Quit {
                log::info!("Quit requested at tick {}", self.time_ticks);
                self.state = LoopState::Stopped;
            }
        }

        // Any collision freezes input for every player this tick
        if !collided {
            let keys = input.pressed();
            for (index, scheme) in CONTROL_SCHEMES.iter().enumerate() {
                for action in scheme.actions(&keys) {
                    self.act(index, action)?;
                }
            }
        }

        for player in &mut self.players {
            player.move_by_physics(dt);
        }

        self.draw();
        self.surface.present();
        self.time_ticks += 1;

        Ok(TickOutcome {
            collided,
            reports,
            state: self.state,
        })
    }

    /// Tick until a quit event, pacing with `clock`. Returns ticks executed
    pub fn run(&mut self, input: &mut dyn InputSource, clock: &mut dyn FrameClock) -> Result<u64> {
        self.check_ready()?;
        log::info!("Game loop starting at {:.0} Hz", self.settings.tick_rate());

        let start = self.time_ticks;
        let mut collisions = 0u64;
        while self.state == LoopState::Running {
            let outcome = self.tick(input)?;
            if outcome.collided {
                collisions += 1;
            }
            clock.wait(self.settings.time_between_frame);
        }

        let ticks = self.time_ticks - start;
        log::info!(
            "Game loop stopped after {} ticks ({} with collisions)",
            ticks,
            collisions
        );
        Ok(ticks)
    }

    /// Every unordered pair, lower index first
    fn detect_collisions(&mut self, dt: f32) -> Vec<CollisionReport> {
        let mut reports = Vec::new();
        for i in 0..self.players.len().saturating_sub(1) {
            let (head, tail) = self.players.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if let Some(report) = self.director.detect_and_effect_collision(a, b, dt) {
                    log::info!("{}", report);
                    reports.push(report);
                }
            }
        }
        reports
    }

    /// Back to front: background, objects, players, debug overlay
    fn draw(&mut self) {
        let origin = self.settings.origin;
        let unit_size = self.settings.unit_size;

        self.surface
            .draw_background(self.settings.background.as_deref());

        for (_, object) in &self.objects {
            object.render(&mut self.surface, origin, unit_size);
        }

        for player in &self.players {
            player.render(&mut self.surface, origin, unit_size);
        }

        self.surface
            .draw_circle(origin, MARKER_RADIUS_PX, Paint::Origin);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::error::GameError;
    use crate::platform::{Key, KeySet, NoWait, ScriptedInput};
    use crate::renderer::{DrawCall, Marker, RecordingSurface};
    use crate::settings::Settings;
    use crate::sim::{Mechanism, MechanismId};

    use super::*;

    fn game_with(at_a: Vec2, at_b: Vec2) -> Game<RecordingSurface> {
        let settings = Settings {
            time_between_frame: 1.0 / 60.0,
            ..Default::default()
        };
        let mut game = Game::new(RecordingSurface::new(), settings).unwrap();
        let a = game
            .build_mechanism(MechanismId(1), at_a, &[Vec2::ZERO])
            .unwrap();
        let b = game
            .build_mechanism(MechanismId(2), at_b, &[Vec2::ZERO])
            .unwrap();
        game.add_players(a, b).unwrap();
        game
    }

    fn step(game: &Game<RecordingSurface>) -> f32 {
        game.settings().core_speed * game.settings().time_between_frame
    }

    #[test]
    fn test_tick_requires_players() {
        let mut game = Game::new(RecordingSurface::new(), Settings::default()).unwrap();
        let mut input = ScriptedInput::default();
        assert!(matches!(
            game.tick(&mut input),
            Err(GameError::NotEnoughPlayers { found: 0 })
        ));
        assert_eq!(game.time_ticks(), 0);
    }

    #[test]
    fn test_move_up_without_collision() {
        let mut game = game_with(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let mut input = ScriptedInput::hold(&[Key::W], 1);

        let outcome = game.tick(&mut input).unwrap();

        assert!(!outcome.collided);
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.state, LoopState::Running);
        assert_eq!(
            game.get_player(0).unwrap().core_position(),
            Vec2::new(0.0, -step(&game))
        );
        assert_eq!(
            game.get_player(1).unwrap().core_position(),
            Vec2::new(10.0, 0.0)
        );
    }

    #[test]
    fn test_collision_blocks_input() {
        let mut game = game_with(Vec2::ZERO, Vec2::ZERO);
        let mut input = ScriptedInput::hold(&[Key::D, Key::Left], 1);

        let outcome = game.tick(&mut input).unwrap();

        assert!(outcome.collided);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(game.get_player(0).unwrap().core_position(), Vec2::ZERO);
        assert_eq!(game.get_player(1).unwrap().core_position(), Vec2::ZERO);
        assert_eq!(game.director_stats().hits, 1);
    }

    #[test]
    fn test_physics_runs_without_input() {
        let mut game = game_with(Vec2::ZERO, Vec2::new(10.0, 0.0));
        game.get_player_mut(1)
            .unwrap()
            .apply_impulse(Vec2::new(0.0, 3.0));
        let mut input = ScriptedInput::hold(&[], 1);

        game.tick(&mut input).unwrap();
        let moved = game.get_player(1).unwrap().core_position();
        assert!(moved.y > 0.0, "drift applies without input");
        assert_eq!(moved.x, 10.0);
    }

    #[test]
    fn test_collision_halts_drift() {
        let mut game = game_with(Vec2::ZERO, Vec2::new(0.5, 0.0));
        game.get_player_mut(1)
            .unwrap()
            .apply_impulse(Vec2::new(0.0, 3.0));
        let mut input = ScriptedInput::hold(&[], 1);

        let outcome = game.tick(&mut input).unwrap();
        assert!(outcome.collided);
        assert_eq!(game.get_player(1).unwrap().velocity(), Vec2::ZERO);
        assert_eq!(
            game.get_player(1).unwrap().core_position(),
            Vec2::new(0.5, 0.0)
        );
    }

    #[test]
    fn test_each_scheme_drives_its_player() {
        let mut game = game_with(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let mut input = ScriptedInput::hold(&[Key::S, Key::A, Key::Right], 1);

        game.tick(&mut input).unwrap();
        let d = step(&game);

        assert_eq!(game.get_player(0).unwrap().core_position(), Vec2::new(-d, d));
        assert_eq!(
            game.get_player(1).unwrap().core_position(),
            Vec2::new(10.0 + d, 0.0)
        );
    }

    #[test]
    fn test_quit_finishes_the_tick() {
        let mut game = game_with(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let mut input = ScriptedInput::default();

        let outcome = game.tick(&mut input).unwrap();
        assert_eq!(outcome.state, LoopState::Stopped);
        assert!(!game.is_running());
        // Frame was still drawn and presented
        assert_eq!(game.surface().frames_presented(), 1);

        // Further ticks are inert
        let outcome = game.tick(&mut input).unwrap();
        assert_eq!(outcome.state, LoopState::Stopped);
        assert_eq!(game.time_ticks(), 1);
    }

    #[test]
    fn test_render_order() {
        let mut game = game_with(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));
        game.add_object(Box::new(Marker::new(Vec2::new(0.0, -1.0), 0.1)))
            .unwrap();
        game.add_object(Box::new(Marker::new(Vec2::new(0.0, 1.0), 0.1)))
            .unwrap();
        let mut input = ScriptedInput::hold(&[], 1);

        game.tick(&mut input).unwrap();

        let origin = game.settings().origin;
        let unit = game.settings().unit_size;
        let calls = game.surface().calls();
        let centers: Vec<Vec2> = calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Circle { center, .. } => Some(*center),
                DrawCall::Background(_) => None,
            })
            .collect();

        assert_eq!(calls[0], DrawCall::Background(None));
        assert_eq!(
            centers,
            vec![
                origin + Vec2::new(0.0, -1.0) * unit,
                origin + Vec2::new(0.0, 1.0) * unit,
                // player 1 block, then its center of mass
                origin + Vec2::new(-3.0, 0.0) * unit,
                origin + Vec2::new(-3.0, 0.0) * unit,
                origin + Vec2::new(3.0, 0.0) * unit,
                origin + Vec2::new(3.0, 0.0) * unit,
                origin,
            ]
        );
        let paints: Vec<Paint> = calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Circle { paint, .. } => Some(*paint),
                DrawCall::Background(_) => None,
            })
            .collect();
        assert_eq!(
            paints,
            vec![
                Paint::Object,
                Paint::Object,
                Paint::Block,
                Paint::CenterOfMass,
                Paint::Block,
                Paint::CenterOfMass,
                Paint::Origin,
            ]
        );
    }

    #[test]
    fn test_background_handle_passed_through() {
        let settings = Settings {
            background: Some("stars.png".into()),
            ..Default::default()
        };
        let mut game = Game::new(RecordingSurface::new(), settings).unwrap();
        let a = game
            .build_mechanism(MechanismId(1), Vec2::ZERO, &[Vec2::ZERO])
            .unwrap();
        let b = game
            .build_mechanism(MechanismId(2), Vec2::new(4.0, 0.0), &[Vec2::ZERO])
            .unwrap();
        game.add_players(a, b).unwrap();

        game.tick(&mut ScriptedInput::hold(&[], 1)).unwrap();
        assert_eq!(
            game.surface().calls()[0],
            DrawCall::Background(Some("stars.png".into()))
        );
    }

    #[test]
    fn test_players_close_in_until_collision() {
        let mut game = game_with(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0));
        let mut input = ScriptedInput::hold(&[Key::D, Key::Left], 600);

        let mut first_hit = None;
        for tick in 0..600 {
            let outcome = game.tick(&mut input).unwrap();
            if outcome.collided {
                first_hit = Some(tick);
                break;
            }
        }
        assert!(first_hit.is_some());

        // Once touching, held keys no longer move anyone
        let before: Vec<Vec2> = game.players().iter().map(Mechanism::core_position).collect();
        let outcome = game.tick(&mut input).unwrap();
        assert!(outcome.collided);
        let after: Vec<Vec2> = game.players().iter().map(Mechanism::core_position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_run_until_quit() {
        let mut game = game_with(Vec2::ZERO, Vec2::new(10.0, 0.0));
        // S is player 0's down key, Down is player 1's
        let keys: KeySet = [Key::S, Key::Down].into_iter().collect();
        let mut input = ScriptedInput::new(vec![keys; 5]);

        let ticks = game.run(&mut input, &mut NoWait).unwrap();

        // Five scripted frames plus the tick that sees the quit
        assert_eq!(ticks, 6);
        assert_eq!(game.surface().frames_presented(), 6);
        let y0 = game.get_player(0).unwrap().core_position().y;
        let y1 = game.get_player(1).unwrap().core_position().y;
        assert!((y0 - 5.0 * step(&game)).abs() < 1e-5);
        assert!((y1 - 5.0 * step(&game)).abs() < 1e-5);
    }
}
