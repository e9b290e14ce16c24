//! The arena: players, transient objects and setup
//!
//! The per-frame loop lives in [`super::tick`].

use glam::Vec2;

use super::collision::{CollisionDirector, DirectorStats};
use super::mechanism::{Mechanism, MechanismId};
use super::state::{Action, GamePhase, LoopState, ObjectId, is_valid};
use crate::error::{GameError, Result};
use crate::renderer::{Renderable, Surface};
use crate::settings::Settings;

/// Game owning its surface, players and objects
pub struct Game<S: Surface> {
    pub(super) surface: S,
    pub(super) settings: Settings,
    /// Index 0 and 1 map to the fixed control schemes
    pub(super) players: Vec<Mechanism>,
    /// Render order is insertion order
    pub(super) objects: Vec<(ObjectId, Box<dyn Renderable>)>,
    pub(super) phase: GamePhase,
    pub(super) state: LoopState,
    pub(super) director: CollisionDirector,
    pub(super) time_ticks: u64,
    next_object_id: u32,
}

impl<S: Surface> Game<S> {
    pub fn new(surface: S, settings: Settings) -> Result<Self> {
        settings.validate()?;
        log::info!(
            "Game created: dt={:.4}s ({:.0} Hz), origin={}, unit={}px",
            settings.time_between_frame,
            settings.tick_rate(),
            settings.origin,
            settings.unit_size
        );
        Ok(Self {
            surface,
            settings,
            players: Vec::new(),
            objects: Vec::new(),
            phase: GamePhase::default(),
            state: LoopState::default(),
            director: CollisionDirector::new(),
            time_ticks: 0,
            next_object_id: 1,
        })
    }

    /// Build a mechanism using this game's block radius and motion settings
    pub fn build_mechanism(&self, id: MechanismId, at: Vec2, offsets: &[Vec2]) -> Result<Mechanism> {
        Ok(
            Mechanism::from_layout(id, at, offsets, self.settings.block_radius)?
                .with_motion(self.settings.core_speed, self.settings.damping),
        )
    }

    /// Replace the players and wire them as each other's opponent
    pub fn add_players(&mut self, mut player1: Mechanism, mut player2: Mechanism) -> Result<()> {
        if player1.id() == player2.id() {
            return Err(GameError::DuplicatePlayers(player1.id()));
        }
        player1.set_opponent(player2.id())?;
        player2.set_opponent(player1.id())?;

        log::info!(
            "Players added: {:?} ({} blocks) vs {:?} ({} blocks)",
            player1.id(),
            player1.get_blocks().len(),
            player2.id(),
            player2.get_blocks().len()
        );
        self.players = vec![player1, player2];
        Ok(())
    }

    pub fn get_player(&self, index: usize) -> Result<&Mechanism> {
        self.players.get(index).ok_or(GameError::NoSuchPlayer(index))
    }

    pub fn get_player_mut(&mut self, index: usize) -> Result<&mut Mechanism> {
        self.players
            .get_mut(index)
            .ok_or(GameError::NoSuchPlayer(index))
    }

    pub fn players(&self) -> &[Mechanism] {
        &self.players
    }

    /// Add a transient object; it is drawn after earlier objects
    pub fn add_object(&mut self, object: Box<dyn Renderable>) -> Result<ObjectId> {
        let id = ObjectId(self.next_object_id);
        self.next_object_id = self
            .next_object_id
            .checked_add(1)
            .ok_or(GameError::ObjectIdsExhausted)?;
        self.objects.push((id, object));
        log::debug!("Object {:?} added ({} total)", id, self.objects.len());
        Ok(id)
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Result<Box<dyn Renderable>> {
        let index = self
            .objects
            .iter()
            .position(|(object_id, _)| *object_id == id)
            .ok_or(GameError::ObjectNotFound(id))?;
        let (_, object) = self.objects.remove(index);
        log::debug!("Object {:?} removed", id);
        Ok(object)
    }

    /// Object ids in render order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|(id, _)| *id).collect()
    }

    pub fn get_phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    pub fn is_valid(&self, action: Action) -> bool {
        is_valid(self.phase, action)
    }

    /// Apply one action to a player with the fixed frame dt
    pub fn act(&mut self, player_index: usize, action: Action) -> Result<()> {
        if !self.is_valid(action) {
            log::debug!("Action {:?} rejected in phase {:?}", action, self.phase);
            return Ok(());
        }
        let dt = self.settings.time_between_frame;
        let player = self.get_player_mut(player_index)?;
        match action {
            Action::CoreMoveUp => player.core_move_up(dt),
            Action::CoreMoveDown => player.core_move_down(dt),
            Action::CoreMoveLeft => player.core_move_left(dt),
            Action::CoreMoveRight => player.core_move_right(dt),
        }
        Ok(())
    }

    /// Fail unless two players with symmetric opponents are present
    pub fn check_ready(&self) -> Result<()> {
        let [a, b] = self.players.as_slice() else {
            return Err(GameError::NotEnoughPlayers {
                found: self.players.len(),
            });
        };
        for player in [a, b] {
            if player.opponent().is_none() {
                return Err(GameError::OpponentNotSet(player.id()));
            }
        }
        if a.opponent() != Some(b.id()) || b.opponent() != Some(a.id()) {
            return Err(GameError::AsymmetricOpponents {
                a: a.id(),
                b: b.id(),
            });
        }
        Ok(())
    }

    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn director_stats(&self) -> DirectorStats {
        self.director.stats()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
