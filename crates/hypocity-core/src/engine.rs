//! Game session - main entry point for running the game

use hecs::{Entity, World};
use hypocity_logic::config::GameConfig;
use hypocity_logic::constants::messages;
use hypocity_logic::geometry::{CityLayout, Vec2, Vec3};
use hypocity_logic::movement::MoveIntents;
use hypocity_logic::status::{GameStatus, NpcStatus, StatusSignal};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::AudioContext;
use crate::components::*;
use crate::config::ConfigError;
use crate::events::{Cue, Intent, SessionEvent};
use crate::generation::{generate_city, generate_npcs};
use crate::snapshot::{collect_npc_views, NpcView, SessionSnapshot};
use crate::systems::*;
use crate::timers::{DeferredEffect, TimerQueue};

/// One running game: the city, the NPC batch, counters and status.
///
/// Input arrives through [`handle`](Self::handle),
/// [`set_movement`](Self::set_movement) and [`set_facing`](Self::set_facing);
/// time advances through [`update`](Self::update). Every counter and status
/// change goes through [`apply`](Self::apply).
pub struct GameSession {
    config: GameConfig,
    rng: StdRng,
    world: World,
    /// Generated once; survives restarts.
    layout: CityLayout,
    /// NPC entities of the current batch, indexed by NPC id.
    npcs: Vec<Entity>,

    status: GameStatus,
    coins: u32,
    scanned_count: u32,
    victory_count: u32,
    notification: Option<String>,
    notice: u64,
    damaged: bool,
    damage_flash: u64,
    scanning: bool,
    scan_pulse: u64,
    pointer_locked: bool,

    player: PlayerPose,
    movement: MoveIntents,
    audio: Option<AudioContext>,
    /// Cues left over from a closed audio context.
    orphan_cues: Vec<Cue>,
    timers: TimerQueue,

    /// Bumped on every restart; timers from older generations are dropped.
    generation: u64,
    /// Seconds since the session was created.
    sim_time: f64,
}

impl GameSession {
    /// Generate a city and the first NPC batch from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`GameConfig::validate`] in a way that
    /// leaves a sampling range empty. Use [`try_new`](Self::try_new) for
    /// configs that have not been validated.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = generate_city(&config, &mut rng);
        Self::build(config, rng, layout)
    }

    /// Like [`new`](Self::new), but rejects an invalid config instead of
    /// panicking.
    pub fn try_new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(Self::new(config, seed))
    }

    /// Like [`new`](Self::new) but with a caller-supplied city. Same panics.
    pub fn with_layout(config: GameConfig, seed: u64, layout: CityLayout) -> Self {
        Self::build(config, StdRng::seed_from_u64(seed), layout)
    }

    fn build(config: GameConfig, mut rng: StdRng, layout: CityLayout) -> Self {
        let mut world = World::new();
        let npcs = generate_npcs(&mut world, &layout, &config, &mut rng);
        let player = PlayerPose::spawn(&config);
        log::info!(
            "Session ready: {} buildings, {} NPCs",
            layout.building_count(),
            npcs.len()
        );

        Self {
            config,
            rng,
            world,
            layout,
            npcs,
            status: GameStatus::Tutorial,
            coins: 0,
            scanned_count: 0,
            victory_count: 0,
            notification: None,
            notice: 0,
            damaged: false,
            damage_flash: 0,
            scanning: false,
            scan_pulse: 0,
            pointer_locked: false,
            player,
            movement: MoveIntents::default(),
            audio: None,
            orphan_cues: Vec::new(),
            timers: TimerQueue::new(),
            generation: 0,
            sim_time: 0.0,
        }
    }

    // ── Input ──────────────────────────────────────────────────────────

    /// Route one key press.
    ///
    /// In `Tutorial` every intent starts play. On an end screen only
    /// `Space` restarts. While `Playing`, `Scan` and `UseItem` act and
    /// everything else is ignored.
    pub fn handle(&mut self, intent: Intent) {
        match (self.status, intent) {
            (GameStatus::Tutorial, _) => self.apply(SessionEvent::Start),
            (GameStatus::Victory | GameStatus::Counseling, Intent::Space) => {
                self.apply(SessionEvent::Restart)
            }
            (GameStatus::Playing, Intent::Scan) => self.scan(),
            (GameStatus::Playing, Intent::UseItem) => {
                let eye = self.player.position;
                let target = find_cleaner_target(&self.world, eye, &self.config).map(|(_, id)| id);
                self.apply(SessionEvent::CleanerUsed { target });
            }
            (status, intent) => log::debug!("Ignoring {:?} in {:?}", intent, status),
        }
    }

    fn scan(&mut self) {
        self.apply(SessionEvent::ScanFired);
        let outcome = resolve_scan(
            &mut self.world,
            self.player.position,
            self.player.facing,
            &self.config,
        );
        if outcome.hit() {
            log::debug!("Scan revealed {:?}", outcome.revealed);
            self.apply(SessionEvent::ScanHit {
                hypocrite_found: outcome.hypocrite_found,
                innocents: outcome.innocents,
            });
        }
    }

    /// Replace the held movement keys.
    pub fn set_movement(&mut self, intents: MoveIntents) {
        self.movement = intents;
    }

    /// Camera look direction from the input layer.
    pub fn set_facing(&mut self, facing: Vec3) {
        if facing.length() > 0.0 {
            self.player.facing = facing;
        }
    }

    // ── Tick ───────────────────────────────────────────────────────────

    /// Advance the session by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.sim_time += dt as f64;

        for (generation, effect) in self.timers.take_due(self.sim_time) {
            self.apply(SessionEvent::TimerFired { generation, effect });
        }

        if !self.status.is_playing() {
            return;
        }

        player_movement_system(&mut self.player, self.movement, dt, &self.layout, &self.config);

        let proximity = npc_behavior_system(
            &mut self.world,
            &self.layout,
            &self.config,
            self.player.position,
            self.sim_time,
            dt,
            &mut self.rng,
        );
        for event in proximity {
            let event = match event {
                ProximityEvent::Collect { id, .. } => SessionEvent::InnocentReached { npc: id },
                ProximityEvent::Catch { id, .. } => SessionEvent::CaughtBy { npc: id },
            };
            self.apply(event);
        }
    }

    // ── Reducer ────────────────────────────────────────────────────────

    /// Apply one event against the current state.
    ///
    /// Gameplay events are ignored unless `Playing`, and NPC-targeted events
    /// re-check the NPC's current status, so a stale event is a no-op.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Start => {
                if self.transition(StatusSignal::Start) {
                    let mut audio = AudioContext::open();
                    audio.start_ambiance();
                    self.audio = Some(audio);
                    self.pointer_locked = true;
                }
            }
            SessionEvent::Restart => {
                if self.transition(StatusSignal::Restart) {
                    self.reset();
                }
            }
            SessionEvent::TimerFired { generation, effect } => {
                if generation == self.generation {
                    self.expire(effect);
                }
            }
            event if !self.status.is_playing() => {
                log::debug!("Ignoring {:?} in {:?}", event, self.status);
            }
            SessionEvent::ScanFired => {
                self.scanning = true;
                self.scan_pulse += 1;
                let pulse = self.scan_pulse;
                self.schedule(self.config.scan_beam_secs, DeferredEffect::EndScanBeam { pulse });
            }
            SessionEvent::ScanHit {
                hypocrite_found,
                innocents,
            } => {
                self.cue(Cue::ScanPerformed);
                if hypocrite_found {
                    self.scanned_count += 1;
                    self.notify(messages::HYPOCRITE_FOUND);
                } else if innocents > 0 {
                    self.notify(messages::CITIZEN_CONFIRMED);
                }
            }
            SessionEvent::CleanerUsed { target } => self.use_cleaner(target),
            SessionEvent::InnocentReached { npc } => self.collect(npc),
            SessionEvent::CaughtBy { npc } => self.caught(npc),
        }
    }

    fn use_cleaner(&mut self, target: Option<u32>) {
        if self.coins == 0 {
            self.notify(messages::INSUFFICIENT_COINS);
            return;
        }
        let eye = self.player.position;
        let range = self.config.item_range;
        let target = target.filter(|&id| {
            let eligible = self
                .npc(id)
                .map_or(false, |(npc, status)| npc.is_hypocrite() && status.is_active());
            eligible && self.npc_position(id).map_or(false, |p| p.distance(&eye) < range)
        });
        let Some(id) = target else {
            self.notify(messages::NONE_IN_RANGE);
            return;
        };

        self.cue(Cue::ItemUsed);
        self.coins -= 1;
        self.neutralize_npc(id);
        self.victory_count += 1;
        self.notify(messages::HYPOCRITE_CLEANED);
        log::info!(
            "Hypocrite npc-{} cleaned ({}/{})",
            id,
            self.victory_count,
            self.config.victory_threshold
        );

        if self.victory_count >= self.config.victory_threshold && self.transition(StatusSignal::Win) {
            self.cue(Cue::Victory);
            self.pointer_locked = false;
        }
    }

    fn collect(&mut self, id: u32) {
        let eligible = self
            .npc(id)
            .map_or(false, |(npc, status)| {
                npc.kind == NpcKind::Innocent && status == NpcStatus::Identified
            });
        if !eligible {
            log::debug!("Ignoring stale collect from npc-{}", id);
            return;
        }
        self.cue(Cue::InnocentCollected);
        self.notify(messages::CITIZEN_COMFORTED);
        self.coins += 1;
        self.neutralize_npc(id);
    }

    fn caught(&mut self, id: u32) {
        let eligible = self
            .npc(id)
            .map_or(false, |(npc, status)| npc.is_hypocrite() && status.is_active());
        if !eligible {
            log::debug!("Ignoring stale catch from npc-{}", id);
            return;
        }

        self.cue(Cue::PlayerCaught);
        if self.coins > 0 {
            self.coins -= 1;
            self.notify(messages::COIN_STOLEN);
            self.damaged = true;
            self.damage_flash += 1;
            let flash = self.damage_flash;
            self.schedule(self.config.damage_flash_secs, DeferredEffect::ClearDamage { flash });
            self.neutralize_npc(id);
        } else if self.transition(StatusSignal::CaughtBroke) {
            self.pointer_locked = false;
        }
    }

    fn expire(&mut self, effect: DeferredEffect) {
        match effect {
            DeferredEffect::ClearNotification { notice } => {
                if notice == self.notice {
                    self.notification = None;
                }
            }
            DeferredEffect::ClearDamage { flash } => {
                if flash == self.damage_flash {
                    self.damaged = false;
                }
            }
            DeferredEffect::EndScanBeam { pulse } => {
                if pulse == self.scan_pulse {
                    self.scanning = false;
                }
            }
        }
    }

    /// Move the status along `signal`, logging the outcome.
    fn transition(&mut self, signal: StatusSignal) -> bool {
        match self.status.next(signal) {
            Ok(next) => {
                log::info!("Status {:?} -> {:?}", self.status, next);
                self.status = next;
                true
            }
            Err(err) => {
                log::debug!("{}", err);
                false
            }
        }
    }

    /// New NPC batch, zeroed counters, fresh generation. The city is kept.
    fn reset(&mut self) {
        if let Some(audio) = self.audio.take() {
            self.orphan_cues.extend(audio.close());
        }
        self.world.clear();
        self.npcs = generate_npcs(&mut self.world, &self.layout, &self.config, &mut self.rng);
        self.coins = 0;
        self.scanned_count = 0;
        self.victory_count = 0;
        self.notification = None;
        self.damaged = false;
        self.scanning = false;
        self.pointer_locked = false;
        self.player = PlayerPose::spawn(&self.config);
        self.generation += 1;
        log::info!("Session restarted (generation {})", self.generation);
    }

    fn notify(&mut self, text: &str) {
        self.notification = Some(text.to_string());
        self.notice += 1;
        let notice = self.notice;
        self.schedule(self.config.notification_secs, DeferredEffect::ClearNotification { notice });
    }

    fn schedule(&mut self, delay: f64, effect: DeferredEffect) {
        self.timers
            .schedule(self.sim_time + delay, self.generation, effect);
    }

    fn cue(&mut self, cue: Cue) {
        match self.audio.as_mut() {
            Some(audio) => audio.play(cue),
            None => log::debug!("No audio context for {:?}", cue),
        }
    }

    fn npc(&self, id: u32) -> Option<(Npc, NpcStatus)> {
        let entity = *self.npcs.get(id as usize)?;
        let npc = *self.world.get::<&Npc>(entity).ok()?;
        let status = *self.world.get::<&NpcStatus>(entity).ok()?;
        Some((npc, status))
    }

    fn npc_position(&self, id: u32) -> Option<Vec3> {
        let entity = *self.npcs.get(id as usize)?;
        let pos = self.world.get::<&Position>(entity).ok()?;
        Some(pos.world)
    }

    fn neutralize_npc(&mut self, id: u32) {
        if let Some(&entity) = self.npcs.get(id as usize) {
            neutralize(&mut self.world, entity);
        }
    }

    // ── Outputs ────────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Number of scan pulses that revealed at least one hypocrite.
    pub fn scanned_count(&self) -> u32 {
        self.scanned_count
    }

    /// Hypocrites cleaned with the item this session.
    pub fn victory_count(&self) -> u32 {
        self.victory_count
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn ambiance_playing(&self) -> bool {
        self.audio.as_ref().map_or(false, |a| a.ambiance_playing())
    }

    pub fn layout(&self) -> &CityLayout {
        &self.layout
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> PlayerPose {
        self.player
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    pub fn npc_views(&self) -> Vec<NpcView> {
        collect_npc_views(&self.world)
    }

    pub fn npc_view(&self, id: u32) -> Option<NpcView> {
        self.npc_views().into_iter().find(|v| v.id == id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            coins: self.coins,
            scanned_count: self.scanned_count,
            victory_count: self.victory_count,
            notification: self.notification.clone(),
            damaged: self.damaged,
            scanning: self.scanning,
            pointer_locked: self.pointer_locked,
            ambiance: self.ambiance_playing(),
            generation: self.generation,
            sim_time: self.sim_time,
            player: self.player,
            npcs: self.npc_views(),
        }
    }

    /// Audio cues queued since the last call.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        let mut cues = std::mem::take(&mut self.orphan_cues);
        if let Some(audio) = self.audio.as_mut() {
            cues.extend(audio.drain());
        }
        cues
    }

    // ── Scenario setup ─────────────────────────────────────────────────

    /// Teleport the player (eye height is re-pinned).
    pub fn set_player_position(&mut self, point: Vec2) {
        self.player.position = point.at_height(self.config.eye_height);
    }

    /// Teleport NPC `id` onto the ground at `point`. Returns false for an
    /// unknown id.
    pub fn place_npc(&mut self, id: u32, point: Vec2) -> bool {
        let Some(&entity) = self.npcs.get(id as usize) else {
            return false;
        };
        match self.world.get::<&mut Position>(entity) {
            Ok(mut pos) => {
                pos.set_planar(point);
                true
            }
            Err(_) => false,
        }
    }

    /// Set NPC `id`'s wander direction (normalized).
    pub fn set_npc_wander(&mut self, id: u32, direction: Vec2) -> bool {
        let Some(&entity) = self.npcs.get(id as usize) else {
            return false;
        };
        match self.world.get::<&mut Behavior>(entity) {
            Ok(mut behavior) => {
                behavior.wander = direction.normalize();
                true
            }
            Err(_) => false,
        }
    }

    /// Ids of active NPCs of `kind`, ascending.
    pub fn npc_ids(&self, kind: NpcKind) -> Vec<u32> {
        self.npc_views()
            .into_iter()
            .filter(|v| v.kind == kind && !v.removed)
            .map(|v| v.id)
            .collect()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default(), 0)
    }
}
