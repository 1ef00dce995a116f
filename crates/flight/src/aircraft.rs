//! The player aircraft entity.
//!
//! Per tick the owner calls [`Aircraft::process`] (input and discrete
//! transitions), then [`Aircraft::advance`] (integration, stop flags and
//! damage visuals), then any number of [`Aircraft::reticle`] calls.

use engine_core::{Body, EulerAngles, TeamColor, Vec3};
use input::InputState;

use crate::config::FlightConfig;
use crate::damage::Hull;
use crate::intent::{Intent, IntentFrame};
use crate::maneuver::{HeadingState, Maneuver, MoveState, SteeringMode};
use crate::resolver;
use crate::reticle::{self, LockCache, ReticleVertex, UNLOCKED_COLOR};
use crate::services::{EntityHandle, ParticleService, Services};
use crate::stop::{apply_stop_flags, StopFlags};
use crate::weapon::Gun;

/// Spin rate of the whole airframe while it falls.
const CRASH_ROLL_RATE: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Flying,
    Crashing,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Aircraft {
    config: FlightConfig,
    body: Body,
    propeller: EulerAngles,
    velocity: Vec3,
    maneuver: Maneuver,
    hull: Hull,
    gun: Gun,
    lock: LockCache,
    team: TeamColor,
    lifecycle: Lifecycle,
    steering: SteeringMode,
    stop_flags: StopFlags,
}

impl Aircraft {
    pub fn new(config: FlightConfig) -> Self {
        let body = spawn_body(&config);
        Self {
            body,
            propeller: EulerAngles::IDENTITY,
            velocity: Vec3::ZERO,
            maneuver: Maneuver::new(config.roll_window),
            hull: Hull::new(&config),
            gun: Gun::new(&config),
            lock: LockCache::default(),
            team: TeamColor::default(),
            lifecycle: Lifecycle::Flying,
            steering: SteeringMode::default(),
            stop_flags: StopFlags::empty(),
            config,
        }
    }

    /// Read this frame's input and apply it.
    pub fn process(&mut self, dt: f32, input: &InputState, services: &mut Services<'_>) {
        if self.lifecycle == Lifecycle::Dead {
            return;
        }
        self.maneuver.tick_gesture(dt);
        if self.lifecycle != Lifecycle::Flying {
            return;
        }
        let frame = resolver::resolve(input);
        self.apply_frame(&frame, services);
    }

    /// Apply an already-resolved intent frame.
    pub fn apply_frame(&mut self, frame: &IntentFrame, services: &mut Services<'_>) {
        for &intent in &frame.intents {
            self.apply_intent(intent, services);
        }
        self.maneuver.set_bank_input(frame.bank, frame.roll_scale);
        for &side in &frame.roll_presses {
            if self.maneuver.roll_press(side) {
                log::info!("Barrel roll {:?}", side);
            }
        }
    }

    pub fn apply_intent(&mut self, intent: Intent, services: &mut Services<'_>) {
        let m = &mut self.maneuver;
        match intent {
            Intent::Straight => m.straight(),
            Intent::Level => m.level(),
            Intent::Stop => m.set_throttle(MoveState::Stop),
            Intent::TurnLeft(magnitude) => m.turn_left(magnitude),
            Intent::TurnRight(magnitude) => m.turn_right(magnitude),
            Intent::Climb(scale) => m.climb(scale),
            Intent::Dive(scale) => m.dive(scale),
            Intent::SpeedUp => m.set_throttle(MoveState::Boost),
            Intent::SpeedDown => m.set_throttle(MoveState::Stop),
            Intent::Cruise => m.set_throttle(MoveState::Forward),
            Intent::Forward(ratio) => m.set_throttle_ratio(ratio),
            Intent::Fire => {
                self.fire(services);
            }
            Intent::CycleColor => {
                self.team = self.team.next();
                log::debug!("Team color {:?}", self.team);
            }
        }
    }

    /// Integrate one tick of motion.
    pub fn advance(&mut self, dt: f32, services: &mut Services<'_>) {
        if self.lifecycle == Lifecycle::Dead {
            return;
        }
        let previous = self.body.position;

        match self.lifecycle {
            Lifecycle::Flying => self.fly(dt),
            Lifecycle::Crashing => self.fall(dt),
            Lifecycle::Dead => {}
        }
        self.propeller.bank += self.config.propeller_spin * dt;

        let engine = self.engine_position();
        if self.hull.needs_refresh() {
            self.hull.apply_tier(services.particles, services.skin, engine);
        } else {
            self.hull.follow_engine(services.particles, engine);
        }

        if self.lifecycle == Lifecycle::Flying && dt > 0.0 {
            self.velocity = (self.body.position - previous) / dt;
        }
        self.lock.invalidate();
    }

    fn fly(&mut self, dt: f32) {
        self.maneuver
            .integrate(&mut self.body, &self.config, self.steering, dt);
        if self.steering == SteeringMode::Snapped {
            apply_stop_flags(&mut self.body, self.stop_flags, self.maneuver.heading);
        }
        self.body.integrate(dt);
    }

    fn fall(&mut self, dt: f32) {
        let body = &mut self.body;
        body.angular_velocity.bank = CRASH_ROLL_RATE;
        let dir = self.velocity.normalize_or_zero();
        body.orientation.pitch = -dir.y.clamp(-1.0, 1.0).asin();
        body.speed = 0.0;
        body.speed_left = 0.0;
        body.speed_right = 0.0;
        body.integrate(dt);

        self.velocity.y += self.config.gravity * dt;
        self.body.position += self.velocity * dt;
    }

    /// Nose over and start falling along the current heading.
    fn crash(&mut self) {
        self.lifecycle = Lifecycle::Crashing;
        self.body.orientation.pitch = self.config.crash_pitch_degrees.to_radians();
        let speed = self.config.base_max_speed
            * self.maneuver.throttle_ratio()
            * self.config.crash_speed_factor;
        self.velocity = self.body.orientation.forward() * speed;
        log::info!("Aircraft hit, crashing at {:?}", self.body.position);
    }

    pub fn damage(&mut self, amount: i32, services: &mut Services<'_>) {
        if !services.rules.take_damage || self.lifecycle == Lifecycle::Dead {
            return;
        }
        self.hull.take_damage(amount);
        let engine = self.engine_position();
        self.hull.apply_tier(services.particles, services.skin, engine);

        if self.lifecycle == Lifecycle::Flying && self.hull.is_depleted() {
            self.crash();
        }
    }

    /// Heal; the damage visuals catch up on the next `advance`.
    pub fn recover(&mut self, amount: i32) {
        self.hull.recover(amount);
    }

    pub fn recover_all(&mut self) {
        self.hull.recover_all();
    }

    /// Ignored when `max_hp <= 0`.
    pub fn set_max_hp(&mut self, max_hp: i32, recover_all: bool) {
        if !self.hull.set_max_hp(max_hp, recover_all) {
            log::warn!("Ignoring non-positive max hp {}", max_hp);
        }
    }

    pub fn kill(&mut self) {
        if self.lifecycle != Lifecycle::Dead {
            log::info!("Aircraft destroyed");
        }
        self.lifecycle = Lifecycle::Dead;
    }

    /// Respawn at the spawn point with full health.
    pub fn reset(&mut self) {
        self.body = spawn_body(&self.config);
        self.propeller = EulerAngles::IDENTITY;
        self.velocity = Vec3::ZERO;
        self.maneuver.reset();
        self.hull.recover_all();
        self.lock.invalidate();
        self.lifecycle = Lifecycle::Flying;
        log::info!("Aircraft respawned");
    }

    /// Release the effects this aircraft owns. Call before dropping it.
    pub fn drop_effects(&mut self, particles: &mut dyn ParticleService) {
        self.hull.kill_smoke(particles);
    }

    /// Fire the gun if the cooldown allows it.
    pub fn fire(&mut self, services: &mut Services<'_>) -> Option<EntityHandle> {
        if self.lifecycle != Lifecycle::Flying {
            return None;
        }
        self.gun
            .fire(&self.body, self.velocity, self.team, &self.config, services)
    }

    /// Sight quad `distance` ahead of the gun. The lock-on ray is cast at
    /// most once per tick.
    pub fn reticle(&mut self, distance: f32, size: f32, services: &Services<'_>) -> [ReticleVertex; 4] {
        let (gun, ray) = reticle::gun_ray(&self.body, &self.config);
        let color = if self.lock.get_or_query(services.enemies, gun, ray) {
            reticle::locked_color(services.clock.now_ms())
        } else {
            UNLOCKED_COLOR
        };
        reticle::quad(&self.body, &self.config, distance, size, color)
    }

    pub fn engine_position(&self) -> Vec3 {
        self.body.object_to_world(self.config.engine_offset)
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.body.position = position;
    }

    pub fn orientation(&self) -> EulerAngles {
        self.body.orientation
    }

    pub fn propeller_orientation(&self) -> EulerAngles {
        self.propeller
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.body.speed
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn maneuver(&self) -> &Maneuver {
        &self.maneuver
    }

    pub fn hp(&self) -> i32 {
        self.hull.hp()
    }

    pub fn max_hp(&self) -> i32 {
        self.hull.max_hp()
    }

    pub fn damage_tier(&self) -> Option<usize> {
        self.hull.tier()
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle != Lifecycle::Dead
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn team(&self) -> TeamColor {
        self.team
    }

    pub fn is_locked_on(&self) -> Option<bool> {
        self.lock.cached()
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn steering_mode(&self) -> SteeringMode {
        self.steering
    }

    pub fn set_steering_mode(&mut self, mode: SteeringMode) {
        self.steering = mode;
    }

    pub fn set_heading_state(&mut self, heading: HeadingState) {
        self.maneuver.heading = heading;
    }

    pub fn stop_flags(&self) -> StopFlags {
        self.stop_flags
    }

    /// Replace the blocked directions for the coming ticks.
    pub fn set_stop_flags(&mut self, flags: StopFlags) {
        self.stop_flags = flags;
    }
}

/// Level at `prop_offset` above the origin, cruising at twice the minimum speed.
fn spawn_body(config: &FlightConfig) -> Body {
    Body {
        position: Vec3::Y * config.prop_offset,
        speed: config.min_speed * 2.0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maneuver::{BankState, PitchState, TurnState};
    use crate::services::fakes::Rig;
    use input::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    fn flying() -> (Aircraft, Rig) {
        let mut plane = Aircraft::new(FlightConfig::default());
        plane.set_steering_mode(SteeringMode::AllRange);
        plane.set_position(Vec3::new(0.0, 100.0, 0.0));
        (plane, Rig::default())
    }

    fn tick(plane: &mut Aircraft, rig: &mut Rig, input: &InputState) {
        plane.process(DT, input, &mut rig.services());
        plane.advance(DT, &mut rig.services());
    }

    #[test]
    fn hp_invariant_and_single_crash() {
        let (mut plane, mut rig) = flying();
        plane.damage(3, &mut rig.services());
        assert_eq!(plane.hp(), 1);
        assert_eq!(plane.lifecycle(), Lifecycle::Flying);

        plane.damage(5, &mut rig.services());
        assert_eq!(plane.hp(), 0);
        assert_eq!(plane.lifecycle(), Lifecycle::Crashing);
        let crash_velocity = plane.velocity();
        assert!((crash_velocity.length() - 40.0).abs() < 1e-3);
        assert!(crash_velocity.y < 0.0);

        plane.damage(1, &mut rig.services());
        assert_eq!(plane.hp(), 0);
        assert_eq!(plane.velocity(), crash_velocity);

        plane.recover(100);
        assert_eq!(plane.hp(), plane.max_hp());
    }

    #[test]
    fn invulnerable_rules_ignore_damage() {
        let (mut plane, mut rig) = flying();
        rig.rules.take_damage = false;
        plane.damage(10, &mut rig.services());
        assert_eq!(plane.hp(), 4);
        assert!(rig.particles.created.is_empty());
    }

    #[test]
    fn set_max_hp_rejects_non_positive() {
        let (mut plane, _) = flying();
        plane.set_max_hp(-2, true);
        assert_eq!(plane.max_hp(), 4);
        plane.set_max_hp(2, false);
        assert_eq!(plane.hp(), 2);
        assert_eq!(plane.max_hp(), 2);
    }

    #[test]
    fn crash_falls_under_gravity() {
        let (mut plane, mut rig) = flying();
        plane.damage(4, &mut rig.services());
        let input = InputState::new();

        let mut last = plane.velocity();
        for _ in 0..30 {
            tick(&mut plane, &mut rig, &input);
            let v = plane.velocity();
            assert!((v.y - (last.y - 10.0 * DT)).abs() < 1e-4);
            assert_eq!(v.x, last.x);
            assert_eq!(plane.speed(), 0.0);
            last = v;
        }
        assert!((plane.orientation().bank - 30.0 * DT).abs() < 1e-4);
        // Pitch follows the velocity from before the last gravity step.
        let before_gravity = last + Vec3::Y * 10.0 * DT;
        let expected = -before_gravity.normalize().y.asin();
        assert!(plane.orientation().pitch > 0.0);
        assert!((plane.orientation().pitch - expected).abs() < 1e-4);
    }

    #[test]
    fn dead_aircraft_ignores_updates() {
        let (mut plane, mut rig) = flying();
        plane.kill();
        assert!(!plane.is_alive());
        let before = plane.position();
        let mut input = InputState::new();
        input.press(KeyCode::ArrowDown);
        tick(&mut plane, &mut rig, &input);
        assert_eq!(plane.position(), before);
        assert!(rig.spawner.bullets.is_empty());
    }

    #[test]
    fn reset_respawns_flying_with_full_health() {
        let (mut plane, mut rig) = flying();
        plane.damage(4, &mut rig.services());
        plane.kill();
        plane.reset();
        assert_eq!(plane.lifecycle(), Lifecycle::Flying);
        assert_eq!(plane.hp(), 4);
        assert_eq!(plane.position(), Vec3::Y * plane.config().prop_offset);
        assert_eq!(plane.orientation(), EulerAngles::IDENTITY);
        assert_eq!(plane.speed(), 2.0);

        plane.advance(DT, &mut rig.services());
        assert_eq!(plane.damage_tier(), Some(4));
        assert!(rig.particles.live().is_empty());
    }

    #[test]
    fn velocity_is_displacement_over_dt() {
        let (mut plane, mut rig) = flying();
        let start = plane.position();
        tick(&mut plane, &mut rig, &InputState::new());
        let expected = (plane.position() - start) / DT;
        assert!((plane.velocity() - expected).length() < 1e-3);
        assert!(plane.velocity().z > 0.0);
    }

    #[test]
    fn double_tap_e_barrel_rolls_right() {
        let (mut plane, mut rig) = flying();
        let mut input = InputState::new();

        input.begin_frame();
        input.press(KeyCode::KeyE);
        tick(&mut plane, &mut rig, &input);
        input.begin_frame();
        input.release(KeyCode::KeyE);
        tick(&mut plane, &mut rig, &input);
        input.begin_frame();
        input.press(KeyCode::KeyE);
        tick(&mut plane, &mut rig, &input);

        assert_eq!(plane.maneuver().bank, BankState::BarrelRoll);
        assert!(plane.orientation().bank < 0.0);
    }

    #[test]
    fn slow_double_tap_does_not_roll() {
        let (mut plane, mut rig) = flying();
        let mut input = InputState::new();
        input.press(KeyCode::KeyQ);
        tick(&mut plane, &mut rig, &input);
        input.begin_frame();
        input.release(KeyCode::KeyQ);
        for _ in 0..40 {
            tick(&mut plane, &mut rig, &input);
            input.begin_frame();
        }
        input.press(KeyCode::KeyQ);
        tick(&mut plane, &mut rig, &input);
        assert_ne!(plane.maneuver().bank, BankState::BarrelRoll);
    }

    #[test]
    fn per_tick_reset_means_turns_must_be_held() {
        let (mut plane, mut rig) = flying();
        let mut input = InputState::new();
        input.press(KeyCode::KeyD);
        tick(&mut plane, &mut rig, &input);
        assert_eq!(plane.maneuver().turn, TurnState::Right);
        assert!(plane.orientation().heading > 0.0);

        input.release(KeyCode::KeyD);
        tick(&mut plane, &mut rig, &input);
        assert_eq!(plane.maneuver().turn, TurnState::Straight);
    }

    #[test]
    fn opposite_turn_keys_cancel() {
        let (mut plane, mut rig) = flying();
        let mut input = InputState::new();
        input.press(KeyCode::KeyA);
        input.press(KeyCode::KeyD);
        tick(&mut plane, &mut rig, &input);
        assert_eq!(plane.maneuver().turn, TurnState::Straight);
        assert_eq!(plane.orientation().heading, 0.0);
        assert_eq!(plane.orientation().bank, 0.0);

        tick(&mut plane, &mut rig, &input);
        assert_eq!(plane.maneuver().turn, TurnState::Straight);
        assert_eq!(plane.orientation().heading, 0.0);
    }

    #[test]
    fn opposite_pitch_keys_cancel() {
        let (mut plane, mut rig) = flying();
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        input.press(KeyCode::KeyS);
        for _ in 0..3 {
            tick(&mut plane, &mut rig, &input);
            assert_eq!(plane.maneuver().pitch, PitchState::Level);
            assert_eq!(plane.orientation().pitch, 0.0);
        }
    }

    #[test]
    fn both_triggers_scale_turn_bank() {
        let (mut plane, mut rig) = flying();
        let mut input = InputState::new();
        input.gamepad.set_connected(true);
        input.gamepad.set_triggers(128, 200);
        input.press(KeyCode::KeyA);
        tick(&mut plane, &mut rig, &input);

        let scale = 128.0 / 255.0 * crate::intent::DEFAULT_ROLL_SCALE;
        let expected = plane.config().max_bank_rate * scale * DT;
        assert_eq!(plane.maneuver().turn, TurnState::Left);
        assert!((plane.orientation().bank - expected).abs() < 1e-6);
    }

    #[test]
    fn firing_carries_team_color() {
        let (mut plane, mut rig) = flying();
        let mut input = InputState::new();
        input.press(KeyCode::KeyF);
        tick(&mut plane, &mut rig, &input);
        input.begin_frame();
        input.press(KeyCode::ArrowDown);
        tick(&mut plane, &mut rig, &input);
        assert_eq!(plane.team(), TeamColor::Green);
        assert_eq!(rig.spawner.bullets.len(), 1);
        assert_eq!(rig.spawner.bullets[0].2, TeamColor::Green);
    }

    #[test]
    fn crashing_aircraft_does_not_fire() {
        let (mut plane, mut rig) = flying();
        plane.damage(4, &mut rig.services());
        assert!(plane.fire(&mut rig.services()).is_none());
    }

    #[test]
    fn reticle_queries_enemies_once_per_tick() {
        let (mut plane, mut rig) = flying();
        rig.enemies.locked = true;
        for _ in 0..10 {
            let verts = plane.reticle(40.0, 1.0, &rig.services());
            assert_ne!(verts[0].argb, UNLOCKED_COLOR);
        }
        assert_eq!(rig.enemies.queries.get(), 1);
        assert_eq!(plane.is_locked_on(), Some(true));

        plane.advance(DT, &mut rig.services());
        assert_eq!(plane.is_locked_on(), None);
        plane.reticle(40.0, 1.0, &rig.services());
        assert_eq!(rig.enemies.queries.get(), 2);
    }

    #[test]
    fn recovered_tier_refreshes_on_next_advance() {
        let (mut plane, mut rig) = flying();
        plane.damage(3, &mut rig.services());
        assert_eq!(plane.damage_tier(), Some(1));
        plane.recover(2);
        assert_eq!(plane.damage_tier(), Some(1));
        plane.advance(DT, &mut rig.services());
        assert_eq!(plane.damage_tier(), Some(3));
        assert_eq!(rig.particles.names(), vec!["smokeheavy", "smokelight"]);
        assert_eq!(rig.particles.live().len(), 1);
    }

    #[test]
    fn smoke_follows_engine_and_dies_with_the_aircraft() {
        let (mut plane, mut rig) = flying();
        plane.damage(2, &mut rig.services());
        tick(&mut plane, &mut rig, &InputState::new());
        let (_, last) = *rig.particles.moved.last().unwrap();
        assert!((last - plane.engine_position()).length() < 1e-5);

        plane.drop_effects(&mut rig.particles);
        assert!(rig.particles.live().is_empty());
    }

    #[test]
    fn propeller_spins_while_alive() {
        let (mut plane, mut rig) = flying();
        plane.advance(0.5, &mut rig.services());
        let spin = plane.config().propeller_spin;
        assert!((plane.propeller_orientation().bank - spin * 0.5).abs() < 1e-5);
    }

    #[test]
    fn snapped_stop_flag_blocks_strafe() {
        let (mut plane, mut rig) = flying();
        plane.set_steering_mode(SteeringMode::Snapped);
        plane.set_stop_flags(StopFlags::RIGHT);
        let mut input = InputState::new();
        input.press(KeyCode::KeyD);
        let start = plane.position();
        tick(&mut plane, &mut rig, &input);
        assert!((plane.position().x - start.x).abs() < 1e-6);
        assert_eq!(plane.maneuver().turn, TurnState::Right);

        plane.set_stop_flags(StopFlags::empty());
        tick(&mut plane, &mut rig, &input);
        assert!(plane.position().x > start.x);
    }
}
