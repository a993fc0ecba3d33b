//! # Stagecraft guide (v0.1.0)
//!
//! This module is a standalone, end-to-end walkthrough of Stagecraft's architecture and public
//! API. It is intentionally detailed so visualizations built on top of the engine can share a
//! mental model of what "playing an algorithm back" means in this codebase.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Stage`](crate::Stage): the scheduler owning design registries, the cast, the cue queue,
//!   the playback state machine, speed and the host render callback
//! - [`Actor`](crate::Actor): a named stateful entity wrapping a semantic value, addressed through
//!   an [`ActorId`](crate::ActorId) handle
//! - [`Skin`](crate::Skin): the capability set binding an actor to the visual surface
//!   (`enter`/`leave`/`get`/`set`)
//! - [`Cue`](crate::Cue): one queued, replayable visual step recorded from an action invocation
//! - [`Tween`](crate::Tween) / [`Step`](crate::Step): the per-tick interpolation state and its
//!   explicit done-or-continue outcome
//! - [`Ticker`](crate::Ticker): the pacing seam (real time in hosts, manual in tests)
//!
//! The engine's defining split is *when things run*:
//!
//! 1. **Algorithm time.** Invoking an action through [`Stage::act`](crate::Stage::act) records a
//!    cue and hands back a [`Take`](crate::Take). [`Take::code`](crate::stage::Take::code) runs
//!    the algorithm step immediately: its side effects and return value are observable right
//!    away, and the return value is captured on the cue.
//! 2. **Playback time.** [`Stage::play`](crate::Stage::play) later dequeues cues in order and
//!    replays each one visually: the registered action design receives a
//!    [`Scene`](crate::Scene) handle and the recorded invocation arguments, animates whatever it
//!    wants, and the host render callback repaints once per tick.
//!
//! The algorithm therefore runs at full speed with correct intermediate state, while the visual
//! story of that run can be replayed, paced, limited and stopped independently.
//!
//! ---
//!
//! ## Interpolation ("how far does one tick move a property?")
//!
//! Durations and delays are expressed in time units and converted to whole ticks with
//! [`TICK_UNITS`](crate::TICK_UNITS) (16 units per tick, the nominal frame period):
//!
//! - a numeric property moves linearly over `max(1, floor(duration / 16 / speed))` ticks and
//!   snaps to the exact target on the final tick, so no floating-point residue survives
//! - a non-numeric property (colors, labels, flags) transitions atomically on its first tick,
//!   whatever the duration says
//! - a delay suspends the tween without touching the actor, one tick unit at a time
//!
//! Because the math counts ticks rather than wall-clock time, jittery host timing never
//! accumulates drift; [`Stage::set_speed`](crate::Stage::set_speed) (clamped to `[0.2, 10]`)
//! simply changes the tick budget of subsequently computed transitions.
//!
//! ---
//!
//! ## Solo vs. coordinated animation
//!
//! [`Stage::animate`](crate::Stage::animate) drives one actor by itself. For multi-actor steps
//! that must land together (a swap, a rotation of three markers),
//! [`Stage::together`](crate::Stage::together) takes a list of [`Part`](crate::Part)s and
//! advances every still-pending member inside the same tick, rendering once per tick, until the
//! whole group is done. A group finishes in the maximum of its members' individual tick counts,
//! and no member is ever skipped while others advance.
//!
//! Actors can also queue [`Plan`](crate::Plan)s ([`Actor::plan`](crate::Actor::plan), chainable)
//! and have them consumed FIFO by [`Stage::animate_planned`](crate::Stage::animate_planned) or
//! [`Part::planned`](crate::Part::planned).
//!
//! ---
//!
//! ## Playback control
//!
//! [`Stage::play`](crate::Stage::play) replays the queue head-first, optionally bounded by a cue
//! limit, and reports how many cues it played. Stopping is cooperative:
//! [`Stage::stop`](crate::Stage::stop), a clonable [`StopHandle`](crate::StopHandle), or
//! [`Scene::stop`](crate::stage::Scene::stop) from inside an action all mark intent that is
//! honored once the in-flight cue completes; a running tween is never cut mid-transition.
//! Played cues land in the [`GoneCue`](crate::GoneCue) history; [`Stage::reset`](crate::Stage::reset)
//! clears the pending queue while preserving that history.
//!
//! ---
//!
//! ## Worked example
//!
//! A two-bar swap: the algorithm swaps its own values immediately, the visual swap replays later
//! in lockstep. The manual ticker makes the run deterministic; swap it for the default
//! [`IntervalTicker`](crate::IntervalTicker) in a live host.
//!
//! ```rust
//! use stagecraft::{
//!     Actor, ActorId, Casting, CueCtx, ManualTicker, Part, Prop, Scene, Skin, Stage, Targets,
//!     targets,
//! };
//!
//! struct BarSkin {
//!     props: Targets,
//! }
//!
//! impl Skin for BarSkin {
//!     fn get(&self, key: &str) -> Option<Prop> {
//!         self.props.get(key).cloned()
//!     }
//!
//!     fn set(&mut self, updates: &Targets) {
//!         for (key, value) in updates {
//!             self.props.insert(key.clone(), value.clone());
//!         }
//!     }
//! }
//!
//! # fn main() -> stagecraft::StagecraftResult<()> {
//! let mut stage = Stage::with_ticker(ManualTicker::new());
//!
//! stage.design_actor("bar", |actor: &Actor<i64>| {
//!     Ok(Casting::new(BarSkin {
//!         props: targets([("left", actor.value as f64)]),
//!     }))
//! });
//!
//! stage.design_action("swap-bars", |scene: &mut Scene<'_, i64>, ctx: &CueCtx| {
//!     let a: ActorId = ctx.arg(0)?;
//!     let b: ActorId = ctx.arg(1)?;
//!     let (Some(to_a), Some(to_b)) = (scene.actor(b)?.get("left"), scene.actor(a)?.get("left"))
//!     else {
//!         return Ok(());
//!     };
//!     scene.together(vec![
//!         Part::new(a, targets([("left", to_a)]), 320, 0),
//!         Part::new(b, targets([("left", to_b)]), 320, 0),
//!     ])
//! })?;
//!
//! let mut values = vec![3_i64, 1];
//! let ids = stage.create_actors("bar", values.clone(), |_, _| {})?;
//!
//! let swap = stage.action("swap-bars").describe("swap two bars");
//! stage
//!     .act(&swap, vec![serde_json::json!(ids[0]), serde_json::json!(ids[1])])
//!     .code(|| values.swap(0, 1));
//!
//! // Algorithm time already happened.
//! assert_eq!(values, vec![1, 3]);
//!
//! // Playback time happens now.
//! assert_eq!(stage.play(None)?, 1);
//! assert_eq!(stage.actor(ids[0])?.get("left"), Some(Prop::Number(1.0)));
//! assert_eq!(stage.actor(ids[1])?.get("left"), Some(Prop::Number(3.0)));
//! # Ok(())
//! # }
//! ```
//!
//! Notes:
//!
//! - actors and actions are looked up by name; an unregistered name degrades silently (a
//!   skinless actor, a cue-less `code` run) so algorithm correctness never depends on the
//!   visual layer being wired up
//! - action names must be lower-kebab (`swap-bars`); registration rejects anything else
