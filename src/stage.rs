use std::{
    collections::{BTreeMap, VecDeque},
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    actor::{Actor, ActorId, Casting, Plan},
    cue::{Cue, CueCtx, Description, GoneCue},
    error::{StagecraftError, StagecraftResult},
    prop::Targets,
    tick::{IntervalTicker, Ticker},
    tween::{Step, Tween},
};

type ActorFn<T> = Rc<dyn Fn(&Actor<T>) -> StagecraftResult<Casting>>;
type ActionFn<T> = Rc<dyn Fn(&mut Scene<'_, T>, &CueCtx) -> StagecraftResult<()>>;

/// Playback state of a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Status {
    Stopped,
    Playing,
}

/// Clonable, thread-safe handle for requesting a cooperative playback stop.
///
/// The request is honored at the next cue boundary; a cue already replaying
/// finishes its animation first.
#[derive(Clone, Debug)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Token naming a registered action design, optionally carrying a cue
/// description. Cheap to clone; invoking one that was never registered
/// degrades to running only the algorithm code (nothing is queued).
#[derive(Clone, Debug)]
pub struct Action {
    name: String,
    description: Option<Description>,
}

impl Action {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a fixed description to cues recorded from this token.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(Description::Text(text.into()));
        self
    }

    /// Attach a description computed from the invocation arguments.
    pub fn describe_with(
        mut self,
        f: impl Fn(&[serde_json::Value]) -> String + 'static,
    ) -> Self {
        self.description = Some(Description::Compute(Rc::new(f)));
        self
    }
}

/// Result of recording a cue: the pending handle on which the algorithm step
/// itself is run.
pub struct Take<'a, T> {
    stage: &'a mut Stage<T>,
    queued: bool,
}

impl<T> Take<'_, T> {
    /// Whether a cue was actually queued (false for unregistered actions).
    pub fn queued(&self) -> bool {
        self.queued
    }

    /// Run the algorithm step now, record its serialized result on the queued
    /// cue, and hand the value back.
    ///
    /// This is the decoupling point of the whole engine: the state mutation
    /// happens at call time, so subsequent algorithm logic observes it
    /// immediately, while the visual replay stays queued until `play`.
    pub fn code<R: serde::Serialize>(self, run: impl FnOnce() -> R) -> R {
        let result = run();
        if self.queued {
            if let Some(cue) = self.stage.cues.back_mut() {
                cue.result = serde_json::to_value(&result).ok();
            }
        }
        result
    }
}

/// One participant of a coordinated animation group.
#[derive(Clone, Debug)]
pub struct Part {
    actor: ActorId,
    plan: Option<Plan>,
}

impl Part {
    pub fn new(actor: ActorId, targets: Targets, duration: u64, delay: u64) -> Self {
        Self {
            actor,
            plan: Some(Plan {
                targets,
                duration,
                delay,
            }),
        }
    }

    /// Participate with the actor's next queued plan (no-op if none queued).
    pub fn planned(actor: ActorId) -> Self {
        Self { actor, plan: None }
    }
}

/// Handle an action receives while its cue is replayed.
///
/// Exposes animation, the coordination barrier and cast access, but no
/// playback control: starting a nested `play` from inside an action is not
/// expressible, which is what makes the playback loop re-entrancy-safe.
pub struct Scene<'a, T> {
    stage: &'a mut Stage<T>,
}

impl<T> Scene<'_, T> {
    pub fn actor(&self, id: ActorId) -> StagecraftResult<&Actor<T>> {
        self.stage.actor(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> StagecraftResult<&mut Actor<T>> {
        self.stage.actor_mut(id)
    }

    pub fn enter(&mut self, id: ActorId) -> StagecraftResult<()> {
        self.stage.enter(id)
    }

    pub fn leave(&mut self, id: ActorId) -> StagecraftResult<()> {
        self.stage.leave(id)
    }

    pub fn animate(
        &mut self,
        id: ActorId,
        targets: Targets,
        duration: u64,
        delay: u64,
    ) -> StagecraftResult<()> {
        self.stage.animate(id, targets, duration, delay)
    }

    pub fn animate_planned(&mut self, id: ActorId) -> StagecraftResult<()> {
        self.stage.animate_planned(id)
    }

    pub fn together(&mut self, parts: Vec<Part>) -> StagecraftResult<()> {
        self.stage.together(parts)
    }

    pub fn speed(&self) -> f64 {
        self.stage.speed()
    }

    /// Request a cooperative stop of the surrounding playback.
    pub fn stop(&self) {
        self.stage.stop();
    }
}

/// The scheduler: owns the design registries, the cast, the cue queue and the
/// playback state machine, and mediates every animation through its ticker.
pub struct Stage<T> {
    actor_designs: BTreeMap<String, ActorFn<T>>,
    action_designs: BTreeMap<String, ActionFn<T>>,
    cast: Vec<Actor<T>>,
    cues: VecDeque<Cue>,
    gone: Vec<GoneCue>,
    speed: f64,
    status: Status,
    stop: Arc<AtomicBool>,
    render: Box<dyn FnMut()>,
    ticker: Box<dyn Ticker>,
}

impl<T> Default for Stage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage<T> {
    /// Stage paced by a real-time [`IntervalTicker`] at the nominal tick
    /// period.
    pub fn new() -> Self {
        Self::with_ticker(IntervalTicker::default())
    }

    /// Stage paced by an injected ticker (a `ManualTicker` in tests).
    pub fn with_ticker(ticker: impl Ticker + 'static) -> Self {
        Self {
            actor_designs: BTreeMap::new(),
            action_designs: BTreeMap::new(),
            cast: Vec::new(),
            cues: VecDeque::new(),
            gone: Vec::new(),
            speed: 1.0,
            status: Status::Stopped,
            stop: Arc::new(AtomicBool::new(false)),
            render: Box::new(|| {}),
            ticker: Box::new(ticker),
        }
    }

    /// Install the host render callback, invoked once per tick and once more
    /// after every replayed cue. Must be cheap and idempotent.
    pub fn on_render(&mut self, render: impl FnMut() + 'static) {
        self.render = Box::new(render);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the playback speed factor, clamped to `[0.2, 10]`. Takes effect on
    /// subsequently computed ticks only.
    pub fn set_speed(&mut self, rate: f64) {
        self.speed = rate.clamp(0.2, 10.0);
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Request a cooperative stop; honored at the next cue boundary.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        tracing::debug!("playback stop requested");
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.stop.clone())
    }

    /// Clear the pending cue queue and any stop intent, returning to the
    /// stopped state. The played-cue history is preserved.
    pub fn reset(&mut self) {
        self.cues.clear();
        self.status = Status::Stopped;
        self.stop.store(false, Ordering::SeqCst);
    }

    /// Register an actor design under `name`. A later registration under the
    /// same name replaces the earlier one.
    pub fn design_actor(
        &mut self,
        name: impl Into<String>,
        design: impl Fn(&Actor<T>) -> StagecraftResult<Casting> + 'static,
    ) {
        self.actor_designs.insert(name.into(), Rc::new(design));
    }

    /// Register an action design under `name`, which must be lower-kebab
    /// (`swap-cards`, not `swapCards` or `s`).
    pub fn design_action(
        &mut self,
        name: impl Into<String>,
        design: impl Fn(&mut Scene<'_, T>, &CueCtx) -> StagecraftResult<()> + 'static,
    ) -> StagecraftResult<()> {
        let name = name.into();
        if !is_kebab_name(&name) {
            return Err(StagecraftError::registration(format!(
                "'{name}' is not a valid action name; expected lower-kebab form like \"swap-cards\""
            )));
        }
        self.action_designs.insert(name, Rc::new(design));
        Ok(())
    }

    /// Instantiate an actor. The matching design binds its skin and extension
    /// data; with no design registered the actor stays skinless and every
    /// animation on it is a no-op.
    pub fn create_actor(&mut self, name: &str, value: T) -> StagecraftResult<ActorId> {
        self.create_actor_with(name, value, |_| {})
    }

    /// [`Stage::create_actor`] with an init hook that runs after the skin is
    /// bound and before the actor joins the cast.
    pub fn create_actor_with(
        &mut self,
        name: &str,
        value: T,
        on_init: impl FnOnce(&mut Actor<T>),
    ) -> StagecraftResult<ActorId> {
        let mut actor = Actor::new(name, value);
        match self.actor_designs.get(name) {
            Some(design) => {
                let casting = (**design)(&actor)?;
                actor.ready(casting);
            }
            None => tracing::debug!(name, "no actor design registered; actor stays skinless"),
        }
        on_init(&mut actor);

        let id = ActorId(self.cast.len());
        self.cast.push(actor);
        Ok(id)
    }

    /// Instantiate one actor per value, in order. The init hook receives each
    /// actor together with its index.
    pub fn create_actors(
        &mut self,
        name: &str,
        values: impl IntoIterator<Item = T>,
        mut on_init: impl FnMut(&mut Actor<T>, usize),
    ) -> StagecraftResult<Vec<ActorId>> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                self.create_actor_with(name, value, |actor| on_init(actor, index))
            })
            .collect()
    }

    pub fn actor(&self, id: ActorId) -> StagecraftResult<&Actor<T>> {
        self.cast
            .get(id.0)
            .ok_or_else(|| StagecraftError::usage(format!("unknown actor id {}", id.0)))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> StagecraftResult<&mut Actor<T>> {
        self.cast
            .get_mut(id.0)
            .ok_or_else(|| StagecraftError::usage(format!("unknown actor id {}", id.0)))
    }

    pub fn cast(&self) -> impl Iterator<Item = &Actor<T>> {
        self.cast.iter()
    }

    pub fn enter(&mut self, id: ActorId) -> StagecraftResult<()> {
        self.actor_mut(id)?.enter();
        Ok(())
    }

    pub fn leave(&mut self, id: ActorId) -> StagecraftResult<()> {
        self.actor_mut(id)?.leave();
        Ok(())
    }

    /// Token for invoking the action registered under `name`.
    pub fn action(&self, name: impl Into<String>) -> Action {
        Action {
            name: name.into(),
            description: None,
        }
    }

    /// Batch lookup: camel-cased action name -> invocation token, skipping
    /// names with no registered design.
    pub fn actions(&self, list: impl IntoIterator<Item = Action>) -> BTreeMap<String, Action> {
        list.into_iter()
            .filter(|action| self.action_designs.contains_key(&action.name))
            .map(|action| (camel_case(&action.name), action))
            .collect()
    }

    /// Record a cue for `action` with the given invocation arguments.
    ///
    /// The cue's description is resolved now; its visual replay waits in the
    /// queue until [`Stage::play`]. Run the corresponding algorithm step
    /// through [`Take::code`] on the returned handle.
    pub fn act(&mut self, action: &Action, args: Vec<serde_json::Value>) -> Take<'_, T> {
        let queued = if self.action_designs.contains_key(&action.name) {
            let description = action.description.as_ref().map(|d| d.resolve(&args));
            self.cues.push_back(Cue {
                name: action.name.clone(),
                description,
                args,
                result: None,
            });
            true
        } else {
            tracing::debug!(name = %action.name, "no action design registered; cue skipped");
            false
        };

        Take {
            stage: self,
            queued,
        }
    }

    /// Still-pending cues, head first.
    pub fn cues(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter()
    }

    /// Played-cue history, oldest first.
    pub fn gone(&self) -> &[GoneCue] {
        &self.gone
    }

    /// Animate one actor toward `targets`, driving the ticker until the
    /// transition (and any chained plans) complete. Renders once per tick.
    pub fn animate(
        &mut self,
        id: ActorId,
        targets: Targets,
        duration: u64,
        delay: u64,
    ) -> StagecraftResult<()> {
        self.drive(
            id,
            Some(Plan {
                targets,
                duration,
                delay,
            }),
        )
    }

    /// Animate one actor with its next queued plan; no-op when the plan queue
    /// is empty. Chained plans run FIFO, each starting on the tick after its
    /// predecessor finished.
    pub fn animate_planned(&mut self, id: ActorId) -> StagecraftResult<()> {
        self.drive(id, None)
    }

    fn drive(&mut self, id: ActorId, first: Option<Plan>) -> StagecraftResult<()> {
        let Self {
            cast,
            ticker,
            render,
            speed,
            ..
        } = self;
        let actor = cast
            .get_mut(id.0)
            .ok_or_else(|| StagecraftError::usage(format!("unknown actor id {}", id.0)))?;
        if actor.skin_mut().is_none() {
            return Ok(());
        }
        let Some(plan) = first.or_else(|| actor.next_plan()) else {
            return Ok(());
        };

        let mut tween = Tween::from(plan);
        loop {
            ticker.wait();
            let Some(skin) = actor.skin_mut() else {
                return Ok(());
            };
            let step = tween.advance(skin, *speed);
            (render)();
            match step {
                Step::Pending(next) => tween = next,
                Step::Done => match actor.next_plan() {
                    Some(plan) => tween = Tween::from(plan),
                    None => return Ok(()),
                },
            }
        }
    }

    /// Drive a group of actors in lockstep: every still-pending member
    /// advances within the same tick, with one render per tick, so grouped
    /// transitions finish together in `max` of their individual tick counts.
    /// An empty group (or one whose members are all skinless with nothing
    /// planned) returns without consuming a tick.
    #[tracing::instrument(skip_all, fields(parts = parts.len()))]
    pub fn together(&mut self, parts: Vec<Part>) -> StagecraftResult<()> {
        let Self {
            cast,
            ticker,
            render,
            speed,
            ..
        } = self;

        let mut running: Vec<(ActorId, Tween)> = Vec::with_capacity(parts.len());
        for part in parts {
            let actor = cast
                .get_mut(part.actor.0)
                .ok_or_else(|| StagecraftError::usage(format!("unknown actor id {}", part.actor.0)))?;
            if actor.skin_mut().is_none() {
                continue;
            }
            let Some(plan) = part.plan.or_else(|| actor.next_plan()) else {
                continue;
            };
            running.push((part.actor, Tween::from(plan)));
        }

        while !running.is_empty() {
            ticker.wait();
            let mut still = Vec::with_capacity(running.len());
            for (id, tween) in running {
                let Some(skin) = cast[id.0].skin_mut() else {
                    continue;
                };
                if let Step::Pending(next) = tween.advance(skin, *speed) {
                    still.push((id, next));
                }
            }
            running = still;
            (render)();
        }

        Ok(())
    }

    /// Replay queued cues in order, up to `limit` of them.
    ///
    /// Each cue waits one tick, runs its action design against a [`Scene`]
    /// handle, forces one render and lands in the history log. A stop request
    /// is honored after the cue that was replaying when it arrived. Returns
    /// the number of cues played; 0 without touching the queue when already
    /// playing, when the queue is empty, or when `limit` is `Some(0)`.
    #[tracing::instrument(skip(self))]
    pub fn play(&mut self, limit: Option<u64>) -> StagecraftResult<u64> {
        if self.status == Status::Playing || self.cues.is_empty() {
            return Ok(0);
        }
        let limit = limit.unwrap_or(u64::MAX);
        if limit == 0 {
            return Ok(0);
        }

        self.status = Status::Playing;
        self.stop.store(false, Ordering::SeqCst);
        let outcome = self.run_cues(limit);
        self.status = Status::Stopped;
        outcome
    }

    fn run_cues(&mut self, limit: u64) -> StagecraftResult<u64> {
        let mut finished = 0;
        while finished < limit {
            let Some(cue) = self.cues.pop_front() else {
                break;
            };
            self.ticker.wait();

            let design = self.action_designs.get(&cue.name).cloned();
            let ctx = CueCtx {
                name: cue.name,
                description: cue.description,
                args: cue.args,
                result: cue.result,
            };
            if let Some(design) = design {
                let mut scene = Scene { stage: self };
                (*design)(&mut scene, &ctx)?;
            }
            (self.render)();

            self.gone.push(GoneCue {
                name: ctx.name,
                description: ctx.description,
            });
            finished += 1;

            if self.stop.swap(false, Ordering::SeqCst) {
                tracing::debug!(finished, "playback stopped cooperatively");
                break;
            }
        }
        Ok(finished)
    }
}

/// `^[a-z][a-z-]+$`
fn is_kebab_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_lowercase() {
        return false;
    }

    let mut rest = 0usize;
    for c in chars {
        if !(c.is_ascii_lowercase() || c == '-') {
            return false;
        }
        rest += 1;
    }
    rest >= 1
}

/// `init-arrow` -> `initArrow`.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (index, part) in name.split('-').filter(|p| !p.is_empty()).enumerate() {
        if index == 0 {
            out.push_str(part);
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}
