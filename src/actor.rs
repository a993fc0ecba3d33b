use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::prop::{Prop, Targets};

/// Visual binding of an actor: the capability set an actor design produces.
///
/// `get`/`set` are the interpolation surface; `enter`/`leave` add and remove
/// the actor from the visual surface and default to no-ops for designs that
/// manage visibility elsewhere.
pub trait Skin {
    fn enter(&mut self) {}
    fn leave(&mut self) {}
    fn get(&self, key: &str) -> Option<Prop>;
    fn set(&mut self, updates: &Targets);
}

/// Output of an actor design: the skin to bind plus any extension data the
/// design wants to expose on the actor.
pub struct Casting {
    pub(crate) skin: Box<dyn Skin>,
    pub(crate) extensions: BTreeMap<String, serde_json::Value>,
}

impl Casting {
    pub fn new(skin: impl Skin + 'static) -> Self {
        Self {
            skin: Box::new(skin),
            extensions: BTreeMap::new(),
        }
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions.entry(key.into()).or_insert(value);
        self
    }
}

/// Handle to an actor in a stage's cast.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ActorId(pub usize);

/// A queued, not-yet-executed animation spec, consumed FIFO by parameterless
/// animation calls.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Plan {
    pub targets: Targets,
    pub duration: u64,
    pub delay: u64,
}

/// A named stateful entity wrapping a semantic value, an optional skin and a
/// queue of pending animation plans.
///
/// Actors without a skin (no design registered under their name, or the
/// design failed to bind) still carry their value; animating them is a no-op.
pub struct Actor<T> {
    name: String,
    pub value: T,
    skin: Option<Box<dyn Skin>>,
    extensions: BTreeMap<String, serde_json::Value>,
    plans: VecDeque<Plan>,
}

impl<T> Actor<T> {
    pub(crate) fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
            skin: None,
            extensions: BTreeMap::new(),
            plans: VecDeque::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_skin(&self) -> bool {
        self.skin.is_some()
    }

    /// Bind the skin and merge extension data. Extension keys that are
    /// already present keep their existing value.
    pub(crate) fn ready(&mut self, casting: Casting) {
        self.skin = Some(casting.skin);
        for (key, value) in casting.extensions {
            self.extensions.entry(key).or_insert(value);
        }
    }

    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.get(key)
    }

    pub fn extensions(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extensions
    }

    /// Queue an animation spec for later parameterless animation calls.
    /// Returns the actor for chaining.
    pub fn plan(&mut self, targets: Targets, duration: u64, delay: u64) -> &mut Self {
        self.plans.push_back(Plan {
            targets,
            duration,
            delay,
        });
        self
    }

    /// Number of plans still queued.
    pub fn planned(&self) -> usize {
        self.plans.len()
    }

    pub(crate) fn next_plan(&mut self) -> Option<Plan> {
        self.plans.pop_front()
    }

    pub(crate) fn skin_mut(&mut self) -> Option<&mut dyn Skin> {
        self.skin.as_deref_mut()
    }

    /// Read a property through the skin. `None` when the actor is skinless or
    /// the skin does not expose the key.
    pub fn get(&self, key: &str) -> Option<Prop> {
        self.skin.as_ref().and_then(|s| s.get(key))
    }

    /// Apply property updates atomically through the skin; no-op when
    /// skinless.
    pub fn set(&mut self, updates: &Targets) {
        if let Some(skin) = self.skin.as_deref_mut() {
            skin.set(updates);
        }
    }

    pub fn enter(&mut self) {
        if let Some(skin) = self.skin.as_deref_mut() {
            skin.enter();
        }
    }

    pub fn leave(&mut self) {
        if let Some(skin) = self.skin.as_deref_mut() {
            skin.leave();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Actor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("has_skin", &self.skin.is_some())
            .field("planned", &self.plans.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::{target, targets};

    #[derive(Default)]
    struct MapSkin {
        props: Targets,
        entered: bool,
    }

    impl Skin for MapSkin {
        fn enter(&mut self) {
            self.entered = true;
        }

        fn get(&self, key: &str) -> Option<Prop> {
            self.props.get(key).cloned()
        }

        fn set(&mut self, updates: &Targets) {
            for (k, v) in updates {
                self.props.insert(k.clone(), v.clone());
            }
        }
    }

    #[test]
    fn skinless_actor_reads_nothing_and_sets_nothing() {
        let mut actor = Actor::new("card", 7);
        assert!(!actor.has_skin());
        assert_eq!(actor.get("left"), None);
        actor.set(&target("left", 10.0));
        actor.enter();
        actor.leave();
    }

    #[test]
    fn ready_binds_skin_and_merges_extensions() {
        let mut actor = Actor::new("card", 7);
        actor.ready(
            Casting::new(MapSkin::default())
                .with_extension("kind", serde_json::json!("badge"))
                .with_extension("order", serde_json::json!(1)),
        );

        assert!(actor.has_skin());
        assert_eq!(actor.extension("kind"), Some(&serde_json::json!("badge")));

        // A second binding replaces the skin but never overwrites extensions.
        actor.ready(Casting::new(MapSkin::default()).with_extension("kind", serde_json::json!("other")));
        assert_eq!(actor.extension("kind"), Some(&serde_json::json!("badge")));
        assert_eq!(actor.extension("order"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn plans_drain_in_insertion_order() {
        let mut actor = Actor::new("card", 0);
        actor
            .plan(targets([("left", 10.0)]), 160, 0)
            .plan(targets([("left", 20.0)]), 320, 16);

        assert_eq!(actor.planned(), 2);
        let first = actor.next_plan().unwrap();
        assert_eq!(first.targets["left"], Prop::Number(10.0));
        assert_eq!(first.duration, 160);
        let second = actor.next_plan().unwrap();
        assert_eq!(second.delay, 16);
        assert!(actor.next_plan().is_none());
    }

    #[test]
    fn set_goes_through_the_skin() {
        let mut actor = Actor::new("card", 0);
        actor.ready(Casting::new(MapSkin::default()));
        actor.set(&target("left", 4.0));
        actor.enter();

        assert_eq!(actor.get("left"), Some(Prop::Number(4.0)));
    }
}
