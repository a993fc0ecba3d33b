#![forbid(unsafe_code)]

pub mod actor;
pub mod cue;
pub mod error;
pub mod guide;
pub mod prop;
pub mod stage;
pub mod tick;
pub mod tween;

pub use actor::{Actor, ActorId, Casting, Plan, Skin};
pub use cue::{Cue, CueCtx, Description, GoneCue};
pub use error::{StagecraftError, StagecraftResult};
pub use prop::{Prop, Targets, target, targets};
pub use stage::{Action, Part, Scene, Stage, Status, StopHandle, Take};
pub use tick::{IntervalTicker, ManualTicker, TickCount, Ticker};
pub use tween::{Step, TICK_UNITS, Tween};
