use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::error::{StagecraftError, StagecraftResult};

/// Human-readable label for a cue: fixed text, or computed from the
/// invocation arguments at the moment the cue is queued.
#[derive(Clone)]
pub enum Description {
    Text(String),
    Compute(Rc<dyn Fn(&[serde_json::Value]) -> String>),
}

impl Description {
    pub(crate) fn resolve(&self, args: &[serde_json::Value]) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Compute(f) => (**f)(args),
        }
    }
}

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}

/// One queued, replayable visual step.
///
/// The algorithm-side work of the step already ran when the cue was recorded
/// (see `Take::code`); what the queue holds is how to replay the step
/// visually: the action name plus the invocation arguments, along with the
/// captured result for introspection.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Cue {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<serde_json::Value>,
    pub result: Option<serde_json::Value>,
}

/// Summary of a played cue, appended to the stage's history log.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GoneCue {
    pub name: String,
    pub description: Option<String>,
}

/// Context handed to an action when its cue is played back.
#[derive(Clone, Debug)]
pub struct CueCtx {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<serde_json::Value>,
    pub result: Option<serde_json::Value>,
}

impl CueCtx {
    /// Decode the invocation argument at `index`.
    pub fn arg<D: DeserializeOwned>(&self, index: usize) -> StagecraftResult<D> {
        let value = self.args.get(index).ok_or_else(|| {
            StagecraftError::usage(format!("cue '{}' has no argument {index}", self.name))
        })?;
        serde_json::from_value(value.clone()).map_err(|err| {
            StagecraftError::usage(format!("cue '{}' argument {index}: {err}", self.name))
        })
    }
}
