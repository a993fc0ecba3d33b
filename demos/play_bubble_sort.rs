//! Records a full bubble sort as cues, then replays it in real time, printing
//! one terminal row per tick.
//!
//! Run with `cargo run --example play_bubble_sort`.

use std::{cell::RefCell, rc::Rc};

use serde_json::json;
use stagecraft::{
    Actor, ActorId, Casting, CueCtx, Part, Prop, Scene, Skin, Stage, Targets, target,
};

const SLOT: f64 = 6.0;

#[derive(Clone, Default)]
struct CardSkin {
    props: Rc<RefCell<Targets>>,
}

impl Skin for CardSkin {
    fn get(&self, key: &str) -> Option<Prop> {
        self.props.borrow().get(key).cloned()
    }

    fn set(&mut self, updates: &Targets) {
        for (key, value) in updates {
            self.props.borrow_mut().insert(key.clone(), value.clone());
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut stage = Stage::new();

    let cards: Rc<RefCell<Vec<(i64, CardSkin)>>> = Rc::default();
    let sink = cards.clone();
    stage.design_actor("card", move |actor: &Actor<i64>| {
        let skin = CardSkin::default();
        sink.borrow_mut().push((actor.value, skin.clone()));
        Ok(Casting::new(skin))
    });

    stage.design_action("compare", |_: &mut Scene<'_, i64>, ctx: &CueCtx| {
        if let Some(text) = &ctx.description {
            tracing::info!("{text}");
        }
        Ok(())
    })?;

    stage.design_action("swap-cards", |scene: &mut Scene<'_, i64>, ctx: &CueCtx| {
        let a: ActorId = ctx.arg(0)?;
        let b: ActorId = ctx.arg(1)?;
        let i: usize = ctx.arg(2)?;
        let j: usize = ctx.arg(3)?;
        scene.together(vec![
            Part::new(a, target("left", (j as f64) * SLOT), 160, 0),
            Part::new(b, target("left", (i as f64) * SLOT), 160, 0),
        ])
    })?;

    let board = cards.clone();
    stage.on_render(move || {
        let mut row = vec![b' '; 48];
        for (value, skin) in board.borrow().iter() {
            let left = skin
                .get("left")
                .and_then(|p| p.as_number())
                .unwrap_or(0.0)
                .round() as usize;
            for (offset, byte) in value.to_string().bytes().enumerate() {
                if let Some(cell) = row.get_mut(left + offset) {
                    *cell = byte;
                }
            }
        }
        println!("{}", String::from_utf8_lossy(&row).trim_end());
    });

    let mut values = vec![5_i64, 2, 4, 1, 3];
    let ids = stage.create_actors("card", values.clone(), |actor, index| {
        actor.set(&target("left", (index as f64) * SLOT));
    })?;
    let mut order = ids.clone();

    let compare = stage
        .action("compare")
        .describe_with(|args| format!("compare slot {} with slot {}", args[0], args[1]));
    let swap = stage.action("swap-cards").describe("swap two cards");

    // The sort itself runs to completion here; only its visual story is queued.
    let n = values.len();
    for pass in 0..n {
        for k in 0..n - 1 - pass {
            let out_of_order = stage
                .act(&compare, vec![json!(k), json!(k + 1)])
                .code(|| values[k] > values[k + 1]);
            if out_of_order {
                let (a, b) = (order[k], order[k + 1]);
                stage
                    .act(&swap, vec![json!(a), json!(b), json!(k), json!(k + 1)])
                    .code(|| {
                        values.swap(k, k + 1);
                        order.swap(k, k + 1);
                    });
            }
        }
    }

    tracing::info!(cues = stage.cues().count(), "sort recorded, replaying");
    let played = stage.play(None)?;
    tracing::info!(played, "playback finished");

    Ok(())
}
