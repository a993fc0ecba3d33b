use serde_json::json;
use stagecraft::{
    Actor, ActorId, Casting, CueCtx, ManualTicker, Part, Prop, Scene, Skin, Stage, Targets,
    TickCount, target, targets,
};

struct MapSkin {
    props: Targets,
}

impl Skin for MapSkin {
    fn get(&self, key: &str) -> Option<Prop> {
        self.props.get(key).cloned()
    }

    fn set(&mut self, updates: &Targets) {
        for (key, value) in updates {
            self.props.insert(key.clone(), value.clone());
        }
    }
}

/// Stage with a "bar" actor design and the two actions a bubble-sort
/// choreography needs: a pure bookkeeping "compare" and a coordinated
/// "swap-bars" that exchanges two slots visually.
fn bar_stage() -> (Stage<i32>, TickCount) {
    let ticker = ManualTicker::new();
    let ticks = ticker.counter();
    let mut stage = Stage::with_ticker(ticker);

    stage.design_actor("bar", |_actor: &Actor<i32>| {
        Ok(Casting::new(MapSkin {
            props: targets([
                ("left", Prop::Number(0.0)),
                ("fill", Prop::Text("gray".to_string())),
            ]),
        }))
    });

    stage
        .design_action("compare", |_: &mut Scene<'_, i32>, _: &CueCtx| Ok(()))
        .unwrap();

    stage
        .design_action("swap-bars", |scene: &mut Scene<'_, i32>, ctx: &CueCtx| {
            let a: ActorId = ctx.arg(0)?;
            let b: ActorId = ctx.arg(1)?;
            let i: usize = ctx.arg(2)?;
            let j: usize = ctx.arg(3)?;
            scene.together(vec![
                Part::new(
                    a,
                    targets([
                        ("left", Prop::Number((j * 50) as f64)),
                        ("fill", Prop::Text("tomato".to_string())),
                    ]),
                    32,
                    0,
                ),
                Part::new(
                    b,
                    targets([
                        ("left", Prop::Number((i * 50) as f64)),
                        ("fill", Prop::Text("tomato".to_string())),
                    ]),
                    32,
                    0,
                ),
            ])
        })
        .unwrap();

    (stage, ticks)
}

fn left_of(stage: &Stage<i32>, id: ActorId) -> f64 {
    stage
        .actor(id)
        .unwrap()
        .get("left")
        .and_then(|p| p.as_number())
        .unwrap()
}

fn fill_of(stage: &Stage<i32>, id: ActorId) -> String {
    stage
        .actor(id)
        .unwrap()
        .get("fill")
        .and_then(|p| p.as_text().map(str::to_string))
        .unwrap()
}

/// Record a full bubble sort of `values` as cues, mutating `values` and the
/// slot assignment eagerly through `code`.
fn choreograph_sort(stage: &mut Stage<i32>, values: &mut Vec<i32>, order: &mut Vec<ActorId>) {
    let compare = stage
        .action("compare")
        .describe_with(|args| format!("compare slot {} with slot {}", args[0], args[1]));
    let swap = stage.action("swap-bars").describe("swap two bars");

    let n = values.len();
    for pass in 0..n {
        for k in 0..n - 1 - pass {
            let should = stage
                .act(&compare, vec![json!(k), json!(k + 1)])
                .code(|| values[k] > values[k + 1]);
            if should {
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
}

#[test]
fn algorithm_state_lands_eagerly_while_visuals_replay_on_play() {
    let (mut stage, ticks) = bar_stage();

    let ids = stage
        .create_actors("bar", [3, 1, 2], |actor, index| {
            actor.set(&target("left", (index * 50) as f64));
        })
        .unwrap();
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    let mut values = vec![3, 1, 2];
    let mut order = ids.clone();
    choreograph_sort(&mut stage, &mut values, &mut order);

    // The algorithm is already done: values sorted, slots reassigned, the
    // first comparison's outcome captured on its cue...
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(order, vec![b, c, a]);
    assert_eq!(stage.cues().count(), 5);
    let first = stage.cues().next().unwrap();
    assert_eq!(first.name, "compare");
    assert_eq!(
        first.description.as_deref(),
        Some("compare slot 0 with slot 1")
    );
    assert_eq!(first.result, Some(json!(true)));

    // ...but nothing moved visually and no tick was consumed.
    assert_eq!(ticks.get(), 0);
    assert_eq!(left_of(&stage, a), 0.0);
    assert_eq!(left_of(&stage, b), 50.0);
    assert_eq!(left_of(&stage, c), 100.0);

    let renders = std::rc::Rc::new(std::cell::RefCell::new(0u64));
    let seen = renders.clone();
    stage.on_render(move || *seen.borrow_mut() += 1);

    assert_eq!(stage.play(None).unwrap(), 5);

    // Every bar ends on the slot the sort assigned it.
    assert_eq!(left_of(&stage, b), 0.0);
    assert_eq!(left_of(&stage, c), 50.0);
    assert_eq!(left_of(&stage, a), 100.0);
    assert_eq!(fill_of(&stage, a), "tomato");

    // 3 compare cues at one boundary tick each, 2 swap cues at one boundary
    // tick plus a two-tick coordinated transition; one render per tick plus
    // one forced render per cue.
    assert_eq!(ticks.get(), 9);
    assert_eq!(*renders.borrow(), 9);

    let gone: Vec<_> = stage.gone().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        gone,
        vec!["compare", "swap-bars", "compare", "swap-bars", "compare"]
    );
}

#[test]
fn playback_can_be_limited_and_resumed() {
    let (mut stage, _) = bar_stage();
    let ids = stage
        .create_actors("bar", [3, 1, 2], |actor, index| {
            actor.set(&target("left", (index * 50) as f64));
        })
        .unwrap();

    let mut values = vec![3, 1, 2];
    let mut order = ids.clone();
    choreograph_sort(&mut stage, &mut values, &mut order);

    assert_eq!(stage.play(Some(2)).unwrap(), 2);
    assert_eq!(stage.cues().count(), 3);
    assert_eq!(stage.gone().len(), 2);

    assert_eq!(stage.play(None).unwrap(), 3);
    assert_eq!(stage.cues().count(), 0);
    assert_eq!(stage.gone().len(), 5);

    // The replayed story still converges to the sorted layout.
    assert_eq!(left_of(&stage, order[0]), 0.0);
    assert_eq!(left_of(&stage, order[1]), 50.0);
    assert_eq!(left_of(&stage, order[2]), 100.0);
}

#[test]
fn stop_requested_mid_cue_finishes_it_and_halts_playback() {
    let (mut stage, _) = bar_stage();
    let ids = stage
        .create_actors("bar", [2, 1], |actor, index| {
            actor.set(&target("left", (index * 50) as f64));
        })
        .unwrap();

    let swap = stage.action("swap-bars");
    for _ in 0..2 {
        stage
            .act(&swap, vec![json!(ids[0]), json!(ids[1]), json!(0), json!(1)])
            .code(|| ());
    }

    // The render callback fires during the first cue's animation ticks, so
    // the stop request lands while that cue is in flight.
    let halt = stage.stop_handle();
    stage.on_render(move || halt.stop());

    assert_eq!(stage.play(None).unwrap(), 1);
    assert_eq!(stage.cues().count(), 1);

    // The in-flight swap was not interrupted mid-tween.
    assert_eq!(left_of(&stage, ids[0]), 50.0);
    assert_eq!(left_of(&stage, ids[1]), 0.0);
}

#[test]
fn speed_rescales_the_tick_budget_of_later_transitions() {
    let (mut stage, ticks) = bar_stage();
    let id = stage.create_actor("bar", 0).unwrap();

    stage.animate(id, targets([("left", 100.0)]), 160, 0).unwrap();
    let normal = ticks.get();
    assert_eq!(normal, 10);

    stage.set_speed(4.0);
    stage.animate(id, targets([("left", 0.0)]), 160, 0).unwrap();
    assert_eq!(ticks.get() - normal, 2);
    assert_eq!(left_of(&stage, id), 0.0);
}
