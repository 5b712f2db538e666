use super::*;
use engine::DrawCommand;
use serde_json::json;

const MAX_SETTLE_TICKS: usize = 600;
const FLOWER_IDS: [&str; 5] = ["f1", "f2", "f3", "f4", "f5"];

fn fresh_state() -> GameState {
    GameState::new(WorldLayout::builtin())
}

fn seeded_scene() -> GardenScene {
    GardenScene::new(WorldLayout::builtin(), StdRng::seed_from_u64(7))
}

/// Ticks until the player has no pending entity target and is not walking.
fn settle(state: &mut GameState) {
    for _ in 0..MAX_SETTLE_TICKS {
        let walking =
            state.player.position.distance(state.player.target.point) > state.player.speed;
        if state.player.target.entity.is_none() && !walking {
            return;
        }
        state.tick();
    }
    panic!("player never settled: {:?}", state.player);
}

fn collect_flower(state: &mut GameState, id: &str) {
    let center = state.pickup_center(id).expect("pickup exists");
    state.handle_tap(center);
    settle(state);
}

fn collect_all_flowers(state: &mut GameState) {
    for id in FLOWER_IDS {
        collect_flower(state, id);
    }
}

fn control_center(state: &GameState, id: ControlId) -> Vec2 {
    state
        .modal_controls()
        .iter()
        .find(|control| control.id == id)
        .map(|control| control.rect.center())
        .unwrap_or_else(|| panic!("control {id:?} not active in {:?}", state.dialog))
}

fn tap_control(state: &mut GameState, id: ControlId) {
    let center = control_center(state, id);
    state.handle_tap(center);
}

fn envelope_center(state: &GameState) -> Vec2 {
    state.layout.envelope.to_rect().center()
}

fn reset_center(state: &GameState) -> Vec2 {
    state.layout.reset_control.to_rect().center()
}

fn unlocked_state() -> GameState {
    let mut state = fresh_state();
    collect_all_flowers(&mut state);
    state
}

fn opened_state() -> GameState {
    let mut state = unlocked_state();
    state.handle_tap(envelope_center(&state));
    tap_control(&mut state, ControlId::OpenQuestion);
    tap_control(&mut state, ControlId::YesAbsolutely);
    state
}

fn strictly_inside(rect: Rect, point: Vec2) -> bool {
    point.x > rect.x && point.x < rect.right() && point.y > rect.y && point.y < rect.bottom()
}

fn snapshot_value(state: &GameState) -> serde_json::Value {
    serde_json::to_value(state.snapshot()).expect("snapshot serializes")
}

fn builtin_layout_json() -> serde_json::Value {
    serde_json::to_value(WorldLayout::builtin()).expect("layout serializes")
}

/// Snapshot without the notification, which a reset leaves running.
fn progress_value(state: &GameState) -> serde_json::Value {
    let mut value = snapshot_value(state);
    if let Some(fields) = value.as_object_mut() {
        fields.remove("toast");
    }
    value
}

fn click_snapshot(press_px: Vec2, window_size: (u32, u32)) -> InputSnapshot {
    InputSnapshot::empty()
        .with_pointer_pressed_at_px(Some(press_px))
        .with_window_size(window_size)
}

#[test]
fn builtin_layout_is_valid() {
    let layout = WorldLayout::builtin();
    layout.validate().expect("builtin layout validates");
    assert_eq!(layout.max_flowers(), 5);
    assert_eq!(layout.max_pets, 2);
    assert_eq!(layout.npcs[0].rect, LayoutRect::new(670.0, 340.0, 56.0, 56.0));
    assert_eq!(layout.npcs[1].rect, LayoutRect::new(730.0, 240.0, 30.0, 30.0));
    assert_eq!(layout.reset_control, LayoutRect::new(650.0, 10.0, 140.0, 38.0));
    assert_eq!(layout.envelope, LayoutRect::new(370.0, 270.0, 60.0, 60.0));
}

#[test]
fn fresh_state_starts_in_free_play_at_spawn() {
    let state = fresh_state();
    assert_eq!(state.dialog, DialogState::FreePlay);
    assert_eq!(state.player.position, Vec2::new(120.0, 420.0));
    assert_eq!(state.player.target.point, state.player.position);
    assert!(state.player.target.entity.is_none());
    assert_eq!(state.progression.flowers_collected, 0);
    assert_eq!(state.progression.max_flowers, 5);
    assert!(!state.progression.gate_unlocked);
    assert!(!state.progression.gate_open);
    assert!(!state.progression.won);
}

#[test]
fn npc_lines_cycle_and_wrap() {
    let mut npc = fresh_state().npcs[0].clone();
    let read: Vec<String> = (0..4).filter_map(|_| npc.read_next_line()).collect();
    assert_eq!(
        read,
        vec!["woof woof wooooffff", "hi mom", "i love you", "woof woof wooooffff"]
    );
    assert_eq!(npc.message_cursor, 1);
}

#[test]
fn npc_without_lines_reads_nothing() {
    let mut npc = fresh_state().npcs[0].clone();
    npc.lines.clear();
    assert_eq!(npc.read_next_line(), None);
    assert_eq!(npc.message_cursor, 0);
}

#[test]
fn pet_is_one_shot_and_requires_capability() {
    let state = fresh_state();
    let mut left = state.npcs[0].clone();
    let mut right = state.npcs[1].clone();

    assert!(!left.pet());
    assert!(!left.petted);

    assert!(right.pet());
    assert!(!right.pet());
    assert!(right.petted);
}

#[test]
fn movement_advances_exactly_speed_per_tick() {
    let mut state = fresh_state();
    state.handle_tap(Vec2::new(420.0, 420.0));
    state.tick();
    assert_eq!(state.player.position, Vec2::new(126.0, 420.0));
    state.tick();
    assert_eq!(state.player.position, Vec2::new(132.0, 420.0));
}

#[test]
fn movement_does_not_snap_within_one_step() {
    let mut state = fresh_state();
    state.handle_tap(Vec2::new(124.0, 420.0));
    state.tick();
    assert_eq!(state.player.position, Vec2::new(120.0, 420.0));
    assert_eq!(state.player.target.point, Vec2::new(124.0, 420.0));
}

#[test]
fn step_toward_keeps_direction() {
    let next = step_toward(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 5.0);
    assert!((next.x - 3.0).abs() < 1e-5);
    assert!((next.y - 4.0).abs() < 1e-5);
    assert_eq!(
        step_toward(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), 5.0),
        Vec2::new(1.0, 1.0)
    );
}

#[test]
fn ground_tap_targets_raw_point_without_entity() {
    let mut state = fresh_state();
    let point = Vec2::new(400.0, 200.0);
    assert_eq!(state.resolve_tap(point), TapTarget::Ground(point));
    state.handle_tap(point);
    assert_eq!(state.player.target.point, point);
    assert!(state.player.target.entity.is_none());
}

#[test]
fn pickup_tap_targets_center_with_reference() {
    let mut state = fresh_state();
    state.handle_tap(Vec2::new(325.0, 225.0));
    assert_eq!(state.player.target.point, Vec2::new(340.0, 240.0));
    assert_eq!(
        state.player.target.entity,
        Some(TargetRef {
            kind: TargetKind::Pickup,
            id: "f2".to_string(),
        })
    );
}

#[test]
fn npc_tap_targets_center_with_reference() {
    let mut state = fresh_state();
    state.handle_tap(Vec2::new(680.0, 350.0));
    assert_eq!(state.player.target.point, Vec2::new(698.0, 368.0));
    assert_eq!(
        state.player.target.entity,
        Some(TargetRef {
            kind: TargetKind::Npc,
            id: "guardLeft".to_string(),
        })
    );
}

#[test]
fn later_declared_pickup_wins_overlap() {
    let mut layout = WorldLayout::builtin();
    layout.pickups[1].rect = layout.pickups[0].rect;
    let state = GameState::new(layout);
    assert_eq!(
        state.resolve_tap(Vec2::new(140.0, 160.0)),
        TapTarget::Pickup("f2".to_string())
    );
}

#[test]
fn pickups_are_checked_before_npcs() {
    let mut layout = WorldLayout::builtin();
    layout.pickups[0].rect = layout.npcs[0].rect;
    let state = GameState::new(layout);
    assert_eq!(
        state.resolve_tap(Vec2::new(690.0, 360.0)),
        TapTarget::Pickup("f1".to_string())
    );
}

#[test]
fn later_declared_npc_wins_overlap() {
    let mut layout = WorldLayout::builtin();
    layout.npcs[0].rect = layout.npcs[1].rect;
    let state = GameState::new(layout);
    assert_eq!(
        state.resolve_tap(Vec2::new(740.0, 250.0)),
        TapTarget::Npc("guardRight".to_string())
    );
}

#[test]
fn collected_pickups_are_not_tappable() {
    let mut state = fresh_state();
    collect_flower(&mut state, "f1");
    let center = Vec2::new(140.0, 160.0);
    assert_eq!(state.resolve_tap(center), TapTarget::Ground(center));
}

#[test]
fn envelope_is_checked_before_pickups_once_unlocked() {
    let mut layout = WorldLayout::builtin();
    layout.pickups[0].rect = layout.envelope;
    let mut state = GameState::new(layout);
    let center = envelope_center(&state);
    assert_eq!(state.resolve_tap(center), TapTarget::Pickup("f1".to_string()));

    state.progression.gate_unlocked = true;
    assert_eq!(state.resolve_tap(center), TapTarget::Control(ControlId::Envelope));

    state.progression.gate_open = true;
    assert_eq!(state.resolve_tap(center), TapTarget::Pickup("f1".to_string()));
}

#[test]
fn envelope_area_is_plain_ground_while_locked() {
    let mut state = fresh_state();
    let center = envelope_center(&state);
    state.handle_tap(center);
    assert_eq!(state.dialog, DialogState::FreePlay);
    assert_eq!(state.player.target.point, center);
}

#[test]
fn reset_control_is_checked_first_in_every_state() {
    let mut state = unlocked_state();
    state.handle_tap(envelope_center(&state));
    tap_control(&mut state, ControlId::OpenQuestion);
    assert_eq!(state.dialog, DialogState::Question);

    assert_eq!(
        state.resolve_tap(reset_center(&state)),
        TapTarget::Control(ControlId::Reset)
    );
    state.handle_tap(reset_center(&state));
    assert_eq!(state.dialog, DialogState::FreePlay);
    assert_eq!(state.progression.flowers_collected, 0);
}

#[test]
fn modal_absorbs_taps_outside_its_controls() {
    let mut state = unlocked_state();
    state.handle_tap(envelope_center(&state));
    assert_eq!(state.dialog, DialogState::PreQuestion);
    let before = state.player.clone();

    let ground = Vec2::new(200.0, 150.0);
    assert_eq!(state.resolve_tap(ground), TapTarget::UiNoop);
    state.handle_tap(ground);
    state.handle_tap(Vec2::new(700.0, 360.0));

    assert_eq!(state.player, before);
    assert_eq!(state.dialog, DialogState::PreQuestion);
}

#[test]
fn modal_blocks_movement_and_interaction() {
    let mut state = unlocked_state();
    state.player.target.point = Vec2::new(400.0, 100.0);
    state.handle_tap(envelope_center(&state));
    let position = state.player.position;
    for _ in 0..20 {
        state.tick();
    }
    assert_eq!(state.player.position, position);
}

#[test]
fn modal_controls_are_rebuilt_per_state() {
    let mut state = fresh_state();
    assert!(state.modal_controls().is_empty());

    state.dialog = DialogState::PreQuestion;
    let pre = state.modal_controls();
    assert_eq!(pre.len(), 1);
    assert_eq!(pre[0].id, ControlId::OpenQuestion);
    assert_eq!(pre[0].rect, Rect::new(84.0, 480.0, 240.0, 40.0));
    assert_eq!(pre, state.modal_controls());

    state.dialog = DialogState::Question;
    let question: Vec<(ControlId, Rect)> = state
        .modal_controls()
        .iter()
        .map(|control| (control.id, control.rect))
        .collect();
    assert_eq!(
        question,
        vec![
            (ControlId::YesAbsolutely, Rect::new(84.0, 420.0, 320.0, 40.0)),
            (ControlId::YesSquish, Rect::new(84.0, 470.0, 320.0, 40.0)),
            (ControlId::No, Rect::new(430.0, 470.0, 140.0, 40.0)),
        ]
    );

    state.dialog = DialogState::QuestionRetry;
    let retry: Vec<(ControlId, Rect)> = state
        .modal_controls()
        .iter()
        .map(|control| (control.id, control.rect))
        .collect();
    assert_eq!(
        retry,
        vec![
            (ControlId::YesAbsolutelyRetry, Rect::new(84.0, 430.0, 320.0, 40.0)),
            (ControlId::YesSquishRetry, Rect::new(84.0, 480.0, 320.0, 40.0)),
        ]
    );

    state.dialog = DialogState::Resolution;
    assert!(state.modal_controls().is_empty());
}

#[test]
fn controls_from_other_states_are_ignored() {
    let mut state = unlocked_state();
    state.handle_tap(envelope_center(&state));
    state.handle_control(ControlId::YesAbsolutely);
    state.handle_control(ControlId::Envelope);
    assert_eq!(state.dialog, DialogState::PreQuestion);
    assert!(!state.progression.gate_open);
}

#[test]
fn confirm_only_dismisses_resolution() {
    let mut state = unlocked_state();
    state.handle_confirm();
    assert_eq!(state.dialog, DialogState::FreePlay);

    state.handle_tap(envelope_center(&state));
    state.handle_confirm();
    assert_eq!(state.dialog, DialogState::PreQuestion);

    tap_control(&mut state, ControlId::OpenQuestion);
    tap_control(&mut state, ControlId::YesSquish);
    assert_eq!(state.dialog, DialogState::Resolution);
    state.handle_confirm();
    assert_eq!(state.dialog, DialogState::FreePlay);
    assert!(state.progression.gate_open);
}

#[test]
fn scenario_a_collecting_every_flower_unlocks_but_keeps_gate_solid() {
    let mut state = fresh_state();
    for id in ["f5", "f3", "f1", "f4", "f2"] {
        let before = state.progression.flowers_collected;
        collect_flower(&mut state, id);
        assert_eq!(state.progression.flowers_collected, before + 1);
        assert_eq!(
            state.progression.gate_unlocked,
            state.progression.flowers_collected == state.progression.max_flowers
        );
    }

    assert_eq!(state.progression.flowers_collected, 5);
    assert!(state.progression.gate_unlocked);
    assert!(!state.progression.gate_open);

    let gate = state.layout.gate.to_rect();
    state.player.position = Vec2::new(700.0, 310.0);
    state.handle_tap(Vec2::new(770.0, 310.0));
    for _ in 0..60 {
        state.tick();
        assert!(!strictly_inside(gate, state.player.position));
    }
}

#[test]
fn flower_counter_is_monotonic_and_bounded_every_tick() {
    let mut state = fresh_state();
    let mut previous = 0;
    for id in FLOWER_IDS {
        let center = state.pickup_center(id).expect("pickup");
        state.handle_tap(center);
        for _ in 0..MAX_SETTLE_TICKS {
            state.tick();
            let flowers = state.progression.flowers_collected;
            assert!(flowers >= previous);
            assert!(flowers <= state.progression.max_flowers);
            assert_eq!(
                state.progression.gate_unlocked,
                flowers == state.progression.max_flowers
            );
            previous = flowers;
            if state.player.target.entity.is_none() {
                break;
            }
        }
    }
    assert_eq!(previous, 5);
}

#[test]
fn collecting_shows_flavor_message() {
    let mut state = fresh_state();
    collect_flower(&mut state, "f1");
    assert!(state.toast.is_visible());
    assert_eq!(state.toast.text, "You picked a flower");
}

#[test]
fn already_collected_pickup_clears_target_without_counting() {
    let mut state = fresh_state();
    collect_flower(&mut state, "f1");
    assert_eq!(state.progression.flowers_collected, 1);

    state.player.target = MoveTarget {
        point: state.player.position,
        entity: Some(TargetRef {
            kind: TargetKind::Pickup,
            id: "f1".to_string(),
        }),
    };
    state.tick();

    assert!(state.player.target.entity.is_none());
    assert_eq!(state.progression.flowers_collected, 1);
}

#[test]
fn counter_at_max_absorbs_extra_pickups() {
    let mut layout = WorldLayout::builtin();
    layout.pickups.truncate(2);
    let mut state = GameState::new(layout);
    state.progression.flowers_collected = state.progression.max_flowers;
    state.collect_pickup(0);
    assert_eq!(state.progression.flowers_collected, 2);
    assert!(!state.pickups[0].collected);
}

#[test]
fn missing_target_entity_is_cleared_silently() {
    let mut state = fresh_state();
    state.player.target.entity = Some(TargetRef {
        kind: TargetKind::Npc,
        id: "ghost".to_string(),
    });
    let before = state.progression;
    state.tick();
    assert!(state.player.target.entity.is_none());
    assert_eq!(state.progression, before);
    assert!(!state.toast.is_visible());
}

#[test]
fn target_out_of_range_stays_pending() {
    let mut state = fresh_state();
    state.player.target = MoveTarget {
        point: state.player.position,
        entity: Some(TargetRef {
            kind: TargetKind::Pickup,
            id: "f3".to_string(),
        }),
    };
    state.tick();
    assert!(state.player.target.entity.is_some());
    assert_eq!(state.progression.flowers_collected, 0);
}

#[test]
fn scenario_b_dialog_flow_opens_gate() {
    let mut state = unlocked_state();

    state.handle_tap(envelope_center(&state));
    assert_eq!(state.dialog, DialogState::PreQuestion);

    tap_control(&mut state, ControlId::OpenQuestion);
    assert_eq!(state.dialog, DialogState::Question);
    assert!(!state.progression.gate_open);

    tap_control(&mut state, ControlId::No);
    assert_eq!(state.dialog, DialogState::QuestionRetry);
    assert!(!state.progression.gate_open);
    assert!(state
        .modal_controls()
        .iter()
        .all(|control| control.id != ControlId::No));

    tap_control(&mut state, ControlId::YesSquishRetry);
    assert!(state.progression.gate_open);
    assert_eq!(state.dialog, DialogState::Resolution);
    assert!(!state.progression.won);
}

#[test]
fn either_yes_opens_gate_from_question() {
    for yes in [ControlId::YesAbsolutely, ControlId::YesSquish] {
        let mut state = unlocked_state();
        state.handle_tap(envelope_center(&state));
        tap_control(&mut state, ControlId::OpenQuestion);
        tap_control(&mut state, yes);
        assert!(state.progression.gate_open, "control={yes:?}");
        assert_eq!(state.dialog, DialogState::Resolution);
    }
}

#[test]
fn open_gate_never_reverts_without_reset() {
    let mut state = opened_state();
    state.handle_confirm();
    for _ in 0..30 {
        state.handle_tap(Vec2::new(300.0, 300.0));
        state.tick();
        assert!(state.progression.gate_open);
    }
    state.handle_tap(reset_center(&state));
    assert!(!state.progression.gate_open);
}

#[test]
fn scenario_c_pet_bonus_counts_once_per_npc() {
    let mut state = fresh_state();
    let guard = state.npc_center("guardRight").expect("npc");

    state.handle_tap(guard);
    settle(&mut state);
    assert_eq!(state.progression.pets_given, 1);
    assert_eq!(state.toast.text, "bow wow bow wow");

    state.handle_tap(guard);
    settle(&mut state);
    assert_eq!(state.progression.pets_given, 1);
    assert_eq!(state.toast.text, "hi shirley");
    assert_eq!(state.npcs[1].message_cursor, 2);
}

#[test]
fn non_pettable_npc_only_talks() {
    let mut state = fresh_state();
    let guard = state.npc_center("guardLeft").expect("npc");
    state.handle_tap(guard);
    settle(&mut state);
    assert_eq!(state.progression.pets_given, 0);
    assert_eq!(state.toast.text, "woof woof wooooffff");
    assert!(!state.npcs[0].petted);
}

#[test]
fn pet_bonus_is_bounded_by_max_pets() {
    let mut layout = WorldLayout::builtin();
    for npc in &mut layout.npcs {
        npc.pettable = true;
    }
    layout.npcs.push(NpcDef {
        id: "guardExtra".to_string(),
        rect: LayoutRect::new(400.0, 100.0, 30.0, 30.0),
        sprite: "npc".to_string(),
        lines: vec!["yip".to_string()],
        pettable: true,
    });
    let mut state = GameState::new(layout);
    for index in 0..state.npcs.len() {
        state.greet_npc(index);
    }
    assert!(state.npcs.iter().all(|npc| npc.petted));
    assert_eq!(state.progression.pets_given, 2);
}

#[test]
fn scenario_d_gate_rejects_candidate_positions() {
    let mut state = fresh_state();
    let gate = state.layout.gate.to_rect();
    state.player.position = Vec2::new(700.0, 310.0);
    state.player.target.point = state.player.position;

    state.handle_tap(Vec2::new(760.0, 310.0));
    for _ in 0..50 {
        state.tick();
        assert!(!strictly_inside(gate, state.player.position));
    }
    assert_eq!(state.player.position, Vec2::new(736.0, 310.0));
    assert_eq!(state.player.target.point, state.player.position);

    for _ in 0..20 {
        state.handle_tap(Vec2::new(770.0, 330.0));
        state.tick();
        assert!(!strictly_inside(gate, state.player.position));
    }
}

#[test]
fn gate_rejection_keeps_entity_target() {
    let mut state = fresh_state();
    state.player.position = Vec2::new(736.0, 300.0);
    state.player.target = MoveTarget {
        point: Vec2::new(760.0, 300.0),
        entity: Some(TargetRef {
            kind: TargetKind::Pickup,
            id: "f1".to_string(),
        }),
    };
    state.tick();
    assert_eq!(state.player.position, Vec2::new(736.0, 300.0));
    assert_eq!(state.player.target.point, Vec2::new(736.0, 300.0));
    assert!(state.player.target.entity.is_some());
}

#[test]
fn open_gate_lets_player_through() {
    let mut state = opened_state();
    state.handle_confirm();
    state.player.position = Vec2::new(700.0, 310.0);
    state.handle_tap(Vec2::new(758.0, 310.0));
    settle(&mut state);
    assert!(strictly_inside(state.layout.gate.to_rect(), state.player.position));
}

#[test]
fn scenario_e_final_zone_wins_exactly_once() {
    let mut state = opened_state();
    state.handle_confirm();
    assert_eq!(state.dialog, DialogState::FreePlay);

    state.handle_tap(Vec2::new(780.0, 300.0));
    let mut win_ticks = 0;
    for _ in 0..MAX_SETTLE_TICKS {
        let was_won = state.progression.won;
        state.tick();
        if !was_won && state.progression.won {
            win_ticks += 1;
            assert_eq!(state.dialog, DialogState::Resolution);
            break;
        }
    }
    assert_eq!(win_ticks, 1);
    assert!(state
        .layout
        .final_zone
        .to_rect()
        .contains(state.player.position));

    state.handle_confirm();
    for _ in 0..30 {
        state.tick();
    }
    assert!(state.progression.won);
    assert_eq!(state.dialog, DialogState::FreePlay);

    state.handle_tap(Vec2::new(700.0, 300.0));
    settle(&mut state);
    state.handle_tap(Vec2::new(780.0, 300.0));
    settle(&mut state);
    assert_eq!(state.dialog, DialogState::FreePlay);
}

#[test]
fn final_zone_does_nothing_while_gate_closed() {
    let mut state = unlocked_state();
    state.player.position = Vec2::new(780.0, 220.0);
    state.player.target.point = state.player.position;
    for _ in 0..10 {
        state.tick();
    }
    assert!(!state.progression.won);
    assert_eq!(state.dialog, DialogState::FreePlay);
}

#[test]
fn toast_counts_down_and_fades() {
    let mut state = fresh_state();
    state.show_toast("hello".to_string());
    assert_eq!(state.toast.remaining_ticks, TOAST_DURATION_TICKS);
    assert_eq!(state.toast.alpha(), 1.0);

    state.dialog = DialogState::Question;
    for _ in 0..(TOAST_DURATION_TICKS - 15) {
        state.tick();
    }
    assert!(state.toast.is_visible());
    assert!((state.toast.alpha() - 0.5).abs() < 1e-6);

    for _ in 0..15 {
        state.tick();
    }
    assert!(!state.toast.is_visible());
    assert!(state.snapshot().toast.is_none());
}

#[test]
fn reset_matches_fresh_start_from_any_state() {
    let fresh = progress_value(&fresh_state());

    let mut state = opened_state();
    state.handle_confirm();
    let guard = state.npc_center("guardRight").expect("npc");
    state.handle_tap(guard);
    settle(&mut state);
    state.handle_tap(Vec2::new(780.0, 300.0));
    for _ in 0..200 {
        state.tick();
    }
    assert!(state.progression.won);
    assert_ne!(progress_value(&state), fresh);

    state.reset();
    assert_eq!(progress_value(&state), fresh);

    state.reset();
    assert_eq!(progress_value(&state), fresh);
}

#[test]
fn reset_leaves_notification_counting_down() {
    let mut state = fresh_state();
    state.greet_npc(0);
    state.tick();
    let remaining = state.toast.remaining_ticks;
    assert_eq!(remaining, TOAST_DURATION_TICKS - 1);

    state.handle_tap(reset_center(&state));
    assert_eq!(state.progression.pets_given, 0);
    assert_eq!(state.toast.text, "woof woof wooooffff");
    assert_eq!(state.toast.remaining_ticks, remaining);

    for _ in 0..remaining {
        state.tick();
    }
    assert!(!state.toast.is_visible());
}

#[test]
fn reset_clears_npc_cursor_and_pet_flags() {
    let mut state = fresh_state();
    state.greet_npc(1);
    state.greet_npc(0);
    state.reset();
    assert!(state.npcs.iter().all(|npc| npc.message_cursor == 0 && !npc.petted));
    assert_eq!(state.progression.pets_given, 0);
}

#[test]
fn snapshot_reports_controls_and_state_names() {
    let mut state = unlocked_state();
    state.handle_tap(envelope_center(&state));
    tap_control(&mut state, ControlId::OpenQuestion);

    let value = snapshot_value(&state);
    assert_eq!(value["dialog"], json!("question"));
    assert_eq!(value["controls"][0]["id"], json!("yesAbsolutely"));
    assert_eq!(
        value["controls"][2]["rect"],
        json!({ "x": 430.0, "y": 470.0, "w": 140.0, "h": 40.0 })
    );
    assert_eq!(value["progression"]["flowers_collected"], json!(5));
    assert_eq!(value["progression"]["gate_unlocked"], json!(true));
    assert_eq!(value["pickups"].as_array().map(Vec::len), Some(5));
}

#[test]
fn layout_json_reports_bad_field_path() {
    let mut value = builtin_layout_json();
    value["pickups"][1]["rect"]["w"] = json!("wide");
    match parse_layout_json(&value.to_string()) {
        Err(LayoutError::Parse { field_path, .. }) => {
            assert_eq!(field_path, "pickups[1].rect.w");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn layout_json_rejects_unknown_fields() {
    let mut value = builtin_layout_json();
    value["gate"]["depth"] = json!(3.0);
    assert!(matches!(
        parse_layout_json(&value.to_string()),
        Err(LayoutError::Parse { .. })
    ));
}

#[test]
fn layout_json_override_changes_flower_goal() {
    let mut value = builtin_layout_json();
    value["pickups"] = json!([
        { "id": "a", "rect": { "x": 100.0, "y": 100.0, "w": 40.0, "h": 40.0 }, "message": "one" },
        { "id": "b", "rect": { "x": 200.0, "y": 100.0, "w": 40.0, "h": 40.0 }, "message": "two" }
    ]);
    value.as_object_mut().expect("object").remove("decor");

    let layout = parse_layout_json(&value.to_string()).expect("layout parses");
    assert!(layout.decor.is_empty());
    let mut state = GameState::new(layout);
    assert_eq!(state.progression.max_flowers, 2);

    collect_flower(&mut state, "a");
    assert!(!state.progression.gate_unlocked);
    collect_flower(&mut state, "b");
    assert!(state.progression.gate_unlocked);
}

#[test]
fn layout_validation_rejects_bad_layouts() {
    let mut value = builtin_layout_json();
    value["pickups"] = json!([]);
    assert!(matches!(
        parse_layout_json(&value.to_string()),
        Err(LayoutError::NoPickups)
    ));

    let mut value = builtin_layout_json();
    value["pickups"][2]["id"] = json!("f1");
    assert!(matches!(
        parse_layout_json(&value.to_string()),
        Err(LayoutError::DuplicatePickupId { id }) if id == "f1"
    ));

    let mut value = builtin_layout_json();
    value["npcs"][1]["id"] = json!("guardLeft");
    assert!(matches!(
        parse_layout_json(&value.to_string()),
        Err(LayoutError::DuplicateNpcId { .. })
    ));

    let mut value = builtin_layout_json();
    value["npcs"][0]["lines"] = json!([]);
    assert!(matches!(
        parse_layout_json(&value.to_string()),
        Err(LayoutError::NpcWithoutLines { .. })
    ));

    let mut value = builtin_layout_json();
    value["player_speed"] = json!(0.0);
    assert!(matches!(
        parse_layout_json(&value.to_string()),
        Err(LayoutError::NonPositive { field, .. }) if field == "player_speed"
    ));

    let mut value = builtin_layout_json();
    value["max_pets"] = json!(0);
    assert!(matches!(
        parse_layout_json(&value.to_string()),
        Err(LayoutError::NonPositive { field, .. }) if field == "max_pets"
    ));
}

#[test]
fn layout_file_loads_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "garden_gate_layout_{}_{}.json",
        std::process::id(),
        line!()
    ));
    fs::write(&path, builtin_layout_json().to_string()).expect("write layout");
    let loaded = load_layout_file(&path);
    let _ = fs::remove_file(&path);
    assert_eq!(loaded.expect("layout loads"), WorldLayout::builtin());
}

#[test]
fn missing_layout_file_is_read_error() {
    let result = load_layout_file(Path::new("/definitely/not/here/layout.json"));
    assert!(matches!(result, Err(LayoutError::Read { .. })));
}

#[test]
fn petals_are_reproducible_for_a_seed() {
    let mut a = PetalField::new(PETAL_COUNT, StdRng::seed_from_u64(42));
    let mut b = PetalField::new(PETAL_COUNT, StdRng::seed_from_u64(42));
    for _ in 0..500 {
        a.advance();
        b.advance();
    }
    assert_eq!(a.petals(), b.petals());
    assert_eq!(a.petals().len(), PETAL_COUNT);
}

#[test]
fn petals_stay_within_wrap_bounds() {
    let mut field = PetalField::new(PETAL_COUNT, StdRng::seed_from_u64(3));
    for petal in field.petals() {
        assert!((0.0..GAME_WIDTH).contains(&petal.position.x));
        assert!((0.0..GAME_HEIGHT).contains(&petal.position.y));
        assert!((14.0..26.0).contains(&petal.size));
    }

    for _ in 0..3000 {
        field.advance();
        for petal in field.petals() {
            assert!(petal.position.x >= -40.5 && petal.position.x <= GAME_WIDTH + 40.5);
            assert!(petal.position.y <= GAME_HEIGHT + petal.size + 40.0 + petal.velocity.y);
            assert!(petal.position.y >= -petal.size - 120.0);
        }
    }
}

#[test]
fn counter_text_marks_progress() {
    let progression = Progression {
        flowers_collected: 2,
        max_flowers: 5,
        pets_given: 1,
        max_pets: 2,
        ..Progression::default()
    };
    assert_eq!(counter_text(&progression), "Flowers: **ooo  Pets: @.");
}

#[test]
fn scene_quits_on_quit_action() {
    let mut scene = seeded_scene();
    scene.load();
    let input = InputSnapshot::empty().with_action_pressed(InputAction::Quit);
    assert_eq!(scene.update(1.0 / 60.0, &input), SceneCommand::Quit);
}

#[test]
fn scene_converts_window_pixels_to_world_taps() {
    let mut scene = seeded_scene();
    scene.load();
    let input = click_snapshot(Vec2::new(800.0, 400.0), (1600, 1200));
    assert_eq!(scene.update(1.0 / 60.0, &input), SceneCommand::None);
    assert_eq!(scene.state.player.target.point, Vec2::new(400.0, 200.0));
    assert_ne!(scene.state.player.position, Vec2::new(120.0, 420.0));
}

#[test]
fn scene_ignores_frames_without_press() {
    let mut scene = seeded_scene();
    scene.load();
    let input = InputSnapshot::empty().with_window_size((1600, 1200));
    scene.update(1.0 / 60.0, &input);
    assert_eq!(scene.state.player.target.point, Vec2::new(120.0, 420.0));
}

#[test]
fn scene_letterbox_offsets_taps() {
    let mut scene = seeded_scene();
    scene.load();
    // 1600x600 window: scale 1, 400 px bars on each side
    let input = click_snapshot(Vec2::new(800.0, 300.0), (1600, 600));
    scene.update(1.0 / 60.0, &input);
    assert_eq!(scene.state.player.target.point, Vec2::new(400.0, 300.0));
}

#[test]
fn scene_confirm_closes_resolution() {
    let mut scene = seeded_scene();
    scene.load();
    scene.state = opened_state();
    let confirm = InputSnapshot::empty().with_action_pressed(InputAction::Confirm);
    scene.update(1.0 / 60.0, &confirm);
    assert_eq!(scene.state.dialog, DialogState::FreePlay);
}

#[test]
fn scene_dump_state_keeps_running() {
    let mut scene = seeded_scene();
    scene.load();
    let dump = InputSnapshot::empty().with_action_pressed(InputAction::DumpState);
    assert_eq!(scene.update(1.0 / 60.0, &dump), SceneCommand::None);
    assert_eq!(scene.loaded_ticks, 1);
}

#[test]
fn scene_title_shows_counters() {
    let scene = seeded_scene();
    assert_eq!(
        scene.debug_title().as_deref(),
        Some("Garden Gate | flowers 0/5 | pets 0/2")
    );
}

#[test]
fn render_starts_with_background_and_draws_player_after_pickups() {
    let mut scene = seeded_scene();
    let mut draw = DrawList::default();
    scene.render(&mut draw);

    let commands = draw.commands();
    assert!(matches!(
        &commands[0],
        DrawCommand::Sprite { key, .. } if key == "background"
    ));
    let sprite_index = |wanted: &str| {
        commands
            .iter()
            .rposition(|command| matches!(command, DrawCommand::Sprite { key, .. } if key == wanted))
            .expect("sprite drawn")
    };
    assert!(sprite_index("player") > sprite_index("flower"));
    assert!(sprite_index("flower") > sprite_index("sinbad"));
}

#[test]
fn render_draws_controls_where_taps_resolve() {
    let mut scene = seeded_scene();
    scene.state = unlocked_state();
    scene.state.handle_tap(envelope_center(&scene.state));
    tap_control(&mut scene.state, ControlId::OpenQuestion);

    let mut draw = DrawList::default();
    scene.render(&mut draw);

    for control in scene.state.modal_controls() {
        assert!(
            draw.commands().iter().any(|command| matches!(
                command,
                DrawCommand::FillRect { rect, .. } if *rect == control.rect
            )),
            "control {:?} not drawn at its hit rect",
            control.id
        );
        assert_eq!(
            scene.state.resolve_tap(control.rect.center()),
            TapTarget::Control(control.id)
        );
    }
}

#[test]
fn render_hides_collected_pickups_and_shows_unlock_hint() {
    let mut scene = seeded_scene();
    scene.state = unlocked_state();
    let mut draw = DrawList::default();
    scene.render(&mut draw);

    let pickup_rects: Vec<Rect> = scene.state.pickups.iter().map(|pickup| pickup.rect).collect();
    assert!(!draw.commands().iter().any(|command| matches!(
        command,
        DrawCommand::Sprite { key, rect, .. } if key == "flower" && pickup_rects.contains(rect)
    )));
    assert!(draw.commands().iter().any(|command| matches!(
        command,
        DrawCommand::Text { text, .. } if text == "Gate unlocked - tap the envelope"
    )));
    assert!(draw.commands().iter().any(|command| matches!(
        command,
        DrawCommand::Text { text, .. } if text == "UNLOCKED"
    )));
}
