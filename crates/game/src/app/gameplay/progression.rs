/// The whole mutable game: player, entity records, counters, dialog state and
/// the transient notification. Input handlers and `tick` are the only writers.
#[derive(Debug, Clone)]
struct GameState {
    layout: WorldLayout,
    player: Player,
    pickups: Vec<PickupRecord>,
    npcs: Vec<NpcRecord>,
    progression: Progression,
    dialog: DialogState,
    toast: Toast,
}

impl GameState {
    fn new(layout: WorldLayout) -> Self {
        let player = Player::spawned_at(layout.player_spawn.to_vec2(), layout.player_speed);
        let pickups = layout
            .pickups
            .iter()
            .map(|def| PickupRecord {
                id: def.id.clone(),
                rect: def.rect.to_rect(),
                message: def.message.clone(),
                collected: false,
            })
            .collect();
        let npcs = layout
            .npcs
            .iter()
            .map(|def| NpcRecord {
                id: def.id.clone(),
                rect: def.rect.to_rect(),
                sprite: def.sprite.clone(),
                lines: def.lines.clone(),
                pettable: def.pettable,
                message_cursor: 0,
                petted: false,
            })
            .collect();
        let progression = Progression {
            max_flowers: layout.max_flowers(),
            max_pets: layout.max_pets,
            ..Progression::default()
        };

        Self {
            layout,
            player,
            pickups,
            npcs,
            progression,
            dialog: DialogState::FreePlay,
            toast: Toast::default(),
        }
    }

    /// Back to a fresh start from any state. The notification is left to
    /// run out on its own timer.
    fn reset(&mut self) {
        let layout = self.layout.clone();
        let toast = std::mem::take(&mut self.toast);
        *self = Self::new(layout);
        self.toast = toast;
        info!("game_reset");
    }

    fn envelope_visible(&self) -> bool {
        self.progression.gate_unlocked && !self.progression.gate_open
    }

    /// Controls of the active modal, rebuilt from the dialog state on every
    /// call. Later entries sit on top.
    fn modal_controls(&self) -> Vec<UiControl> {
        modal_controls_for(self.dialog)
    }

    fn resolve_tap(&self, point: Vec2) -> TapTarget {
        if self.layout.reset_control.to_rect().contains(point) {
            return TapTarget::Control(ControlId::Reset);
        }

        if self.dialog.is_modal() {
            return self
                .modal_controls()
                .iter()
                .rev()
                .find(|control| control.rect.contains(point))
                .map(|control| TapTarget::Control(control.id))
                .unwrap_or(TapTarget::UiNoop);
        }

        if self.envelope_visible() && self.layout.envelope.to_rect().contains(point) {
            return TapTarget::Control(ControlId::Envelope);
        }

        if let Some(pickup) = self
            .pickups
            .iter()
            .rev()
            .find(|pickup| !pickup.collected && pickup.rect.contains(point))
        {
            return TapTarget::Pickup(pickup.id.clone());
        }

        if let Some(npc) = self.npcs.iter().rev().find(|npc| npc.rect.contains(point)) {
            return TapTarget::Npc(npc.id.clone());
        }

        TapTarget::Ground(point)
    }

    fn handle_tap(&mut self, point: Vec2) {
        let target = self.resolve_tap(point);
        debug!(x = point.x, y = point.y, resolved = ?target, "tap_resolved");

        let next_target = match target {
            TapTarget::Control(id) => {
                self.handle_control(id);
                return;
            }
            TapTarget::UiNoop => return,
            _ if self.dialog.is_modal() => return,
            TapTarget::Pickup(id) => self.pickup_center(&id).map(|center| MoveTarget {
                point: center,
                entity: Some(TargetRef {
                    kind: TargetKind::Pickup,
                    id,
                }),
            }),
            TapTarget::Npc(id) => self.npc_center(&id).map(|center| MoveTarget {
                point: center,
                entity: Some(TargetRef {
                    kind: TargetKind::Npc,
                    id,
                }),
            }),
            TapTarget::Ground(point) => Some(MoveTarget {
                point,
                entity: None,
            }),
        };

        if let Some(next_target) = next_target {
            self.player.target = next_target;
        }
    }

    fn handle_control(&mut self, id: ControlId) {
        if id == ControlId::Reset {
            self.reset();
            return;
        }

        if !self.dialog.is_modal() {
            if id == ControlId::Envelope && self.envelope_visible() {
                self.transition_dialog(DialogState::PreQuestion);
            } else {
                debug!(control = ?id, "control_ignored");
            }
            return;
        }

        match self.modal_controls().into_iter().find(|control| control.id == id) {
            Some(control) => self.apply_effect(control.effect),
            None => debug!(control = ?id, dialog = ?self.dialog, "control_ignored"),
        }
    }

    fn apply_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::ShowQuestion => self.transition_dialog(DialogState::Question),
            UiEffect::DeclineValentine => self.transition_dialog(DialogState::QuestionRetry),
            UiEffect::AcceptValentine => {
                if !self.progression.gate_open {
                    self.progression.gate_open = true;
                    info!("gate_opened");
                }
                self.transition_dialog(DialogState::Resolution);
            }
        }
    }

    /// Confirm key: dismisses the resolution screen, nothing else.
    fn handle_confirm(&mut self) {
        if self.dialog == DialogState::Resolution {
            self.transition_dialog(DialogState::FreePlay);
        }
    }

    fn transition_dialog(&mut self, next: DialogState) {
        if self.dialog == next {
            return;
        }
        info!(from = ?self.dialog, to = ?next, "dialog_transition");
        self.dialog = next;
    }

    fn show_toast(&mut self, text: String) {
        self.toast = Toast {
            text,
            remaining_ticks: TOAST_DURATION_TICKS,
        };
    }

    /// One simulation step: notification timer, then movement, interaction
    /// and the win check while in free play.
    fn tick(&mut self) {
        self.toast.remaining_ticks = self.toast.remaining_ticks.saturating_sub(1);

        if self.dialog.is_modal() {
            return;
        }

        self.advance_movement();
        self.try_interact();
        self.check_win();
    }

    fn advance_movement(&mut self) {
        let position = self.player.position;
        let target = self.player.target.point;
        let distance = position.distance(target);
        if distance.is_nan() || distance <= self.player.speed {
            return;
        }

        let candidate = step_toward(position, target, self.player.speed);
        if !self.progression.gate_open && self.layout.gate.to_rect().contains(candidate) {
            self.player.target.point = position;
            debug!(x = candidate.x, y = candidate.y, "move_blocked_by_gate");
            return;
        }
        self.player.position = candidate;
    }

    fn try_interact(&mut self) {
        let Some(target) = self.player.target.entity.clone() else {
            return;
        };

        match target.kind {
            TargetKind::Pickup => {
                let Some(index) = self.pickups.iter().position(|pickup| pickup.id == target.id)
                else {
                    self.player.target.entity = None;
                    return;
                };
                if !self.within_interaction_range(self.pickups[index].rect.center()) {
                    return;
                }
                self.player.target.entity = None;
                self.collect_pickup(index);
            }
            TargetKind::Npc => {
                let Some(index) = self.npcs.iter().position(|npc| npc.id == target.id) else {
                    self.player.target.entity = None;
                    return;
                };
                if !self.within_interaction_range(self.npcs[index].rect.center()) {
                    return;
                }
                self.player.target.entity = None;
                self.greet_npc(index);
            }
        }
    }

    fn within_interaction_range(&self, center: Vec2) -> bool {
        self.player.position.distance(center) <= self.layout.interact_distance
    }

    fn collect_pickup(&mut self, index: usize) {
        let progression = &mut self.progression;
        let Some(pickup) = self.pickups.get_mut(index) else {
            return;
        };
        if pickup.collected || progression.flowers_collected >= progression.max_flowers {
            debug!(pickup = %pickup.id, "pickup_already_collected");
            return;
        }

        pickup.collected = true;
        progression.flowers_collected += 1;
        info!(
            pickup = %pickup.id,
            flowers = progression.flowers_collected,
            max_flowers = progression.max_flowers,
            "flower_collected"
        );
        if progression.flowers_collected >= progression.max_flowers && !progression.gate_unlocked
        {
            progression.gate_unlocked = true;
            info!("gate_unlocked");
        }
        let message = pickup.message.clone();
        self.show_toast(message);
    }

    fn greet_npc(&mut self, index: usize) {
        let progression = &mut self.progression;
        let Some(npc) = self.npcs.get_mut(index) else {
            return;
        };
        if npc.pet() {
            progression.pets_given = (progression.pets_given + 1).min(progression.max_pets);
            info!(npc = %npc.id, pets = progression.pets_given, "npc_petted");
        }
        let line = npc.read_next_line();
        if let Some(line) = line {
            self.show_toast(line);
        }
    }

    fn check_win(&mut self) {
        if self.progression.gate_open
            && !self.progression.won
            && self.layout.final_zone.to_rect().contains(self.player.position)
        {
            self.progression.won = true;
            info!("game_won");
            self.transition_dialog(DialogState::Resolution);
        }
    }

    fn pickup_center(&self, id: &str) -> Option<Vec2> {
        self.pickups
            .iter()
            .find(|pickup| pickup.id == id)
            .map(|pickup| pickup.rect.center())
    }

    fn npc_center(&self, id: &str) -> Option<Vec2> {
        self.npcs
            .iter()
            .find(|npc| npc.id == id)
            .map(|npc| npc.rect.center())
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: PlayerSnapshot {
                position: LayoutPoint::from_vec2(self.player.position),
                target: LayoutPoint::from_vec2(self.player.target.point),
                target_entity: self.player.target.entity.clone(),
            },
            pickups: self
                .pickups
                .iter()
                .map(|pickup| PickupSnapshot {
                    id: pickup.id.clone(),
                    collected: pickup.collected,
                })
                .collect(),
            npcs: self
                .npcs
                .iter()
                .map(|npc| NpcSnapshot {
                    id: npc.id.clone(),
                    message_cursor: npc.message_cursor,
                    petted: npc.petted,
                })
                .collect(),
            progression: self.progression,
            dialog: self.dialog,
            controls: self
                .modal_controls()
                .iter()
                .map(|control| ControlSnapshot {
                    id: control.id,
                    rect: LayoutRect::from_rect(control.rect),
                    label: control.label,
                })
                .collect(),
            toast: self.toast.is_visible().then(|| ToastSnapshot {
                text: self.toast.text.clone(),
                remaining_ticks: self.toast.remaining_ticks,
            }),
        }
    }
}

fn modal_controls_for(dialog: DialogState) -> Vec<UiControl> {
    let b = MODAL_BOX;
    let control = |id, x: f32, y: f32, w: f32, label, effect| UiControl {
        id,
        rect: Rect::new(x, y, w, 40.0),
        label,
        effect,
    };

    match dialog {
        DialogState::FreePlay | DialogState::Resolution => Vec::new(),
        DialogState::PreQuestion => vec![control(
            ControlId::OpenQuestion,
            b.x + 24.0,
            b.bottom() - 60.0,
            240.0,
            "Open",
            UiEffect::ShowQuestion,
        )],
        DialogState::Question => vec![
            control(
                ControlId::YesAbsolutely,
                b.x + 24.0,
                b.bottom() - 120.0,
                320.0,
                "Absolutely yes <3",
                UiEffect::AcceptValentine,
            ),
            control(
                ControlId::YesSquish,
                b.x + 24.0,
                b.bottom() - 70.0,
                320.0,
                "Yes and we can squish <3",
                UiEffect::AcceptValentine,
            ),
            control(
                ControlId::No,
                b.x + 370.0,
                b.bottom() - 70.0,
                140.0,
                "No",
                UiEffect::DeclineValentine,
            ),
        ],
        DialogState::QuestionRetry => vec![
            control(
                ControlId::YesAbsolutelyRetry,
                b.x + 24.0,
                b.bottom() - 110.0,
                320.0,
                "Absolutely yes <3",
                UiEffect::AcceptValentine,
            ),
            control(
                ControlId::YesSquishRetry,
                b.x + 24.0,
                b.bottom() - 60.0,
                320.0,
                "Yes and we can squish <3",
                UiEffect::AcceptValentine,
            ),
        ],
    }
}

/// Moves `speed` units from `current` toward `target`. Callers only step
/// when the target is farther than one step away.
fn step_toward(current: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let dx = target.x - current.x;
    let dy = target.y - current.y;
    let distance = dx.hypot(dy);
    if distance <= f32::EPSILON {
        return current;
    }
    let inv_distance = distance.recip();
    Vec2 {
        x: current.x + dx * inv_distance * speed,
        y: current.y + dy * inv_distance * speed,
    }
}
