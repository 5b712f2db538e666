#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum TargetKind {
    Pickup,
    Npc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TargetRef {
    kind: TargetKind,
    id: String,
}

/// Where the player is walking. `entity` is set only when the walk was
/// started by tapping a pickup or NPC.
#[derive(Debug, Clone, PartialEq)]
struct MoveTarget {
    point: Vec2,
    entity: Option<TargetRef>,
}

#[derive(Debug, Clone, PartialEq)]
struct Player {
    position: Vec2,
    speed: f32,
    target: MoveTarget,
}

impl Player {
    fn spawned_at(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            speed,
            target: MoveTarget {
                point: position,
                entity: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PickupRecord {
    id: String,
    rect: Rect,
    message: String,
    collected: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct NpcRecord {
    id: String,
    rect: Rect,
    sprite: String,
    lines: Vec<String>,
    pettable: bool,
    message_cursor: usize,
    petted: bool,
}

impl NpcRecord {
    /// Returns the line under the cursor and advances the cursor, wrapping
    /// at the end of the sequence.
    fn read_next_line(&mut self) -> Option<String> {
        let count = self.lines.len();
        if count == 0 {
            return None;
        }
        let line = self.lines.get(self.message_cursor % count).cloned();
        self.message_cursor = (self.message_cursor + 1) % count;
        line
    }

    /// Marks the NPC petted. Returns `true` only the first time a pettable
    /// NPC is petted.
    fn pet(&mut self) -> bool {
        if !self.pettable || self.petted {
            return false;
        }
        self.petted = true;
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
struct Progression {
    flowers_collected: u32,
    max_flowers: u32,
    pets_given: u32,
    max_pets: u32,
    gate_unlocked: bool,
    gate_open: bool,
    won: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum DialogState {
    #[default]
    FreePlay,
    PreQuestion,
    Question,
    QuestionRetry,
    Resolution,
}

impl DialogState {
    fn is_modal(self) -> bool {
        self != Self::FreePlay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
enum ControlId {
    Reset,
    Envelope,
    OpenQuestion,
    YesAbsolutely,
    YesSquish,
    No,
    YesAbsolutelyRetry,
    YesSquishRetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiEffect {
    ShowQuestion,
    AcceptValentine,
    DeclineValentine,
}

/// A clickable modal control. Built fresh from the dialog state every time
/// it is needed, so hit-testing always matches what was last drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct UiControl {
    id: ControlId,
    rect: Rect,
    label: &'static str,
    effect: UiEffect,
}

#[derive(Debug, Clone, PartialEq)]
enum TapTarget {
    Control(ControlId),
    /// Tap swallowed by an open modal.
    UiNoop,
    Pickup(String),
    Npc(String),
    Ground(Vec2),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Toast {
    text: String,
    remaining_ticks: u32,
}

impl Toast {
    fn is_visible(&self) -> bool {
        self.remaining_ticks > 0
    }

    fn alpha(&self) -> f32 {
        (self.remaining_ticks as f32 / TOAST_FADE_TICKS as f32).min(1.0)
    }
}

#[derive(Debug, Clone, Serialize)]
struct GameSnapshot {
    player: PlayerSnapshot,
    pickups: Vec<PickupSnapshot>,
    npcs: Vec<NpcSnapshot>,
    progression: Progression,
    dialog: DialogState,
    controls: Vec<ControlSnapshot>,
    toast: Option<ToastSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
struct PlayerSnapshot {
    position: LayoutPoint,
    target: LayoutPoint,
    target_entity: Option<TargetRef>,
}

#[derive(Debug, Clone, Serialize)]
struct PickupSnapshot {
    id: String,
    collected: bool,
}

#[derive(Debug, Clone, Serialize)]
struct NpcSnapshot {
    id: String,
    message_cursor: usize,
    petted: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ControlSnapshot {
    id: ControlId,
    rect: LayoutRect,
    label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ToastSnapshot {
    text: String,
    remaining_ticks: u32,
}
