const WHITE: Rgba = [255, 255, 255, 255];
const GRASS: Rgba = [143, 199, 122, 255];
const GATE_FILL: Rgba = [181, 101, 118, 255];
const NPC_FALLBACK: Rgba = [68, 68, 68, 255];
const FLOWER_FALLBACK: Rgba = [255, 105, 180, 255];
const PLAYER_FALLBACK: Rgba = [255, 77, 109, 255];
const BUTTON_FILL: Rgba = [255, 255, 255, 217];
const BUTTON_TEXT: Rgba = [42, 42, 42, 255];
const BAR_FILL: Rgba = [0, 0, 0, 89];
const MODAL_FILL: Rgba = [0, 0, 0, 153];
const PLAYER_FALLBACK_RADIUS: f32 = 10.0;

const TITLE_SCALE: f32 = 4.0;
const BODY_SCALE: f32 = 3.0;
const SMALL_SCALE: f32 = 2.0;

const LOVE_NOTE: &str = "Hey love <3\n\
\n\
I just want you to know I appreciate you so much.\n\
Thank you for everything you do, the way you show up,\n\
and the way you make my life better just by being you.\n\
\n\
I love you. Always.\n\
\n\
- Your Valentine :)";

fn draw_game(state: &GameState, petals: &PetalField, draw: &mut DrawList) {
    draw.sprite(
        "background",
        Rect::new(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT),
        1.0,
        Some(GRASS),
    );

    for petal in petals.petals() {
        let rect = Rect::new(petal.position.x, petal.position.y, petal.size, petal.size);
        draw.sprite("flower", rect, PETAL_OPACITY, None);
    }

    for decor in &state.layout.decor {
        draw.sprite(&decor.sprite, decor.rect.to_rect(), 1.0, None);
    }

    draw_gate(state, draw);

    for npc in &state.npcs {
        draw.sprite(&npc.sprite, npc.rect, 1.0, Some(NPC_FALLBACK));
    }

    for pickup in state.pickups.iter().filter(|pickup| !pickup.collected) {
        draw.sprite("flower", pickup.rect, 1.0, Some(FLOWER_FALLBACK));
    }

    let player = state.player.position;
    let (width, height) = (state.layout.player_width, state.layout.player_height);
    draw.sprite_or_circle(
        "player",
        Rect::new(player.x - width / 2.0, player.y - height / 2.0, width, height),
        PLAYER_FALLBACK_RADIUS,
        PLAYER_FALLBACK,
    );

    draw_top_bar(state, draw);
    draw_toast(&state.toast, draw);

    match state.dialog {
        DialogState::FreePlay => {
            if state.envelope_visible() {
                draw.fill_rect(Rect::new(10.0, 52.0, 360.0, 26.0), BAR_FILL);
                draw.text(
                    "Gate unlocked - tap the envelope",
                    Vec2::new(18.0, 60.0),
                    SMALL_SCALE,
                    WHITE,
                );
            }
        }
        DialogState::Resolution => draw_letter(draw),
        DialogState::PreQuestion | DialogState::Question | DialogState::QuestionRetry => {
            draw_modal(state, draw)
        }
    }
}

fn draw_gate(state: &GameState, draw: &mut DrawList) {
    let gate = state.layout.gate.to_rect();
    if state.progression.gate_open {
        draw.text(
            "OPEN!",
            Vec2::new(gate.x - 5.0, gate.y - 18.0),
            SMALL_SCALE,
            with_opacity(WHITE, 0.25),
        );
    } else {
        draw.fill_rect(gate, GATE_FILL);
        let (label, offset) = if state.progression.gate_unlocked {
            ("UNLOCKED", 18.0)
        } else {
            ("LOCKED", 10.0)
        };
        draw.text(label, Vec2::new(gate.x - offset, gate.y - 18.0), SMALL_SCALE, WHITE);
    }

    if state.envelope_visible() {
        draw_envelope(state.layout.envelope.to_rect(), draw);
    }
}

fn draw_envelope(hitbox: Rect, draw: &mut DrawList) {
    let body = Rect::new(hitbox.x + 6.0, hitbox.y + 14.0, hitbox.w - 12.0, hitbox.h - 28.0);
    draw.fill_rect(body, [255, 240, 245, 255]);
    draw.fill_rect(Rect::new(body.x, body.y, body.w, 3.0), [214, 51, 108, 255]);
    let label = "<3";
    draw.text(
        label,
        Vec2::new(
            body.center().x - text_width(label, SMALL_SCALE) / 2.0,
            body.center().y - 4.0,
        ),
        SMALL_SCALE,
        [214, 51, 108, 255],
    );
}

fn counter_text(progression: &Progression) -> String {
    let flowers: String = (0..progression.max_flowers)
        .map(|index| if index < progression.flowers_collected { '*' } else { 'o' })
        .collect();
    let pets: String = (0..progression.max_pets)
        .map(|index| if index < progression.pets_given { '@' } else { '.' })
        .collect();
    format!("Flowers: {flowers}  Pets: {pets}")
}

fn draw_top_bar(state: &GameState, draw: &mut DrawList) {
    let reset = state.layout.reset_control.to_rect();
    let text = counter_text(&state.progression);
    let padding = 16.0;
    let bar_width = (text_width(&text, BODY_SCALE) + padding * 2.0).min(reset.x - 20.0);

    draw.fill_rect(Rect::new(10.0, 10.0, bar_width, 38.0), BAR_FILL);
    draw.text(text, Vec2::new(10.0 + padding, 21.0), BODY_SCALE, WHITE);

    draw.fill_rect(reset, BAR_FILL);
    let label = "Reset";
    draw.text(
        label,
        Vec2::new(
            reset.center().x - text_width(label, BODY_SCALE) / 2.0,
            reset.y + 12.0,
        ),
        BODY_SCALE,
        WHITE,
    );
}

fn draw_toast(toast: &Toast, draw: &mut DrawList) {
    if !toast.is_visible() {
        return;
    }
    let alpha = toast.alpha();
    draw.fill_rect(
        Rect::new(20.0, GAME_HEIGHT - 90.0, GAME_WIDTH - 40.0, 60.0),
        with_opacity([0, 0, 0, 140], alpha),
    );
    draw.wrapped_text(
        toast.text.clone(),
        Vec2::new(35.0, GAME_HEIGHT - 78.0),
        BODY_SCALE,
        GAME_WIDTH - 70.0,
        22.0,
        with_opacity(WHITE, alpha),
    );
}

fn modal_copy(dialog: DialogState) -> (&'static str, [&'static str; 2]) {
    match dialog {
        DialogState::PreQuestion => (
            "please open the letter bae!",
            [
                "Okay so... I unlocked the gate for you.",
                "But you gotta answer one thing first :)",
            ],
        ),
        DialogState::QuestionRetry => ("...Bruh", ["I know you're stubborn.", "Just click yes duh!"]),
        _ => (
            "Will you be my Valentine?",
            ["Pick one. No pressure...", "(jk there is pressure)"],
        ),
    }
}

fn draw_modal(state: &GameState, draw: &mut DrawList) {
    let modal = MODAL_BOX;
    let (title, body) = modal_copy(state.dialog);

    draw.fill_rect(modal, MODAL_FILL);
    draw.text(title, Vec2::new(modal.x + 24.0, modal.y + 20.0), TITLE_SCALE, WHITE);
    for (index, line) in body.iter().enumerate() {
        draw.text(
            *line,
            Vec2::new(modal.x + 24.0, modal.y + 60.0 + index as f32 * 26.0),
            BODY_SCALE,
            WHITE,
        );
    }

    // same list the tap resolver hit-tests
    for control in state.modal_controls() {
        draw.fill_rect(control.rect, BUTTON_FILL);
        draw.text(
            control.label,
            Vec2::new(control.rect.x + 14.0, control.rect.y + 13.0),
            BODY_SCALE,
            BUTTON_TEXT,
        );
    }
}

fn draw_letter(draw: &mut DrawList) {
    let letter = LETTER_BOX;
    draw.fill_rect(letter, MODAL_FILL);
    draw.text("Congrats", Vec2::new(letter.x + 24.0, letter.y + 20.0), TITLE_SCALE, WHITE);

    let hint_color = with_opacity(WHITE, 0.85);
    draw.text(
        "Press ENTER",
        Vec2::new(letter.right() - 140.0, letter.y + 22.0),
        SMALL_SCALE,
        hint_color,
    );
    draw.text(
        "to close",
        Vec2::new(letter.right() - 140.0, letter.y + 42.0),
        SMALL_SCALE,
        hint_color,
    );

    draw.text(
        "Congratulations, you're my Valentine",
        Vec2::new(letter.x + 24.0, letter.y + 70.0),
        BODY_SCALE,
        WHITE,
    );
    draw.text(
        "for the 4th year in a row :)",
        Vec2::new(letter.x + 24.0, letter.y + 96.0),
        BODY_SCALE,
        WHITE,
    );

    let note = Rect::new(letter.x + 24.0, letter.y + 130.0, letter.w - 48.0, 150.0);
    draw.fill_rect(note, [255, 255, 255, 26]);
    draw.wrapped_text(
        LOVE_NOTE,
        Vec2::new(note.x + 12.0, note.y + 10.0),
        SMALL_SCALE,
        note.w - 24.0,
        15.0,
        WHITE,
    );
}
