struct GardenScene {
    state: GameState,
    petals: PetalField,
    loaded_ticks: u64,
}

impl GardenScene {
    fn new(layout: WorldLayout, rng: StdRng) -> Self {
        Self {
            state: GameState::new(layout),
            petals: PetalField::new(PETAL_COUNT, rng),
            loaded_ticks: 0,
        }
    }

    fn pointer_world_position(input: &InputSnapshot) -> Option<Vec2> {
        let screen_px = input.pointer_pressed_at_px()?;
        Some(screen_to_world_px(
            input.window_size(),
            (GAME_WIDTH, GAME_HEIGHT),
            screen_px,
        ))
    }

    fn dump_state(&self) {
        match serde_json::to_string(&self.state.snapshot()) {
            Ok(json) => info!(tick = self.loaded_ticks, snapshot = %json, "state_dump"),
            Err(error) => warn!(error = %error, "state_dump_failed"),
        }
    }
}

impl Scene for GardenScene {
    fn load(&mut self) {
        self.loaded_ticks = 0;
        info!(
            pickups = self.state.pickups.len(),
            npcs = self.state.npcs.len(),
            petals = self.petals.petals().len(),
            "scene_loaded"
        );
    }

    fn update(&mut self, _fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if input.was_pressed(InputAction::Quit) {
            return SceneCommand::Quit;
        }

        if let Some(point) = Self::pointer_world_position(input) {
            self.state.handle_tap(point);
        }
        if input.was_pressed(InputAction::Confirm) {
            self.state.handle_confirm();
        }

        self.petals.advance();
        self.state.tick();
        self.loaded_ticks += 1;

        if input.was_pressed(InputAction::DumpState) {
            self.dump_state();
        }

        SceneCommand::None
    }

    fn render(&mut self, draw: &mut DrawList) {
        draw_game(&self.state, &self.petals, draw);
    }

    fn unload(&mut self) {
        info!(
            ticks = self.loaded_ticks,
            flowers = self.state.progression.flowers_collected,
            won = self.state.progression.won,
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let progression = &self.state.progression;
        Some(format!(
            "Garden Gate | flowers {}/{} | pets {}/{}",
            progression.flowers_collected,
            progression.max_flowers,
            progression.pets_given,
            progression.max_pets
        ))
    }
}
