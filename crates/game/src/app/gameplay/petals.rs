#[derive(Debug, Clone, Copy, PartialEq)]
struct Petal {
    position: Vec2,
    velocity: Vec2,
    size: f32,
    drift: f32,
    phase: f32,
}

/// Falling flower petals behind the scene. Purely cosmetic: nothing in the
/// core reads them.
#[derive(Debug)]
struct PetalField {
    petals: Vec<Petal>,
    rng: StdRng,
}

impl PetalField {
    fn new(count: usize, mut rng: StdRng) -> Self {
        let petals = (0..count).map(|_| spawn_petal(&mut rng)).collect();
        Self { petals, rng }
    }

    fn advance(&mut self) {
        for petal in &mut self.petals {
            petal.phase += petal.drift;
            petal.position.x += petal.velocity.x + petal.phase.sin() * 0.2;
            petal.position.y += petal.velocity.y;

            if petal.position.y > GAME_HEIGHT + petal.size + 40.0 {
                petal.position.x = self.rng.gen_range(0.0..GAME_WIDTH);
                petal.position.y = -petal.size - self.rng.gen_range(0.0..120.0);
            }
            if petal.position.x < -40.0 {
                petal.position.x = GAME_WIDTH + 40.0;
            }
            if petal.position.x > GAME_WIDTH + 40.0 {
                petal.position.x = -40.0;
            }
        }
    }

    fn petals(&self) -> &[Petal] {
        &self.petals
    }
}

/// Initial petals are spread over the whole surface; respawns in `advance`
/// start above the top edge instead.
fn spawn_petal(rng: &mut StdRng) -> Petal {
    let size = rng.gen_range(14.0..26.0);
    Petal {
        position: Vec2::new(rng.gen_range(0.0..GAME_WIDTH), rng.gen_range(0.0..GAME_HEIGHT)),
        velocity: Vec2::new(rng.gen_range(-0.25..0.25), rng.gen_range(0.35..1.1)),
        size,
        drift: rng.gen_range(0.002..0.01),
        phase: rng.gen_range(0.0..TAU),
    }
}
