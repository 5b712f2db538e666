#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutPoint {
    x: f32,
    y: f32,
}

impl LayoutPoint {
    fn from_vec2(value: Vec2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }

    fn to_vec2(self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl LayoutRect {
    const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.w, rect.h)
    }

    fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PickupDef {
    id: String,
    rect: LayoutRect,
    message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NpcDef {
    id: String,
    rect: LayoutRect,
    sprite: String,
    lines: Vec<String>,
    #[serde(default)]
    pettable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DecorDef {
    sprite: String,
    rect: LayoutRect,
}

/// Static world layout: where everything sits and the tuning numbers the
/// core runs on. Never mutated after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct WorldLayout {
    player_spawn: LayoutPoint,
    player_speed: f32,
    player_width: f32,
    player_height: f32,
    interact_distance: f32,
    max_pets: u32,
    gate: LayoutRect,
    final_zone: LayoutRect,
    reset_control: LayoutRect,
    envelope: LayoutRect,
    pickups: Vec<PickupDef>,
    npcs: Vec<NpcDef>,
    #[serde(default)]
    decor: Vec<DecorDef>,
}

#[derive(Debug, Error)]
pub(crate) enum LayoutError {
    #[error("failed to read layout file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse layout json at {field_path}: {source}")]
    Parse {
        field_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("layout must declare at least one pickup")]
    NoPickups,
    #[error("duplicate pickup id '{id}'")]
    DuplicatePickupId { id: String },
    #[error("duplicate npc id '{id}'")]
    DuplicateNpcId { id: String },
    #[error("npc '{id}' has no message lines")]
    NpcWithoutLines { id: String },
    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: String, value: f32 },
}

const GATE: LayoutRect = LayoutRect::new(740.0, 250.0, 40.0, 120.0);

impl WorldLayout {
    pub(crate) fn builtin() -> Self {
        let flower = |id: &str, x: f32, y: f32, message: &str| PickupDef {
            id: id.to_string(),
            rect: LayoutRect::new(x, y, 40.0, 40.0),
            message: message.to_string(),
        };
        let decor = |sprite: &str, x: f32, y: f32, w: f32, h: f32| DecorDef {
            sprite: sprite.to_string(),
            rect: LayoutRect::new(x, y, w, h),
        };

        Self {
            player_spawn: LayoutPoint { x: 120.0, y: 420.0 },
            player_speed: 6.0,
            player_width: 48.0,
            player_height: 64.0,
            interact_distance: 28.0,
            max_pets: 2,
            gate: GATE,
            final_zone: LayoutRect::new(760.0, 200.0, 40.0, 200.0),
            reset_control: LayoutRect::new(GAME_WIDTH - 140.0 - 10.0, 10.0, 140.0, 38.0),
            envelope: LayoutRect::new(GAME_WIDTH / 2.0 - 30.0, GAME_HEIGHT / 2.0 - 30.0, 60.0, 60.0),
            pickups: vec![
                flower("f1", 120.0, 140.0, "You picked a flower"),
                flower("f2", 320.0, 220.0, "Another one"),
                flower("f3", 640.0, 180.0, "So pretty"),
                flower("f4", 240.0, 420.0, "Flower collected"),
                flower("f5", 520.0, 380.0, "Last one!"),
            ],
            npcs: vec![
                NpcDef {
                    id: "guardLeft".to_string(),
                    rect: LayoutRect::new(GATE.x - 70.0, GATE.y + 90.0, 56.0, 56.0),
                    sprite: "npc".to_string(),
                    lines: vec![
                        "woof woof wooooffff".to_string(),
                        "hi mom".to_string(),
                        "i love you".to_string(),
                    ],
                    pettable: false,
                },
                NpcDef {
                    id: "guardRight".to_string(),
                    rect: LayoutRect::new(GATE.x - 10.0, GATE.y - 10.0, 30.0, 30.0),
                    sprite: "sinbad".to_string(),
                    lines: vec![
                        "bow wow bow wow".to_string(),
                        "hi shirley".to_string(),
                        "dont touch my butt...".to_string(),
                    ],
                    pettable: true,
                },
            ],
            decor: vec![
                decor("bush2", 60.0, 510.0, 220.0, 80.0),
                decor("bush2", 260.0, 510.0, 220.0, 80.0),
                decor("bush2", 480.0, 510.0, 220.0, 80.0),
                decor("bush1", -10.0, 530.0, 100.0, 60.0),
                decor("bush1", 700.0, 530.0, 100.0, 60.0),
            ],
        }
    }

    fn max_flowers(&self) -> u32 {
        u32::try_from(self.pickups.len()).unwrap_or(u32::MAX)
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.pickups.is_empty() {
            return Err(LayoutError::NoPickups);
        }

        require_positive("player_speed", self.player_speed)?;
        require_positive("interact_distance", self.interact_distance)?;
        require_positive("max_pets", self.max_pets as f32)?;

        let mut pickup_ids = HashSet::with_capacity(self.pickups.len());
        for (index, pickup) in self.pickups.iter().enumerate() {
            if !pickup_ids.insert(pickup.id.as_str()) {
                return Err(LayoutError::DuplicatePickupId {
                    id: pickup.id.clone(),
                });
            }
            require_positive_size(&format!("pickups[{index}].rect"), pickup.rect)?;
        }

        let mut npc_ids = HashSet::with_capacity(self.npcs.len());
        for (index, npc) in self.npcs.iter().enumerate() {
            if !npc_ids.insert(npc.id.as_str()) {
                return Err(LayoutError::DuplicateNpcId { id: npc.id.clone() });
            }
            if npc.lines.is_empty() {
                return Err(LayoutError::NpcWithoutLines { id: npc.id.clone() });
            }
            require_positive_size(&format!("npcs[{index}].rect"), npc.rect)?;
        }

        require_positive_size("gate", self.gate)?;
        require_positive_size("final_zone", self.final_zone)?;
        Ok(())
    }
}

fn require_positive(field: &str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::NonPositive {
            field: field.to_string(),
            value,
        })
    }
}

fn require_positive_size(field: &str, rect: LayoutRect) -> Result<(), LayoutError> {
    require_positive(&format!("{field}.w"), rect.w)?;
    require_positive(&format!("{field}.h"), rect.h)
}

fn parse_layout_json(raw: &str) -> Result<WorldLayout, LayoutError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let layout = serde_path_to_error::deserialize::<_, WorldLayout>(&mut deserializer).map_err(
        |error| {
            let field_path = error.path().to_string();
            LayoutError::Parse {
                field_path,
                source: error.into_inner(),
            }
        },
    )?;
    layout.validate()?;
    Ok(layout)
}

pub(crate) fn load_layout_file(path: &Path) -> Result<WorldLayout, LayoutError> {
    let raw = fs::read_to_string(path).map_err(|source| LayoutError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layout_json(&raw)
}
