//! Builds the factory floor for a set of difficulty values.

use crate::entity::{
    Boss, Conveyor, Door, Element, Floor, FloorRef, PackageFactory, Player, Receiver, Truck,
};
use crate::game::consts::{self, LUIGI, MARIO};
use crate::game::{DifficultyValues, DomainError, Game};

const BELT_X: f32 = 100.0;
const BELT_HEIGHT: f32 = 8.0;
const FLOOR_SPACING: f32 = 50.0;

/// Lay out the two workers, the belts, the truck and the boss' door on a window of the size the
/// difficulty asks for.
///
/// # Errors
///
/// If the values describe fewer than three belts or a window too small to fit them.
pub fn build(values: &DifficultyValues) -> Result<Game, DomainError> {
    let belts = values.belts;
    if belts < 3 {
        return Err(DomainError::InvalidGeometry("at least three belts are required"));
    }
    let w = values.window_width as f32;
    let h = values.window_height as f32;

    let mario_x = w - 96.0;
    let luigi_x = 75.0;
    let start_y = h - 150.0;
    let mario = Player::new(
        "Mario",
        Element::validated(mario_x, start_y, consts::PLAYER_SIZE, consts::PLAYER_SIZE)?,
        floors(mario_x, h, belts - 1)?,
    );
    let luigi = Player::new(
        "Luigi",
        Element::validated(luigi_x, start_y, consts::PLAYER_SIZE, consts::PLAYER_SIZE)?,
        floors(luigi_x, h, belts)?,
    );
    // the player vector is indexed by `consts::MARIO` and `consts::LUIGI`
    let players = vec![mario, luigi];

    let speed = values.conveyor_speed;
    let mut conveyors = Vec::with_capacity(belts + 1);
    conveyors.push(
        Conveyor::new(
            0,
            Element::new(w - 75.0, h - 75.0, 60.0, BELT_HEIGHT),
            &speed,
            FloorRef::new(MARIO, 0),
            h,
        )?
        .feeding(Receiver::Conveyor(1)),
    );
    for i in 0..belts {
        let finish = if i % 2 == 0 {
            FloorRef::new(LUIGI, i)
        } else {
            FloorRef::new(MARIO, i)
        };
        // belt `i` sits at index `i + 1`, right after the factory belt
        let next_step = if i + 1 == belts {
            Receiver::Truck
        } else {
            Receiver::Conveyor(i + 2)
        };
        conveyors.push(
            Conveyor::new(
                i as u32 + 1,
                Element::new(
                    BELT_X,
                    h - 75.0 - FLOOR_SPACING * i as f32,
                    w - 200.0,
                    BELT_HEIGHT,
                ),
                &speed,
                finish,
                h,
            )?
            .feeding(next_step),
        );
    }

    let last = conveyors[belts].element;
    let truck = Truck::new(
        Element::validated(last.x - 80.0, last.y - 30.0, 45.0, 30.0)?,
        consts::TRUCK_CAPACITY,
    );
    let factory = PackageFactory::new(
        Element::new(w - 73.0, h - 113.0, 60.0, 40.0),
        consts::PACKAGE_LENGTH,
        consts::PACKAGE_HEIGHT,
        0,
    );
    let boss = Boss::new(Element::new(57.0, h - 29.0, 12.0, 14.0));
    let door = Door::new(Element::new(57.0, h - 35.0, 10.0, 15.0), boss);

    let game = Game::new(players, conveyors, vec![factory], truck, door)?;
    for player in game.players() {
        debug!("placed {}", player);
    }
    Ok(game)
}

/// Floors from the bottom up, one per belt level.
fn floors(x: f32, window_height: f32, count: usize) -> Result<Vec<Floor>, DomainError> {
    (0..count)
        .map(|i| Floor::new(x, window_height - 100.0 - FLOOR_SPACING * i as f32))
        .collect()
}
