use crate::entity::{
    Boss, Conveyor, Door, Element, FallSide, Floor, FloorRef, PackageFactory, PackageId, Player,
    Receiver, Speed, Truck,
};
use crate::game::consts::{LUIGI, MARIO, START_FLOOR, TRUCK_CAPACITY};
use crate::game::msg::Event;
use crate::game::{layout, Difficulty, DomainError, Game};
use crate::util::random::GameRng;

fn ok<T>(result: Result<T, DomainError>) -> T {
    match result {
        Ok(it) => it,
        Err(err) => panic!("{}", err),
    }
}

fn easy_game() -> Game {
    let mut rng = GameRng::new_from_u64_seed(0);
    ok(layout::build(&Difficulty::EASY.values(&mut rng)))
}

/// Run belt ticks until `done` holds, 100 ticks at most.
fn tick_until(game: &mut Game, done: impl Fn(&Game) -> bool) -> usize {
    for tick in 0..100 {
        if done(&*game) {
            return tick;
        }
        ok(game.move_packages(tick as f64 * 0.09));
    }
    panic!("condition not reached within 100 ticks");
}

#[test]
fn test_layout() {
    let game = easy_game();
    assert_eq!(game.conveyors().len(), 6);
    assert_eq!(game.players().len(), 2);
    assert_eq!(ok(game.player(MARIO)).floors().len(), 4);
    assert_eq!(ok(game.player(LUIGI)).floors().len(), 5);
    assert!(game
        .players()
        .iter()
        .all(|p| p.current_floor() == Some(START_FLOOR)));

    assert_eq!(game.conveyors()[0].next_step(), Some(Receiver::Conveyor(1)));
    assert_eq!(game.conveyors()[0].finish_floor(), FloorRef::new(MARIO, 0));
    assert_eq!(game.conveyors()[1].finish_floor(), FloorRef::new(LUIGI, 0));
    assert_eq!(game.conveyors()[2].finish_floor(), FloorRef::new(MARIO, 1));
    assert_eq!(game.conveyors()[5].next_step(), Some(Receiver::Truck));
    assert_eq!(game.truck.capacity(), TRUCK_CAPACITY);
    assert_eq!(game.lives, 3);
    assert!(!game.is_over());
}

#[test]
fn test_invalid_references() {
    let floors = vec![ok(Floor::new(10.0, 10.0))];
    let player = Player::new("Mario", Element::new(10.0, 10.0, 16.0, 16.0), floors.clone());
    let speed = Speed {
        factory: 1.0,
        even: 1.0,
        odd: 1.0,
    };
    let conveyor = |floor| {
        ok(Conveyor::new(
            0,
            Element::new(20.0, 20.0, 60.0, 8.0),
            &speed,
            FloorRef::new(MARIO, floor),
            100.0,
        ))
    };
    let truck = || Truck::new(Element::new(0.0, 0.0, 45.0, 30.0), TRUCK_CAPACITY);
    let door = || Door::new(Element::default(), Boss::new(Element::default()));
    let factory = |belt| PackageFactory::new(Element::default(), 12.0, 8.0, belt);

    let result = Game::new(
        vec![player.clone()],
        vec![conveyor(3)],
        vec![factory(0)],
        truck(),
        door(),
    );
    assert_eq!(
        result.err(),
        Some(DomainError::InvalidFloorRef {
            player: 0,
            floor: 3
        })
    );

    let result = Game::new(
        vec![player.clone()],
        vec![conveyor(0)],
        vec![factory(5)],
        truck(),
        door(),
    );
    assert_eq!(result.err(), Some(DomainError::InvalidConveyor(5)));

    let result = Game::new(
        vec![player],
        vec![conveyor(0).feeding(Receiver::Conveyor(2))],
        vec![factory(0)],
        truck(),
        door(),
    );
    assert_eq!(result.err(), Some(DomainError::InvalidReceiver(2)));

    let lost = Player::new("Luigi", Element::new(50.0, 50.0, 16.0, 16.0), floors);
    let result = Game::new(vec![lost], vec![conveyor(0)], vec![], truck(), door());
    assert_eq!(
        result.err(),
        Some(DomainError::PlayerOffFloor("Luigi".into()))
    );
}

#[test]
fn test_player_moves_between_floors() {
    let mut game = easy_game();
    assert!(game.move_player_down(MARIO).is_ok());
    assert!(ok(game.player(MARIO)).is_on_floor(0));
    assert_eq!(game.move_player_down(MARIO), Err(DomainError::AtBottom));

    for _ in 0..3 {
        assert!(game.move_player_up(MARIO).is_ok());
    }
    assert!(ok(game.player(MARIO)).is_on_floor(3));
    assert_eq!(game.move_player_up(MARIO), Err(DomainError::AtTop));
    assert_eq!(
        game.move_player_up(crate::entity::PlayerId(7)),
        Err(DomainError::InvalidPlayer(7))
    );

    let events = game.log.drain();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events.last(),
        Some(&Event::PlayerMoved {
            player: MARIO,
            floor: 3
        })
    );
}

#[test]
fn test_catch_and_hand_off() {
    let mut game = easy_game();
    ok(game.move_player_down(MARIO));
    assert_eq!(ok(game.create_package()), vec![PackageId(0)]);
    assert_eq!(game.packages_at_play, 1);
    let created = &game.conveyors()[0].packages()[0];
    assert_eq!((created.element.x, created.element.y), (473.0, 242.0));

    tick_until(&mut game, |g| {
        g.player(MARIO).map_or(false, |p| p.is_moving_package())
    });
    assert!(game.conveyors()[0].packages().is_empty());
    assert!(game.log.drain().contains(&Event::PackagePicked {
        package: PackageId(0),
        player: MARIO
    }));

    assert!(game.player_put_down_package(MARIO).is_ok());
    assert_eq!(game.points, 1);
    assert!(game.first_package_moved);
    assert_eq!(game.packages_at_play, 1);
    assert_eq!(game.conveyors()[1].packages().len(), 1);
    assert_eq!(
        game.player_put_down_package(MARIO),
        Err(DomainError::NotHolding)
    );
}

#[test]
fn test_missed_package() {
    let mut game = easy_game();
    ok(game.create_package());
    tick_until(&mut game, |g| g.lives < 3);
    assert_eq!(game.lives, 2);
    assert_eq!(game.packages_at_play, 0);
    assert!(game.boss_comes_in);
    assert!(game.log.drain().contains(&Event::PackageMissed {
        package: PackageId(0),
        side: Some(FallSide::Left)
    }));

    ok(game.update_boss(2.0, 1.5));
    assert!(game.door.is_open());
    assert!(!game.boss_comes_in);
    ok(game.update_boss(3.6, 1.5));
    assert!(!game.door.is_open());
    let events = game.log.drain();
    assert_eq!(events, vec![Event::BossEntered, Event::BossLeft]);
}

#[test]
fn test_last_belt_loads_the_truck() {
    let mut game = easy_game();
    ok(game.create_package());
    let package = match game.conveyor_mut(0) {
        Some(conveyor) => ok(conveyor.lift_package(PackageId(0))),
        None => panic!("no factory belt"),
    };
    if let Some(last) = game.conveyor_mut(5) {
        last.put_package(package);
    }
    for _ in 0..3 {
        ok(game.move_player_up(LUIGI));
    }

    let ticks = tick_until(&mut game, |g| {
        g.player(LUIGI).map_or(false, |p| p.is_moving_package())
    });
    assert_eq!(ticks, 74);
    assert!(game.player_put_down_package(LUIGI).is_ok());
    assert_eq!(game.truck.packages().len(), 1);
    assert_eq!(game.packages_at_play, 0);
    assert_eq!(game.points, 1);
    assert!(game.log.drain().contains(&Event::PackageLoaded(PackageId(0))));

    assert_eq!(game.deliver_truck(), Err(DomainError::TruckNotFull));
}

#[test]
fn test_game_state_to_json() {
    let mut game = easy_game();
    ok(game.create_package());
    let json = match serde_json::to_string(&game) {
        Ok(it) => it,
        Err(err) => panic!("{}", err),
    };
    let restored: Game = match serde_json::from_str(&json) {
        Ok(it) => it,
        Err(err) => panic!("{}", err),
    };
    assert_eq!(restored.packages_at_play, 1);
    assert_eq!(restored.conveyors()[0].packages().len(), 1);
    assert_eq!(restored.players().len(), 2);
}

#[test]
fn test_resting_worker_does_not_catch() {
    let mut game = easy_game();
    ok(game.move_player_down(MARIO));
    game.players_mut()[MARIO.0].is_resting = true;
    ok(game.create_package());

    tick_until(&mut game, |g| g.lives < 3);
    assert_eq!(game.lives, 2);
    assert!(!ok(game.player(MARIO)).is_moving_package());
    assert!(ok(game.player(MARIO)).is_on_floor(0));
    assert_eq!(game.packages_at_play, 0);
}

#[test]
fn test_busy_worker_does_not_catch() {
    let mut game = easy_game();
    ok(game.move_player_down(MARIO));
    let held = crate::entity::Package::new(PackageId(99), 12.0, 8.0);
    ok(game.players_mut()[MARIO.0].pick_package(held, 0, 0.0));
    ok(game.create_package());

    tick_until(&mut game, |g| g.lives < 3);
    assert_eq!(game.lives, 2);
    let carried = ok(game.player(MARIO)).package().map(|p| p.id);
    assert_eq!(carried, Some(PackageId(99)));
    assert!(game.log.drain().contains(&Event::PackageMissed {
        package: PackageId(0),
        side: Some(FallSide::Left)
    }));
}
