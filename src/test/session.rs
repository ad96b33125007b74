use crate::entity::{Autopilot, Package, PackageId};
use crate::game::consts::{MARIO, PACKAGE_HEIGHT, PACKAGE_LENGTH, TRUCK_CAPACITY};
use crate::game::{Command, Difficulty, Event, Intent, RunState, Session, Summary, Timing};
use crate::util::random::GameRng;

fn new_session(difficulty: Difficulty, seed: u64) -> Session {
    match Session::new(difficulty, Timing::default(), Some(seed)) {
        Ok(it) => it,
        Err(err) => panic!("{}", err),
    }
}

fn step(session: &mut Session) -> RunState {
    let dt = session.timing().frame();
    match session.update(dt) {
        Ok(state) => state.clone(),
        Err(err) => panic!("{}", err),
    }
}

/// Simulate `seconds` of game time, optionally with the autopilot at the controls.
fn play(session: &mut Session, mut autopilot: Option<&mut Autopilot>, seconds: u32) -> Vec<Event> {
    let mut events = Vec::new();
    let frames = seconds * session.timing().fps;
    for _ in 0..frames {
        if let Some(autopilot) = autopilot.as_deref_mut() {
            for command in autopilot.act(session.game(), session.clock()) {
                session.apply(command);
            }
        }
        let state = step(session);
        events.extend(session.drain_events());
        if matches!(state, RunState::GameOver(_)) {
            break;
        }
    }
    events
}

fn fill_truck(session: &mut Session) {
    for id in 0..TRUCK_CAPACITY as u32 {
        let package = Package::new(PackageId(100 + id), PACKAGE_LENGTH, PACKAGE_HEIGHT);
        session.game_mut().truck.put_package(package);
    }
}

#[test]
fn test_idle_workers_lose() {
    let mut session = new_session(Difficulty::EASY, 0);
    let events = play(&mut session, None, 60);
    assert!(session.is_over());
    assert_eq!(session.game().lives, 0);

    let misses = events
        .iter()
        .filter(|e| matches!(e, Event::PackageMissed { .. }))
        .count();
    assert_eq!(misses, 3);
    assert_eq!(events.last(), Some(&Event::GameOver));

    let summary = session.summary();
    assert_eq!(summary.points, 0);
    assert!((15..=18).contains(&summary.seconds_alive));
    assert!(summary.to_string().starts_with("SCORE 0000"));
    match session.run_state() {
        RunState::GameOver(s) => assert_eq!(s, &summary),
        other => panic!("unexpected state {}", other),
    }

    // nothing happens after the game is over
    let clock = session.clock();
    assert!(!session.apply(Command::Down(MARIO)));
    step(&mut session);
    assert_eq!(session.clock(), clock);
}

#[test]
fn test_restart() {
    let mut session = new_session(Difficulty::EASY, 1);
    play(&mut session, None, 60);
    assert!(session.is_over());

    assert!(session.restart().is_ok());
    assert_eq!(session.run_state(), &RunState::Playing);
    assert_eq!(session.game().lives, 3);
    assert_eq!(session.summary().seconds_alive, 0);
    assert_eq!(session.create_package_tick(), Timing::default().create_package_tick);
    assert!(session.apply(Command::Down(MARIO)));
}

#[test]
fn test_controls() {
    let mut easy = new_session(Difficulty::EASY, 0);
    assert!(easy.press(Intent(Command::Up(MARIO))));
    assert_eq!(easy.game().players()[0].current_floor(), Some(2));

    let mut crazy = new_session(Difficulty::CRAZY, 0);
    assert!(crazy.values().reversed_controls);
    assert!(crazy.press(Intent(Command::Up(MARIO))));
    assert_eq!(crazy.game().players()[0].current_floor(), Some(0));
    assert!(!crazy.press(Intent(Command::Up(MARIO))));
}

#[test]
fn test_delivery_break() {
    let mut session = new_session(Difficulty::EASY, 0);
    fill_truck(&mut session);
    assert_eq!(step(&mut session), RunState::TakingBreak);
    assert_eq!(session.game().points, 10);
    assert_eq!(session.game().stored_deliveries, 1);
    assert!(session.game().truck.packages().is_empty());
    assert!(!session.apply(Command::Up(MARIO)));

    let events = play(&mut session, None, 9);
    assert!(!session.is_on_break());
    assert_eq!(session.run_state(), &RunState::Playing);
    assert!(session.game().truck.has_returned());
    assert!(session.game().players().iter().all(|p| !p.is_resting));
    assert!(events.contains(&Event::TruckReturned));
    assert!(events.contains(&Event::BreakEnded));
    assert!(events.contains(&Event::BossEntered));
    assert!(session.game().door.is_open());
    assert_eq!(session.game().lives, 3);
    assert_eq!(session.summary().deliveries, 1);
}

#[test]
fn test_extra_life_and_progression() {
    let mut session = new_session(Difficulty::EASY, 0);
    session.game_mut().lives = 2;
    session.game_mut().stored_deliveries = 3;
    session.game_mut().points = 50;
    step(&mut session);
    assert_eq!(session.game().lives, 3);
    assert_eq!(session.game().stored_deliveries, 0);
    assert_eq!(session.game().minimum_number_packages, 2);
    assert!(session.drain_events().contains(&Event::ExtraLife));

    // full lives are not topped up
    session.game_mut().stored_deliveries = 3;
    step(&mut session);
    assert_eq!(session.game().lives, 3);
    assert_eq!(session.game().stored_deliveries, 3);

    // no extra lives on the crazy level
    let mut crazy = new_session(Difficulty::CRAZY, 9);
    crazy.game_mut().lives = 1;
    crazy.game_mut().stored_deliveries = 5;
    step(&mut crazy);
    assert_eq!(crazy.game().lives, 1);
}

#[test]
fn test_autopilot_scores() {
    let mut session = new_session(Difficulty::EASY, 7);
    let mut autopilot = Autopilot::new(0.15, GameRng::new_from_u64_seed(7));
    let events = play(&mut session, Some(&mut autopilot), 30);
    assert!(session.game().points > 0);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::PackageHandedOff { .. })));
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| -> Summary {
        let mut session = new_session(Difficulty::CRAZY, seed);
        let mut autopilot = Autopilot::new(0.15, GameRng::new_from_u64_seed(seed)).clumsy(0.1);
        play(&mut session, Some(&mut autopilot), 40);
        session.summary()
    };
    assert_eq!(run(11), run(11));
    assert_eq!(run(11).seed, 11);
}

/// Step until an event matches, returning the clock of that frame.
fn time_of_first(session: &mut Session, seconds: u32, wanted: impl Fn(&Event) -> bool) -> f64 {
    for _ in 0..seconds * session.timing().fps {
        step(session);
        if session.drain_events().iter().any(|e| wanted(e)) {
            return session.clock();
        }
    }
    panic!("event not seen within {} seconds", seconds);
}

#[test]
fn test_creation_speeds_up_after_first_hand_off() {
    let timing = Timing::default();
    let belts = Difficulty::EASY.values(&mut GameRng::new_from_u64_seed(0)).belts as f64;
    let mut session = new_session(Difficulty::EASY, 0);
    assert!(session.apply(Command::Down(MARIO)));

    let created_at = time_of_first(&mut session, 10, |e| matches!(e, Event::PackageCreated(_)));
    assert!((5.0..5.1).contains(&created_at));
    assert_eq!(session.create_package_tick(), timing.create_package_tick);

    let handed_off_at =
        time_of_first(&mut session, 10, |e| matches!(e, Event::PackageHandedOff { .. }));
    assert!(handed_off_at > created_at);
    assert!(session.game().first_package_moved);
    assert_eq!(session.game().minimum_number_packages, 1);
    let expected = timing.move_package_tick * 100.0 * belts / 2.0;
    assert!((session.create_package_tick() - expected).abs() < 1e-9);

    // fewer packages than the minimum in play: the next one comes without waiting
    session.game_mut().minimum_number_packages = 3;
    step(&mut session);
    assert!(session
        .drain_events()
        .iter()
        .any(|e| matches!(e, Event::PackageCreated(_))));
    assert_eq!(session.game().packages_at_play, 2);
    let expected = timing.move_package_tick * 100.0 * belts / 4.0;
    assert!((session.create_package_tick() - expected).abs() < 1e-9);
}

#[test]
fn test_break_delays_creation() {
    let mut session = new_session(Difficulty::EASY, 0);
    fill_truck(&mut session);
    let created_at = time_of_first(&mut session, 20, |e| matches!(e, Event::PackageCreated(_)));
    let timing = Timing::default();
    let expected = timing.create_package_tick + timing.break_seconds;
    assert!(created_at >= expected && created_at < expected + 0.1);
}

#[test]
fn test_stored_deliveries() {
    // capped
    let mut session = new_session(Difficulty::EASY, 0);
    session.game_mut().stored_deliveries = 9;
    fill_truck(&mut session);
    step(&mut session);
    assert_eq!(session.summary().deliveries, 1);
    assert_eq!(session.game().stored_deliveries, 9);

    // not kept when extra lives are off
    let mut crazy = new_session(Difficulty::CRAZY, 0);
    fill_truck(&mut crazy);
    step(&mut crazy);
    assert_eq!(crazy.summary().deliveries, 1);
    assert_eq!(crazy.game().points, 10);
    assert_eq!(crazy.game().stored_deliveries, 0);
}

#[test]
fn test_truck_returns_after_short_break() {
    let timing = Timing {
        break_seconds: 0.5,
        ..Timing::default()
    };
    let mut session = match Session::new(Difficulty::EASY, timing, Some(0)) {
        Ok(it) => it,
        Err(err) => panic!("{}", err),
    };
    let home = session.game().truck.element.x;
    fill_truck(&mut session);
    step(&mut session);
    assert!(!session.game().truck.has_returned());

    let events = play(&mut session, None, 4);
    assert!(!session.is_on_break());
    assert!(events.contains(&Event::TruckReturned));
    assert!(session.game().truck.has_returned());
    assert_eq!(session.game().truck.element.x, home);
    assert_eq!(session.game().lives, 3);
}
