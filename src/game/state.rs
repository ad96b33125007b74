use crate::entity::{
    Conveyor, ConveyorEvent, Door, FallSide, Motion, PackageFactory, PackageId, Player, PlayerId,
    Receiver, Truck,
};
use crate::game::consts;
use crate::game::msg::{Event, Log, MessageLog};
use crate::game::DomainError;

use serde::{Deserialize, Serialize};

/// The game state holds every element of the factory floor together with the score. It moves
/// packages along the belts, hands them between workers and counts mistakes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Game {
    pub tick: u64,
    players: Vec<Player>,
    /// The factory belt comes first, followed by the belts in the order packages travel.
    conveyors: Vec<Conveyor>,
    factories: Vec<PackageFactory>,
    pub truck: Truck,
    pub door: Door,
    pub lives: u8,
    pub points: u32,
    pub stored_deliveries: u32,
    pub minimum_number_packages: u32,
    pub packages_at_play: u32,
    pub first_package_moved: bool,
    pub boss_comes_in: bool,
    next_package_id: u32,
    pub log: Log,
}

impl Game {
    /// # Errors
    ///
    /// If a player does not stand on one of its floors or any of the references between the
    /// elements point nowhere.
    pub fn new(
        players: Vec<Player>,
        conveyors: Vec<Conveyor>,
        factories: Vec<PackageFactory>,
        truck: Truck,
        door: Door,
    ) -> Result<Self, DomainError> {
        if let Some(player) = players.iter().find(|p| p.current_floor().is_none()) {
            return Err(DomainError::PlayerOffFloor(player.name.clone()));
        }

        for conveyor in &conveyors {
            let finish = conveyor.finish_floor();
            let floor_count = players
                .get(finish.player.0)
                .ok_or(DomainError::InvalidPlayer(finish.player.0))?
                .floors()
                .len();
            if finish.floor >= floor_count {
                return Err(DomainError::InvalidFloorRef {
                    player: finish.player.0,
                    floor: finish.floor,
                });
            }
            if let Some(Receiver::Conveyor(next)) = conveyor.next_step() {
                if next >= conveyors.len() {
                    return Err(DomainError::InvalidReceiver(next));
                }
            }
        }

        if let Some(factory) = factories.iter().find(|f| f.conveyor >= conveyors.len()) {
            return Err(DomainError::InvalidConveyor(factory.conveyor));
        }

        Ok(Self {
            tick: 0,
            players,
            conveyors,
            factories,
            truck,
            door,
            lives: consts::MAX_LIVES,
            points: 0,
            stored_deliveries: 0,
            minimum_number_packages: 1,
            packages_at_play: 0,
            first_package_moved: false,
            boss_comes_in: false,
            next_package_id: 0,
            log: Log::new(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// # Errors
    ///
    /// `DomainError::InvalidPlayer` for unknown ids.
    pub fn player(&self, id: PlayerId) -> Result<&Player, DomainError> {
        self.players.get(id.0).ok_or(DomainError::InvalidPlayer(id.0))
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, DomainError> {
        self.players
            .get_mut(id.0)
            .ok_or(DomainError::InvalidPlayer(id.0))
    }

    pub fn conveyors(&self) -> &[Conveyor] {
        &self.conveyors
    }

    pub fn conveyor_mut(&mut self, idx: usize) -> Option<&mut Conveyor> {
        self.conveyors.get_mut(idx)
    }

    pub fn factories(&self) -> &[PackageFactory] {
        &self.factories
    }

    pub const fn is_over(&self) -> bool {
        self.lives == 0
    }

    /// Advance all belts by one tick. Before a belt moves, the worker on its finishing floor
    /// catches the packages that would fall off otherwise, provided the worker is free.
    ///
    /// # Errors
    ///
    /// If a belt finishes on a floor of a player that does not exist.
    pub fn move_packages(&mut self, now: f64) -> Result<(), DomainError> {
        for idx in 0..self.conveyors.len() {
            let finish = self.conveyors[idx].finish_floor();
            for package_id in self.conveyors[idx].packages_about_to_fall() {
                let player = self
                    .players
                    .get_mut(finish.player.0)
                    .ok_or(DomainError::InvalidPlayer(finish.player.0))?;
                if !player.is_on_floor(finish.floor)
                    || player.is_moving_package()
                    || player.is_resting
                {
                    continue;
                }
                let package = self.conveyors[idx].lift_package(package_id)?;
                player.pick_package(package, idx, now)?;
                self.log.add(Event::PackagePicked {
                    package: package_id,
                    player: finish.player,
                });
            }

            for event in self.conveyors[idx].move_packages() {
                match event {
                    ConveyorEvent::StageChanged { package, stage } => {
                        self.log.add(Event::StageChanged(package, stage));
                    }
                    ConveyorEvent::StartedFalling { package, side } => self.miss(package, side),
                    ConveyorEvent::Landed { package } => {
                        self.log.add(Event::PackageLanded(package));
                    }
                }
            }
        }
        self.tick += 1;
        Ok(())
    }

    fn miss(&mut self, package: PackageId, side: Option<FallSide>) {
        self.lives = self.lives.saturating_sub(1);
        self.packages_at_play = self.packages_at_play.saturating_sub(1);
        self.boss_comes_in = true;
        info!("missed package {}, {} lives left", package, self.lives);
        self.log.add(Event::PackageMissed { package, side });
    }

    /// # Errors
    ///
    /// `DomainError::AtTop` if the player is on its highest floor already.
    pub fn move_player_up(&mut self, id: PlayerId) -> Result<(), DomainError> {
        let player = self.player_mut(id)?;
        let current = player.current_floor().ok_or(DomainError::InvalidPosition)?;
        let target = *player
            .floors()
            .get(current + 1)
            .ok_or(DomainError::AtTop)?;
        player.move_to(target.x(), target.y());
        self.log.add(Event::PlayerMoved {
            player: id,
            floor: current + 1,
        });
        Ok(())
    }

    /// # Errors
    ///
    /// `DomainError::AtBottom` if the player is on its lowest floor already.
    pub fn move_player_down(&mut self, id: PlayerId) -> Result<(), DomainError> {
        let player = self.player_mut(id)?;
        let current = player.current_floor().ok_or(DomainError::InvalidPosition)?;
        let below = current.checked_sub(1).ok_or(DomainError::AtBottom)?;
        let target = player.floors()[below];
        player.move_to(target.x(), target.y());
        self.log.add(Event::PlayerMoved {
            player: id,
            floor: below,
        });
        Ok(())
    }

    /// Let every factory drop a new package onto its belt.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidConveyor` if a factory feeds a belt that does not exist.
    pub fn create_package(&mut self) -> Result<Vec<PackageId>, DomainError> {
        let mut created = Vec::with_capacity(self.factories.len());
        for factory in &self.factories {
            let conveyor = self
                .conveyors
                .get_mut(factory.conveyor)
                .ok_or(DomainError::InvalidConveyor(factory.conveyor))?;
            let id = PackageId(self.next_package_id);
            self.next_package_id += 1;
            conveyor.put_package(factory.create_package(id));
            self.packages_at_play += 1;
            self.log.add(Event::PackageCreated(id));
            created.push(id);
        }
        Ok(created)
    }

    /// Hand the package the player carries to the next step of the belt it came from.
    ///
    /// # Errors
    ///
    /// `DomainError::NotHolding` if the player has no package, `DomainError::NoNextStep` if the
    /// belt it came from feeds nothing.
    pub fn player_put_down_package(&mut self, id: PlayerId) -> Result<(), DomainError> {
        let from = self
            .player(id)?
            .carrying_from()
            .ok_or(DomainError::NotHolding)?;
        let receiver = self
            .conveyors
            .get(from)
            .and_then(Conveyor::next_step)
            .ok_or(DomainError::NoNextStep(from))?;
        if let Receiver::Conveyor(next) = receiver {
            if next >= self.conveyors.len() {
                return Err(DomainError::InvalidReceiver(next));
            }
        }

        let (package, _) = self.player_mut(id)?.put_package()?;
        let package_id = package.id;
        match receiver {
            Receiver::Conveyor(next) => self.conveyors[next].put_package(package),
            Receiver::Truck => {
                self.truck.put_package(package);
                self.packages_at_play = self.packages_at_play.saturating_sub(1);
                self.log.add(Event::PackageLoaded(package_id));
            }
        }

        self.points += consts::HANDOFF_POINTS;
        self.first_package_moved = true;
        self.log.add(Event::PackageHandedOff {
            package: package_id,
            player: id,
        });
        Ok(())
    }

    /// Send the full truck off and score the delivery. Returns the number of packages delivered.
    ///
    /// # Errors
    ///
    /// `DomainError::TruckNotFull` if the truck still has room.
    pub fn deliver_truck(&mut self) -> Result<usize, DomainError> {
        let delivered = self.truck.deliver()?.len();
        self.points += consts::DELIVERY_POINTS;
        info!("delivered {} packages, {} points", delivered, self.points);
        self.log.add(Event::TruckDelivered {
            packages: delivered,
        });
        Ok(delivered)
    }

    /// Bring the boss in after a mistake and send it away after `stay` seconds.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidTime` for negative times.
    pub fn update_boss(&mut self, now: f64, stay: f64) -> Result<(), DomainError> {
        if self.boss_comes_in {
            self.boss_comes_in = false;
            if self.door.summon(now)? {
                self.log.add(Event::BossEntered);
            }
        }
        if self.door.update(now, stay) {
            self.log.add(Event::BossLeft);
        }
        Ok(())
    }
}
