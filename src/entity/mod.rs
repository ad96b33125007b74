pub mod ai;
pub mod boss;
pub mod conveyor;
pub mod element;
pub mod factory;
pub mod floor;
pub mod package;
pub mod player;
pub mod truck;

pub use ai::Autopilot;
pub use boss::{Boss, Door};
pub use conveyor::{Conveyor, ConveyorEvent, Direction, Receiver, Speed};
pub use element::{Element, Motion};
pub use factory::PackageFactory;
pub use floor::{Floor, FloorRef};
pub use package::{FallSide, Package, PackageId, PackageState, Stage};
pub use player::{Player, PlayerId};
pub use truck::{Trip, Truck};
