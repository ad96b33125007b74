use crate::entity::{Element, Package, PackageId};

use serde::{Deserialize, Serialize};

/// Produces packages onto the belt it feeds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PackageFactory {
    pub element: Element,
    pub new_package_length: f32,
    pub new_package_height: f32,
    /// Index of the conveyor new packages are put on.
    pub conveyor: usize,
}

impl PackageFactory {
    pub const fn new(
        element: Element,
        new_package_length: f32,
        new_package_height: f32,
        conveyor: usize,
    ) -> Self {
        Self {
            element,
            new_package_length,
            new_package_height,
            conveyor,
        }
    }

    /// The package still has to be put on the conveyor, which also sets its position.
    pub fn create_package(&self, id: PackageId) -> Package {
        let package = Package::new(id, self.new_package_length, self.new_package_height);
        debug!("factory at ({}, {}) created {}", self.element.x, self.element.y, package);
        package
    }
}
