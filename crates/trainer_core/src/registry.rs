//! Name-to-constructor table for device types.
//!
//! Passed explicitly to whoever builds the device list; there is no global table.

use ahash::AHashMap;

use crate::{devices, Device, TrainerError};

pub type DeviceFactory = Box<dyn Fn() -> Device + Send + Sync>;

#[derive(Default)]
pub struct DeviceRegistry {
    factories: AHashMap<String, DeviceFactory>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the Pump, Fan, and Compressor types.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(devices::PUMP, devices::pump);
        registry.register(devices::FAN, devices::fan);
        registry.register(devices::COMPRESSOR, devices::compressor);
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Device + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn create(&self, name: &str) -> Result<Device, TrainerError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| TrainerError::UnknownDevice(name.to_string()))
    }

    /// Builds one device per name, in order.
    pub fn create_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Device>, TrainerError> {
        names.iter().map(|name| self.create(name.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::graded_device;

    #[test]
    fn registered_type_is_constructible() {
        let mut registry = DeviceRegistry::new();
        registry.register("Device1", graded_device);
        registry.register("Device2", graded_device);

        assert!(registry.create("Device1").is_ok());
        assert_eq!(
            registry.create("Device3").unwrap_err(),
            TrainerError::UnknownDevice("Device3".to_string())
        );
    }

    #[test]
    fn each_create_builds_a_separate_device() {
        let mut registry = DeviceRegistry::new();
        registry.register("Device1", graded_device);
        let mut first = registry.create("Device1").unwrap();
        let second = registry.create("Device1").unwrap();

        let fault = first.catalog()[0].clone();
        first.inject_fault(&fault);
        assert!(first.has_fault());
        assert!(!second.has_fault());
        assert_eq!(first.name(), second.name());
    }

    #[test]
    fn re_registering_replaces_the_factory() {
        let mut registry = DeviceRegistry::new();
        registry.register("Unit", devices::pump);
        registry.register("Unit", devices::fan);
        assert_eq!(registry.create("Unit").unwrap().name(), "Fan");
        assert_eq!(registry.names(), vec!["Unit".to_string()]);
    }

    #[test]
    fn builtin_creates_all_in_order() {
        let registry = DeviceRegistry::builtin();
        let created = registry
            .create_all(&["Compressor", "Pump", "Fan"])
            .unwrap();
        let names: Vec<&str> = created.iter().map(Device::name).collect();
        assert_eq!(names, ["Compressor", "Pump", "Fan"]);
        assert!(registry.create_all(&["Pump", "Boiler"]).is_err());
    }
}
