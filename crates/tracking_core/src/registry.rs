use std::collections::BTreeMap;

use crate::{Driver, TrackingError};

type DriverFactory = Box<dyn Fn() -> Box<dyn Driver> + Send + Sync>;

/// Explicit-registration map from carrier key to driver factory.
///
/// Hosts register factories at process start with [`Registry::extend`] and
/// select a driver per request with [`Registry::driver`]. There is no
/// ambient global registry.
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<String, DriverFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for `name`.
    pub fn extend<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Driver> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Construct the driver registered under `name`.
    pub fn driver(&self, name: &str) -> Result<Box<dyn Driver>, TrackingError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(TrackingError::UnknownDriver {
                name: name.to_string(),
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered carrier keys, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}
