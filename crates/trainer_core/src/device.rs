//! A simulated piece of equipment: parameters, its fault catalog, and the
//! faults currently injected into it.

use rand::Rng;

use crate::{Malfunction, ParamValue, Parameter};

#[derive(Debug, Clone)]
pub struct Device {
    name: String,
    parameters: Vec<Parameter>,
    catalog: Vec<Malfunction>,
    active_faults: Vec<Malfunction>,
}

/// Render-ready copy of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSnapshot {
    pub name: String,
    pub normal_min: f64,
    pub normal_max: f64,
    pub value: ParamValue,
}

/// Render-ready copy of one device, detached from the live state.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    pub name: String,
    pub parameters: Vec<ParameterSnapshot>,
}

impl Device {
    /// Builds a device. Parameter names must be unique; later duplicates are dropped.
    pub fn new(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
        catalog: Vec<Malfunction>,
    ) -> Self {
        let mut unique: Vec<Parameter> = Vec::new();
        for param in parameters {
            if !unique.contains(&param) {
                unique.push(param);
            }
        }
        Self {
            name: name.into(),
            parameters: unique,
            catalog,
            active_faults: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn catalog(&self) -> &[Malfunction] {
        &self.catalog
    }

    pub fn active_faults(&self) -> &[Malfunction] {
        &self.active_faults
    }

    pub fn has_fault(&self) -> bool {
        !self.active_faults.is_empty()
    }

    /// One tick of noise on every parameter. Never touches the fault list.
    pub fn drift(&mut self, rng: &mut impl Rng) {
        for param in &mut self.parameters {
            param.drift(rng);
        }
    }

    /// Pushes every parameter named in the malfunction's conditions into its
    /// abnormal range and records the fault as active.
    pub fn inject_fault(&mut self, malfunction: &Malfunction) {
        for (param_name, abnormal) in &malfunction.conditions {
            if let Some(param) = self.parameters.iter_mut().find(|p| p.name() == param_name) {
                param.constrain(*abnormal);
            }
        }
        self.active_faults.push(malfunction.clone());
    }

    /// Returns every parameter to its normal band and midpoint and forgets all faults.
    pub fn clear_faults(&mut self) {
        for param in &mut self.parameters {
            param.restore();
        }
        self.active_faults.clear();
    }

    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            name: self.name.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|p| ParameterSnapshot {
                    name: p.name().to_string(),
                    normal_min: p.normal().min(),
                    normal_max: p.normal().max(),
                    value: p.value(),
                })
                .collect(),
        }
    }
}
