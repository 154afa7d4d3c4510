use crate::{Device, Malfunction, Parameter, Solution};

pub fn fan() -> Device {
    Device::new(
        super::FAN,
        [
            Parameter::discrete("Rpm", (0, 2000), (1200, 1500), 1350),
            Parameter::continuous("Current", (5.0, 20.0), (8.0, 12.0), 10.0),
            Parameter::continuous("Temperature", (20.0, 120.0), (40.0, 70.0), 65.0),
        ],
        vec![low_rpm(), overcurrent(), overheat()],
    )
}

fn low_rpm() -> Malfunction {
    Malfunction::new(
        "Low Rpm",
        "Rpm under 1200",
        [("Rpm", (0.0, 1199.0))],
        [
            Solution::optimal("Check power supply -> Clean the blades -> Adjust speed"),
            Solution::acceptable("Raise voltage -> Check speed", 80),
            Solution::minimal("Replace the fan -> Call a technician", 40),
            Solution::wrong("Switch the fan off"),
        ],
    )
}

fn overheat() -> Malfunction {
    Malfunction::new(
        "Overheat",
        "Temperature above 70",
        [("Temperature", (70.1, 120.0))],
        [
            Solution::optimal("Stop -> Clean out dust -> Check bearings"),
            Solution::acceptable("Reduce load -> Increase cooling", 70),
            Solution::minimal("Blow compressed air through it while running", 30),
            Solution::wrong("Pour water on it to cool down"),
        ],
    )
}

fn overcurrent() -> Malfunction {
    Malfunction::new(
        "Overcurrent",
        "Current above 12",
        [("Current", (12.1, 20.0))],
        [
            Solution::optimal("Check load -> Check bearings -> Shut down for diagnostics"),
            Solution::acceptable("Lower speed -> Monitor temperature", 80),
            Solution::minimal("Raise voltage", 20),
            Solution::wrong("Disable overcurrent protection"),
        ],
    )
}
