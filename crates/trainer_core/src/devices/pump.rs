use crate::{Device, Malfunction, Parameter, Solution};

pub fn pump() -> Device {
    Device::new(
        super::PUMP,
        [
            Parameter::continuous("Press", (0.0, 10.0), (4.0, 6.0), 5.0),
            Parameter::continuous("Temperature", (20.0, 120.0), (40.0, 80.0), 65.0),
            Parameter::continuous("Current", (0.0, 60.0), (25.0, 40.0), 32.0),
            Parameter::continuous("Vibro", (0.0, 10.0), (0.5, 3.0), 2.0),
        ],
        vec![overheat(), vibration(), no_pressure()],
    )
}

fn overheat() -> Malfunction {
    Malfunction::new(
        "Overheat",
        "Temperature above 80",
        [("Temperature", (80.1, 120.0))],
        [
            Solution::optimal("Turn on cooling -> Reduce load -> Reset fault"),
            Solution::acceptable("Reduce load -> Reset fault", 80),
            Solution::minimal("Stop the pump -> Call maintenance", 40),
            Solution::wrong("Increase load -> Silence the alarm"),
        ],
    )
}

fn vibration() -> Malfunction {
    Malfunction::new(
        "Vibration",
        "Vibro above 3",
        [("Vibro", (3.1, 10.0))],
        [
            Solution::optimal("Check mountings -> Balance the impeller -> Reset fault"),
            Solution::acceptable("Check mountings -> Lower speed -> Reset fault", 80),
            Solution::minimal("Check operation -> Increase cooling", 30),
            Solution::wrong("Add extra bolts -> Increase load"),
        ],
    )
}

fn no_pressure() -> Malfunction {
    Malfunction::new(
        "No Pressure",
        "Press under 4",
        [("Press", (0.0, 3.9))],
        [
            Solution::optimal("Start standby pump -> Check valves -> Reset fault"),
            Solution::acceptable("Start standby pump -> Reset fault", 80),
            Solution::minimal("Knock on the pump -> Restart", 20),
            Solution::wrong("Increase power"),
        ],
    )
}
