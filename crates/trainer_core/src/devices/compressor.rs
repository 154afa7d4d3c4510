use crate::{Device, Malfunction, Parameter, Solution};

pub fn compressor() -> Device {
    Device::new(
        super::COMPRESSOR,
        [
            Parameter::continuous("Press", (0.0, 15.0), (6.0, 9.0), 7.0),
            Parameter::continuous("Oil Temperature", (20.0, 100.0), (60.0, 80.0), 70.0),
            Parameter::discrete("Oil Level", (0, 100), (60, 90), 85),
            Parameter::discrete("On/Off Counter", (0, 100), (0, 10), 5),
        ],
        vec![oil_leak(), over_pressure(), frequent_starts()],
    )
}

fn oil_leak() -> Malfunction {
    Malfunction::new(
        "Oil Leak",
        "Oil Level under 60",
        [("Oil Level", (0.0, 59.0))],
        [
            Solution::optimal("Stop, find the leak, tighten the fittings"),
            Solution::acceptable("Top up oil, watch the level", 60),
            Solution::minimal("Thicken the oil with an additive", 30),
            Solution::wrong("Seal the leak with silicone"),
        ],
    )
}

fn over_pressure() -> Malfunction {
    Malfunction::new(
        "Over Pressure",
        "Press above 9",
        [("Press", (10.0, 15.0))],
        [
            Solution::optimal("Vent through the relief valve, check the pressure switch"),
            Solution::acceptable("Disconnect the load, check the gauge", 75),
            Solution::minimal("Temporarily bleed to atmosphere", 40),
            Solution::wrong("Short the sensor contacts"),
        ],
    )
}

fn frequent_starts() -> Malfunction {
    Malfunction::new(
        "Frequent Starts",
        "On/Off Counter above 10",
        [("On/Off Counter", (11.0, 100.0))],
        [
            Solution::optimal("Find the air leak, check the receiver"),
            Solution::acceptable("Adjust the pressure switch hysteresis", 85),
            Solution::minimal("Switch to manual mode", 25),
            Solution::wrong("Lock out the starter"),
        ],
    )
}
