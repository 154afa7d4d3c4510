use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::info;
use trainer_control::SharedDevices;

use crate::state::Runtime;

/// Drifts every device once under the device lock.
pub fn tick_devices(devices: &SharedDevices, rng: &mut impl Rng) {
    for device in devices.lock().iter_mut() {
        device.drift(rng);
    }
}

/// Waits for the start gate, then drifts all devices every `interval` and
/// flags a repaint, until the runtime stops. `poll` bounds how long a
/// shutdown goes unnoticed.
pub fn run_tick_loop(
    runtime: &Runtime,
    devices: &SharedDevices,
    interval: Duration,
    poll: Duration,
    rng: &mut impl Rng,
) {
    runtime.gate.wait();
    info!(?interval, "tick loop started");
    while runtime.sleep_while_running(interval, poll) {
        tick_devices(devices, rng);
        runtime.request_redraw();
    }
    info!("tick loop stopped");
}

pub fn spawn_tick_loop(
    runtime: Arc<Runtime>,
    devices: SharedDevices,
    interval: Duration,
    poll: Duration,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("tick".to_string())
        .spawn(move || {
            let mut rng = rand::thread_rng();
            run_tick_loop(&runtime, &devices, interval, poll, &mut rng);
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use trainer_control::shared_devices;
    use trainer_core::test_fixtures::make_rng;
    use trainer_core::{devices, DeviceRegistry};

    fn all_builtin() -> SharedDevices {
        let registry = DeviceRegistry::builtin();
        shared_devices(registry.create_all(&registry.names()).unwrap())
    }

    #[test]
    fn tick_keeps_every_value_in_range() {
        let shared = all_builtin();
        let mut rng = make_rng();
        for _ in 0..200 {
            tick_devices(&shared, &mut rng);
        }
        for device in shared.lock().iter() {
            for param in device.parameters() {
                assert!(
                    param.current().contains(param.value().as_f64()),
                    "{}.{} left its range",
                    device.name(),
                    param.name()
                );
            }
        }
    }

    #[test]
    fn tick_respects_injected_faults() {
        let pump = devices::pump();
        let fault = pump.catalog()[0].clone();
        let shared = shared_devices(vec![pump]);
        shared.lock()[0].inject_fault(&fault);

        let mut rng = make_rng();
        for _ in 0..100 {
            tick_devices(&shared, &mut rng);
        }
        let guard = shared.lock();
        for (name, abnormal) in &fault.conditions {
            let param = guard[0].parameter(name).unwrap();
            assert!(abnormal.contains(param.value().as_f64()));
        }
        assert!(guard[0].has_fault());
    }

    #[test]
    fn loop_waits_for_the_gate_and_stops_on_shutdown() {
        let runtime = Arc::new(Runtime::new());
        let shared = all_builtin();
        let handle = spawn_tick_loop(
            runtime.clone(),
            shared,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .unwrap();

        thread::sleep(Duration::from_millis(20));
        assert!(!runtime.take_redraw(), "ticked before the gate opened");

        runtime.gate.open();
        let mut redrawn = false;
        for _ in 0..500 {
            if runtime.take_redraw() {
                redrawn = true;
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(redrawn);

        runtime.shutdown();
        handle.join().unwrap();
    }
}
