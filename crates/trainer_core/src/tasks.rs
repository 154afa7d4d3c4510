//! Per-round fault assignment.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Device, Malfunction, Solution, SOLUTIONS_PER_MALFUNCTION};

/// One injected fault waiting for the player's answer.
#[derive(Debug, Clone)]
pub struct Task {
    pub device_index: usize,
    pub malfunction: Malfunction,
    /// The malfunction's solutions in the order shown to the player.
    pub solutions: [Solution; SOLUTIONS_PER_MALFUNCTION],
    pub selected: Option<usize>,
    pub awarded: Option<u32>,
}

impl Task {
    /// Records the player's 0-based pick and returns the points it earns.
    /// Out-of-range picks are ignored.
    pub fn answer(&mut self, choice: usize) -> Option<&Solution> {
        let solution = self.solutions.get(choice)?;
        self.selected = Some(choice);
        self.awarded = Some(solution.score);
        Some(solution)
    }

    /// Menu lines in display order, without numbering.
    pub fn choice_lines(&self) -> Vec<String> {
        self.solutions.iter().map(|s| s.description.clone()).collect()
    }
}

/// Injects faults into up to `count` distinct devices and returns one task per fault.
///
/// Devices are drawn by a uniform shuffle over those with a non-empty catalog;
/// `count` above that number is capped silently. Each chosen device gets one
/// uniformly picked malfunction and an independently shuffled solution menu.
pub fn generate_tasks(devices: &mut [Device], count: usize, rng: &mut impl Rng) -> Vec<Task> {
    let mut eligible: Vec<usize> = devices
        .iter()
        .enumerate()
        .filter(|(_, device)| !device.catalog().is_empty())
        .map(|(idx, _)| idx)
        .collect();
    eligible.shuffle(rng);
    eligible.truncate(count);

    let mut tasks = Vec::with_capacity(eligible.len());
    for device_index in eligible {
        let device = &mut devices[device_index];
        let Some(malfunction) = device.catalog().choose(rng).cloned() else {
            continue;
        };
        device.inject_fault(&malfunction);

        let mut solutions = malfunction.solutions.clone();
        solutions.shuffle(rng);
        tasks.push(Task {
            device_index,
            malfunction,
            solutions,
            selected: None,
            awarded: None,
        });
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{graded_device, make_rng};
    use crate::{devices, Parameter};
    use std::collections::HashSet;

    fn plant() -> Vec<Device> {
        vec![devices::pump(), devices::fan(), devices::compressor()]
    }

    #[test]
    fn tasks_reference_distinct_devices() {
        let mut rng = make_rng();
        for count in 0..=5 {
            let mut devices = plant();
            let tasks = generate_tasks(&mut devices, count, &mut rng);
            assert_eq!(tasks.len(), count.min(devices.len()));
            let indices: HashSet<usize> = tasks.iter().map(|t| t.device_index).collect();
            assert_eq!(indices.len(), tasks.len());
        }
    }

    #[test]
    fn chosen_devices_have_the_fault_injected() {
        let mut rng = make_rng();
        let mut devices = plant();
        let tasks = generate_tasks(&mut devices, 2, &mut rng);
        for task in &tasks {
            let device = &devices[task.device_index];
            assert_eq!(device.active_faults(), std::slice::from_ref(&task.malfunction));
            assert!(device.catalog().contains(&task.malfunction));
        }
        let faulty = devices.iter().filter(|d| d.has_fault()).count();
        assert_eq!(faulty, 2);
    }

    #[test]
    fn shuffled_menu_is_a_permutation() {
        let mut rng = make_rng();
        for _ in 0..20 {
            let mut devices = plant();
            for task in generate_tasks(&mut devices, 3, &mut rng) {
                let mut shown: Vec<_> = task.solutions.to_vec();
                let mut original: Vec<_> = task.malfunction.solutions.to_vec();
                shown.sort_by(|a, b| a.description.cmp(&b.description));
                original.sort_by(|a, b| a.description.cmp(&b.description));
                assert_eq!(shown, original);
            }
        }
    }

    #[test]
    fn menu_order_varies_between_rounds() {
        let mut rng = make_rng();
        let mut first_positions = HashSet::new();
        for _ in 0..50 {
            let mut devices = vec![graded_device()];
            let task = generate_tasks(&mut devices, 1, &mut rng).remove(0);
            let optimal = task.solutions.iter().position(|s| s.score == 100);
            first_positions.insert(optimal);
        }
        assert!(first_positions.len() > 1, "optimal answer never moved");
    }

    #[test]
    fn devices_without_catalog_are_skipped() {
        let mut rng = make_rng();
        let mut devices = vec![
            Device::new("Empty", Vec::<Parameter>::new(), Vec::new()),
            graded_device(),
            Device::new("Empty", Vec::<Parameter>::new(), Vec::new()),
        ];
        let tasks = generate_tasks(&mut devices, 3, &mut rng);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].device_index, 1);
    }

    #[test]
    fn answer_records_pick_and_points() {
        let mut rng = make_rng();
        let mut devices = vec![graded_device()];
        let mut task = generate_tasks(&mut devices, 1, &mut rng).remove(0);
        assert!(task.answer(4).is_none());
        assert_eq!(task.selected, None);

        let expected = task.solutions[2].score;
        let picked = task.answer(2).map(|s| s.score);
        assert_eq!(picked, Some(expected));
        assert_eq!(task.selected, Some(2));
        assert_eq!(task.awarded, Some(expected));
    }
}
