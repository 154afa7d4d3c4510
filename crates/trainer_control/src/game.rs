//! Menu/playing state machine, level runner, and scoring.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};
use trainer_core::{generate_tasks, GameConfig, Mood, Qualification, ScoreBoard, Task};

use crate::{CommandSource, SharedDevices, SubscriberHub};

const GREETING: &str = "Hi! Type 'start' to begin";
const START_HINT: &str = "Type 'start' to begin";
const DEVICE_IS_HEALTHY: &str = "This device is working fine! Try another one.";
const MORE_FAULTS_LEFT: &str = "Good! Other devices are still faulty. Enter a device number";
const LEVEL_FAILED: &str = "Game over. Not enough points to reach the next level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
}

/// What the level line on screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level: u32,
    pub score: ScoreBoard,
}

/// How a call to [`Game::run_level`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// Level passed; holds the new level number.
    Advanced(u32),
    /// Final level completed.
    Finished(Qualification),
    /// Score ratio too low; back in the menu.
    Failed,
    /// Player typed `stop`.
    Stopped,
    /// Player typed `exit`.
    Exited,
    /// Host shut down mid-level.
    Abandoned,
    /// Called while in the menu.
    NotPlaying,
}

/// Player commands that break out of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Stop,
    Exit,
    Shutdown,
}

pub struct Game<R> {
    devices: SharedDevices,
    hub: SubscriberHub,
    config: GameConfig,
    rng: R,
    mode: Mode,
    level: u32,
    score: ScoreBoard,
    tasks: Vec<Task>,
}

impl<R: Rng> Game<R> {
    pub fn new(devices: SharedDevices, config: GameConfig, rng: R) -> Self {
        Self {
            devices,
            hub: SubscriberHub::new(),
            config,
            rng,
            mode: Mode::Menu,
            level: 1,
            score: ScoreBoard::default(),
            tasks: Vec::new(),
        }
    }

    pub fn devices(&self) -> &SharedDevices {
        &self.devices
    }

    pub fn subscribers(&mut self) -> &mut SubscriberHub {
        &mut self.hub
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> ScoreBoard {
        self.score
    }

    /// Faults of the current batch not yet answered.
    pub fn pending_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn greet(&mut self) {
        self.hub.notify_mood(Mood::Blank);
        self.hub.notify_message(GREETING);
    }

    /// One pass of the main loop: dispatch a waiting command, run the level
    /// if a game is on, and repaint if devices changed.
    pub fn step(&mut self, source: &mut impl CommandSource) {
        if let Some(command) = source.poll_command() {
            self.dispatch(&command, source);
        }
        if self.mode == Mode::Playing && source.is_running() {
            self.run_level(source);
        }
        if source.take_redraw() {
            self.hub.notify_redraw();
        }
    }

    pub fn dispatch(&mut self, command: &str, source: &mut impl CommandSource) {
        let command = command.trim();
        match (self.mode, command) {
            (_, "") => {}
            (Mode::Menu, "start") => self.start(),
            (_, "exit") => self.exit(source),
            (Mode::Menu, "stop") => self.hub.notify_message(START_HINT),
            (Mode::Menu, other) => {
                self.reject(&format!("Unknown command '{other}'. {START_HINT}"));
            }
            (Mode::Playing, "stop") => self.stop_with_score(),
            (Mode::Playing, _) => {
                let hint = range_hint(self.device_count());
                self.reject(&hint);
            }
        }
    }

    /// Resets progress and enters play at level 1.
    pub fn start(&mut self) {
        self.score = ScoreBoard::default();
        self.level = 1;
        self.tasks.clear();
        self.mode = Mode::Playing;
        info!("game started");
        self.hub.notify_progress(Some(self.progress()));
    }

    /// Plays every batch of the current level, then scores it.
    pub fn run_level(&mut self, source: &mut impl CommandSource) -> LevelOutcome {
        if self.mode != Mode::Playing {
            return LevelOutcome::NotPlaying;
        }
        info!(level = self.level, "level started");
        self.hub.notify_progress(Some(self.progress()));

        let batches = self.config.batches_per_level;
        for batch in 1..=batches {
            if !source.is_running() {
                return self.interrupted(Interrupt::Shutdown, source);
            }
            self.begin_batch(batch, batches);
            self.pause(source, self.config.intro_pause());

            if let Err(interrupt) = self.play_batch(source) {
                return self.interrupted(interrupt, source);
            }
            self.pause(source, self.config.batch_pause());
        }
        self.complete_level(source)
    }

    fn begin_batch(&mut self, batch: u32, batches: u32) {
        let count = self.level as usize;
        self.tasks = {
            let mut devices = self.devices.lock();
            let tasks = generate_tasks(&mut devices, count, &mut self.rng);
            for task in &tasks {
                debug!(
                    device = devices[task.device_index].name(),
                    malfunction = %task.malfunction.name,
                    "fault injected"
                );
            }
            tasks
        };

        let faulty = self.tasks.len();
        let announcement = if faulty == 1 {
            format!("Task {batch}/{batches}. 1 device is faulty. Enter the device number")
        } else {
            format!("Task {batch}/{batches}. {faulty} devices are faulty. Enter a device number")
        };
        self.hub.notify_mood(Mood::Neutral);
        self.hub.notify_message(&announcement);
    }

    /// Loops until every task of the batch is answered.
    fn play_batch(&mut self, source: &mut impl CommandSource) -> Result<(), Interrupt> {
        while !self.tasks.is_empty() {
            let device_index = self.await_number(source, self.device_count())?;
            match self.tasks.iter().position(|t| t.device_index == device_index) {
                Some(position) => {
                    self.resolve_task(position, source)?;
                    if !self.tasks.is_empty() {
                        self.hub.notify_mood(Mood::Neutral);
                        self.hub.notify_message(MORE_FAULTS_LEFT);
                        self.pause(source, self.config.feedback_pause());
                    }
                }
                None => {
                    self.hub.notify_mood(Mood::Sad);
                    self.hub.notify_message(DEVICE_IS_HEALTHY);
                    self.pause(source, self.config.feedback_pause());
                }
            }
        }
        Ok(())
    }

    /// Shows the solution menu for one task, scores the answer, and repairs the device.
    fn resolve_task(
        &mut self,
        position: usize,
        source: &mut impl CommandSource,
    ) -> Result<(), Interrupt> {
        let (device_index, menu, fault_name) = {
            let task = &self.tasks[position];
            let menu: Vec<String> = task
                .choice_lines()
                .iter()
                .enumerate()
                .map(|(i, line)| format!("{}. {line}", i + 1))
                .collect();
            (task.device_index, menu, task.malfunction.name.clone())
        };
        let device_name = self.device_name(device_index);

        self.hub.notify_mood(Mood::Neutral);
        self.hub.notify_choices(&menu);
        self.hub.notify_message(&format!(
            "Device: {device_name}. Fault: {fault_name}. Pick an action (1-{}):",
            menu.len()
        ));

        let choice = self.await_number(source, menu.len())?;
        let mut task = self.tasks.remove(position);
        let Some(solution) = task.answer(choice).cloned() else {
            self.tasks.insert(position, task);
            return Ok(());
        };

        self.score.award(solution.score);
        info!(
            device = %device_name,
            malfunction = %fault_name,
            points = solution.score,
            total = self.score.total,
            "task answered"
        );
        self.hub.notify_mood(Mood::for_points(solution.score));
        self.hub.notify_message(&solution.feedback);
        self.hub.notify_progress(Some(self.progress()));
        self.hub.notify_choices(&[]);

        if let Some(device) = self.devices.lock().get_mut(device_index) {
            device.clear_faults();
        }
        self.pause(source, self.config.feedback_pause());
        Ok(())
    }

    fn complete_level(&mut self, source: &mut impl CommandSource) -> LevelOutcome {
        self.hub.notify_mood(Mood::Happy);
        self.hub.notify_message(&format!(
            "Level {} complete! Score: {}",
            self.level, self.score.total
        ));
        self.pause(source, self.config.level_complete_pause());
        if !source.is_running() {
            return self.interrupted(Interrupt::Shutdown, source);
        }

        if self.level >= self.config.final_level {
            let qualification = Qualification::for_score(self.score.total);
            info!(total = self.score.total, %qualification, "game finished");
            self.stop_game(
                Mood::Happy,
                &format!("Game over! Your qualification: {qualification}"),
            );
            return LevelOutcome::Finished(qualification);
        }

        if self.score.passes(self.config.pass_ratio) {
            self.level += 1;
            info!(level = self.level, ratio = self.score.ratio(), "level passed");
            self.hub.notify_progress(Some(self.progress()));
            return LevelOutcome::Advanced(self.level);
        }

        info!(ratio = self.score.ratio(), "level failed");
        self.stop_game(Mood::Sad, LEVEL_FAILED);
        LevelOutcome::Failed
    }

    /// Polls until the player enters a number in `1..=upper` and returns it 0-based.
    fn await_number(
        &mut self,
        source: &mut impl CommandSource,
        upper: usize,
    ) -> Result<usize, Interrupt> {
        loop {
            if !source.is_running() {
                return Err(Interrupt::Shutdown);
            }
            if source.take_redraw() {
                self.hub.notify_redraw();
            }
            let Some(command) = source.poll_command() else {
                source.sleep(self.config.poll_interval());
                continue;
            };
            match command.trim() {
                "stop" => return Err(Interrupt::Stop),
                "exit" => return Err(Interrupt::Exit),
                text => match text.parse::<usize>() {
                    Ok(n) if (1..=upper).contains(&n) => return Ok(n - 1),
                    _ => self.reject(&range_hint(upper)),
                },
            }
        }
    }

    /// Waits out `duration` without consuming commands, repainting on device changes.
    fn pause(&mut self, source: &mut impl CommandSource, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            if source.take_redraw() {
                self.hub.notify_redraw();
            }
            let now = Instant::now();
            if now >= deadline || !source.is_running() {
                return;
            }
            source.sleep(self.config.poll_interval().min(deadline - now));
        }
    }

    fn interrupted(
        &mut self,
        interrupt: Interrupt,
        source: &mut impl CommandSource,
    ) -> LevelOutcome {
        match interrupt {
            Interrupt::Stop => {
                self.stop_with_score();
                LevelOutcome::Stopped
            }
            Interrupt::Exit => {
                self.exit(source);
                LevelOutcome::Exited
            }
            Interrupt::Shutdown => {
                info!("level abandoned");
                self.mode = Mode::Menu;
                self.tasks.clear();
                self.clear_all_faults();
                LevelOutcome::Abandoned
            }
        }
    }

    fn stop_with_score(&mut self) {
        info!(total = self.score.total, max = self.score.max, "game stopped");
        let message = format!(
            "Game stopped. Score {}/{}",
            self.score.total, self.score.max
        );
        self.stop_game(Mood::Sad, &message);
    }

    fn exit(&mut self, source: &mut impl CommandSource) {
        info!("exit requested");
        self.mode = Mode::Menu;
        self.tasks.clear();
        self.clear_all_faults();
        source.request_exit();
    }

    /// Back to the menu with every fault cleared and the round screen wiped.
    fn stop_game(&mut self, mood: Mood, message: &str) {
        self.mode = Mode::Menu;
        self.tasks.clear();
        self.clear_all_faults();
        self.hub.notify_mood(mood);
        self.hub.notify_message(message);
        self.hub.notify_progress(None);
        self.hub.notify_choices(&[]);
    }

    /// Rejected input frowns the mascot along with the hint.
    fn reject(&mut self, hint: &str) {
        self.hub.notify_mood(Mood::Sad);
        self.hub.notify_message(hint);
    }

    fn clear_all_faults(&self) {
        for device in self.devices.lock().iter_mut() {
            device.clear_faults();
        }
    }

    fn progress(&self) -> Progress {
        Progress {
            level: self.level,
            score: self.score,
        }
    }

    fn device_count(&self) -> usize {
        self.devices.lock().len()
    }

    fn device_name(&self, index: usize) -> String {
        self.devices
            .lock()
            .get(index)
            .map(|d| d.name().to_string())
            .unwrap_or_default()
    }
}

fn range_hint(upper: usize) -> String {
    format!("Enter a number from 1 to {upper}")
}
