//! Score bookkeeping, mascot mood, and the final qualification table.

/// Ceiling for a single answered task; added to the max score per answer.
pub const MAX_POINTS_PER_TASK: u32 = 100;

/// Running totals for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub total: u32,
    pub max: u32,
}

impl ScoreBoard {
    pub fn award(&mut self, points: u32) {
        self.total += points;
        self.max += MAX_POINTS_PER_TASK;
    }

    /// Fraction of the possible score earned so far. Zero before the first answer.
    pub fn ratio(self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.total) / f64::from(self.max)
        }
    }

    /// Strictly above `threshold`.
    pub fn passes(self, threshold: f64) -> bool {
        self.ratio() > threshold
    }
}

/// Mascot expression. `Blank` is the idle face shown before any feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Angry,
    Blank,
}

impl Mood {
    /// Reaction to an awarded score.
    pub fn for_points(points: u32) -> Self {
        match points {
            100.. => Mood::Happy,
            60..=99 => Mood::Neutral,
            20..=59 => Mood::Sad,
            _ => Mood::Angry,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Blank => "",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final rank, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Qualification {
    Student,
    Trainee,
    Operator,
    Specialist,
    Expert,
}

impl Qualification {
    /// First matching threshold wins: 1600, 1400, 1200, 1000.
    pub fn for_score(total: u32) -> Self {
        match total {
            1600.. => Qualification::Expert,
            1400..=1599 => Qualification::Specialist,
            1200..=1399 => Qualification::Operator,
            1000..=1199 => Qualification::Trainee,
            _ => Qualification::Student,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Qualification::Expert => "expert",
            Qualification::Specialist => "specialist",
            Qualification::Operator => "operator",
            Qualification::Trainee => "trainee",
            Qualification::Student => "student",
        }
    }
}

impl std::fmt::Display for Qualification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_mapping_is_exact() {
        assert_eq!(Mood::for_points(100), Mood::Happy);
        assert_eq!(Mood::for_points(99), Mood::Neutral);
        assert_eq!(Mood::for_points(75), Mood::Neutral);
        assert_eq!(Mood::for_points(60), Mood::Neutral);
        assert_eq!(Mood::for_points(59), Mood::Sad);
        assert_eq!(Mood::for_points(30), Mood::Sad);
        assert_eq!(Mood::for_points(20), Mood::Sad);
        assert_eq!(Mood::for_points(19), Mood::Angry);
        assert_eq!(Mood::for_points(0), Mood::Angry);
    }

    #[test]
    fn mood_tags() {
        assert_eq!(Mood::Happy.to_string(), "happy");
        assert_eq!(Mood::Blank.as_str(), "");
    }

    #[test]
    fn qualification_thresholds() {
        assert_eq!(Qualification::for_score(1700), Qualification::Expert);
        assert_eq!(Qualification::for_score(1600), Qualification::Expert);
        assert_eq!(Qualification::for_score(1599), Qualification::Specialist);
        assert_eq!(Qualification::for_score(1400), Qualification::Specialist);
        assert_eq!(Qualification::for_score(1200), Qualification::Operator);
        assert_eq!(Qualification::for_score(1000), Qualification::Trainee);
        assert_eq!(Qualification::for_score(999), Qualification::Student);
        assert_eq!(Qualification::for_score(0).to_string(), "student");
    }

    #[test]
    fn award_adds_points_and_ceiling() {
        let mut board = ScoreBoard::default();
        board.award(80);
        board.award(100);
        assert_eq!(board, ScoreBoard { total: 180, max: 200 });
        assert!((board.ratio() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn pass_threshold_is_strict() {
        let half = ScoreBoard { total: 150, max: 300 };
        assert!(!half.passes(0.5));
        let better = ScoreBoard { total: 180, max: 300 };
        assert!(better.passes(0.5));
        assert!(!ScoreBoard::default().passes(0.5));
    }
}
