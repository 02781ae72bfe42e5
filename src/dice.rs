use rand::Rng;

use crate::error::Error;

pub const DEFAULT_SIDES: i32 = 6;

/// Upper bound on the number of rolls a single `roll` call may produce.
pub const MAX_ROLLS: i32 = 10_000;

/// A die with a fixed number of sides. Every roll is an independent draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die {
    sides: i32,
}

impl Die {
    /// Falls back to a six-sided die when `sides` is missing or not positive.
    pub fn new(sides: Option<i32>) -> Self {
        let sides = match sides {
            Some(n) if n > 0 => n,
            _ => DEFAULT_SIDES,
        };
        Die { sides }
    }

    pub fn sides(&self) -> i32 {
        self.sides
    }

    pub fn roll_once(&self) -> i32 {
        rand::thread_rng().gen_range(1..=self.sides)
    }

    /// Rolls `count` times, in draw order. A non-positive count yields no
    /// rolls; more than [`MAX_ROLLS`] is rejected.
    pub fn roll(&self, count: i32) -> Result<Vec<i32>, Error> {
        if count > MAX_ROLLS {
            return Err(Error::Validation(format!(
                "numRolls must be at most {}, got {}",
                MAX_ROLLS, count
            )));
        }
        let mut rng = rand::thread_rng();
        Ok((0..count.max(0))
            .map(|_| rng.gen_range(1..=self.sides))
            .collect())
    }
}

impl Default for Die {
    fn default() -> Self {
        Die::new(None)
    }
}

/// Draws a single value in `[1, max]`.
pub fn roll_dice(max: i32) -> Result<i32, Error> {
    if max < 1 {
        return Err(Error::Validation(format!(
            "max must be at least 1, got {}",
            max
        )));
    }
    Ok(rand::thread_rng().gen_range(1..=max))
}

pub const BORG_PHRASES: [&str; 2] = ["Resistence is futile", "You will be one with the Borg"];

pub fn borg_me() -> &'static str {
    if rand::thread_rng().gen_bool(0.5) {
        BORG_PHRASES[0]
    } else {
        BORG_PHRASES[1]
    }
}
