use juniper::graphql_object;

use crate::dice::Die;
use crate::error::Error;

/// GraphQL view of a [`Die`]. Built per request by `getDie`, never stored.
pub struct RandomDie(Die);

impl From<Die> for RandomDie {
    fn from(die: Die) -> Self {
        RandomDie(die)
    }
}

/// A die that rolls fresh values on every access.
#[graphql_object]
impl RandomDie {
    fn num_sides(&self) -> i32 {
        self.0.sides()
    }

    fn roll_once(&self) -> i32 {
        self.0.roll_once()
    }

    /// Rolls the die `numRolls` times. Zero or fewer rolls yields an empty
    /// list; more than 10000 is rejected.
    fn roll(&self, num_rolls: i32) -> Result<Option<Vec<i32>>, Error> {
        self.0.roll(num_rolls).map(Some)
    }
}
