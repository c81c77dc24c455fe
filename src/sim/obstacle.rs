//! Obstacle entities

use serde::{Deserialize, Serialize};

use super::Command;

pub type ObstacleId = u32;
pub type GroupId = u32;

/// A single timed challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Unique, increasing in spawn order
    pub id: ObstacleId,
    /// Shared by the two members of a combo; `None` when standalone
    pub group_id: Option<GroupId>,
    pub required_command: Command,
    /// Countdown to nominal impact; negative once past due
    pub time_to_impact_ms: i64,
    /// The correct command has been matched to it
    pub resolved: bool,
    /// Its group has contributed to the score
    pub scored: bool,
    /// It caused the game over. Never cleared.
    pub failed: bool,
}

impl Obstacle {
    pub fn new(
        id: ObstacleId,
        group_id: Option<GroupId>,
        required_command: Command,
        time_to_impact_ms: i64,
    ) -> Self {
        Self {
            id,
            group_id,
            required_command,
            time_to_impact_ms,
            resolved: false,
            scored: false,
            failed: false,
        }
    }

    /// The scoring unit this obstacle belongs to
    pub fn group(&self) -> ObstacleGroup {
        match self.group_id {
            Some(group_id) => ObstacleGroup::Combo(group_id),
            None => ObstacleGroup::Single(self.id),
        }
    }

    /// Still waiting for a command
    pub fn is_pending(&self) -> bool {
        !self.resolved && !self.failed
    }

    pub fn has_reached_impact(&self) -> bool {
        self.time_to_impact_ms <= 0
    }
}

/// A scoring unit: one standalone obstacle or one combo pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleGroup {
    Single(ObstacleId),
    Combo(GroupId),
}

impl ObstacleGroup {
    pub fn contains(&self, obstacle: &Obstacle) -> bool {
        match *self {
            ObstacleGroup::Single(id) => obstacle.group_id.is_none() && obstacle.id == id,
            ObstacleGroup::Combo(group_id) => obstacle.group_id == Some(group_id),
        }
    }

    /// Iterate the members of this group
    pub fn members(self, obstacles: &[Obstacle]) -> impl Iterator<Item = &Obstacle> {
        obstacles.iter().filter(move |o| self.contains(o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_membership() {
        let single = Obstacle::new(1, None, Command::Jump, 1000);
        let first = Obstacle::new(2, Some(7), Command::Left, 1000);
        let second = Obstacle::new(3, Some(7), Command::Right, 1450);

        assert_eq!(single.group(), ObstacleGroup::Single(1));
        assert_eq!(first.group(), second.group());

        let all = [single, first, second];
        assert_eq!(ObstacleGroup::Combo(7).members(&all).count(), 2);
        assert_eq!(ObstacleGroup::Single(1).members(&all).count(), 1);
        // a combo member's id is not a standalone group
        assert_eq!(ObstacleGroup::Single(2).members(&all).count(), 0);
    }

    #[test]
    fn test_pending_and_impact() {
        let mut obstacle = Obstacle::new(1, None, Command::Duck, 1);
        assert!(obstacle.is_pending());
        assert!(!obstacle.has_reached_impact());

        obstacle.time_to_impact_ms = 0;
        assert!(obstacle.has_reached_impact());

        obstacle.resolved = true;
        assert!(!obstacle.is_pending());
    }
}
