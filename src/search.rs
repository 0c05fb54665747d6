use std::collections::HashSet;
use std::fmt;

use button::{width, Button};
use portal::Portal;

/// One move of a solution: the number on the display and the button pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: i64,
    pub label: String,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.state, self.label)
    }
}

/// Depth-first search over one private copy of the buttons.
///
/// Every change a turn makes to the buttons is undone before the next
/// sibling is tried, so the buttons only ever describe the path being walked.
pub struct Search {
    goal: i64,
    max_turns: usize,
    portal: Option<Portal>,
    digit_limit: Option<usize>,
    buttons: Vec<Button>,
    visited: u64,
}

impl Search {
    pub fn new(goal: i64,
               max_turns: usize,
               portal: Option<Portal>,
               digit_limit: Option<usize>,
               buttons: Vec<Button>)
               -> Self {
        Search {
            goal,
            max_turns,
            portal,
            digit_limit,
            buttons,
            visited: 0,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Nodes entered so far.
    pub fn visited(&self) -> u64 {
        self.visited
    }

    pub fn run(&mut self, initial: i64) -> Option<Vec<Step>> {
        let mut path = vec![];
        if self.solve(initial, 0, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn solve(&mut self, n: i64, turn: usize, path: &mut Vec<Step>) -> bool {
        self.visited += 1;
        trace!("turn {}: {}", turn, n);

        if n == self.goal {
            return true;
        }
        if turn == self.max_turns {
            return false;
        }

        for button in self.buttons.iter_mut() {
            button.upkeep(n, turn);
        }

        for i in 0..self.buttons.len() {
            let found = if let Some(amount) = self.buttons[i].mutator_amount() {
                self.press_mutator(i, amount, n, turn, path)
            } else {
                self.press(i, n, turn, path)
            };
            if found {
                return true;
            }
        }
        false
    }

    // The mutator leaves the number alone, so it is the one move exempt from
    // no-op suppression and the portal.
    fn press_mutator(&mut self, i: usize, amount: i64, n: i64, turn: usize, path: &mut Vec<Step>) -> bool {
        let targets = self.buttons[i].targets().to_vec();
        for &t in &targets {
            self.buttons[t].shift_operand(amount);
        }

        path.push(Step {
            state: n,
            label: self.buttons[i].label(0),
        });
        let found = self.solve(n, turn + 1, path);
        self.rollback(n, turn);

        for &t in &targets {
            self.buttons[t].shift_operand(-amount);
        }

        if !found {
            path.pop();
        }
        found
    }

    fn press(&mut self, i: usize, n: i64, turn: usize, path: &mut Vec<Step>) -> bool {
        let saved_used = self.buttons[i].history().and_then(|h| h.used());
        let candidates = self.buttons[i].apply(n, turn);

        let mut explored = HashSet::new();
        let mut found = false;
        for candidate in candidates {
            let next = match self.admit(candidate.value) {
                Some(next) => next,
                None => {
                    trace!("turn {}: {} dropped {}", turn, self.buttons[i], candidate.value);
                    continue;
                }
            };
            if next == n || !explored.insert(next) {
                continue;
            }

            if let Some(history) = self.buttons[i].history_mut() {
                history.set_used(Some(candidate.index));
            }
            path.push(Step {
                state: n,
                label: self.buttons[i].label(candidate.index),
            });
            found = self.solve(next, turn + 1, path);
            self.rollback(n, turn);
            if found {
                break;
            }
            path.pop();
        }

        // Applying may have recorded a firing even when no candidate survived.
        self.rollback(n, turn);
        if let Some(history) = self.buttons[i].history_mut() {
            history.set_used(saved_used);
        }
        found
    }

    /// Runs a candidate through the portal and the display limit.
    fn admit(&self, value: i64) -> Option<i64> {
        let value = match self.portal {
            Some(ref portal) => portal.apply(value)?,
            None => value,
        };
        match self.digit_limit {
            Some(limit) if width(value) > limit => None,
            _ => Some(value),
        }
    }

    fn rollback(&mut self, n: i64, turn: usize) {
        for button in self.buttons.iter_mut() {
            button.rollback(n, turn);
        }
    }
}
