#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate num;
extern crate regex;

mod button;
pub use button::{Button, Candidate, Direction};
use button::width;

mod error;
pub use error::Error;

mod history;
pub use history::History;

mod portal;
pub use portal::{apply_portal, Portal};

mod search;
pub use search::{Search, Step};

/// A calculator puzzle: reach `goal` from `initial` in at most `max_turns`
/// button presses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    initial: i64,
    goal: i64,
    max_turns: usize,
    buttons: Vec<Button>,
    portal: Option<Portal>,
    digit_limit: Option<usize>,
}

impl Problem {
    pub fn new(initial: i64, goal: i64, max_turns: usize, buttons: Vec<Button>) -> Result<Self, Error> {
        if buttons.is_empty() {
            return Err(Error::no_buttons());
        }

        let mut buttons = buttons;
        // Each mutator adjusts every other button with a plain operand.
        for i in 0..buttons.len() {
            if buttons[i].mutator_amount().is_some() {
                let targets = buttons.iter()
                    .enumerate()
                    .filter(|&(j, button)| j != i && button.operand().is_some())
                    .map(|(j, _)| j)
                    .collect();
                buttons[i].set_targets(targets);
            }
        }

        Ok(Problem {
            initial,
            goal,
            max_turns,
            buttons,
            portal: None,
            digit_limit: None,
        })
    }

    pub fn with_portal(self, entrance: u32, exit: u32) -> Result<Self, Error> {
        let portal = Portal::new(entrance, exit)?;
        Ok(Problem { portal: Some(portal), ..self })
    }

    /// Rejects any number wider than `limit` characters on the display,
    /// including the initial value and the goal.
    pub fn with_digit_limit(self, limit: usize) -> Result<Self, Error> {
        if limit == 0 {
            return Err(Error::invalid_digit_limit());
        }
        if width(self.initial) > limit {
            return Err(Error::invalid_initial_value(self.initial, limit));
        }
        if width(self.goal) > limit {
            return Err(Error::invalid_goal(self.goal, limit));
        }
        Ok(Problem { digit_limit: Some(limit), ..self })
    }

    pub fn initial(&self) -> i64 {
        self.initial
    }

    pub fn goal(&self) -> i64 {
        self.goal
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn portal(&self) -> Option<Portal> {
        self.portal
    }

    pub fn digit_limit(&self) -> Option<usize> {
        self.digit_limit
    }

    /// Returns the first solution found, depth first and in button order.
    /// It is not necessarily the shortest.
    pub fn solve(&self) -> Option<Vec<Step>> {
        debug!("solving {} -> {} in {} turns with {} buttons",
               self.initial,
               self.goal,
               self.max_turns,
               self.buttons.len());

        let mut search = Search::new(self.goal,
                                     self.max_turns,
                                     self.portal,
                                     self.digit_limit,
                                     self.buttons.clone());
        let result = search.run(self.initial);

        debug!("{} after visiting {} nodes",
               if result.is_some() { "solved" } else { "no solution" },
               search.visited());
        result
    }
}

/// Solves a puzzle without a portal or digit limit.
pub fn run(initial: i64, goal: i64, moves: usize, buttons: Vec<Button>) -> Result<Option<Vec<Step>>, Error> {
    Ok(Problem::new(initial, goal, moves, buttons)?.solve())
}
