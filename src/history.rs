use button::{concat, Candidate};

/// State behind the `Store` button.
///
/// `previous[t]` is the number the current path held at turn `t`, `pushes`
/// holds the turns at which the button fired on that path, and `used` is the
/// history entry consumed by the most recent firing still on the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    previous: Vec<i64>,
    pushes: Vec<usize>,
    used: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub fn upkeep(&mut self, n: i64, turn: usize) {
        self.settle(n, turn);
    }

    pub fn rollback(&mut self, n: i64, turn: usize) {
        self.settle(n, turn);
    }

    // Anything recorded at or beyond `turn` belongs to a branch that is no
    // longer being explored.
    fn settle(&mut self, n: i64, turn: usize) {
        self.previous.truncate(turn);
        self.previous.push(n);
        self.pushes.retain(|&t| t < turn);
    }

    /// History entries the button may concatenate onto the current number,
    /// as `(index, value)`.
    ///
    /// The last consumed entry is always offered again, even when its value
    /// is 0. After that come the entries recorded since the last firing.
    pub fn eligible(&self) -> Vec<(usize, i64)> {
        let first_fresh = self.pushes.last().map_or(0, |&t| t + 1);

        let reused = self.used.and_then(|i| self.previous.get(i).map(|&v| (i, v)));
        let fresh = self.previous
            .iter()
            .cloned()
            .enumerate()
            .skip(first_fresh);

        reused.into_iter().chain(fresh).collect()
    }

    pub fn apply(&mut self, n: i64, turn: usize) -> Vec<Candidate> {
        let candidates = self.eligible()
            .into_iter()
            .filter_map(|(index, v)| concat(n, v).map(|value| Candidate { index, value }))
            .collect();
        self.pushes.push(turn);
        candidates
    }

    pub fn used(&self) -> Option<usize> {
        self.used
    }

    pub fn set_used(&mut self, used: Option<usize>) {
        self.used = used;
    }

    pub fn previous(&self) -> &[i64] {
        &self.previous
    }

    pub fn label(&self, index: usize) -> String {
        match self.previous.get(index) {
            Some(v) => format!("Store({})", v),
            None => "Store".to_owned(),
        }
    }
}
