use num::{self, Integer};
use regex::Regex;

use std::fmt;
use std::str::FromStr;

use error::Error;
use history::History;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    inner: ButtonKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ButtonKind {
    Add(i64),
    Mul(i64),
    Div(i64),
    Append(i64),
    Del,
    Replace { from: String, to: String },
    Reverse,
    Mirror,
    Inv,
    Shift(Direction),
    Sum,
    Store(History),
    Mutator { amount: i64, targets: Vec<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// One number a button offers for the next turn. `index` tells a multi-way
/// button which of its choices produced `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub value: i64,
}

impl Candidate {
    fn single(value: i64) -> Self {
        Candidate { index: 0, value }
    }
}

impl Button {
    pub fn add(n: i64) -> Self {
        Button { inner: ButtonKind::Add(n) }
    }

    pub fn sub(n: i64) -> Self {
        Button::add(-n)
    }

    pub fn mul(n: i64) -> Self {
        Button { inner: ButtonKind::Mul(n) }
    }

    pub fn div(n: i64) -> Result<Self, Error> {
        if n == 0 {
            Err(Error::division_by_zero())
        } else {
            Ok(Button { inner: ButtonKind::Div(n) })
        }
    }

    pub fn append(n: i64) -> Result<Self, Error> {
        if n < 0 {
            Err(Error::negative_append(n))
        } else {
            Ok(Button { inner: ButtonKind::Append(n) })
        }
    }

    pub fn del() -> Self {
        Button { inner: ButtonKind::Del }
    }

    pub fn replace(from: &str, to: &str) -> Result<Self, Error> {
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if is_digits(from) && is_digits(to) {
            Ok(Button {
                inner: ButtonKind::Replace {
                    from: from.to_owned(),
                    to: to.to_owned(),
                },
            })
        } else {
            Err(Error::invalid_replace(from, to))
        }
    }

    pub fn reverse() -> Self {
        Button { inner: ButtonKind::Reverse }
    }

    pub fn mirror() -> Self {
        Button { inner: ButtonKind::Mirror }
    }

    pub fn inv() -> Self {
        Button { inner: ButtonKind::Inv }
    }

    pub fn shift(direction: Direction) -> Self {
        Button { inner: ButtonKind::Shift(direction) }
    }

    pub fn sum() -> Self {
        Button { inner: ButtonKind::Sum }
    }

    pub fn store() -> Self {
        Button { inner: ButtonKind::Store(History::new()) }
    }

    pub fn mutator(amount: i64) -> Self {
        Button {
            inner: ButtonKind::Mutator {
                amount,
                targets: vec![],
            },
        }
    }

    /// The plain integer operand, for the buttons a mutator may adjust.
    pub fn operand(&self) -> Option<i64> {
        match self.inner {
            ButtonKind::Add(m) |
            ButtonKind::Mul(m) |
            ButtonKind::Div(m) |
            ButtonKind::Append(m) |
            ButtonKind::Mutator { amount: m, .. } => Some(m),
            _ => None,
        }
    }

    /// Wrapping, so that shifting by `delta` and then by `-delta` always
    /// restores the operand exactly.
    pub fn shift_operand(&mut self, delta: i64) {
        match self.inner {
            ButtonKind::Add(ref mut m) |
            ButtonKind::Mul(ref mut m) |
            ButtonKind::Div(ref mut m) |
            ButtonKind::Append(ref mut m) |
            ButtonKind::Mutator { amount: ref mut m, .. } => *m = m.wrapping_add(delta),
            _ => (),
        }
    }

    pub fn mutator_amount(&self) -> Option<i64> {
        match self.inner {
            ButtonKind::Mutator { amount, .. } => Some(amount),
            _ => None,
        }
    }

    pub fn targets(&self) -> &[usize] {
        match self.inner {
            ButtonKind::Mutator { ref targets, .. } => &targets[..],
            _ => &[],
        }
    }

    pub(crate) fn set_targets(&mut self, new_targets: Vec<usize>) {
        if let ButtonKind::Mutator { ref mut targets, .. } = self.inner {
            *targets = new_targets;
        }
    }

    pub fn history(&self) -> Option<&History> {
        match self.inner {
            ButtonKind::Store(ref history) => Some(history),
            _ => None,
        }
    }

    pub fn history_mut(&mut self) -> Option<&mut History> {
        match self.inner {
            ButtonKind::Store(ref mut history) => Some(history),
            _ => None,
        }
    }

    pub fn upkeep(&mut self, n: i64, turn: usize) {
        if let Some(history) = self.history_mut() {
            history.upkeep(n, turn);
        }
    }

    pub fn rollback(&mut self, n: i64, turn: usize) {
        if let Some(history) = self.history_mut() {
            history.rollback(n, turn);
        }
    }

    /// Numbers this button offers from `n`. Invalid results (inexact
    /// division, overflow, nothing left to delete) are simply absent.
    ///
    /// A mutator offers `n` itself; adjusting the other buttons is left to
    /// the caller, which knows them.
    pub fn apply(&mut self, n: i64, turn: usize) -> Vec<Candidate> {
        match self.inner {
            ButtonKind::Store(ref mut history) => history.apply(n, turn),
            ButtonKind::Mutator { .. } => vec![Candidate::single(n)],
            ref kind => kind.step(n).map(Candidate::single).into_iter().collect(),
        }
    }

    /// Label for the move that picked candidate `index`.
    pub fn label(&self, index: usize) -> String {
        match self.inner {
            ButtonKind::Store(ref history) => history.label(index),
            _ => self.to_string(),
        }
    }
}

impl ButtonKind {
    fn step(&self, n: i64) -> Option<i64> {
        use self::ButtonKind::*;
        match *self {
            Add(m) => n.checked_add(m),
            Mul(m) => n.checked_mul(m),
            Div(m) => if m != 0 && n.wrapping_rem(m) == 0 {
                n.checked_div(m)
            } else {
                None
            },
            Append(m) => concat(n, m),
            Del => map_digits(n, |s| if s.len() > 1 {
                Some(s[..s.len() - 1].to_owned())
            } else {
                None
            }),
            Replace { ref from, ref to } => map_digits(n, |s| Some(s.replace(from.as_str(), to))),
            Reverse => map_digits(n, |s| Some(s.chars().rev().collect())),
            Mirror => map_digits(n, |s| Some(s.chars().chain(s.chars().rev()).collect())),
            Inv => map_digits(n, |s| {
                Some(s.bytes().map(|b| char::from(b'0' + (10 - (b - b'0')) % 10)).collect())
            }),
            Shift(Direction::Left) => map_digits(n, |s| Some(format!("{}{}", &s[1..], &s[..1]))),
            Shift(Direction::Right) => {
                map_digits(n, |s| Some(format!("{}{}", &s[s.len() - 1..], &s[..s.len() - 1])))
            }
            Sum => {
                let mut rest = n.unsigned_abs();
                let mut total = 0i64;
                while rest != 0 {
                    let (q, r) = rest.div_rem(&10);
                    total += r as i64;
                    rest = q;
                }
                Some(total * n.signum())
            }
            Store(_) | Mutator { .. } => None,
        }
    }
}

/// Rewrites the decimal digits of `n`'s magnitude, keeping its sign.
fn map_digits<F>(n: i64, f: F) -> Option<i64>
    where F: FnOnce(&str) -> Option<String>
{
    let digits = f(&n.unsigned_abs().to_string())?;
    let magnitude: i64 = digits.parse().ok()?;
    Some(if n < 0 { -magnitude } else { magnitude })
}

/// Count of decimal digits in `m`.
pub(crate) fn digit_count(m: u64) -> usize {
    let mut count = 1;
    let mut rest = m / 10;
    while rest != 0 {
        count += 1;
        rest /= 10;
    }
    count
}

/// Characters `n` takes up on a calculator display, minus sign included.
pub(crate) fn width(n: i64) -> usize {
    digit_count(n.unsigned_abs()) + if n < 0 { 1 } else { 0 }
}

/// Writes the digits of `v` after those of `n`: `concat(12, 3) == 123`,
/// `concat(-1, 5) == -15`. `v` must not be negative.
pub(crate) fn concat(n: i64, v: i64) -> Option<i64> {
    if v < 0 {
        return None;
    }
    let scale = num::checked_pow(10i64, digit_count(v as u64))?;
    n.checked_mul(scale)?.checked_add(if n < 0 { -v } else { v })
}

impl FromStr for Button {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref ADD_PATTERN: Regex = Regex::new(r"^([+-])(\d+)$").unwrap();
            static ref MUL_PATTERN: Regex = Regex::new(r"^([*/])(-?\d+)$").unwrap();
            static ref APPEND_PATTERN: Regex = Regex::new(r"^(0|[1-9]\d*)$").unwrap();
            static ref RPC_PATTERN: Regex = Regex::new(r"^(\d+)=>(\d+)$").unwrap();
            static ref MUTATOR_PATTERN: Regex = Regex::new(r"^\[([+-])\](\d+)$").unwrap();
        }

        let invalid = || Error::invalid_button(s);
        let number = |digits: &str| digits.parse::<i64>().map_err(|_| invalid());

        match s {
            "<<" => return Ok(Button::del()),
            "Reverse" => return Ok(Button::reverse()),
            "Mirror" => return Ok(Button::mirror()),
            "Inv10" => return Ok(Button::inv()),
            "<Shift" => return Ok(Button::shift(Direction::Left)),
            "Shift>" => return Ok(Button::shift(Direction::Right)),
            "SUM" => return Ok(Button::sum()),
            "Store" => return Ok(Button::store()),
            _ => (),
        }

        if let Some(captures) = ADD_PATTERN.captures(s) {
            let n = number(&captures[2])?;
            Ok(if &captures[1] == "+" { Button::add(n) } else { Button::sub(n) })
        } else if let Some(captures) = MUL_PATTERN.captures(s) {
            let n = number(&captures[2])?;
            if &captures[1] == "*" {
                Ok(Button::mul(n))
            } else {
                Button::div(n)
            }
        } else if APPEND_PATTERN.is_match(s) {
            Button::append(number(s)?)
        } else if let Some(captures) = RPC_PATTERN.captures(s) {
            Button::replace(&captures[1], &captures[2])
        } else if let Some(captures) = MUTATOR_PATTERN.captures(s) {
            let n = number(&captures[2])?;
            Ok(Button::mutator(if &captures[1] == "+" { n } else { -n }))
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        use self::ButtonKind::*;

        match self.inner {
            Add(n) => {
                if n >= 0 {
                    write!(f, "+{}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Mul(n) => write!(f, "*{}", n),
            Div(n) => write!(f, "/{}", n),
            Append(n) => write!(f, "{}", n),
            Del => write!(f, "<<"),
            Replace { ref from, ref to } => write!(f, "{}=>{}", from, to),
            Reverse => write!(f, "Reverse"),
            Mirror => write!(f, "Mirror"),
            Inv => write!(f, "Inv10"),
            Shift(Direction::Left) => write!(f, "<Shift"),
            Shift(Direction::Right) => write!(f, "Shift>"),
            Sum => write!(f, "SUM"),
            Store(_) => write!(f, "Store"),
            Mutator { amount, .. } => {
                if amount >= 0 {
                    write!(f, "[+]{}", amount)
                } else {
                    write!(f, "[-]{}", -amount)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{concat, width, Button, ButtonKind, Direction};

    fn step(button: &str, n: i64) -> Option<i64> {
        let mut button = button.parse::<Button>().unwrap();
        let candidates = button.apply(n, 0);
        assert!(candidates.len() <= 1);
        candidates.first().map(|c| c.value)
    }

    #[test]
    fn parse_arithmetic() {
        let test_cases = [
            ("+1", ButtonKind::Add(1)),
            ("+123456", ButtonKind::Add(123456)),
            ("-12", ButtonKind::Add(-12)),
            ("*3", ButtonKind::Mul(3)),
            ("*-2", ButtonKind::Mul(-2)),
            ("/5", ButtonKind::Div(5)),
            ("/-5", ButtonKind::Div(-5)),
            ("4", ButtonKind::Append(4)),
            ("0", ButtonKind::Append(0)),
            ("12", ButtonKind::Append(12)),
            ("[+]2", ButtonKind::Mutator { amount: 2, targets: vec![] }),
            ("[-]1", ButtonKind::Mutator { amount: -1, targets: vec![] }),
        ];

        for &(input, ref expected) in &test_cases {
            match input.parse::<Button>() {
                Ok(Button { ref inner }) if inner == expected => (),
                something_else => {
                    panic!("Parsed {:?}, Expected Ok(Button {{ inner: {:?} }}); Got {:?} instead",
                           input,
                           expected,
                           something_else)
                }
            }
        }
    }

    #[test]
    fn parse_digit_buttons() {
        let test_cases = [
            ("<<", Button::del()),
            ("Reverse", Button::reverse()),
            ("Mirror", Button::mirror()),
            ("Inv10", Button::inv()),
            ("<Shift", Button::shift(Direction::Left)),
            ("Shift>", Button::shift(Direction::Right)),
            ("SUM", Button::sum()),
            ("Store", Button::store()),
        ];

        for &(input, ref expected) in &test_cases {
            assert_eq!(input.parse::<Button>().as_ref(), Ok(expected));
        }
    }

    #[test]
    fn parse_rpc() {
        let test_cases = [("1=>2", ("1", "2")), ("12=>34", ("12", "34")), ("0=>00", ("0", "00"))];

        for &(input, (from, to)) in &test_cases {
            assert_eq!(input.parse::<Button>(), Button::replace(from, to));
        }
    }

    #[test]
    fn parse_err() {
        let test_cases = [
            "a", "1a", "1+1", "1=>-1", "-1=>1", "1=>2a", "<<1", "+1+1", "1=>", "=>1", "/0", "04",
            "[+]", "store", "+99999999999999999999",
        ];

        for input in &test_cases {
            assert!(input.parse::<Button>().is_err(), "Parsed {:?} successfully", input);
        }
    }

    #[test]
    fn display_round_trips() {
        let test_cases = [
            "+6", "-3", "*3", "/2", "4", "<<", "13=>31", "Reverse", "Mirror", "Inv10", "<Shift",
            "Shift>", "SUM", "Store", "[+]1", "[-]2",
        ];

        for input in &test_cases {
            let button = input.parse::<Button>().unwrap();
            assert_eq!(&button.to_string(), input);
        }
    }

    #[test]
    fn constructors_reject_bad_operands() {
        assert!(Button::div(0).is_err());
        assert!(Button::append(-1).is_err());
        assert!(Button::replace("", "1").is_err());
        assert!(Button::replace("1", "x").is_err());
    }

    #[test]
    fn apply_stateless() {
        let test_cases = [
            (("+6", 4), Some(10)),
            (("-3", 1), Some(-2)),
            (("*3", 906), Some(2718)),
            (("/2", 10), Some(5)),
            (("/3", 10), None),
            (("/-2", -8), Some(4)),
            (("4", 10), Some(104)),
            (("4", 0), Some(4)),
            (("4", -1), Some(-14)),
            (("<<", 123), Some(12)),
            (("<<", -45), Some(-4)),
            (("<<", 7), None),
            (("<<", -7), None),
            (("1=>2", 1213), Some(2223)),
            (("13=>0", 1313), Some(0)),
            (("Reverse", 120), Some(21)),
            (("Reverse", -12), Some(-21)),
            (("Mirror", 12), Some(1221)),
            (("Inv10", 104), Some(906)),
            (("Inv10", 5), Some(5)),
            (("<Shift", 1234), Some(2341)),
            (("Shift>", 1234), Some(4123)),
            (("Shift>", -12), Some(-21)),
            (("SUM", 1234), Some(10)),
            (("SUM", -55), Some(-10)),
            (("*2", i64::max_value()), None),
        ];

        for &((button, n), expected) in &test_cases {
            assert_eq!(step(button, n), expected, "{} applied to {}", button, n);
        }
    }

    #[test]
    fn mutator_targets_and_operands() {
        let mut add = Button::add(2);
        add.shift_operand(3);
        assert_eq!(add.operand(), Some(5));
        add.shift_operand(-3);
        assert_eq!(add, Button::add(2));

        let mut reverse = Button::reverse();
        reverse.shift_operand(3);
        assert_eq!(reverse.operand(), None);
        assert_eq!(reverse, Button::reverse());

        let mut mutator = Button::mutator(1);
        assert_eq!(mutator.apply(42, 0).len(), 1);
        mutator.set_targets(vec![0, 2]);
        assert_eq!(mutator.targets(), &[0, 2]);
        assert_eq!(mutator.mutator_amount(), Some(1));
    }

    #[test]
    fn digits_helpers() {
        assert_eq!(width(0), 1);
        assert_eq!(width(999999), 6);
        assert_eq!(width(-99999), 6);
        assert_eq!(width(1000000), 7);
        assert_eq!(concat(12, 3), Some(123));
        assert_eq!(concat(0, 7), Some(7));
        assert_eq!(concat(-1, 5), Some(-15));
        assert_eq!(concat(5, -1), None);
    }
}
