use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ErrorKind {
    InvalidInitialValue { n: i64, limit: usize },
    InvalidGoal { n: i64, limit: usize },
    NoButtons,
    InvalidPortal { entrance: u32, exit: u32 },
    InvalidDigitLimit,
    DivisionByZero,
    NegativeAppend(i64),
    InvalidReplace { from: String, to: String },
    InvalidButton(String),
}

impl Error {
    pub fn invalid_initial_value(n: i64, limit: usize) -> Self {
        Error { kind: ErrorKind::InvalidInitialValue { n, limit } }
    }

    pub fn invalid_goal(n: i64, limit: usize) -> Self {
        Error { kind: ErrorKind::InvalidGoal { n, limit } }
    }

    pub fn no_buttons() -> Self {
        Error { kind: ErrorKind::NoButtons }
    }

    pub fn invalid_portal(entrance: u32, exit: u32) -> Self {
        Error { kind: ErrorKind::InvalidPortal { entrance, exit } }
    }

    pub fn invalid_digit_limit() -> Self {
        Error { kind: ErrorKind::InvalidDigitLimit }
    }

    pub fn division_by_zero() -> Self {
        Error { kind: ErrorKind::DivisionByZero }
    }

    pub fn negative_append(n: i64) -> Self {
        Error { kind: ErrorKind::NegativeAppend(n) }
    }

    pub fn invalid_replace(from: &str, to: &str) -> Self {
        Error {
            kind: ErrorKind::InvalidReplace {
                from: from.to_owned(),
                to: to.to_owned(),
            },
        }
    }

    pub fn invalid_button(s: &str) -> Self {
        Error { kind: ErrorKind::InvalidButton(s.to_owned()) }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        use self::ErrorKind::*;
        match self.kind {
            InvalidInitialValue { n, limit } => {
                write!(f,
                       "Initial value {} is out of range; \
                        A value at most {} characters wide was expected.",
                       n,
                       limit)
            }
            InvalidGoal { n, limit } => {
                write!(f,
                       "Goal {} is out of range; \
                        A value at most {} characters wide was expected.",
                       n,
                       limit)
            }
            NoButtons => write!(f, "At least one button is required."),
            InvalidPortal { entrance, exit } => {
                write!(f,
                       "Portal ({}, {}) is malformed; \
                        2 <= entrance and 1 <= exit < entrance was expected.",
                       entrance,
                       exit)
            }
            InvalidDigitLimit => write!(f, "Digit limit must be at least 1."),
            DivisionByZero => write!(f, "Division button must not divide by 0."),
            NegativeAppend(n) => write!(f, "Append button cannot append negative value {}.", n),
            InvalidReplace { ref from, ref to } => {
                write!(f,
                       "Replace button {:?}=>{:?} is malformed; \
                        Non-empty digit strings were expected.",
                       from,
                       to)
            }
            InvalidButton(ref s) => write!(f, "Unrecognized button {:?}.", s),
        }
    }
}

impl error::Error for Error {
    fn description(&self) -> &str {
        use self::ErrorKind::*;
        match self.kind {
            InvalidInitialValue { .. } => "Initial value is out of range",
            InvalidGoal { .. } => "Goal is out of range",
            NoButtons => "No buttons were given",
            InvalidPortal { .. } => "Portal is malformed",
            InvalidDigitLimit => "Digit limit is zero",
            DivisionByZero => "Division by zero",
            NegativeAppend(_) => "Append of a negative value",
            InvalidReplace { .. } => "Replace pattern is malformed",
            InvalidButton(_) => "Unrecognized button",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_mentions_offending_value() {
        let test_cases = [
            (Error::invalid_initial_value(1234567, 6), "1234567"),
            (Error::invalid_goal(-99999, 5), "-99999"),
            (Error::invalid_portal(4, 4), "(4, 4)"),
            (Error::negative_append(-3), "-3"),
            (Error::invalid_button("?7"), "\"?7\""),
        ];

        for &(ref error, expected) in &test_cases {
            let message = error.to_string();
            assert!(message.contains(expected),
                    "Expected {:?} to mention {:?}",
                    message,
                    expected);
        }
    }
}
