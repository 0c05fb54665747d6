use error::Error;

/// A portal pulls the digit sitting `entrance` places from the right out of a
/// number and adds it back in `exit` places from the right. The rule repeats
/// until the number is narrower than the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    entrance: u32,
    exit: u32,
}

impl Portal {
    pub fn new(entrance: u32, exit: u32) -> Result<Self, Error> {
        // entrance == 1 has no digit to the right of the window to keep, and
        // exit >= entrance can map a number onto itself forever.
        if entrance < 2 || exit < 1 || exit >= entrance || entrance > 18 {
            Err(Error::invalid_portal(entrance, exit))
        } else {
            Ok(Portal { entrance, exit })
        }
    }

    pub fn entrance(&self) -> u32 {
        self.entrance
    }

    pub fn exit(&self) -> u32 {
        self.exit
    }

    pub fn apply(&self, n: i64) -> Option<i64> {
        apply_portal(n, self.entrance, self.exit)
    }
}

/// Runs `n` through the portal until it is narrower than `entrance` digits.
///
/// The sign is kept aside and the rule runs on the magnitude. Returns `None`
/// if the widths could never settle (`exit` outside `1..entrance`) or if an
/// intermediate value overflows.
pub fn apply_portal(n: i64, entrance: u32, exit: u32) -> Option<i64> {
    if exit == 0 || exit >= entrance {
        return None;
    }
    let sign = n.signum();
    let mut m = n.checked_abs()?;

    let window = 10i64.checked_pow(entrance - 1)?;
    let landing = 10i64.checked_pow(exit - 1)?;

    // Each pass removes a digit from above the exit and adds it back lower
    // down, so the magnitude strictly shrinks.
    while m >= window {
        let high = m / window / 10;
        let pulled = (m / window) % 10;
        let low = m % window;
        m = high.checked_mul(window)?.checked_add(low)?.checked_add(pulled * landing)?;
    }

    Some(m * sign)
}

#[cfg(test)]
mod tests {
    use super::{apply_portal, Portal};

    #[test]
    fn narrower_than_entrance_is_untouched() {
        let test_cases = [0, 7, 99, 750, 999, -999];

        for &n in &test_cases {
            assert_eq!(apply_portal(n, 4, 2), Some(n));
        }
    }

    #[test]
    fn pulls_digit_at_entrance() {
        let test_cases = [
            // exactly entrance digits wide: the leading digit moves.
            ((1234, 4, 2), 244),
            ((1000, 4, 1), 1),
            // one digit wider.
            ((12345, 4, 2), 375),
            ((12345, 4, 3), 645),
            // several passes.
            ((4444, 4, 2), 484),
            ((98765, 3, 1), 89),
            ((-1234, 4, 2), -244),
        ];

        for &((n, entrance, exit), expected) in &test_cases {
            assert_eq!(apply_portal(n, entrance, exit),
                       Some(expected),
                       "apply_portal({}, {}, {})",
                       n,
                       entrance,
                       exit);
        }
    }

    #[test]
    fn rejects_malformed_widths() {
        assert!(Portal::new(1, 1).is_err());
        assert!(Portal::new(4, 0).is_err());
        assert!(Portal::new(4, 4).is_err());
        assert!(Portal::new(3, 5).is_err());
        assert!(Portal::new(4, 2).is_ok());
    }
}
