use parser::FixRecord;

/// The last successfully mapped fix.
///
/// Owned by whoever drives the parser; a failed parse leaves the previous
/// fix in place.
#[derive(Debug, Clone, Default)]
pub struct LastFix {
    fix: Option<FixRecord>,
    accepted: u64,
    rejected: u64,
}

impl LastFix {
    pub fn new() -> Self {
        LastFix::default()
    }

    /// Record the outcome of one parse and return the last known good fix.
    pub fn update<E>(&mut self, result: &Result<FixRecord, E>) -> Option<&FixRecord> {
        match *result {
            Ok(fix) => {
                self.fix = Some(fix);
                self.accepted += 1;
            }
            Err(_) => self.rejected += 1,
        }
        self.fix.as_ref()
    }

    #[inline]
    pub fn get(&self) -> Option<&FixRecord> {
        self.fix.as_ref()
    }

    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::map;

    #[test]
    fn failures_keep_last_good_fix() {
        let mut last = LastFix::new();
        assert!(last.get().is_none());

        let good = map(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47");
        let expected = good.unwrap();
        assert_eq!(last.update(&good), Some(&expected));

        let bad = map(b"$GPGGA,123519,4807.0");
        assert!(bad.is_err());
        assert_eq!(last.update(&bad), Some(&expected));
        assert_eq!(last.get(), Some(&expected));
        assert_eq!((last.accepted(), last.rejected()), (1, 1));
    }

    #[test]
    fn newer_fix_replaces_older() {
        let mut last = LastFix::new();
        last.update(&map(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47"));
        let newer = map(b"$GNGGA,,,,,,,,,,,,,,*48");
        last.update(&newer);
        assert_eq!(last.get().and_then(|f| f.hour), None);
    }
}
