use thiserror::Error;
use time::Date;
use tracing::warn;

/// A start/end date pair that is never out of order.  Setting either end so
/// that the pair would be inverted clears both ends and reports the
/// violation instead of clamping.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DateRange {
    start: Option<Date>,
    end: Option<Date>,
}

impl DateRange {
    pub(crate) fn new() -> DateRange {
        DateRange::default()
    }

    pub(crate) fn start(&self) -> Option<Date> {
        self.start
    }

    pub(crate) fn end(&self) -> Option<Date> {
        self.end
    }

    pub(crate) fn set_start(&mut self, date: Option<Date>) -> Result<(), RangeError> {
        if let (Some(start), Some(end)) = (date, self.end) {
            if start > end {
                warn!(%start, %end, "start date after end date; clearing range");
                self.reset();
                return Err(RangeError::StartAfterEnd);
            }
        }
        self.start = date;
        Ok(())
    }

    pub(crate) fn set_end(&mut self, date: Option<Date>) -> Result<(), RangeError> {
        if let (Some(start), Some(end)) = (self.start, date) {
            if end < start {
                warn!(%start, %end, "end date before start date; clearing range");
                self.reset();
                return Err(RangeError::EndBeforeStart);
            }
        }
        self.end = date;
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum RangeError {
    #[error("Start date cannot be after end date. Please select valid dates.")]
    StartAfterEnd,
    #[error("End date cannot be before start date. Please select valid dates.")]
    EndBeforeStart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::date;

    #[test]
    fn test_end_before_start_clears_both() {
        let mut range = DateRange::new();
        assert_eq!(range.set_start(Some(date!(2025 - 01 - 10))), Ok(()));
        assert_eq!(
            range.set_end(Some(date!(2025 - 01 - 05))),
            Err(RangeError::EndBeforeStart)
        );
        assert_eq!(range.start(), None);
        assert_eq!(range.end(), None);
    }

    #[test]
    fn test_start_after_end_clears_both() {
        let mut range = DateRange::new();
        assert_eq!(range.set_end(Some(date!(2025 - 01 - 05))), Ok(()));
        assert_eq!(
            range.set_start(Some(date!(2025 - 01 - 06))),
            Err(RangeError::StartAfterEnd)
        );
        assert_eq!(range, DateRange::new());
    }

    #[test]
    fn test_same_day_allowed() {
        let mut range = DateRange::new();
        assert_eq!(range.set_start(Some(date!(2025 - 01 - 05))), Ok(()));
        assert_eq!(range.set_end(Some(date!(2025 - 01 - 05))), Ok(()));
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_clearing_one_end() {
        let mut range = DateRange::new();
        assert_eq!(range.set_start(Some(date!(2025 - 01 - 01))), Ok(()));
        assert_eq!(range.set_end(Some(date!(2025 - 02 - 01))), Ok(()));
        assert_eq!(range.set_start(None), Ok(()));
        assert_eq!(range.start(), None);
        assert_eq!(range.end(), Some(date!(2025 - 02 - 01)));
        range.reset();
        assert_eq!(range, DateRange::new());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RangeError::EndBeforeStart.to_string(),
            "End date cannot be before start date. Please select valid dates."
        );
    }

    #[derive(Clone, Copy, Debug)]
    enum Op {
        Start(Option<i32>),
        End(Option<i32>),
        Reset,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let day = proptest::option::of(0i32..60);
        prop_oneof![
            day.clone().prop_map(Op::Start),
            day.prop_map(Op::End),
            Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn range_never_inverted(ops in proptest::collection::vec(op_strategy(), 0..32)) {
            let base = date!(2025 - 01 - 01);
            let to_date = |d: Option<i32>| d.map(|n| base + time::Duration::days(n.into()));
            let mut range = DateRange::new();
            for op in ops {
                let result = match op {
                    Op::Start(d) => range.set_start(to_date(d)),
                    Op::End(d) => range.set_end(to_date(d)),
                    Op::Reset => {
                        range.reset();
                        Ok(())
                    }
                };
                if result.is_err() {
                    prop_assert_eq!(range, DateRange::new());
                }
                if let (Some(start), Some(end)) = (range.start(), range.end()) {
                    prop_assert!(start <= end);
                }
            }
        }
    }
}
