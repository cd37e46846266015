use chrono::NaiveDate;

/// Tests whether two date ranges intersect, closed-interval semantics:
/// a range ending on day X overlaps one starting on day X.
///
/// A `None` lower bound means "no start" (precedes everything); a
/// `None` upper bound means "no end" (outlasts everything). Two ranges
/// overlap iff each one starts no later than the other ends, where a
/// missing endpoint makes its comparison vacuously true.
///
/// Total and symmetric; used to reject a new billing rate whose range
/// intersects an existing one for the same project.
pub fn overlaps(
    a_from: Option<NaiveDate>,
    a_to: Option<NaiveDate>,
    b_from: Option<NaiveDate>,
    b_to: Option<NaiveDate>,
) -> bool {
    let a_starts_in_time = match (a_from, b_to) {
        (Some(from), Some(to)) => from <= to,
        _ => true,
    };
    let b_starts_in_time = match (b_from, a_to) {
        (Some(from), Some(to)) => from <= to,
        _ => true,
    };
    a_starts_in_time && b_starts_in_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> Option<NaiveDate> {
        Some(NaiveDate::from_ymd_opt(y, m, day).unwrap())
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!overlaps(
            d(2019, 10, 1),
            d(2019, 10, 30),
            d(2019, 11, 1),
            d(2019, 11, 20)
        ));
    }

    #[test]
    fn touching_endpoints_overlap() {
        assert!(overlaps(
            d(2019, 10, 1),
            d(2019, 10, 30),
            d(2019, 10, 30),
            d(2019, 11, 20)
        ));
    }

    #[test]
    fn contained_range_overlaps() {
        assert!(overlaps(
            d(2019, 1, 1),
            d(2019, 12, 31),
            d(2019, 6, 1),
            d(2019, 6, 30)
        ));
    }

    #[test]
    fn fully_unbounded_range_overlaps_everything() {
        assert!(overlaps(None, None, d(2019, 10, 1), d(2019, 10, 30)));
        assert!(overlaps(None, None, None, None));
    }

    #[test]
    fn open_end_overlaps_any_later_range() {
        assert!(overlaps(d(2019, 1, 1), None, d(2030, 1, 1), d(2030, 12, 31)));
    }

    #[test]
    fn open_start_does_not_reach_past_its_end() {
        assert!(!overlaps(None, d(2019, 1, 31), d(2019, 2, 1), None));
    }

    #[test]
    fn is_symmetric() {
        let cases = [
            (d(2019, 10, 1), d(2019, 10, 30), d(2019, 10, 30), d(2019, 11, 20)),
            (d(2019, 10, 1), d(2019, 10, 30), d(2019, 11, 1), d(2019, 11, 20)),
            (None, None, d(2019, 10, 1), d(2019, 10, 30)),
            (d(2019, 1, 1), None, None, d(2018, 12, 31)),
        ];
        for (a_from, a_to, b_from, b_to) in cases {
            assert_eq!(
                overlaps(a_from, a_to, b_from, b_to),
                overlaps(b_from, b_to, a_from, a_to),
            );
        }
    }
}
