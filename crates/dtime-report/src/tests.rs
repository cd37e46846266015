use crate::basis::{basis_for_period, build_report, ReportRequest};
use crate::error::ReportError;
use crate::rates::{admit_rate, validate_project_rates, RateKind, RatePeriod};
use chrono::NaiveDate;
use dtime_common::types::Contribution;
use rust_decimal::Decimal;
use std::collections::HashMap;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    Some(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn hourly_row(
    company: &str,
    project: &str,
    user: &str,
    hours: &str,
    customer_rate: Option<&str>,
    subcontractor_rate: Option<&str>,
) -> Contribution {
    Contribution {
        company_id: company.to_string(),
        project_id: project.to_string(),
        user_id: user.to_string(),
        hours: dec(hours),
        customer_rate: customer_rate.map(dec),
        subcontractor_rate: subcontractor_rate.map(dec),
        fixed_amount: None,
        is_fixed_rate: false,
    }
}

fn fixed_row(
    company: &str,
    project: &str,
    user: &str,
    hours: &str,
    amount: Option<&str>,
) -> Contribution {
    Contribution {
        company_id: company.to_string(),
        project_id: project.to_string(),
        user_id: user.to_string(),
        hours: dec(hours),
        customer_rate: None,
        subcontractor_rate: None,
        fixed_amount: amount.map(dec),
        is_fixed_rate: true,
    }
}

/// Two projects of one company over a period with 160 workable hours.
fn invoice_fixture() -> Vec<Contribution> {
    vec![
        hourly_row("c1", "p1", "u1", "80", Some("0.1"), Some("0.0125")),
        hourly_row("c1", "p1", "u2", "40", Some("0.05"), None),
        fixed_row("c1", "p1", "u3", "40", Some("1")),
        hourly_row("c1", "p2", "u1", "100", Some("0.1"), None),
        fixed_row("c1", "p2", "u4", "60", Some("1")),
    ]
}

#[test]
fn invoice_basis_end_to_end() {
    let basis = build_report(&invoice_fixture(), Decimal::from(160)).unwrap();

    assert_eq!(basis.companies.len(), 1);
    let company = &basis.companies[0];
    assert_eq!(company.company_id, "c1");
    assert_eq!(company.totals.hours, Decimal::from(320));
    assert_eq!(company.totals.amount_customer, Decimal::from(20));
    assert_eq!(company.totals.amount_subcontractor, Decimal::from(1));
    assert_eq!(company.totals.amount_fixed, Decimal::from(2));

    let p1 = &company.projects[0];
    assert_eq!(p1.project_id, "p1");
    assert_eq!(p1.totals.hours, Decimal::from(160));
    assert_eq!(p1.totals.amount_customer, Decimal::from(10));
    assert_eq!(p1.totals.amount_subcontractor, Decimal::from(1));
    assert_eq!(p1.totals.amount_fixed, Decimal::from(1));
    // 160 of 160 workable hours.
    assert_eq!(p1.share_of_workable, dec("100.00"));

    let p2 = &company.projects[1];
    assert_eq!(p2.totals.hours, Decimal::from(160));
    assert_eq!(p2.totals.amount_customer, Decimal::from(10));
    assert_eq!(p2.totals.amount_subcontractor, Decimal::ZERO);
    assert_eq!(p2.totals.amount_fixed, Decimal::from(1));

    assert_eq!(basis.totals.hours, Decimal::from(320));
    assert_eq!(basis.share_of_workable, dec("200.00"));
}

#[test]
fn parent_totals_equal_sum_of_children() {
    let rows = vec![
        hourly_row("c1", "p1", "u1", "37.25", Some("812.50"), None),
        hourly_row("c1", "p1", "u2", "0.75", Some("812.50"), Some("310.10")),
        hourly_row("c1", "p2", "u1", "12.5", Some("950"), None),
        hourly_row("c2", "p3", "u3", "160", None, Some("401.99")),
        fixed_row("c2", "p3", "u4", "8", Some("12000")),
    ];
    let basis = build_report(&rows, Decimal::from(168)).unwrap();

    for company in &basis.companies {
        let mut project_sum = crate::basis::MonetaryAggregate::ZERO;
        for project in &company.projects {
            let mut user_sum = crate::basis::MonetaryAggregate::ZERO;
            for user in &project.users {
                user_sum = sum(user_sum, user.totals);
            }
            assert_eq!(project.totals, user_sum, "project {}", project.project_id);
            project_sum = sum(project_sum, project.totals);
        }
        assert_eq!(company.totals, project_sum, "company {}", company.company_id);
    }
}

fn sum(
    mut a: crate::basis::MonetaryAggregate,
    b: crate::basis::MonetaryAggregate,
) -> crate::basis::MonetaryAggregate {
    a.hours += b.hours;
    a.amount_customer += b.amount_customer;
    a.amount_subcontractor += b.amount_subcontractor;
    a.amount_fixed += b.amount_fixed;
    a
}

#[test]
fn rate_multiplication_is_exact_decimal() {
    let rows = vec![hourly_row("c1", "p1", "u1", "0.1", Some("0.2"), None)];
    let basis = build_report(&rows, Decimal::from(160)).unwrap();
    assert_eq!(basis.totals.amount_customer, dec("0.02"));
}

#[test]
fn missing_rates_contribute_hours_only() {
    let rows = vec![hourly_row("c1", "p1", "u1", "40", None, None)];
    let basis = build_report(&rows, Decimal::from(160)).unwrap();
    assert_eq!(basis.totals.hours, Decimal::from(40));
    assert_eq!(basis.totals.amount_customer, Decimal::ZERO);
    assert_eq!(basis.totals.amount_subcontractor, Decimal::ZERO);
}

#[test]
fn fixed_row_without_amount_fails_the_whole_build() {
    let rows = vec![
        hourly_row("c1", "p1", "u1", "80", Some("0.1"), None),
        fixed_row("c1", "p2", "u2", "8", None),
    ];
    let err = build_report(&rows, Decimal::from(160)).unwrap_err();
    assert_eq!(
        err,
        ReportError::MissingFixedAmount {
            project_id: "p2".to_string()
        }
    );
}

#[test]
fn sibling_order_follows_first_appearance() {
    let rows = vec![
        hourly_row("c2", "p9", "u1", "1", None, None),
        hourly_row("c1", "p2", "u1", "1", None, None),
        hourly_row("c2", "p3", "u2", "1", None, None),
    ];
    let basis = build_report(&rows, Decimal::from(160)).unwrap();
    let company_ids: Vec<&str> = basis.companies.iter().map(|c| c.company_id.as_str()).collect();
    assert_eq!(company_ids, vec!["c2", "c1"]);
    let project_ids: Vec<&str> = basis.companies[0]
        .projects
        .iter()
        .map(|p| p.project_id.as_str())
        .collect();
    assert_eq!(project_ids, vec!["p9", "p3"]);
}

#[test]
fn share_of_workable_rounds_half_away_from_zero() {
    let rows = vec![hourly_row("c1", "p1", "u1", "12.345", None, None)];
    let basis = build_report(&rows, Decimal::from(100)).unwrap();
    assert_eq!(basis.share_of_workable, dec("12.35"));
}

#[test]
fn share_of_workable_truncates_repeating_fractions_to_two_decimals() {
    let rows = vec![hourly_row("c1", "p1", "u1", "1", None, None)];
    let basis = build_report(&rows, Decimal::from(3)).unwrap();
    assert_eq!(basis.share_of_workable, dec("33.33"));
}

#[test]
fn zero_workable_hours_yields_zero_share() {
    let rows = vec![hourly_row("c1", "p1", "u1", "8", None, None)];
    let basis = build_report(&rows, Decimal::ZERO).unwrap();
    assert_eq!(basis.share_of_workable, Decimal::ZERO);
}

// ── Rate validation ──

fn period(kind: RateKind, from: Option<NaiveDate>, to: Option<NaiveDate>) -> RatePeriod {
    RatePeriod { kind, from, to }
}

#[test]
fn disjoint_standard_and_fixed_periods_validate() {
    let periods = [
        period(RateKind::Standard, date(2019, 1, 1), date(2019, 6, 30)),
        period(RateKind::Fixed, date(2019, 7, 1), date(2019, 12, 31)),
    ];
    assert!(validate_project_rates("p1", &periods).is_ok());
}

#[test]
fn open_ended_standard_and_fixed_rates_clash() {
    let periods = [
        period(RateKind::Standard, date(2019, 1, 1), None),
        period(RateKind::Fixed, date(2019, 7, 1), None),
    ];
    assert_eq!(
        validate_project_rates("p1", &periods),
        Err(ReportError::OpenEndedRateClash {
            project_id: "p1".to_string()
        })
    );
}

#[test]
fn touching_standard_and_fixed_periods_overlap() {
    let standard = period(RateKind::Standard, date(2019, 10, 1), date(2019, 10, 30));
    let fixed = period(RateKind::Fixed, date(2019, 10, 30), date(2019, 11, 20));
    let err = validate_project_rates("p1", &[standard, fixed]).unwrap_err();
    assert_eq!(
        err,
        ReportError::OverlappingRatePeriods {
            project_id: "p1".to_string(),
            standard,
            fixed,
        }
    );
}

#[test]
fn new_rate_may_not_intersect_same_kind_period() {
    let existing = [period(RateKind::Standard, date(2019, 1, 1), date(2019, 6, 30))];
    let candidate = period(RateKind::Standard, date(2019, 6, 30), None);
    assert!(admit_rate("p1", &existing, &candidate).is_err());

    let later = period(RateKind::Standard, date(2019, 7, 1), None);
    assert!(admit_rate("p1", &existing, &later).is_ok());
}

#[test]
fn admission_ignores_periods_of_the_other_kind() {
    let existing = [period(RateKind::Standard, date(2019, 1, 1), date(2019, 6, 30))];
    let candidate = period(RateKind::Fixed, date(2019, 3, 1), date(2019, 3, 31));
    assert!(admit_rate("p1", &existing, &candidate).is_ok());
}

// ── Report requests ──

fn april_request() -> ReportRequest {
    ReportRequest {
        requested_by: "admin".to_string(),
        from: NaiveDate::from_ymd_opt(2019, 4, 1).unwrap(),
        to: NaiveDate::from_ymd_opt(2019, 4, 30).unwrap(),
    }
}

#[test]
fn basis_for_period_uses_calendar_workable_hours() {
    // April 2019 has 160 workable hours, so project p1's 160 reported
    // hours come out at exactly 100%.
    let basis = basis_for_period(&april_request(), &HashMap::new(), &invoice_fixture()).unwrap();
    assert_eq!(basis.companies[0].projects[0].share_of_workable, dec("100.00"));
}

#[test]
fn invalid_rate_configuration_fails_the_request() {
    let mut project_rates = HashMap::new();
    project_rates.insert(
        "p1".to_string(),
        vec![
            period(RateKind::Standard, date(2019, 1, 1), None),
            period(RateKind::Fixed, date(2019, 2, 1), None),
        ],
    );
    let result = basis_for_period(&april_request(), &project_rates, &invoice_fixture());
    assert_eq!(
        result.unwrap_err(),
        ReportError::OpenEndedRateClash {
            project_id: "p1".to_string()
        }
    );
}

#[test]
fn unsupported_period_year_fails_the_request() {
    let request = ReportRequest {
        requested_by: "admin".to_string(),
        from: NaiveDate::from_ymd_opt(1400, 1, 1).unwrap(),
        to: NaiveDate::from_ymd_opt(1400, 1, 31).unwrap(),
    };
    assert!(matches!(
        basis_for_period(&request, &HashMap::new(), &[]),
        Err(ReportError::Calendar(_))
    ));
}
