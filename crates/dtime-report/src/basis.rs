use crate::error::{ReportError, Result};
use crate::rates::{validate_project_rates, RatePeriod};
use chrono::NaiveDate;
use dtime_common::types::Contribution;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summed hours and money amounts at one level of the basis tree.
///
/// Accumulation is exact decimal arithmetic; nothing is rounded on the
/// way up, so a parent's totals equal the sum of its leaves to the
/// last decimal place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryAggregate {
    pub hours: Decimal,
    pub amount_customer: Decimal,
    pub amount_subcontractor: Decimal,
    pub amount_fixed: Decimal,
}

impl MonetaryAggregate {
    pub const ZERO: Self = Self {
        hours: Decimal::ZERO,
        amount_customer: Decimal::ZERO,
        amount_subcontractor: Decimal::ZERO,
        amount_fixed: Decimal::ZERO,
    };

    fn add(&mut self, other: &MonetaryAggregate) {
        self.hours += other.hours;
        self.amount_customer += other.amount_customer;
        self.amount_subcontractor += other.amount_subcontractor;
        self.amount_fixed += other.amount_fixed;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserNode {
    pub user_id: String,
    pub totals: MonetaryAggregate,
    /// Reported hours as a percentage of the period's workable hours,
    /// rounded to two decimals, half away from zero.
    pub share_of_workable: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectNode {
    pub project_id: String,
    pub totals: MonetaryAggregate,
    pub share_of_workable: Decimal,
    pub users: Vec<UserNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyNode {
    pub company_id: String,
    pub totals: MonetaryAggregate,
    pub share_of_workable: Decimal,
    pub projects: Vec<ProjectNode>,
}

/// One invoicing period's aggregated hours and amounts, grouped by
/// company, then project, then user. Built bottom-up in a single pass;
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basis {
    pub companies: Vec<CompanyNode>,
    pub totals: MonetaryAggregate,
    pub share_of_workable: Decimal,
}

/// An invoice-basis request. The requesting administrator is an
/// explicit parameter; nothing here reads ambient security context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub requested_by: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

fn leaf_aggregate(row: &Contribution) -> Result<MonetaryAggregate> {
    let mut aggregate = MonetaryAggregate {
        hours: row.hours,
        ..MonetaryAggregate::ZERO
    };

    if row.is_fixed_rate {
        let fixed = row
            .fixed_amount
            .ok_or_else(|| ReportError::MissingFixedAmount {
                project_id: row.project_id.clone(),
            })?;
        aggregate.amount_fixed = fixed;
    } else {
        if let Some(rate) = row.customer_rate {
            aggregate.amount_customer = row.hours * rate;
        }
        if let Some(rate) = row.subcontractor_rate {
            aggregate.amount_subcontractor = row.hours * rate;
        }
    }
    Ok(aggregate)
}

fn share_of_workable(hours: Decimal, workable_hours: Decimal) -> Decimal {
    if workable_hours.is_zero() {
        return Decimal::ZERO;
    }
    (hours / workable_hours * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

struct UserAcc {
    user_id: String,
    totals: MonetaryAggregate,
}

struct ProjectAcc {
    project_id: String,
    totals: MonetaryAggregate,
    users: Vec<UserAcc>,
}

struct CompanyAcc {
    company_id: String,
    totals: MonetaryAggregate,
    projects: Vec<ProjectAcc>,
}

/// Folds flat contribution rows into the basis tree. Non-fixed rows
/// contribute `hours x rate` per configured rate; fixed-rate rows
/// contribute their flat amount. Sibling order is first appearance in
/// the input. Any invalid row fails the whole build; partial
/// aggregates are discarded, never returned.
pub fn build_report(rows: &[Contribution], workable_hours: Decimal) -> Result<Basis> {
    let mut companies: Vec<CompanyAcc> = Vec::new();

    for row in rows {
        let leaf = leaf_aggregate(row)?;

        let ci = match companies
            .iter()
            .position(|c| c.company_id == row.company_id)
        {
            Some(i) => i,
            None => {
                companies.push(CompanyAcc {
                    company_id: row.company_id.clone(),
                    totals: MonetaryAggregate::ZERO,
                    projects: Vec::new(),
                });
                companies.len() - 1
            }
        };
        let company = &mut companies[ci];
        company.totals.add(&leaf);

        let pi = match company
            .projects
            .iter()
            .position(|p| p.project_id == row.project_id)
        {
            Some(i) => i,
            None => {
                company.projects.push(ProjectAcc {
                    project_id: row.project_id.clone(),
                    totals: MonetaryAggregate::ZERO,
                    users: Vec::new(),
                });
                company.projects.len() - 1
            }
        };
        let project = &mut company.projects[pi];
        project.totals.add(&leaf);

        let ui = match project.users.iter().position(|u| u.user_id == row.user_id) {
            Some(i) => i,
            None => {
                project.users.push(UserAcc {
                    user_id: row.user_id.clone(),
                    totals: MonetaryAggregate::ZERO,
                });
                project.users.len() - 1
            }
        };
        project.users[ui].totals.add(&leaf);
    }

    let mut grand_totals = MonetaryAggregate::ZERO;
    let companies: Vec<CompanyNode> = companies
        .into_iter()
        .map(|company| {
            grand_totals.add(&company.totals);
            CompanyNode {
                share_of_workable: share_of_workable(company.totals.hours, workable_hours),
                projects: company
                    .projects
                    .into_iter()
                    .map(|project| ProjectNode {
                        share_of_workable: share_of_workable(project.totals.hours, workable_hours),
                        users: project
                            .users
                            .into_iter()
                            .map(|user| UserNode {
                                share_of_workable:
                                    share_of_workable(user.totals.hours, workable_hours),
                                user_id: user.user_id,
                                totals: user.totals,
                            })
                            .collect(),
                        project_id: project.project_id,
                        totals: project.totals,
                    })
                    .collect(),
                company_id: company.company_id,
                totals: company.totals,
            }
        })
        .collect();

    Ok(Basis {
        share_of_workable: share_of_workable(grand_totals.hours, workable_hours),
        companies,
        totals: grand_totals,
    })
}

/// Computes the invoice basis for one period: validates the billing
/// rates of every involved project, derives the period's workable
/// hours from the reporting calendar and folds the fetched rows.
pub fn basis_for_period(
    request: &ReportRequest,
    project_rates: &HashMap<String, Vec<RatePeriod>>,
    rows: &[Contribution],
) -> Result<Basis> {
    for (project_id, periods) in project_rates {
        validate_project_rates(project_id, periods)?;
    }

    let workable_hours = dtime_calendar::holidays::workable_hours(request.from, request.to)?;
    let basis = build_report(rows, workable_hours)?;

    tracing::info!(
        requested_by = %request.requested_by,
        from = %request.from,
        to = %request.to,
        companies = basis.companies.len(),
        "Invoice basis computed"
    );
    Ok(basis)
}
