//! Funding aggregation for donation projects.
//!
//! Totals are always derived from the transaction rows at read time. Nothing
//! in this module is cached or persisted.
//!
//! "Funds raised" means transactions whose receipt has been confirmed
//! (`received`). Pending pledges are reported separately as part of
//! `total_pledged`, and cancelled transactions never count.

use rust_decimal::Decimal;

use crate::entities::sea_orm_active_enums::ReceiptStatus;

/// Decimal places kept on the reported percentage.
pub const PERCENT_SCALE: u32 = 2;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Per receipt-status sums for a single project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundingTotals {
    pub pending: Decimal,
    pub received: Decimal,
    pub cancelled: Decimal,
}

impl FundingTotals {
    pub fn add(&mut self, status: ReceiptStatus, amount: Decimal) {
        let slot = match status {
            ReceiptStatus::Pending => &mut self.pending,
            ReceiptStatus::Received => &mut self.received,
            ReceiptStatus::Cancelled => &mut self.cancelled,
        };
        *slot += amount;
    }

    pub fn amount_for(&self, status: ReceiptStatus) -> Decimal {
        match status {
            ReceiptStatus::Pending => self.pending,
            ReceiptStatus::Received => self.received,
            ReceiptStatus::Cancelled => self.cancelled,
        }
    }

    /// Received plus still-pending pledges.
    pub fn pledged(&self) -> Decimal {
        self.received + self.pending
    }
}

/// Derived funding figures for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingSummary {
    pub current_fund: Decimal,
    pub total_pledged: Decimal,
    pub target_fund: Option<Decimal>,
    /// Fraction of the target reached, clamped to `[0, 1]`.
    pub progress: Decimal,
    /// `None` for goal-less projects, where no progress bar is shown.
    pub progress_percent: Option<Decimal>,
}

impl FundingSummary {
    /// Summarises `totals` against `target_fund`.
    ///
    /// `current_fund` is the received total unless `filter` selects a single
    /// receipt status to sum instead.
    pub fn compute(
        totals: &FundingTotals,
        target_fund: Option<Decimal>,
        filter: Option<ReceiptStatus>,
    ) -> Self {
        let current_fund = totals.amount_for(filter.unwrap_or(ReceiptStatus::Received));
        let progress = progress_fraction(current_fund, target_fund);
        let progress_percent = has_goal(target_fund)
            .then(|| (progress * ONE_HUNDRED).round_dp(PERCENT_SCALE).normalize());

        Self {
            current_fund,
            total_pledged: totals.pledged(),
            target_fund,
            progress,
            progress_percent,
        }
    }
}

/// `min(current / target, 1)`, or zero when there is no positive target.
pub fn progress_fraction(current: Decimal, target: Option<Decimal>) -> Decimal {
    let Some(target) = target.filter(|t| *t > Decimal::ZERO) else {
        return Decimal::ZERO;
    };
    if current <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    current
        .checked_div(target)
        .unwrap_or(Decimal::ONE)
        .min(Decimal::ONE)
}

pub fn has_goal(target: Option<Decimal>) -> bool {
    matches!(target, Some(t) if t > Decimal::ZERO)
}
