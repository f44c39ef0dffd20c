//! The back-office dashboard.
//!
//! Aggregates over the same scans the other services use. Nothing here is
//! cached or precomputed; every figure is derived from the store at call
//! time, so the dashboard can never disagree with the screens behind it.

use chrono::Datelike;
use rust_decimal::Decimal;

use velvet_mango_core::store::KvStore;

use crate::error::Result;

use super::orders::AdminOrderService;
use super::products::ProductService;
use super::users::AdminUserService;

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub total_income: Decimal,
    pub total_users: usize,
    pub total_products: usize,
}

/// Per-month order counts and income for one calendar year.
///
/// Index 0 is January.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBreakdown {
    pub year: i32,
    pub orders: [u32; 12],
    pub income: [Decimal; 12],
}

/// Dashboard aggregation service.
pub struct DashboardService<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> DashboardService<'a, S> {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Totals across orders, customers, and the catalog.
    ///
    /// Listing the catalog seeds the starter products on a fresh install,
    /// same as opening the products screen would.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdminError::Store`] if any scan fails.
    pub async fn summary(&self) -> Result<DashboardSummary> {
        let orders = AdminOrderService::new(self.store).list_all().await?;
        let users = AdminUserService::new(self.store).list().await?;
        let products = ProductService::new(self.store).list().await?;

        Ok(DashboardSummary {
            total_orders: orders.len(),
            total_income: orders.iter().map(|o| o.total_price).sum(),
            total_users: users.len(),
            total_products: products.len(),
        })
    }

    /// Order counts and income per month for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdminError::Store`] if the order scan fails.
    pub async fn monthly_breakdown(&self, year: i32) -> Result<MonthlyBreakdown> {
        let mut breakdown = MonthlyBreakdown {
            year,
            orders: [0; 12],
            income: [Decimal::ZERO; 12],
        };
        for order in AdminOrderService::new(self.store).list_all().await? {
            if order.date.year() != year {
                continue;
            }
            let month = order.date.month0() as usize;
            if let (Some(count), Some(income)) = (
                breakdown.orders.get_mut(month),
                breakdown.income.get_mut(month),
            ) {
                *count += 1;
                *income += order.total_price;
            }
        }
        Ok(breakdown)
    }
}
