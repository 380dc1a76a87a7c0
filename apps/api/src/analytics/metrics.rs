//! Metrics Evaluator: derives the five headline business ratios from raw inputs.
//!
//! Pure arithmetic, no I/O. Every division is guarded: a zero denominator is
//! reported as a `ComputationError` naming the field, and no partial result is
//! produced. Negative inputs are accepted as-is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Business category selected on the analytics form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessCategory {
    #[serde(rename = "E-commerce")]
    Ecommerce,
    #[serde(rename = "SaaS")]
    Saas,
    Retail,
    Manufacturing,
    Services,
    Other,
}

impl BusinessCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BusinessCategory::Ecommerce => "E-commerce",
            BusinessCategory::Saas => "SaaS",
            BusinessCategory::Retail => "Retail",
            BusinessCategory::Manufacturing => "Manufacturing",
            BusinessCategory::Services => "Services",
            BusinessCategory::Other => "Other",
        }
    }
}

/// One form submission. Monetary values are in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetricsInput {
    pub business_type: BusinessCategory,
    pub current_revenue: f64,
    pub previous_revenue: f64,
    pub net_profit: f64,
    pub marketing_spend: f64,
    pub new_customers: f64,
    pub average_order_value: f64,
    /// Purchases per customer per year.
    pub purchase_frequency: f64,
    /// Years.
    pub customer_lifespan: f64,
    pub total_investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Percent.
    pub revenue_growth: f64,
    /// Percent.
    pub profit_margin: f64,
    pub customer_acquisition_cost: f64,
    pub customer_lifetime_value: f64,
    /// Percent.
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputationError {
    #[error("cannot compute {metric}: {field} is zero")]
    DivisionByZero {
        field: &'static str,
        metric: &'static str,
    },
}

/// Evaluates all derived metrics, failing on the first zero denominator.
pub fn evaluate(input: &BusinessMetricsInput) -> Result<DerivedMetrics, ComputationError> {
    let revenue_growth = ratio(
        input.current_revenue - input.previous_revenue,
        input.previous_revenue,
        "previous_revenue",
        "revenue_growth",
    )? * 100.0;

    let profit_margin = ratio(
        input.net_profit,
        input.current_revenue,
        "current_revenue",
        "profit_margin",
    )? * 100.0;

    let customer_acquisition_cost = ratio(
        input.marketing_spend,
        input.new_customers,
        "new_customers",
        "customer_acquisition_cost",
    )?;

    let customer_lifetime_value =
        input.average_order_value * input.purchase_frequency * input.customer_lifespan;

    let roi = ratio(
        input.net_profit - input.total_investment,
        input.total_investment,
        "total_investment",
        "roi",
    )? * 100.0;

    Ok(DerivedMetrics {
        revenue_growth,
        profit_margin,
        customer_acquisition_cost,
        customer_lifetime_value,
        roi,
    })
}

fn ratio(
    numerator: f64,
    denominator: f64,
    field: &'static str,
    metric: &'static str,
) -> Result<f64, ComputationError> {
    if denominator == 0.0 {
        return Err(ComputationError::DivisionByZero { field, metric });
    }
    Ok(numerator / denominator)
}

#[cfg(test)]
pub(crate) fn sample_input() -> BusinessMetricsInput {
    BusinessMetricsInput {
        business_type: BusinessCategory::Saas,
        current_revenue: 120_000.0,
        previous_revenue: 100_000.0,
        net_profit: 30_000.0,
        marketing_spend: 10_000.0,
        new_customers: 50.0,
        average_order_value: 80.0,
        purchase_frequency: 4.0,
        customer_lifespan: 3.0,
        total_investment: 20_000.0,
    }
}
