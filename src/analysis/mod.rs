mod investment;
mod rent_summary;

pub use investment::{calculate_investment_metrics, InvestmentParams, InvestmentRecord};
pub use rent_summary::{median_of_sorted, summarize_rents, RentSummaryRow};
