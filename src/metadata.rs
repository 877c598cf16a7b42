use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioMetadata {
    pub portfolio_name: String,
    pub portfolio_description: String,
}

impl Default for PortfolioMetadata {
    fn default() -> Self {
        Self {
            portfolio_name: "New Portfolio".to_string(),
            portfolio_description: "No description".to_string(),
        }
    }
}
