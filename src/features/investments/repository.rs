use bigdecimal::ToPrimitive;
use sqlx::types::BigDecimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::features::investments::models::InvestmentOpportunity;
use crate::features::investments::schemas::{InvestmentStatistics, OpportunityQuery};
use crate::features::schemas::Pagination;
use crate::utilities::errors::AppError;

/// Opportunity listing predicate, shared by the page and count queries.
#[derive(Default, Debug)]
pub struct OpportunityFilters {
    pub city: Option<String>,
    pub investment_type: Option<String>,
}

impl OpportunityFilters {
    pub fn from_query(query: &OpportunityQuery) -> Self {
        Self {
            city: query.city.clone(),
            investment_type: query.investment_type.clone(),
        }
    }

    pub fn push(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" AND is_active = true");
        if let Some(city) = &self.city {
            qb.push(" AND city ILIKE ").push_bind(format!("%{city}%"));
        }
        if let Some(investment_type) = &self.investment_type {
            qb.push(" AND investment_type = ")
                .push_bind(investment_type.clone());
        }
    }
}

pub async fn list_opportunities(
    pool: &PgPool,
    filters: &OpportunityFilters,
    pagination: Pagination,
) -> Result<(Vec<InvestmentOpportunity>, i64), AppError> {
    let mut page_qb = QueryBuilder::new("SELECT * FROM investment_opportunities WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM investment_opportunities WHERE 1=1");

    filters.push(&mut page_qb);
    filters.push(&mut count_qb);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let opportunities = page_qb
        .build_query_as::<InvestmentOpportunity>()
        .fetch_all(pool)
        .await?;

    Ok((opportunities, total))
}

pub async fn investment_statistics(pool: &PgPool) -> Result<InvestmentStatistics, AppError> {
    let (total_opportunities, total_investors, total_investment) = tokio::try_join!(
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM investment_opportunities WHERE is_active = true",
        )
        .fetch_one(pool),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM investor_registrations")
            .fetch_one(pool),
        sqlx::query_scalar::<_, Option<BigDecimal>>(
            "SELECT SUM(min_investment) FROM investment_opportunities WHERE is_active = true",
        )
        .fetch_one(pool),
    )?;

    Ok(InvestmentStatistics {
        total_opportunities,
        total_investors,
        total_investment: total_investment
            .as_ref()
            .and_then(|v| v.to_f64())
            .unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_count_share_the_same_predicate() {
        let filters = OpportunityFilters {
            city: Some("Ujjain".to_string()),
            investment_type: Some("commercial".to_string()),
        };

        let mut page_qb = QueryBuilder::<Postgres>::new("");
        let mut count_qb = QueryBuilder::<Postgres>::new("");
        filters.push(&mut page_qb);
        filters.push(&mut count_qb);

        assert_eq!(page_qb.sql(), count_qb.sql());
    }

    #[test]
    fn active_clause_is_always_present() {
        let filters = OpportunityFilters::default();
        let mut qb = QueryBuilder::<Postgres>::new("");
        filters.push(&mut qb);
        assert!(qb.sql().contains(" AND is_active = true"));
    }
}
