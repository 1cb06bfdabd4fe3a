use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::features::projects::models::Project;
use crate::features::projects::schemas::ProjectQuery;
use crate::features::schemas::Pagination;
use crate::utilities::errors::AppError;

/// Project listing predicate, shared by the page and count queries.
/// Only active projects are ever listed.
#[derive(Default, Debug)]
pub struct ProjectFilters {
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
}

impl ProjectFilters {
    pub fn from_query(query: &ProjectQuery) -> Self {
        Self {
            city: query.city.clone(),
            state: query.state.clone(),
            status: query.status.clone(),
        }
    }

    pub fn push(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" AND is_active = true");
        if let Some(city) = &self.city {
            qb.push(" AND city ILIKE ").push_bind(format!("%{city}%"));
        }
        if let Some(state) = &self.state {
            qb.push(" AND state ILIKE ").push_bind(format!("%{state}%"));
        }
        if let Some(status) = &self.status {
            qb.push(" AND status = ").push_bind(status.clone());
        }
    }
}

pub async fn list_projects(
    pool: &PgPool,
    filters: &ProjectFilters,
    pagination: Pagination,
) -> Result<(Vec<Project>, i64), AppError> {
    let mut page_qb = QueryBuilder::new("SELECT * FROM projects WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM projects WHERE 1=1");

    filters.push(&mut page_qb);
    filters.push(&mut count_qb);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let projects = page_qb.build_query_as::<Project>().fetch_all(pool).await?;

    Ok((projects, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_count_share_the_same_predicate() {
        let filters = ProjectFilters {
            city: Some("Bhopal".to_string()),
            status: Some("ongoing".to_string()),
            ..Default::default()
        };

        let mut page_qb = QueryBuilder::<Postgres>::new("");
        let mut count_qb = QueryBuilder::<Postgres>::new("");
        filters.push(&mut page_qb);
        filters.push(&mut count_qb);

        assert_eq!(page_qb.sql(), count_qb.sql());
    }

    #[test]
    fn active_clause_is_always_present() {
        let filters = ProjectFilters::default();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM projects WHERE 1=1");
        filters.push(&mut qb);
        assert!(qb.sql().contains(" AND is_active = true"));
    }
}
