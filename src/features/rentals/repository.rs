use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::features::properties::models::ListingStatus;
use crate::features::properties::repository::effective_status;
use crate::features::rentals::models::Rental;
use crate::features::rentals::schemas::RentalQuery;
use crate::features::schemas::Pagination;
use crate::utilities::errors::AppError;

/// Rental listing predicate, shared by the page and count queries.
/// Public rentals are always restricted to active rows.
#[derive(Default, Debug)]
pub struct RentalFilters {
    pub city: Option<String>,
    pub state: Option<String>,
    pub property_type: Option<String>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    pub bedrooms: Option<i64>,
    pub rent_type: Option<String>,
    pub tenant_type: Option<String>,
    pub status: Option<ListingStatus>,
}

impl RentalFilters {
    pub fn from_query(query: &RentalQuery, is_admin: bool) -> Self {
        Self {
            city: query.city.clone(),
            state: query.state.clone(),
            property_type: query.property_type.clone(),
            min_rent: query.min_rent,
            max_rent: query.max_rent,
            bedrooms: query.bedrooms,
            rent_type: query.rent_type.map(|t| t.as_str().to_string()),
            tenant_type: query.tenant_type.map(|t| t.as_str().to_string()),
            status: effective_status(query.status, is_admin),
        }
    }

    pub fn push(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(city) = &self.city {
            qb.push(" AND city ILIKE ").push_bind(format!("%{city}%"));
        }
        if let Some(state) = &self.state {
            qb.push(" AND state ILIKE ").push_bind(format!("%{state}%"));
        }
        if let Some(property_type) = &self.property_type {
            qb.push(" AND property_type = ")
                .push_bind(property_type.clone());
        }
        if let Some(min_rent) = self.min_rent {
            qb.push(" AND monthly_rent >= ")
                .push_bind(min_rent.to_string())
                .push("::numeric");
        }
        if let Some(max_rent) = self.max_rent {
            qb.push(" AND monthly_rent <= ")
                .push_bind(max_rent.to_string())
                .push("::numeric");
        }
        if let Some(bedrooms) = self.bedrooms {
            qb.push(" AND bedrooms >= ").push_bind(bedrooms);
        }
        if let Some(rent_type) = &self.rent_type {
            qb.push(" AND rent_type = ").push_bind(rent_type.clone());
        }
        if let Some(tenant_type) = &self.tenant_type {
            qb.push(" AND tenant_type = ").push_bind(tenant_type.clone());
        }
        if let Some(status) = self.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        qb.push(" AND is_active = true");
    }
}

pub async fn list_rentals(
    pool: &PgPool,
    filters: &RentalFilters,
    pagination: Pagination,
) -> Result<(Vec<Rental>, i64), AppError> {
    let mut page_qb = QueryBuilder::new("SELECT * FROM rental_properties WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM rental_properties WHERE 1=1");

    filters.push(&mut page_qb);
    filters.push(&mut count_qb);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let rentals = page_qb.build_query_as::<Rental>().fetch_all(pool).await?;

    Ok((rentals, total))
}

/// Approval activates the listing, rejection hides it from the public
/// list.
pub fn moderation_outcome(status: ListingStatus) -> bool {
    status == ListingStatus::Approved
}

pub async fn set_rental_moderation(
    pool: &PgPool,
    id: uuid::Uuid,
    status: ListingStatus,
) -> Result<Option<Rental>, AppError> {
    let rental = sqlx::query_as::<_, Rental>(
        r#"
        UPDATE rental_properties
        SET status = $2, is_active = $3, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(moderation_outcome(status))
    .fetch_optional(pool)
    .await?;
    Ok(rental)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_count_share_the_same_predicate() {
        let filters = RentalFilters {
            city: Some("Indore".to_string()),
            min_rent: Some(5_000.0),
            max_rent: Some(25_000.0),
            rent_type: Some("furnished".to_string()),
            status: Some(ListingStatus::Approved),
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
        let filters = RentalFilters::default();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM rental_properties WHERE 1=1");
        filters.push(&mut qb);
        assert!(qb.sql().ends_with(" AND is_active = true"));
    }

    #[test]
    fn public_status_is_pinned_to_approved() {
        let query = RentalQuery {
            status: Some(ListingStatus::Pending),
            ..Default::default()
        };
        let filters = RentalFilters::from_query(&query, false);
        assert_eq!(filters.status, Some(ListingStatus::Approved));
    }

    #[test]
    fn approval_activates_and_rejection_deactivates() {
        assert!(moderation_outcome(ListingStatus::Approved));
        assert!(!moderation_outcome(ListingStatus::Rejected));
        assert!(!moderation_outcome(ListingStatus::Pending));
    }
}
