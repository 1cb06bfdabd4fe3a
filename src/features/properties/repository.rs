use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::features::properties::models::{ListingStatus, Property};
use crate::features::properties::schemas::{MyPropertiesQuery, PropertyQuery};
use crate::features::schemas::Pagination;
use crate::utilities::errors::AppError;

/// Status visible to the caller. Only admins may look past the
/// moderation gate, everyone else is pinned to approved listings no
/// matter what they ask for.
pub fn effective_status(
    requested: Option<ListingStatus>,
    is_admin: bool,
) -> Option<ListingStatus> {
    match (requested, is_admin) {
        (Some(status), true) => Some(status),
        _ => Some(ListingStatus::Approved),
    }
}

/// The WHERE clause of the public property listing, applied verbatim to
/// both the page query and the count query so the two can never drift.
#[derive(Default, Debug)]
pub struct PropertyFilters {
    pub city: Option<String>,
    pub state: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub bedrooms: Option<i64>,
    pub status: Option<ListingStatus>,
    pub is_active: Option<bool>,
}

impl PropertyFilters {
    pub fn from_query(query: &PropertyQuery, is_admin: bool) -> Self {
        Self {
            city: query.city.clone(),
            state: query.state.clone(),
            property_type: query.property_type.map(|t| t.as_str().to_string()),
            min_price: query.min_price,
            max_price: query.max_price,
            min_area: query.min_area,
            max_area: query.max_area,
            bedrooms: query.bedrooms,
            status: effective_status(query.status, is_admin),
            is_active: query.is_active,
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
        if let Some(min_price) = self.min_price {
            qb.push(" AND price >= ")
                .push_bind(min_price.to_string())
                .push("::numeric");
        }
        if let Some(max_price) = self.max_price {
            qb.push(" AND price <= ")
                .push_bind(max_price.to_string())
                .push("::numeric");
        }
        if let Some(min_area) = self.min_area {
            qb.push(" AND area_sqft >= ")
                .push_bind(min_area.to_string())
                .push("::numeric");
        }
        if let Some(max_area) = self.max_area {
            qb.push(" AND area_sqft <= ")
                .push_bind(max_area.to_string())
                .push("::numeric");
        }
        if let Some(bedrooms) = self.bedrooms {
            qb.push(" AND bedrooms >= ").push_bind(bedrooms);
        }
        if let Some(status) = self.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(is_active) = self.is_active {
            qb.push(" AND is_active = ").push_bind(is_active);
        }
    }
}

pub async fn list_properties(
    pool: &PgPool,
    filters: &PropertyFilters,
    pagination: Pagination,
) -> Result<(Vec<Property>, i64), AppError> {
    let mut page_qb = QueryBuilder::new("SELECT * FROM properties WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM properties WHERE 1=1");

    filters.push(&mut page_qb);
    filters.push(&mut count_qb);

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let properties = page_qb
        .build_query_as::<Property>()
        .fetch_all(pool)
        .await?;

    Ok((properties, total))
}

pub async fn list_my_properties(
    pool: &PgPool,
    seller_id: Uuid,
    query: &MyPropertiesQuery,
    pagination: Pagination,
) -> Result<(Vec<Property>, i64), AppError> {
    let mut page_qb = QueryBuilder::new("SELECT * FROM properties WHERE seller_id = ");
    page_qb.push_bind(seller_id);
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM properties WHERE seller_id = ");
    count_qb.push_bind(seller_id);

    for qb in [&mut page_qb, &mut count_qb] {
        if let Some(status) = query.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(property_type) = query.property_type {
            qb.push(" AND property_type = ")
                .push_bind(property_type.as_str());
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR locality ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR city ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR property_type ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    page_qb.push(" ORDER BY created_at DESC");
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let properties = page_qb
        .build_query_as::<Property>()
        .fetch_all(pool)
        .await?;

    Ok((properties, total))
}

/// Gallery rows for a batch of listings, keyed by property id and
/// ordered by display_order.
pub async fn images_for_properties(
    pool: &PgPool,
    property_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<String>>, AppError> {
    if property_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, (Uuid, String)>(
        r#"
        SELECT property_id, image_url FROM property_images
        WHERE property_id = ANY($1)
        ORDER BY display_order ASC
        "#,
    )
    .bind(property_ids)
    .fetch_all(pool)
    .await?;

    let mut by_property: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (property_id, image_url) in rows {
        by_property.entry(property_id).or_default().push(image_url);
    }
    Ok(by_property)
}

pub async fn get_property(pool: &PgPool, id: Uuid) -> Result<Option<Property>, AppError> {
    let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(property)
}

/// Single atomic bump, concurrent viewers never lose an increment.
pub async fn increment_views(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    sqlx::query("UPDATE properties SET views = views + 1 WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_moderation(
    pool: &PgPool,
    id: Uuid,
    status: ListingStatus,
    is_active: bool,
) -> Result<Option<Property>, AppError> {
    let property = sqlx::query_as::<_, Property>(
        r#"
        UPDATE properties
        SET status = $2, is_active = $3, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(is_active)
    .fetch_optional(pool)
    .await?;
    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::properties::models::PropertyType;

    fn sample_filters() -> PropertyFilters {
        PropertyFilters {
            city: Some("Indore".to_string()),
            state: None,
            property_type: Some(PropertyType::Flat.as_str().to_string()),
            min_price: Some(100_000.0),
            max_price: Some(900_000.0),
            min_area: None,
            max_area: Some(2_000.0),
            bedrooms: Some(2),
            status: Some(ListingStatus::Approved),
            is_active: None,
        }
    }

    #[test]
    fn page_and_count_share_the_same_predicate() {
        let filters = sample_filters();

        let mut page_qb = QueryBuilder::<Postgres>::new("");
        let mut count_qb = QueryBuilder::<Postgres>::new("");
        filters.push(&mut page_qb);
        filters.push(&mut count_qb);

        assert_eq!(page_qb.sql(), count_qb.sql());
    }

    #[test]
    fn empty_filters_add_no_clauses() {
        let filters = PropertyFilters::default();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM properties WHERE 1=1");
        filters.push(&mut qb);
        assert_eq!(qb.sql(), "SELECT * FROM properties WHERE 1=1");
    }

    #[test]
    fn anonymous_pending_request_is_pinned_to_approved() {
        assert_eq!(
            effective_status(Some(ListingStatus::Pending), false),
            Some(ListingStatus::Approved)
        );
        assert_eq!(
            effective_status(Some(ListingStatus::Rejected), false),
            Some(ListingStatus::Approved)
        );
        assert_eq!(effective_status(None, false), Some(ListingStatus::Approved));
    }

    #[test]
    fn admin_may_filter_any_status() {
        assert_eq!(
            effective_status(Some(ListingStatus::Pending), true),
            Some(ListingStatus::Pending)
        );
        assert_eq!(effective_status(None, true), Some(ListingStatus::Approved));
    }

    #[test]
    fn status_clause_uses_effective_status() {
        let query = PropertyQuery {
            status: Some(ListingStatus::Pending),
            ..Default::default()
        };

        let public = PropertyFilters::from_query(&query, false);
        assert_eq!(public.status, Some(ListingStatus::Approved));

        let admin = PropertyFilters::from_query(&query, true);
        assert_eq!(admin.status, Some(ListingStatus::Pending));
    }
}
