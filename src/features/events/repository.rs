use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::features::events::models::Event;
use crate::features::events::schemas::EventQuery;
use crate::features::schemas::Pagination;
use crate::utilities::errors::AppError;

/// Reconciles the is_past flag of active events with the clock.
/// Both updates are idempotent, running the sweep twice is harmless.
pub async fn sweep_event_status(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query("UPDATE events SET is_past = true WHERE is_active = true AND event_date < now()")
        .execute(pool)
        .await?;
    sqlx::query("UPDATE events SET is_past = false WHERE is_active = true AND event_date >= now()")
        .execute(pool)
        .await?;
    Ok(())
}

/// Event listing predicate, shared by the page and count queries.
/// Without an explicit is_past filter only upcoming events are listed.
#[derive(Default, Debug)]
pub struct EventFilters {
    pub city: Option<String>,
    pub event_type: Option<String>,
    pub is_past: Option<bool>,
}

impl EventFilters {
    pub fn from_query(query: &EventQuery) -> Self {
        Self {
            city: query.city.clone(),
            event_type: query.event_type.clone(),
            is_past: query.is_past,
        }
    }

    pub fn push(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" AND is_active = true");
        if let Some(city) = &self.city {
            qb.push(" AND city ILIKE ").push_bind(format!("%{city}%"));
        }
        if let Some(event_type) = &self.event_type {
            qb.push(" AND event_type = ").push_bind(event_type.clone());
        }
        match self.is_past {
            Some(is_past) => {
                qb.push(" AND is_past = ").push_bind(is_past);
            }
            None => {
                qb.push(" AND event_date >= now()");
            }
        }
    }

    /// Past events are served most recent first, upcoming ones soonest
    /// first.
    pub fn order_clause(&self) -> &'static str {
        if self.is_past == Some(true) {
            " ORDER BY event_date DESC"
        } else {
            " ORDER BY event_date ASC"
        }
    }
}

pub async fn list_events(
    pool: &PgPool,
    filters: &EventFilters,
    pagination: Pagination,
) -> Result<(Vec<Event>, i64), AppError> {
    let mut page_qb = QueryBuilder::new("SELECT * FROM events WHERE 1=1");
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM events WHERE 1=1");

    filters.push(&mut page_qb);
    filters.push(&mut count_qb);

    page_qb.push(filters.order_clause());
    page_qb.push(" LIMIT ").push_bind(pagination.limit);
    page_qb.push(" OFFSET ").push_bind(pagination.offset());

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let events = page_qb.build_query_as::<Event>().fetch_all(pool).await?;

    Ok((events, total))
}

// The capacity predicate lives in the same statement as the increment,
// concurrent registrations cannot overshoot max_attendees.
const CLAIM_SEAT_SQL: &str = "UPDATE events \
    SET registered_count = registered_count + 1 \
    WHERE id = $1 AND (max_attendees IS NULL OR registered_count < max_attendees)";

/// Claims one seat inside the registration transaction. Returns false
/// when the event is already full.
pub async fn claim_event_seat(
    tx: &mut Transaction<'_, Postgres>,
    event_id: uuid::Uuid,
) -> Result<bool, AppError> {
    let claimed = sqlx::query(CLAIM_SEAT_SQL)
        .bind(event_id)
        .execute(&mut **tx)
        .await?;
    Ok(claimed.rows_affected() > 0)
}

pub async fn get_event(pool: &PgPool, event_id: uuid::Uuid) -> Result<Option<Event>, AppError> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(pool)
        .await?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_count_share_the_same_predicate() {
        let filters = EventFilters {
            city: Some("Indore".to_string()),
            event_type: Some("site_visit".to_string()),
            is_past: Some(false),
        };

        let mut page_qb = QueryBuilder::<Postgres>::new("");
        let mut count_qb = QueryBuilder::<Postgres>::new("");
        filters.push(&mut page_qb);
        filters.push(&mut count_qb);

        assert_eq!(page_qb.sql(), count_qb.sql());
    }

    #[test]
    fn default_filter_hides_past_events() {
        let filters = EventFilters::default();
        let mut qb = QueryBuilder::<Postgres>::new("");
        filters.push(&mut qb);
        assert!(qb.sql().contains(" AND event_date >= now()"));
        assert_eq!(filters.order_clause(), " ORDER BY event_date ASC");
    }

    #[test]
    fn past_events_are_listed_most_recent_first() {
        let filters = EventFilters {
            is_past: Some(true),
            ..Default::default()
        };
        assert_eq!(filters.order_clause(), " ORDER BY event_date DESC");
    }

    #[test]
    fn seat_claim_checks_capacity_in_the_increment_statement() {
        assert!(CLAIM_SEAT_SQL.contains("registered_count = registered_count + 1"));
        assert!(CLAIM_SEAT_SQL.contains("registered_count < max_attendees"));
        assert!(CLAIM_SEAT_SQL.contains("max_attendees IS NULL OR"));
    }
}
