use serde::{Deserialize, Serialize};

/// Page/limit pair shared by every list endpoint. Raw query values are
/// parsed leniently, anything that is not a number falls back to the
/// defaults instead of rejecting the request.
#[derive(Deserialize, Serialize, Default, Debug)]
#[serde(default)]
pub struct PageQuery {
    #[serde(deserialize_with = "deserialize_i64_from_any")]
    pub page: Option<i64>,
    #[serde(deserialize_with = "deserialize_i64_from_any")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Clamp raw values into a usable range: page is at least 1, any
    /// positive limit is honoured, absent or non-positive values fall
    /// back to the endpoint default.
    pub fn clamped(query: &PageQuery, default_limit: i64) -> Self {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.filter(|l| *l > 0).unwrap_or(default_limit);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn pages(&self, total: i64) -> i64 {
        if total == 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }

    pub fn page_info(&self, total: i64) -> PageInfo {
        PageInfo {
            page: self.page,
            limit: self.limit,
            total,
            pages: self.pages(total),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

pub fn deserialize_i64_from_any<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<i64>().ok()))
}

pub fn deserialize_f64_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

pub fn deserialize_bool_from_any<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }))
}

/// JSON bodies may carry numbers either as numbers or as strings.
/// Unparseable values become `None` rather than rejecting the body.
pub fn deserialize_f64_from_json<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|v| v.is_finite()))
}

pub fn deserialize_i32_from_json<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default, Debug)]
    #[serde(default)]
    struct Filters {
        #[serde(deserialize_with = "deserialize_f64_from_any")]
        min_price: Option<f64>,
        #[serde(deserialize_with = "deserialize_bool_from_any")]
        is_active: Option<bool>,
    }

    fn page_query(page: Option<i64>, limit: Option<i64>) -> PageQuery {
        PageQuery { page, limit }
    }

    #[test]
    fn garbage_numbers_fall_back_to_none() {
        let filters: Filters =
            serde_urlencoded::from_str("min_price=cheap&is_active=maybe").unwrap();
        assert_eq!(filters.min_price, None);
        assert_eq!(filters.is_active, None);
    }

    #[test]
    fn valid_values_parse() {
        let filters: Filters = serde_urlencoded::from_str("min_price=1500.5&is_active=1").unwrap();
        assert_eq!(filters.min_price, Some(1500.5));
        assert_eq!(filters.is_active, Some(true));
    }

    #[test]
    fn lenient_page_query_parses_from_strings() {
        let query: PageQuery = serde_urlencoded::from_str("page=3&limit=abc").unwrap();
        assert_eq!(query.page, Some(3));
        assert_eq!(query.limit, None);
    }

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let pagination = Pagination::clamped(&page_query(Some(0), Some(0)), 20);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 20);

        let pagination = Pagination::clamped(&page_query(Some(-3), Some(-5)), 20);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 20);
    }

    #[test]
    fn large_limits_are_honoured() {
        let pagination = Pagination::clamped(&page_query(Some(1), Some(500)), 20);
        assert_eq!(pagination.limit, 500);
        assert_eq!(pagination.pages(300), 1);
    }

    #[test]
    fn pagination_defaults_apply() {
        let pagination = Pagination::clamped(&page_query(None, None), 20);
        assert_eq!(pagination, Pagination { page: 1, limit: 20 });
        assert_eq!(pagination.offset(), 0);
    }

    #[derive(Deserialize, Default, Debug)]
    #[serde(default)]
    struct Body {
        #[serde(deserialize_with = "deserialize_f64_from_json")]
        price: Option<f64>,
        #[serde(deserialize_with = "deserialize_i32_from_json")]
        bedrooms: Option<i32>,
    }

    #[test]
    fn json_numbers_accept_numbers_and_strings() {
        let body: Body = serde_json::from_str(r#"{"price": 1200.5, "bedrooms": "3"}"#).unwrap();
        assert_eq!(body.price, Some(1200.5));
        assert_eq!(body.bedrooms, Some(3));
    }

    #[test]
    fn json_garbage_numbers_become_none() {
        let body: Body = serde_json::from_str(r#"{"price": "a lot", "bedrooms": [1]}"#).unwrap();
        assert_eq!(body.price, None);
        assert_eq!(body.bedrooms, None);
    }

    #[test]
    fn offset_and_pages_math() {
        let pagination = Pagination {
            page: 3,
            limit: 10,
        };
        assert_eq!(pagination.offset(), 20);
        assert_eq!(pagination.pages(0), 0);
        assert_eq!(pagination.pages(1), 1);
        assert_eq!(pagination.pages(10), 1);
        assert_eq!(pagination.pages(11), 2);
        assert_eq!(pagination.pages(95), 10);
    }
}
