use serde::{Deserialize, Serialize};

/// Page size used when the configuration doesn't say otherwise
pub const DEFAULT_LIMIT: usize = 10;

/// Parameters handed to a page loader: `{skip, limit, ...filters}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams<F> {
    pub skip: usize,
    pub limit: usize,
    #[serde(flatten)]
    pub filters: F,
}

impl<F> PageParams<F> {
    pub fn new(skip: usize, limit: usize, filters: F) -> Self {
        Self {
            skip,
            limit,
            filters,
        }
    }
}

/// One page of entities plus the total number of entities matching the filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<E> {
    #[serde(alias = "data")]
    pub items: Vec<E>,
    pub total: usize,
}

impl<E> Page<E> {
    pub fn new(items: Vec<E>, total: usize) -> Self {
        Self { items, total }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::domain::{entity::Record, filters::FilterSet};

    #[test]
    fn test_params_flatten_filters() -> serde_json::Result<()> {
        let filters = FilterSet::new().with("category", "RTS");
        let params = PageParams::new(20, 10, filters);

        assert_eq!(
            serde_json::to_value(&params)?,
            json!({"skip": 20, "limit": 10, "category": "RTS"})
        );
        Ok(())
    }

    #[test]
    fn test_page_accepts_api_envelope() -> serde_json::Result<()> {
        let page: Page<Record> =
            serde_json::from_value(json!({"data": [{"id": 1}, {"id": 2}], "total": 5}))?;

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        Ok(())
    }
}
