//! In-memory page loader over JSON records
//!
//! Stands in for the REST API when running the demo binary: records are read
//! from a JSON array (or a `{"data": [...]}` envelope), filtered with
//! [`FilterSet::matches`] and sliced with `skip`/`limit`. Fixture files are
//! parsed as JSON5, so hand-written ones may carry comments and trailing commas.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;

use crate::{
    core::error::LoadError,
    domain::{
        entity::Record,
        filters::FilterSet,
        page::{Page, PageParams},
    },
};

use super::loader::PageLoader;

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Plain(Vec<Record>),
    Envelope { data: Vec<Record> },
}

#[derive(Debug, Clone, Default)]
pub struct FixtureLoader {
    records: Arc<Vec<Record>>,
    latency: Duration,
    calls: Arc<AtomicUsize>,
}

impl FixtureLoader {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
            latency: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Read records from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read fixture {}", path.display()))?;
        Self::from_json(&raw).wrap_err_with(|| format!("invalid fixture {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let records = match json5::from_str(raw)? {
            FixtureFile::Plain(records) | FixtureFile::Envelope { data: records } => records,
        };
        Ok(Self::new(records))
    }

    /// Delay every response, to make loading states observable
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of `load` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn page(records: &[Record], params: &PageParams<FilterSet>) -> Page<Record> {
        let matching: Vec<&Record> = records
            .iter()
            .filter(|record| params.filters.matches(&record.fields))
            .collect();
        let items = matching
            .iter()
            .skip(params.skip)
            .take(params.limit)
            .map(|record| (*record).clone())
            .collect();
        Page::new(items, matching.len())
    }
}

impl PageLoader<Record, FilterSet> for FixtureLoader {
    fn load(
        &self,
        params: PageParams<FilterSet>,
    ) -> BoxFuture<'static, Result<Page<Record>, LoadError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let records = Arc::clone(&self.records);
        let latency = self.latency;

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(Self::page(&records, &params))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::domain::entity::EntityId;

    const GAMES: &str = r#"[
        {"id": 1, "name": "StarCraft", "category": "RTS"},
        {"id": 2, "name": "Quake", "category": "FPS"},
        {"id": 3, "name": "Age of Empires", "category": "RTS"},
        {"id": 4, "name": "Doom", "category": "FPS"},
        {"id": 5, "name": "Warcraft III", "category": "RTS"}
    ]"#;

    #[fixture]
    fn loader() -> FixtureLoader {
        FixtureLoader::from_json(GAMES).expect("valid fixture")
    }

    fn ids(page: &Page<Record>) -> Vec<EntityId> {
        page.items.iter().map(|record| record.id.clone()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn test_slices_with_skip_and_limit(loader: FixtureLoader) -> Result<()> {
        let page = loader.load(PageParams::new(2, 2, FilterSet::new())).await?;

        assert_eq!(ids(&page), vec![EntityId::Int(3), EntityId::Int(4)]);
        assert_eq!(page.total, 5);
        assert_eq!(loader.calls(), 1);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_filters_before_slicing(loader: FixtureLoader) -> Result<()> {
        let filters = FilterSet::new().with("category", "RTS");
        let page = loader.load(PageParams::new(1, 10, filters)).await?;

        assert_eq!(ids(&page), vec![EntityId::Int(3), EntityId::Int(5)]);
        assert_eq!(page.total, 3);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_skip_past_end(loader: FixtureLoader) -> Result<()> {
        let page = loader.load(PageParams::new(10, 10, FilterSet::new())).await?;
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        Ok(())
    }

    #[test]
    fn test_envelope_format() -> Result<()> {
        let loader = FixtureLoader::from_json(r#"{"data": [{"id": "a"}, {"id": "b"}]}"#)?;
        assert_eq!(loader.records().len(), 2);
        Ok(())
    }

    #[test]
    fn test_hand_written_fixture() -> Result<()> {
        let loader = FixtureLoader::from_json(
            r#"[
                // seeded by hand
                {id: 1, name: "Quake"},
                {id: "two", name: "Doom",},
            ]"#,
        )?;

        assert_eq!(loader.records().len(), 2);
        assert_eq!(loader.records()[1].id, EntityId::from("two"));
        Ok(())
    }

    #[test]
    fn test_invalid_json() {
        assert!(FixtureLoader::from_json("{not json").is_err());
    }
}
