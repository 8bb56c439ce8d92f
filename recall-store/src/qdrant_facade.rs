//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! application decoupled from `qdrant-client`.

use crate::config::{DistanceKind, StoreConfig, VectorSpace};
use crate::errors::StoreError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CollectionInfo, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
};
use tracing::{debug, info};

/// A facade over the Qdrant client to keep the rest of the code clean and
/// stable.
///
/// Encapsulates the underlying client, the target collection name, and the
/// distance function of the vector space.
pub struct QdrantFacade {
    client: Qdrant,
    pub(crate) collection: String,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the builder-based API of `qdrant-client` and supports optional
    /// API key authentication.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?; // Early validation of config.

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
        })
    }

    /// Names of all collections currently known to the service.
    pub async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let res = self
            .client
            .list_collections()
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;
        Ok(res.collections.into_iter().map(|c| c.name).collect())
    }

    /// Ensures that the collection exists in Qdrant.
    ///
    /// - If the collection name is already listed → no-op.
    /// - If missing → creates it with the given vector space configuration.
    ///
    /// Safe to call repeatedly; must run before any insert or search.
    pub async fn ensure_collection(&self, space: &VectorSpace) -> Result<(), StoreError> {
        info!(
            "Ensuring collection '{}' with size={} distance={:?}",
            self.collection, space.size, self.distance
        );

        let names = self.collection_names().await?;
        if names.iter().any(|n| n == &self.collection) {
            debug!("Collection '{}' already exists", self.collection);
            return Ok(());
        }

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(space.size as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }

    /// Fetches collection info (point count, status) for diagnostics.
    pub async fn collection_info(&self) -> Result<Option<CollectionInfo>, StoreError> {
        let res = self
            .client
            .collection_info(&self.collection)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;
        Ok(res.result)
    }

    /// Upserts (inserts or overwrites by id) a batch of points into the
    /// collection. Returns the number of points sent.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<u64, StoreError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(0);
        }

        let count = points.len() as u64;
        info!(
            "Upserting {} points into collection '{}'",
            count, self.collection
        );

        let res = self
            .client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        debug!("Upsert operation result={:?}", res.result);
        Ok(count)
    }

    /// Performs a similarity search in Qdrant.
    ///
    /// Returns `(score, payload)` tuples sorted by score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
        with_payload: bool,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        info!(
            "Searching in '{}' with top_k={}, with_payload={}",
            self.collection, top_k, with_payload
        );

        let builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(with_payload);

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        m.insert(k, qvalue_to_json(v));
    }
    serde_json::Value::Object(m)
}

/// Converts a single Qdrant `Value` into JSON, recursing into lists and
/// structs (the stored summary is a nested object).
fn qvalue_to_json(v: QValue) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    match v.kind {
        Some(K::StringValue(s)) => serde_json::Value::String(s),
        Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
        Some(K::DoubleValue(f)) => serde_json::json!(f),
        Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(K::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(qvalue_to_json).collect())
        }
        Some(K::StructValue(s)) => serde_json::Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qvalue_to_json(v)))
                .collect(),
        ),
        _ => serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::value::Kind;
    use serde_json::json;

    fn qstring(s: &str) -> QValue {
        QValue {
            kind: Some(Kind::StringValue(s.to_string())),
        }
    }

    #[test]
    fn nested_struct_payload_round_trips() {
        let summary = QValue {
            kind: Some(Kind::StructValue(qdrant_client::qdrant::Struct {
                fields: std::collections::HashMap::from([(
                    "summary_overview".to_string(),
                    qstring("API walkthrough"),
                )]),
            })),
        };
        let payload = std::collections::HashMap::from([
            ("topic".to_string(), qstring("Zoom developer platform")),
            ("summary".to_string(), summary),
            (
                "duration".to_string(),
                QValue {
                    kind: Some(Kind::IntegerValue(45)),
                },
            ),
        ]);

        let json = qpayload_to_json(payload);
        assert_eq!(json["topic"], "Zoom developer platform");
        assert_eq!(json["duration"], 45);
        assert_eq!(json["summary"]["summary_overview"], "API walkthrough");
    }

    #[test]
    fn kindless_value_maps_to_null() {
        assert_eq!(qvalue_to_json(QValue { kind: None }), json!(null));
    }
}
