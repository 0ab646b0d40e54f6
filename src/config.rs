//! Configuration blocks passed through into the envelope.
//!
//! The embedding and index blocks are opaque to this crate: they are placed
//! verbatim at fixed keys of the envelope and never validated. The keys the
//! downstream pipelines recognize are listed in [`EmbeddingKey`] and
//! [`IndexKey`] for callers that build blocks programmatically.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;

/// An opaque JSON object, kept in the order it was given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceBlock(Map<String, Value>);

impl ServiceBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::Config(format!(
                "service block must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// Template for an Azure OpenAI embedding connection.
    pub fn azure_openai_embeddings(
        api_base: impl Into<String>,
        connection_id: impl Into<String>,
    ) -> Self {
        Self::object(json!({
            "api_base": api_base.into(),
            "api_type": "azure",
            "api_version": "2023-07-01-preview",
            "batch_size": "1",
            "connection": { "id": connection_id.into() },
            "connection_type": "workspace_connection",
            "deployment": "text-embedding-ada-002",
            "dimension": 1536,
            "kind": "open_ai",
            "model": "text-embedding-ada-002",
            "schema_version": "2"
        }))
    }

    /// Template for an Azure AI Search index connection.
    pub fn azure_search_index(
        endpoint: impl Into<String>,
        index: impl Into<String>,
        connection_id: impl Into<String>,
    ) -> Self {
        Self::object(json!({
            "api_version": "2023-07-01-preview",
            "connection": { "id": connection_id.into() },
            "connection_type": "workspace_connection",
            "endpoint": endpoint.into(),
            "engine": "azure-sdk",
            "field_mapping": {
                "content": "content",
                "embedding": "contentVector",
                "metadata": "content"
            },
            "index": index.into(),
            "kind": "acs",
            "semantic_configuration_name": "azureml-default"
        }))
    }

    fn object(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a dotted path such as `connection.id`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = self.0.get(parts.next()?)?;
        parts.try_fold(first, |value, part| value.get(part))
    }

    /// Insert or replace a top-level key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Set a top-level key and return self.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the block has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the given recognized keys that are present.
    pub fn present_keys<'a, K: RecognizedKey + 'a>(
        &'a self,
        keys: &'a [K],
    ) -> impl Iterator<Item = &'a K> + 'a {
        keys.iter().filter(move |k| self.get_path(k.as_str()).is_some())
    }
}

/// A documented key of a service block.
pub trait RecognizedKey: Copy {
    /// Key path, dotted for nested keys.
    fn as_str(&self) -> &'static str;
}

/// Keys recognized by the embedding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingKey {
    ApiBase,
    ApiType,
    ApiVersion,
    BatchSize,
    Connection,
    ConnectionId,
    ConnectionType,
    Deployment,
    Dimension,
    Kind,
    Model,
    SchemaVersion,
}

impl EmbeddingKey {
    /// Every recognized embedding key.
    pub const ALL: [EmbeddingKey; 12] = [
        EmbeddingKey::ApiBase,
        EmbeddingKey::ApiType,
        EmbeddingKey::ApiVersion,
        EmbeddingKey::BatchSize,
        EmbeddingKey::Connection,
        EmbeddingKey::ConnectionId,
        EmbeddingKey::ConnectionType,
        EmbeddingKey::Deployment,
        EmbeddingKey::Dimension,
        EmbeddingKey::Kind,
        EmbeddingKey::Model,
        EmbeddingKey::SchemaVersion,
    ];
}

impl RecognizedKey for EmbeddingKey {
    fn as_str(&self) -> &'static str {
        match self {
            EmbeddingKey::ApiBase => "api_base",
            EmbeddingKey::ApiType => "api_type",
            EmbeddingKey::ApiVersion => "api_version",
            EmbeddingKey::BatchSize => "batch_size",
            EmbeddingKey::Connection => "connection",
            EmbeddingKey::ConnectionId => "connection.id",
            EmbeddingKey::ConnectionType => "connection_type",
            EmbeddingKey::Deployment => "deployment",
            EmbeddingKey::Dimension => "dimension",
            EmbeddingKey::Kind => "kind",
            EmbeddingKey::Model => "model",
            EmbeddingKey::SchemaVersion => "schema_version",
        }
    }
}

/// Keys recognized by the index ingestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey {
    ApiVersion,
    Connection,
    ConnectionId,
    ConnectionType,
    Endpoint,
    Engine,
    FieldMapping,
    Index,
    Kind,
    SemanticConfigurationName,
}

impl IndexKey {
    /// Every recognized index key.
    pub const ALL: [IndexKey; 10] = [
        IndexKey::ApiVersion,
        IndexKey::Connection,
        IndexKey::ConnectionId,
        IndexKey::ConnectionType,
        IndexKey::Endpoint,
        IndexKey::Engine,
        IndexKey::FieldMapping,
        IndexKey::Index,
        IndexKey::Kind,
        IndexKey::SemanticConfigurationName,
    ];
}

impl RecognizedKey for IndexKey {
    fn as_str(&self) -> &'static str {
        match self {
            IndexKey::ApiVersion => "api_version",
            IndexKey::Connection => "connection",
            IndexKey::ConnectionId => "connection.id",
            IndexKey::ConnectionType => "connection_type",
            IndexKey::Endpoint => "endpoint",
            IndexKey::Engine => "engine",
            IndexKey::FieldMapping => "field_mapping",
            IndexKey::Index => "index",
            IndexKey::Kind => "kind",
            IndexKey::SemanticConfigurationName => "semantic_configuration_name",
        }
    }
}

/// The two configuration blocks that accompany extracted data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Embedding service parameters
    pub embeddings: ServiceBlock,

    /// Search index parameters
    pub index: ServiceBlock,
}

impl IndexingConfig {
    /// Create a config with empty blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embedding block.
    pub fn with_embeddings(mut self, block: ServiceBlock) -> Self {
        self.embeddings = block;
        self
    }

    /// Set the index block.
    pub fn with_index(mut self, block: ServiceBlock) -> Self {
        self.index = block;
        self
    }

    /// Parse a config document `{"embeddings": {...}, "index": {...}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid JSON: {}", e)))?;
        let mut root = match value {
            Value::Object(map) => map,
            _ => return Err(Error::Config("config must be a JSON object".into())),
        };

        let mut block = |key: &str| -> Result<ServiceBlock> {
            let value = root
                .remove(key)
                .ok_or_else(|| Error::Config(format!("missing `{}` block", key)))?;
            ServiceBlock::from_value(value)
                .map_err(|_| Error::Config(format!("`{}` must be a JSON object", key)))
        };

        let embeddings = block("embeddings")?;
        let index = block("index")?;
        Ok(Self { embeddings, index })
    }

    /// Load a config document from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loaded indexing config from {}", path.display());
        Self::from_json(&contents)
    }
}
