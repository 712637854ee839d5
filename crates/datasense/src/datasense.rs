//! Main DataSense struct and public API.

use std::path::Path;

use crate::error::Result;
use crate::ingest::TableIngestor;
use crate::input::{Parser, ParserConfig};
use crate::join::{join_tables, JoinedTable, RelationshipType};
use crate::table::DataResult;
use crate::transform::{TransformEngine, TransformOperation, TransformResult};

/// Configuration for the pipeline.
#[derive(Debug, Clone, Default)]
pub struct DataSenseConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
}

/// The pipeline entry point: decoding, ingestion, fixes and joins.
pub struct DataSense {
    parser: Parser,
    ingestor: TableIngestor,
    transforms: TransformEngine,
}

impl DataSense {
    /// Create a DataSense instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(DataSenseConfig::default())
    }

    /// Create a DataSense instance with custom configuration.
    pub fn with_config(config: DataSenseConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            ingestor: TableIngestor::new(),
            transforms: TransformEngine::new(),
        }
    }

    /// Decode and ingest a file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DataResult> {
        let path = path.as_ref();
        let (decoded, source) = self.parser.parse_file(path)?;
        let data = self.ingestor.ingest_source(decoded, source)?;

        tracing::info!(
            id = %data.id,
            file = %data.file_name,
            rows = data.row_count(),
            score = data.score(),
            "loaded table"
        );

        Ok(data)
    }

    /// Decode and ingest in-memory contents; the format follows `file_name`.
    pub fn load_bytes(&self, bytes: &[u8], file_name: &str) -> Result<DataResult> {
        let decoded = self.parser.parse_bytes(bytes, file_name)?;
        self.ingestor.ingest(decoded, file_name)
    }

    /// Apply corrective operations in order.
    pub fn clean(
        &self,
        data: &DataResult,
        operations: &[TransformOperation],
    ) -> (DataResult, TransformResult) {
        self.transforms.apply(data, operations)
    }

    /// Inner-join two tables on a key pair.
    pub fn join(
        &self,
        left: &DataResult,
        right: &DataResult,
        left_field: &str,
        right_field: &str,
        relationship_type: RelationshipType,
    ) -> JoinedTable {
        let joined = join_tables(left, right, left_field, right_field, relationship_type);

        tracing::info!(
            id = %joined.data.id,
            file = %joined.data.file_name,
            rows = joined.data.row_count(),
            "joined tables"
        );

        joined
    }
}

impl Default for DataSense {
    fn default() -> Self {
        Self::new()
    }
}
