//! Startup loading of the two equipment datasets.
//!
//! Both documents are requested concurrently and both must arrive: a
//! failure on either side leaves the session permanently not ready. The
//! result is the [`EquipmentData`] pair whose existence is the readiness
//! proof the prompt composer relies on.

use std::time::Duration;

use hyper::Uri;
use hyper::body::to_bytes;
use tokio::time::timeout;
use tracing::info;

use synapse_primitives::{
    DataError, DataResult, Dataset, DatasetSource, EXTERNAL_DATASET_LABEL, EquipmentData,
    INTERNAL_DATASET_LABEL,
};

use crate::http_client::{HttpsClient, build_client};

/// Loads the equipment datasets from local files or remote URLs.
#[derive(Debug)]
pub struct DatasetLoader {
    client: HttpsClient,
    timeout: Duration,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    /// Creates a loader with the default fetch timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: build_client(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the timeout applied to each remote fetch.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads both datasets concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first [`DataError`] from either load; there is no
    /// partial success.
    pub async fn load(
        &self,
        internal: &DatasetSource,
        external: &DatasetSource,
    ) -> DataResult<EquipmentData> {
        let (internal, external) = tokio::try_join!(
            self.load_one(INTERNAL_DATASET_LABEL, internal),
            self.load_one(EXTERNAL_DATASET_LABEL, external),
        )?;

        info!("equipment datasets loaded");
        Ok(EquipmentData::new(internal, external))
    }

    async fn load_one(&self, label: &str, source: &DatasetSource) -> DataResult<Dataset> {
        let bytes = match source {
            DatasetSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|err| DataError::load(label, err.to_string()))?,
            DatasetSource::Url(url) => self.fetch(label, url).await?,
        };

        Dataset::from_bytes(label, &bytes)
    }

    async fn fetch(&self, label: &str, url: &str) -> DataResult<Vec<u8>> {
        let uri = url
            .parse::<Uri>()
            .map_err(|err| DataError::load(label, format!("invalid URL: {err}")))?;

        let response = timeout(self.timeout, self.client.get(uri))
            .await
            .map_err(|_| DataError::load(label, "fetch timed out"))?
            .map_err(|err| DataError::load(label, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::load(
                label,
                format!(
                    "status {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("unknown")
                ),
            ));
        }

        to_bytes(response.into_body())
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|err| DataError::load(label, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_json(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_both_datasets_from_files() {
        let internal = temp_json(r#"[{"Equipment_Name": "Centrifuge"}]"#);
        let external = temp_json(r#"[{"Equipment_Name": "NMR Spectrometer"}]"#);

        let loader = DatasetLoader::new();
        let data = loader
            .load(
                &DatasetSource::Path(internal.path().to_path_buf()),
                &DatasetSource::Path(external.path().to_path_buf()),
            )
            .await
            .unwrap();

        assert_eq!(data.internal().label(), INTERNAL_DATASET_LABEL);
        assert_eq!(data.external().label(), EXTERNAL_DATASET_LABEL);
        assert_eq!(data.internal().value()[0]["Equipment_Name"], "Centrifuge");
    }

    #[tokio::test]
    async fn missing_file_fails_the_whole_load() {
        let external = temp_json("[]");

        let loader = DatasetLoader::new();
        let err = loader
            .load(
                &DatasetSource::Path("does/not/exist.json".into()),
                &DatasetSource::Path(external.path().to_path_buf()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::Load { .. }));
        assert!(err.to_string().contains(INTERNAL_DATASET_LABEL));
    }

    #[tokio::test]
    async fn invalid_json_fails_as_parse_error() {
        let internal = temp_json("[]");
        let external = temp_json("{ not json");

        let loader = DatasetLoader::new();
        let err = loader
            .load(
                &DatasetSource::Path(internal.path().to_path_buf()),
                &DatasetSource::Path(external.path().to_path_buf()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::Parse { .. }));
        assert!(err.to_string().contains(EXTERNAL_DATASET_LABEL));
    }
}
