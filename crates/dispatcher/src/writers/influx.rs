//! InfluxWriter - InfluxDB 1.x HTTP write endpoint

use contracts::{ContractError, InfluxConfig, PointWriter, TimeSeriesPoint};
use reqwest::Client;
use tracing::{debug, instrument};

use super::line_protocol::encode_points;
use crate::error::DispatcherError;

/// Writer posting line protocol to `/write`
#[derive(Debug, Clone)]
pub struct InfluxWriter {
    name: String,
    client: Client,
    write_url: String,
    database: String,
    username: Option<String>,
    password: Option<String>,
}

impl InfluxWriter {
    /// Create a new InfluxWriter
    pub fn new(config: &InfluxConfig) -> Result<Self, DispatcherError> {
        let timeout = config
            .timeout()
            .map_err(|e| DispatcherError::writer_creation("influxdb", e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatcherError::writer_creation("influxdb", e.to_string()))?;

        Ok(Self {
            name: format!("influxdb:{}", config.database),
            client,
            write_url: format!("{}/write", config.url.trim_end_matches('/')),
            database: config.database.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn write_url(&self) -> &str {
        &self.write_url
    }

    fn query(&self) -> Vec<(&'static str, &str)> {
        let mut query = vec![("db", self.database.as_str()), ("precision", "s")];
        if let Some(user) = &self.username {
            query.push(("u", user.as_str()));
        }
        if let Some(password) = &self.password {
            query.push(("p", password.as_str()));
        }
        query
    }
}

impl PointWriter for InfluxWriter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "influx_write", skip(self, points), fields(writer = %self.name, points = points.len()))]
    async fn write_points(&self, points: &[TimeSeriesPoint]) -> Result<(), ContractError> {
        let body = encode_points(points)?;

        let response = self
            .client
            .post(&self.write_url)
            .query(&self.query())
            .body(body)
            .send()
            .await
            .map_err(|e| ContractError::forward(format!("POST {} failed: {e}", self.write_url)))?;

        let status = response.status();
        if status.is_success() {
            debug!(writer = %self.name, %status, "Points written");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(ContractError::forward(format!(
            "POST {} returned {status}: {}",
            self.write_url,
            text.trim()
        )))
    }
}
