//! owserver client
//!
//! Reads one-wire sensor values over the owserver TCP protocol. Every read
//! opens its own connection, like a non-persistent ownet client.

use std::time::Duration;

use contracts::{ContractError, OwServerConfig, TemperatureSource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{instrument, trace};

use crate::protocol::{encode_read_request, ServerHeader, FLG_OWNET, HEADER_LEN, MAX_PAYLOAD};

/// owserver network client
#[derive(Debug, Clone)]
pub struct OwServerClient {
    name: String,
    host: String,
    port: u16,
    property: String,
    timeout: Duration,
    flags: i32,
}

impl OwServerClient {
    /// Create a new client
    ///
    /// # Errors
    /// `timeout_secs` that is not a positive, representable duration
    pub fn new(config: &OwServerConfig) -> Result<Self, ContractError> {
        Ok(Self {
            name: format!("owserver@{}:{}", config.host, config.port),
            host: config.host.clone(),
            port: config.port,
            property: config.property.clone(),
            timeout: config.timeout()?,
            flags: FLG_OWNET,
        })
    }

    /// owserver path of the configured property below `address`
    pub fn sensor_path(&self, address: &str) -> String {
        format!("/{}/{}", address.trim_matches('/'), self.property)
    }

    async fn request(&self, path: &str) -> Result<String, ContractError> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        stream
            .write_all(&encode_read_request(path, self.flags))
            .await?;

        loop {
            let mut raw = [0u8; HEADER_LEN];
            stream.read_exact(&mut raw).await?;
            let header = ServerHeader::decode(&raw)
                .ok_or_else(|| ContractError::protocol("short response header"))?;

            if header.is_ping() {
                trace!(path, "owserver ping");
                continue;
            }

            if header.ret < 0 {
                let errno = std::io::Error::from_raw_os_error(-header.ret);
                return Err(ContractError::sensor_read(
                    path,
                    format!("owserver returned {}: {}", header.ret, errno),
                ));
            }

            if header.payload < 0 || header.payload > MAX_PAYLOAD {
                return Err(ContractError::protocol(format!(
                    "invalid payload length {}",
                    header.payload
                )));
            }

            let mut payload = vec![0u8; header.payload as usize];
            stream.read_exact(&mut payload).await?;

            let len = (header.size.max(0) as usize).min(payload.len());
            let value = String::from_utf8_lossy(&payload[..len]);
            return Ok(value.trim_matches(|c: char| c.is_whitespace() || c == '\0').to_string());
        }
    }
}

impl TemperatureSource for OwServerClient {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "owserver_read", skip(self), fields(source = %self.name))]
    async fn read(&self, address: &str) -> Result<String, ContractError> {
        let path = self.sensor_path(address);
        match tokio::time::timeout(self.timeout, self.request(&path)).await {
            Ok(result) => result,
            Err(_) => Err(ContractError::sensor_read(
                address,
                format!("no answer within {:.1}s", self.timeout.as_secs_f64()),
            )),
        }
    }
}
