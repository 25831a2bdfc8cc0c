//! Push-stream message schema: `{ ts, seq, samples: [{ soil: { pct }, tilt, vib: { hit } }] }`.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::sample::{Batch, Sample};
use crate::time::parse_wall_clock;

/// One message of the server-sent event channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamMessage {
    /// Wall-clock time of the batch, RFC 3339 or `YYYY-MM-DD HH:MM:SS`.
    pub ts: String,
    #[serde(deserialize_with = "super::lenient::count")]
    pub seq: u64,
    pub samples: Vec<StreamSample>,
    /// Alert flag computed by the source.
    #[serde(default, deserialize_with = "super::lenient::flag")]
    pub alerta: bool,
}

/// One sensor entry of a [`StreamMessage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamSample {
    #[serde(default, deserialize_with = "super::lenient::optional_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::or_default")]
    pub soil: SoilReading,
    #[serde(default, deserialize_with = "super::lenient::flag")]
    pub tilt: bool,
    #[serde(default, deserialize_with = "super::lenient::or_default")]
    pub vib: VibrationReading,
}

/// Soil moisture probe output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    #[serde(default, deserialize_with = "super::lenient::number")]
    pub pct: f64,
    #[serde(default, deserialize_with = "super::lenient::number")]
    pub raw: f64,
}

/// Vibration sensor output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VibrationReading {
    #[serde(default, deserialize_with = "super::lenient::flag")]
    pub hit: bool,
    #[serde(default, deserialize_with = "super::lenient::number")]
    pub pulse: f64,
}

impl StreamMessage {
    /// Parse a raw SSE `data` field.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Json`] when the text is not a message object
    /// (e.g. `samples` is not an array).
    pub fn from_json(data: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(data)?)
    }
}

impl TryFrom<StreamMessage> for Batch {
    type Error = PayloadError;

    fn try_from(message: StreamMessage) -> Result<Self, Self::Error> {
        let timestamp =
            parse_wall_clock(&message.ts).ok_or(PayloadError::InvalidTimestamp(message.ts))?;
        let samples = message
            .samples
            .into_iter()
            .enumerate()
            .map(|(index, sample)| Sample {
                timestamp,
                sensor_id: sample.id.unwrap_or_else(|| (index + 1).to_string()),
                humidity_pct: sample.soil.pct,
                tilt: sample.tilt,
                vibration: sample.vib.hit,
            })
            .collect();
        Ok(Batch {
            sequence_number: message.seq,
            timestamp,
            samples,
        })
    }
}
