//! serde model of the iperf3 JSON report
//!
//! Only the fields the converter reads are modelled; everything else in the
//! document is ignored. Stream sample scalars are `Option` so the parser can
//! report which interval a missing field belongs to, instead of failing with
//! a bare deserialization error.

use crate::types::ConnectionInfo;
use serde::Deserialize;

/// Root of an iperf3 JSON report
#[derive(Debug, Deserialize)]
pub(crate) struct RawReport {
    pub start: RawStart,
    #[serde(default)]
    pub intervals: Vec<RawInterval>,
}

/// Session metadata block
#[derive(Debug, Deserialize)]
pub(crate) struct RawStart {
    pub timestamp: Option<RawTimestamp>,
    #[serde(default)]
    pub connected: Vec<ConnectionInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTimestamp {
    /// Session start as seconds since the Unix epoch
    pub timesecs: Option<i64>,
}

/// One reporting interval with per-stream measurements
#[derive(Debug, Deserialize)]
pub(crate) struct RawInterval {
    #[serde(default)]
    pub streams: Vec<RawStreamSample>,
}

/// One per-stream measurement within an interval
#[derive(Debug, Deserialize)]
pub(crate) struct RawStreamSample {
    pub socket: Option<u64>,
    /// Elapsed offset from the session start, in seconds
    pub start: Option<f64>,
    pub bits_per_second: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_report() {
        let doc = r#"{
            "start": {
                "connected": [
                    {"socket": 5, "local_host": "10.0.0.1", "local_port": 5201,
                     "remote_host": "10.0.0.2", "remote_port": 54321}
                ],
                "timestamp": {"timesecs": 1700000000}
            },
            "intervals": [
                {"streams": [{"socket": 5, "start": 0, "bits_per_second": 999700000.4}]}
            ]
        }"#;

        let report: RawReport = serde_json::from_str(doc).unwrap();
        assert_eq!(report.start.timestamp.unwrap().timesecs, Some(1700000000));
        assert_eq!(report.start.connected.len(), 1);
        assert_eq!(report.start.connected[0].socket, 5);
        assert_eq!(report.intervals.len(), 1);
        assert_eq!(report.intervals[0].streams[0].socket, Some(5));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        // Real iperf3 reports carry far more fields than the converter reads
        let doc = r#"{
            "start": {
                "version": "iperf 3.12",
                "system_info": "Linux",
                "timestamp": {"time": "...", "timesecs": 1700000000},
                "connected": []
            },
            "intervals": [],
            "end": {"sum_sent": {}}
        }"#;

        let report: RawReport = serde_json::from_str(doc).unwrap();
        assert!(report.intervals.is_empty());
    }

    #[test]
    fn test_missing_intervals_defaults_to_empty() {
        let doc = r#"{"start": {"timestamp": {"timesecs": 1700000000}}}"#;
        let report: RawReport = serde_json::from_str(doc).unwrap();
        assert!(report.intervals.is_empty());
        assert!(report.start.connected.is_empty());
    }
}
