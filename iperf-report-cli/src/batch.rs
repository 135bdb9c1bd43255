//! Batch conversion
//!
//! Implements the caller side of the library boundary: create a fresh
//! timestamped result directory (failing loudly if it already exists), write
//! one workbook per input named after the input's base name plus the shared
//! batch timestamp, and apply the per-file failure policy (log, continue with
//! the remaining files, report a summary).

use anyhow::{bail, Context, Result};
use iperf_report::ParseOptions;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const RESULT_DIR_PREFIX: &str = "IperfAnalyzer_Result_";
const BATCH_TIMESTAMP_FORMAT: &str = "%y%m%d%H%M%S";

/// One batch of conversions
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Input report files
    pub inputs: Vec<PathBuf>,
    /// Directory the result folder is created under
    pub base_dir: PathBuf,
    /// Optional timestamp cutoff applied to every input
    pub cutoff: Option<String>,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// The freshly created result directory
    pub result_dir: PathBuf,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Run a batch: set up the result directory and convert every input
///
/// A failing input is logged and skipped; the remaining files still proceed.
/// Only batch setup problems (no inputs, result directory already exists)
/// abort the whole run.
pub fn run(job: &BatchJob) -> Result<BatchSummary> {
    if job.inputs.is_empty() {
        bail!("no input files to convert");
    }

    let stamp = chrono::Local::now().format(BATCH_TIMESTAMP_FORMAT).to_string();
    let result_dir = create_result_dir(&job.base_dir, &stamp)?;
    log::info!("Result directory: {:?}", result_dir);

    let options = match &job.cutoff {
        Some(cutoff) => ParseOptions::new().with_cutoff(cutoff.clone()),
        None => ParseOptions::new(),
    };

    // Each file's result depends only on its own input, so the batch converts
    // files in parallel
    let outcomes: Vec<(PathBuf, Result<()>)> = job
        .inputs
        .par_iter()
        .map(|input| {
            let outcome = convert_one(input, &result_dir, &stamp, &options);
            (input.clone(), outcome)
        })
        .collect();

    let mut summary = BatchSummary {
        result_dir,
        ..Default::default()
    };
    for (input, outcome) in outcomes {
        match outcome {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                log::error!("Failed to convert {:?}: {:#}", input, e);
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "Batch finished: {}/{} file(s) converted into {:?}",
        summary.succeeded,
        summary.total(),
        summary.result_dir
    );
    Ok(summary)
}

/// Create the fresh result directory; an existing directory is an error
fn create_result_dir(base_dir: &Path, stamp: &str) -> Result<PathBuf> {
    let dir = base_dir.join(format!("{}{}", RESULT_DIR_PREFIX, stamp));
    fs::create_dir(&dir)
        .with_context(|| format!("Failed to create result directory: {:?}", dir))?;
    Ok(dir)
}

/// Convert a single input into `<stem>_<stamp>.xlsx` inside the result dir
fn convert_one(
    input: &Path,
    result_dir: &Path,
    stamp: &str,
    options: &ParseOptions,
) -> Result<()> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Input path has no usable file name: {:?}", input))?;
    let output = result_dir.join(format!("{}_{}.xlsx", stem, stamp));

    let table = iperf_report::parse_report(input, options)?;
    iperf_report::write_workbook(&table, &output)?;

    log::info!("Wrote {:?}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID_REPORT: &str = r#"{
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

    fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_batch_converts_all_inputs() {
        let dir = tempdir().unwrap();
        let a = write_input(dir.path(), "run_a.json", VALID_REPORT);
        let b = write_input(dir.path(), "run_b.json", VALID_REPORT);

        let job = BatchJob {
            inputs: vec![a, b],
            base_dir: dir.path().to_path_buf(),
            cutoff: None,
        };

        let summary = run(&job).unwrap();
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 0);

        let outputs: Vec<_> = fs::read_dir(&summary.result_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|name| name.ends_with(".xlsx")));
        assert!(outputs.iter().any(|name| name.starts_with("run_a_")));
        assert!(outputs.iter().any(|name| name.starts_with("run_b_")));
    }

    #[test]
    fn test_corrupt_input_does_not_affect_siblings() {
        let dir = tempdir().unwrap();
        let good = write_input(dir.path(), "good.json", VALID_REPORT);
        let bad = write_input(dir.path(), "bad.json", "{not json");

        let job = BatchJob {
            inputs: vec![good, bad],
            base_dir: dir.path().to_path_buf(),
            cutoff: None,
        };

        let summary = run(&job).unwrap();
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);

        let outputs: Vec<_> = fs::read_dir(&summary.result_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].starts_with("good_"));
    }

    #[test]
    fn test_existing_result_dir_fails_loudly() {
        let dir = tempdir().unwrap();
        let first = create_result_dir(dir.path(), "991231235959").unwrap();
        assert!(first.is_dir());

        let err = create_result_dir(dir.path(), "991231235959").unwrap_err();
        assert!(format!("{:#}", err).contains("result directory"));
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let dir = tempdir().unwrap();
        let job = BatchJob {
            inputs: vec![],
            base_dir: dir.path().to_path_buf(),
            cutoff: None,
        };
        assert!(run(&job).is_err());
    }
}
