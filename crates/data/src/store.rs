use onehand_core::{OutcomeRecord, OutcomeSink, SinkError};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one JSON object per outcome; `commit` flushes the batch to disk.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    writer: BufWriter<File>,
    pending: usize,
}

impl JsonlStore {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let unavailable = |err: std::io::Error| SinkError::Unavailable(format!("{}: {err}", path.display()));
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(unavailable)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            pending: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeSink for JsonlStore {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, outcome)
            .map_err(|err| SinkError::Write(err.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|err| SinkError::Write(err.to_string()))?;
        self.pending += 1;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        self.writer
            .flush()
            .map_err(|err| SinkError::Write(err.to_string()))?;
        tracing::info!(path = %self.path.display(), records = self.pending, "outcomes committed");
        self.pending = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_records;
    use onehand_core::{NoopObserver, Run, RunConfig};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn store_appends_across_runs() {
        let file = unique_temp_file();
        for seed in [1, 2] {
            let mut store = JsonlStore::open(&file).expect("open");
            let mut run = Run::new(RunConfig::new(2).with_seed(seed)).expect("run");
            let report = run.start(Some(&mut store), &mut NoopObserver).expect("start");
            assert!(report.persisted_cleanly());
        }
        let records = load_records(&file).expect("load");
        assert_eq!(records.len(), 8);
        assert_ne!(records[0].run_id, records[4].run_id);
        let _ = fs::remove_file(file);
    }

    #[test]
    fn directory_path_is_unavailable() {
        let err = JsonlStore::open(&std::env::temp_dir()).expect_err("directory");
        assert!(matches!(err, SinkError::Unavailable(_)));
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "onehand_store_test_{}_{}.jsonl",
            std::process::id(),
            nanos
        ))
    }
}
