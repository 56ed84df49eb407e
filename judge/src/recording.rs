use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keeps the requests and responses of a session and writes them to a JSON file.
pub struct Recorder {
    directory: PathBuf,
    exchanges: Vec<Exchange>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Exchange {
    /// The request as parsed JSON, or the raw line if it wasn't JSON.
    pub request: Value,
    pub response: Value,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            directory,
            exchanges: Vec::new(),
        })
    }

    pub fn store_exchange(&mut self, request_line: &str, response: Value) {
        let request = serde_json::from_str(request_line)
            .unwrap_or_else(|_| Value::String(String::from(request_line)));
        self.exchanges.push(Exchange { request, response });
    }

    /// Writes everything recorded so far to the first free `session_NNNNNN.json`
    /// in the directory and returns its path.
    pub fn write_session_recording(&mut self) -> anyhow::Result<PathBuf> {
        let mut num = 1;
        let filepath = loop {
            let candidate = self.directory.join(format!("session_{:0>6}.json", num));
            if !candidate.exists() {
                break candidate;
            }
            num += 1;
        };
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.exchanges))?;
        Ok(filepath)
    }
}
