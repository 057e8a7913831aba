use std::{fs::File, io::{BufWriter, Write}, path::PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Serialize, Debug, Clone)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub kind: String,
    pub target: Option<String>,
    pub details: serde_json::Value,
}

#[derive(Clone)]
pub struct Logger {
    tx: mpsc::UnboundedSender<Event>,
}

impl Logger {
    /// Events go to `out` as JSON lines when a path is given, otherwise to
    /// stderr so stdout stays reserved for match output.
    pub fn new(out: Option<PathBuf>) -> Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        match out {
            Some(path) => {
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                tokio::spawn(async move {
                    while let Some(ev) = rx.recv().await {
                        if let Ok(line) = serde_json::to_vec(&ev) {
                            let _ = writer.write_all(&line);
                            let _ = writer.write_all(b"\n");
                            let _ = writer.flush();
                        }
                    }
                });
            }
            None => {
                tokio::task::spawn_blocking(move || {
                    let stderr = std::io::stderr();
                    let mut handle = stderr.lock();
                    while let Some(ev) = rx.blocking_recv() {
                        if let Ok(line) = serde_json::to_vec(&ev) {
                            let _ = handle.write_all(&line);
                            let _ = handle.write_all(b"\n");
                        }
                    }
                });
            }
        }
        Ok(Self { tx })
    }

    pub fn log(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }
}

pub fn ev(kind: &str, target: Option<&str>, details: serde_json::Value) -> Event {
    Event {
        ts: Utc::now(),
        kind: kind.to_string(),
        target: target.map(|s| s.to_string()),
        details,
    }
}
