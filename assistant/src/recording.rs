use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use hanabi_helper::Response;
use serde::Serialize;
use serde_json::Value;

/// Keeps the requests and responses of a session and writes them out as one
/// JSON file per session, for replaying bug reports.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    exchanges: Vec<Exchange>,
}

#[derive(Serialize)]
struct Exchange {
    request: Value,
    /// Absent for `bye`.
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<Value>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            exchanges: Vec::new(),
        })
    }

    /// Malformed request lines are kept verbatim as JSON strings.
    pub fn store_request(&mut self, line: &str, response: Option<&Response>) -> anyhow::Result<()> {
        let request =
            serde_json::from_str(line).unwrap_or_else(|_| Value::String(String::from(line)));
        let response = response.map(serde_json::to_value).transpose()?;
        self.exchanges.push(Exchange { request, response });
        Ok(())
    }

    pub fn write_session_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("session_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.exchanges))?;
        self.num += 1;
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_rejected() {
        assert!(Recorder::new(PathBuf::from("/definitely/not/here")).is_err());
    }

    #[test]
    fn writes_numbered_recordings() {
        let dir = std::env::temp_dir().join(format!("assistant_recording_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut recorder = Recorder::new(dir.clone()).unwrap();
        recorder
            .store_request(
                r#"{"type":"view"}"#,
                Some(&Response::Error {
                    message: String::from("No game in progress"),
                }),
            )
            .unwrap();
        recorder.store_request("garbage", None).unwrap();
        let path = recorder.write_session_recording().unwrap();
        assert!(path.ends_with("session_000001.json"));

        let written: Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(written[0]["request"]["type"], "view");
        assert_eq!(written[0]["response"]["type"], "error");
        assert_eq!(written[1]["request"], "garbage");
        assert!(written[1].get("response").is_none());

        let next = recorder.write_session_recording().unwrap();
        assert!(next.ends_with("session_000002.json"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
