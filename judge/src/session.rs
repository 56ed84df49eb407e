use std::io::{BufRead, Write};

use kalah::{ErrorKind, ErrorView, Request, Response};
use tracing::{debug, info, trace};

use crate::recording::Recorder;
use crate::service::Judge;
use crate::Config;

/// Serves requests until `Bye` or the end of the input.
///
/// Every input line is one JSON [`Request`], every output line one JSON
/// [`Response`]. Lines that can't be parsed, including lines that are not
/// UTF-8, get a `malformed_request` error. Returns an error only on I/O
/// failure, not when a request is rejected. The session recording is written
/// in either case.
pub fn run_session<R: BufRead, W: Write>(
    config: Config,
    input: R,
    output: W,
) -> anyhow::Result<()> {
    let Config {
        rng,
        base_url,
        mut recorder,
    } = config;
    let judge = Judge::new(rng, base_url);

    let result = serve(&judge, recorder.as_mut(), input, output);

    info!(games = judge.store().len(), "Session ended");
    if let Some(recorder) = recorder.as_mut() {
        let path = recorder.write_session_recording()?;
        info!(path = %path.display(), "Session recording written");
    }
    result
}

fn serve<R: BufRead, W: Write>(
    judge: &Judge,
    mut recorder: Option<&mut Recorder>,
    mut input: R,
    mut output: W,
) -> anyhow::Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear(); // because read_until() appends to the buffer
        let num_bytes_read = input.read_until(b'\n', &mut buf)?;
        if num_bytes_read == 0 {
            debug!("End of input");
            return Ok(());
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end();
        if line.is_empty() {
            continue;
        }
        trace!(name: "Received request", request = %line);

        let request = match std::str::from_utf8(&buf) {
            Ok(valid) => {
                serde_json::from_str::<Request>(valid.trim_end()).map_err(|err| err.to_string())
            }
            Err(err) => Err(format!("line is not valid UTF-8 ({})", err)),
        };
        let response = match request {
            Ok(req) => match judge.handle(req) {
                Some(response) => response,
                None => return Ok(()),
            },
            Err(err) => {
                debug!(%err, "Malformed request");
                Response::Error(ErrorView::new(
                    ErrorKind::MalformedRequest,
                    format!("{}: {}", ErrorKind::MalformedRequest.reason(), err),
                ))
            }
        };

        let response_json = serde_json::to_string(&response)?;
        trace!(name: "Sending response", response = %response_json);
        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.store_exchange(line, serde_json::to_value(&response)?);
        }
        writeln!(output, "{}", response_json)?;
        output.flush()?;
    }
}
