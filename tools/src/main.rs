//! sim-runner: headless request runner for the Monte Carlo engine.
//!
//! Usage:
//!   sim-runner --seed 42 --request '{"type":"triangular","distMin":200,"distMode":400,"distMax":600}'
//!   sim-runner --config engine.json            (JSON-lines on stdin/stdout)
//!
//! Each stdin line is one request tagged by "type". Each response is one
//! stdout line: the report on success, `{"status": 400, "error": ...}` when
//! the parameters were rejected. `{"type": "quit"}` or EOF ends the loop.

use anyhow::Result;
use montecarlo_core::{config::EngineConfig, request::Request, SimEngine, SimError};
use serde_json::Value;
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = flag_value(&args, "--seed").and_then(|s| s.parse::<u64>().ok()) {
        config.seed = seed;
    }
    log::info!(
        "sim-runner: seed={} samples={} trials={} retry={:?}",
        config.seed, config.sample_count, config.trial_count, config.retry_center
    );

    let engine = SimEngine::new(config);

    if let Some(line) = flag_value(&args, "--request") {
        let response = handle_line(&engine, line);
        println!("{response}");
        return Ok(());
    }

    run_ipc_loop(&engine)
}

fn run_ipc_loop(engine: &SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }
        if is_quit(line) {
            break;
        }

        writeln!(stdout, "{}", handle_line(engine, line))?;
        stdout.flush()?;
    }
    Ok(())
}

/// Parse, dispatch and render one request. Never fails: every error
/// becomes an error body.
fn handle_line(engine: &SimEngine, line: &str) -> Value {
    let request: Request = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => return error_body(400, &e.to_string()),
    };
    match request.dispatch(engine) {
        Ok(body) => body,
        Err(e) => {
            let status = status_for(&e);
            log::warn!("{} request failed ({status}): {e}", request.name());
            error_body(status, &e.to_string())
        }
    }
}

fn status_for(err: &SimError) -> u16 {
    if err.is_client_error() { 400 } else { 500 }
}

fn error_body(status: u16, message: &str) -> Value {
    serde_json::json!({ "status": status, "error": message })
}

fn is_quit(line: &str) -> bool {
    serde_json::from_str::<Value>(line)
        .map(|v| v["type"] == "quit")
        .unwrap_or(false)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_parameters_map_to_400() {
        let engine = SimEngine::with_seed(42);
        let body = handle_line(&engine, r#"{"type": "draw"}"#);
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().contains("triangular"));
    }

    #[test]
    fn malformed_json_maps_to_400() {
        let engine = SimEngine::with_seed(42);
        let body = handle_line(&engine, "{not json");
        assert_eq!(body["status"], 400);
    }

    #[test]
    fn valid_request_returns_report() {
        let engine = SimEngine::with_seed(42);
        let body = handle_line(&engine, r#"{"type": "normal", "distMean": 10, "distSD": 2}"#);
        assert!(body.get("status").is_none());
        assert_eq!(body["distValues"].as_array().unwrap().len(), 1000);
    }

    #[test]
    fn quit_detection() {
        assert!(is_quit(r#"{"type": "quit"}"#));
        assert!(!is_quit(r#"{"type": "draw"}"#));
        assert!(!is_quit("garbage"));
    }

    #[test]
    fn flag_lookup() {
        let args: Vec<String> = ["bin", "--seed", "7"].iter().map(|s| s.to_string()).collect();
        assert_eq!(flag_value(&args, "--seed"), Some("7"));
        assert_eq!(flag_value(&args, "--config"), None);
    }
}
