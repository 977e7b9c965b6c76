#![cfg(feature = "api")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

const IMPACT_KEYS: &[&str] = &[
    "outdoor_temperature",
    "unit_count",
    "baseline",
    "load_shed",
    "impact_mw",
    "flex_down_pct",
    "status",
    "advisory",
    "note",
    "analysis",
];

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn served_binary_answers_impact_and_config() {
    let port = allocate_port();
    let _child = spawn_api_process(port);
    let addr = format!("127.0.0.1:{port}");

    wait_for_server(&addr, Duration::from_secs(8));

    let (status, body) = http_get(&addr, "/impact?outdoor_temperature=40&unit_count=2000")
        .expect("/impact request should succeed");
    assert_eq!(status, 200);

    let impact: Value = serde_json::from_str(&body).expect("impact body should be JSON object");
    let obj = impact.as_object().expect("impact should be an object");
    for key in IMPACT_KEYS {
        assert!(obj.contains_key(*key), "missing key: {key}");
    }
    assert_eq!(obj.get("unit_count").and_then(Value::as_u64), Some(2000));

    let (status, _) = http_get(&addr, "/impact?outdoor_temperature=99")
        .expect("/impact request should succeed");
    assert_eq!(status, 400);

    let (status, body) = http_get(&addr, "/config").expect("/config request should succeed");
    assert_eq!(status, 200);
    let config: Value = serde_json::from_str(&body).expect("config body should be JSON object");
    assert_eq!(config["model_kind"], "linear");
}

fn allocate_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let port = listener
        .local_addr()
        .expect("local_addr should be available")
        .port();
    drop(listener);
    port
}

fn spawn_api_process(port: u16) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_cooling-flex"))
        .args(["--serve", "--port", &port.to_string()])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("cooling-flex process should spawn");

    ChildGuard { child }
}

fn wait_for_server(addr: &str, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((status, _)) = http_get(addr, "/config") {
            if status == 200 {
                return;
            }
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for API server on {addr}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http_get(addr: &str, path: &str) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(addr).map_err(|err| format!("connect: {err}"))?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_code = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("invalid status code: {err}"))?;

    Ok((status_code, body.to_string()))
}
