//! Serves a built fixture site over HTTP through [`StaticRouter`] and checks
//! the fallback contract a static host must honour.
//!
//! Run with: `cargo test --test static_server`

use queenchufe::router::{RouterError, StaticRouter};
use std::io::{Read as _, Write as _};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

// ===========================================================================
// Minimal HTTP server backed by StaticRouter
// ===========================================================================

struct TestServer {
    port: u16,
    _stop: std::sync::mpsc::Sender<()>,
}

impl TestServer {
    fn start(root: PathBuf) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let router = StaticRouter::new(root);

        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let router = router.clone();
                        thread::spawn(move || serve_request(stream, &router));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self { port, _stop: tx }
    }
}

fn serve_request(mut stream: TcpStream, router: &StaticRouter) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request.split_whitespace().nth(1).unwrap_or("/");
    let path = path.split('?').next().unwrap_or("/");

    let (status, body, ct) = match router.resolve(path) {
        Ok(served) => {
            let body = std::fs::read(served.path()).unwrap_or_default();
            ("200 OK", body, served.content_type())
        }
        Err(RouterError::OutsideRoot(_)) => {
            ("403 Forbidden", b"Forbidden".to_vec(), "text/plain")
        }
    };

    let header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: {ct}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
}

struct Response {
    status: u16,
    content_type: String,
    body: String,
}

fn get(server: &TestServer, path: &str) -> Response {
    let mut stream = TcpStream::connect(("127.0.0.1", server.port)).unwrap();
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
    )
    .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap();
    let content_type = head
        .lines()
        .find_map(|l| l.strip_prefix("Content-Type: "))
        .unwrap_or("")
        .to_string();
    Response {
        status,
        content_type,
        body: body.to_string(),
    }
}

// ===========================================================================
// Setup
// ===========================================================================

fn built_site() -> &'static Path {
    static BUILT: OnceLock<PathBuf> = OnceLock::new();
    BUILT.get_or_init(|| {
        let out = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("static-server-site");
        let source = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
        let status = Command::new(env!("CARGO_BIN_EXE_queenchufe"))
            .args([
                "build",
                "--source",
                source.to_str().unwrap(),
                "--output",
                out.to_str().unwrap(),
            ])
            .env("RUST_LOG", "off")
            .status()
            .expect("failed to run queenchufe");
        assert!(status.success(), "fixture generation failed");
        out
    })
}

fn start_server() -> TestServer {
    TestServer::start(built_site().to_path_buf())
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn root_serves_home() {
    let server = start_server();
    let res = get(&server, "/");
    assert_eq!(res.status, 200);
    assert!(res.content_type.starts_with("text/html"));
    assert!(res.body.contains(r#"data-view="home""#));
}

#[test]
fn pair_path_serves_prerendered_page() {
    let server = start_server();
    for path in ["/es/fr", "/es/fr/"] {
        let res = get(&server, path);
        assert_eq!(res.status, 200);
        assert!(res.body.contains(r#"data-view="pair""#), "{path}");
        assert!(res.body.contains("https://queenchufe.test/es/fr"));
    }
}

#[test]
fn unknown_pair_gets_entry_document_with_success() {
    let server = start_server();
    let res = get(&server, "/zz/fr");
    assert_eq!(res.status, 200);
    assert!(res.body.contains(r#"data-view="home""#));
    assert!(res.body.contains(r#"data-not-found-title="País no encontrado | QueEnchufe.com""#));
}

#[test]
fn assets_carry_their_content_type() {
    let server = start_server();
    let res = get(&server, "/data/countries.json?v=1");
    assert_eq!(res.status, 200);
    assert!(res.content_type.starts_with("application/json"));
    assert!(res.body.contains(r#""ES""#));

    let res = get(&server, "/plugs/plug-g.svg");
    assert_eq!(res.content_type, "image/svg+xml");
}

#[test]
fn traversal_is_forbidden() {
    let server = start_server();
    let res = get(&server, "/../../etc/passwd");
    assert_eq!(res.status, 403);
}
