//! Browser tests of the generated page's script.
//!
//! These tests build `fixtures/content` with the real binary, serve the
//! output over a local HTTP server, and drive it in headless Chrome.
//!
//! Run with: `cargo test --test browser_page -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// ===========================================================================
// Minimal static file server with a fake mail relay at /relay
// ===========================================================================

/// Delay before the fake relay answers, so a send stays in flight long
/// enough to observe.
const RELAY_DELAY: Duration = Duration::from_millis(400);

struct TestServer {
    port: u16,
    relay_hits: Arc<AtomicUsize>,
    _stop: std::sync::mpsc::Sender<()>,
}

impl TestServer {
    fn start(root: PathBuf) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let relay_hits = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&relay_hits);

        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let root = root.clone();
                        let hits = Arc::clone(&hits);
                        thread::spawn(move || serve_request(stream, &root, &hits));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            port,
            relay_hits,
            _stop: tx,
        }
    }

    fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    fn relay_hits(&self) -> usize {
        self.relay_hits.load(Ordering::SeqCst)
    }
}

/// Read the request head and any declared body.
fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match stream.read(&mut buf) {
            Ok(n) if n > 0 => n,
            _ => break,
        };
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    k.eq_ignore_ascii_case("content-length")
                        .then(|| v.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

fn serve_request(mut stream: std::net::TcpStream, root: &Path, relay_hits: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let request = read_request(&mut stream);
    if request.is_empty() {
        return;
    }
    let mut parts = request.split_whitespace();
    let method = parts.next().unwrap_or("GET");
    let path = parts.next().unwrap_or("/");

    let (status, body, ct) = if path == "/relay" && method == "POST" {
        relay_hits.fetch_add(1, Ordering::SeqCst);
        thread::sleep(RELAY_DELAY);
        ("200 OK", b"OK".to_vec(), "text/plain")
    } else {
        let rel = path.trim_start_matches('/');
        let file_path = if rel.is_empty() {
            root.join("index.html")
        } else {
            root.join(rel)
        };
        if file_path.is_file() {
            let body = std::fs::read(&file_path).unwrap_or_default();
            let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
            let ct = match ext {
                "html" => "text/html; charset=utf-8",
                "svg" => "image/svg+xml",
                "pdf" => "application/pdf",
                _ => "application/octet-stream",
            };
            ("200 OK", body, ct)
        } else {
            ("404 Not Found", b"Not Found".to_vec(), "text/plain")
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

// ===========================================================================
// Setup helpers
// ===========================================================================

/// Build the fixture content into `dir/dist` with the relay at `endpoint`.
fn build_site(dir: &Path, endpoint: &str) {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let content = dir.join("content");
    let output = dir.join("dist");
    std::fs::create_dir_all(content.join("assets")).unwrap();
    for file in ["data.json", "assets/resume.pdf", "assets/profile.svg"] {
        std::fs::copy(root.join("fixtures/content").join(file), content.join(file)).unwrap();
    }
    std::fs::write(
        content.join("config.toml"),
        format!(
            "[site]\navatar = \"profile.svg\"\n\n[mail]\n\
             endpoint = \"{endpoint}\"\n\
             service_id = \"s\"\ntemplate_id = \"t\"\ntoken = \"k\"\ntimeout_secs = 2\n"
        ),
    )
    .unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_folio"))
        .args([
            "build",
            "--source",
            content.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run folio");
    assert!(status.success(), "fixture generation failed");
}

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("browser-page")
}

/// Build the shared fixture site once, with the relay pointed at a dead
/// port so every send fails fast.
fn ensure_site_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let _ = std::fs::remove_dir_all(generated_dir());
        let dead_port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        build_site(
            &generated_dir(),
            &format!("http://127.0.0.1:{dead_port}/send"),
        );
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn navigate(server: &TestServer) -> Arc<Tab> {
    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&server.url())
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn open_page() -> (TestServer, Arc<Tab>) {
    ensure_site_built();
    let server = TestServer::start(generated_dir().join("dist"));
    let tab = navigate(&server);
    (server, tab)
}

/// A freshly built site whose relay is the server's own `/relay` route,
/// answering 200 after [`RELAY_DELAY`].
fn open_page_with_relay() -> (TempDir, TestServer, Arc<Tab>) {
    let dir = TempDir::new().unwrap();
    let server = TestServer::start(dir.path().join("dist"));
    build_site(dir.path(), &format!("{}/relay", server.url()));
    let tab = navigate(&server);
    (dir, server, tab)
}

fn eval_bool(tab: &Tab, js: &str) -> bool {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_bool()
        .unwrap()
}

fn eval_string(tab: &Tab, js: &str) -> String {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_str()
        .unwrap()
        .to_string()
}

/// Poll `js` until it evaluates to true, panicking after `secs`.
fn wait_until(tab: &Tab, js: &str, secs: u64) {
    let deadline = std::time::Instant::now() + Duration::from_secs(secs);
    while std::time::Instant::now() < deadline {
        if eval_bool(tab, js) {
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
    panic!("condition not met within {secs}s: {js}");
}

// ===========================================================================
// Reveal
// ===========================================================================

#[test]
#[ignore]
fn visible_section_fades_in_and_stays() {
    let (_server, tab) = open_page();

    wait_until(&tab, "document.getElementById('about').classList.contains('animate-fade-in')", 5);
    assert!(!eval_bool(
        &tab,
        "document.getElementById('contact').classList.contains('animate-fade-in')"
    ));

    tab.evaluate("window.scrollTo(0, document.body.scrollHeight)", false)
        .unwrap();
    wait_until(&tab, "document.getElementById('contact').classList.contains('animate-fade-in')", 5);

    tab.evaluate("window.scrollTo(0, 0)", false).unwrap();
    thread::sleep(Duration::from_millis(300));
    assert!(eval_bool(
        &tab,
        "document.getElementById('contact').classList.contains('animate-fade-in')"
    ));
}

// ===========================================================================
// Navigation
// ===========================================================================

#[test]
#[ignore]
fn nav_link_scrolls_target_into_view() {
    let (_server, tab) = open_page();

    tab.evaluate(
        "document.querySelector('a[data-nav][data-target=\"projects\"]').click()",
        false,
    )
    .unwrap();
    wait_until(
        &tab,
        "Math.abs(document.getElementById('projects').getBoundingClientRect().top) < 120",
        5,
    );
}

#[test]
#[ignore]
fn mobile_link_closes_menu() {
    let (_server, tab) = open_page();

    assert!(eval_bool(&tab, "document.getElementById('mobile-menu').hidden"));
    tab.evaluate("document.querySelector('[data-menu-toggle]').click()", false)
        .unwrap();
    assert!(!eval_bool(&tab, "document.getElementById('mobile-menu').hidden"));

    tab.evaluate(
        "document.querySelector('#mobile-menu a[data-target=\"skills\"]').click()",
        false,
    )
    .unwrap();
    assert!(eval_bool(&tab, "document.getElementById('mobile-menu').hidden"));
}

// ===========================================================================
// Code dialog and copy
// ===========================================================================

#[test]
#[ignore]
fn copy_button_places_snippet_and_reverts_indicator() {
    let (_server, tab) = open_page();

    tab.evaluate(
        r#"window.__copied = null;
           Object.defineProperty(navigator, 'clipboard', {
               configurable: true,
               value: { writeText: (t) => { window.__copied = t; return Promise.resolve(); } }
           });
           document.querySelector('[data-code-open]').click();"#,
        false,
    )
    .unwrap();
    assert!(eval_bool(&tab, "document.getElementById('code-1').open"));

    tab.evaluate("document.querySelector('#code-1 [data-copy]').click()", false)
        .unwrap();
    wait_until(&tab, "window.__copied !== null", 2);

    let copied = eval_string(&tab, "window.__copied");
    let shown = eval_string(&tab, "document.querySelector('#code-1 pre code').textContent");
    assert_eq!(copied, shown);
    assert!(copied.starts_with("fn winner("));
    assert!(eval_bool(&tab, "document.querySelector('#code-1 [data-copy]').hasAttribute('data-copied')"));

    wait_until(
        &tab,
        "!document.querySelector('#code-1 [data-copy]').hasAttribute('data-copied')",
        4,
    );
}

#[test]
#[ignore]
fn second_copy_does_not_extend_indicator() {
    let (_server, tab) = open_page();

    tab.evaluate(
        r#"Object.defineProperty(navigator, 'clipboard', {
               configurable: true,
               value: { writeText: () => Promise.resolve() }
           });
           document.querySelector('[data-code-open]').click();
           document.querySelector('#code-1 [data-copy]').click();"#,
        false,
    )
    .unwrap();
    thread::sleep(Duration::from_millis(1500));
    tab.evaluate("document.querySelector('#code-1 [data-copy]').click()", false)
        .unwrap();
    assert!(eval_bool(&tab, "document.querySelector('#code-1 [data-copy]').hasAttribute('data-copied')"));

    // 2300 ms after the first copy: its window has closed.
    thread::sleep(Duration::from_millis(800));
    assert!(!eval_bool(
        &tab,
        "document.querySelector('#code-1 [data-copy]').hasAttribute('data-copied')"
    ));
}

#[test]
#[ignore]
fn phone_action_opens_popup() {
    let (_server, tab) = open_page();
    tab.evaluate("document.querySelector('[data-phone-open]').click()", false)
        .unwrap();
    assert!(eval_bool(&tab, "document.getElementById('phone-popup').open"));
    assert_eq!(
        eval_string(&tab, "document.querySelector('#phone-popup .phone-number').textContent"),
        "+351 555 0100"
    );
}

// ===========================================================================
// Contact form
// ===========================================================================

#[test]
#[ignore]
fn failed_send_keeps_fields_and_shows_notice() {
    let (_server, tab) = open_page();

    tab.evaluate(
        r#"const f = document.getElementById('contact-form');
           f.elements.name.value = 'Ada';
           f.elements.email.value = 'ada@example.com';
           f.elements.message.value = 'Hi!';
           f.requestSubmit();"#,
        false,
    )
    .unwrap();

    wait_until(&tab, "document.querySelectorAll('.toast').length === 1", 5);
    assert!(eval_string(&tab, "document.querySelector('.toast').textContent")
        .contains("Failed to send message. Please try again later."));
    assert_eq!(
        eval_string(&tab, "document.getElementById('contact-form').elements.message.value"),
        "Hi!"
    );
    assert!(!eval_bool(&tab, "document.querySelector('[data-submit]').disabled"));
    assert_eq!(
        eval_string(&tab, "document.querySelector('.submit-label').textContent"),
        "Send Message"
    );
    assert!(!eval_bool(&tab, "document.getElementById('success-dialog').open"));
}

#[test]
#[ignore]
fn empty_form_is_blocked_by_required_fields() {
    let (_server, tab) = open_page();
    let valid = eval_bool(&tab, "document.getElementById('contact-form').checkValidity()");
    assert!(!valid);
}

#[test]
#[ignore]
fn successful_send_resets_form_and_opens_dialog() {
    let (_dir, server, tab) = open_page_with_relay();

    tab.evaluate(
        r#"const f = document.getElementById('contact-form');
           f.elements.name.value = 'Ada';
           f.elements.email.value = 'ada@example.com';
           f.elements.message.value = 'Hi!';
           f.requestSubmit();
           f.requestSubmit();"#,
        false,
    )
    .unwrap();

    // In flight: button disabled with the busy label.
    assert!(eval_bool(&tab, "document.querySelector('[data-submit]').disabled"));
    assert_eq!(
        eval_string(&tab, "document.querySelector('.submit-label').textContent"),
        "Sending..."
    );

    wait_until(&tab, "document.getElementById('success-dialog').open", 5);
    assert_eq!(server.relay_hits(), 1, "double submit must send once");
    for field in ["name", "email", "message"] {
        assert_eq!(
            eval_string(
                &tab,
                &format!("document.getElementById('contact-form').elements['{field}'].value")
            ),
            "",
            "{field} should be cleared"
        );
    }
    assert!(!eval_bool(&tab, "document.querySelector('[data-submit]').disabled"));
    assert_eq!(
        eval_string(&tab, "document.querySelector('.submit-label').textContent"),
        "Send Message"
    );
    assert!(eval_bool(&tab, "document.querySelectorAll('.toast').length === 0"));
}
