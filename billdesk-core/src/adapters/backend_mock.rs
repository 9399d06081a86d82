//! Mock billing backend for testing
//!
//! Serves the same routes as the real backend on a random local port:
//! - POST /auth/login, POST /auth/register
//! - GET /invoices/recent, POST /invoices, DELETE /invoices/{id}
//! - GET /invoices/{id}/pdf
//! - GET /products
//! - GET /invoices/ai/{id}/analyze
//!
//! Every route outside `/auth` requires `Authorization: Bearer <MOCK_TOKEN>`.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{json, Value as JsonValue};

/// Token handed out by the mock login endpoint
pub const MOCK_TOKEN: &str = "mock-jwt-token";

/// Password accepted by the mock login endpoint
pub const MOCK_PASSWORD: &str = "password";

/// Email the mock register endpoint reports as taken
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// Mock backend server for testing
pub struct MockBackendServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<String>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock data generation
#[derive(Debug, Clone)]
pub struct MockBackendConfig {
    /// Number of invoices returned by /invoices/recent
    pub num_invoices: usize,
    /// Number of products in the catalog
    pub num_products: usize,
    /// Whether invoice creation and deletion answer 500
    pub fail_invoice_writes: bool,
    /// Whether read endpoints answer 500
    pub fail_reads: bool,
    /// Whether the PDF endpoint returns a URL
    pub pdf_available: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            num_invoices: 3,
            num_products: 5,
            fail_invoice_writes: false,
            fail_reads: false,
            pdf_available: true,
            delay_ms: 0,
        }
    }
}

impl MockBackendServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockBackendConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests received so far, as `"METHOD /path"`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.stop();
    }
}

struct MockRequest {
    method: String,
    path: String,
    authorized: bool,
    body: JsonValue,
}

/// Read the head and, when a Content-Length is present, the full body
fn read_request(stream: &mut TcpStream) -> Option<MockRequest> {
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let mut data = Vec::new();
    let mut buffer = [0; 4096];
    let head_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let head_lower = head.to_lowercase();
    let content_length = head_lower
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let mut parts = head.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.split('?').next().unwrap_or("").to_string();
    let body = serde_json::from_slice(&data[head_end..]).unwrap_or(JsonValue::Null);

    Some(MockRequest {
        method,
        path,
        authorized: head_lower.contains(&format!("authorization: bearer {}", MOCK_TOKEN)),
        body,
    })
}

fn handle_connection(mut stream: TcpStream, config: &MockBackendConfig, log: &Mutex<Vec<String>>) {
    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, "Bad Request", r#"{"message": "Invalid request"}"#);
        return;
    };

    if let Ok(mut log) = log.lock() {
        log.push(format!("{} {}", request.method, request.path));
    }

    if config.delay_ms > 0 {
        thread::sleep(Duration::from_millis(config.delay_ms));
    }

    let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "login"]) => handle_login(&mut stream, &request.body),
        ("POST", ["auth", "register"]) => handle_register(&mut stream, &request.body),
        _ if !request.authorized => {
            send_response(&mut stream, 401, "Unauthorized", r#"{"message": "Invalid token"}"#);
        }
        ("GET", ["invoices", "recent"]) => {
            if config.fail_reads {
                send_server_error(&mut stream);
            } else {
                let invoices: Vec<JsonValue> = (1..=config.num_invoices).map(mock_invoice).collect();
                send_json(&mut stream, &JsonValue::Array(invoices));
            }
        }
        ("POST", ["invoices"]) => {
            if config.fail_invoice_writes {
                send_server_error(&mut stream);
            } else {
                send_json(&mut stream, &created_invoice(&request.body));
            }
        }
        ("DELETE", ["invoices", id]) if id.parse::<i64>().is_ok() => {
            if config.fail_invoice_writes {
                send_server_error(&mut stream);
            } else {
                send_response(&mut stream, 200, "OK", "");
            }
        }
        ("GET", ["invoices", id, "pdf"]) => {
            if config.pdf_available {
                let body = format!("https://files.billdesk.test/invoices/{}.pdf", id);
                send_text(&mut stream, &body);
            } else {
                send_text(&mut stream, "");
            }
        }
        ("GET", ["products"]) => {
            if config.fail_reads {
                send_server_error(&mut stream);
            } else {
                let products: Vec<JsonValue> = (1..=config.num_products).map(mock_product).collect();
                send_json(&mut stream, &JsonValue::Array(products));
            }
        }
        ("GET", ["invoices", "ai", id, "analyze"]) => {
            if config.fail_reads {
                send_server_error(&mut stream);
            } else {
                send_json(&mut stream, &mock_analytics(id));
            }
        }
        _ => send_response(&mut stream, 404, "Not Found", r#"{"message": "Endpoint not found"}"#),
    }
}

fn handle_login(stream: &mut TcpStream, body: &JsonValue) {
    let password = body["password"].as_str().unwrap_or("");
    if password == MOCK_PASSWORD {
        let reply = json!({"token": MOCK_TOKEN, "message": "Login successful"});
        send_json(stream, &reply);
    } else {
        send_response(stream, 401, "Unauthorized", r#"{"message": "Bad credentials"}"#);
    }
}

fn handle_register(stream: &mut TcpStream, body: &JsonValue) {
    if body["email"].as_str() == Some(TAKEN_EMAIL) {
        send_response(stream, 400, "Bad Request", r#"{"message": "Email already registered"}"#);
    } else {
        send_text(stream, "User registered successfully");
    }
}

fn send_server_error(stream: &mut TcpStream) {
    send_response(
        stream,
        500,
        "Internal Server Error",
        r#"{"status": 500, "error": "Internal Server Error"}"#,
    );
}

fn send_json(stream: &mut TcpStream, value: &JsonValue) {
    send_response(stream, 200, "OK", &value.to_string());
}

fn send_text(stream: &mut TcpStream, body: &str) {
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nConnection: close\r\nContent-Length: {}\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn mock_product(i: usize) -> JsonValue {
    json!({
        "id": i,
        "name": format!("Product {}", i),
        "price": (i * 1000) as f64,
        "stock": 100,
    })
}

fn mock_invoice(i: usize) -> JsonValue {
    let customers = ["Acme Traders", "Globex Retail", "Initech Supplies"];
    let statuses = ["UNPAID", "PAID", "OVERDUE"];
    let created = Utc::now().naive_utc() - ChronoDuration::days(i as i64);

    json!({
        "id": 100 + i,
        "invoiceNumber": format!("INV-{:04}", i),
        "customerName": customers[i % customers.len()],
        "totalAmount": (i * 1180) as f64,
        "status": statuses[i % statuses.len()],
        "createdAt": created.format("%Y-%m-%dT%H:%M:%S").to_string(),
    })
}

/// Echo the request back as a stored invoice with server-side totals
fn created_invoice(body: &JsonValue) -> JsonValue {
    let items = body["items"].as_array().cloned().unwrap_or_default();
    let subtotal: f64 = items
        .iter()
        .map(|item| {
            let product_id = item["productId"].as_i64().unwrap_or(0);
            let quantity = item["quantity"].as_i64().unwrap_or(0);
            (product_id * 1000 * quantity) as f64
        })
        .sum();

    json!({
        "id": 500,
        "invoiceNumber": "INV-0500",
        "customerName": body["customerName"],
        "totalAmount": subtotal * 1.18,
        "status": body["status"],
        "createdAt": Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
    })
}

fn mock_analytics(id: &str) -> JsonValue {
    json!({
        "invoiceId": id,
        "overdueProbability": 0.72,
        "riskAnalysis": {"status": "RISKY", "reason": "Client paid two earlier invoices late"},
        "recommendation": "Send a payment reminder before the due date",
        "nlpAnomaly": {"anomalyDetected": true, "keywords": ["urgent", "discount"]},
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockBackendServer::start(MockBackendConfig::default()).unwrap();
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_created_invoice_totals() {
        let body = json!({
            "customerName": "Acme Traders",
            "status": "UNPAID",
            "items": [{"productId": 1, "quantity": 2}, {"productId": 2, "quantity": 1}]
        });
        let invoice = created_invoice(&body);
        assert_eq!(invoice["customerName"], "Acme Traders");
        assert!((invoice["totalAmount"].as_f64().unwrap() - 4720.0).abs() < 1e-6);
    }
}
