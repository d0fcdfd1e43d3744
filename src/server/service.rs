use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use tracing::warn;

use super::request::parse_request;
use super::response::write_response;
use crate::context::ResponseWriter;
use crate::engine::Engine;

/// `may_minihttp` service that hands every request to a shared [`Engine`].
#[derive(Clone)]
pub struct AppService {
    pub engine: Arc<Engine>,
}

impl AppService {
    #[must_use]
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

fn bad_request(message: &str) -> ResponseWriter {
    let mut writer = ResponseWriter::new();
    writer.set_header("Content-Type", "application/json");
    writer.write_header(400);
    writer.write(serde_json::json!({ "message": message }).to_string().as_bytes());
    writer
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let writer = match parse_request(req) {
            Ok(request) => self.engine.handle(request),
            Err(e) => {
                warn!(error = %e, "Rejected malformed request");
                bad_request(&e.to_string())
            }
        };
        write_response(res, writer);
        Ok(())
    }
}
